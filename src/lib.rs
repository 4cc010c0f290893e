// Cat Adoption - Core Library
// Catalog loading, observable cat list and detail-view state, shared by the TUI and tests

pub mod config;
pub mod detail;
pub mod error;
pub mod loader;
pub mod model;
pub mod resource;
pub mod store;

// Re-export commonly used types
pub use config::AppConfig;
pub use detail::{CatDetail, DetailOutcome};
pub use error::{CatalogError, Result};
pub use loader::{parse_cats, BundledCatalog, CatSource, CatalogFile, CATALOG_FILE};
pub use model::Cat;
pub use resource::Resource;
pub use store::{CatStore, CatsState, LoadHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
