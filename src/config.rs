// Application configuration - where the cat catalog comes from

use crate::error::{CatalogError, Result};
use crate::loader::{BundledCatalog, CatSource, CatalogFile};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "cat-adoption.toml";
pub const CONFIG_ENV: &str = "CAT_ADOPTION_CONFIG";
pub const CATALOG_ENV: &str = "CAT_ADOPTION_CATALOG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// cats.json on disk; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `.env`, then the config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_with(env::var(CONFIG_ENV).ok(), env::var(CATALOG_ENV).ok())
    }

    /// `load` with the values of `CAT_ADOPTION_CONFIG` and `CAT_ADOPTION_CATALOG` passed in
    pub fn load_with(config_path: Option<String>, catalog: Option<String>) -> Result<Self> {
        let path = config_path
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = Self::from_file(&path)?;
        config.apply_catalog_override(catalog);
        Ok(config)
    }

    /// A blank override is ignored
    fn apply_catalog_override(&mut self, catalog: Option<String>) {
        if let Some(catalog) = catalog {
            if !catalog.trim().is_empty() {
                log::debug!("{} overrides catalog path", CATALOG_ENV);
                self.catalog_path = Some(PathBuf::from(catalog));
            }
        }
    }

    /// Parse a TOML config file. A missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::debug!("no config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| CatalogError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|e| CatalogError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// The catalog source this config points at
    pub fn source(&self) -> Box<dyn CatSource> {
        match &self.catalog_path {
            Some(path) => Box::new(CatalogFile::new(path)),
            None => Box::new(BundledCatalog),
        }
    }
}
