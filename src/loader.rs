// Catalog loading - reads cats.json and decodes it into Cat records

use crate::error::{CatalogError, Result};
use crate::model::Cat;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the catalog inside an asset directory
pub const CATALOG_FILE: &str = "cats.json";

const BUNDLED_CATALOG: &str = include_str!("../assets/cats.json");

// ============================================================================
// SOURCES
// ============================================================================

/// A place the cat catalog can be read from
pub trait CatSource: Send + Sync {
    /// Human readable origin, used in log lines
    fn describe(&self) -> String;

    /// Read and decode the whole catalog, or fail without partial results
    fn try_load(&self) -> Result<Vec<Cat>>;

    /// Read the catalog, logging any failure and returning an empty list instead
    fn load(&self) -> Vec<Cat> {
        match self.try_load() {
            Ok(cats) => cats,
            Err(e) => {
                log::error!("could not load cats from {}: {}", self.describe(), e);
                Vec::new()
            }
        }
    }
}

impl<S: CatSource + ?Sized> CatSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn try_load(&self) -> Result<Vec<Cat>> {
        (**self).try_load()
    }
}

/// The catalog compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCatalog;

impl CatSource for BundledCatalog {
    fn describe(&self) -> String {
        format!("bundled {}", CATALOG_FILE)
    }

    fn try_load(&self) -> Result<Vec<Cat>> {
        parse_cats(BUNDLED_CATALOG)
    }
}

/// A catalog file on disk
#[derive(Debug, Clone)]
pub struct CatalogFile {
    path: PathBuf,
}

impl CatalogFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        CatalogFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `cats.json` inside the given asset directory
    pub fn in_dir<P: AsRef<Path>>(assets_dir: P) -> Self {
        Self::new(assets_dir.as_ref().join(CATALOG_FILE))
    }
}

impl CatSource for CatalogFile {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn try_load(&self) -> Result<Vec<Cat>> {
        log::debug!("reading catalog at {:?}", self.path);

        let content = fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })?;

        parse_cats(&content)
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// Decode a JSON array of cats, preserving order
pub fn parse_cats(json: &str) -> Result<Vec<Cat>> {
    let cats: Vec<Cat> = serde_json::from_str(json)?;
    log::info!("parsed {} cats", cats.len());
    Ok(cats)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    const TWO_CATS: &str = r#"[
        {"name":"Tom","introduction":"Grey tabby","avatar":"tom","adopted":false},
        {"name":"Luna","introduction":"Black cat","avatar":"luna","adopted":true}
    ]"#;

    #[test]
    fn test_parse_preserves_order() {
        let cats = parse_cats(TWO_CATS).unwrap();

        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].name, "Tom");
        assert!(!cats[0].adopted);
        assert_eq!(cats[1].name, "Luna");
        assert!(cats[1].adopted);
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        let result = parse_cats(r#"[{"name":"Tom","#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let result = parse_cats(r#"{"name":"Tom","introduction":"x","avatar":"tom"}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let cats = BundledCatalog.try_load().unwrap();

        assert!(!cats.is_empty());
        assert!(cats.iter().all(|c| !c.name.is_empty() && !c.avatar.is_empty()));
    }

    #[test]
    fn test_catalog_file_in_dir() {
        let dir = TempDir::new("catalog_file").unwrap();
        fs::write(dir.path().join(CATALOG_FILE), TWO_CATS).unwrap();

        let source = CatalogFile::in_dir(dir.path());
        let cats = source.try_load().unwrap();

        assert_eq!(
            source.describe(),
            dir.path().join("cats.json").display().to_string()
        );
        assert_eq!(cats.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new("missing_catalog").unwrap();
        let source = CatalogFile::in_dir(dir.path());

        assert!(matches!(source.try_load(), Err(CatalogError::Io { .. })));
    }

    #[test]
    fn test_load_fails_silently() {
        let dir = TempDir::new("silent_catalog").unwrap();

        let missing = CatalogFile::in_dir(dir.path());
        assert!(missing.load().is_empty());

        let corrupt_path = dir.path().join("corrupt.json");
        fs::write(&corrupt_path, "not json at all").unwrap();
        assert!(CatalogFile::new(&corrupt_path).load().is_empty());
    }
}
