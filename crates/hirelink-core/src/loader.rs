//! Registry construction.
//!
//! The default dataset is compiled into the crate; deployments can point the
//! server at a different JSON file instead. Either way the registry is built
//! once, validated, and cached for the life of the process.

use crate::error::{RegistryError, Result};
use crate::model::LocationRegistry;
use once_cell::sync::OnceCell;
use std::path::Path;

// Single in-process cache so the bundled dataset is only parsed once.
static REGISTRY_CACHE: OnceCell<LocationRegistry> = OnceCell::new();

const DEFAULT_DATASET: &str = include_str!("../data/locations.json");

impl LocationRegistry {
    /// Load the registry from the bundled dataset.
    ///
    /// The parsed registry is cached process-wide; subsequent calls clone the
    /// cached value.
    pub fn load() -> Result<Self> {
        REGISTRY_CACHE
            .get_or_try_init(|| Self::from_json_str(DEFAULT_DATASET))
            .cloned()
    }

    /// Build a registry from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let registry: Self = serde_json::from_str(json)?;
        registry.normalize_and_validate()
    }

    /// Build a registry from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_loads() {
        let registry = LocationRegistry::load().unwrap();
        let stats = registry.stats();
        assert!(stats.countries >= 5);
        assert!(stats.cities > 50);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = LocationRegistry::from_path("/nonexistent/locations.json").unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
