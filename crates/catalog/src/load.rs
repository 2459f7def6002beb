use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::{AssetDescriptor, Catalog, CatalogError};

/// On-disk shape of a catalog file: a top-level `assets` list.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    assets: Vec<AssetDescriptor>,
}

impl Catalog {
    /// Parse and validate a YAML catalog document.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.assets)
    }

    /// Parse and validate a JSON catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.assets)
    }

    /// Load a catalog file, picking the parser from the extension (`.yaml`, `.yml`, `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let catalog = match ext.as_str() {
            "yaml" | "yml" => Self::from_yaml(&content)?,
            "json" => Self::from_json(&content)?,
            other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
        };

        info!(path = %path.display(), entries = catalog.len(), "catalog_loaded");
        Ok(catalog)
    }
}
