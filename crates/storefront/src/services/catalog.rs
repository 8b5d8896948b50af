//! Catalog loading from disk.

use std::path::Path;

use bazaar_core::{Catalog, CatalogError};
use thiserror::Error;

/// Errors raised while loading the product catalog at start-up.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Read and parse the catalog JSON file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a valid
/// product list.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let catalog = Catalog::from_json(&json)?;
    tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_bundled_catalog_loads() {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/products.json");
        let catalog = load_catalog(&path);
        assert!(catalog.is_ok_and(|c| !c.is_empty()));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/products.json"));
        assert!(matches!(err, Err(CatalogLoadError::Io { .. })));
    }
}
