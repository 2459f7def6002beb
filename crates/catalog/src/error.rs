use std::io;
use thiserror::Error;

/// Errors raised while building or loading a [`Catalog`](crate::Catalog).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A catalog must hold at least one descriptor.
    #[error("catalog is empty")]
    Empty,
    /// Two descriptors share the same id.
    #[error("duplicate asset id: {0}")]
    DuplicateId(String),
    /// A descriptor has no tags left after trimming.
    #[error("asset '{0}' has no tags")]
    MissingTags(String),
    /// A descriptor field is blank or otherwise unusable.
    #[error("invalid catalog entry: {0}")]
    InvalidEntry(String),
    /// The catalog file extension is not one we know how to parse.
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse YAML catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        assert_eq!(CatalogError::Empty.to_string(), "catalog is empty");
        assert!(CatalogError::DuplicateId("vase".into())
            .to_string()
            .contains("vase"));
        assert!(CatalogError::MissingTags("lamp".into())
            .to_string()
            .contains("lamp"));
    }

    #[test]
    fn error_from_io() {
        let err: CatalogError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.to_string().contains("io error"));
    }
}
