//! Error types for toolmatrix
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in toolmatrix
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Tool id not present in the catalog
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Comparison requested with fewer than two tools
    #[error("Select at least 2 tools to compare (selected {selected})")]
    NotEnoughTools { selected: usize },

    /// Catalog data is malformed or inconsistent
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Export could not be written
    #[error("Export error: {0}")]
    Export(String),

    /// Share target failed
    #[error("Share error: {0}")]
    Share(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed share link or base URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for toolmatrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_error() {
        let err = MatrixError::UnknownTool("vim-ai".to_string());
        assert_eq!(err.to_string(), "Unknown tool: vim-ai");
    }

    #[test]
    fn test_not_enough_tools_error() {
        let err = MatrixError::NotEnoughTools { selected: 1 };
        assert_eq!(err.to_string(), "Select at least 2 tools to compare (selected 1)");
    }

    #[test]
    fn test_catalog_error() {
        let err = MatrixError::Catalog("duplicate tool id 'cursor'".to_string());
        assert_eq!(err.to_string(), "Catalog error: duplicate tool id 'cursor'");
    }

    #[test]
    fn test_share_error() {
        let err = MatrixError::Share("no clipboard command available".to_string());
        assert_eq!(err.to_string(), "Share error: no clipboard command available");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MatrixError = io_err.into();
        assert!(matches!(err, MatrixError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: MatrixError = json_err.into();
        assert!(matches!(err, MatrixError::Json(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{ not: [a list").unwrap_err();
        let err: MatrixError = yaml_err.into();
        assert!(matches!(err, MatrixError::Yaml(_)));
    }
}
