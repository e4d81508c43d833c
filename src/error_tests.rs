//! Tests for error types

#[cfg(test)]
mod tests {
    use super::super::error::AnalysisError;

    #[test]
    fn test_column_not_found_lists_columns() {
        let err = AnalysisError::ColumnNotFound {
            available: vec!["id".to_string(), "score".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Column not found. Available: [\"id\", \"score\"]"
        );
    }

    #[test]
    fn test_parse_error() {
        let err = AnalysisError::Parse("unterminated quote".to_string());
        assert!(err.to_string().contains("Parse error"));
        assert!(err.to_string().contains("unterminated quote"));
    }

    #[test]
    fn test_config_error() {
        let err = AnalysisError::Config("bad artifact dir".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_empty_upload() {
        let err = AnalysisError::EmptyUpload;
        assert_eq!(err.to_string(), "No file uploaded");
    }

    #[test]
    fn test_artifact_not_found() {
        let err = AnalysisError::ArtifactNotFound("/tmp/out".to_string());
        assert!(err.to_string().contains("No analyzed artifact"));
        assert!(err.to_string().contains("/tmp/out"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AnalysisError = io_err.into();
        assert!(matches!(err, AnalysisError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_debug() {
        let err = AnalysisError::EmptyUpload;
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("EmptyUpload"));
    }
}
