use thiserror::Error;

/// Central error type for the Folio publishing pipeline
#[derive(Error, Debug)]
pub enum FolioError {
    // ============================================================================
    // Manuscript Stage Errors
    // ============================================================================
    #[error("Invalid manuscript ID")]
    InvalidManuscriptId,

    #[error("Empty manuscript content")]
    EmptyContent,

    #[error("No editorial notes found")]
    NoEditorialNotes,

    #[error("Invalid format type")]
    InvalidFormatType,

    #[error("Manuscript not approved")]
    NotApproved,

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Builder pattern validation error
    #[error("Builder error: {0}")]
    BuilderError(String),

    // ============================================================================
    // Generic/System Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    GenericError(String),
}

// Rendered reports carry the error as plain text
impl From<FolioError> for String {
    fn from(error: FolioError) -> Self {
        error.to_string()
    }
}

impl From<String> for FolioError {
    fn from(err: String) -> Self {
        FolioError::GenericError(err)
    }
}

impl From<&str> for FolioError {
    fn from(err: &str) -> Self {
        FolioError::GenericError(err.to_string())
    }
}

// Helper type alias for Results
pub type FolioResult<T> = Result<T, FolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::InvalidManuscriptId;
        assert_eq!(err.to_string(), "Invalid manuscript ID");
    }

    #[test]
    fn test_stage_error_messages() {
        assert_eq!(FolioError::EmptyContent.to_string(), "Empty manuscript content");
        assert_eq!(FolioError::NoEditorialNotes.to_string(), "No editorial notes found");
        assert_eq!(FolioError::InvalidFormatType.to_string(), "Invalid format type");
        assert_eq!(FolioError::NotApproved.to_string(), "Manuscript not approved");
    }

    #[test]
    fn test_error_conversion_to_string() {
        let err = FolioError::InvalidInput("abc".to_string());
        let s: String = err.into();
        assert_eq!(s, "Invalid input: abc");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let folio_err: FolioError = io_err.into();
        assert!(matches!(folio_err, FolioError::Io(_)));
    }

    #[test]
    fn test_str_conversion() {
        let err: FolioError = "something odd".into();
        assert!(matches!(err, FolioError::GenericError(_)));
        assert_eq!(err.to_string(), "something odd");
    }
}
