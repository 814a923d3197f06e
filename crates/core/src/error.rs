//! Unified error types for sheetcsv.
//!
//! Parsing never fails; every variant here belongs to the boundary around it
//! (source ids, downloads, local copies, tab listings).

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the sheetcsv service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., malformed spreadsheet id).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Download did not complete in time.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Network failure or non-success HTTP status.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Upstream answered with something that is not CSV (redirect or login page).
    #[error("FORMAT_MISMATCH: {0}")]
    FormatMismatch(String),

    /// Upstream answered with an empty or implausibly short body.
    #[error("EMPTY_PAYLOAD: {0}")]
    EmptyPayload(String),

    /// Reading or writing the local copy failed.
    #[error("STORAGE_ERROR: {0}")]
    Storage(String),

    /// A required file does not exist.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether this error came from the download step.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::FetchTimeout(_) | Error::HttpError(_) | Error::FormatMismatch(_) | Error::EmptyPayload(_)
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::FetchTimeout(msg) => (-32001, msg.clone()),
            Error::HttpError(msg) => (-32002, msg.clone()),
            Error::FormatMismatch(msg) => (-32003, msg.clone()),
            Error::EmptyPayload(msg) => (-32004, msg.clone()),
            Error::Storage(msg) => (-32005, msg.clone()),
            Error::NotFound(msg) => (-32006, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::FormatMismatch("received HTML".to_string());
        assert!(err.to_string().contains("FORMAT_MISMATCH"));
        assert!(err.to_string().contains("received HTML"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::EmptyPayload("3 characters".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32004);

        let err = Error::InvalidInput("bad id".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }

    #[test]
    fn test_fetch_failure_kinds() {
        assert!(Error::FetchTimeout("15s".into()).is_fetch_failure());
        assert!(Error::HttpError("status 404".into()).is_fetch_failure());
        assert!(Error::FormatMismatch("html".into()).is_fetch_failure());
        assert!(Error::EmptyPayload("".into()).is_fetch_failure());
        assert!(!Error::Storage("disk full".into()).is_fetch_failure());
        assert!(!Error::InvalidInput("id".into()).is_fetch_failure());
    }

    #[test]
    fn test_io_error_maps_to_storage() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = io.into();
        assert!(matches!(err, Error::Storage(msg) if msg.contains("denied")));
    }
}
