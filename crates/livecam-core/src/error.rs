//! Error types module
//!
//! This module provides the core error types used throughout livecam.
//! All request-level failures are unified under the `AppError` enum, which
//! self-describes how it should be logged and presented over HTTP through the
//! `ErrorMetadata` trait.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for conditions an operator may want to look at
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORE_UNAVAILABLE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No camera specified (front, back, left, right)")]
    MissingCameraParameter,

    #[error("Object store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("No files found under {prefix}")]
    NoClipsFound { prefix: String },

    #[error("Failed to sign URL for {key}: {message}")]
    SigningFailed { key: String, message: String },

    #[error("Object key does not carry a clip timestamp: {0}")]
    MalformedKey(String),

    /// Invariant broken inside the service, e.g. a listing window that cannot be computed.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, sensitive, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::MissingCameraParameter => (400, "MISSING_CAMERA", false, LogLevel::Debug),
        AppError::StoreUnavailable(_) => (500, "STORE_UNAVAILABLE", false, LogLevel::Error),
        AppError::NoClipsFound { .. } => (500, "NO_CLIPS_FOUND", false, LogLevel::Warn),
        AppError::SigningFailed { .. } => (500, "SIGNING_FAILED", false, LogLevel::Error),
        AppError::MalformedKey(_) => (500, "MALFORMED_KEY", false, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingCameraParameter => "MissingCameraParameter",
            AppError::StoreUnavailable(_) => "StoreUnavailable",
            AppError::NoClipsFound { .. } => "NoClipsFound",
            AppError::SigningFailed { .. } => "SigningFailed",
            AppError::MalformedKey(_) => "MalformedKey",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::StoreUnavailable(_) => "Failed to list clips from storage".to_string(),
            AppError::NoClipsFound { .. } => "No files found".to_string(),
            AppError::SigningFailed { .. } => "Failed to sign clip URL".to_string(),
            AppError::MalformedKey(_) => "Storage listing contained an unexpected key".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_missing_camera() {
        let err = AppError::MissingCameraParameter;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_CAMERA");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(
            err.client_message(),
            "No camera specified (front, back, left, right)"
        );
    }

    #[test]
    fn test_error_metadata_server_errors() {
        let errors = [
            AppError::StoreUnavailable("connection reset".to_string()),
            AppError::NoClipsFound {
                prefix: "cams/streams/2024-01-01".to_string(),
            },
            AppError::SigningFailed {
                key: "a.mp4".to_string(),
                message: "no credentials".to_string(),
            },
            AppError::MalformedKey("cams/streams/junk.mp4".to_string()),
        ];
        for err in errors {
            assert_eq!(err.http_status_code(), 500, "{}", err.error_type());
        }
    }

    #[test]
    fn test_client_messages_hide_details() {
        let err = AppError::StoreUnavailable("secret endpoint 10.0.0.1 refused".to_string());
        assert!(!err.client_message().contains("10.0.0.1"));
        assert!(err.to_string().contains("10.0.0.1"));

        let err = AppError::SigningFailed {
            key: "cams/streams/2024-01-01/x.mp4".to_string(),
            message: "missing secret key".to_string(),
        };
        assert!(!err.client_message().contains("secret"));

        let err = AppError::Internal("lookback out of range".to_string());
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_no_clips_found_message() {
        let err = AppError::NoClipsFound {
            prefix: "cams/streams/2024-01-01".to_string(),
        };
        assert_eq!(err.client_message(), "No files found");
        assert!(err.to_string().contains("cams/streams/2024-01-01"));
    }
}
