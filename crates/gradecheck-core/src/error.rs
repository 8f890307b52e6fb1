//! Error types and exit codes for gradecheck
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (I/O, serialization, chat endpoint)
//! - 2: Usage error (bad flags/args, invalid values)
//! - 3: Data error (missing submissions, missing checklist, invalid config)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data error - missing inputs, invalid configuration (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during gradecheck operations
#[derive(Error, Debug)]
pub enum GradeError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human or json)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    #[error("unsupported {context}: {value} (supported: {supported})")]
    Unsupported {
        context: String,
        value: String,
        supported: String,
    },

    // Data errors (exit code 3)
    #[error("submissions directory not found: {path:?}")]
    SubmissionsNotFound { path: PathBuf },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing API token: set the {env_var} environment variable")]
    MissingToken { env_var: String },

    #[error("chat endpoint returned HTTP {status}: {body}")]
    EndpointStatus { status: u16, body: String },

    #[error("chat endpoint unreachable: {0}")]
    EndpointTransport(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("failed to {operation} {target}: {reason}")]
    FailedOperationWithTarget {
        operation: String,
        target: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl GradeError {
    /// Create an error for a failed IO operation with context
    pub fn io_operation(
        operation: &str,
        path: impl std::fmt::Display,
        error: impl std::fmt::Display,
    ) -> Self {
        GradeError::FailedOperationWithTarget {
            operation: operation.to_string(),
            target: path.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GradeError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        GradeError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        GradeError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an unsupported value
    pub fn unsupported(
        context: &str,
        value: impl std::fmt::Display,
        supported: impl std::fmt::Display,
    ) -> Self {
        GradeError::Unsupported {
            context: context.to_string(),
            value: value.to_string(),
            supported: supported.to_string(),
        }
    }

    /// Whether a chat-endpoint failure is worth retrying
    pub fn is_transient(&self) -> bool {
        match self {
            GradeError::EndpointTransport(_) => true,
            GradeError::EndpointStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GradeError::UnknownFormat(_)
            | GradeError::UsageError(_)
            | GradeError::InvalidValue { .. }
            | GradeError::Unsupported { .. } => ExitCode::Usage,

            GradeError::SubmissionsNotFound { .. }
            | GradeError::InvalidConfig { .. }
            | GradeError::NotFound { .. }
            | GradeError::AlreadyExists { .. } => ExitCode::Data,

            GradeError::Io(_)
            | GradeError::Json(_)
            | GradeError::MissingToken { .. }
            | GradeError::EndpointStatus { .. }
            | GradeError::EndpointTransport(_)
            | GradeError::FailedOperation { .. }
            | GradeError::FailedOperationWithTarget { .. }
            | GradeError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            GradeError::UnknownFormat(_) => "unknown_format",
            GradeError::UsageError(_) => "usage_error",
            GradeError::InvalidValue { .. } => "invalid_value",
            GradeError::Unsupported { .. } => "unsupported",
            GradeError::SubmissionsNotFound { .. } => "submissions_not_found",
            GradeError::InvalidConfig { .. } => "invalid_config",
            GradeError::NotFound { .. } => "not_found",
            GradeError::AlreadyExists { .. } => "already_exists",
            GradeError::Io(_) => "io_error",
            GradeError::Json(_) => "json_error",
            GradeError::MissingToken { .. } => "missing_token",
            GradeError::EndpointStatus { .. } => "endpoint_status",
            GradeError::EndpointTransport(_) => "endpoint_transport",
            GradeError::FailedOperation { .. } => "failed_operation",
            GradeError::FailedOperationWithTarget { .. } => "failed_operation_with_target",
            GradeError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for gradecheck operations
pub type Result<T> = std::result::Result<T, GradeError>;
