//! Logical plan error types
//!
//! Error codes:
//! - SDB_FIELD_NOT_DEFINED (REJECT)

use std::fmt;

/// Severity levels for logical plan errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query or plan rejected, never retried
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Logical plan error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalErrorCode {
    /// A schema view was asked for a field it does not know
    FieldNotDefined,
}

impl LogicalErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            LogicalErrorCode::FieldNotDefined => "SDB_FIELD_NOT_DEFINED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for LogicalErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Logical plan error with context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalError {
    /// Error code
    code: LogicalErrorCode,
    /// Human-readable message
    message: String,
    /// The offending name
    context: String,
}

impl LogicalError {
    /// Create a field not defined error
    pub fn field_not_defined(field: impl Into<String>) -> Self {
        let f = field.into();
        Self {
            code: LogicalErrorCode::FieldNotDefined,
            message: format!("field is not defined: {}", f),
            context: f,
        }
    }

    /// Returns the error code
    pub fn code(&self) -> LogicalErrorCode {
        self.code
    }

    /// Returns the severity level
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the context string (the unresolved field name)
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Logical errors indicate a schema/query mismatch
    pub fn is_retryable(&self) -> bool {
        false
    }
}

impl fmt::Display for LogicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.severity(), self.code.code(), self.message)
    }
}

impl std::error::Error for LogicalError {}

/// Result type for logical plan operations
pub type LogicalResult<T> = Result<T, LogicalError>;
