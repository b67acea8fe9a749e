use thiserror::Error;

use crate::search::OperatorCode;

/// Top-level error type returned by scimfilter parsers and builders.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Input could not be interpreted as a filter expression.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Operator token is not one of the supported machine codes.
    #[error("unsupported filter operator: {operator}")]
    UnknownOperator { operator: String },

    /// Validation failed for one or more form fields.
    #[error("validation failed")]
    Validation(#[from] ValidationError),

    /// An alias phrase was registered for two different operators.
    #[error("alias '{phrase}' already maps to '{existing}', cannot map it to '{requested}'")]
    AliasConflict {
        phrase: String,
        existing: OperatorCode,
        requested: OperatorCode,
    },

    /// Configuration file could not be parsed or holds invalid values.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Underlying I/O failure while reading configuration.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl FilterError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }
}

/// Collection of validation issues encountered while preparing a filter.
#[derive(Debug, Error)]
#[error("validation errors: {issues:?}")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Detailed validation failure for a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type FilterResult<T> = Result<T, FilterError>;
