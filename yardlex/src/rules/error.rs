//! Rule construction errors. These surface when a rule or catalog is built,
//! never while input is being tokenized.

use crate::logging::{codes, Code};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    #[error("{which} pattern must not be empty")]
    EmptyPattern { which: &'static str },

    #[error("Invalid {which} pattern '{pattern}': {message}")]
    InvalidPattern {
        which: &'static str,
        pattern: String,
        message: String,
    },

    #[error("Rule '{rule}' must define either an entire pattern or both start and stop")]
    MissingLocator { rule: String },

    #[error("Invalid rule catalog: {message}")]
    InvalidCatalog { message: String },
}

impl RuleError {
    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            Self::EmptyPattern { .. } => codes::rules::EMPTY_PATTERN,
            Self::InvalidPattern { .. } => codes::rules::INVALID_PATTERN,
            Self::MissingLocator { .. } => codes::rules::MISSING_LOCATOR,
            Self::InvalidCatalog { .. } => codes::rules::INVALID_CATALOG,
        }
    }
}
