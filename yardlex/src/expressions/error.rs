use crate::config::compile_time::reducer::MAX_STACK_DEPTH;
use crate::logging::{codes, Code};

/// Bracket and delimiter faults found while reordering to postfix
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrecedenceError {
    #[error("Either delimiter '{delimiter}' or opening parenthesis missed")]
    MissingOpeningForDelimiter { delimiter: String },

    #[error("Opening parenthesis missed for '{closing}'")]
    MissingOpening { closing: String },

    #[error("Mismatched parentheses: '{opening}' closed by '{closing}'")]
    MismatchedBrackets { opening: String, closing: String },

    #[error("Closing parenthesis missed for '{opening}'")]
    MissingClosing { opening: String },

    #[error("Opening parenthesis missed for '{closing}' left on the stack")]
    UnexpectedClosing { closing: String },

    #[error("Operator stack too deep: {depth} (max {MAX_STACK_DEPTH})")]
    StackOverflow { depth: usize },
}

impl PrecedenceError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::MissingOpeningForDelimiter { .. } => codes::reducer::MISSING_OPENING_FOR_DELIMITER,
            Self::MissingOpening { .. } => codes::reducer::MISSING_OPENING,
            Self::MismatchedBrackets { .. } => codes::reducer::MISMATCHED_BRACKETS,
            Self::MissingClosing { .. } => codes::reducer::MISSING_CLOSING,
            Self::UnexpectedClosing { .. } => codes::reducer::UNEXPECTED_CLOSING,
            Self::StackOverflow { .. } => codes::reducer::STACK_OVERFLOW,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
