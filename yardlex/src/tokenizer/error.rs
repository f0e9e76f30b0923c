use crate::config::compile_time::tokenizer::{
    MAX_LINE_LENGTH, MAX_MULTILINE_TOKEN_SIZE, MAX_TOKEN_COUNT,
};
use crate::logging::{codes, Code};
use crate::utils::Position;

/// Tokenization failures. Coordinates are 0-based; the rendered message
/// uses 1-based, zero-padded coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Syntax error at {:05} : {:03}", .line + 1, .column + 1)]
    UnexpectedInput {
        line: usize,
        column: usize,
        character: char,
    },

    #[error("Dangling token at {:05} : {:03}", .line + 1, .column + 1)]
    DanglingToken {
        line: usize,
        column: usize,
        rule: String,
    },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },

    #[error("Line {:05} too long: {length} bytes (max {MAX_LINE_LENGTH})", .line + 1)]
    LineTooLong { line: usize, length: usize },

    #[error(
        "Token at {:05} : {:03} too large: {size} bytes (max {MAX_MULTILINE_TOKEN_SIZE})",
        .line + 1,
        .column + 1
    )]
    TokenTooLarge {
        line: usize,
        column: usize,
        size: usize,
    },
}

impl SyntaxError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnexpectedInput { .. } => codes::tokenizer::UNEXPECTED_INPUT,
            Self::DanglingToken { .. } => codes::tokenizer::DANGLING_TOKEN,
            Self::TooManyTokens { .. } => codes::tokenizer::TOO_MANY_TOKENS,
            Self::LineTooLong { .. } => codes::tokenizer::LINE_TOO_LONG,
            Self::TokenTooLarge { .. } => codes::tokenizer::TOKEN_TOO_LARGE,
        }
    }

    /// 0-based line, when the error points into the input
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedInput { line, .. }
            | Self::DanglingToken { line, .. }
            | Self::LineTooLong { line, .. }
            | Self::TokenTooLarge { line, .. } => Some(*line),
            Self::TooManyTokens { .. } => None,
        }
    }

    /// 0-based byte column, when the error points at a character
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::UnexpectedInput { column, .. }
            | Self::DanglingToken { column, .. }
            | Self::TokenTooLarge { column, .. } => Some(*column),
            Self::LineTooLong { .. } | Self::TooManyTokens { .. } => None,
        }
    }

    pub fn position(&self) -> Option<Position> {
        Some(Position::new(self.line()?, self.column()?))
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
