use serde::{Deserialize, Serialize};
use std::fmt;

/// Token categories understood by the shunting-yard reducer.
///
/// The set is closed: rules classify what they recognize into one of these,
/// and the reducer dispatches on them exhaustively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Unclassified; ignored by the reducer
    #[default]
    None,
    /// Never emitted by the tokenizer, ignored by the reducer
    WhiteSpace,
    /// Argument separator inside a function call
    Delimiter,
    BraceOpen,
    BraceClose,
    Constant,
    Variable,
    Operator,
    Function,
}

impl TokenKind {
    pub const ALL: [TokenKind; 9] = [
        TokenKind::None,
        TokenKind::WhiteSpace,
        TokenKind::Delimiter,
        TokenKind::BraceOpen,
        TokenKind::BraceClose,
        TokenKind::Constant,
        TokenKind::Variable,
        TokenKind::Operator,
        TokenKind::Function,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::None => "none",
            TokenKind::WhiteSpace => "white_space",
            TokenKind::Delimiter => "delimiter",
            TokenKind::BraceOpen => "brace_open",
            TokenKind::BraceClose => "brace_close",
            TokenKind::Constant => "constant",
            TokenKind::Variable => "variable",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
        }
    }

    /// Operands go straight to the output in postfix order
    pub fn is_operand(&self) -> bool {
        matches!(self, TokenKind::Constant | TokenKind::Variable)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
