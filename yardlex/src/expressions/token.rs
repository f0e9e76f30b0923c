use crate::tokens::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the reducer needs to know about an item
pub trait Reducible {
    fn name(&self) -> &str;

    /// Binding strength; only consulted for operators
    fn priority(&self) -> i32;

    fn kind(&self) -> TokenKind;
}

/// Immutable value handed to the shunting-yard reducer.
///
/// Equality is structural over name, priority and kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpressionToken {
    name: String,
    priority: i32,
    kind: TokenKind,
}

impl ExpressionToken {
    pub fn new(name: impl Into<String>, priority: i32, kind: TokenKind) -> Self {
        Self {
            name: name.into(),
            priority,
            kind,
        }
    }

    pub fn constant(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::Constant)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::Variable)
    }

    pub fn operator(name: impl Into<String>, priority: i32) -> Self {
        Self::new(name, priority, TokenKind::Operator)
    }

    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::Function)
    }

    pub fn brace_open(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::BraceOpen)
    }

    pub fn brace_close(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::BraceClose)
    }

    pub fn delimiter(name: impl Into<String>) -> Self {
        Self::new(name, 0, TokenKind::Delimiter)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl fmt::Display for ExpressionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Reducible for ExpressionToken {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn kind(&self) -> TokenKind {
        self.kind
    }
}

/// Source tokens reduce directly, classified by their rule
impl Reducible for Token {
    fn name(&self) -> &str {
        self.text()
    }

    fn priority(&self) -> i32 {
        self.rule().expression_priority()
    }

    fn kind(&self) -> TokenKind {
        Token::kind(self)
    }
}

impl<T: Reducible + ?Sized> Reducible for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn kind(&self) -> TokenKind {
        (**self).kind()
    }
}
