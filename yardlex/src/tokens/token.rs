use crate::expressions::ExpressionToken;
use crate::rules::TokenRule;
use crate::tokens::TokenKind;
use crate::utils::{Position, Span};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::sync::Arc;

/// A classified span of source text.
///
/// `text` is exactly what was matched. For tokens that cross lines the
/// source line breaks are kept as `\n`.
#[derive(Debug, Clone)]
pub struct Token {
    rule: Arc<TokenRule>,
    span: Span,
    text: String,
}

impl Token {
    pub(crate) fn new(rule: Arc<TokenRule>, span: Span, text: String) -> Self {
        Self { rule, span, text }
    }

    /// The rule that recognized this token
    pub fn rule(&self) -> &TokenRule {
        &self.rule
    }

    pub fn kind(&self) -> TokenKind {
        self.rule.kind()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start(&self) -> Position {
        self.span.start
    }

    pub fn stop(&self) -> Position {
        self.span.end
    }

    pub fn start_line(&self) -> usize {
        self.span.start.line
    }

    pub fn start_column(&self) -> usize {
        self.span.start.column
    }

    pub fn stop_line(&self) -> usize {
        self.span.end.line
    }

    pub fn stop_column(&self) -> usize {
        self.span.end.column
    }

    pub fn is_multiline(&self) -> bool {
        self.span.is_multiline()
    }

    /// Classify for the reducer using the rule's kind and operator priority
    pub fn to_expression(&self) -> ExpressionToken {
        ExpressionToken::new(
            self.text.clone(),
            self.rule.expression_priority(),
            self.rule.kind(),
        )
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.rule, &other.rule) || self.rule.name() == other.rule.name())
            && self.span == other.span
            && self.text == other.text
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} @ {}", self.rule.name(), self.text, self.span)
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 5)?;
        state.serialize_field("rule", self.rule.name())?;
        state.serialize_field("kind", &self.rule.kind())?;
        state.serialize_field("start", &self.span.start)?;
        state.serialize_field("stop", &self.span.end)?;
        state.serialize_field("text", &self.text)?;
        state.end()
    }
}
