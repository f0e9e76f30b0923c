//! Tokenize, classify and reduce in one pass
//!
//! [`postfix`] chains the tokenizer into the shunting-yard reducer without
//! buffering the token stream. Each token is classified through
//! [`Token::to_expression`], so the rules decide kinds and operator
//! priorities.

use crate::config::RuntimeConfig;
use crate::expressions::{ExpressionToken, PrecedenceError, Reducer};
use crate::log_error;
use crate::logging::Code;
use crate::rules::{RuleError, RuleSet};
use crate::source::{self, SourceError};
use crate::tokenizer::{SyntaxError, Tokenizer};
use crate::tokens::Token;
use std::collections::VecDeque;
use std::path::Path;

/// Any failure along the pipeline
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Precedence(#[from] PrecedenceError),
}

impl PipelineError {
    pub fn error_code(&self) -> Code {
        match self {
            PipelineError::Rule(e) => e.error_code(),
            PipelineError::Source(e) => e.error_code(),
            PipelineError::Syntax(e) => e.error_code(),
            PipelineError::Precedence(e) => e.error_code(),
        }
    }

    pub fn as_syntax(&self) -> Option<&SyntaxError> {
        match self {
            PipelineError::Syntax(e) => Some(e),
            _ => None,
        }
    }
}

/// Lazy postfix sequence straight from source lines
pub struct Postfix<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    tokens: Tokenizer<'r, I>,
    reducer: Reducer<ExpressionToken>,
    ready: VecDeque<ExpressionToken>,
    error: Option<PipelineError>,
    done: bool,
}

impl<'r, I> Postfix<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I, rules: &'r RuleSet) -> Self {
        Self::with_config(lines, rules, &RuntimeConfig::default())
    }

    pub fn with_config(lines: I, rules: &'r RuleSet, config: &RuntimeConfig) -> Self {
        Self {
            tokens: Tokenizer::with_preferences(lines, rules, config.tokenizer.clone()),
            reducer: Reducer::with_preferences(config.reducer.clone()),
            ready: VecDeque::new(),
            error: None,
            done: false,
        }
    }

    fn reduction_failed(&mut self, error: PrecedenceError) {
        log_error!(error.error_code(), "Reduction failed", "error" => error);
        self.error = Some(error.into());
        self.done = true;
    }
}

impl<'r, I> Iterator for Postfix<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<ExpressionToken, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.ready.pop_front() {
                return Some(Ok(item));
            }
            if let Some(e) = self.error.take() {
                self.done = true;
                return Some(Err(e));
            }
            if self.done {
                return None;
            }

            match self.tokens.next() {
                Some(Ok(token)) => {
                    if let Err(e) = self.reducer.feed(token.to_expression(), &mut self.ready) {
                        self.reduction_failed(e);
                    }
                }
                Some(Err(e)) => {
                    self.error = Some(e.into());
                    self.done = true;
                }
                None => {
                    self.done = true;
                    if let Err(e) = self.reducer.finish(&mut self.ready) {
                        self.reduction_failed(e);
                    }
                }
            }
        }
    }
}

impl<'r, I> std::iter::FusedIterator for Postfix<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Lazily tokenize and reduce `lines`
pub fn postfix<L>(lines: L, rules: &RuleSet) -> Postfix<'_, L::IntoIter>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    Postfix::new(lines.into_iter(), rules)
}

/// Every token of `lines`, or the first error
pub fn tokenize_all<L>(lines: L, rules: &RuleSet) -> Result<Vec<Token>, PipelineError>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    Ok(crate::tokenizer::parse(lines, rules).collect::<Result<Vec<_>, _>>()?)
}

/// The complete postfix sequence of `lines`, or the first error
pub fn postfix_all<L>(lines: L, rules: &RuleSet) -> Result<Vec<ExpressionToken>, PipelineError>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    postfix(lines, rules).collect()
}

/// Tokenize a file, reading it line by line.
///
/// A read failure wins over whatever the tokenizer made of the truncated
/// input.
pub fn tokenize_file(
    path: &Path,
    rules: &RuleSet,
    config: &RuntimeConfig,
) -> Result<Vec<Token>, PipelineError> {
    let (lines, failure) = source::open_lines(path)?.checked();
    let result = Tokenizer::with_preferences(lines, rules, config.tokenizer.clone())
        .collect::<Result<Vec<_>, _>>();

    if let Some(e) = failure.take() {
        return Err(e.into());
    }
    Ok(result?)
}

/// Tokenize and reduce a file, reading it line by line
pub fn postfix_file(
    path: &Path,
    rules: &RuleSet,
    config: &RuntimeConfig,
) -> Result<Vec<ExpressionToken>, PipelineError> {
    let (lines, failure) = source::open_lines(path)?.checked();
    let result = Postfix::with_config(lines, rules, config).collect::<Result<Vec<_>, _>>();

    if let Some(e) = failure.take() {
        return Err(e.into());
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleMatch, RuleOptions, TokenRule};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn arithmetic() -> RuleSet {
        let rule = |name: &str, pattern: &str, kind: TokenKind, priority: i32| {
            TokenRule::regex(name, pattern, 1, RuleOptions::NONE)
                .unwrap()
                .with_kind(kind)
                .with_expression_priority(priority)
        };
        RuleSet::new()
            .with_rule(rule("number", "[0-9]+", TokenKind::Constant, 0))
            .with_rule(rule("name", "[a-z]+", TokenKind::Variable, 0))
            .with_rule(
                // a name directly followed by '('
                TokenRule::locator(
                    "call",
                    |line: &str, pos: usize, _ctx: &[Token]| {
                        let len = line[pos..].bytes().take_while(u8::is_ascii_lowercase).count();
                        (len > 0 && line[pos + len..].starts_with('('))
                            .then(|| RuleMatch::new(pos, pos + len))
                    },
                    2,
                    RuleOptions::NONE,
                )
                .with_kind(TokenKind::Function),
            )
            .with_rule(rule("additive", r"[-+]", TokenKind::Operator, 1))
            .with_rule(rule("multiplicative", r"[*/]", TokenKind::Operator, 2))
            .with_rule(rule("open", r"\(", TokenKind::BraceOpen, 0))
            .with_rule(rule("close", r"\)", TokenKind::BraceClose, 0))
            .with_rule(rule("comma", ",", TokenKind::Delimiter, 0))
            .with_rule(
                TokenRule::regex_start_stop("comment", r"/\*", r"\*/", 10, RuleOptions::NONE)
                    .unwrap(),
            )
    }

    fn rendered(lines: &[&str], rules: &RuleSet) -> String {
        postfix_all(lines.iter().copied(), rules)
            .unwrap()
            .iter()
            .map(ExpressionToken::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_end_to_end() {
        let rules = arithmetic();
        assert_eq!(rendered(&["a + b * c"], &rules), "a b c * +");
        assert_eq!(rendered(&["(1 + 2)", "* 3"], &rules), "1 2 + 3 *");
        assert_eq!(rendered(&["max(a, b * 2) - 1"], &rules), "a b 2 * max 1 -");
    }

    #[test]
    fn test_comments_are_unclassified_and_dropped() {
        let rules = arithmetic();
        assert_eq!(rendered(&["a /* first", "operand */ - b"], &rules), "a b -");
    }

    #[test]
    fn test_syntax_error_surfaces() {
        let rules = arithmetic();
        let result = postfix_all(["a # b"], &rules);
        assert_matches!(result, Err(PipelineError::Syntax(SyntaxError::UnexpectedInput { column: 2, .. })));
    }

    #[test]
    fn test_precedence_error_surfaces_after_ready_items() {
        let rules = arithmetic();
        let items: Vec<_> = postfix(["a + b )"], &rules).collect();
        assert_eq!(items.len(), 4);
        assert_matches!(items.last(), Some(Err(PipelineError::Precedence(_))));
    }

    #[test]
    fn test_tokenize_all() {
        let rules = arithmetic();
        let tokens = tokenize_all(["max(1, 2)"], &rules).unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Function,
                TokenKind::BraceOpen,
                TokenKind::Constant,
                TokenKind::Delimiter,
                TokenKind::Constant,
                TokenKind::BraceClose
            ]
        );
    }

    #[test]
    fn test_error_codes_pass_through() {
        let error: PipelineError = PrecedenceError::MissingClosing {
            opening: "(".into(),
        }
        .into();
        assert_eq!(error.error_code(), crate::logging::codes::reducer::MISSING_CLOSING);
        assert!(error.as_syntax().is_none());
    }
}
