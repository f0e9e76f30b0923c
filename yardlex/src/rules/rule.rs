use crate::rules::matcher::{compile_anchored, compile_pattern, LocatorMatcher, Matcher, RegexMatcher};
use crate::rules::{RuleError, RuleMatch, RuleOptions};
use crate::tokens::{Token, TokenKind};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// How a rule recognizes its lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMode {
    /// One probe recognizes the whole lexeme on one line
    Entire,
    /// A start probe opens the lexeme, a stop probe closes it
    StartStop,
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleMode::Entire => write!(f, "entire"),
            RuleMode::StartStop => write!(f, "start/stop"),
        }
    }
}

/// A rule recognizing one kind of lexeme.
///
/// The mode is fixed at construction. Regex-backed rules compile their
/// patterns eagerly, so a rule that exists is a rule that can match.
/// All probes work in byte offsets into the line.
pub struct TokenRule {
    name: String,
    priority: i32,
    options: RuleOptions,
    kind: TokenKind,
    expression_priority: i32,
    matcher: Matcher,
}

impl TokenRule {
    fn build(name: String, priority: i32, options: RuleOptions, matcher: Matcher) -> Self {
        Self {
            name,
            priority,
            options,
            kind: TokenKind::None,
            expression_priority: 0,
            matcher,
        }
    }

    /// Entire-match rule backed by one regular expression
    pub fn regex(
        name: impl Into<String>,
        pattern: &str,
        priority: i32,
        options: RuleOptions,
    ) -> Result<Self, RuleError> {
        let regex = compile_anchored("entire", pattern, options)?;
        Ok(Self::build(
            name.into(),
            priority,
            options,
            Matcher::Regex(RegexMatcher::Entire(regex)),
        ))
    }

    /// Start/stop rule backed by two regular expressions
    pub fn regex_start_stop(
        name: impl Into<String>,
        start: &str,
        stop: &str,
        priority: i32,
        options: RuleOptions,
    ) -> Result<Self, RuleError> {
        let start = compile_anchored("start", start, options)?;
        let stop = compile_pattern("stop", stop, options)?;
        Ok(Self::build(
            name.into(),
            priority,
            options,
            Matcher::Regex(RegexMatcher::StartStop { start, stop }),
        ))
    }

    /// Entire-match rule backed by a closure.
    ///
    /// The closure gets `(line, position, context)` and reports the range it
    /// recognized. `IGNORE_CASE` is recorded but the closure decides for
    /// itself how to compare.
    pub fn locator<F>(name: impl Into<String>, entire: F, priority: i32, options: RuleOptions) -> Self
    where
        F: Fn(&str, usize, &[Token]) -> Option<RuleMatch> + Send + Sync + 'static,
    {
        Self::build(
            name.into(),
            priority,
            options,
            Matcher::Locator(LocatorMatcher::Entire(Arc::new(entire))),
        )
    }

    /// Start/stop rule backed by closures
    pub fn locator_start_stop<S, E>(
        name: impl Into<String>,
        start: S,
        stop: E,
        priority: i32,
        options: RuleOptions,
    ) -> Self
    where
        S: Fn(&str, usize, &[Token]) -> Option<RuleMatch> + Send + Sync + 'static,
        E: Fn(&str, usize, &str, &[Token]) -> Option<RuleMatch> + Send + Sync + 'static,
    {
        Self::build(
            name.into(),
            priority,
            options,
            Matcher::Locator(LocatorMatcher::StartStop {
                start: Arc::new(start),
                stop: Arc::new(stop),
            }),
        )
    }

    /// Classify the tokens this rule produces
    pub fn with_kind(mut self, kind: TokenKind) -> Self {
        self.kind = kind;
        self
    }

    /// Operator priority handed to the reducer
    pub fn with_expression_priority(mut self, priority: i32) -> Self {
        self.expression_priority = priority;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn options(&self) -> RuleOptions {
        self.options
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn expression_priority(&self) -> i32 {
        self.expression_priority
    }

    pub fn mode(&self) -> RuleMode {
        if self.matcher.is_start_stop() {
            RuleMode::StartStop
        } else {
            RuleMode::Entire
        }
    }

    pub fn is_start_stop_mode(&self) -> bool {
        self.matcher.is_start_stop()
    }

    /// Whole lexeme anchored at `position`.
    ///
    /// Matches that start later in the line, or that consume nothing, are
    /// reported as no match. Always `None` for start/stop rules.
    pub fn match_entire(&self, line: &str, position: usize, context: &[Token]) -> Option<RuleMatch> {
        self.matcher
            .entire(line, position, context)
            .filter(|m| anchored(m, line, position))
    }

    /// Opening delimiter anchored at `position`. Always `None` for
    /// entire-match rules.
    pub fn match_start(&self, line: &str, position: usize, context: &[Token]) -> Option<RuleMatch> {
        self.matcher
            .start(line, position, context)
            .filter(|m| anchored(m, line, position))
    }

    /// Closing delimiter anywhere at or after `search_from`.
    ///
    /// `prefix` is the text of the start match. A zero-length stop is
    /// accepted so that patterns such as `$` can close a lexeme.
    pub fn match_stop(
        &self,
        line: &str,
        search_from: usize,
        prefix: &str,
        context: &[Token],
    ) -> Option<RuleMatch> {
        self.matcher
            .stop(line, search_from, prefix, context)
            .filter(|m| m.start >= search_from && m.fits(line))
    }
}

fn anchored(m: &RuleMatch, line: &str, position: usize) -> bool {
    m.start == position && !m.is_empty() && m.fits(line)
}

impl fmt::Debug for TokenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRule")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("options", &self.options)
            .field("kind", &self.kind)
            .field("expression_priority", &self.expression_priority)
            .field("matcher", &self.matcher.describe())
            .finish()
    }
}

impl fmt::Display for TokenRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, priority {}) {}",
            self.name,
            self.mode(),
            self.priority,
            self.matcher.describe()
        )
    }
}
