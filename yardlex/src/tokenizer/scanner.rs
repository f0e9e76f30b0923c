//! Line-driven tokenizer
//!
//! Pulls lines on demand, asks the rule set for the best match at each
//! non-whitespace column and carries start/stop lexemes across line
//! boundaries. Whitespace separates tokens and is never emitted.

use crate::config::compile_time::tokenizer::{
    MAX_LINE_LENGTH, MAX_MULTILINE_TOKEN_SIZE, MAX_TOKEN_COUNT,
};
use crate::config::runtime::TokenizerPreferences;
use crate::logging::codes;
use crate::rules::{MatchKind, RuleSet, TokenRule};
use crate::tokenizer::SyntaxError;
use crate::tokens::Token;
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_success};
use std::sync::Arc;

/// Counters gathered while tokenizing
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenizerMetrics {
    pub lines: usize,
    pub tokens: usize,
    pub multiline_tokens: usize,
    pub longest_token: usize,
}

impl TokenizerMetrics {
    fn record(&mut self, token: &Token) {
        self.tokens += 1;
        if token.is_multiline() {
            self.multiline_tokens += 1;
        }
        self.longest_token = self.longest_token.max(token.text().len());
    }
}

/// A start/stop lexeme whose stop has not been seen yet
#[derive(Debug)]
struct PendingToken {
    rule: Arc<TokenRule>,
    start: Position,
    /// Text of the start match, handed to every stop probe
    prefix: String,
    /// Everything consumed so far, lines joined with `\n`
    text: String,
}

/// The line being scanned and the next column to look at
struct CurrentLine<S> {
    index: usize,
    text: S,
    column: usize,
}

enum Step {
    Token(Token),
    LineDone,
}

/// Lazy tokenizer over a sequence of lines.
///
/// Yields `Ok(Token)` in source order. The first error is yielded once and
/// the iterator is exhausted afterwards. The sequence is not restartable.
pub struct Tokenizer<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    lines: I,
    rules: &'r RuleSet,
    preferences: TokenizerPreferences,
    current: Option<CurrentLine<I::Item>>,
    next_index: usize,
    pending: Option<PendingToken>,
    context: Vec<Token>,
    metrics: TokenizerMetrics,
    finished: bool,
}

impl<'r, I> Tokenizer<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    pub fn new(lines: I, rules: &'r RuleSet) -> Self {
        Self::with_preferences(lines, rules, TokenizerPreferences::default())
    }

    pub fn with_preferences(
        lines: I,
        rules: &'r RuleSet,
        preferences: TokenizerPreferences,
    ) -> Self {
        Self {
            lines,
            rules,
            preferences,
            current: None,
            next_index: 0,
            pending: None,
            context: Vec::new(),
            metrics: TokenizerMetrics::default(),
            finished: false,
        }
    }

    pub fn metrics(&self) -> &TokenizerMetrics {
        &self.metrics
    }

    /// Tokens recognized so far, as seen by rule probes
    pub fn context(&self) -> &[Token] {
        &self.context
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn fail(&mut self, error: SyntaxError) -> Option<Result<Token, SyntaxError>> {
        self.finished = true;
        self.pending = None;
        self.current = None;

        match error.position() {
            Some(position) => log_error!(error.error_code(), "Tokenization failed",
                span = Span::single(position),
                "error" => error
            ),
            None => log_error!(error.error_code(), "Tokenization failed",
                "error" => error
            ),
        }

        Some(Err(error))
    }

    fn finish(&mut self) -> Option<Result<Token, SyntaxError>> {
        if let Some(pending) = self.pending.take() {
            return self.fail(SyntaxError::DanglingToken {
                line: pending.start.line,
                column: pending.start.column,
                rule: pending.rule.name().to_string(),
            });
        }

        self.finished = true;
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization complete",
            "lines" => self.metrics.lines,
            "tokens" => self.metrics.tokens,
            "multiline" => self.metrics.multiline_tokens
        );
        None
    }

    fn emit(&mut self, token: Token) -> Result<Token, SyntaxError> {
        if self.preferences.enforce_limits && self.metrics.tokens >= MAX_TOKEN_COUNT {
            return Err(SyntaxError::TooManyTokens {
                count: self.metrics.tokens + 1,
            });
        }

        self.metrics.record(&token);
        if self.preferences.log_token_events {
            log_debug!("Token recognized",
                "rule" => token.rule().name(),
                "at" => token.span(),
                "text" => format!("{:?}", token.text())
            );
        }
        if self.preferences.track_context {
            self.context.push(token.clone());
        }
        Ok(token)
    }

    /// Advance through `line` from `column` until one token is complete or
    /// the line is used up.
    fn scan(&mut self, index: usize, line: &str, column: &mut usize) -> Result<Step, SyntaxError> {
        if let Some(mut pending) = self.pending.take() {
            // A pending lexeme only survives to the start of a later line
            match pending
                .rule
                .match_stop(line, 0, &pending.prefix, &self.context)
            {
                Some(stop) => {
                    pending.text.push('\n');
                    pending.text.push_str(&line[..stop.end]);
                    *column = stop.end;

                    let span = Span::new(pending.start, Position::new(index, stop.end));
                    let token = Token::new(pending.rule, span, pending.text);
                    return self.emit(token).map(Step::Token);
                }
                None => {
                    pending.text.push('\n');
                    pending.text.push_str(line);
                    self.check_pending_size(&pending)?;
                    self.pending = Some(pending);
                    return Ok(Step::LineDone);
                }
            }
        }

        while *column < line.len() {
            let Some(ch) = line[*column..].chars().next() else {
                break;
            };

            if ch.is_whitespace() {
                *column += ch.len_utf8();
                continue;
            }

            let Some(found) = self.rules.best_match(line, *column, &self.context) else {
                return Err(SyntaxError::UnexpectedInput {
                    line: index,
                    column: *column,
                    character: ch,
                });
            };

            match found.kind {
                MatchKind::Entire => {
                    *column = found.end();
                    let span = Span::on_line(index, found.start(), found.end());
                    let text = found.extract(line).to_string();
                    let token = Token::new(found.rule, span, text);
                    return self.emit(token).map(Step::Token);
                }
                MatchKind::Start => {
                    let prefix = found.extract(line);
                    if let Some(stop) =
                        found
                            .rule
                            .match_stop(line, found.end(), prefix, &self.context)
                    {
                        *column = stop.end;
                        let span = Span::on_line(index, found.start(), stop.end);
                        let text = line[found.start()..stop.end].to_string();
                        let token = Token::new(found.rule, span, text);
                        return self.emit(token).map(Step::Token);
                    }

                    let pending = PendingToken {
                        start: Position::new(index, found.start()),
                        prefix: prefix.to_string(),
                        text: line[found.start()..].to_string(),
                        rule: found.rule,
                    };
                    self.check_pending_size(&pending)?;
                    self.pending = Some(pending);
                    *column = line.len();
                    return Ok(Step::LineDone);
                }
            }
        }

        Ok(Step::LineDone)
    }

    fn check_pending_size(&self, pending: &PendingToken) -> Result<(), SyntaxError> {
        if self.preferences.enforce_limits && pending.text.len() > MAX_MULTILINE_TOKEN_SIZE {
            return Err(SyntaxError::TokenTooLarge {
                line: pending.start.line,
                column: pending.start.column,
                size: pending.text.len(),
            });
        }
        Ok(())
    }

    fn next_line(&mut self) -> Result<Option<CurrentLine<I::Item>>, SyntaxError> {
        let Some(text) = self.lines.next() else {
            return Ok(None);
        };

        let index = self.next_index;
        self.next_index += 1;
        self.metrics.lines += 1;

        let length = text.as_ref().len();
        if self.preferences.enforce_limits && length > MAX_LINE_LENGTH {
            return Err(SyntaxError::LineTooLong {
                line: index,
                length,
            });
        }

        Ok(Some(CurrentLine {
            index,
            text,
            column: 0,
        }))
    }
}

impl<'r, I> Iterator for Tokenizer<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<Token, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.finished {
                return None;
            }

            let mut current = match self.current.take() {
                Some(current) => current,
                None => match self.next_line() {
                    Ok(Some(line)) => line,
                    Ok(None) => return self.finish(),
                    Err(e) => return self.fail(e),
                },
            };

            let mut column = current.column;
            match self.scan(current.index, current.text.as_ref(), &mut column) {
                Ok(Step::Token(token)) => {
                    current.column = column;
                    self.current = Some(current);
                    return Some(Ok(token));
                }
                Ok(Step::LineDone) => continue,
                Err(e) => return self.fail(e),
            }
        }
    }
}

impl<'r, I> std::iter::FusedIterator for Tokenizer<'r, I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Tokenize `lines` with `rules`, lazily
pub fn parse<L>(lines: L, rules: &RuleSet) -> Tokenizer<'_, L::IntoIter>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    Tokenizer::new(lines.into_iter(), rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{RuleMatch, RuleOptions};
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn rules() -> RuleSet {
        RuleSet::new()
            .with_rule(
                TokenRule::regex("word", "[A-Za-z_][A-Za-z0-9_]*", 1, RuleOptions::NONE).unwrap(),
            )
            .with_rule(TokenRule::regex("number", "[0-9]+", 1, RuleOptions::NONE).unwrap())
            .with_rule(TokenRule::regex("op", r"[-+*/]", 1, RuleOptions::NONE).unwrap())
            .with_rule(
                TokenRule::regex_start_stop("comment", r"/\*", r"\*/", 10, RuleOptions::NONE)
                    .unwrap(),
            )
    }

    fn texts(lines: &[&str], rules: &RuleSet) -> Vec<String> {
        parse(lines.iter().copied(), rules)
            .map(|t| t.unwrap().text().to_string())
            .collect()
    }

    #[test]
    fn test_multiline_round_trip() {
        let rules = rules();
        let tokens: Vec<Token> = parse(["a /* one", "two", "three */ b"], &rules)
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text(), "a");
        assert_eq!(tokens[0].span(), Span::on_line(0, 0, 1));

        let comment = &tokens[1];
        assert_eq!(comment.rule().name(), "comment");
        assert_eq!(comment.text(), "/* one\ntwo\nthree */");
        assert_eq!((comment.start_line(), comment.start_column()), (0, 2));
        assert_eq!((comment.stop_line(), comment.stop_column()), (2, 8));

        assert_eq!(tokens[2].text(), "b");
        assert_eq!(tokens[2].span(), Span::on_line(2, 9, 10));
    }

    #[test]
    fn test_stop_on_opening_line() {
        let rules = rules();
        assert_eq!(texts(&["x /* inline */ y"], &rules), ["x", "/* inline */", "y"]);
    }

    #[test]
    fn test_empty_lines_inside_multiline_token() {
        let rules = rules();
        assert_eq!(texts(&["/* a", "", "*/"], &rules), ["/* a\n\n*/"]);
    }

    #[test]
    fn test_dangling_token_points_at_start() {
        let rules = rules();
        let results: Vec<_> = parse(["a", "  /* never closed", "still open"], &rules).collect();
        assert_eq!(results.len(), 2);
        assert_matches!(
            &results[1],
            Err(SyntaxError::DanglingToken { line: 1, column: 2, rule }) if rule == "comment"
        );
    }

    #[test]
    fn test_unknown_character_position() {
        let rules = rules();
        let mut tokens = parse(["a + b", "c @ d"], &rules);
        let mut texts = Vec::new();
        let error = loop {
            match tokens.next() {
                Some(Ok(token)) => texts.push(token.text().to_string()),
                Some(Err(e)) => break e,
                None => panic!("expected a syntax error"),
            }
        };
        assert_eq!(texts, ["a", "+", "b", "c"]);
        assert_eq!(
            error,
            SyntaxError::UnexpectedInput {
                line: 1,
                column: 2,
                character: '@'
            }
        );
        assert_eq!(error.to_string(), "Syntax error at 00002 : 003");
        assert!(tokens.next().is_none());
        assert!(tokens.is_finished());
    }

    #[test]
    fn test_whitespace_only_input() {
        let rules = rules();
        assert!(texts(&["   ", "", "\t"], &rules).is_empty());
        assert!(texts(&[], &rules).is_empty());
    }

    #[test]
    fn test_priority_picks_keyword_over_word() {
        let rules = RuleSet::new()
            .with_rule(TokenRule::regex("word", "[a-z]+", 1, RuleOptions::NONE).unwrap())
            .with_rule(TokenRule::regex("if", "if", 2, RuleOptions::NONE).unwrap());
        let tokens: Vec<Token> = parse(["if x"], &rules).map(Result::unwrap).collect();
        assert_eq!(tokens[0].rule().name(), "if");
        assert_eq!(tokens[1].rule().name(), "word");
    }

    #[test]
    fn test_context_distinguishes_unary_minus() {
        // '-' is a sign when nothing operand-like precedes it
        let unary = TokenRule::locator(
            "negative",
            |line: &str, pos: usize, ctx: &[Token]| {
                let after_operand = ctx.last().map_or(false, |t| t.kind().is_operand());
                let digits = line[pos..]
                    .strip_prefix('-')?
                    .bytes()
                    .take_while(u8::is_ascii_digit)
                    .count();
                (!after_operand && digits > 0).then(|| RuleMatch::new(pos, pos + 1 + digits))
            },
            5,
            RuleOptions::NONE,
        )
        .with_kind(TokenKind::Constant);

        let rules = RuleSet::new()
            .with_rule(unary)
            .with_rule(
                TokenRule::regex("number", "[0-9]+", 1, RuleOptions::NONE)
                    .unwrap()
                    .with_kind(TokenKind::Constant),
            )
            .with_rule(
                TokenRule::regex("minus", "-", 1, RuleOptions::NONE)
                    .unwrap()
                    .with_kind(TokenKind::Operator),
            );

        assert_eq!(texts(&["-1 -2"], &rules), ["-1", "-", "2"]);
    }

    #[test]
    fn test_line_limit() {
        let rules = rules();
        let long = "a".repeat(MAX_LINE_LENGTH + 1);
        let results: Vec<_> = parse([long.as_str()], &rules).collect();
        assert_matches!(
            results.as_slice(),
            [Err(SyntaxError::LineTooLong { line: 0, .. })]
        );

        let relaxed = TokenizerPreferences {
            enforce_limits: false,
            ..TokenizerPreferences::default()
        };
        let tokens: Vec<_> =
            Tokenizer::with_preferences([long.as_str()].into_iter(), &rules, relaxed).collect();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_ok());
    }

    #[test]
    fn test_caret_anchored_rule_matches_at_each_column() {
        let rules = RuleSet::new()
            .with_rule(TokenRule::regex("word", "^[a-z]+", 1, RuleOptions::NONE).unwrap());
        assert_eq!(texts(&["ab cd"], &rules), ["ab", "cd"]);
        assert_eq!(texts(&["  x", "yz w"], &rules), ["x", "yz", "w"]);
    }

    #[test]
    fn test_multiline_token_size_limit() {
        let rules = rules();
        let filler = "x".repeat(60_000);
        let lines = std::iter::once("a /* open".to_string())
            .chain(std::iter::repeat(filler).take(20))
            .chain(std::iter::once("*/".to_string()));

        let results: Vec<_> = parse(lines, &rules).collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().text(), "a");
        assert_matches!(
            &results[1],
            Err(SyntaxError::TokenTooLarge { line: 0, column: 2, size })
                if *size > MAX_MULTILINE_TOKEN_SIZE
        );
    }

    #[test]
    fn test_token_count_limit() {
        let single = TokenRule::locator(
            "a",
            |line: &str, pos: usize, _: &[Token]| {
                line[pos..].starts_with('a').then(|| RuleMatch::new(pos, pos + 1))
            },
            1,
            RuleOptions::NONE,
        );
        let rules = RuleSet::new().with_rule(single);
        let preferences = TokenizerPreferences {
            enforce_limits: true,
            log_token_events: false,
            track_context: false,
        };

        let line = "a".repeat(1_000);
        let lines = std::iter::repeat(line.as_str()).take(MAX_TOKEN_COUNT / 1_000 + 1);

        let mut accepted = 0;
        let mut errors = Vec::new();
        for result in Tokenizer::with_preferences(lines, &rules, preferences) {
            match result {
                Ok(_) => accepted += 1,
                Err(e) => errors.push(e),
            }
        }

        assert_eq!(accepted, MAX_TOKEN_COUNT);
        assert_eq!(
            errors,
            [SyntaxError::TooManyTokens {
                count: MAX_TOKEN_COUNT + 1
            }]
        );
    }

    #[test]
    fn test_context_tracking_can_be_disabled() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let seen = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&seen);
        let word = TokenRule::locator(
            "word",
            move |line: &str, pos: usize, ctx: &[Token]| {
                observed.fetch_max(ctx.len(), Ordering::SeqCst);
                let len = line[pos..].bytes().take_while(u8::is_ascii_lowercase).count();
                (len > 0).then(|| RuleMatch::new(pos, pos + len))
            },
            1,
            RuleOptions::NONE,
        );
        let rules = RuleSet::new().with_rule(word);

        let untracked = TokenizerPreferences {
            enforce_limits: true,
            log_token_events: false,
            track_context: false,
        };
        let mut tokenizer =
            Tokenizer::with_preferences(["a b c"].into_iter(), &rules, untracked.clone());
        assert_eq!(tokenizer.by_ref().filter(Result::is_ok).count(), 3);
        assert!(tokenizer.context().is_empty());
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        let tracked = TokenizerPreferences {
            track_context: true,
            ..untracked
        };
        let mut tokenizer = Tokenizer::with_preferences(["a b c"].into_iter(), &rules, tracked);
        assert_eq!(tokenizer.by_ref().filter(Result::is_ok).count(), 3);
        assert_eq!(tokenizer.context().len(), 3);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_metrics_and_context() {
        let rules = rules();
        let mut tokenizer = parse(["a /* x", "*/ 1"], &rules);
        while let Some(token) = tokenizer.next() {
            token.unwrap();
        }
        let metrics = tokenizer.metrics();
        assert_eq!(metrics.lines, 2);
        assert_eq!(metrics.tokens, 3);
        assert_eq!(metrics.multiline_tokens, 1);
        assert_eq!(tokenizer.context().len(), 3);
    }

    #[test]
    fn test_owned_lines() {
        let rules = rules();
        let lines: Vec<String> = vec!["x + 1".to_string()];
        assert_eq!(texts(&["x + 1"], &rules), ["x", "+", "1"]);
        assert_eq!(parse(lines, &rules).count(), 3);
    }
}
