//! The two matching strategies a rule can be built on.

use crate::config::compile_time::rules::MAX_PATTERN_SIZE;
use crate::rules::{RuleError, RuleOptions};
use crate::tokens::Token;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// Byte range `[start, end)` within one source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
}

impl RuleMatch {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched slice of `line`
    pub fn extract<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }

    /// Usable against `line`: in bounds, ordered, on char boundaries
    pub(crate) fn fits(&self, line: &str) -> bool {
        self.start <= self.end
            && self.end <= line.len()
            && line.is_char_boundary(self.start)
            && line.is_char_boundary(self.end)
    }
}

/// Closure probe for entire and start matches: `(line, position, context)`
pub type Locator = Arc<dyn Fn(&str, usize, &[Token]) -> Option<RuleMatch> + Send + Sync>;

/// Closure probe for stop matches: `(line, search_from, prefix, context)`
pub type StopLocator =
    Arc<dyn Fn(&str, usize, &str, &[Token]) -> Option<RuleMatch> + Send + Sync>;

/// A pattern compiled to match only at the probe position.
///
/// The probe position is treated as the start of the input, so `^` and `\A`
/// hold there.
pub(crate) struct AnchoredRegex {
    written: Regex,
    anchored: Regex,
}

impl AnchoredRegex {
    pub(crate) fn as_str(&self) -> &str {
        self.written.as_str()
    }

    fn find(&self, line: &str, position: usize) -> Option<RuleMatch> {
        let rest = line.get(position..)?;
        self.anchored
            .find(rest)
            .map(|m| RuleMatch::new(position + m.start(), position + m.end()))
    }
}

pub(crate) enum RegexMatcher {
    Entire(AnchoredRegex),
    StartStop { start: AnchoredRegex, stop: Regex },
}

pub(crate) enum LocatorMatcher {
    Entire(Locator),
    StartStop { start: Locator, stop: StopLocator },
}

/// Pattern-backed or closure-backed, each in exactly one mode
pub(crate) enum Matcher {
    Regex(RegexMatcher),
    Locator(LocatorMatcher),
}

/// Compile one rule pattern with the options shared by all rule patterns
pub(crate) fn compile_pattern(
    which: &'static str,
    pattern: &str,
    options: RuleOptions,
) -> Result<Regex, RuleError> {
    if pattern.is_empty() {
        return Err(RuleError::EmptyPattern { which });
    }

    RegexBuilder::new(pattern)
        .case_insensitive(options.ignore_case())
        .dot_matches_new_line(true)
        .size_limit(MAX_PATTERN_SIZE)
        .build()
        .map_err(|e| RuleError::InvalidPattern {
            which,
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Compile a pattern for entire and start probes
pub(crate) fn compile_anchored(
    which: &'static str,
    pattern: &str,
    options: RuleOptions,
) -> Result<AnchoredRegex, RuleError> {
    let written = compile_pattern(which, pattern, options)?;
    let anchored = compile_pattern(which, &format!(r"\A(?:{})", pattern), options)?;
    Ok(AnchoredRegex { written, anchored })
}

/// First match at or after `from`; `None` when `from` is past the line
fn find_from(regex: &Regex, line: &str, from: usize) -> Option<RuleMatch> {
    if from > line.len() || !line.is_char_boundary(from) {
        return None;
    }
    regex
        .find_at(line, from)
        .map(|m| RuleMatch::new(m.start(), m.end()))
}

impl Matcher {
    pub(crate) fn is_start_stop(&self) -> bool {
        matches!(
            self,
            Matcher::Regex(RegexMatcher::StartStop { .. })
                | Matcher::Locator(LocatorMatcher::StartStop { .. })
        )
    }

    pub(crate) fn entire(&self, line: &str, position: usize, context: &[Token]) -> Option<RuleMatch> {
        match self {
            Matcher::Regex(RegexMatcher::Entire(regex)) => regex.find(line, position),
            Matcher::Locator(LocatorMatcher::Entire(locate)) => locate(line, position, context),
            _ => None,
        }
    }

    pub(crate) fn start(&self, line: &str, position: usize, context: &[Token]) -> Option<RuleMatch> {
        match self {
            Matcher::Regex(RegexMatcher::StartStop { start, .. }) => start.find(line, position),
            Matcher::Locator(LocatorMatcher::StartStop { start, .. }) => {
                start(line, position, context)
            }
            _ => None,
        }
    }

    pub(crate) fn stop(
        &self,
        line: &str,
        search_from: usize,
        prefix: &str,
        context: &[Token],
    ) -> Option<RuleMatch> {
        match self {
            Matcher::Regex(RegexMatcher::StartStop { stop, .. }) => {
                find_from(stop, line, search_from)
            }
            Matcher::Locator(LocatorMatcher::StartStop { stop, .. }) => {
                stop(line, search_from, prefix, context)
            }
            _ => None,
        }
    }

    /// Patterns as written, for diagnostics
    pub(crate) fn describe(&self) -> String {
        match self {
            Matcher::Regex(RegexMatcher::Entire(regex)) => format!("/{}/", regex.as_str()),
            Matcher::Regex(RegexMatcher::StartStop { start, stop }) => {
                format!("/{}/ ... /{}/", start.as_str(), stop.as_str())
            }
            Matcher::Locator(LocatorMatcher::Entire(_)) => "<locator>".to_string(),
            Matcher::Locator(LocatorMatcher::StartStop { .. }) => {
                "<locator> ... <locator>".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_rejects_empty_and_invalid() {
        assert_eq!(
            compile_pattern("entire", "", RuleOptions::NONE).unwrap_err(),
            RuleError::EmptyPattern { which: "entire" }
        );
        assert!(matches!(
            compile_pattern("start", "(", RuleOptions::NONE),
            Err(RuleError::InvalidPattern { which: "start", .. })
        ));
    }

    #[test]
    fn test_ignore_case_applies_to_pattern() {
        let regex = compile_pattern("entire", "select", RuleOptions::IGNORE_CASE).unwrap();
        assert!(regex.is_match("SeLeCt"));
        let strict = compile_pattern("entire", "select", RuleOptions::NONE).unwrap();
        assert!(!strict.is_match("SELECT"));
    }

    #[test]
    fn test_anchored_pattern_starts_at_position() {
        let word = compile_anchored("entire", "^[a-z]+", RuleOptions::NONE).unwrap();
        assert_eq!(word.find("ab cd", 0), Some(RuleMatch::new(0, 2)));
        assert_eq!(word.find("ab cd", 3), Some(RuleMatch::new(3, 5)));
        assert_eq!(word.find("ab cd", 2), None);
        assert_eq!(word.find("ab cd", 6), None);
        assert_eq!(word.as_str(), "^[a-z]+");

        // Alternation stays inside the anchor
        let either = compile_anchored("entire", "x|[0-9]+", RuleOptions::NONE).unwrap();
        assert_eq!(either.find("a12", 0), None);
        assert_eq!(either.find("a12", 1), Some(RuleMatch::new(1, 3)));
    }

    #[test]
    fn test_find_from_past_end_is_none() {
        let regex = compile_pattern("stop", "$", RuleOptions::NONE).unwrap();
        assert_eq!(find_from(&regex, "ab", 2), Some(RuleMatch::new(2, 2)));
        assert_eq!(find_from(&regex, "ab", 3), None);
    }

    #[test]
    fn test_rule_match_fits() {
        assert!(RuleMatch::new(0, 2).fits("ab"));
        assert!(!RuleMatch::new(0, 3).fits("ab"));
        assert!(!RuleMatch::new(2, 1).fits("ab"));
        // 'é' is two bytes; column 1 splits it
        assert!(!RuleMatch::new(0, 1).fits("é"));
    }
}
