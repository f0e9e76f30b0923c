use crate::rules::{RuleMatch, TokenRule};
use crate::tokens::Token;
use std::sync::Arc;

/// Which probe produced a rule set match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// A complete lexeme
    Entire,
    /// The opening of a start/stop lexeme
    Start,
}

/// Winner of a rule set probe
#[derive(Debug, Clone)]
pub struct RuleSetMatch {
    pub rule: Arc<TokenRule>,
    pub kind: MatchKind,
    pub range: RuleMatch,
}

impl RuleSetMatch {
    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn extract<'a>(&self, line: &'a str) -> &'a str {
        self.range.extract(line)
    }
}

/// Ordered collection of rules, read-only once built.
///
/// Registration order matters: among rules of equal priority the first one
/// registered wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<TokenRule>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: TokenRule) -> &mut Self {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn with_rule(mut self, rule: TokenRule) -> Self {
        self.add(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TokenRule>> {
        self.rules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<TokenRule>> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    /// Best rule anchored at `position` in `line`.
    ///
    /// Highest priority wins; on equal priority the earlier registration is
    /// kept. Entire-match rules are probed with `match_entire`, start/stop
    /// rules with `match_start`.
    pub fn best_match(&self, line: &str, position: usize, context: &[Token]) -> Option<RuleSetMatch> {
        let mut best: Option<RuleSetMatch> = None;

        for rule in &self.rules {
            if let Some(current) = &best {
                if rule.priority() <= current.rule.priority() {
                    continue;
                }
            }

            let probe = if rule.is_start_stop_mode() {
                rule.match_start(line, position, context)
                    .map(|range| (MatchKind::Start, range))
            } else {
                rule.match_entire(line, position, context)
                    .map(|range| (MatchKind::Entire, range))
            };

            if let Some((kind, range)) = probe {
                best = Some(RuleSetMatch {
                    rule: Arc::clone(rule),
                    kind,
                    range,
                });
            }
        }

        best
    }
}

impl FromIterator<TokenRule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = TokenRule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Arc<TokenRule>;
    type IntoIter = std::slice::Iter<'a, Arc<TokenRule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
