//! TOML rule catalogs
//!
//! A catalog lists rules in registration order:
//!
//! ```toml
//! [[rule]]
//! name = "comment"
//! priority = 10
//! start = '/\*'
//! stop = '\*/'
//!
//! [[rule]]
//! name = "plus"
//! kind = "operator"
//! pattern = '\+'
//! operator_priority = 1
//! ```
//!
//! Each entry carries either `pattern` (entire match) or both `start` and
//! `stop`. Compiling the catalog yields a [`RuleSet`].

use crate::config::compile_time::{rules::MAX_CATALOG_RULES, source::MAX_CONFIG_FILE_SIZE};
use crate::logging::codes;
use crate::rules::{RuleError, RuleOptions, RuleSet, TokenRule};
use crate::tokens::TokenKind;
use crate::{log_error, log_success};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One `[[rule]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleEntry {
    pub name: String,
    #[serde(default)]
    pub kind: TokenKind,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub ignore_case: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_priority: Option<i32>,
}

impl RuleEntry {
    fn options(&self) -> RuleOptions {
        if self.ignore_case {
            RuleOptions::IGNORE_CASE
        } else {
            RuleOptions::NONE
        }
    }

    /// Compile into a rule
    pub fn compile(&self) -> Result<TokenRule, RuleError> {
        let options = self.options();
        let rule = match (&self.pattern, &self.start, &self.stop) {
            (Some(pattern), None, None) => {
                TokenRule::regex(self.name.clone(), pattern, self.priority, options)?
            }
            (None, Some(start), Some(stop)) => {
                TokenRule::regex_start_stop(self.name.clone(), start, stop, self.priority, options)?
            }
            (Some(_), _, _) => {
                return Err(RuleError::invalid_catalog(format!(
                    "rule '{}' defines both pattern and start/stop",
                    self.name
                )))
            }
            _ => {
                return Err(RuleError::MissingLocator {
                    rule: self.name.clone(),
                })
            }
        };

        Ok(rule
            .with_kind(self.kind)
            .with_expression_priority(self.operator_priority.unwrap_or(0)))
    }
}

/// A parsed, not yet compiled, rule catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleCatalog {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

impl RuleCatalog {
    pub fn from_toml_str(text: &str) -> Result<Self, RuleError> {
        let catalog: RuleCatalog =
            toml::from_str(text).map_err(|e| RuleError::invalid_catalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read and parse a catalog file
    pub fn load(path: &Path) -> Result<Self, RuleError> {
        let metadata = fs::metadata(path).map_err(|e| {
            RuleError::invalid_catalog(format!("cannot read '{}': {}", path.display(), e))
        })?;

        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(RuleError::invalid_catalog(format!(
                "'{}' is {} bytes, limit is {}",
                path.display(),
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = fs::read_to_string(path).map_err(|e| {
            RuleError::invalid_catalog(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn push(&mut self, entry: RuleEntry) {
        self.rules.push(entry);
    }

    fn validate(&self) -> Result<(), RuleError> {
        if self.rules.len() > MAX_CATALOG_RULES {
            return Err(RuleError::invalid_catalog(format!(
                "{} rules, limit is {}",
                self.rules.len(),
                MAX_CATALOG_RULES
            )));
        }

        let mut seen = HashSet::new();
        for entry in &self.rules {
            if entry.name.trim().is_empty() {
                return Err(RuleError::invalid_catalog("rule name must not be empty"));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(RuleError::invalid_catalog(format!(
                    "duplicate rule name '{}'",
                    entry.name
                )));
            }
        }
        Ok(())
    }

    /// Compile every entry, in order
    pub fn compile(&self) -> Result<RuleSet, RuleError> {
        self.validate()?;

        let mut rules = RuleSet::new();
        for entry in &self.rules {
            match entry.compile() {
                Ok(rule) => {
                    rules.add(rule);
                }
                Err(e) => {
                    log_error!(e.error_code(), "Rule failed to compile",
                        "rule" => entry.name,
                        "error" => e
                    );
                    return Err(e);
                }
            }
        }

        log_success!(codes::success::RULES_COMPILED, "Rule catalog compiled",
            "rules" => rules.len()
        );
        Ok(rules)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
