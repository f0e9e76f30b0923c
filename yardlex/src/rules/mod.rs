//! Token rules: how lexemes are recognized
//!
//! A [`TokenRule`] recognizes one kind of lexeme in one of two modes:
//!
//! - **entire match**: one probe recognizes the whole lexeme on one line
//! - **start/stop**: one probe opens the lexeme, another closes it, possibly
//!   several lines later (block comments, multi-line strings)
//!
//! Each mode can be backed by a regular expression or by a closure
//! ([`Locator`], [`StopLocator`]). A [`RuleSet`] picks the winning rule at a
//! position by priority, and a [`catalog`] document builds a rule set from
//! TOML.

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod options;
pub mod rule;
pub mod ruleset;

pub use catalog::RuleCatalog;
pub use error::RuleError;
pub use matcher::{Locator, RuleMatch, StopLocator};
pub use options::RuleOptions;
pub use rule::{RuleMode, TokenRule};
pub use ruleset::{MatchKind, RuleSet, RuleSetMatch};
