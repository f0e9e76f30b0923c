//! Rule-driven tokenizer and shunting-yard reducer
//!
//! Lines go through a [`RuleSet`](rules::RuleSet) into a lazy stream of
//! [`Token`](tokens::Token)s, which the reducer reorders into postfix
//! [`ExpressionToken`](expressions::ExpressionToken)s. Both stages are
//! pull-driven iterators and stop at the first error.

pub mod config;
pub mod diagnostics;
pub mod expressions;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod rules;
pub mod source;
pub mod tokenizer;
pub mod tokens;
pub mod utils;

pub use expressions::{ExpressionToken, PrecedenceError, ShuntingYard};
pub use pipeline::{postfix, postfix_all, tokenize_all, PipelineError};
pub use rules::{RuleCatalog, RuleError, RuleOptions, RuleSet, TokenRule};
pub use tokenizer::{SyntaxError, Tokenizer};
pub use tokens::{Token, TokenKind};
