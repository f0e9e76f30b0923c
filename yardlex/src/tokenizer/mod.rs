//! Tokenization: lines in, classified tokens out
//!
//! - **[`Tokenizer`]** - lazy, pull-driven iterator over a line source
//! - **[`SyntaxError`]** - structured failure with 0-based coordinates
//!
//! ```
//! use yardlex::rules::{RuleOptions, RuleSet, TokenRule};
//! use yardlex::tokenizer;
//!
//! let rules = RuleSet::new()
//!     .with_rule(TokenRule::regex("word", "[a-z]+", 1, RuleOptions::NONE).unwrap())
//!     .with_rule(TokenRule::regex_start_stop("comment", r"/\*", r"\*/", 5, RuleOptions::NONE).unwrap());
//!
//! let texts: Vec<String> = tokenizer::parse(["a /* b", "*/ c"], &rules)
//!     .map(|token| token.unwrap().text().to_string())
//!     .collect();
//! assert_eq!(texts, ["a", "/* b\n*/", "c"]);
//! ```

pub mod error;
pub mod scanner;

pub use error::SyntaxError;
pub use scanner::{parse, Tokenizer, TokenizerMetrics};
