//! Token model shared by the tokenizer and the reducer
//!
//! - **[`TokenKind`]** - closed set of token categories
//! - **[`Token`]** - an immutable, classified span of source text
//!
//! A [`Token`] keeps a shared handle to the rule that recognized it, so the
//! consumer can classify it later without a second lookup.

pub mod kind;
pub mod token;

pub use kind::TokenKind;
pub use token::Token;
