//! Shared primitive types used by the tokenizer, the reducer and diagnostics.

pub mod span;

pub use span::{Position, Span};
