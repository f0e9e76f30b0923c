//! Operator-precedence reduction
//!
//! - **[`ExpressionToken`]** - name, operator priority and kind
//! - **[`Reducible`]** - what the reducer reads from an item; implemented
//!   for [`ExpressionToken`] and for source [`Token`](crate::tokens::Token)s
//! - **[`ShuntingYard`]** - lazy infix to postfix reordering
//! - **[`brackets`]** - bracket pairing used to validate groups

pub mod brackets;
pub mod error;
pub mod reducer;
pub mod token;

pub use error::PrecedenceError;
pub use reducer::{reduce, Reducer, ShuntingYard};
pub use token::{ExpressionToken, Reducible};
