//! # rs_hand_history
//!
//! Turns poker hand histories from many sites into one canonical action
//! log. Every chip movement is explicit and signed, uncalled bets and
//! all-ins are filled in where a site leaves them out, and actions are
//! numbered densely in the order they happened.
//!
//! - [`history`] holds the data model.
//! - [`reconcile`] holds the pure passes that fix up an action list.
//! - [`parser`] holds the [`parser::Dialect`] trait and the
//!   [`parser::HandParser`] that runs a dialect through the passes.
//!
//! Amounts are [`rust_decimal::Decimal`] so stack arithmetic is exact.
pub mod errors;
pub mod history;
pub mod parser;
pub mod reconcile;

#[cfg(any(test, feature = "test-util"))]
pub mod test_util;
