//! # Action reconciliation
//!
//! Pure passes that turn a tokenizer's raw action list into the canonical
//! action log. Each pass takes the list by reference and returns a new one.
//!
//! [`crate::parser::HandParser`] runs them in a fixed order, since each
//! relies on what the earlier ones established:
//!
//! 1. [`normalize_signs`]
//! 2. [`sort_actions`]
//! 3. [`adjust_raise_sizes`] (incremental amounts)
//! 4. [`classify_all_ins`] (needs incremental amounts to zero stacks)
//! 5. [`total_pot`] and [`rake`]
//! 6. [`fix_uncalled_bet`] (sees the final list, never inserts twice)
//! 7. [`detect_ante`] and [`mark_sitting_out`]
//! 8. [`assign_action_numbers`]
mod all_in;
mod ordering;
mod pot;
mod raise;
mod table;
mod uncalled_bet;

pub use all_in::*;
pub use ordering::*;
pub use pot::*;
pub use raise::*;
pub use table::*;
pub use uncalled_bet::*;
