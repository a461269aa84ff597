//! # Hand history model
//!
//! The data every dialect produces and every reconciliation pass consumes:
//! actions with signed amounts, the player roster, the game descriptor and
//! the finished [`HandRecord`].
mod action;
mod game;
mod player;
mod record;

pub use action::*;
pub use game::*;
pub use player::*;
pub use record::*;
