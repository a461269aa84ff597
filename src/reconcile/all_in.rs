use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::trace;

use crate::errors::ReconcileError;
use crate::history::{Action, PlayerRoster};

/// Flag every action that leaves its player with exactly zero chips as
/// all-in.
///
/// Stacks are tracked from each player's starting stack, walking `actions`
/// in their current order. Actions that return chips, move nothing, or are
/// already flagged pass through untouched. Equality is exact since both
/// stacks and bets are currency amounts.
///
/// # Errors
///
/// Returns [`ReconcileError::UnknownPlayer`] if an action names a player the
/// roster doesn't have.
pub fn classify_all_ins(
    roster: &PlayerRoster,
    actions: &[Action],
) -> Result<Vec<Action>, ReconcileError> {
    let mut remaining: HashMap<&str, Decimal> = roster
        .iter()
        .map(|p| (p.name.as_str(), p.starting_stack))
        .collect();

    actions
        .iter()
        .map(|action| {
            let stack = remaining
                .get_mut(action.player.as_str())
                .ok_or_else(|| ReconcileError::UnknownPlayer {
                    player: action.player.clone(),
                })?;

            if action.amount >= Decimal::ZERO || action.is_all_in {
                return Ok(action.clone());
            }

            *stack += action.amount;
            if stack.is_zero() {
                trace!(%action, "Action exhausted the stack, marking all-in");
                Ok(Action {
                    is_all_in: true,
                    ..action.clone()
                })
            } else {
                Ok(action.clone())
            }
        })
        .collect()
}
