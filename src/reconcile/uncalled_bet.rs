use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::ReconcileError;
use crate::history::{Action, ActionKind};

/// Append the uncalled bet a site left out of its hand history.
///
/// The last action that could have moved chips decides what is owed:
///
/// - A bet nobody called is returned in full.
/// - A raise nobody called returns whatever the raiser put in over the
///   next biggest contributor.
/// - A big blind nobody called returns the difference over the small
///   blind.
/// - An all-in call returns the excess of the last bet, raise or big blind
///   over the biggest contributor facing it.
///
/// Anything else means the pot was already balanced. Calling this on a hand
/// that already has an [`ActionKind::UncalledBet`] returns it unchanged, so
/// running it twice is harmless.
///
/// Contributions are compared over the whole hand rather than per street,
/// and only the last aggressor ever gets chips back. That recovers the
/// excess when the aggressor raised over an earlier short all-in, but it
/// does not split further side pots.
///
/// # Errors
///
/// [`ReconcileError::NoRealActions`] if nothing in the hand can be
/// reconciled, and [`ReconcileError::MissingAnchor`] if an all-in call has
/// nothing before it to answer.
pub fn fix_uncalled_bet(actions: &[Action]) -> Result<Vec<Action>, ReconcileError> {
    if actions.iter().any(|a| a.kind == ActionKind::UncalledBet) {
        debug!("Hand already has an uncalled bet");
        return Ok(actions.to_vec());
    }

    let real_actions: Vec<&Action> = actions
        .iter()
        .filter(|a| a.is_game_action() && !a.is_winnings_action() && a.kind != ActionKind::Fold)
        .collect();

    let last = real_actions.last().ok_or(ReconcileError::NoRealActions)?;

    let uncalled = match last.kind {
        ActionKind::Raise => uncalled_raise(&real_actions, last),
        ActionKind::Bet => Some(returned_to(last, last.amount.abs())),
        ActionKind::BigBlind => {
            let small_blind = real_actions
                .iter()
                .find(|a| a.kind == ActionKind::SmallBlind)
                .map(|a| a.amount)
                .unwrap_or_default();
            let returned = last.amount.abs() - small_blind.abs();
            (returned > Decimal::ZERO).then(|| returned_to(last, returned))
        }
        ActionKind::Call if last.is_all_in => {
            let anchor = real_actions
                .iter()
                .rev()
                .find(|a| a.is_aggressive_action() || a.kind == ActionKind::BigBlind)
                .ok_or_else(|| ReconcileError::MissingAnchor {
                    player: last.player.clone(),
                })?;
            uncalled_raise(&real_actions, anchor)
        }
        _ => None,
    };

    let mut fixed = actions.to_vec();
    if let Some(uncalled) = uncalled {
        debug!(%uncalled, "Returning uncalled bet");
        fixed.push(uncalled);
    }
    Ok(fixed)
}

/// The chips `anchor`'s player put in over whoever else put in the most.
fn uncalled_raise(real_actions: &[&Action], anchor: &Action) -> Option<Action> {
    let mut invested: HashMap<&str, Decimal> = HashMap::new();
    for action in real_actions {
        *invested.entry(action.player.as_str()).or_default() += action.amount;
    }

    let invested_by_anchor = invested
        .get(anchor.player.as_str())
        .copied()
        .unwrap_or_default()
        .abs();
    let best_other = invested
        .iter()
        .filter(|(player, _)| **player != anchor.player)
        .map(|(_, amount)| amount.abs())
        .max()
        .unwrap_or_default();

    let returned = invested_by_anchor - best_other;
    if returned > Decimal::ZERO {
        Some(returned_to(anchor, returned))
    } else {
        debug!(
            player = %anchor.player,
            %invested_by_anchor,
            %best_other,
            "Aggressor was fully matched"
        );
        None
    }
}

fn returned_to(anchor: &Action, amount: Decimal) -> Action {
    Action::new(
        anchor.player.clone(),
        ActionKind::UncalledBet,
        amount,
        anchor.street,
    )
}
