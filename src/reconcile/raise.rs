use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::trace;

use crate::history::{Action, ActionKind, Street};

/// Turn "raises to" amounts into the chips the raise actually added.
///
/// Many sites print a raise as the player's new street total. Everything
/// else in this crate expects each action to carry only the chips it moved,
/// so the player's earlier commitment on the same street is taken off.
/// Antes are dead money and don't count toward the street total.
///
/// A raise that is already no bigger than the prior commitment can't be a
/// street total and is left alone.
pub fn adjust_raise_sizes(actions: &[Action]) -> Vec<Action> {
    let mut street: Option<Street> = None;
    let mut committed: HashMap<&str, Decimal> = HashMap::new();

    actions
        .iter()
        .map(|action| {
            if street != Some(action.street) {
                street = Some(action.street);
                committed.clear();
            }

            let entry = committed.entry(action.player.as_str()).or_default();
            match action.kind {
                ActionKind::Raise => {
                    let raise_to = action.amount.abs();
                    let already_in = entry.abs();
                    if raise_to > already_in && !already_in.is_zero() {
                        let added = raise_to - already_in;
                        trace!(player = %action.player, %raise_to, %added, "Adjusting raise");
                        *entry -= added;
                        Action {
                            amount: -added,
                            ..action.clone()
                        }
                    } else {
                        *entry += action.amount;
                        action.clone()
                    }
                }
                ActionKind::Ante => action.clone(),
                kind if kind.is_outflow() => {
                    *entry += action.amount;
                    action.clone()
                }
                _ => action.clone(),
            }
        })
        .collect()
}
