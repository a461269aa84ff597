use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::history::{Action, ActionKind};

/// Chips that ended up in the pot.
///
/// Each player's contribution is what they put in less any uncalled bet
/// returned to them. When the biggest contributor is still ahead of
/// everyone else the difference was never at risk, so it is left out even
/// if no uncalled bet has been recorded yet.
pub fn total_pot(actions: &[Action]) -> Decimal {
    let mut contributions: HashMap<&str, Decimal> = HashMap::new();
    for action in actions {
        if action.kind.is_outflow() || action.kind == ActionKind::UncalledBet {
            // Outflows are negative and returns positive, so negate the sum.
            *contributions.entry(action.player.as_str()).or_default() -= action.amount;
        }
    }

    let mut sorted: Vec<Decimal> = contributions.into_values().collect();
    sorted.sort_unstable_by(|a, b| b.cmp(a));

    let total: Decimal = sorted.iter().sum();
    match sorted.as_slice() {
        [first, second, ..] if first > second => total - (*first - *second),
        _ => total,
    }
}

/// What the site kept: the pot less everything paid out.
///
/// `None` when the hand records no winnings, since the payout is unknown,
/// and when more was paid out than the pot holds.
pub fn rake(actions: &[Action], total_pot: Decimal) -> Option<Decimal> {
    let winnings: Vec<Decimal> = actions
        .iter()
        .filter(|a| a.is_winnings_action())
        .map(|a| a.amount)
        .collect();

    if winnings.is_empty() {
        return None;
    }

    let paid: Decimal = winnings.iter().sum();
    if paid > total_pot {
        warn!(%paid, %total_pot, "Winnings exceed the pot, rake is unknown");
        return None;
    }
    Some(total_pot - paid)
}

#[cfg(test)]
mod tests {
    use crate::history::Street;

    use super::*;

    fn act(player: &str, kind: ActionKind, amount: i64, street: Street) -> Action {
        Action::new(player, kind, Decimal::new(amount, 2), street)
    }

    #[test]
    fn test_total_pot_with_winner() {
        let actions = vec![
            act("P1", ActionKind::SmallBlind, 5, Street::Preflop),
            act("P2", ActionKind::BigBlind, 10, Street::Preflop),
            act("P1", ActionKind::Call, 5, Street::Preflop),
            Action::without_amount("P2", ActionKind::Check, Street::Preflop),
            act("P2", ActionKind::Wins, 19, Street::Showdown),
        ];

        let pot = total_pot(&actions);
        assert_eq!(pot, Decimal::new(20, 2));
        assert_eq!(rake(&actions, pot), Some(Decimal::new(1, 2)));
    }

    #[test]
    fn test_unmatched_excess_is_not_in_pot() {
        let actions = vec![
            act("P1", ActionKind::SmallBlind, 5, Street::Preflop),
            act("P2", ActionKind::BigBlind, 10, Street::Preflop),
            act("P1", ActionKind::Raise, 45, Street::Preflop),
            Action::without_amount("P2", ActionKind::Fold, Street::Preflop),
        ];

        assert_eq!(total_pot(&actions), Decimal::new(20, 2));
    }

    #[test]
    fn test_uncalled_bet_already_returned() {
        let actions = vec![
            act("P1", ActionKind::SmallBlind, 5, Street::Preflop),
            act("P2", ActionKind::BigBlind, 10, Street::Preflop),
            act("P2", ActionKind::UncalledBet, 5, Street::Preflop),
        ];

        assert_eq!(total_pot(&actions), Decimal::new(10, 2));
        assert_eq!(rake(&actions, Decimal::new(10, 2)), None);
    }

    #[test_log::test]
    fn test_overpaid_pot_has_no_rake() {
        let actions = vec![
            act("P1", ActionKind::Bet, 10, Street::River),
            act("P2", ActionKind::Call, 10, Street::River),
            act("P1", ActionKind::Wins, 25, Street::Showdown),
        ];

        let pot = total_pot(&actions);
        assert_eq!(pot, Decimal::new(20, 2));
        assert_eq!(rake(&actions, pot), None);
        // Paying out exactly the pot is a rake of zero, not unknown.
        assert_eq!(rake(&actions, Decimal::new(25, 2)), Some(Decimal::ZERO));
    }
}
