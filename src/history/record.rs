use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::parser::ParseWarning;

use super::{Action, ActionKind, GameDescriptor, PlayerRoster};

/// Total chips in the pot and what the site kept.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pot {
    pub total: Decimal,
    pub rake: Option<Decimal>,
}

/// A fully reconciled hand.
///
/// `actions` is the canonical action log: every chip movement is explicit
/// and signed, and `action_number` runs densely from zero in list order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandRecord {
    pub hand_id: i64,
    pub roster: PlayerRoster,
    pub actions: Vec<Action>,
    pub game: GameDescriptor,
    pub community_cards: Vec<String>,
    /// Second board when the hand was run twice.
    pub run_it_twice_board: Option<Vec<String>>,
    pub pot: Option<Pot>,
    /// Index of the hero in seat order.
    pub hero_index: Option<usize>,
    pub cancelled: bool,
    /// Site specific metadata.
    pub extra: BTreeMap<String, String>,
    pub warnings: Vec<ParseWarning>,
}

impl HandRecord {
    pub fn total_pot(&self) -> Option<Decimal> {
        self.pot.as_ref().map(|p| p.total)
    }

    pub fn rake(&self) -> Option<Decimal> {
        self.pot.as_ref().and_then(|p| p.rake)
    }

    pub fn hero(&self) -> Option<&crate::history::Player> {
        self.hero_index.and_then(|idx| self.roster.iter().nth(idx))
    }

    pub fn uncalled_bet(&self) -> Option<&Action> {
        self.actions
            .iter()
            .find(|a| a.kind == ActionKind::UncalledBet)
    }

    /// Net chips won or lost by `player` over the hand.
    pub fn net_result(&self, player: &str) -> Decimal {
        self.actions
            .iter()
            .filter(|a| a.player == player)
            .map(|a| a.amount)
            .sum()
    }
}
