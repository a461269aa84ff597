use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::{ReconcileError, RosterError};

/// A player seated at the table when the hand started.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub name: String,
    pub starting_stack: Decimal,
    pub seat: u8,
    /// Hole cards as the site printed them, when they were shown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hole_cards: Option<Vec<String>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_sitting_out: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, starting_stack: Decimal, seat: u8) -> Self {
        Self {
            name: name.into(),
            starting_stack,
            seat,
            hole_cards: None,
            is_sitting_out: false,
        }
    }

    pub fn with_hole_cards(mut self, cards: Vec<String>) -> Self {
        self.hole_cards = Some(cards);
        self
    }
}

/// Every player in a hand, ordered by seat and indexed by name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Player>", into = "Vec<Player>")
)]
pub struct PlayerRoster {
    players: Vec<Player>,
    by_name: HashMap<String, usize>,
}

impl PlayerRoster {
    /// Build a roster, sorting by seat. Names must be unique.
    pub fn new(mut players: Vec<Player>) -> Result<Self, RosterError> {
        players.sort_by_key(|p| p.seat);

        let mut by_name = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if by_name.insert(player.name.clone(), idx).is_some() {
                return Err(RosterError::DuplicateName(player.name.clone()));
            }
        }

        Ok(Self { players, by_name })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.by_name.get(name).map(|&idx| &self.players[idx])
    }

    /// Look up a player referenced by an action.
    ///
    /// A miss means the tokenizer produced an action for someone it never
    /// seated, so it is an error rather than a skip.
    pub fn require(&self, name: &str) -> Result<&Player, ReconcileError> {
        self.get(name).ok_or_else(|| ReconcileError::UnknownPlayer {
            player: name.to_string(),
        })
    }

    /// Position of the player in seat order.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Player> {
        match self.by_name.get(name) {
            Some(&idx) => self.players.get_mut(idx),
            None => None,
        }
    }

    pub fn num_active(&self) -> usize {
        self.players.iter().filter(|p| !p.is_sitting_out).count()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

impl TryFrom<Vec<Player>> for PlayerRoster {
    type Error = RosterError;

    fn try_from(players: Vec<Player>) -> Result<Self, Self::Error> {
        Self::new(players)
    }
}

impl From<PlayerRoster> for Vec<Player> {
    fn from(roster: PlayerRoster) -> Self {
        roster.into_players()
    }
}

impl<'a> IntoIterator for &'a PlayerRoster {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_sorted_by_seat() {
        let roster = PlayerRoster::new(vec![
            Player::new("Carol", Decimal::new(100, 0), 6),
            Player::new("Alice", Decimal::new(100, 0), 1),
            Player::new("Bob", Decimal::new(100, 0), 3),
        ])
        .unwrap();

        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        assert_eq!(roster.index_of("Carol"), Some(2));
        assert_eq!(roster.get("Bob").map(|p| p.seat), Some(3));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = PlayerRoster::new(vec![
            Player::new("Alice", Decimal::new(100, 0), 1),
            Player::new("Alice", Decimal::new(50, 0), 2),
        ]);
        assert_eq!(result, Err(RosterError::DuplicateName("Alice".to_string())));
    }

    #[test]
    fn test_require_unknown_player() {
        let roster = PlayerRoster::new(vec![Player::new("Alice", Decimal::ONE, 1)]).unwrap();
        assert!(roster.require("Alice").is_ok());
        assert_eq!(
            roster.require("Mallory"),
            Err(ReconcileError::UnknownPlayer {
                player: "Mallory".to_string()
            })
        );
    }

    #[test]
    fn test_num_active_skips_sitting_out() {
        let mut roster = PlayerRoster::new(vec![
            Player::new("Alice", Decimal::ONE, 1),
            Player::new("Bob", Decimal::ONE, 2),
        ])
        .unwrap();
        assert_eq!(roster.num_active(), 2);

        if let Some(bob) = roster.get_mut("Bob") {
            bob.is_sitting_out = true;
        }
        assert_eq!(roster.num_active(), 1);
    }
}
