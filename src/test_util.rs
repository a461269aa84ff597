//! Helpers for testing dialects and the reconciliation pipeline.
use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::errors::DialectError;
use crate::history::{
    Action, ActionKind, GameFormat, HandRecord, Limit, Player, PlayerRoster, Pot, Street,
};
use crate::parser::{Capabilities, Dialect, HandField};

/// Parse a decimal literal, panicking on bad input.
pub fn chips(value: &str) -> Decimal {
    value
        .parse()
        .unwrap_or_else(|_| panic!("{value} is not a decimal amount"))
}

/// Shorthand for an action whose amount is given as a magnitude.
pub fn action(player: &str, kind: ActionKind, amount: &str, street: Street) -> Action {
    Action::new(player, kind, chips(amount), street)
}

/// Players seated in the order given, seats starting at 1.
pub fn players(stacks: &[(&str, &str)]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(idx, (name, stack))| Player::new(*name, chips(stack), idx as u8 + 1))
        .collect()
}

/// A dialect that hands back whatever it was given, ignoring the hand
/// text.
///
/// Any field named in `failing` reports a parse error instead of its value.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDialect {
    pub capabilities: Capabilities,
    pub hand_id: Option<i64>,
    pub players: Vec<Player>,
    pub actions: Vec<Action>,
    pub game_format: Option<GameFormat>,
    pub limit: Option<Limit>,
    pub hero: Option<String>,
    pub community_cards: Option<Vec<String>>,
    pub run_it_twice_board: Option<Vec<String>>,
    pub reported_pot: Option<Pot>,
    pub cancelled: bool,
    pub failing: Vec<HandField>,
}

impl ScriptedDialect {
    pub fn new(players: Vec<Player>, actions: Vec<Action>) -> Self {
        Self {
            hand_id: Some(1),
            players,
            actions,
            ..Self::default()
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn failing(mut self, field: HandField) -> Self {
        self.failing.push(field);
        self
    }

    fn field<T: Clone>(
        &self,
        field: HandField,
        value: &Option<T>,
    ) -> Result<Option<T>, DialectError> {
        if self.failing.contains(&field) {
            return Err(DialectError::field("scripted", format!("{field} failed")));
        }
        Ok(value.clone())
    }
}

impl Dialect for ScriptedDialect {
    type Tokens = ();

    fn site(&self) -> &str {
        "scripted"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn tokenize(&self, _text: &str) -> Result<(), DialectError> {
        Ok(())
    }

    fn hand_id(&self, _tokens: &()) -> Result<i64, DialectError> {
        self.hand_id
            .ok_or_else(|| DialectError::field("hand id", "no hand number"))
    }

    fn players(&self, _tokens: &()) -> Result<PlayerRoster, DialectError> {
        Ok(PlayerRoster::new(self.players.clone())?)
    }

    fn actions(&self, _tokens: &(), _roster: &PlayerRoster) -> Result<Vec<Action>, DialectError> {
        Ok(self.actions.clone())
    }

    fn game_format(&self, _tokens: &()) -> Result<Option<GameFormat>, DialectError> {
        self.field(HandField::GameFormat, &self.game_format)
    }

    fn limit(&self, _tokens: &()) -> Result<Option<Limit>, DialectError> {
        self.field(HandField::Limit, &self.limit)
    }

    fn table_name(&self, _tokens: &()) -> Result<Option<String>, DialectError> {
        self.field(HandField::TableName, &Some("Scripted Table".to_string()))
    }

    fn community_cards(&self, _tokens: &()) -> Result<Option<Vec<String>>, DialectError> {
        self.field(HandField::CommunityCards, &self.community_cards)
    }

    fn run_it_twice_board(&self, _tokens: &()) -> Result<Option<Vec<String>>, DialectError> {
        self.field(HandField::RunItTwice, &self.run_it_twice_board)
    }

    fn hero_name(&self, _tokens: &()) -> Result<Option<String>, DialectError> {
        self.field(HandField::Hero, &self.hero)
    }

    fn is_cancelled(&self, _tokens: &()) -> Result<Option<bool>, DialectError> {
        self.field(HandField::Cancelled, &Some(self.cancelled))
    }

    fn reported_pot(&self, _tokens: &()) -> Result<Option<Pot>, DialectError> {
        self.field(HandField::Pot, &self.reported_pot)
    }
}

/// Assert that a reconciled hand is internally consistent.
///
/// Checks dense action numbering, at most one uncalled bet, that nobody
/// puts in more than they sat down with, that all-in flags sit exactly
/// where a stack ran out, and that sitting out players did nothing.
pub fn assert_valid_hand_record(hand: &HandRecord) {
    for (idx, action) in hand.actions.iter().enumerate() {
        assert_eq!(
            action.action_number, idx,
            "Hand {} action {action} is out of sequence",
            hand.hand_id
        );
    }

    let uncalled: Vec<&Action> = hand
        .actions
        .iter()
        .filter(|a| a.kind == ActionKind::UncalledBet)
        .collect();
    assert!(
        uncalled.len() <= 1,
        "Hand {} has {} uncalled bets",
        hand.hand_id,
        uncalled.len()
    );
    for action in &uncalled {
        assert!(
            action.amount > Decimal::ZERO,
            "Hand {} returns a non positive uncalled bet {action}",
            hand.hand_id
        );
    }

    let mut outflow: HashMap<&str, Decimal> = HashMap::new();
    for action in &hand.actions {
        let player = hand.roster.get(&action.player).unwrap_or_else(|| {
            panic!(
                "Hand {} action {action} names a player who isn't seated",
                hand.hand_id
            )
        });
        assert_eq!(
            action.amount,
            action.kind.signed(action.amount),
            "Hand {} action {action} has the wrong sign",
            hand.hand_id
        );
        assert!(
            !(player.is_sitting_out && action.is_game_action()),
            "Hand {} sitting out player {} acted",
            hand.hand_id,
            player.name
        );

        if action.amount < Decimal::ZERO {
            let total = outflow.entry(action.player.as_str()).or_default();
            *total -= action.amount;
            assert!(
                *total <= player.starting_stack,
                "Hand {} player {} put in {} with a stack of {}",
                hand.hand_id,
                player.name,
                total,
                player.starting_stack
            );
            if action.is_all_in {
                assert_eq!(
                    *total, player.starting_stack,
                    "Hand {} action {action} is flagged all-in with chips behind",
                    hand.hand_id
                );
            }
        }
    }
}
