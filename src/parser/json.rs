//! A dialect for hands that were tokenized elsewhere and written out as
//! JSON, one object per hand.
//!
//! ```json
//! {
//!   "hand_id": 42,
//!   "players": [
//!     {"name": "P1", "starting_stack": "10", "seat": 1},
//!     {"name": "P2", "starting_stack": "10", "seat": 2}
//!   ],
//!   "actions": [
//!     {"player": "P1", "kind": "SmallBlind", "amount": "1", "street": "Preflop"},
//!     {"player": "P2", "kind": "BigBlind", "amount": "2", "street": "Preflop"},
//!     {"player": "P1", "kind": "Fold", "amount": "0", "street": "Preflop"}
//!   ],
//!   "limit": {"small_blind": "1", "big_blind": "2", "currency": "Usd"}
//! }
//! ```
//!
//! Only `hand_id`, `players` and `actions` are required. A malformed
//! optional field is reported as a warning instead of failing the hand.
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::DialectError;
use crate::history::{
    Action, Buyin, GameFormat, GameType, Limit, Player, PlayerRoster, Pot, SeatType, TableType,
};

use super::{Capabilities, Dialect, DialectConfig};

/// One hand as JSON. Fields stay untyped until they are asked for so a bad
/// optional field can't sink the whole hand.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHand {
    pub hand_id: Option<Value>,
    pub players: Option<Value>,
    pub actions: Option<Value>,
    pub game_format: Option<Value>,
    pub game_type: Option<Value>,
    pub limit: Option<Value>,
    pub table_type: Option<Value>,
    pub seat_type: Option<Value>,
    pub buyin: Option<Value>,
    pub table_name: Option<Value>,
    pub dealer_button_position: Option<Value>,
    pub start_date: Option<Value>,
    pub community_cards: Option<Value>,
    pub run_it_twice_board: Option<Value>,
    pub hero: Option<Value>,
    pub cancelled: Option<Value>,
    pub pot: Option<Value>,
    pub extra: Option<Value>,
}

fn optional<T: DeserializeOwned>(value: &Option<Value>) -> Result<Option<T>, DialectError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(T::deserialize(v)?)),
    }
}

fn required<T: DeserializeOwned>(
    value: &Option<Value>,
    field: &'static str,
) -> Result<T, DialectError> {
    optional(value)?.ok_or_else(|| DialectError::field(field, "missing"))
}

/// Reads [`RawHand`] JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonDialect {
    config: DialectConfig,
}

impl JsonDialect {
    pub fn new(config: DialectConfig) -> Self {
        Self { config }
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self::new(DialectConfig {
            capabilities,
            ..DialectConfig::default()
        })
    }
}

impl Dialect for JsonDialect {
    type Tokens = RawHand;

    fn site(&self) -> &str {
        &self.config.site_name
    }

    fn capabilities(&self) -> Capabilities {
        self.config.capabilities
    }

    fn tokenize(&self, text: &str) -> Result<RawHand, DialectError> {
        Ok(serde_json::from_str(text)?)
    }

    fn hand_id(&self, tokens: &RawHand) -> Result<i64, DialectError> {
        required(&tokens.hand_id, "hand id")
    }

    fn players(&self, tokens: &RawHand) -> Result<PlayerRoster, DialectError> {
        let players: Vec<Player> = required(&tokens.players, "players")?;
        Ok(PlayerRoster::new(players)?)
    }

    fn actions(
        &self,
        tokens: &RawHand,
        _roster: &PlayerRoster,
    ) -> Result<Vec<Action>, DialectError> {
        required(&tokens.actions, "actions")
    }

    fn game_format(&self, tokens: &RawHand) -> Result<Option<GameFormat>, DialectError> {
        optional(&tokens.game_format)
    }

    fn game_type(&self, tokens: &RawHand) -> Result<Option<GameType>, DialectError> {
        optional(&tokens.game_type)
    }

    fn limit(&self, tokens: &RawHand) -> Result<Option<Limit>, DialectError> {
        optional(&tokens.limit)
    }

    fn table_type(&self, tokens: &RawHand) -> Result<Option<TableType>, DialectError> {
        optional(&tokens.table_type)
    }

    fn seat_type(&self, tokens: &RawHand) -> Result<Option<SeatType>, DialectError> {
        optional(&tokens.seat_type)
    }

    fn buyin(&self, tokens: &RawHand) -> Result<Option<Buyin>, DialectError> {
        optional(&tokens.buyin)
    }

    fn table_name(&self, tokens: &RawHand) -> Result<Option<String>, DialectError> {
        optional(&tokens.table_name)
    }

    fn dealer_button_position(&self, tokens: &RawHand) -> Result<Option<u8>, DialectError> {
        optional(&tokens.dealer_button_position)
    }

    fn start_date(&self, tokens: &RawHand) -> Result<Option<DateTime<Utc>>, DialectError> {
        optional(&tokens.start_date)
    }

    fn community_cards(&self, tokens: &RawHand) -> Result<Option<Vec<String>>, DialectError> {
        optional(&tokens.community_cards)
    }

    fn run_it_twice_board(&self, tokens: &RawHand) -> Result<Option<Vec<String>>, DialectError> {
        optional(&tokens.run_it_twice_board)
    }

    fn hero_name(&self, tokens: &RawHand) -> Result<Option<String>, DialectError> {
        optional(&tokens.hero)
    }

    fn is_cancelled(&self, tokens: &RawHand) -> Result<Option<bool>, DialectError> {
        optional(&tokens.cancelled)
    }

    fn reported_pot(&self, tokens: &RawHand) -> Result<Option<Pot>, DialectError> {
        optional(&tokens.pot)
    }

    fn extra(&self, tokens: &RawHand) -> Result<Option<BTreeMap<String, String>>, DialectError> {
        optional(&tokens.extra)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::history::{ActionKind, Currency, Street};
    use crate::parser::{HandField, HandParser};
    use crate::test_util::{action, assert_valid_hand_record, chips};

    use super::*;

    const RAISE_FOLD: &str = r#"{
        "hand_id": 3,
        "players": [
            {"name": "P1", "starting_stack": "20", "seat": 1, "hole_cards": ["Ah", "Kh"]},
            {"name": "P2", "starting_stack": "20", "seat": 4}
        ],
        "actions": [
            {"player": "P1", "kind": "SmallBlind", "amount": "0.1", "street": "Preflop"},
            {"player": "P2", "kind": "BigBlind", "amount": "-0.2", "street": "Preflop"},
            {"player": "P1", "kind": "Call", "amount": "0.1", "street": "Preflop"},
            {"player": "P2", "kind": "Check", "amount": "0", "street": "Preflop"},
            {"player": "P1", "kind": "Check", "amount": "0", "street": "Flop"},
            {"player": "P2", "kind": "Bet", "amount": "0.1", "street": "Flop"},
            {"player": "P1", "kind": "Raise", "amount": "0.6", "street": "Flop"},
            {"player": "P2", "kind": "Fold", "amount": "0", "street": "Flop"},
            {"player": "P1", "kind": "Mucks", "amount": "0", "street": "Showdown"}
        ],
        "game_format": "CashGame",
        "game_type": "NoLimitHoldem",
        "limit": {"small_blind": "0.1", "big_blind": "0.2", "currency": "Usd"},
        "seat_type": {"Max": 6},
        "table_name": "Aludra",
        "dealer_button_position": "seat one",
        "community_cards": ["2c", "7d", "Ts"],
        "hero": "P1",
        "extra": {"tournament_level": "n/a"}
    }"#;

    #[test_log::test]
    fn test_parse_hand_end_to_end() {
        let config = DialectConfig::new(
            "json",
            Capabilities {
                detect_all_ins: true,
                calculate_pot: true,
                fix_uncalled_bet: true,
                ..Capabilities::default()
            },
        );
        let hand = HandParser::new(JsonDialect::new(config))
            .parse(RAISE_FOLD)
            .unwrap();

        assert_valid_hand_record(&hand);
        assert_eq!(hand.hand_id, 3);
        assert_eq!(
            hand.uncalled_bet(),
            Some(&action("P1", ActionKind::UncalledBet, "0.5", Street::Flop).numbered(9))
        );
        assert_eq!(hand.actions[1].amount, chips("-0.2"));
        assert_eq!(hand.total_pot(), Some(chips("0.6")));
        assert_eq!(hand.game.seat_type, SeatType::Max(6));
        assert_eq!(hand.game.table_name, "Aludra");
        assert_eq!(hand.game.dealer_button_position, None);
        assert_eq!(hand.hero_index, Some(0));
        assert_eq!(hand.community_cards.len(), 3);
        assert_eq!(hand.extra.get("tournament_level").map(String::as_str), Some("n/a"));

        assert_eq!(hand.warnings.len(), 1);
        assert_eq!(hand.warnings[0].field, HandField::DealerPosition);
    }

    #[test]
    fn test_reconciled_hand_serializes() {
        let hand = HandParser::new(JsonDialect::with_capabilities(Capabilities::all()))
            .parse(RAISE_FOLD)
            .unwrap();

        let json = serde_json::to_value(&hand).unwrap();
        assert_eq!(json["hand_id"], 3);
        assert_eq!(json["actions"][9]["kind"], "UncalledBet");
        assert_eq!(json["roster"][1]["name"], "P2");
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_parallel_batch_keeps_order() {
        let parser = HandParser::new(JsonDialect::with_capabilities(Capabilities::all()));
        let hands = vec![RAISE_FOLD.to_string(), "not json".to_string(), RAISE_FOLD.to_string()];

        let results = parser.par_parse_batch(&hands);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_required_fields() {
        let dialect = JsonDialect::default();
        let tokens = dialect
            .tokenize(
                r#"{
                    "hand_id": 7,
                    "players": [{"name": "P1", "starting_stack": "5.5", "seat": 2}],
                    "actions": [{"player": "P1", "kind": "Bet", "amount": "2", "street": "Flop"}]
                }"#,
            )
            .unwrap();

        assert_eq!(dialect.hand_id(&tokens).unwrap(), 7);
        let roster = dialect.players(&tokens).unwrap();
        assert_eq!(
            roster.get("P1").map(|p| p.starting_stack),
            Some(Decimal::new(55, 1))
        );
        let actions = dialect.actions(&tokens, &roster).unwrap();
        assert_eq!(actions[0].kind, ActionKind::Bet);
        assert!(!actions[0].is_all_in);
    }

    #[test]
    fn test_missing_hand_id() {
        let dialect = JsonDialect::default();
        let tokens = dialect.tokenize(r#"{"players": []}"#).unwrap();
        assert!(matches!(
            dialect.hand_id(&tokens),
            Err(DialectError::Field { field: "hand id", .. })
        ));
    }

    #[test]
    fn test_optional_fields() {
        let dialect = JsonDialect::default();
        let tokens = dialect
            .tokenize(
                r#"{
                    "limit": {"small_blind": "0.5", "big_blind": "1", "currency": "Eur"},
                    "dealer_button_position": "the third seat",
                    "start_date": "2024-03-01T18:30:00Z"
                }"#,
            )
            .unwrap();

        let limit = dialect.limit(&tokens).unwrap().unwrap();
        assert_eq!(limit.currency, Currency::Eur);
        assert!(!limit.is_ante_table);
        assert!(dialect.dealer_button_position(&tokens).is_err());
        assert!(dialect.start_date(&tokens).unwrap().is_some());
        assert_eq!(dialect.table_name(&tokens).unwrap(), None);
    }

    #[test]
    fn test_duplicate_player_is_a_roster_error() {
        let dialect = JsonDialect::default();
        let tokens = dialect
            .tokenize(
                r#"{"players": [
                    {"name": "P1", "starting_stack": "1", "seat": 1},
                    {"name": "P1", "starting_stack": "1", "seat": 2}
                ]}"#,
            )
            .unwrap();
        assert!(matches!(
            dialect.players(&tokens),
            Err(DialectError::Roster(_))
        ));
    }
}
