use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::errors::{ConfigError, DialectError};
use crate::history::{
    Action, Buyin, GameFormat, GameType, Limit, PlayerRoster, Pot, SeatType, TableType,
};
use crate::reconcile;

/// Which optional reconciliation passes a site's hand histories need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Capabilities {
    /// The text doesn't list actions in the order they happened.
    pub sort_actions: bool,
    /// Raises are printed as the new street total.
    pub adjust_raises: bool,
    /// All-in isn't printed, so it has to be worked out from stacks.
    pub detect_all_ins: bool,
    /// Pot and rake aren't printed.
    pub calculate_pot: bool,
    /// Uncalled bets aren't printed.
    pub fix_uncalled_bet: bool,
    pub supports_run_it_twice: bool,
}

impl Capabilities {
    /// Every pass on. For sites that print as little as possible.
    pub fn all() -> Self {
        Self {
            sort_actions: true,
            adjust_raises: true,
            detect_all_ins: true,
            calculate_pot: true,
            fix_uncalled_bet: true,
            supports_run_it_twice: true,
        }
    }
}

/// Configuration for a data driven dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialectConfig {
    pub site_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capabilities: Capabilities,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self {
            site_name: "rs_hand_history".to_string(),
            capabilities: Capabilities::default(),
        }
    }
}

impl DialectConfig {
    pub fn new(site_name: impl Into<String>, capabilities: Capabilities) -> Self {
        Self {
            site_name: site_name.into(),
            capabilities,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "site_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a configuration from inline JSON.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DialectConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// A site's hand history format.
///
/// `tokenize` splits one hand's raw text into whatever form the other
/// methods read from. The hand id, roster and actions are required. Every
/// other field is best effort: `Ok(None)` means the site doesn't print it,
/// and an error becomes a warning on the hand record.
///
/// The raise adjustment and pot calculation passes have default
/// implementations that a dialect can replace.
pub trait Dialect {
    type Tokens;

    fn site(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    fn tokenize(&self, text: &str) -> Result<Self::Tokens, DialectError>;

    fn hand_id(&self, tokens: &Self::Tokens) -> Result<i64, DialectError>;

    fn players(&self, tokens: &Self::Tokens) -> Result<PlayerRoster, DialectError>;

    fn actions(
        &self,
        tokens: &Self::Tokens,
        roster: &PlayerRoster,
    ) -> Result<Vec<Action>, DialectError>;

    fn game_format(&self, _tokens: &Self::Tokens) -> Result<Option<GameFormat>, DialectError> {
        Ok(None)
    }

    fn game_type(&self, _tokens: &Self::Tokens) -> Result<Option<GameType>, DialectError> {
        Ok(None)
    }

    fn limit(&self, _tokens: &Self::Tokens) -> Result<Option<Limit>, DialectError> {
        Ok(None)
    }

    fn table_type(&self, _tokens: &Self::Tokens) -> Result<Option<TableType>, DialectError> {
        Ok(None)
    }

    fn seat_type(&self, _tokens: &Self::Tokens) -> Result<Option<SeatType>, DialectError> {
        Ok(None)
    }

    fn buyin(&self, _tokens: &Self::Tokens) -> Result<Option<Buyin>, DialectError> {
        Ok(None)
    }

    fn table_name(&self, _tokens: &Self::Tokens) -> Result<Option<String>, DialectError> {
        Ok(None)
    }

    fn dealer_button_position(&self, _tokens: &Self::Tokens) -> Result<Option<u8>, DialectError> {
        Ok(None)
    }

    fn start_date(&self, _tokens: &Self::Tokens) -> Result<Option<DateTime<Utc>>, DialectError> {
        Ok(None)
    }

    fn community_cards(&self, _tokens: &Self::Tokens) -> Result<Option<Vec<String>>, DialectError> {
        Ok(None)
    }

    /// Only read when the dialect supports run it twice.
    fn run_it_twice_board(
        &self,
        _tokens: &Self::Tokens,
    ) -> Result<Option<Vec<String>>, DialectError> {
        Ok(None)
    }

    fn hero_name(&self, _tokens: &Self::Tokens) -> Result<Option<String>, DialectError> {
        Ok(None)
    }

    fn is_cancelled(&self, _tokens: &Self::Tokens) -> Result<Option<bool>, DialectError> {
        Ok(None)
    }

    /// Pot and rake as printed. Only read when the pot isn't calculated.
    fn reported_pot(&self, _tokens: &Self::Tokens) -> Result<Option<Pot>, DialectError> {
        Ok(None)
    }

    /// Site specific metadata with no home in the common model.
    fn extra(
        &self,
        _tokens: &Self::Tokens,
    ) -> Result<Option<BTreeMap<String, String>>, DialectError> {
        Ok(None)
    }

    fn adjust_raise_sizes(&self, actions: &[Action]) -> Vec<Action> {
        reconcile::adjust_raise_sizes(actions)
    }

    fn calculate_pot(&self, actions: &[Action]) -> Pot {
        let total = reconcile::total_pot(actions);
        Pot {
            total,
            rake: reconcile::rake(actions, total),
        }
    }
}
