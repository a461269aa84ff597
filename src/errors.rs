use std::fmt::{self, Display};

use thiserror::Error;

/// Errors a site dialect reports while tokenizing a hand.
#[derive(Error, Debug)]
pub enum DialectError {
    #[error("Unable to parse {field}: {message}")]
    Field {
        field: &'static str,
        message: String,
    },

    #[error("Invalid roster: {0}")]
    Roster(#[from] RosterError),

    #[cfg(feature = "serde")]
    #[error("Invalid JSON hand: {0}")]
    Json(#[from] serde_json::Error),
}

impl DialectError {
    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        DialectError::Field {
            field,
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum RosterError {
    #[error("Player {0} is seated more than once")]
    DuplicateName(String),
}

/// Errors raised by the reconciliation passes.
///
/// All of these mean the tokenizer handed over data that can't describe a
/// real hand.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum ReconcileError {
    #[error("Action references player {player} who is not in the roster")]
    UnknownPlayer { player: String },

    #[error("Hand has no actions that put chips in the pot")]
    NoRealActions,

    #[error("All-in call by {player} has no bet, raise or big blind to answer")]
    MissingAnchor { player: String },
}

/// The part of the pipeline a fatal error came from.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Stage {
    Tokenize,
    HandId,
    Players,
    Actions,
    ActivePlayers,
    DetectAllIns,
    FixUncalledBet,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Tokenize => "tokenize",
            Stage::HandId => "hand id",
            Stage::Players => "players",
            Stage::Actions => "actions",
            Stage::ActivePlayers => "active players",
            Stage::DetectAllIns => "all-in detection",
            Stage::FixUncalledBet => "uncalled bet fix",
        };
        write!(f, "{name}")
    }
}

/// A hand that could not be turned into a [`crate::history::HandRecord`].
///
/// `input` is the first line of the raw hand text, enough to find the hand
/// again in the source file.
#[derive(Error, Debug)]
pub enum HandParseError {
    #[error("Failed at {stage} stage for hand `{input}`: {source}")]
    Dialect {
        stage: Stage,
        input: String,
        #[source]
        source: DialectError,
    },

    #[error("Hand `{input}` has no players")]
    EmptyRoster { input: String },

    #[error("Hand `{input}` has {active} active players, at least 2 are required")]
    NotEnoughActivePlayers { input: String, active: usize },

    #[error("Failed at {stage} stage for hand `{input}`: {source}")]
    Reconcile {
        stage: Stage,
        input: String,
        #[source]
        source: ReconcileError,
    },
}

impl HandParseError {
    pub fn stage(&self) -> Stage {
        match self {
            HandParseError::Dialect { stage, .. } | HandParseError::Reconcile { stage, .. } => {
                *stage
            }
            HandParseError::EmptyRoster { .. } => Stage::Players,
            HandParseError::NotEnoughActivePlayers { .. } => Stage::ActivePlayers,
        }
    }

    pub fn input(&self) -> &str {
        match self {
            HandParseError::Dialect { input, .. }
            | HandParseError::EmptyRoster { input }
            | HandParseError::NotEnoughActivePlayers { input, .. }
            | HandParseError::Reconcile { input, .. } => input,
        }
    }
}

/// Errors loading a dialect configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_and_input_accessors() {
        let err = HandParseError::Reconcile {
            stage: Stage::FixUncalledBet,
            input: "Hand #42".to_string(),
            source: ReconcileError::NoRealActions,
        };
        assert_eq!(err.stage(), Stage::FixUncalledBet);
        assert_eq!(err.input(), "Hand #42");
        assert_eq!(
            err.to_string(),
            "Failed at uncalled bet fix stage for hand `Hand #42`: \
             Hand has no actions that put chips in the pot"
        );
    }

    #[test]
    fn test_dialect_field_error() {
        let err = DialectError::field("hand id", "no digits");
        assert_eq!(err.to_string(), "Unable to parse hand id: no digits");
    }
}
