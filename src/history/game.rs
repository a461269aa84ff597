use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameFormat {
    CashGame,
    SitAndGo,
    MultiTableTournament,
    #[default]
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameType {
    NoLimitHoldem,
    FixedLimitHoldem,
    PotLimitHoldem,
    PotLimitOmaha,
    PotLimitOmahaHiLo,
    FixedLimitOmahaHiLo,
    CapNoLimitHoldem,
    #[default]
    Unknown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Any currency, used for the default limit.
    #[default]
    All,
    Usd,
    Eur,
    Gbp,
    Chips,
}

impl Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::All => write!(f, "any"),
            Currency::Usd => write!(f, "USD"),
            Currency::Eur => write!(f, "EUR"),
            Currency::Gbp => write!(f, "GBP"),
            Currency::Chips => write!(f, "chips"),
        }
    }
}

/// The stakes of the game.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Limit {
    pub small_blind: Decimal,
    pub big_blind: Decimal,
    pub currency: Currency,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_ante_table: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ante: Decimal,
}

impl Limit {
    pub fn new(small_blind: Decimal, big_blind: Decimal, currency: Currency) -> Self {
        Self {
            small_blind,
            big_blind,
            currency,
            is_ante_table: false,
            ante: Decimal::ZERO,
        }
    }

    /// The "any/any" limit used when the stakes couldn't be read.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_any(&self) -> bool {
        self.small_blind.is_zero() && self.big_blind.is_zero() && self.currency == Currency::All
    }
}

impl Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_any() {
            return write!(f, "any/any");
        }
        write!(f, "{}/{} {}", self.small_blind, self.big_blind, self.currency)?;
        if self.is_ante_table {
            write!(f, " ante {}", self.ante)?;
        }
        Ok(())
    }
}

/// Table attributes a site advertises. A table can have several.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableTypeDescriptor {
    Regular,
    Speed,
    Zoom,
    Cap,
    Deep,
    Shallow,
    Jackpot,
    PushFold,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableType(pub Vec<TableTypeDescriptor>);

impl TableType {
    pub fn contains(&self, descriptor: TableTypeDescriptor) -> bool {
        self.0.contains(&descriptor)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SeatType {
    #[default]
    AllSeats,
    /// Table with a fixed number of seats.
    Max(u8),
}

impl Display for SeatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeatType::AllSeats => write!(f, "all seats"),
            SeatType::Max(seats) => write!(f, "{seats}-max"),
        }
    }
}

/// Tournament entry cost.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Buyin {
    pub prize_pool: Decimal,
    pub rake: Decimal,
    pub currency: Currency,
}

/// What game was played and where.
///
/// Every field here is best effort. A dialect that can't read one gets the
/// default and a warning on the hand record.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameDescriptor {
    pub site: String,
    pub format: GameFormat,
    pub game_type: GameType,
    pub limit: Limit,
    pub table_type: TableType,
    pub seat_type: SeatType,
    pub buyin: Option<Buyin>,
    pub table_name: String,
    pub dealer_button_position: Option<u8>,
    pub start_date: Option<DateTime<Utc>>,
}
