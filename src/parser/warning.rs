use std::fmt::{self, Display};

/// Hand fields that are read best effort.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandField {
    GameFormat,
    GameType,
    Limit,
    TableType,
    SeatType,
    Buyin,
    TableName,
    DealerPosition,
    Date,
    CommunityCards,
    RunItTwice,
    Hero,
    Pot,
    Cancelled,
    Extra,
}

impl Display for HandField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandField::GameFormat => "game format",
            HandField::GameType => "game type",
            HandField::Limit => "limit",
            HandField::TableType => "table type",
            HandField::SeatType => "seat type",
            HandField::Buyin => "buyin",
            HandField::TableName => "table name",
            HandField::DealerPosition => "dealer position",
            HandField::Date => "date",
            HandField::CommunityCards => "community cards",
            HandField::RunItTwice => "run it twice board",
            HandField::Hero => "hero",
            HandField::Pot => "pot",
            HandField::Cancelled => "cancelled flag",
            HandField::Extra => "extra metadata",
        };
        write!(f, "{name}")
    }
}

/// A field that failed to parse and was replaced by its default.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseWarning {
    pub field: HandField,
    pub message: String,
}

impl ParseWarning {
    pub fn new(field: HandField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
