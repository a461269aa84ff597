use std::fmt::{self, Display};

use rust_decimal::Decimal;

/// The betting round an action happened on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Street {
    #[default]
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Used for actions the tokenizer could not place on a street.
    Null,
}

impl Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
            Street::Null => write!(f, "Null"),
        }
    }
}

/// Every kind of event a hand history can record.
///
/// The set is closed. Each site dialect maps its own wording onto one of
/// these.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    SmallBlind,
    BigBlind,
    /// A dead or out of position blind posted to enter the game.
    Post,
    Ante,
    Call,
    Check,
    Bet,
    Raise,
    Fold,
    /// Chips handed back to a player because nobody matched them.
    UncalledBet,
    Show,
    Mucks,
    SittingOut,
    Wins,
    WinsSidePot,
}

impl ActionKind {
    /// Chips move from the player's stack into the pot.
    pub fn is_outflow(&self) -> bool {
        matches!(
            self,
            ActionKind::SmallBlind
                | ActionKind::BigBlind
                | ActionKind::Post
                | ActionKind::Ante
                | ActionKind::Call
                | ActionKind::Bet
                | ActionKind::Raise
        )
    }

    /// Chips move from the pot to the player.
    pub fn is_inflow(&self) -> bool {
        matches!(
            self,
            ActionKind::UncalledBet | ActionKind::Wins | ActionKind::WinsSidePot
        )
    }

    /// No chips move at all.
    pub fn is_amountless(&self) -> bool {
        !self.is_outflow() && !self.is_inflow()
    }

    /// Apply this kind's sign convention to the magnitude of `amount`.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        if self.is_outflow() {
            -amount.abs()
        } else if self.is_inflow() {
            amount.abs()
        } else {
            Decimal::ZERO
        }
    }

    pub fn is_game_action(&self) -> bool {
        !matches!(
            self,
            ActionKind::Show | ActionKind::Mucks | ActionKind::SittingOut
        )
    }

    pub fn is_winnings_action(&self) -> bool {
        matches!(self, ActionKind::Wins | ActionKind::WinsSidePot)
    }

    pub fn is_aggressive_action(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::SmallBlind => "small blind",
            ActionKind::BigBlind => "big blind",
            ActionKind::Post => "post",
            ActionKind::Ante => "ante",
            ActionKind::Call => "call",
            ActionKind::Check => "check",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::Fold => "fold",
            ActionKind::UncalledBet => "uncalled bet",
            ActionKind::Show => "show",
            ActionKind::Mucks => "mucks",
            ActionKind::SittingOut => "sitting out",
            ActionKind::Wins => "wins",
            ActionKind::WinsSidePot => "wins side pot",
        };
        write!(f, "{name}")
    }
}

/// One event in a hand.
///
/// `amount` is signed: negative when chips leave the player's stack (blinds,
/// antes, posts, calls, bets, raises) and positive when chips come back
/// (uncalled bets, winnings). Amount-less kinds always carry zero.
///
/// `action_number` is only a position hint until the parser assigns the
/// final dense numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action {
    pub player: String,
    pub kind: ActionKind,
    pub amount: Decimal,
    pub street: Street,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_all_in: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub action_number: usize,
}

impl Action {
    /// Create an action with the sign of `amount` derived from `kind`.
    ///
    /// The magnitude is all that is read from `amount`, so tokenizers can
    /// pass whatever sign the site printed.
    pub fn new(
        player: impl Into<String>,
        kind: ActionKind,
        amount: Decimal,
        street: Street,
    ) -> Self {
        Self {
            player: player.into(),
            kind,
            amount: kind.signed(amount),
            street,
            is_all_in: false,
            action_number: 0,
        }
    }

    /// An action that moves no chips.
    pub fn without_amount(player: impl Into<String>, kind: ActionKind, street: Street) -> Self {
        Self::new(player, kind, Decimal::ZERO, street)
    }

    pub fn all_in(mut self) -> Self {
        self.is_all_in = true;
        self
    }

    pub fn numbered(mut self, action_number: usize) -> Self {
        self.action_number = action_number;
        self
    }

    pub fn is_game_action(&self) -> bool {
        self.kind.is_game_action()
    }

    pub fn is_winnings_action(&self) -> bool {
        self.kind.is_winnings_action()
    }

    pub fn is_aggressive_action(&self) -> bool {
        self.kind.is_aggressive_action()
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} {} {} on {}",
            self.action_number, self.player, self.kind, self.amount, self.street
        )?;
        if self.is_all_in {
            write!(f, " (all-in)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_sign_convention() {
        let call = Action::new("P1", ActionKind::Call, Decimal::new(5, 1), Street::Flop);
        assert_eq!(call.amount, Decimal::new(-5, 1));

        // A site that already printed the outflow as negative is not flipped back.
        let bet = Action::new("P1", ActionKind::Bet, Decimal::new(-2, 0), Street::Turn);
        assert_eq!(bet.amount, Decimal::new(-2, 0));

        let wins = Action::new("P2", ActionKind::Wins, Decimal::new(-7, 0), Street::Showdown);
        assert_eq!(wins.amount, Decimal::new(7, 0));
    }

    #[test]
    fn test_amountless_kinds_carry_zero() {
        let check = Action::new("P1", ActionKind::Check, Decimal::new(3, 0), Street::River);
        assert_eq!(check.amount, Decimal::ZERO);
        assert!(ActionKind::Fold.is_amountless());
        assert!(ActionKind::Show.is_amountless());
    }

    #[test]
    fn test_predicates() {
        assert!(!ActionKind::Show.is_game_action());
        assert!(!ActionKind::Mucks.is_game_action());
        assert!(!ActionKind::SittingOut.is_game_action());
        assert!(ActionKind::Fold.is_game_action());
        assert!(ActionKind::Wins.is_game_action());

        assert!(ActionKind::WinsSidePot.is_winnings_action());
        assert!(!ActionKind::UncalledBet.is_winnings_action());

        assert!(ActionKind::Bet.is_aggressive_action());
        assert!(ActionKind::Raise.is_aggressive_action());
        assert!(!ActionKind::BigBlind.is_aggressive_action());
    }

    #[test]
    fn test_display() {
        let action = Action::new("Hero", ActionKind::Raise, Decimal::new(6, 0), Street::Flop)
            .all_in()
            .numbered(4);
        assert_eq!(action.to_string(), "#4 Hero raise -6 on Flop (all-in)");
    }
}
