use std::collections::HashSet;

use crate::history::{Action, ActionKind, GameFormat, Limit, PlayerRoster};

/// Mark a cash game limit as an ante table when any ante was posted.
///
/// The ante value is taken from the first ante. Tournament antes change
/// from level to level so they are not recorded on the limit.
pub fn detect_ante(format: GameFormat, limit: &Limit, actions: &[Action]) -> Limit {
    let mut limit = limit.clone();
    if format != GameFormat::CashGame {
        return limit;
    }

    if let Some(ante) = actions.iter().find(|a| a.kind == ActionKind::Ante) {
        limit.is_ante_table = true;
        limit.ante = ante.amount.abs();
    }
    limit
}

/// Mark every player without a single game action as sitting out.
///
/// Players the tokenizer already flagged stay flagged.
pub fn mark_sitting_out(roster: &PlayerRoster, actions: &[Action]) -> PlayerRoster {
    let acted: HashSet<&str> = actions
        .iter()
        .filter(|a| a.is_game_action())
        .map(|a| a.player.as_str())
        .collect();

    let mut marked = roster.clone();
    for player in roster {
        if !acted.contains(player.name.as_str()) {
            if let Some(p) = marked.get_mut(&player.name) {
                p.is_sitting_out = true;
            }
        }
    }
    marked
}
