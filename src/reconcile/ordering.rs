use crate::history::Action;

/// Re-apply the sign convention to every amount.
///
/// Tokenizers may build actions directly and print amounts with whatever
/// sign the site used.
pub fn normalize_signs(actions: &[Action]) -> Vec<Action> {
    actions
        .iter()
        .map(|a| Action {
            amount: a.kind.signed(a.amount),
            ..a.clone()
        })
        .collect()
}

/// Stable sort by the tokenizer's `action_number` hint.
///
/// For sites whose text doesn't list actions in the order they happened.
/// Actions with equal hints keep their relative order.
pub fn sort_actions(actions: &[Action]) -> Vec<Action> {
    let mut sorted = actions.to_vec();
    sorted.sort_by_key(|a| a.action_number);
    sorted
}

/// Number actions densely from zero in list order.
pub fn assign_action_numbers(actions: &[Action]) -> Vec<Action> {
    actions
        .iter()
        .enumerate()
        .map(|(idx, a)| a.clone().numbered(idx))
        .collect()
}
