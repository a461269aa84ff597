use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use rs_hand_history::history::{Action, ActionKind, Player, PlayerRoster, Street};
use rs_hand_history::reconcile::{classify_all_ins, fix_uncalled_bet, total_pot};

const STARTING_STACK: i64 = 10_000;

/// A ring game hand where everyone limps and then checks and bets every
/// street, with the last bet going uncalled.
fn build_hand(num_players: usize) -> (PlayerRoster, Vec<Action>) {
    let names: Vec<String> = (0..num_players).map(|idx| format!("Player{idx}")).collect();
    let roster = PlayerRoster::new(
        names
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                Player::new(name.clone(), Decimal::new(STARTING_STACK, 0), idx as u8 + 1)
            })
            .collect(),
    )
    .unwrap();

    let mut actions = vec![
        Action::new(&names[0], ActionKind::SmallBlind, Decimal::new(50, 0), Street::Preflop),
        Action::new(&names[1], ActionKind::BigBlind, Decimal::new(100, 0), Street::Preflop),
    ];
    for name in names.iter().skip(2) {
        actions.push(Action::new(name, ActionKind::Call, Decimal::new(100, 0), Street::Preflop));
    }
    actions.push(Action::new(&names[0], ActionKind::Call, Decimal::new(50, 0), Street::Preflop));
    actions.push(Action::without_amount(&names[1], ActionKind::Check, Street::Preflop));

    for street in [Street::Flop, Street::Turn] {
        actions.push(Action::new(&names[0], ActionKind::Bet, Decimal::new(200, 0), street));
        for name in names.iter().skip(1) {
            actions.push(Action::new(name, ActionKind::Call, Decimal::new(200, 0), street));
        }
    }
    actions.push(Action::new(&names[0], ActionKind::Bet, Decimal::new(900, 0), Street::River));
    for name in names.iter().skip(1) {
        actions.push(Action::without_amount(name, ActionKind::Fold, Street::River));
    }

    (roster, actions)
}

fn reconcile_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for num_players in [2, 6, 9] {
        let (roster, actions) = build_hand(num_players);

        group.bench_with_input(
            BenchmarkId::new("classify_all_ins", num_players),
            &(&roster, &actions),
            |b, (roster, actions)| b.iter(|| classify_all_ins(roster, actions).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("fix_uncalled_bet", num_players),
            &actions,
            |b, actions| b.iter(|| fix_uncalled_bet(actions).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("total_pot", num_players),
            &actions,
            |b, actions| b.iter(|| total_pot(actions)),
        );
    }
    group.finish();
}

criterion_group!(benches, reconcile_benchmark);
criterion_main!(benches);
