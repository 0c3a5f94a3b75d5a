//! Property tests for the rules, the search and the timeline.
//!
//! Invariants covered:
//! - history and move log stay aligned under any mix of moves, undo and redo
//! - scores never decrease along a history
//! - `GameOver` mode matches the terminal test on the current state, and a
//!   live piece always fits, including wells with a low bar
//! - a move log replays to the same history it was recorded from
//! - every lock outcome conserves cells: four added, a full row per point removed
//! - selectors are total and repeatable on arbitrary wells

use proptest::prelude::*;

use hatetris::core::{
    Hatetris, Lovetris, PieceSelector, RotationSystem, Rules, SeededRandom, StackHeight,
    Timeline, Well,
};
use hatetris::replay::{decode, encode};
use hatetris::types::{Mode, Move, BAR, WELL_DEPTH, WELL_WIDTH};

#[derive(Debug, Clone, Copy)]
enum Op {
    Move(Move),
    Undo,
    Redo,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..4).prop_map(|i| Op::Move(Move::from_index(i))),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

fn moves(max: usize) -> impl Strategy<Value = Vec<Move>> {
    prop::collection::vec((0u8..4).prop_map(Move::from_index), 0..max)
}

/// Wells with arbitrary rubble below the bar and nothing above it.
fn rubble_well() -> impl Strategy<Value = Well> {
    let below = (WELL_DEPTH - BAR) as usize;
    prop::collection::vec(0u32..(1 << WELL_WIDTH), below).prop_map(|rubble| {
        let mut rows = vec![0u32; BAR as usize];
        rows.extend(rubble);
        Well::from_rows(rows)
    })
}

fn check_timeline(timeline: &Timeline) {
    let history = timeline.history();
    assert_eq!(history.len(), timeline.moves().len() + 1);

    let position = timeline.position().unwrap();
    assert!(position < history.len());

    for pair in history.windows(2) {
        assert!(pair[1].score() >= pair[0].score());
    }

    let current = timeline.current().unwrap();
    let rules = timeline.rules();
    let terminal = rules.is_terminal(current);
    assert_eq!(terminal, timeline.mode() == Mode::GameOver);
    if rules.is_game_over(current.well()) {
        assert!(terminal);
    }
    match current.piece {
        Some(piece) => assert!(rules.fits(current.well(), &piece)),
        None => assert!(terminal),
    }
}

/// Small wells whose bar can sit right on top of the spawn rows.
fn small_rules() -> impl Strategy<Value = Rules> {
    (4u32..=8, 1u32..=3, 0u32..=5).prop_map(|(width, bar, extra)| {
        Rules::new(RotationSystem::standard(), width, bar + extra, bar).unwrap()
    })
}

fn run_ops(timeline: &mut Timeline, ops: Vec<Op>) {
    for op in ops {
        let _ = match op {
            Op::Move(mv) => timeline.apply_move(mv),
            Op::Undo => timeline.undo(),
            Op::Redo => timeline.redo(),
        };
        check_timeline(timeline);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn timeline_invariants_hold_under_random_input(
        seed in any::<u32>(),
        ops in prop::collection::vec(op(), 0..300),
    ) {
        let mut timeline = Timeline::new(Rules::classic(), Box::new(SeededRandom { seed }));
        timeline.start();
        check_timeline(&timeline);
        run_ops(&mut timeline, ops);
    }

    #[test]
    fn low_bar_wells_never_keep_a_blocked_piece(
        rules in small_rules(),
        seed in any::<u32>(),
        hateful in any::<bool>(),
        ops in prop::collection::vec(op(), 0..200),
    ) {
        let selector: Box<dyn PieceSelector> = if hateful {
            Box::new(Hatetris::<StackHeight>::default())
        } else {
            Box::new(SeededRandom { seed })
        };
        let mut timeline = Timeline::new(rules, selector);
        timeline.start();
        check_timeline(&timeline);
        run_ops(&mut timeline, ops);
    }

    #[test]
    fn move_log_replays_to_the_same_history(
        seed in any::<u32>(),
        log in moves(400),
    ) {
        let mut played = Timeline::new(Rules::classic(), Box::new(SeededRandom { seed }));
        played.start();
        for &mv in &log {
            if played.apply_move(mv).is_err() {
                break;
            }
        }

        let mut replayed = Timeline::new(Rules::classic(), Box::new(SeededRandom { seed }));
        replayed.load_moves(played.moves().to_vec());
        replayed.run_replay_to_end();

        prop_assert_eq!(replayed.history(), played.history());
        prop_assert_eq!(replayed.mode(), played.mode());
    }

    #[test]
    fn encoded_replay_keeps_every_move(log in moves(200)) {
        let decoded = decode(&encode(&log));
        prop_assert_eq!(decoded.len(), log.len() + log.len() % 2);
        prop_assert_eq!(&decoded[..log.len()], &log[..]);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn lock_outcomes_conserve_cells(well in rubble_well(), id in 0usize..7) {
        let rules = Rules::classic();
        let before = well.filled_cells();
        for outcome in rules.reachable_locks(&well, id) {
            prop_assert!(outcome.score <= 4);
            prop_assert_eq!(
                outcome.well.filled_cells() + outcome.score * WELL_WIDTH,
                before + 4
            );
            prop_assert_eq!(outcome.well.depth(), well.depth());
        }
    }

    #[test]
    fn selectors_are_total_and_repeatable(well in rubble_well(), seed in any::<u32>()) {
        let rules = Rules::classic();
        let selectors: Vec<Box<dyn PieceSelector>> = vec![
            Box::new(Hatetris::<StackHeight>::default()),
            Box::new(Lovetris::<StackHeight>::default()),
            Box::new(SeededRandom { seed }),
        ];
        for selector in &selectors {
            let id = selector.select_piece(&rules, &well);
            prop_assert!(id < rules.piece_count());
            prop_assert_eq!(selector.select_piece(&rules, &well), id);
        }
    }
}
