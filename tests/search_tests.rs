//! Reachability search tests

use std::collections::HashSet;

use hatetris::core::{CoreState, Piece, Rules, Well, WellState};
use hatetris::types::Move;

fn replay_path(rules: &Rules, core: &CoreState, start: Piece, path: &[Move]) -> WellState {
    let mut state = WellState {
        core: core.clone(),
        piece: Some(start),
    };
    for &mv in path {
        state = rules.apply_move(&state, mv);
    }
    state
}

#[test]
fn test_empty_well_outcome_counts() {
    let rules = Rules::classic();
    let well = rules.empty_well();

    // O: one orientation, nine columns. I: ten upright plus seven flat.
    assert_eq!(rules.reachable_locks(&well, 2).len(), 9);
    assert_eq!(rules.reachable_locks(&well, 3).len(), 17);
}

#[test]
fn test_outcomes_are_distinct_and_scored_from_zero() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[19] = 0x3ff & !0b1111;
    let well = Well::from_rows(rows);

    let outcomes = rules.reachable_locks(&well, 3);
    let unique: HashSet<&CoreState> = outcomes.iter().collect();
    assert_eq!(unique.len(), outcomes.len());

    // the flat I dropped into the gap is the only clearing outcome
    let clears: Vec<&CoreState> = outcomes.iter().filter(|c| c.score > 0).collect();
    assert_eq!(clears.len(), 1);
    assert_eq!(clears[0].score, 1);
    assert_eq!(clears[0].well, rules.empty_well());
}

#[test]
fn test_every_outcome_has_a_replayable_path() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[19] = 0b1110011111;
    rows[18] = 0b1000000001;
    let core = CoreState::new(Well::from_rows(rows));

    for id in 0..rules.piece_count() {
        let start = rules.spawn(id);
        let tree = rules.search(&core, start);
        assert!(!tree.outcomes().is_empty());

        for (index, outcome) in tree.outcomes().iter().enumerate() {
            let path = tree.path_to_outcome(index).unwrap();
            assert_eq!(path.last(), Some(&Move::Down));

            let end = replay_path(&rules, &core, start, &path);
            assert!(end.piece.is_none());
            assert_eq!(&end.core, outcome, "piece {id} outcome {index}");
        }
        assert_eq!(tree.path_to_outcome(tree.outcomes().len()), None);
    }
}

#[test]
fn test_visited_poses_are_unique_and_bounded() {
    let rules = Rules::classic();
    let core = CoreState::new(rules.empty_well());

    for id in 0..rules.piece_count() {
        let tree = rules.search(&core, rules.spawn(id));
        let poses: HashSet<&Piece> = tree.poses().collect();
        assert_eq!(poses.len(), tree.pose_count());

        let bound = 13 * 20 * rules.rotation().rotation_count(id);
        assert!(tree.pose_count() <= bound);
        assert!(tree.locks().len() >= tree.outcomes().len());
    }
}

#[test]
fn test_invalid_start_yields_nothing() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[0] = 0x3ff;
    let core = CoreState::new(Well::from_rows(rows));

    let tree = rules.search(&core, rules.spawn(0));
    assert_eq!(tree.pose_count(), 0);
    assert!(tree.outcomes().is_empty());
    assert!(rules.explore(&core, rules.spawn(6)).is_empty());
}
