//! Transition engine tests - locking, clearing, scoring and game over

use hatetris::core::{ConfigError, CoreState, Piece, PieceDef, RotationSystem, Rules, Well, WellState};
use hatetris::types::Move;

fn spawned(rules: &Rules, id: usize) -> WellState {
    WellState {
        core: CoreState::new(rules.empty_well()),
        piece: Some(rules.spawn(id)),
    }
}

#[test]
fn test_single_row_piece_dropped_to_floor_scores_nothing() {
    let rules = Rules::classic();
    let mut state = spawned(&rules, 3);

    let mut downs = 0;
    while state.piece.is_some() {
        state = rules.apply_move(&state, Move::Down);
        downs += 1;
    }

    // 19 falls plus the blocked D that locks
    assert_eq!(downs, 20);
    assert_eq!(state.score(), 0);
    assert_eq!(state.well().row(19), 0b1111 << 3);
    assert_eq!(state.well().filled_cells(), 4);
    assert!(!rules.is_game_over(state.well()));
}

#[test]
fn test_completed_row_clears_and_shifts() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[17] = 0b10;
    rows[18] = 0b1;
    rows[19] = 0x3ff & !(0b1111 << 3);
    let before = WellState {
        core: CoreState::new(Well::from_rows(rows)),
        piece: Some(Piece { id: 3, x: 3, y: 18, o: 0 }),
    };

    let after = rules.apply_move(&before, Move::Down);

    assert!(after.piece.is_none());
    assert_eq!(after.score(), 1);
    assert_eq!(after.well().depth(), 20);
    assert_eq!(after.well().row(0), 0);
    assert_eq!(after.well().row(19), 0b1);
    assert_eq!(after.well().row(18), 0b10);
    assert_eq!(after.well().filled_cells(), 2);
}

#[test]
fn test_two_rows_cleared_by_one_lock() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    rows[18] = 0x3ff & !0b11;
    rows[19] = 0x3ff & !0b11;
    let core = CoreState::new(Well::from_rows(rows));

    // O fills columns 0 and 1 of the bottom two rows
    let o_piece = Piece { id: 2, x: -1, y: 18, o: 0 };
    assert!(rules.fits(&core.well, &o_piece));
    let locked = rules.lock(&core, &o_piece);

    assert_eq!(locked.score, 2);
    assert_eq!(locked.well, rules.empty_well());
}

#[test]
fn test_blocked_moves_other_than_down_keep_state() {
    let rules = Rules::classic();
    let state = spawned(&rules, 3);

    // I at spawn has no room to stand upright
    assert_eq!(rules.apply_move(&state, Move::Up), state);

    let mut wall = state.clone();
    for _ in 0..3 {
        wall = rules.apply_move(&wall, Move::Left);
    }
    assert_eq!(wall.piece.map(|p| p.x), Some(0));
    assert_eq!(rules.apply_move(&wall, Move::Left), wall);
}

#[test]
fn test_game_over_iff_row_above_bar_filled() {
    let rules = Rules::classic();
    let mut rows = vec![0u32; 20];
    for row in rows.iter_mut().skip(4) {
        *row = 0b1;
    }
    assert!(!rules.is_game_over(&Well::from_rows(rows.clone())));

    rows[3] = 0b1000000000;
    assert!(rules.is_game_over(&Well::from_rows(rows)));
}

#[test]
fn test_spawn_is_centred_and_on_row_zero() {
    let rules = Rules::classic();
    for id in 0..rules.piece_count() {
        let piece = rules.spawn(id);
        assert_eq!((piece.x, piece.o), (3, 0));
        let orientation = rules.orientation(&piece);
        assert_eq!(piece.y + orientation.y_min, 0, "piece {id}");
        assert!(rules.fits(&rules.empty_well(), &piece));
    }

    // odd slack goes to the right half
    let narrow = Rules::new(RotationSystem::standard(), 5, 8, 2).unwrap();
    assert_eq!(narrow.spawn(0).x, 1);
}

#[test]
fn test_custom_rotation_table() {
    let domino = PieceDef::from_rotations('D', &[&[(0, 0), (1, 0)], &[(0, 0), (0, 1)]]).unwrap();
    let rotation = RotationSystem::new(vec![domino]).unwrap();
    assert_eq!(rotation.rotation_count(0), 2);
    assert_eq!(rotation.frame_width(), 2);

    let rules = Rules::new(rotation, 4, 4, 1).unwrap();
    let spawn = rules.spawn(0);
    assert_eq!((spawn.x, spawn.y), (1, 0));
    assert_eq!(rules.reachable_locks(&rules.empty_well(), 0).len(), 7);
}

#[test]
fn test_configuration_errors() {
    assert_eq!(
        RotationSystem::new(Vec::new()).unwrap_err(),
        ConfigError::NoPieces
    );
    let hollow = PieceDef {
        letter: 'X',
        orientations: Vec::new(),
    };
    let err = RotationSystem::new(vec![hollow]).unwrap_err();
    assert_eq!(err, ConfigError::EmptyPiece { piece: 0 });
    assert_eq!(err.code(), "empty_piece");

    let err = Rules::new(RotationSystem::standard(), 10, 3, 4).unwrap_err();
    assert_eq!(err.code(), "depth_below_bar");
    assert_eq!(err.to_string(), "well depth 3 is smaller than bar 4");
}

#[test]
fn test_oversized_custom_pieces_are_errors() {
    // a five-cell vertical bar is one row taller than a row bitmask frame
    let pentomino: Vec<(i32, i32)> = (0..5).map(|y| (1, y)).collect();
    let err = PieceDef::from_rotations('P', &[pentomino.as_slice()]).unwrap_err();
    assert_eq!(err, ConfigError::BadOrientation { x_dim: 1, y_dim: 5 });
    assert_eq!(err.code(), "bad_orientation");

    // cells 32 columns apart cannot share one well row
    let wide = PieceDef::from_rotations('W', &[&[(0, 0), (32, 0)]]).unwrap_err();
    assert_eq!(wide.code(), "bad_orientation");

    let flat = PieceDef::from_rotations('F', &[&[(0, 0), (31, 0)]]).unwrap();
    assert!(Rules::new(RotationSystem::new(vec![flat]).unwrap(), 32, 4, 1).is_ok());
}
