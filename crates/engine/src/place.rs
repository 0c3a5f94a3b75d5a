//! Placement planning: choose a lock for the live piece and the moves that
//! reach it.

use std::fmt;

use hatetris_core::{CoreState, Fitness, Rules, WellState};

use crate::types::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    NoActive,
    Unreachable,
    NotPlayable,
}

impl PlanError {
    pub fn code(self) -> &'static str {
        match self {
            PlanError::NoActive | PlanError::Unreachable => "invalid_place",
            PlanError::NotPlayable => "not_playable",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlanError::NoActive => "no active piece",
            PlanError::Unreachable => "live piece has no reachable lock",
            PlanError::NotPlayable => "game is not playable",
        }
    }
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlanError {}

/// A chosen lock and the move sequence that produces it. The last move is
/// always the locking `D`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub moves: Vec<Move>,
    pub outcome: CoreState,
    pub badness: u32,
}

/// Pick the reachable lock with the lowest badness for the live piece.
/// Ties go to the lock discovered first.
pub fn plan_placement<F: Fitness + ?Sized>(
    rules: &Rules,
    state: &WellState,
    fitness: &F,
) -> Result<Plan, PlanError> {
    let Some(piece) = state.piece else {
        return Err(PlanError::NoActive);
    };

    let tree = rules.search(&state.core, piece);
    let mut best: Option<(usize, u32)> = None;
    for (index, outcome) in tree.outcomes().iter().enumerate() {
        let badness = fitness.badness(rules, outcome);
        if best.map_or(true, |(_, b)| badness < b) {
            best = Some((index, badness));
        }
    }

    let (index, badness) = best.ok_or(PlanError::Unreachable)?;
    let moves = tree.path_to_outcome(index).ok_or(PlanError::Unreachable)?;
    Ok(Plan {
        moves,
        outcome: tree.outcomes()[index].clone(),
        badness,
    })
}
