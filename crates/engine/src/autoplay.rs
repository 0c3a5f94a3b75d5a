//! Autoplay: drive a timeline with planned placements.

use log::debug;

use hatetris_core::{Fitness, Timeline};

use crate::place::{plan_placement, PlanError};
use crate::types::Mode;

/// Summary of an autoplay run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoplayReport {
    pub pieces_placed: usize,
    pub moves_applied: usize,
    pub final_score: u32,
    pub game_over: bool,
}

/// Place up to `max_pieces` pieces, stopping early on game over.
///
/// Fails with [`PlanError::NotPlayable`] on a timeline that has not started.
pub fn autoplay<F: Fitness + ?Sized>(
    timeline: &mut Timeline,
    fitness: &F,
    max_pieces: usize,
) -> Result<AutoplayReport, PlanError> {
    if timeline.mode() == Mode::NotStarted {
        return Err(PlanError::NotPlayable);
    }

    let mut report = AutoplayReport::default();
    while report.pieces_placed < max_pieces && timeline.mode().accepts_moves() {
        let state = timeline.current().ok_or(PlanError::NoActive)?;
        let plan = plan_placement(timeline.rules(), state, fitness)?;

        for mv in &plan.moves {
            timeline
                .apply_move(*mv)
                .map_err(|_| PlanError::NotPlayable)?;
        }
        report.pieces_placed += 1;
        report.moves_applied += plan.moves.len();
        debug!(
            "placed piece {} with {} moves, score {}",
            report.pieces_placed,
            plan.moves.len(),
            timeline.score()
        );
    }

    report.final_score = timeline.score();
    report.game_over = timeline.mode() == Mode::GameOver;
    Ok(report)
}
