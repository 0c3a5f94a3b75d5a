//! Piece selection strategies.
//!
//! Selectors are pure functions of the rules and the well. Timelines hold one
//! as a `Box<dyn PieceSelector>` and call it whenever a piece locks.
//!
//! # Ranking
//!
//! For each piece type, the reachability search yields every lock outcome.
//! The piece's *best case* is the lowest badness among them, or `u32::MAX`
//! when the piece cannot even spawn. [`Hatetris`] sends the piece with the
//! highest best case, [`Lovetris`] the lowest. Ties go to the lowest piece id.

use log::debug;

use crate::fitness::{Fitness, StackHeight};
use crate::rng::SimpleRng;
use crate::rules::Rules;
use crate::types::PieceId;
use crate::well::Well;

pub trait PieceSelector: Send + Sync {
    fn select_piece(&self, rules: &Rules, well: &Well) -> PieceId;

    fn name(&self) -> &'static str;
}

/// Lowest badness over every lock `piece_id` can reach from its spawn.
pub fn best_case<F: Fitness + ?Sized>(rules: &Rules, well: &Well, piece_id: PieceId, fitness: &F) -> u32 {
    rules
        .reachable_locks(well, piece_id)
        .iter()
        .map(|outcome| fitness.badness(rules, outcome))
        .min()
        .unwrap_or(u32::MAX)
}

/// Best case of every piece, indexed by piece id.
pub fn best_cases<F: Fitness + ?Sized>(rules: &Rules, well: &Well, fitness: &F) -> Vec<u32> {
    (0..rules.piece_count())
        .map(|id| best_case(rules, well, id, fitness))
        .collect()
}

/// Sends the piece whose best placement leaves the worst well.
#[derive(Debug, Clone)]
pub struct Hatetris<F = StackHeight> {
    pub fitness: F,
}

impl<F: Fitness> Hatetris<F> {
    pub fn new(fitness: F) -> Self {
        Self { fitness }
    }
}

impl Default for Hatetris {
    fn default() -> Self {
        Self::new(StackHeight)
    }
}

impl<F: Fitness> PieceSelector for Hatetris<F> {
    fn select_piece(&self, rules: &Rules, well: &Well) -> PieceId {
        let scores = best_cases(rules, well, &self.fitness);
        let mut chosen = 0;
        for (id, &score) in scores.iter().enumerate() {
            if score > scores[chosen] {
                chosen = id;
            }
        }
        debug!("hatetris chose piece {} (best cases {:?})", chosen, scores);
        chosen
    }

    fn name(&self) -> &'static str {
        "hatetris"
    }
}

/// Sends the piece whose best placement leaves the kindest well.
#[derive(Debug, Clone)]
pub struct Lovetris<F = StackHeight> {
    pub fitness: F,
}

impl<F: Fitness> Lovetris<F> {
    pub fn new(fitness: F) -> Self {
        Self { fitness }
    }
}

impl Default for Lovetris {
    fn default() -> Self {
        Self::new(StackHeight)
    }
}

impl<F: Fitness> PieceSelector for Lovetris<F> {
    fn select_piece(&self, rules: &Rules, well: &Well) -> PieceId {
        let scores = best_cases(rules, well, &self.fitness);
        let mut chosen = 0;
        for (id, &score) in scores.iter().enumerate() {
            if score < scores[chosen] {
                chosen = id;
            }
        }
        debug!("lovetris chose piece {} (best cases {:?})", chosen, scores);
        chosen
    }

    fn name(&self) -> &'static str {
        "lovetris"
    }
}

/// Always the same piece. Ids past the end of the table clamp to the last one.
#[derive(Debug, Clone, Copy)]
pub struct FixedPiece(pub PieceId);

impl PieceSelector for FixedPiece {
    fn select_piece(&self, rules: &Rules, _well: &Well) -> PieceId {
        self.0.min(rules.piece_count() - 1)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Pseudo-random pieces derived from the seed and the well contents.
#[derive(Debug, Clone, Copy)]
pub struct SeededRandom {
    pub seed: u32,
}

impl PieceSelector for SeededRandom {
    fn select_piece(&self, rules: &Rules, well: &Well) -> PieceId {
        let mut rng = SimpleRng::new(self.seed);
        for &row in well.rows() {
            rng.mix(row);
        }
        rng.next_range(rules.piece_count() as u32) as PieceId
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::HolesAndHeight;
    use crate::rotation::RotationSystem;

    #[test]
    fn test_every_piece_is_equal_on_empty_well() {
        let rules = Rules::classic();
        let well = rules.empty_well();
        let scores = best_cases(&rules, &well, &StackHeight);
        // I lies flat (height 1), the rest need two rows
        assert_eq!(scores, vec![2, 2, 2, 1, 2, 2, 2]);
        assert_eq!(Hatetris::default().select_piece(&rules, &well), 0);
        assert_eq!(Lovetris::default().select_piece(&rules, &well), 3);
    }

    #[test]
    fn test_immediate_loss_counts_as_worst() {
        let rules = Rules::classic();
        let mut rows = vec![0; 20];
        rows[0] = 0x3ff;
        let well = Well::from_rows(rows);
        assert_eq!(best_case(&rules, &well, 0, &StackHeight), u32::MAX);
        // every piece is a loss, so the first one wins the tie
        assert_eq!(Hatetris::default().select_piece(&rules, &well), 0);
        assert_eq!(Lovetris::default().select_piece(&rules, &well), 0);
    }

    #[test]
    fn test_hatetris_prefers_piece_that_cannot_fill_gap() {
        let rules = Rules::new(RotationSystem::standard(), 4, 8, 4).unwrap();
        let mut rows = vec![0; 8];
        rows[7] = 0b0111;
        let well = Well::from_rows(rows);

        let scores = best_cases(&rules, &well, &StackHeight);
        let hate = Hatetris::default().select_piece(&rules, &well);
        let love = Lovetris::default().select_piece(&rules, &well);
        assert_eq!(scores[hate], *scores.iter().max().unwrap());
        assert_eq!(scores[love], *scores.iter().min().unwrap());
        assert!(scores[love] < scores[hate]);
    }

    #[test]
    fn test_selectors_are_deterministic() {
        let rules = Rules::classic();
        let mut rows = vec![0; 20];
        rows[19] = 0b1101111011;
        rows[18] = 0b0100000001;
        let well = Well::from_rows(rows);

        let selectors: Vec<Box<dyn PieceSelector>> = vec![
            Box::new(Hatetris::default()),
            Box::new(Hatetris::new(HolesAndHeight::default())),
            Box::new(Lovetris::default()),
            Box::new(SeededRandom { seed: 42 }),
        ];
        for selector in &selectors {
            let first = selector.select_piece(&rules, &well);
            for _ in 0..3 {
                assert_eq!(selector.select_piece(&rules, &well), first, "{}", selector.name());
            }
            assert!(first < rules.piece_count());
        }
    }

    #[test]
    fn test_default_selectors_rank_by_stack_height() {
        let rules = Rules::new(RotationSystem::standard(), 4, 8, 4).unwrap();
        let mut rows = vec![0; 8];
        rows[7] = 0b1011;
        let well = Well::from_rows(rows);

        let hate = Hatetris::default();
        let love = Lovetris::default();
        assert_eq!(
            hate.select_piece(&rules, &well),
            Hatetris::new(StackHeight).select_piece(&rules, &well)
        );
        assert_eq!(
            love.select_piece(&rules, &well),
            Lovetris::new(StackHeight).select_piece(&rules, &well)
        );
        assert_eq!((hate.name(), love.name()), ("hatetris", "lovetris"));
    }

    #[test]
    fn test_fixed_piece_clamps() {
        let rules = Rules::classic();
        let well = rules.empty_well();
        assert_eq!(FixedPiece(4).select_piece(&rules, &well), 4);
        assert_eq!(FixedPiece(40).select_piece(&rules, &well), 6);
    }
}
