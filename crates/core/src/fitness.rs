//! Badness metrics for locked wells.
//!
//! Lower is better for the player. Selectors rank every reachable lock with a
//! [`Fitness`] and compare pieces by their best (lowest) value.

use crate::rules::Rules;
use crate::well::{CoreState, Well};

/// Pure, deterministic ranking of a post-lock state.
pub trait Fitness: Send + Sync {
    fn badness(&self, rules: &Rules, core: &CoreState) -> u32;
}

/// Stack shape features computed straight from the row bitmasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StackFeatures {
    /// Rows from the floor up to and including the topmost filled row.
    pub max_height: u32,
    /// Empty cells with a filled cell somewhere above them in the same column.
    pub holes: u32,
}

impl StackFeatures {
    pub fn of(well: &Well) -> Self {
        let max_height = well
            .top_filled_row()
            .map_or(0, |top| (well.depth() - top) as u32);

        let mut covered = 0u32;
        let mut holes = 0u32;
        for &row in well.rows() {
            holes += (covered & !row).count_ones();
            covered |= row;
        }

        Self { max_height, holes }
    }
}

/// Height of the stack. The classic adversary metric.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackHeight;

impl Fitness for StackHeight {
    fn badness(&self, _rules: &Rules, core: &CoreState) -> u32 {
        StackFeatures::of(&core.well).max_height
    }
}

/// Stack height plus a penalty for every covered hole.
#[derive(Debug, Clone, Copy)]
pub struct HolesAndHeight {
    pub hole_weight: u32,
}

impl Default for HolesAndHeight {
    fn default() -> Self {
        Self { hole_weight: 2 }
    }
}

impl Fitness for HolesAndHeight {
    fn badness(&self, _rules: &Rules, core: &CoreState) -> u32 {
        let features = StackFeatures::of(&core.well);
        features
            .max_height
            .saturating_add(features.holes.saturating_mul(self.hole_weight))
    }
}

impl<F: Fitness + ?Sized> Fitness for Box<F> {
    fn badness(&self, rules: &Rules, core: &CoreState) -> u32 {
        (**self).badness(rules, core)
    }
}
