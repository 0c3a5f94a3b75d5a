//! Transition engine - collision, locking, line clearing and scoring
//!
//! [`Rules`] bundles the validated well geometry with a rotation table. All
//! transitions are pure: they take a state by reference and return a new one.
//!
//! # Line Clearing
//!
//! Only rows at index `bar` or below are eligible. Rows above the bar can be
//! complete without ever clearing; a filled cell in row `bar - 1` ends the
//! game instead.

use crate::error::ConfigError;
use crate::rotation::{Orientation, RotationSystem};
use crate::types::{Move, PieceId, BAR, MAX_WELL_WIDTH, MIN_WELL_WIDTH, WELL_DEPTH, WELL_WIDTH};
use crate::well::{CoreState, Piece, Well, WellState};

#[derive(Debug, Clone)]
pub struct Rules {
    rotation: RotationSystem,
    width: u32,
    depth: u32,
    bar: u32,
    full_row: u32,
}

impl Rules {
    pub fn new(
        rotation: RotationSystem,
        width: u32,
        depth: u32,
        bar: u32,
    ) -> Result<Self, ConfigError> {
        if rotation.is_empty() {
            return Err(ConfigError::NoPieces);
        }
        if bar == 0 {
            return Err(ConfigError::BarAtTop);
        }
        if depth < bar {
            return Err(ConfigError::DepthBelowBar { depth, bar });
        }
        if width < MIN_WELL_WIDTH {
            return Err(ConfigError::WellTooNarrow { width });
        }
        if width > MAX_WELL_WIDTH {
            return Err(ConfigError::WellTooWide { width });
        }

        Ok(Self {
            rotation,
            width,
            depth,
            bar,
            full_row: full_row_mask(width),
        })
    }

    /// Standard tetrominoes in a 10x20 well with the bar at row 4.
    pub fn classic() -> Self {
        Self {
            rotation: RotationSystem::standard(),
            width: WELL_WIDTH,
            depth: WELL_DEPTH,
            bar: BAR,
            full_row: full_row_mask(WELL_WIDTH),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn bar(&self) -> u32 {
        self.bar
    }

    pub fn rotation(&self) -> &RotationSystem {
        &self.rotation
    }

    pub fn piece_count(&self) -> usize {
        self.rotation.len()
    }

    pub fn empty_well(&self) -> Well {
        Well::empty(self.depth)
    }

    pub fn orientation(&self, piece: &Piece) -> &Orientation {
        self.rotation.orientation(piece.id, piece.o)
    }

    pub fn spawn(&self, id: PieceId) -> Piece {
        self.rotation.spawn(self.width, id)
    }

    /// Whether `piece` lies inside the well without overlapping filled cells.
    pub fn fits(&self, well: &Well, piece: &Piece) -> bool {
        let orientation = self.orientation(piece);
        let x = piece.x + orientation.x_min;
        let y = piece.y + orientation.y_min;

        if x < 0 || y < 0 {
            return false;
        }
        if x as u32 + orientation.x_dim > self.width || y as u32 + orientation.y_dim > self.depth {
            return false;
        }

        orientation
            .rows
            .iter()
            .enumerate()
            .all(|(dy, &bits)| (bits << x) & well.row(y as usize + dy) == 0)
    }

    /// The candidate pose for `mv`, if it fits.
    pub fn try_move(&self, well: &Well, piece: &Piece, mv: Move) -> Option<Piece> {
        let mut next = *piece;
        match mv {
            Move::Left => next.x -= 1,
            Move::Right => next.x += 1,
            Move::Down => next.y += 1,
            Move::Up => next.o = (next.o + 1) % self.rotation.rotation_count(piece.id),
        }
        self.fits(well, &next).then_some(next)
    }

    /// Stamp `piece` into the well and clear completed rows at or below the bar.
    pub fn lock(&self, core: &CoreState, piece: &Piece) -> CoreState {
        let orientation = self.orientation(piece);
        let x = piece.x + orientation.x_min;
        let y = piece.y + orientation.y_min;

        let mut rows = core.well.rows().to_vec();
        for (dy, &bits) in orientation.rows.iter().enumerate() {
            rows[y as usize + dy] |= bits << x;
        }

        let mut score = core.score;
        let top = y as usize;
        for row in top..top + orientation.y_dim as usize {
            if row >= self.bar as usize && rows[row] == self.full_row {
                rows.remove(row);
                rows.insert(0, 0);
                score += 1;
            }
        }

        CoreState {
            well: Well::from_rows(rows),
            score,
        }
    }

    /// Apply one move. A blocked `D` locks the piece; any other blocked move
    /// returns the state unchanged, as does a state without a live piece.
    pub fn apply_move(&self, state: &WellState, mv: Move) -> WellState {
        let Some(piece) = state.piece else {
            return state.clone();
        };

        match self.try_move(&state.core.well, &piece, mv) {
            Some(next) => WellState {
                core: state.core.clone(),
                piece: Some(next),
            },
            None if mv == Move::Down => WellState {
                core: self.lock(&state.core, &piece),
                piece: None,
            },
            None => state.clone(),
        }
    }

    /// A well is terminal once anything reaches the row just above the bar.
    pub fn is_game_over(&self, well: &Well) -> bool {
        well.row(self.bar as usize - 1) != 0
    }

    /// Spawn `id` on `well`, or `None` if its opening position is blocked.
    pub fn try_spawn(&self, well: &Well, id: PieceId) -> Option<Piece> {
        let piece = self.spawn(id);
        self.fits(well, &piece).then_some(piece)
    }

    /// A settled state (after any spawn) is terminal when the well reached
    /// the bar or no live piece could be brought in.
    pub fn is_terminal(&self, state: &WellState) -> bool {
        state.piece.is_none() || self.is_game_over(&state.core.well)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}

fn full_row_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1 << width) - 1
    }
}
