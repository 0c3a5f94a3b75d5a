//! Well and state values.
//!
//! A [`Well`] is an immutable column of row bitmasks (row 0 at the top, bit 0
//! the leftmost column). Rows are reference counted so that every transition
//! except a lock shares its parent's storage.

use std::fmt;
use std::sync::Arc;

use crate::types::PieceId;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Well {
    rows: Arc<[u32]>,
}

impl Well {
    /// An empty well `depth` rows deep.
    pub fn empty(depth: u32) -> Self {
        Self {
            rows: vec![0; depth as usize].into(),
        }
    }

    pub fn from_rows(rows: Vec<u32>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn rows(&self) -> &[u32] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> u32 {
        self.rows[index]
    }

    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    pub fn is_cell_filled(&self, x: u32, y: usize) -> bool {
        (self.rows[y] >> x) & 1 == 1
    }

    /// Index of the highest non-empty row, if any.
    pub fn top_filled_row(&self) -> Option<usize> {
        self.rows.iter().position(|&r| r != 0)
    }

    pub fn filled_cells(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }

    /// Whether two wells share the same row storage.
    pub fn shares_rows(&self, other: &Well) -> bool {
        Arc::ptr_eq(&self.rows, &other.rows)
    }

    /// Render rows as `#`/`.` strings, `width` cells each.
    pub fn render_rows(&self, width: u32) -> Vec<String> {
        self.rows
            .iter()
            .map(|&row| {
                (0..width)
                    .map(|x| if (row >> x) & 1 == 1 { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

impl fmt::Debug for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rows.iter().map(|r| format!("{r:#x}")))
            .finish()
    }
}

/// Well contents plus cleared-line score.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoreState {
    pub well: Well,
    pub score: u32,
}

impl CoreState {
    pub fn new(well: Well) -> Self {
        Self { well, score: 0 }
    }
}

/// A live piece: type, frame origin and rotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub x: i32,
    pub y: i32,
    pub o: usize,
}

/// A full game state. `piece` is `None` between a lock and the next spawn,
/// and stays `None` once the game is over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellState {
    pub core: CoreState,
    pub piece: Option<Piece>,
}

impl WellState {
    pub fn score(&self) -> u32 {
        self.core.score
    }

    pub fn well(&self) -> &Well {
        &self.core.well
    }
}
