//! Rotation table - piece orientations as bounding boxes and row bitmasks
//!
//! Every orientation is described relative to its piece's rotation frame. A
//! piece at `(x, y)` occupies the frame whose top-left corner is at `(x, y)`;
//! the orientation's bounding box starts at `(x + x_min, y + y_min)`.
//!
//! Row bitmasks use bit 0 for the leftmost column of the bounding box.
//!
//! The standard table holds the seven tetrominoes in the order S, Z, O, I, L,
//! J, T, each drawn inside the usual 4x4 rotation frame:
//!
//! ```text
//! I (N):        T (N):        O:
//! . . . .       . # . .       . # # .
//! # # # #       # # # .       . # # .
//! . . . .       . . . .       . . . .
//! . . . .       . . . .       . . . .
//! ```

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::{PieceId, PieceKind, MAX_WELL_WIDTH};
use crate::well::Piece;

/// One rotation state of one piece type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    pub x_min: i32,
    pub y_min: i32,
    pub x_dim: u32,
    pub y_dim: u32,
    pub rows: ArrayVec<u32, 4>,
}

/// Tallest bounding box an orientation may have.
pub const MAX_ORIENTATION_ROWS: u32 = 4;

impl Orientation {
    /// Build an orientation from cell offsets inside the rotation frame.
    ///
    /// Fails unless the cells span 1 to 4 rows and 1 to 32 columns.
    pub fn from_minos(minos: &[(i32, i32)]) -> Result<Self, ConfigError> {
        let span = |lo: Option<i32>, hi: Option<i32>| match (lo, hi) {
            (Some(lo), Some(hi)) => u32::try_from(i64::from(hi) - i64::from(lo) + 1)
                .unwrap_or(u32::MAX),
            _ => 0,
        };
        let x_dim = span(
            minos.iter().map(|&(x, _)| x).min(),
            minos.iter().map(|&(x, _)| x).max(),
        );
        let y_dim = span(
            minos.iter().map(|&(_, y)| y).min(),
            minos.iter().map(|&(_, y)| y).max(),
        );

        if x_dim == 0 || x_dim > MAX_WELL_WIDTH || y_dim > MAX_ORIENTATION_ROWS {
            return Err(ConfigError::BadOrientation { x_dim, y_dim });
        }
        Ok(Self::pack(minos))
    }

    /// Pack offsets already known to fit in 4 rows and 32 columns.
    fn pack(minos: &[(i32, i32)]) -> Self {
        let x_min = minos.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let y_min = minos.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let x_max = minos.iter().map(|&(x, _)| x).max().unwrap_or(-1);
        let y_max = minos.iter().map(|&(_, y)| y).max().unwrap_or(-1);

        let x_dim = (x_max - x_min + 1).max(0) as u32;
        let y_dim = (y_max - y_min + 1).max(0) as u32;

        let mut rows: ArrayVec<u32, 4> = ArrayVec::new();
        for _ in 0..y_dim {
            rows.push(0);
        }
        for &(x, y) in minos {
            rows[(y - y_min) as usize] |= 1 << (x - x_min);
        }

        Self {
            x_min,
            y_min,
            x_dim,
            y_dim,
            rows,
        }
    }

    /// Right edge of the bounding box within the rotation frame.
    pub fn frame_right(&self) -> i32 {
        self.x_min + self.x_dim as i32
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> u32 {
        self.rows.iter().map(|r| r.count_ones()).sum()
    }
}

/// A piece type: a display letter plus its distinct orientations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceDef {
    pub letter: char,
    pub orientations: Vec<Orientation>,
}

impl PieceDef {
    /// Build a piece from its rotation states, keeping only its true period.
    pub fn from_rotations(
        letter: char,
        rotations: &[&[(i32, i32)]],
    ) -> Result<Self, ConfigError> {
        let orientations = rotations
            .iter()
            .map(|m| Orientation::from_minos(m))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            letter,
            orientations: collapse_period(orientations),
        })
    }
}

/// Trim an orientation cycle to its smallest repeating prefix.
fn collapse_period(mut orientations: Vec<Orientation>) -> Vec<Orientation> {
    let len = orientations.len();
    for period in 1..len {
        if len % period != 0 {
            continue;
        }
        let repeats = (0..len).all(|i| orientations[i] == orientations[i % period]);
        if repeats {
            orientations.truncate(period);
            break;
        }
    }
    orientations
}

/// Ordered list of piece definitions with a deterministic spawn rule.
#[derive(Debug, Clone)]
pub struct RotationSystem {
    pieces: Vec<PieceDef>,
    frame_width: i32,
}

impl RotationSystem {
    pub fn new(pieces: Vec<PieceDef>) -> Result<Self, ConfigError> {
        if pieces.is_empty() {
            return Err(ConfigError::NoPieces);
        }
        if let Some(piece) = pieces.iter().position(|p| p.orientations.is_empty()) {
            return Err(ConfigError::EmptyPiece { piece });
        }

        let frame_width = pieces
            .iter()
            .flat_map(|p| p.orientations.iter())
            .map(Orientation::frame_right)
            .max()
            .unwrap_or(0);

        Ok(Self {
            pieces,
            frame_width,
        })
    }

    /// The seven tetrominoes in S, Z, O, I, L, J, T order.
    pub fn standard() -> Self {
        let pieces = PieceKind::ALL
            .iter()
            .map(|&kind| PieceDef {
                letter: kind.letter(),
                orientations: collapse_period(
                    standard_rotations(kind)
                        .iter()
                        .map(|m| Orientation::pack(m))
                        .collect(),
                ),
            })
            .collect();
        Self {
            pieces,
            frame_width: 4,
        }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn piece(&self, id: PieceId) -> &PieceDef {
        &self.pieces[id]
    }

    pub fn pieces(&self) -> &[PieceDef] {
        &self.pieces
    }

    pub fn orientation(&self, id: PieceId, o: usize) -> &Orientation {
        &self.pieces[id].orientations[o]
    }

    pub fn rotation_count(&self, id: PieceId) -> usize {
        self.pieces[id].orientations.len()
    }

    /// Widest extent of any orientation measured from its frame's left edge.
    pub fn frame_width(&self) -> i32 {
        self.frame_width
    }

    /// Spawn pose for `id` in a well `width` columns wide.
    ///
    /// The rotation frame is centred (an odd slack column goes to the right
    /// half) and dropped so orientation 0's top row sits on well row 0.
    pub fn spawn(&self, width: u32, id: PieceId) -> Piece {
        let x = (width as i32 - self.frame_width + 1).div_euclid(2);
        let y = -self.orientation(id, 0).y_min;
        Piece { id, x, y, o: 0 }
    }
}

impl Default for RotationSystem {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_rotations(kind: PieceKind) -> [&'static [(i32, i32)]; 4] {
    match kind {
        PieceKind::S => [
            &[(1, 0), (2, 0), (0, 1), (1, 1)],
            &[(1, 0), (1, 1), (2, 1), (2, 2)],
            &[(1, 1), (2, 1), (0, 2), (1, 2)],
            &[(0, 0), (0, 1), (1, 1), (1, 2)],
        ],
        PieceKind::Z => [
            &[(0, 0), (1, 0), (1, 1), (2, 1)],
            &[(2, 0), (1, 1), (2, 1), (1, 2)],
            &[(0, 1), (1, 1), (1, 2), (2, 2)],
            &[(1, 0), (0, 1), (1, 1), (0, 2)],
        ],
        PieceKind::O => [
            &[(1, 0), (2, 0), (1, 1), (2, 1)],
            &[(1, 0), (2, 0), (1, 1), (2, 1)],
            &[(1, 0), (2, 0), (1, 1), (2, 1)],
            &[(1, 0), (2, 0), (1, 1), (2, 1)],
        ],
        PieceKind::I => [
            &[(0, 1), (1, 1), (2, 1), (3, 1)],
            &[(2, 0), (2, 1), (2, 2), (2, 3)],
            &[(0, 2), (1, 2), (2, 2), (3, 2)],
            &[(1, 0), (1, 1), (1, 2), (1, 3)],
        ],
        PieceKind::L => [
            &[(2, 0), (0, 1), (1, 1), (2, 1)],
            &[(1, 0), (1, 1), (1, 2), (2, 2)],
            &[(0, 1), (1, 1), (2, 1), (0, 2)],
            &[(0, 0), (1, 0), (1, 1), (1, 2)],
        ],
        PieceKind::J => [
            &[(0, 0), (0, 1), (1, 1), (2, 1)],
            &[(1, 0), (2, 0), (1, 1), (1, 2)],
            &[(0, 1), (1, 1), (2, 1), (2, 2)],
            &[(1, 0), (1, 1), (0, 2), (1, 2)],
        ],
        PieceKind::T => [
            &[(1, 0), (0, 1), (1, 1), (2, 1)],
            &[(1, 0), (1, 1), (2, 1), (1, 2)],
            &[(0, 1), (1, 1), (2, 1), (1, 2)],
            &[(1, 0), (0, 1), (1, 1), (1, 2)],
        ],
    }
}
