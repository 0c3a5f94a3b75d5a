//! Error types shared by the core.
//!
//! [`ConfigError`] is fatal and only produced while building a rule set.
//! [`IgnoredInput`] is informational: the timeline rejected a request and left
//! its state untouched.

use thiserror::Error;

use crate::types::{Mode, Move, PieceId};

/// Structurally invalid well or rotation table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("rotation table has no piece types")]
    NoPieces,
    #[error("piece {piece} has no orientations")]
    EmptyPiece { piece: PieceId },
    #[error("orientation spans {x_dim}x{y_dim} cells, outside 32x4")]
    BadOrientation { x_dim: u32, y_dim: u32 },
    #[error("well depth {depth} is smaller than bar {bar}")]
    DepthBelowBar { depth: u32, bar: u32 },
    #[error("well width {width} is below the minimum of 4")]
    WellTooNarrow { width: u32 },
    #[error("well width {width} does not fit a 32-bit row")]
    WellTooWide { width: u32 },
    #[error("bar must be at least 1")]
    BarAtTop,
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NoPieces => "no_pieces",
            ConfigError::EmptyPiece { .. } => "empty_piece",
            ConfigError::BadOrientation { .. } => "bad_orientation",
            ConfigError::DepthBelowBar { .. } => "depth_below_bar",
            ConfigError::WellTooNarrow { .. } => "well_too_narrow",
            ConfigError::WellTooWide { .. } => "well_too_wide",
            ConfigError::BarAtTop => "bar_at_top",
        }
    }
}

/// A timeline request that was rejected without changing any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IgnoredInput {
    #[error("move {} ignored while {}", .mv.as_char(), .mode.as_str())]
    Move { mv: Move, mode: Mode },
    #[error("nothing to undo")]
    UndoAtStart,
    #[error("nothing to redo")]
    RedoAtEnd,
    #[error("redo ignored while {}", .0.as_str())]
    RedoWhile(Mode),
    #[error("replay step ignored while {}", .0.as_str())]
    StepWhile(Mode),
}

impl IgnoredInput {
    pub fn code(&self) -> &'static str {
        match self {
            IgnoredInput::Move { .. } => "move_ignored",
            IgnoredInput::UndoAtStart => "undo_at_start",
            IgnoredInput::RedoAtEnd => "redo_at_end",
            IgnoredInput::RedoWhile(_) => "redo_ignored",
            IgnoredInput::StepWhile(_) => "step_ignored",
        }
    }
}
