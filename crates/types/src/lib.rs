//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the engine, the replay codec and the terminal front end alike.
//!
//! # Well Dimensions
//!
//! The classic adversarial well:
//!
//! - **Width**: 10 columns (indexed 0-9, column 0 is the least significant bit)
//! - **Depth**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Bar**: row 4; completed rows above it never clear, and any filled cell
//!   in row `bar - 1` ends the game
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `REPLAY_STEP_MS` | 50 | Delay between two scripted replay moves |
//!
//! # Examples
//!
//! ```
//! use hatetris_types::{Move, Mode, PieceKind, WELL_DEPTH, WELL_WIDTH};
//!
//! assert_eq!(Move::from_char('L'), Some(Move::Left));
//! assert_eq!(Move::Up.as_char(), 'U');
//! assert_eq!(PieceKind::from_str("s"), Some(PieceKind::S));
//! assert_eq!(Mode::NotStarted.as_str(), "not_started");
//!
//! assert_eq!(WELL_WIDTH, 10);
//! assert_eq!(WELL_DEPTH, 20);
//! ```

/// Default well width in cells.
pub const WELL_WIDTH: u32 = 10;

/// Default well depth in cells.
pub const WELL_DEPTH: u32 = 20;

/// Default bar row.
pub const BAR: u32 = 4;

/// Narrowest well any of the standard pieces can be played in.
pub const MIN_WELL_WIDTH: u32 = 4;

/// Widest well a `u32` row bitmask can describe.
pub const MAX_WELL_WIDTH: u32 = 32;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between two scripted replay moves in milliseconds.
pub const REPLAY_STEP_MS: u32 = 50;

/// Index of a piece type inside a rotation system.
pub type PieceId = usize;

/// One discrete player input.
///
/// The declaration order (L, R, D, U) is significant: it is the order the
/// reachability search expands edges in and the row/column order of the
/// replay nibble table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Move {
    /// Shift the piece one column left
    Left,
    /// Shift the piece one column right
    Right,
    /// Drop the piece one row; locks it when blocked
    Down,
    /// Advance to the next orientation
    Up,
}

impl Move {
    /// All moves in canonical order.
    pub const ALL: [Move; 4] = [Move::Left, Move::Right, Move::Down, Move::Up];

    /// Position of the move in [`Move::ALL`].
    pub fn index(self) -> u8 {
        match self {
            Move::Left => 0,
            Move::Right => 1,
            Move::Down => 2,
            Move::Up => 3,
        }
    }

    /// Inverse of [`Move::index`]; only the low two bits are used.
    pub fn from_index(index: u8) -> Self {
        Move::ALL[(index & 0b11) as usize]
    }

    /// Parse a move symbol (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use hatetris_types::Move;
    ///
    /// assert_eq!(Move::from_char('d'), Some(Move::Down));
    /// assert_eq!(Move::from_char('x'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Move::Left),
            'R' => Some(Move::Right),
            'D' => Some(Move::Down),
            'U' => Some(Move::Up),
            _ => None,
        }
    }

    /// Single-letter symbol used in logs and move strings.
    pub fn as_char(self) -> char {
        match self {
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Down => 'D',
            Move::Up => 'U',
        }
    }
}

/// Lifecycle of a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    NotStarted,
    Playing,
    Replaying,
    GameOver,
}

impl Mode {
    /// Lowercase name for reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::NotStarted => "not_started",
            Mode::Playing => "playing",
            Mode::Replaying => "replaying",
            Mode::GameOver => "game_over",
        }
    }

    /// Whether player moves are accepted in this mode.
    pub fn accepts_moves(&self) -> bool {
        matches!(self, Mode::Playing | Mode::Replaying)
    }
}

/// Front-end commands produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Undo,
    Redo,
    NewGame,
}

/// The seven tetromino piece kinds, in standard rotation table order.
///
/// The order doubles as the adversary's tie-break order: when two pieces are
/// equally bad for the player, the earlier one is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    S,
    Z,
    O,
    I,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::S,
        PieceKind::Z,
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use hatetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("T"), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Uppercase letter used for display.
    pub fn letter(&self) -> char {
        match self {
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::O => 'O',
            PieceKind::I => 'I',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::T => 'T',
        }
    }
}
