//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the adversarial well and everything built
//! directly on them. It has no UI or I/O dependencies, so the same code runs
//! in the terminal game, in headless replay checks and in benchmarks.
//!
//! # Module Structure
//!
//! - [`rotation`]: piece orientations as bounding boxes and row bitmasks, plus the spawn rule
//! - [`well`]: well rows, core state, live piece and full well state values
//! - [`rules`]: collision, locking, line clearing and the game-over test
//! - [`search`]: breadth-first enumeration of every lock a piece can reach
//! - [`fitness`]: badness metrics for ranking locked wells
//! - [`selector`]: adversarial, benign, fixed and seeded piece selectors
//! - [`timeline`]: history, move log, undo/redo and timed replay playback
//! - [`config`]: well geometry and replay pacing from defaults or the environment
//!
//! # Determinism
//!
//! Every transition, search and selection is a pure function of its inputs.
//! A move log replayed from the opening state reproduces the same game,
//! including every piece the selector chose.
//!
//! # Example
//!
//! ```
//! use hatetris_core::{Hatetris, PieceSelector, Rules};
//!
//! let rules = Rules::classic();
//! let well = rules.empty_well();
//!
//! // the I piece lies flat, every other piece needs two rows
//! assert_eq!(rules.reachable_locks(&well, 3).len(), 17);
//! assert_eq!(Hatetris::default().select_piece(&rules, &well), 0);
//! ```

pub mod config;
pub mod error;
pub mod fitness;
pub mod rng;
pub mod rotation;
pub mod rules;
pub mod search;
pub mod selector;
pub mod timeline;
pub mod well;

pub use hatetris_types as types;

// Re-export commonly used types for convenience
pub use config::Config;
pub use error::{ConfigError, IgnoredInput};
pub use fitness::{Fitness, HolesAndHeight, StackFeatures, StackHeight};
pub use rng::SimpleRng;
pub use rotation::{Orientation, PieceDef, RotationSystem};
pub use rules::Rules;
pub use search::{LockEdge, SearchTree};
pub use selector::{best_case, best_cases, FixedPiece, Hatetris, Lovetris, PieceSelector, SeededRandom};
pub use timeline::{PlaybackTimer, Timeline};
pub use well::{CoreState, Piece, Well, WellState};
