//! HATETRIS (workspace facade crate).
//!
//! Re-exports the member crates under short names
//! (`hatetris::{core,engine,input,replay,term,types}`) and holds the
//! headless report used by the binary.

pub mod report;

pub use hatetris_core as core;
pub use hatetris_engine as engine;
pub use hatetris_input as input;
pub use hatetris_replay as replay;
pub use hatetris_term as term;
pub use hatetris_types as types;
