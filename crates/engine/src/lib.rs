//! Engine layer: placement planning and autoplay on top of the core rules.
//!
//! The planner reuses the reachability search, so every plan is a legal move
//! sequence that the timeline replays exactly.

pub mod autoplay;
pub mod place;

pub use hatetris_types as types;

pub use autoplay::{autoplay, AutoplayReport};
pub use place::{plan_placement, Plan, PlanError};
