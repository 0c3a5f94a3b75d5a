//! Terminal renderer for the adversarial well.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit:
//! [`WellView`] paints a timeline into a [`FrameBuffer`], and
//! [`TerminalRenderer`] diffs consecutive frames and flushes the changes
//! with crossterm.
//!
//! Well cells are two terminal columns wide to compensate for the usual
//! glyph aspect ratio.

pub mod fb;
pub mod renderer;
pub mod well_view;

pub use hatetris_core as core;
pub use hatetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::{
    changed_runs, encode_diff_into, encode_full_into, for_each_changed_run, TerminalRenderer,
};
pub use well_view::{Viewport, WellView};
