//! Run configuration: well geometry and replay pacing.

use std::env;

use crate::error::ConfigError;
use crate::rotation::RotationSystem;
use crate::rules::Rules;
use crate::types::{BAR, REPLAY_STEP_MS, WELL_DEPTH, WELL_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub well_width: u32,
    pub well_depth: u32,
    pub bar: u32,
    pub replay_step_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            well_width: WELL_WIDTH,
            well_depth: WELL_DEPTH,
            bar: BAR,
            replay_step_ms: REPLAY_STEP_MS,
        }
    }
}

impl Config {
    /// Defaults overridden by `HATETRIS_*` environment variables. Values that
    /// do not parse are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            well_width: env_u32("HATETRIS_WELL_WIDTH").unwrap_or(defaults.well_width),
            well_depth: env_u32("HATETRIS_WELL_DEPTH").unwrap_or(defaults.well_depth),
            bar: env_u32("HATETRIS_BAR").unwrap_or(defaults.bar),
            replay_step_ms: env_u32("HATETRIS_REPLAY_STEP_MS").unwrap_or(defaults.replay_step_ms),
        }
    }

    pub fn build_rules(&self, rotation: RotationSystem) -> Result<Rules, ConfigError> {
        Rules::new(rotation, self.well_width, self.well_depth, self.bar)
    }
}

fn env_u32(key: &str) -> Option<u32> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
