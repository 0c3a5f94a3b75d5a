//! Headless JSON report of a finished or paused timeline.

use serde::Serialize;

use crate::core::Timeline;
use crate::engine::AutoplayReport;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameReport {
    pub mode: &'static str,
    pub score: u32,
    pub position: Option<usize>,
    pub move_count: usize,
    pub selector: &'static str,
    pub replay: Option<String>,
    pub well: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces_placed: Option<usize>,
}

impl GameReport {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let width = timeline.rules().width();
        let well = timeline
            .current()
            .map(|state| state.core.well.render_rows(width))
            .unwrap_or_default();

        Self {
            mode: timeline.mode().as_str(),
            score: timeline.score(),
            position: timeline.position(),
            move_count: timeline.moves().len(),
            selector: timeline.selector_name(),
            replay: timeline.encoded_replay(),
            well,
            pieces_placed: None,
        }
    }

    pub fn with_autoplay(mut self, autoplay: &AutoplayReport) -> Self {
        self.pieces_placed = Some(autoplay.pieces_placed);
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
