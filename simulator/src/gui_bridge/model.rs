use scanradar::render::DisplayList;
use scanradar::{DebugSnapshot, RadarEngine};
use serde::Deserialize;

/// Engine state shared by the HTTP routes; the lock around it is the single
/// owner of the radar.
pub struct VisualizationModel {
    pub engine: RadarEngine<DisplayList>,
    pub status: String,
}

impl VisualizationModel {
    pub fn new(engine: RadarEngine<DisplayList>) -> Self {
        Self {
            engine,
            status: "waiting for scan records".into(),
        }
    }

    pub fn snapshot(&self) -> DebugSnapshot {
        self.engine.snapshot()
    }
}

/// Body of `POST /pointer`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PointerInput {
    pub x: f64,
    pub y: f64,
}
