pub mod geometry;
pub mod grouping;

pub use geometry::{RadarLayout, RenderNode, SignalBand, SignalGeometry};
pub use grouping::{ssid_index, AccessPointGroup, GroupingEngine};
