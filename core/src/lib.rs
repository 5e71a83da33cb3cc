//! Access-point grouping and radar rendering core for the host-inventory dashboard.
//!
//! Raw WiFi scan records flow one way: ingestion normalizes them, the grouping
//! engine clusters them into access points, the geometry mapper places each
//! group on a polar radar, and the engine drives the redraw loop and pointer
//! selection on top of a host-provided drawing surface.

pub mod engine;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod render;
pub mod scan_interface;
pub mod selection;
pub mod telemetry;

pub use engine::{DebugSnapshot, LoopState, RadarEngine};
pub use prelude::{EngineConfig, RadarError, RadarResult};
pub use scan_interface::ScanRecord;
