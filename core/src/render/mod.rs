pub mod palette;
pub mod radar;
pub mod scheduler;
pub mod surface;

pub use palette::Palette;
pub use radar::{node_label, sweep_angle, RadarPainter};
pub use scheduler::{FrameHandle, FrameScheduler, ManualScheduler};
pub use surface::{DisplayList, DrawCommand, DrawSurface, Rgba};
