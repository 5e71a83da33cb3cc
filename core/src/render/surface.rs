use serde::Serialize;

/// Straight-alpha RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Host drawing surface the radar paints onto.
///
/// Coordinates are in configured pixel space with the origin at the top-left.
pub trait DrawSurface {
    /// `false` once the host has removed the surface from its presentation tree.
    fn is_attached(&self) -> bool;
    /// Size the host currently lays the surface out at.
    fn logical_size(&self) -> (f64, f64);
    /// Size the surface was last configured to draw at.
    fn pixel_size(&self) -> (f64, f64);
    fn configure(&mut self, width: f64, height: f64);

    fn clear(&mut self, color: Rgba);
    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, width: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64);
    /// Filled circular sector from `start` to `end` radians.
    fn fill_wedge(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, color: Rgba);
    fn text(&mut self, x: f64, y: f64, content: &str, color: Rgba, size: f64);
}

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear {
        color: Rgba,
    },
    StrokeCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
        width: f64,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgba,
        width: f64,
    },
    FillWedge {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
        color: Rgba,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        color: Rgba,
        size: f64,
    },
}

/// Surface that records the commands of the last frame.
///
/// Used headless by the simulator and tests, and replayed onto a real canvas
/// by the desktop visualizer.
#[derive(Debug, Clone)]
pub struct DisplayList {
    logical: (f64, f64),
    configured: (f64, f64),
    attached: bool,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            logical: (width, height),
            configured: (width, height),
            attached: true,
            commands: Vec::new(),
        }
    }

    /// Records a host-side layout change; applied at the start of the next frame.
    pub fn set_logical_size(&mut self, width: f64, height: f64) {
        self.logical = (width, height);
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawSurface for DisplayList {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn logical_size(&self) -> (f64, f64) {
        self.logical
    }

    fn pixel_size(&self) -> (f64, f64) {
        self.configured
    }

    fn configure(&mut self, width: f64, height: f64) {
        self.configured = (width, height);
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { color });
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::StrokeCircle {
            x,
            y,
            radius,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands
            .push(DrawCommand::FillCircle { x, y, radius, color });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn fill_wedge(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64, color: Rgba) {
        self.commands.push(DrawCommand::FillWedge {
            x,
            y,
            radius,
            start,
            end,
            color,
        });
    }

    fn text(&mut self, x: f64, y: f64, content: &str, color: Rgba, size: f64) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            content: content.to_string(),
            color,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut list = DisplayList::new(100.0, 100.0);
        list.fill_circle(1.0, 1.0, 2.0, Rgba::WHITE);
        list.clear(Rgba::rgb(0.0, 0.0, 0.0));
        assert_eq!(list.commands().len(), 1);
    }

    #[test]
    fn logical_size_change_is_not_applied_until_configured() {
        let mut list = DisplayList::new(100.0, 80.0);
        list.set_logical_size(320.0, 240.0);
        assert_eq!(list.pixel_size(), (100.0, 80.0));
        list.configure(320.0, 240.0);
        assert_eq!(list.pixel_size(), list.logical_size());
    }
}
