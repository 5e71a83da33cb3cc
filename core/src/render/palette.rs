use crate::processing::SignalBand;
use crate::render::surface::Rgba;

/// Fixed color set for one presentation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub grid: Rgba,
    pub sweep: Rgba,
    pub sweep_glow: Rgba,
    pub spoke: Rgba,
    pub spoke_selected: Rgba,
    pub node_selected: Rgba,
    pub ring: Rgba,
    pub label: Rgba,
    pub label_selected: Rgba,
}

const GREEN: Rgba = Rgba::rgb(0.18, 0.80, 0.44);
const LIGHT_GREEN: Rgba = Rgba::rgb(0.60, 0.85, 0.30);
const AMBER: Rgba = Rgba::rgb(0.95, 0.77, 0.06);
const ORANGE: Rgba = Rgba::rgb(0.90, 0.49, 0.13);
const RED: Rgba = Rgba::rgb(0.91, 0.30, 0.24);

impl Palette {
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(0.02, 0.04, 0.06),
            grid: Rgba::rgba(0.20, 0.80, 0.45, 0.25),
            sweep: Rgba::rgba(0.30, 1.00, 0.55, 0.85),
            sweep_glow: Rgba::rgba(0.30, 1.00, 0.55, 0.12),
            spoke: Rgba::rgba(0.60, 0.80, 0.70, 0.18),
            spoke_selected: Rgba::rgba(1.00, 1.00, 1.00, 0.80),
            node_selected: Rgba::WHITE,
            ring: Rgba::rgba(0.02, 0.04, 0.06, 0.70),
            label: Rgba::rgba(0.85, 0.92, 0.88, 0.85),
            label_selected: Rgba::WHITE,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Rgba::rgb(0.97, 0.98, 0.98),
            grid: Rgba::rgba(0.20, 0.30, 0.35, 0.20),
            sweep: Rgba::rgba(0.05, 0.45, 0.30, 0.80),
            sweep_glow: Rgba::rgba(0.05, 0.45, 0.30, 0.10),
            spoke: Rgba::rgba(0.20, 0.30, 0.35, 0.20),
            spoke_selected: Rgba::rgba(0.10, 0.15, 0.20, 0.85),
            node_selected: Rgba::WHITE,
            ring: Rgba::rgba(1.00, 1.00, 1.00, 0.80),
            label: Rgba::rgba(0.15, 0.20, 0.25, 0.90),
            label_selected: Rgba::rgb(0.05, 0.05, 0.10),
        }
    }

    pub fn for_mode(light_mode: bool) -> Self {
        if light_mode {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Band colors are shared by both modes.
    pub fn band_color(&self, band: SignalBand) -> Rgba {
        match band {
            SignalBand::Green => GREEN,
            SignalBand::LightGreen => LIGHT_GREEN,
            SignalBand::Amber => AMBER,
            SignalBand::Orange => ORANGE,
            SignalBand::Red => RED,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}
