use crate::processing::{AccessPointGroup, RadarLayout, RenderNode, SignalGeometry};
use crate::render::palette::Palette;
use crate::render::surface::DrawSurface;
use std::f64::consts::TAU;

pub const SWEEP_PERIOD_MS: f64 = 3000.0;
pub const LABEL_MIN_DBM: i32 = -67;
const GRID_FRACTIONS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];
const SWEEP_GLOW_SPAN: f64 = 0.6;
const MAX_INNER_RINGS: usize = 3;

/// Sweep angle in radians for the given elapsed time.
pub fn sweep_angle(elapsed_ms: f64) -> f64 {
    (elapsed_ms.rem_euclid(SWEEP_PERIOD_MS) / SWEEP_PERIOD_MS) * TAU
}

/// Text drawn beside a node, with the channel count for multi-channel groups.
pub fn node_label(group: &AccessPointGroup) -> String {
    let name = if group.ssid().trim().is_empty() {
        "(hidden)"
    } else {
        group.ssid().trim()
    };
    if group.channel_count() > 1 {
        format!("{} ({} ch)", name, group.channel_count())
    } else {
        name.to_string()
    }
}

/// Paints one radar frame.
#[derive(Debug, Clone, Default)]
pub struct RadarPainter {
    palette: Palette,
}

impl RadarPainter {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Draws grid, sweep and every group, returning the nodes in group order.
    pub fn paint<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        groups: &[AccessPointGroup],
        selected: Option<usize>,
        now_ms: f64,
        elapsed_ms: f64,
    ) -> Vec<RenderNode> {
        let (width, height) = surface.pixel_size();
        let layout = RadarLayout::fit(width, height);
        let center = (layout.center_x, layout.center_y);
        let palette = &self.palette;

        surface.clear(palette.background);
        for fraction in GRID_FRACTIONS {
            surface.stroke_circle(
                center.0,
                center.1,
                layout.max_radius * fraction,
                palette.grid,
                1.0,
            );
        }

        let sweep = sweep_angle(elapsed_ms);
        surface.fill_wedge(
            center.0,
            center.1,
            layout.max_radius,
            sweep - SWEEP_GLOW_SPAN,
            sweep,
            palette.sweep_glow,
        );
        surface.line(
            center,
            (
                center.0 + sweep.cos() * layout.max_radius,
                center.1 + sweep.sin() * layout.max_radius,
            ),
            palette.sweep,
            2.0,
        );

        let mut nodes = Vec::with_capacity(groups.len());
        for (idx, group) in groups.iter().enumerate() {
            let node = SignalGeometry::map_node(group, now_ms, &layout);
            let is_selected = selected == Some(idx);
            let band_color = palette.band_color(node.band);
            let body = node.size / 2.0;

            if is_selected {
                surface.line(center, (node.x, node.y), palette.spoke_selected, 2.0);
            } else {
                surface.line(center, (node.x, node.y), palette.spoke, 1.0);
            }

            let pulse = 1.0 + 0.25 * (now_ms * node.speed * 4.0 + node.angle).sin();
            surface.fill_circle(node.x, node.y, node.size * pulse, band_color.with_alpha(0.2));

            let fill = if is_selected {
                palette.node_selected
            } else {
                band_color
            };
            surface.fill_circle(node.x, node.y, body, fill);

            if group.channel_count() > 1 {
                let rings = (group.channel_count() - 1).min(MAX_INNER_RINGS);
                for ring in 0..rings {
                    let radius = body * (1.0 - (ring + 1) as f64 / (rings + 1) as f64);
                    surface.stroke_circle(node.x, node.y, radius, palette.ring, 1.0);
                }
            }

            if is_selected || group.signal_level >= LABEL_MIN_DBM {
                let color = if is_selected {
                    palette.label_selected
                } else {
                    palette.label
                };
                surface.text(
                    node.x + body + 4.0,
                    node.y - body,
                    &node_label(group),
                    color,
                    12.0,
                );
            }

            nodes.push(node);
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::GroupingEngine;
    use crate::render::surface::{DisplayList, DrawCommand};
    use crate::scan_interface::ScanRecord;

    fn groups() -> Vec<AccessPointGroup> {
        GroupingEngine::with_seed(3).group(&[
            ScanRecord::new("Home", "aa:bb:cc:11:22:01", -50, 1),
            ScanRecord::new("Home", "aa:bb:cc:11:22:02", -52, 36),
            ScanRecord::new("Far", "10:20:30:40:50:60", -80, 11),
        ])
    }

    fn count(list: &DisplayList, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        list.commands().iter().filter(|command| pred(*command)).count()
    }

    #[test]
    fn sweep_completes_a_turn_every_period() {
        assert_eq!(sweep_angle(0.0), 0.0);
        assert!((sweep_angle(750.0) - TAU / 4.0).abs() < 1e-9);
        assert!((sweep_angle(SWEEP_PERIOD_MS + 750.0) - TAU / 4.0).abs() < 1e-9);
    }

    #[test]
    fn frame_draws_grid_sweep_and_nodes() {
        let mut list = DisplayList::new(400.0, 300.0);
        let groups = groups();
        let nodes = RadarPainter::default().paint(&mut list, &groups, None, 100.0, 100.0);
        assert_eq!(nodes.len(), 2);
        assert!(matches!(list.commands()[0], DrawCommand::Clear { .. }));
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::FillWedge { .. })), 1);

        // 4 grid circles plus one inner ring for the dual-channel group
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::StrokeCircle { .. })), 5);
        // the -80 dBm group is not labelled while unselected
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Text { .. })), 1);
    }

    #[test]
    fn selected_node_is_white_and_labelled() {
        let mut list = DisplayList::new(400.0, 300.0);
        let groups = groups();
        let painter = RadarPainter::default();
        painter.paint(&mut list, &groups, Some(1), 0.0, 0.0);

        let white = painter.palette().node_selected;
        assert!(list.commands().iter().any(|c| matches!(
            c,
            DrawCommand::FillCircle { color, .. } if *color == white
        )));
        assert_eq!(count(&list, |c| matches!(c, DrawCommand::Text { .. })), 2);
    }

    #[test]
    fn label_carries_channel_count() {
        let groups = groups();
        assert_eq!(node_label(&groups[0]), "Home (2 ch)");
        assert_eq!(node_label(&groups[1]), "Far");
    }
}
