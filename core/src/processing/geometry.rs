use crate::math::{hash_degrees, InterpHelper};
use crate::processing::grouping::AccessPointGroup;
use serde::Serialize;

pub const STRONGEST_DBM: f64 = -30.0;
pub const WEAKEST_DBM: f64 = -90.0;
pub const MIN_DISTANCE: f64 = 0.15;
pub const MAX_DISTANCE: f64 = 0.85;
pub const HIT_RADIUS_FACTOR: f64 = 3.0;

/// Radial wobble amplitude as a fraction of the radar radius.
const WOBBLE_AMPLITUDE: f64 = 0.02;

/// Five fixed signal bands, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalBand {
    Green,
    LightGreen,
    Amber,
    Orange,
    Red,
}

impl SignalBand {
    /// Bands the raw (unclamped) signal level.
    pub fn from_signal(signal_dbm: i32) -> Self {
        match signal_dbm {
            s if s >= -55 => Self::Green,
            s if s >= -67 => Self::LightGreen,
            s if s >= -75 => Self::Amber,
            s if s >= -85 => Self::Orange,
            _ => Self::Red,
        }
    }
}

/// Placement of the radar disc on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarLayout {
    pub center_x: f64,
    pub center_y: f64,
    pub max_radius: f64,
}

impl RadarLayout {
    /// Fits the radar into a `width` x `height` surface with a small margin.
    pub fn fit(width: f64, height: f64) -> Self {
        Self {
            center_x: width / 2.0,
            center_y: height / 2.0,
            max_radius: (width.min(height) / 2.0 * 0.9).max(0.0),
        }
    }

    /// Unit disc centred on the origin.
    pub fn unit() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            max_radius: 1.0,
        }
    }
}

/// Per-frame visual encoding of one access-point group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderNode {
    pub distance: f64,
    pub angle: f64,
    pub band: SignalBand,
    pub size: f64,
    pub speed: f64,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl RenderNode {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.distance_to(x, y) <= self.radius
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

pub struct SignalGeometry;

impl SignalGeometry {
    /// Maps a group to its node for the frame at `now_ms`.
    ///
    /// Everything except `x`/`y` is independent of `now_ms`; the angle depends
    /// only on the group identifier, so unrelated groups may share an angle.
    pub fn map_node(group: &AccessPointGroup, now_ms: f64, layout: &RadarLayout) -> RenderNode {
        let signal = f64::from(group.signal_level);
        let clamped = signal.clamp(WEAKEST_DBM, STRONGEST_DBM);

        let distance = InterpHelper::map_range(
            clamped,
            STRONGEST_DBM,
            WEAKEST_DBM,
            MIN_DISTANCE,
            MAX_DISTANCE,
        );
        let angle = Self::angle_for(group.identifier());
        let channel_boost = (group.channel_count() as f64 * 2.0).min(10.0);
        // Below the floor, body and hit radius stay at the weakest size.
        let floored = signal.max(WEAKEST_DBM);
        let size =
            InterpHelper::map_range(floored, STRONGEST_DBM, WEAKEST_DBM, 18.0, 8.0) + channel_boost;
        let speed = InterpHelper::map_range(floored, STRONGEST_DBM, WEAKEST_DBM, 0.0005, 0.0002);

        let wobble = (now_ms * speed + angle).sin() * WOBBLE_AMPLITUDE;
        let reach = (distance + wobble) * layout.max_radius;

        RenderNode {
            distance,
            angle,
            band: SignalBand::from_signal(group.signal_level),
            size,
            speed,
            x: layout.center_x + angle.cos() * reach,
            y: layout.center_y + angle.sin() * reach,
            radius: size * HIT_RADIUS_FACTOR,
        }
    }

    pub fn angle_for(identifier: &str) -> f64 {
        f64::from(hash_degrees(identifier)).to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::grouping::GroupingEngine;
    use crate::scan_interface::ScanRecord;

    fn group_of(records: &[ScanRecord]) -> AccessPointGroup {
        GroupingEngine::with_seed(1).group(records).remove(0)
    }

    fn single(signal: i32) -> AccessPointGroup {
        group_of(&[ScanRecord::new("Net", "aa:bb:cc:dd:ee:ff", signal, 6)])
    }

    #[test]
    fn stronger_signal_sits_closer_and_draws_larger() {
        let layout = RadarLayout::unit();
        let strong = SignalGeometry::map_node(&single(-40), 0.0, &layout);
        let weak = SignalGeometry::map_node(&single(-80), 0.0, &layout);
        assert!(strong.distance < weak.distance);
        assert!(strong.size > weak.size);
        assert!(strong.speed > weak.speed);
    }

    #[test]
    fn band_boundaries_are_exact() {
        assert_eq!(SignalBand::from_signal(-55), SignalBand::Green);
        assert_eq!(SignalBand::from_signal(-56), SignalBand::LightGreen);
        assert_eq!(SignalBand::from_signal(-67), SignalBand::LightGreen);
        assert_eq!(SignalBand::from_signal(-68), SignalBand::Amber);
        assert_eq!(SignalBand::from_signal(-75), SignalBand::Amber);
        assert_eq!(SignalBand::from_signal(-85), SignalBand::Orange);
        assert_eq!(SignalBand::from_signal(-86), SignalBand::Red);
    }

    #[test]
    fn weakest_signal_maps_to_outer_distance_and_red() {
        let node = SignalGeometry::map_node(&single(-90), 0.0, &RadarLayout::unit());
        assert!((node.distance - MAX_DISTANCE).abs() < 1e-9);
        assert_eq!(node.band, SignalBand::Red);
    }

    #[test]
    fn out_of_range_signal_is_clamped_for_distance_only() {
        let node = SignalGeometry::map_node(&single(-100), 0.0, &RadarLayout::unit());
        assert!((node.distance - MAX_DISTANCE).abs() < 1e-9);
        let hot = SignalGeometry::map_node(&single(-10), 0.0, &RadarLayout::unit());
        assert!((hot.distance - MIN_DISTANCE).abs() < 1e-9);
        assert_eq!(hot.band, SignalBand::Green);
    }

    #[test]
    fn far_below_floor_signal_keeps_a_clickable_body() {
        let layout = RadarLayout::fit(400.0, 400.0);
        let node = SignalGeometry::map_node(&single(-250), 500.0, &layout);
        let floor = SignalGeometry::map_node(&single(-90), 500.0, &layout);
        assert_eq!(node.size, floor.size);
        assert_eq!(node.speed, floor.speed);
        assert!(node.radius > 0.0);
        assert!(node.contains(node.x, node.y));
        assert_eq!(node.band, SignalBand::Red);
    }

    #[test]
    fn angle_is_stable_across_frames_but_position_moves() {
        let group = single(-60);
        let layout = RadarLayout::fit(400.0, 400.0);
        let first = SignalGeometry::map_node(&group, 0.0, &layout);
        let later = SignalGeometry::map_node(&group, 1_234.0, &layout);
        assert_eq!(first.angle, later.angle);
        assert_eq!(first.distance, later.distance);
        assert!(first.x != later.x || first.y != later.y);
    }

    #[test]
    fn channel_boost_is_capped() {
        let records: Vec<ScanRecord> = [1, 6, 11, 36, 40, 44, 48]
            .iter()
            .map(|&channel| ScanRecord::new("Mesh", "aa:bb:cc:dd:ee:ff", -60, channel))
            .collect();
        let wide = group_of(&records);
        let node = SignalGeometry::map_node(&wide, 0.0, &RadarLayout::unit());
        assert!((node.size - (13.0 + 10.0)).abs() < 1e-9);
        assert!((node.radius - node.size * HIT_RADIUS_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn node_stays_near_its_nominal_ring() {
        let layout = RadarLayout::fit(200.0, 200.0);
        let node = SignalGeometry::map_node(&single(-60), 987.0, &layout);
        let reach = node.distance_to(layout.center_x, layout.center_y) / layout.max_radius;
        assert!((reach - node.distance).abs() <= WOBBLE_AMPLITUDE + 1e-9);
    }
}
