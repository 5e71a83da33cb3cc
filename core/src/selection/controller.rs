use crate::processing::RenderNode;
use serde::Serialize;

/// Window during which follow-up pointer input is dropped.
pub const POINTER_GUARD_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub at_ms: f64,
}

/// Result of one pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Selected(usize),
    Cleared,
    Unchanged,
    Ignored,
}

impl PointerOutcome {
    pub fn changed(self) -> bool {
        matches!(self, Self::Selected(_) | Self::Cleared)
    }
}

/// Single-selection state with a re-entrancy guard.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selected: Option<usize>,
    busy_until_ms: Option<f64>,
    last_pointer: Option<PointerSample>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn last_pointer(&self) -> Option<PointerSample> {
        self.last_pointer
    }

    /// Re-points the selection after the group list was rebuilt.
    pub fn reselect(&mut self, selected: Option<usize>) {
        self.selected = selected;
    }

    /// Nearest node whose hit radius covers `(x, y)`.
    pub fn hit_test(nodes: &[RenderNode], x: f64, y: f64) -> Option<usize> {
        nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.contains(x, y))
            .min_by(|(_, lhs), (_, rhs)| lhs.distance_to(x, y).total_cmp(&rhs.distance_to(x, y)))
            .map(|(idx, _)| idx)
    }

    /// Applies the toggle law: hitting the selection clears it, hitting another
    /// node selects it, missing everything clears. Every input, including one
    /// dropped by the guard, becomes the last pointer sample.
    pub fn handle_pointer(
        &mut self,
        nodes: &[RenderNode],
        x: f64,
        y: f64,
        now_ms: f64,
    ) -> PointerOutcome {
        self.last_pointer = Some(PointerSample { x, y, at_ms: now_ms });
        if let Some(busy_until) = self.busy_until_ms {
            if now_ms < busy_until {
                return PointerOutcome::Ignored;
            }
        }
        self.busy_until_ms = Some(now_ms + POINTER_GUARD_MS);

        match (Self::hit_test(nodes, x, y), self.selected) {
            (Some(hit), Some(current)) if hit == current => {
                self.selected = None;
                PointerOutcome::Cleared
            }
            (Some(hit), _) => {
                self.selected = Some(hit);
                PointerOutcome::Selected(hit)
            }
            (None, Some(_)) => {
                self.selected = None;
                PointerOutcome::Cleared
            }
            (None, None) => PointerOutcome::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::SignalBand;

    fn node(x: f64, y: f64, size: f64) -> RenderNode {
        RenderNode {
            distance: 0.5,
            angle: 0.0,
            band: SignalBand::Green,
            size,
            speed: 0.0003,
            x,
            y,
            radius: size * 3.0,
        }
    }

    #[test]
    fn nearest_center_wins_among_overlapping_hits() {
        let nodes = vec![node(100.0, 100.0, 10.0), node(120.0, 100.0, 10.0)];
        assert_eq!(SelectionController::hit_test(&nodes, 115.0, 100.0), Some(1));
        assert_eq!(SelectionController::hit_test(&nodes, 104.0, 100.0), Some(0));
        assert_eq!(SelectionController::hit_test(&nodes, 300.0, 300.0), None);
    }

    #[test]
    fn repeating_the_same_input_toggles_selection_off() {
        let nodes = vec![node(50.0, 50.0, 10.0)];
        let mut controller = SelectionController::new();
        assert_eq!(
            controller.handle_pointer(&nodes, 52.0, 50.0, 0.0),
            PointerOutcome::Selected(0)
        );
        assert_eq!(
            controller.handle_pointer(&nodes, 52.0, 50.0, 500.0),
            PointerOutcome::Cleared
        );
        assert_eq!(controller.selected(), None);
    }

    #[test]
    fn miss_clears_existing_selection() {
        let nodes = vec![node(50.0, 50.0, 10.0), node(150.0, 50.0, 10.0)];
        let mut controller = SelectionController::new();
        controller.handle_pointer(&nodes, 150.0, 50.0, 0.0);
        assert_eq!(controller.selected(), Some(1));
        assert_eq!(
            controller.handle_pointer(&nodes, 100.0, 200.0, 200.0),
            PointerOutcome::Cleared
        );
        assert_eq!(
            controller.handle_pointer(&nodes, 100.0, 200.0, 400.0),
            PointerOutcome::Unchanged
        );
    }

    #[test]
    fn input_inside_guard_window_is_ignored() {
        let nodes = vec![node(50.0, 50.0, 10.0)];
        let mut controller = SelectionController::new();
        controller.handle_pointer(&nodes, 50.0, 50.0, 1_000.0);
        assert_eq!(
            controller.handle_pointer(&nodes, 300.0, 40.0, 1_050.0),
            PointerOutcome::Ignored
        );
        assert_eq!(controller.selected(), Some(0));
        assert_eq!(
            controller.last_pointer(),
            Some(PointerSample {
                x: 300.0,
                y: 40.0,
                at_ms: 1_050.0
            })
        );
        assert_eq!(
            controller.handle_pointer(&nodes, 50.0, 50.0, 1_100.0),
            PointerOutcome::Cleared
        );
    }

    #[test]
    fn switching_between_nodes_selects_the_new_one() {
        let nodes = vec![node(50.0, 50.0, 10.0), node(150.0, 50.0, 10.0)];
        let mut controller = SelectionController::new();
        controller.handle_pointer(&nodes, 50.0, 50.0, 0.0);
        assert_eq!(
            controller.handle_pointer(&nodes, 150.0, 50.0, 200.0),
            PointerOutcome::Selected(1)
        );
    }
}
