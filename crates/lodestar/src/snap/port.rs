//! Snapping connected ports into alignment.

use lodestar_core::geometry::{Axis, AxisMask, Point, Rect};
use lodestar_core::scene::{Orientation, Scene};

use crate::config::SnapSettings;
use crate::error::StateError;
use crate::snap::{Guide, SnapContext, SnapResult, SnapStrategy, StrategyState};

/// One wire captured at gesture start: the dragged node's port anchor and
/// the live position of the port on the far end.
#[derive(Debug, Clone, Copy)]
struct CapturedWire {
    anchor: Point,
    counterpart: Point,
    axis: Axis,
}

/// Snaps a dragged node so its ports line up with the ports they are
/// wired to.
///
/// A horizontal wire aligns its endpoints vertically (a Y offset), a
/// vertical wire horizontally. The minimum-distance offset across all
/// captured wires is applied when it is within tolerance; only nodes with
/// wired ports ever produce a snap.
#[derive(Debug)]
pub struct SnapToPort {
    distance: f32,
    tie_epsilon: f32,
    captured: Vec<CapturedWire>,
    state: StrategyState,
}

impl SnapToPort {
    /// Creates a port strategy with the default tolerance
    pub fn new() -> Self {
        Self {
            distance: 8.0,
            tie_epsilon: 0.01,
            captured: Vec::new(),
            state: StrategyState::default(),
        }
    }

    /// Creates a port strategy from engine settings
    pub fn from_settings(settings: &SnapSettings) -> Self {
        Self {
            distance: settings.distance(),
            tie_epsilon: settings.tie_epsilon(),
            captured: Vec::new(),
            state: StrategyState::default(),
        }
    }

    /// Sets the snap distance threshold
    pub fn set_distance(&mut self, distance: f32) -> &mut Self {
        self.distance = distance;
        self
    }
}

impl Default for SnapToPort {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapStrategy for SnapToPort {
    fn name(&self) -> &'static str {
        "port"
    }

    fn begin_snap(&mut self, scene: &Scene, context: &SnapContext) -> Result<(), StateError> {
        self.state.begin(self.name())?;
        let element = context.element();
        self.captured = scene
            .wires_connected_to(element)
            .filter_map(|wire| {
                let (local, remote) = wire.ends_for(element)?;
                // A counterpart moving with the drag keeps its relative
                // position; there is nothing to align against.
                if context.is_moving(remote.element) {
                    return None;
                }
                let anchor = scene.element(element)?.ports().get(local.port)?.anchor();
                let counterpart = scene.port_position(remote)?;
                let axis = match wire.orientation() {
                    Orientation::Horizontal => Axis::Y,
                    Orientation::Vertical => Axis::X,
                };
                Some(CapturedWire {
                    anchor,
                    counterpart,
                    axis,
                })
            })
            .collect();
        Ok(())
    }

    fn compute(&self, source_rect: Rect, _scene: &Scene) -> Result<SnapResult, StateError> {
        self.state.ensure_active(self.name())?;
        if self.state.is_paused() {
            return Ok(SnapResult::unsnapped(source_rect.origin()));
        }

        // The single minimum-distance offset across all wires wins; the
        // first captured wire attaining it breaks ties.
        let mut best: Option<(Axis, f32)> = None;
        for wire in &self.captured {
            let port = source_rect.origin().add(wire.anchor);
            let offset = wire.counterpart.along(wire.axis) - port.along(wire.axis);
            if offset.abs() > self.distance {
                continue;
            }
            if best.is_none_or(|(_, current)| offset.abs() < current.abs()) {
                best = Some((wire.axis, offset));
            }
        }

        let Some((axis, offset)) = best else {
            return Ok(SnapResult::unsnapped(source_rect.origin()));
        };

        let guides = self
            .captured
            .iter()
            .filter(|wire| wire.axis == axis)
            .filter_map(|wire| {
                let port = source_rect.origin().add(wire.anchor);
                let wire_offset = wire.counterpart.along(axis) - port.along(axis);
                if (wire_offset.abs() - offset.abs()).abs() > self.tie_epsilon {
                    return None;
                }
                let perpendicular = axis.perpendicular();
                let along = port.along(perpendicular);
                let counterpart = wire.counterpart.along(perpendicular);
                Some(Guide::Line {
                    axis,
                    position: wire.counterpart.along(axis),
                    from: along.min(counterpart),
                    to: along.max(counterpart),
                })
            })
            .collect();

        let position = source_rect
            .origin()
            .with_along(axis, source_rect.origin().along(axis) + offset);
        Ok(SnapResult::new(position, AxisMask::from_axis(axis), guides))
    }

    fn end_snap(&mut self) -> Result<(), StateError> {
        self.captured.clear();
        self.state.end(self.name())
    }

    fn pause_snap(&mut self, paused: bool) -> Result<(), StateError> {
        self.state.pause(self.name(), paused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestar_core::scene::{Element, ElementId, ElementKind, Port, PortRef, Wire};

    /// Two nodes joined left-to-right by a horizontal wire; the dragged
    /// node's output port sits at its right-middle, the counterpart's
    /// input port at its left-middle.
    fn wired_scene(dragged_y: f32) -> Scene {
        let mut scene = Scene::new();
        scene.insert(
            Element::new(
                ElementId::new(1),
                ElementKind::Node,
                Rect::new(0.0, dragged_y, 40.0, 30.0),
            )
            .with_port(Port::new(Point::new(40.0, 15.0))),
        );
        scene.insert(
            Element::new(
                ElementId::new(2),
                ElementKind::Node,
                Rect::new(100.0, 0.0, 40.0, 30.0),
            )
            .with_port(Port::new(Point::new(0.0, 15.0))),
        );
        scene.insert_wire(Wire::new(
            PortRef::new(ElementId::new(1), 0),
            PortRef::new(ElementId::new(2), 0),
            Orientation::Horizontal,
        ));
        scene
    }

    fn begun(scene: &Scene) -> SnapToPort {
        let mut strategy = SnapToPort::new();
        strategy
            .begin_snap(scene, &SnapContext::single(ElementId::new(1)))
            .expect("begin");
        strategy
    }

    #[test]
    fn horizontal_wire_aligns_vertically() {
        let scene = wired_scene(5.0);
        let strategy = begun(&scene);

        // Dragged port is at y = 5 + 15 = 20; counterpart at y = 15
        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        let result = strategy.compute(rect, &scene).expect("compute");
        assert_eq!(result.mask(), AxisMask::Y);
        assert_eq!(result.position().y(), 0.0);
        assert_eq!(result.position().x(), 0.0);
    }

    #[test]
    fn aligned_ports_report_zero_offset() {
        let scene = wired_scene(0.0);
        let strategy = begun(&scene);

        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        let result = strategy.compute(rect, &scene).expect("compute");
        assert_eq!(result.mask(), AxisMask::Y);
        assert_eq!(result.position(), rect.origin());
    }

    #[test]
    fn does_not_snap_beyond_tolerance() {
        let scene = wired_scene(9.0);
        let strategy = begun(&scene);

        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        let result = strategy.compute(rect, &scene).expect("compute");
        assert!(result.mask().is_none());
        assert_eq!(result.position(), rect.origin());
    }

    #[test]
    fn minimum_offset_across_wires_wins() {
        let mut scene = wired_scene(5.0);
        // A second counterpart, farther away vertically
        scene.insert(
            Element::new(
                ElementId::new(3),
                ElementKind::Node,
                Rect::new(100.0, 50.0, 40.0, 30.0),
            )
            .with_port(Port::new(Point::new(0.0, -47.0))),
        );
        scene.insert_wire(Wire::new(
            PortRef::new(ElementId::new(1), 0),
            PortRef::new(ElementId::new(3), 0),
            Orientation::Horizontal,
        ));

        let strategy = begun(&scene);
        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        // Wire to node 2 wants -5; wire to node 3 wants 3 - 20 = -17…
        // out of tolerance, so node 2's offset applies.
        let result = strategy.compute(rect, &scene).expect("compute");
        assert_eq!(result.mask(), AxisMask::Y);
        assert_eq!(result.position().y(), 0.0);
    }

    #[test]
    fn counterpart_in_move_set_is_ignored() {
        let scene = wired_scene(5.0);
        let mut strategy = SnapToPort::new();
        let context = SnapContext::new(ElementId::new(1), vec![ElementId::new(2)]);
        strategy.begin_snap(&scene, &context).expect("begin");

        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        let result = strategy.compute(rect, &scene).expect("compute");
        assert!(result.mask().is_none());
    }

    #[test]
    fn node_without_wires_never_snaps() {
        let mut scene = Scene::new();
        scene.insert(Element::new(
            ElementId::new(1),
            ElementKind::Node,
            Rect::new(0.0, 0.0, 40.0, 30.0),
        ));
        let strategy = begun(&scene);
        let result = strategy
            .compute(Rect::new(3.0, 3.0, 40.0, 30.0), &scene)
            .expect("compute");
        assert!(result.mask().is_none());
    }

    #[test]
    fn guide_connects_the_two_ports() {
        let scene = wired_scene(5.0);
        let strategy = begun(&scene);
        let rect = scene.element(ElementId::new(1)).unwrap().rect();
        let result = strategy.compute(rect, &scene).expect("compute");

        assert_eq!(result.guides().len(), 1);
        let Guide::Line { axis, position, from, to } = result.guides()[0] else {
            panic!("expected a line guide");
        };
        assert_eq!(axis, Axis::Y);
        assert_eq!(position, 15.0);
        assert_eq!((from, to), (40.0, 100.0));
    }
}
