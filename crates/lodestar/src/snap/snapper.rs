//! The snapper orchestrator.

use log::trace;

use lodestar_core::geometry::{Axis, AxisMask, Rect};
use lodestar_core::scene::Scene;

use crate::config::SnapSettings;
use crate::error::StateError;
use crate::snap::{
    SnapContext, SnapResult, SnapStrategy, SnapToBorders, SnapToGrid, SnapToPort, SnapToSpacing,
    StrategyState,
};

/// Runs every registered strategy each move tick and merges their
/// suggestions per axis.
///
/// Strategies are evaluated in registration order, each seeing the raw
/// source rectangle. A strategy whose mask names an axis overwrites the
/// running result on that axis, so the last registered strategy wins a
/// contested axis. This is a deliberate, order-exposed policy: hosts
/// configure behavior by choosing what to register and in which order.
pub struct Snapper {
    strategies: Vec<Box<dyn SnapStrategy>>,
    state: StrategyState,
}

impl Snapper {
    /// Creates a snapper with no strategies
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            state: StrategyState::default(),
        }
    }

    /// Creates a snapper with the enabled strategies from settings,
    /// registered in the documented order: grid, borders, ports, spacing.
    pub fn from_settings(settings: &SnapSettings) -> Self {
        let mut snapper = Self::new();
        if settings.grid_enabled() {
            snapper.register(Box::new(SnapToGrid::from_settings(settings)));
        }
        if settings.borders_enabled() {
            snapper.register(Box::new(SnapToBorders::from_settings(settings)));
        }
        if settings.ports_enabled() {
            snapper.register(Box::new(SnapToPort::from_settings(settings)));
        }
        if settings.spacing_enabled() {
            snapper.register(Box::new(SnapToSpacing::from_settings(settings)));
        }
        snapper
    }

    /// Appends a strategy; registration order is evaluation order
    pub fn register(&mut self, strategy: Box<dyn SnapStrategy>) -> &mut Self {
        self.strategies.push(strategy);
        self
    }

    /// Returns the number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Checks whether no strategies are registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Begins a gesture on every registered strategy
    pub fn begin_snap(&mut self, scene: &Scene, context: &SnapContext) -> Result<(), StateError> {
        self.state.begin("snapper")?;
        for strategy in &mut self.strategies {
            strategy.begin_snap(scene, context)?;
        }
        Ok(())
    }

    /// Computes the merged snapped position for the source rectangle.
    ///
    /// Starts from the raw origin; each strategy's result overwrites the
    /// axes its mask names. Guides are kept only from the strategies that
    /// won at least one axis in the final merge.
    pub fn snapped_position(
        &self,
        source_rect: Rect,
        scene: &Scene,
    ) -> Result<SnapResult, StateError> {
        self.state.ensure_active("snapper")?;

        let results: Vec<SnapResult> = self
            .strategies
            .iter()
            .map(|strategy| strategy.compute(source_rect, scene))
            .collect::<Result<_, _>>()?;

        let mut position = source_rect.origin();
        let mut mask = AxisMask::None;
        let mut winner: [Option<usize>; 2] = [None, None];
        for (index, result) in results.iter().enumerate() {
            for (slot, axis) in [Axis::X, Axis::Y].into_iter().enumerate() {
                if result.mask().contains(axis) {
                    position = position.with_along(axis, result.position().along(axis));
                    mask = mask.with(axis);
                    winner[slot] = Some(index);
                }
            }
        }

        let mut guides = Vec::new();
        for (index, result) in results.iter().enumerate() {
            if winner.contains(&Some(index)) {
                guides.extend_from_slice(result.guides());
            }
        }

        trace!(
            source_x = source_rect.min_x(),
            source_y = source_rect.min_y(),
            snapped_x = position.x(),
            snapped_y = position.y();
            "Merged snap result"
        );
        Ok(SnapResult::new(position, mask, guides))
    }

    /// Ends the gesture on every registered strategy
    pub fn end_snap(&mut self) -> Result<(), StateError> {
        self.state.end("snapper")?;
        for strategy in &mut self.strategies {
            strategy.end_snap()?;
        }
        Ok(())
    }

    /// Pauses or resumes every registered strategy
    pub fn pause_snap(&mut self, paused: bool) -> Result<(), StateError> {
        self.state.pause("snapper", paused)?;
        for strategy in &mut self.strategies {
            strategy.pause_snap(paused)?;
        }
        Ok(())
    }
}

impl Default for Snapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestar_core::geometry::Point;
    use lodestar_core::scene::{Element, ElementId, ElementKind};

    use crate::snap::Guide;

    /// A test strategy reporting a fixed position on fixed axes.
    struct Fixed {
        name: &'static str,
        position: Point,
        mask: AxisMask,
        state: StrategyState,
    }

    impl Fixed {
        fn boxed(name: &'static str, position: Point, mask: AxisMask) -> Box<dyn SnapStrategy> {
            Box::new(Self {
                name,
                position,
                mask,
                state: StrategyState::default(),
            })
        }
    }

    impl SnapStrategy for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn begin_snap(&mut self, _: &Scene, _: &SnapContext) -> Result<(), StateError> {
            self.state.begin(self.name)
        }

        fn compute(&self, source_rect: Rect, _: &Scene) -> Result<SnapResult, StateError> {
            self.state.ensure_active(self.name)?;
            if self.state.is_paused() {
                return Ok(SnapResult::unsnapped(source_rect.origin()));
            }
            Ok(SnapResult::new(
                self.position,
                self.mask,
                vec![Guide::Line {
                    axis: Axis::X,
                    position: self.position.x(),
                    from: 0.0,
                    to: 1.0,
                }],
            ))
        }

        fn end_snap(&mut self) -> Result<(), StateError> {
            self.state.end(self.name)
        }

        fn pause_snap(&mut self, paused: bool) -> Result<(), StateError> {
            self.state.pause(self.name, paused)
        }
    }

    fn begun(snapper: &mut Snapper) {
        snapper
            .begin_snap(&Scene::new(), &SnapContext::single(ElementId::new(1)))
            .expect("begin");
    }

    #[test]
    fn later_strategy_wins_contested_axis() {
        let mut snapper = Snapper::new();
        snapper.register(Fixed::boxed("a", Point::new(10.0, 10.0), AxisMask::Both));
        snapper.register(Fixed::boxed("b", Point::new(99.0, 0.0), AxisMask::X));
        begun(&mut snapper);

        let result = snapper
            .snapped_position(Rect::new(0.0, 0.0, 10.0, 10.0), &Scene::new())
            .expect("compute");
        // b overwrote X; a's Y survives
        assert_eq!(result.position(), Point::new(99.0, 10.0));
        assert_eq!(result.mask(), AxisMask::Both);
    }

    #[test]
    fn strategies_see_the_raw_source_rect() {
        // Both strategies report masks on disjoint axes; neither sees the
        // other's output, so the merge is exactly their per-axis values.
        let mut snapper = Snapper::new();
        snapper.register(Fixed::boxed("x", Point::new(5.0, -1.0), AxisMask::X));
        snapper.register(Fixed::boxed("y", Point::new(-1.0, 7.0), AxisMask::Y));
        begun(&mut snapper);

        let result = snapper
            .snapped_position(Rect::new(0.0, 0.0, 10.0, 10.0), &Scene::new())
            .expect("compute");
        assert_eq!(result.position(), Point::new(5.0, 7.0));
    }

    #[test]
    fn no_strategy_means_raw_position() {
        let mut snapper = Snapper::new();
        begun(&mut snapper);
        let result = snapper
            .snapped_position(Rect::new(3.0, 4.0, 10.0, 10.0), &Scene::new())
            .expect("compute");
        assert_eq!(result.position(), Point::new(3.0, 4.0));
        assert!(result.mask().is_none());
        assert!(result.guides().is_empty());
    }

    #[test]
    fn overridden_strategy_guides_are_dropped() {
        let mut snapper = Snapper::new();
        snapper.register(Fixed::boxed("a", Point::new(10.0, 0.0), AxisMask::X));
        snapper.register(Fixed::boxed("b", Point::new(20.0, 0.0), AxisMask::X));
        begun(&mut snapper);

        let result = snapper
            .snapped_position(Rect::new(0.0, 0.0, 10.0, 10.0), &Scene::new())
            .expect("compute");
        assert_eq!(result.guides().len(), 1);
        let Guide::Line { position, .. } = result.guides()[0] else {
            panic!("expected line");
        };
        assert_eq!(position, 20.0);
    }

    #[test]
    fn lifecycle_fans_out() {
        let mut snapper = Snapper::new();
        snapper.register(Fixed::boxed("a", Point::default(), AxisMask::X));
        begun(&mut snapper);

        snapper.pause_snap(true).expect("pause");
        let result = snapper
            .snapped_position(Rect::new(1.0, 2.0, 3.0, 4.0), &Scene::new())
            .expect("compute");
        assert!(result.mask().is_none());

        snapper.end_snap().expect("end");
        assert!(snapper.snapped_position(Rect::default(), &Scene::new()).is_err());
        assert!(snapper.end_snap().is_err());
    }

    #[test]
    fn begin_twice_fails_fast() {
        let mut snapper = Snapper::new();
        begun(&mut snapper);
        let err = snapper
            .begin_snap(&Scene::new(), &SnapContext::single(ElementId::new(1)))
            .unwrap_err();
        assert_eq!(err, StateError::AlreadyActive { strategy: "snapper" });
    }

    #[test]
    fn from_settings_registers_enabled_strategies_in_order() {
        let all = SnapSettings::default();
        assert_eq!(Snapper::from_settings(&all).len(), 4);

        let none = SnapSettings::default().with_enabled(false, false, false, false);
        assert!(Snapper::from_settings(&none).is_empty());

        let grid_only = SnapSettings::default().with_enabled(true, false, false, false);
        assert_eq!(Snapper::from_settings(&grid_only).len(), 1);
    }

    /// End-to-end over real strategies: with grid and borders both
    /// claiming X, the later-registered borders strategy wins.
    #[test]
    fn borders_override_grid_on_contested_axis() {
        let mut scene = Scene::new();
        scene.insert(Element::new(
            ElementId::new(1),
            ElementKind::Node,
            Rect::new(0.0, 200.0, 40.0, 30.0),
        ));
        // Neighbor edge at x = 103, off-grid
        scene.insert(Element::new(
            ElementId::new(2),
            ElementKind::Node,
            Rect::new(103.0, 200.0, 40.0, 30.0),
        ));

        let settings = SnapSettings::default().with_enabled(true, true, false, false);
        let mut snapper = Snapper::from_settings(&settings);
        snapper
            .begin_snap(&scene, &SnapContext::single(ElementId::new(1)))
            .expect("begin");

        // Origin 98: grid wants 100, borders want the neighbor's 103
        let result = snapper
            .snapped_position(Rect::new(98.0, 200.0, 40.0, 30.0), &scene)
            .expect("compute");
        assert_eq!(result.position().x(), 103.0);
    }
}
