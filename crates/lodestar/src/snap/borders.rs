//! Snapping to the borders of neighboring elements.

use lodestar_core::geometry::{Axis, AxisMask, Rect};
use lodestar_core::scene::Scene;

use crate::config::SnapSettings;
use crate::error::StateError;
use crate::snap::{
    select_axis_snap, Candidate, Guide, SnapContext, SnapResult, SnapStrategy, StrategyState,
};

/// Snaps the dragged rectangle's edges and center to the edges of nearby
/// elements.
///
/// Candidates are captured once per gesture: the rectangles of every
/// non-wire element outside the move-set that overlaps the dragged
/// element's neighborhood (its rect inflated by the capture margin). Per
/// axis, the dragged rect's leading edge, center, and trailing edge are
/// compared against each candidate's two edges.
#[derive(Debug)]
pub struct SnapToBorders {
    capture_margin: f32,
    distance: f32,
    tie_epsilon: f32,
    captured: Vec<Rect>,
    state: StrategyState,
}

impl SnapToBorders {
    /// Creates a border strategy with the given neighborhood margin and
    /// default tolerance
    pub fn new(capture_margin: f32) -> Self {
        Self {
            capture_margin,
            distance: 8.0,
            tie_epsilon: 0.01,
            captured: Vec::new(),
            state: StrategyState::default(),
        }
    }

    /// Creates a border strategy from engine settings
    pub fn from_settings(settings: &SnapSettings) -> Self {
        Self {
            capture_margin: settings.border_capture_margin(),
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

    fn axis_candidates(&self, rect: Rect, axis: Axis) -> Vec<Candidate> {
        let references = [
            rect.leading(axis),
            rect.center().along(axis),
            rect.trailing(axis),
        ];
        let perpendicular = axis.perpendicular();

        let mut candidates = Vec::new();
        for &target in &self.captured {
            for edge in [target.leading(axis), target.trailing(axis)] {
                for reference in references {
                    candidates.push(Candidate {
                        offset: edge - reference,
                        guides: vec![Guide::Line {
                            axis,
                            position: edge,
                            from: rect
                                .leading(perpendicular)
                                .min(target.leading(perpendicular)),
                            to: rect
                                .trailing(perpendicular)
                                .max(target.trailing(perpendicular)),
                        }],
                    });
                }
            }
        }
        candidates
    }
}

impl SnapStrategy for SnapToBorders {
    fn name(&self) -> &'static str {
        "borders"
    }

    fn begin_snap(&mut self, scene: &Scene, context: &SnapContext) -> Result<(), StateError> {
        self.state.begin(self.name())?;
        // A stale dragged element leaves the capture empty; computing
        // against nothing is the documented skip behavior.
        self.captured = match scene.element(context.element()) {
            Some(element) => {
                let neighborhood = element
                    .rect()
                    .inflate(self.capture_margin, self.capture_margin);
                scene
                    .elements()
                    .filter(|e| !context.is_moving(e.id()) && !e.is_wire())
                    .filter(|e| e.rect().overlaps(neighborhood))
                    .map(|e| e.rect())
                    .collect()
            }
            None => Vec::new(),
        };
        Ok(())
    }

    fn compute(&self, source_rect: Rect, _scene: &Scene) -> Result<SnapResult, StateError> {
        self.state.ensure_active(self.name())?;
        if self.state.is_paused() {
            return Ok(SnapResult::unsnapped(source_rect.origin()));
        }

        let mut position = source_rect.origin();
        let mut mask = AxisMask::None;
        let mut guides = Vec::new();
        for axis in [Axis::X, Axis::Y] {
            let candidates = self.axis_candidates(source_rect, axis);
            if let Some((offset, axis_guides)) =
                select_axis_snap(candidates, self.distance, self.tie_epsilon)
            {
                position = position.with_along(axis, position.along(axis) + offset);
                mask = mask.with(axis);
                guides.extend(axis_guides);
            }
        }

        Ok(SnapResult::new(position, mask, guides))
    }

    fn end_snap(&mut self) -> Result<(), StateError> {
        self.captured.clear();
        self.state.end(self.name())
    }

    fn pause_snap(&mut self, paused: bool) -> Result<(), StateError> {
        self.state.pause(self.name(), paused)
    }
}
