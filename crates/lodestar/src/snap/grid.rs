//! Snapping to the background grid.

use lodestar_core::geometry::{Axis, AxisMask, Rect};
use lodestar_core::scene::Scene;

use crate::config::SnapSettings;
use crate::error::StateError;
use crate::snap::{
    select_axis_snap, Candidate, Guide, SnapContext, SnapResult, SnapStrategy, StrategyState,
};

/// Snaps the dragged rectangle's edges and center to periodic grid lines.
///
/// Per axis, three reference points are considered: the leading edge, the
/// center, and the trailing edge. Edge references are inset by the
/// element's border width so the visual border midline lands on the line.
#[derive(Debug)]
pub struct SnapToGrid {
    spacing: f32,
    border_inset: f32,
    distance: f32,
    tie_epsilon: f32,
    state: StrategyState,
}

impl SnapToGrid {
    /// Creates a grid strategy with the given line spacing and default
    /// tolerance
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing,
            border_inset: 0.0,
            distance: 8.0,
            tie_epsilon: 0.01,
            state: StrategyState::default(),
        }
    }

    /// Creates a grid strategy from engine settings
    pub fn from_settings(settings: &SnapSettings) -> Self {
        Self {
            spacing: settings.grid_spacing(),
            border_inset: settings.grid_border_inset(),
            distance: settings.distance(),
            tie_epsilon: settings.tie_epsilon(),
            state: StrategyState::default(),
        }
    }

    /// Sets the border inset applied to edge references
    pub fn set_border_inset(&mut self, inset: f32) -> &mut Self {
        self.border_inset = inset;
        self
    }

    /// Sets the snap distance threshold
    pub fn set_distance(&mut self, distance: f32) -> &mut Self {
        self.distance = distance;
        self
    }

    /// The nearest grid line to the given value, preferring the lower
    /// neighbor on exact half-spacing ties.
    fn nearest_line(&self, value: f32) -> f32 {
        let below = (value / self.spacing).floor() * self.spacing;
        let above = below + self.spacing;
        if value - below <= above - value {
            below
        } else {
            above
        }
    }

    fn axis_candidates(&self, rect: Rect, axis: Axis) -> Vec<Candidate> {
        if self.spacing <= 0.0 {
            return Vec::new();
        }
        let references = [
            rect.leading(axis) + self.border_inset,
            rect.center().along(axis),
            rect.trailing(axis) - self.border_inset,
        ];
        let perpendicular = axis.perpendicular();

        references
            .into_iter()
            .map(|reference| {
                let line = self.nearest_line(reference);
                Candidate {
                    offset: line - reference,
                    guides: vec![Guide::Line {
                        axis,
                        position: line,
                        from: rect.leading(perpendicular),
                        to: rect.trailing(perpendicular),
                    }],
                }
            })
            .collect()
    }
}

impl SnapStrategy for SnapToGrid {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn begin_snap(&mut self, _scene: &Scene, _context: &SnapContext) -> Result<(), StateError> {
        // Grid lines are static; there is nothing to capture.
        self.state.begin(self.name())
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
        self.state.end(self.name())
    }

    fn pause_snap(&mut self, paused: bool) -> Result<(), StateError> {
        self.state.pause(self.name(), paused)
    }
}
