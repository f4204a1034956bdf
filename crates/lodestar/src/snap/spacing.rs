//! Snapping to equal-spacing positions between element pairs.

use lodestar_core::geometry::{Axis, AxisMask, Rect};
use lodestar_core::scene::Scene;

use crate::config::SnapSettings;
use crate::error::StateError;
use crate::snap::{
    select_axis_snap, Candidate, Guide, SnapContext, SnapResult, SnapStrategy, StrategyState,
};

/// Snaps the dragged rectangle into equal-gap arrangements with pairs of
/// other elements.
///
/// For every pair of captured rectangles that are separated along the
/// snap axis and both overlap the dragged rectangle's perpendicular
/// extent, three positions are offered: immediately before the pair
/// (mirroring their gap), exactly between them, and immediately after.
/// Accepted candidates carry double-segment gap indicators for the host
/// to draw.
#[derive(Debug)]
pub struct SnapToSpacing {
    distance: f32,
    tie_epsilon: f32,
    captured: Vec<Rect>,
    state: StrategyState,
}

impl SnapToSpacing {
    /// Creates a spacing strategy with the default tolerance
    pub fn new() -> Self {
        Self {
            distance: 8.0,
            tie_epsilon: 0.01,
            captured: Vec::new(),
            state: StrategyState::default(),
        }
    }

    /// Creates a spacing strategy from engine settings
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

    fn axis_candidates(&self, rect: Rect, axis: Axis) -> Vec<Candidate> {
        let perpendicular = axis.perpendicular();
        let half = rect.extent(axis) / 2.0;
        let center = rect.center().along(axis);

        let overlaps_perpendicular = |candidate: &Rect| {
            candidate.leading(perpendicular) < rect.trailing(perpendicular)
                && rect.leading(perpendicular) < candidate.trailing(perpendicular)
        };

        let mut candidates = Vec::new();
        for (i, &a) in self.captured.iter().enumerate() {
            for &b in self.captured.iter().skip(i + 1) {
                // The pair must be separated along the snap axis and both
                // sides must share perpendicular space with the dragged rect.
                let (left, right) = if a.trailing(axis) <= b.leading(axis) {
                    (a, b)
                } else if b.trailing(axis) <= a.leading(axis) {
                    (b, a)
                } else {
                    continue;
                };
                if !overlaps_perpendicular(&left) || !overlaps_perpendicular(&right) {
                    continue;
                }
                let gap = right.leading(axis) - left.trailing(axis);
                if gap <= 0.0 {
                    continue;
                }

                let pair_at =
                    (left.center().along(perpendicular) + right.center().along(perpendicular)) / 2.0;
                let source_at = rect.center().along(perpendicular);
                let pair_gap = |at: f32| Guide::Gap {
                    axis,
                    from: left.trailing(axis),
                    to: right.leading(axis),
                    at,
                };

                // Before the pair, mirroring its gap
                let before = left.leading(axis) - gap - half;
                candidates.push(Candidate {
                    offset: before - center,
                    guides: vec![
                        Guide::Gap {
                            axis,
                            from: before + half,
                            to: left.leading(axis),
                            at: source_at,
                        },
                        pair_gap(pair_at),
                    ],
                });

                // Centered in the gap, when the dragged rect fits
                if gap > rect.extent(axis) {
                    let between = (left.trailing(axis) + right.leading(axis)) / 2.0;
                    candidates.push(Candidate {
                        offset: between - center,
                        guides: vec![
                            Guide::Gap {
                                axis,
                                from: left.trailing(axis),
                                to: between - half,
                                at: source_at,
                            },
                            Guide::Gap {
                                axis,
                                from: between + half,
                                to: right.leading(axis),
                                at: source_at,
                            },
                        ],
                    });
                }

                // After the pair, mirroring its gap
                let after = right.trailing(axis) + gap + half;
                candidates.push(Candidate {
                    offset: after - center,
                    guides: vec![
                        pair_gap(pair_at),
                        Guide::Gap {
                            axis,
                            from: right.trailing(axis),
                            to: after - half,
                            at: source_at,
                        },
                    ],
                });
            }
        }
        candidates
    }
}

impl Default for SnapToSpacing {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapStrategy for SnapToSpacing {
    fn name(&self) -> &'static str {
        "spacing"
    }

    fn begin_snap(&mut self, scene: &Scene, context: &SnapContext) -> Result<(), StateError> {
        self.state.begin(self.name())?;
        self.captured = scene
            .elements()
            .filter(|e| !context.is_moving(e.id()) && !e.is_wire())
            .map(|e| e.rect())
            .collect();
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
