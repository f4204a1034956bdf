//! Snap strategies and the snapper orchestrator.
//!
//! Each strategy independently suggests a corrected position for the
//! dragged rectangle along one or both axes: to grid lines, to neighbor
//! borders, to connected ports, or to equal-spacing positions. The
//! [`Snapper`] runs every registered strategy in registration order each
//! move tick and overwrites the running result per axis, so the last
//! registered strategy wins a contested axis.
//!
//! Strategies follow a strict lifecycle: [`SnapStrategy::begin_snap`]
//! once per gesture, any number of [`SnapStrategy::compute`] calls, then
//! [`SnapStrategy::end_snap`]. Violating the sequence is a caller bug and
//! fails fast with [`StateError`](crate::StateError).

mod borders;
mod grid;
mod port;
mod snapper;
mod spacing;

pub use borders::SnapToBorders;
pub use grid::SnapToGrid;
pub use port::SnapToPort;
pub use snapper::Snapper;
pub use spacing::SnapToSpacing;

use lodestar_core::geometry::{Axis, AxisMask, Point, Rect};
use lodestar_core::scene::{ElementId, Scene};

use crate::error::StateError;

/// Guide geometry for visual snap feedback.
///
/// Guides are computed as plain data; drawing them is the host's job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guide {
    /// An alignment line. `position` is measured on `axis`; the line runs
    /// perpendicular to it, spanning `from..to` along the perpendicular
    /// axis.
    Line {
        axis: Axis,
        position: f32,
        from: f32,
        to: f32,
    },
    /// One half of an equal-spacing indicator: a gap spanning `from..to`
    /// along `axis`, drawn at `at` on the perpendicular axis.
    Gap {
        axis: Axis,
        from: f32,
        to: f32,
        at: f32,
    },
}

/// Per-strategy output for one move tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    position: Point,
    mask: AxisMask,
    guides: Vec<Guide>,
}

impl SnapResult {
    /// A result reporting no snap: the source position, untouched
    pub fn unsnapped(position: Point) -> Self {
        Self {
            position,
            mask: AxisMask::None,
            guides: Vec::new(),
        }
    }

    fn new(position: Point, mask: AxisMask, guides: Vec<Guide>) -> Self {
        Self {
            position,
            mask,
            guides,
        }
    }

    /// Returns the suggested position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Returns the axes the suggestion applies to
    pub fn mask(&self) -> AxisMask {
        self.mask
    }

    /// Returns the guides to draw for this suggestion
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }
}

/// Identifies the dragged element and everything moving with it.
///
/// Strategies must not snap against elements that are themselves being
/// dragged; the context carries the full move-set so candidate capture
/// can exclude them.
#[derive(Debug, Clone)]
pub struct SnapContext {
    element: ElementId,
    moving: Vec<ElementId>,
}

impl SnapContext {
    /// Creates a context for a dragged element and its move-set.
    ///
    /// The dragged element is always part of the move-set.
    pub fn new(element: ElementId, mut moving: Vec<ElementId>) -> Self {
        if !moving.contains(&element) {
            moving.push(element);
        }
        Self { element, moving }
    }

    /// Creates a context for a single dragged element
    pub fn single(element: ElementId) -> Self {
        Self {
            element,
            moving: vec![element],
        }
    }

    /// Returns the dragged (primary) element
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Returns the full move-set
    pub fn moving(&self) -> &[ElementId] {
        &self.moving
    }

    /// Checks whether the given element is part of the move-set
    pub fn is_moving(&self, id: ElementId) -> bool {
        self.moving.contains(&id)
    }
}

/// A pluggable rule computing a corrected position along one or both axes.
pub trait SnapStrategy {
    /// Short stable name used in lifecycle errors
    fn name(&self) -> &'static str;

    /// Captures candidate target geometry once per gesture
    fn begin_snap(&mut self, scene: &Scene, context: &SnapContext) -> Result<(), StateError>;

    /// Computes the suggested position for the current source rectangle.
    ///
    /// A paused strategy returns the unmodified source position with an
    /// empty axis mask.
    fn compute(&self, source_rect: Rect, scene: &Scene) -> Result<SnapResult, StateError>;

    /// Releases captured state at the end of a gesture
    fn end_snap(&mut self) -> Result<(), StateError>;

    /// Temporarily bypasses or re-enables the strategy mid-gesture
    fn pause_snap(&mut self, paused: bool) -> Result<(), StateError>;
}

/// Lifecycle guard shared by every strategy.
///
/// Tracks active/paused flags and converts out-of-sequence calls into
/// [`StateError`]s.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StrategyState {
    active: bool,
    paused: bool,
}

impl StrategyState {
    pub(crate) fn begin(&mut self, strategy: &'static str) -> Result<(), StateError> {
        if self.active {
            return Err(StateError::AlreadyActive { strategy });
        }
        self.active = true;
        self.paused = false;
        Ok(())
    }

    pub(crate) fn end(&mut self, strategy: &'static str) -> Result<(), StateError> {
        if !self.active {
            return Err(StateError::NotActive { strategy });
        }
        self.active = false;
        self.paused = false;
        Ok(())
    }

    pub(crate) fn pause(&mut self, strategy: &'static str, paused: bool) -> Result<(), StateError> {
        if !self.active {
            return Err(StateError::NotActive { strategy });
        }
        self.paused = paused;
        Ok(())
    }

    pub(crate) fn ensure_active(&self, strategy: &'static str) -> Result<(), StateError> {
        if !self.active {
            return Err(StateError::NotActive { strategy });
        }
        Ok(())
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.paused
    }
}

/// One candidate snap position on a single axis.
#[derive(Debug, Clone)]
pub(crate) struct Candidate {
    pub(crate) offset: f32,
    pub(crate) guides: Vec<Guide>,
}

/// Picks the winning candidate on one axis.
///
/// Candidates beyond `distance` are discarded. Of the rest, the first one
/// attaining the minimal magnitude supplies the applied offset; every
/// candidate within `tie_epsilon` of that minimum contributes its guides.
/// Returns `None` when no candidate is within tolerance.
pub(crate) fn select_axis_snap(
    candidates: Vec<Candidate>,
    distance: f32,
    tie_epsilon: f32,
) -> Option<(f32, Vec<Guide>)> {
    let within: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| c.offset.abs() <= distance)
        .collect();
    let best = within
        .iter()
        .map(|c| c.offset.abs())
        .fold(f32::INFINITY, f32::min);
    if !best.is_finite() {
        return None;
    }

    let mut applied = None;
    let mut guides = Vec::new();
    for candidate in within {
        let magnitude = candidate.offset.abs();
        if magnitude <= best && applied.is_none() {
            applied = Some(candidate.offset);
        }
        if magnitude <= best + tie_epsilon {
            guides.extend(candidate.guides);
        }
    }

    applied.map(|offset| (offset, guides))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(offset: f32) -> Candidate {
        Candidate {
            offset,
            guides: vec![Guide::Line {
                axis: Axis::X,
                position: offset,
                from: 0.0,
                to: 1.0,
            }],
        }
    }

    #[test]
    fn lifecycle_guard_enforces_sequence() {
        let mut state = StrategyState::default();
        assert_eq!(
            state.end("s"),
            Err(StateError::NotActive { strategy: "s" })
        );
        assert_eq!(
            state.pause("s", true),
            Err(StateError::NotActive { strategy: "s" })
        );
        assert!(state.begin("s").is_ok());
        assert_eq!(
            state.begin("s"),
            Err(StateError::AlreadyActive { strategy: "s" })
        );
        assert!(state.pause("s", true).is_ok());
        assert!(state.is_paused());
        assert!(state.end("s").is_ok());
        // A fresh gesture starts unpaused
        assert!(state.begin("s").is_ok());
        assert!(!state.is_paused());
    }

    #[test]
    fn selection_keeps_first_minimal_candidate() {
        let picked = select_axis_snap(
            vec![candidate(5.0), candidate(-5.0), candidate(7.0)],
            8.0,
            0.01,
        );
        let (offset, guides) = picked.expect("within tolerance");
        assert_eq!(offset, 5.0);
        // Both tied candidates keep their guides; the 7.0 one does not
        assert_eq!(guides.len(), 2);
    }

    #[test]
    fn selection_discards_out_of_tolerance() {
        assert!(select_axis_snap(vec![candidate(9.0)], 8.0, 0.01).is_none());
        assert!(select_axis_snap(Vec::new(), 8.0, 0.01).is_none());
    }

    #[test]
    fn near_ties_only_affect_guides() {
        let picked = select_axis_snap(
            vec![candidate(-4.005), candidate(4.0)],
            8.0,
            0.01,
        );
        let (offset, guides) = picked.expect("within tolerance");
        assert_eq!(offset, 4.0);
        assert_eq!(guides.len(), 2);
    }

    #[test]
    fn context_always_contains_its_element() {
        let ctx = SnapContext::new(ElementId::new(1), vec![ElementId::new(2)]);
        assert!(ctx.is_moving(ElementId::new(1)));
        assert!(ctx.is_moving(ElementId::new(2)));
        assert!(!ctx.is_moving(ElementId::new(3)));

        let single = SnapContext::single(ElementId::new(5));
        assert_eq!(single.moving(), &[ElementId::new(5)]);
    }
}
