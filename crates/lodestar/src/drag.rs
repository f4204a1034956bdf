//! The interactive drag gesture: press, move, commit or cancel.
//!
//! The controller owns one gesture at a time. On press it captures the
//! selection's rigid move-set (expanded through group carry), on every
//! move it derives a snapped common delta and translates the whole set,
//! and on release it emits a single batched [`Command`] so the host's
//! command/undo system records one atomic step. Escape restores the
//! captured positions and, if auto-pan occurred, asks the host to reframe
//! the view.
//!
//! Auto-pan is cooperative: the host runs the timer and calls
//! [`DragController::tick`] on its cadence; the controller decides from
//! the last pointer position whether and how far to pan.

use indexmap::IndexMap;
use log::{debug, trace};

use lodestar_core::geometry::{Point, Rect, Size};
use lodestar_core::scene::{ElementId, Scene};

use crate::aggregate::compute_bounding_rects;
use crate::config::PanSettings;
use crate::error::StateError;
use crate::snap::{Guide, SnapContext, Snapper};

/// The view transform between screen and graph coordinate spaces.
///
/// `offset` is the screen position of the graph origin; a screen point
/// maps to `(screen - offset) / zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    offset: Point,
    zoom: f32,
    size: Size,
}

impl Viewport {
    /// Creates a viewport with the given transform and screen size
    pub fn new(offset: Point, zoom: f32, size: Size) -> Self {
        Self { offset, zoom, size }
    }

    /// Returns the screen position of the graph origin
    pub fn offset(self) -> Point {
        self.offset
    }

    /// Returns the zoom factor
    pub fn zoom(self) -> f32 {
        self.zoom
    }

    /// Returns the viewport's screen size
    pub fn size(self) -> Size {
        self.size
    }

    /// Converts a screen position to graph coordinates
    pub fn screen_to_graph(self, screen: Point) -> Point {
        screen.sub(self.offset).scale(1.0 / self.zoom)
    }

    /// Converts a graph position to screen coordinates
    pub fn graph_to_screen(self, graph: Point) -> Point {
        graph.scale(self.zoom).add(self.offset)
    }

    /// Pans the view by a vector in graph units; content under a fixed
    /// screen point shifts by the same vector
    pub fn pan_by(&mut self, graph_delta: Point) {
        self.offset = self.offset.sub(graph_delta.scale(self.zoom));
    }

    /// Replaces the view offset
    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }
}

/// Modifier-key state accompanying a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Held shift pauses snapping for the rest of the gesture tick.
    pub shift: bool,
    pub alt: bool,
    pub action: bool,
}

impl Modifiers {
    /// No modifiers held
    pub fn none() -> Self {
        Self::default()
    }
}

/// A pointer event in both coordinate spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub screen: Point,
    pub graph: Point,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates an event with explicit positions in both spaces
    pub fn new(screen: Point, graph: Point, modifiers: Modifiers) -> Self {
        Self {
            screen,
            graph,
            modifiers,
        }
    }

    /// Creates an event from a screen position, deriving the graph
    /// position through the viewport
    pub fn from_screen(viewport: &Viewport, screen: Point, modifiers: Modifiers) -> Self {
        Self {
            screen,
            graph: viewport.screen_to_graph(screen),
            modifiers,
        }
    }
}

/// A request the engine asks the host to execute.
///
/// The engine computes what to change; applying it (and recording undo)
/// stays with the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Move the listed elements by one common delta, as one undoable step.
    MoveElements {
        delta: Point,
        elements: Vec<ElementId>,
    },
    /// Move elements by individual deltas computed by a placement
    /// operation, as one undoable step.
    AutoPlaceElements { deltas: IndexMap<ElementId, Point> },
    /// Restore the view transform, typically after a cancelled gesture
    /// auto-panned.
    ReframeView { offset: Point, zoom: f32 },
}

impl Command {
    /// Wraps placement deltas in a command
    pub fn auto_place(deltas: IndexMap<ElementId, Point>) -> Self {
        Command::AutoPlaceElements { deltas }
    }
}

/// Where the controller is within a gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down on a draggable element; movement hasn't passed the
    /// drag threshold yet.
    Pressed,
    Dragging,
}

/// Per-gesture state, created on press and discarded on release or
/// cancellation.
#[derive(Debug)]
struct Session {
    start_graph: Point,
    primary_start_rect: Rect,
    captured: Vec<(ElementId, Rect)>,
    applied_delta: Point,
    pan_travel: Point,
    pointer_screen: Point,
    initial_view_offset: Point,
    initial_view_zoom: f32,
    snap_paused: bool,
}

/// The drag-gesture state machine.
pub struct DragController {
    snapper: Snapper,
    pan: PanSettings,
    start_threshold: f32,
    phase: DragPhase,
    session: Option<Session>,
    guides: Vec<Guide>,
}

impl DragController {
    /// Creates a controller over the given snapper and pan settings
    pub fn new(snapper: Snapper, pan: PanSettings) -> Self {
        Self {
            snapper,
            pan,
            start_threshold: 2.0,
            phase: DragPhase::Idle,
            session: None,
            guides: Vec::new(),
        }
    }

    /// Sets the movement threshold (in graph units) past which a press
    /// becomes a drag
    pub fn set_start_threshold(&mut self, threshold: f32) -> &mut Self {
        self.start_threshold = threshold;
        self
    }

    /// Returns the current gesture phase
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Returns the guides produced by the most recent move tick
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Returns the move-set of the active gesture, in capture order
    pub fn moving_elements(&self) -> Vec<ElementId> {
        self.session
            .as_ref()
            .map(|s| s.captured.iter().map(|(id, _)| *id).collect())
            .unwrap_or_default()
    }

    /// Handles pointer-down over the canvas.
    ///
    /// The press starts a gesture only when it lands on a movable selected
    /// element; the move-set is the selection's bounding-rect clusters,
    /// so groups carry their overlapping contents. An empty effective
    /// move-set leaves the controller idle — never an error.
    pub fn pointer_down(
        &mut self,
        scene: &Scene,
        viewport: &Viewport,
        event: PointerEvent,
        selection: &[ElementId],
    ) -> Result<(), StateError> {
        if self.phase != DragPhase::Idle {
            return Ok(());
        }

        let primary = selection.iter().copied().find(|&id| {
            scene.element(id).is_some_and(|e| {
                e.is_movable() && !e.is_wire() && e.rect().contains_point(event.graph)
            })
        });
        let Some(primary) = primary else {
            return Ok(());
        };

        let captured: Vec<(ElementId, Rect)> = compute_bounding_rects(scene, selection)
            .iter()
            .flat_map(|cluster| cluster.elements().iter().copied())
            .filter_map(|id| scene.element(id).map(|e| (id, e.rect())))
            .collect();
        if captured.is_empty() {
            return Ok(());
        }

        let primary_start_rect = scene
            .element(primary)
            .map(|e| e.rect())
            .unwrap_or_default();
        let context = SnapContext::new(primary, captured.iter().map(|(id, _)| *id).collect());
        self.snapper.begin_snap(scene, &context)?;

        debug!(
            primary = primary.raw(),
            captured_len = captured.len();
            "Drag gesture started"
        );
        self.session = Some(Session {
            start_graph: event.graph,
            primary_start_rect,
            captured,
            applied_delta: Point::default(),
            pan_travel: Point::default(),
            pointer_screen: event.screen,
            initial_view_offset: viewport.offset(),
            initial_view_zoom: viewport.zoom(),
            snap_paused: false,
        });
        self.phase = DragPhase::Pressed;
        Ok(())
    }

    /// Handles pointer movement during a gesture.
    ///
    /// Within one tick the order is fixed: snap the primary element's
    /// rectangle, derive the common delta, translate every captured
    /// element by it. Elements that vanished mid-gesture are skipped.
    pub fn pointer_move(&mut self, scene: &mut Scene, event: PointerEvent) -> Result<(), StateError> {
        match self.phase {
            DragPhase::Idle => return Ok(()),
            DragPhase::Pressed => {
                let session = self.session.as_mut().expect("session exists while pressed");
                session.pointer_screen = event.screen;
                if event.graph.sub(session.start_graph).hypot() < self.start_threshold {
                    return Ok(());
                }
                self.phase = DragPhase::Dragging;
            }
            DragPhase::Dragging => {}
        }

        let session = self.session.as_mut().expect("session exists while dragging");
        if event.modifiers.shift != session.snap_paused {
            self.snapper.pause_snap(event.modifiers.shift)?;
            session.snap_paused = event.modifiers.shift;
        }

        let raw_delta = event.graph.sub(session.start_graph);
        let target = session.primary_start_rect.translate(raw_delta);
        let result = self.snapper.snapped_position(target, scene)?;
        let snapped_delta = result.position().sub(session.primary_start_rect.origin());

        for (id, start_rect) in &session.captured {
            scene.set_rect(*id, start_rect.translate(snapped_delta));
        }
        session.applied_delta = snapped_delta;
        session.pointer_screen = event.screen;
        self.guides = result.guides().to_vec();

        trace!(
            delta_x = snapped_delta.x(),
            delta_y = snapped_delta.y();
            "Drag tick applied"
        );
        Ok(())
    }

    /// Advances auto-pan by one host timer tick.
    ///
    /// While the pointer sits within the edge margin, the view pans and
    /// the dragged elements ride along so they stay under the pointer.
    /// Pan travel accumulates separately from the drag delta so
    /// cancellation can restore the view independently.
    pub fn tick(&mut self, scene: &mut Scene, viewport: &mut Viewport) -> Result<(), StateError> {
        if self.phase != DragPhase::Dragging {
            return Ok(());
        }
        let session = self.session.as_mut().expect("session exists while dragging");

        let pan_screen = edge_pan_vector(session.pointer_screen, viewport.size(), &self.pan);
        if pan_screen.is_zero() {
            return Ok(());
        }
        let pan_graph = pan_screen.scale(1.0 / viewport.zoom());

        viewport.pan_by(pan_graph);
        session.pan_travel = session.pan_travel.add(pan_graph);
        session.applied_delta = session.applied_delta.add(pan_graph);
        for (id, start_rect) in &session.captured {
            scene.set_rect(*id, start_rect.translate(session.applied_delta));
        }

        trace!(
            pan_x = pan_graph.x(),
            pan_y = pan_graph.y();
            "Auto-pan tick"
        );
        Ok(())
    }

    /// Handles pointer-up: commits the gesture.
    ///
    /// A drag produces exactly one batched move command; a click (press
    /// without crossing the drag threshold) and a zero-delta drag produce
    /// nothing.
    pub fn pointer_up(&mut self, _scene: &mut Scene) -> Result<Vec<Command>, StateError> {
        match self.phase {
            DragPhase::Idle => Ok(Vec::new()),
            DragPhase::Pressed => {
                self.snapper.end_snap()?;
                self.reset();
                Ok(Vec::new())
            }
            DragPhase::Dragging => {
                let session = self.session.take().expect("session exists while dragging");
                self.snapper.end_snap()?;
                self.reset();

                if session.applied_delta.is_zero() {
                    return Ok(Vec::new());
                }
                let elements = session.captured.iter().map(|(id, _)| *id).collect();
                debug!(
                    delta_x = session.applied_delta.x(),
                    delta_y = session.applied_delta.y();
                    "Drag gesture committed"
                );
                Ok(vec![Command::MoveElements {
                    delta: session.applied_delta,
                    elements,
                }])
            }
        }
    }

    /// Cancels the gesture (Escape).
    ///
    /// Every captured element returns to its initial position, and if any
    /// auto-pan accumulated, the viewport is restored and a
    /// [`Command::ReframeView`] mirrors the restoration for the host's
    /// command system.
    pub fn cancel(
        &mut self,
        scene: &mut Scene,
        viewport: &mut Viewport,
    ) -> Result<Vec<Command>, StateError> {
        if self.phase == DragPhase::Idle {
            return Ok(Vec::new());
        }
        let session = self.session.take().expect("session exists while active");

        for (id, start_rect) in &session.captured {
            scene.set_rect(*id, *start_rect);
        }

        let mut commands = Vec::new();
        if !session.pan_travel.is_zero() {
            viewport.set_offset(session.initial_view_offset);
            commands.push(Command::ReframeView {
                offset: session.initial_view_offset,
                zoom: session.initial_view_zoom,
            });
        }

        self.snapper.end_snap()?;
        self.reset();
        debug!("Drag gesture cancelled");
        Ok(commands)
    }

    fn reset(&mut self) {
        self.phase = DragPhase::Idle;
        self.session = None;
        self.guides.clear();
    }
}

/// The per-tick pan vector in screen units for a pointer position.
///
/// Speed ramps from `speed` at the margin boundary up to `max_speed` at
/// the viewport edge.
fn edge_pan_vector(pointer: Point, size: Size, settings: &PanSettings) -> Point {
    let margin = settings.edge_margin();
    let mut components = [0.0f32; 2];
    for (slot, (position, extent)) in [
        (pointer.x(), size.width()),
        (pointer.y(), size.height()),
    ]
    .into_iter()
    .enumerate()
    {
        let speed_at = |depth: f32| {
            let depth = depth.clamp(0.0, 1.0);
            settings.speed() + (settings.max_speed() - settings.speed()) * depth
        };
        if position < margin {
            components[slot] = -speed_at((margin - position) / margin);
        } else if position > extent - margin {
            components[slot] = speed_at((position - (extent - margin)) / margin);
        }
    }
    Point::new(components[0], components[1])
}
