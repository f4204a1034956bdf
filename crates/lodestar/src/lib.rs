//! Lodestar - a headless snapping, alignment, and drag-gesture engine
//! for node-graph canvases.
//!
//! Given a scene of positioned elements (nodes, groups, wires), the
//! engine computes what the host should change — corrected drag deltas
//! honoring grid, border, port, and equal-spacing constraints, and
//! per-element deltas for align/distribute operations — and leaves the
//! applying, drawing, and undo recording to the host.
//!
//! # Overview
//!
//! - [`aggregate`] - clusters a selection into rigid bounding rects,
//!   expanding groups through overlap-based membership.
//! - [`placement`] - alignment and equal-gap distribution over those
//!   clusters.
//! - [`snap`] - the pluggable snap strategies and the [`Snapper`]
//!   orchestrator that merges them per axis each move tick.
//! - [`drag`] - the press/move/commit-or-cancel gesture state machine
//!   with cooperative auto-pan.
//!
//! # Examples
//!
//! ```rust
//! use lodestar::config::AppConfig;
//! use lodestar::drag::{DragController, Modifiers, PointerEvent, Viewport};
//! use lodestar::snap::Snapper;
//! use lodestar_core::geometry::{Point, Rect, Size};
//! use lodestar_core::scene::{Element, ElementId, ElementKind, Scene};
//!
//! let mut scene = Scene::new();
//! scene.insert(Element::new(
//!     ElementId::new(1),
//!     ElementKind::Node,
//!     Rect::new(0.0, 0.0, 40.0, 30.0),
//! ));
//!
//! let config = AppConfig::default();
//! let mut controller = DragController::new(
//!     Snapper::from_settings(config.snap()),
//!     config.pan().clone(),
//! );
//!
//! let viewport = Viewport::new(Point::default(), 1.0, Size::new(800.0, 600.0));
//! let selection = [ElementId::new(1)];
//! let press = PointerEvent::from_screen(&viewport, Point::new(5.0, 5.0), Modifiers::none());
//! controller
//!     .pointer_down(&scene, &viewport, press, &selection)
//!     .expect("fresh controller is idle");
//! ```

pub mod aggregate;
pub mod config;
pub mod drag;
pub mod placement;
pub mod snap;

mod error;

pub use lodestar_core::{geometry, scene};

pub use aggregate::{compute_bounding_rects, BoundingRect};
pub use config::AppConfig;
pub use drag::{Command, DragController, DragPhase, Viewport};
pub use error::StateError;
pub use placement::{align, distribute};
pub use snap::{SnapContext, SnapResult, SnapStrategy, Snapper};
