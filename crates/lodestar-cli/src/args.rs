//! Command-line argument definitions for the Lodestar CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments select the input scene, the operation
//! to apply, its parameters, and logging verbosity.

use clap::{Parser, ValueEnum};

use lodestar_core::geometry::RectReference;
use lodestar_core::scene::Orientation;

/// Command-line arguments for the Lodestar scenario runner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input scene file (TOML)
    #[arg(help = "Path to the input scene file")]
    pub input: String,

    /// Operation to apply to the scene
    #[arg(long, value_enum)]
    pub op: Operation,

    /// Alignment reference line (align)
    #[arg(long, value_enum)]
    pub reference: Option<ReferenceArg>,

    /// Distribution orientation (distribute)
    #[arg(long, value_enum)]
    pub orientation: Option<OrientationArg>,

    /// Dragged element id (snap-drag)
    #[arg(long)]
    pub element: Option<u64>,

    /// Horizontal drag delta (snap-drag)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dx: f32,

    /// Vertical drag delta (snap-drag)
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub dy: f32,

    /// Selected element ids, comma separated; defaults to every movable
    /// element in the scene
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<u64>,

    /// Path to the output scene file
    #[arg(short, long, default_value = "out.toml")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// The operations the runner can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    /// Align the selection on a reference line
    Align,
    /// Distribute the selection evenly along an axis
    Distribute,
    /// Drag one element by a delta, with snapping applied
    SnapDrag,
}

/// CLI spelling of [`RectReference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReferenceArg {
    Left,
    HorizontalCenter,
    Right,
    Top,
    VerticalCenter,
    Bottom,
}

impl From<ReferenceArg> for RectReference {
    fn from(value: ReferenceArg) -> Self {
        match value {
            ReferenceArg::Left => RectReference::Left,
            ReferenceArg::HorizontalCenter => RectReference::HorizontalCenter,
            ReferenceArg::Right => RectReference::Right,
            ReferenceArg::Top => RectReference::Top,
            ReferenceArg::VerticalCenter => RectReference::VerticalCenter,
            ReferenceArg::Bottom => RectReference::Bottom,
        }
    }
}

/// CLI spelling of [`Orientation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    Horizontal,
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(value: OrientationArg) -> Self {
        match value {
            OrientationArg::Horizontal => Orientation::Horizontal,
            OrientationArg::Vertical => Orientation::Vertical,
        }
    }
}
