//! Auto-placement strategies.
//!
//! Alignment and distribution both operate on the bounding-rect clusters
//! of the current selection: every element inside a cluster receives the
//! identical delta, so groups and their carried contents translate as
//! rigid units. Results are delta maps in cluster order; applying them is
//! the host's job (typically through a single batched command).

mod alignment;
mod distribution;

pub use alignment::align;
pub use distribution::distribute;
