//! Lodestar Core Types and Definitions
//!
//! This crate provides the foundational types for the Lodestar canvas
//! engine. It includes:
//!
//! - **Geometry**: Points, sizes, rectangles, and axis types ([`geometry`] module)
//! - **Scene**: The spatial element model — nodes, groups, wires, and ports
//!   ([`scene`] module)

pub mod geometry;
pub mod scene;
