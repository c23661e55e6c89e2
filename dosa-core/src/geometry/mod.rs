//! Geometric primitives: points and axis-aligned rectangles.

pub mod r2;
pub mod rect;
