//! Gridlight engine crate.
//!
//! Draws a grid of colored squares with one instanced wgpu draw call: a shared
//! 6-vertex square, a `vec2f` grid-size uniform and a `u32` cell-state storage
//! buffer. Owns the platform + GPU runtime pieces used by the viewer binary.

pub mod core;
pub mod device;
pub mod grid;
pub mod logging;
pub mod paint;
pub mod render;
pub mod window;
