//! GPU rendering subsystem.
//!
//! The grid renderer owns its GPU resources (pipeline, buffers, bind group) and
//! records a single clear + instanced draw pass per frame.
//!
//! Convention:
//! - cell geometry is authored in clip space around the origin
//! - the vertex shader scales it into the cell's `2 / N` slot

mod buffer;
mod ctx;
mod grid;
pub mod shader;

pub use buffer::{create_buffer, BufferRole};
pub use ctx::{RenderCtx, RenderTarget};
pub use grid::GridRenderer;
