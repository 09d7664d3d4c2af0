//! Grid data model.
//!
//! A grid is `width x height` cells drawn as instances of one shared square.
//! Cell `i` (row-major, x fastest) is drawn at full size when its state is
//! nonzero and collapsed to a point otherwise.
//!
//! Coordinates:
//! - cell `(0, 0)` sits in the lower-left corner of the viewport
//! - +X right, +Y up (clip space)

mod config;
mod dims;
mod error;
mod geometry;
mod state;
pub mod transform;

pub use config::GridConfig;
pub use dims::GridDims;
pub use error::GridError;
pub use geometry::{
    storage_buffer_size, Vertex, SQUARE_EXTENT, UNIFORM_BUFFER_SIZE, UNIT_SQUARE, VERTEX_BUFFER_SIZE,
    VERTEX_COUNT,
};
pub use state::{CellPattern, CellStates};
