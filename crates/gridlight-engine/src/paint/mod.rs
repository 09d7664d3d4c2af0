//! Color model shared by the renderer and the application layer.

mod color;

pub use color::Color;
