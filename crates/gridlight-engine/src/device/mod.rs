//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - creating & configuring the Surface (swapchain)
//! - acquiring frames and providing encoders/views for rendering
//! - rendering frames offscreen and reading them back

mod adapter;
mod context;
mod error;
mod frame;
mod init;
mod offscreen;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
pub use offscreen::{OffscreenGpu, RgbaImage, OFFSCREEN_FORMAT};
