use crate::render::RenderTarget;

/// One acquired swapchain image plus the encoder recording into it.
///
/// The surface texture is presented when it is dropped after submission, so a
/// frame must be handed to [`Gpu::submit`](super::Gpu::submit) promptly.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}

impl GpuFrame {
    /// Borrows the encoder and color view as a render target.
    pub fn target(&mut self) -> RenderTarget<'_> {
        RenderTarget::new(&mut self.encoder, &self.view)
    }
}
