use anyhow::{Context, Result};

use crate::grid::GridConfig;
use crate::render::{GridRenderer, RenderCtx, RenderTarget};

use super::adapter::check_adapter;
use super::GpuInit;

/// Texture format used for offscreen frames; readback bytes equal shader output.
pub const OFFSCREEN_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Tightly packed RGBA8 pixels, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaImage {
    /// Returns the pixel at `(x, y)`, origin top-left.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Surface-less GPU context rendering grid frames into a texture.
pub struct OffscreenGpu {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl OffscreenGpu {
    pub async fn new(init: GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = match pick_adapter(&instance, &init, false).await {
            Ok(adapter) => adapter,
            Err(e) => {
                log::warn!("{e:#}; retrying with the fallback adapter");
                pick_adapter(&instance, &init, true).await?
            }
        };

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gridlight offscreen device"),
                required_features: init.required_features,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        Ok(Self { device, queue })
    }

    /// Blocking variant of [`OffscreenGpu::new`].
    pub fn new_blocking(init: GpuInit) -> Result<Self> {
        pollster::block_on(Self::new(init))
    }

    /// Renders one grid frame at `width x height` and reads it back.
    pub fn render_grid(&self, config: &GridConfig, width: u32, height: u32) -> Result<RgbaImage> {
        anyhow::ensure!(width > 0 && height > 0, "offscreen target has zero size");
        let rctx = RenderCtx::new(&self.device, &self.queue, OFFSCREEN_FORMAT);
        let renderer = GridRenderer::new(&rctx, config.dims)?;
        let states = config.states()?;
        renderer.upload(&self.queue, &states)?;

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("gridlight offscreen target"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: OFFSCREEN_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let padded_bpr = padded_bytes_per_row(width);
        let readback = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("gridlight offscreen readback"),
            size: padded_bpr as u64 * height as u64,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gridlight offscreen encoder"),
            });

        {
            let mut target = RenderTarget::new(&mut encoder, &view);
            renderer.encode(&mut target, config.clear);
        }

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bpr),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .context("failed waiting for offscreen frame")?;
        rx.recv()
            .context("readback map callback was dropped")?
            .context("failed to map readback buffer")?;

        let pixels = {
            let mapped = slice.get_mapped_range();
            unpad_rows(&mapped, width, height, padded_bpr)
        };
        readback.unmap();

        log::debug!("offscreen frame read back: {width}x{height}");
        Ok(RgbaImage {
            width,
            height,
            pixels,
        })
    }
}

async fn pick_adapter(
    instance: &wgpu::Instance,
    init: &GpuInit,
    force_fallback: bool,
) -> Result<wgpu::Adapter> {
    let adapter = instance
        .request_adapter(&adapter_options(init, force_fallback))
        .await
        .context("failed to find a suitable GPU adapter")?;

    check_adapter(&adapter)?;
    Ok(adapter)
}

/// Surface-less adapter request; `force_fallback` selects the software adapter.
pub(crate) fn adapter_options(
    init: &GpuInit,
    force_fallback: bool,
) -> wgpu::RequestAdapterOptions<'static, 'static> {
    wgpu::RequestAdapterOptions {
        power_preference: init.power_preference,
        compatible_surface: None,
        force_fallback_adapter: force_fallback,
    }
}

/// Row pitch rounded up to `COPY_BYTES_PER_ROW_ALIGNMENT`.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * 4;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

pub(crate) fn unpad_rows(data: &[u8], width: u32, height: u32, padded_bpr: u32) -> Vec<u8> {
    let row = (width * 4) as usize;
    let mut out = Vec::with_capacity(row * height as usize);
    for chunk in data.chunks(padded_bpr as usize).take(height as usize) {
        out.extend_from_slice(&chunk[..row]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{transform, CellPattern, GridDims, GridError};
    use crate::paint::Color;

    // ── readback layout ───────────────────────────────────────────────────

    #[test]
    fn rows_are_padded_to_alignment() {
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
        assert_eq!(padded_bytes_per_row(1), 256);
    }

    #[test]
    fn unpad_strips_row_padding() {
        let mut data = vec![0u8; 256 * 2];
        data[0..4].copy_from_slice(&[1, 2, 3, 4]);
        data[256..260].copy_from_slice(&[5, 6, 7, 8]);
        let out = unpad_rows(&data, 1, 2, 256);
        assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn pixel_lookup_is_bounds_checked() {
        let img = RgbaImage {
            width: 2,
            height: 1,
            pixels: vec![0, 0, 0, 0, 9, 8, 7, 6],
        };
        assert_eq!(img.pixel(1, 0), Some([9, 8, 7, 6]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 1), None);
    }

    #[test]
    fn pixel_index_does_not_overflow_u32() {
        let img = RgbaImage {
            width: 100_000,
            height: 100_000,
            pixels: Vec::new(),
        };
        assert_eq!(img.pixel(99_999, 99_999), None);
    }

    #[test]
    fn fallback_request_targets_software_adapter() {
        let init = GpuInit::default();
        assert!(!adapter_options(&init, false).force_fallback_adapter);
        let fallback = adapter_options(&init, true);
        assert!(fallback.force_fallback_adapter);
        assert!(fallback.compatible_surface.is_none());
        assert_eq!(fallback.power_preference, init.power_preference);
    }

    // ── rendered frames ───────────────────────────────────────────────────

    const SIZE: u32 = 256;

    /// Returns `None` when the machine has no usable adapter.
    fn gpu() -> Option<OffscreenGpu> {
        match OffscreenGpu::new_blocking(GpuInit::default()) {
            Ok(gpu) => Some(gpu),
            Err(e) => {
                eprintln!("SKIPPED offscreen test, no hardware or fallback adapter: {e:#}");
                None
            }
        }
    }

    /// Pixel at the center of `cell`; cell row 0 is the bottom of the image.
    fn cell_center(img: &RgbaImage, cell: (u32, u32), dims: GridDims) -> [u8; 4] {
        let cw = img.width / dims.width();
        let ch = img.height / dims.height();
        let x = cell.0 * cw + cw / 2;
        let y = (dims.height() - 1 - cell.1) * ch + ch / 2;
        img.pixel(x, y).unwrap()
    }

    fn assert_close(actual: [u8; 4], expected: [u8; 4]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!(a.abs_diff(e) <= 1, "got {actual:?}, expected {expected:?}");
        }
    }

    #[test]
    fn every_third_cell_is_drawn() {
        let Some(gpu) = gpu() else { return };
        let config = GridConfig::tutorial();
        let img = gpu.render_grid(&config, SIZE, SIZE).unwrap();
        let background = Color::BACKGROUND.to_rgba8();

        for i in 0..config.dims.cell_count() {
            let cell = transform::unravel(i, config.dims);
            let expected = if i % 3 == 0 {
                Color::from_array(transform::cell_color(cell, config.dims)).to_rgba8()
            } else {
                background
            };
            assert_close(cell_center(&img, cell, config.dims), expected);
        }
    }

    #[test]
    fn small_grid_draws_every_cell_with_gaps() {
        let Some(gpu) = gpu() else { return };
        let config = GridConfig::small();
        let img = gpu.render_grid(&config, SIZE, SIZE).unwrap();

        for i in 0..16 {
            let cell = transform::unravel(i, config.dims);
            let expected = Color::from_array(transform::cell_color(cell, config.dims)).to_rgba8();
            assert_close(cell_center(&img, cell, config.dims), expected);
        }
        // Corners fall in the gap around the squares.
        assert_close(img.pixel(0, 0).unwrap(), Color::BACKGROUND.to_rgba8());
        assert_close(img.pixel(SIZE - 1, SIZE - 1).unwrap(), Color::BACKGROUND.to_rgba8());
    }

    #[test]
    fn empty_grid_is_uniform_clear_color() {
        let Some(gpu) = gpu() else { return };
        let config = GridConfig::new(GridDims::TUTORIAL, CellPattern::None);
        let img = gpu.render_grid(&config, 64, 64).unwrap();
        let bg = Color::BACKGROUND.to_rgba8();
        assert!(img.pixels.chunks(4).all(|p| p == bg));
    }

    #[test]
    fn clear_color_override_fills_empty_grid() {
        let Some(gpu) = gpu() else { return };
        let red = Color::rgba(1.0, 0.0, 0.0, 1.0);
        let config = GridConfig::new(GridDims::SMALL, CellPattern::None).with_clear(red);
        let img = gpu.render_grid(&config, 32, 32).unwrap();
        assert!(img.pixels.chunks(4).all(|p| p == [255, 0, 0, 255]));
    }

    #[test]
    fn grid_beyond_device_limits_is_an_error() {
        let Some(gpu) = gpu() else { return };
        let config = GridConfig::new(GridDims::square(6000).unwrap(), CellPattern::None);
        let err = gpu.render_grid(&config, 16, 16).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GridError>(),
            Some(GridError::ExceedsDeviceLimits { .. })
        ));
    }

    #[test]
    fn invalid_pattern_fails_before_rendering() {
        let Some(gpu) = gpu() else { return };
        let config = GridConfig::new(GridDims::SMALL, CellPattern::Explicit(vec![1; 3]));
        assert!(gpu.render_grid(&config, 16, 16).is_err());
    }
}
