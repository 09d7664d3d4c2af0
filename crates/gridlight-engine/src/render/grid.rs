use crate::grid::{
    storage_buffer_size, CellStates, GridDims, GridError, Vertex, UNIFORM_BUFFER_SIZE,
    UNIT_SQUARE, VERTEX_BUFFER_SIZE, VERTEX_COUNT,
};
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};

use super::buffer::{create_buffer, BufferRole};
use super::shader::{
    CELL_STATE_BINDING, FRAGMENT_ENTRY, GRID_SHADER, GRID_UNIFORM_BINDING, VERTEX_ENTRY,
};

/// Instanced grid renderer.
///
/// All GPU objects are created once in [`GridRenderer::new`] for a fixed grid size
/// and target format. Buffer contents are written by [`GridRenderer::upload`];
/// [`GridRenderer::encode`] records the clear + draw pass.
pub struct GridRenderer {
    dims: GridDims,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,

    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    storage_buffer: wgpu::Buffer,
}

impl GridRenderer {
    /// Fails before creating any GPU object when the grid does not fit the
    /// device's buffer limits.
    pub fn new(ctx: &RenderCtx<'_>, dims: GridDims) -> Result<Self, GridError> {
        check_device_limits(dims, &ctx.device.limits())?;

        let vertex_buffer = create_buffer(
            ctx.device,
            "gridlight cell vertices",
            VERTEX_BUFFER_SIZE,
            BufferRole::Vertex,
        );
        let uniform_buffer = create_buffer(
            ctx.device,
            "gridlight grid uniform",
            UNIFORM_BUFFER_SIZE,
            BufferRole::Uniform,
        );
        let storage_buffer = create_buffer(
            ctx.device,
            "gridlight cell state",
            storage_buffer_size(dims),
            BufferRole::Storage,
        );

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("gridlight grid shader"),
            source: wgpu::ShaderSource::Wgsl(GRID_SHADER.into()),
        });

        let bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("gridlight grid bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: GRID_UNIFORM_BINDING,
                            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(UNIFORM_BUFFER_SIZE),
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: CELL_STATE_BINDING,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Storage { read_only: true },
                                has_dynamic_offset: false,
                                min_binding_size: wgpu::BufferSize::new(
                                    std::mem::size_of::<u32>() as u64,
                                ),
                            },
                            count: None,
                        },
                    ],
                });

        let pipeline_layout =
            ctx.device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("gridlight grid pipeline layout"),
                    bind_group_layouts: &[&bind_group_layout],
                    immediate_size: 0,
                });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("gridlight grid pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("gridlight grid bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: GRID_UNIFORM_BINDING,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: CELL_STATE_BINDING,
                    resource: storage_buffer.as_entire_binding(),
                },
            ],
        });

        log::debug!(
            "grid pipeline ready: {}x{} cells, format {:?}",
            dims.width(),
            dims.height(),
            ctx.surface_format
        );

        Ok(Self {
            dims,
            pipeline,
            bind_group,
            vertex_buffer,
            uniform_buffer,
            storage_buffer,
        })
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Writes square geometry, grid dimensions and cell states.
    ///
    /// `states` must belong to a grid of the size this renderer was built for.
    pub fn upload(&self, queue: &wgpu::Queue, states: &CellStates) -> Result<(), GridError> {
        if states.dims() != self.dims {
            let d = states.dims();
            return Err(GridError::DimsMismatch {
                expected: (self.dims.width(), self.dims.height()),
                actual: (d.width(), d.height()),
            });
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&UNIT_SQUARE));
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&self.dims.as_uniform()),
        );
        queue.write_buffer(&self.storage_buffer, 0, bytemuck::cast_slice(states.as_slice()));

        log::debug!(
            "uploaded {} cell states ({} active)",
            states.len(),
            states.active_count()
        );
        Ok(())
    }

    /// Records one pass: clear to `clear`, then draw every cell instance.
    pub fn encode(&self, target: &mut RenderTarget<'_>, clear: Color) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("gridlight grid pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear.to_wgpu()),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.draw(0..VERTEX_COUNT, 0..self.dims.cell_count());
    }
}

/// Checks the cell-state buffer against the device's storage binding and buffer size limits.
pub(crate) fn check_device_limits(dims: GridDims, limits: &wgpu::Limits) -> Result<(), GridError> {
    let required = storage_buffer_size(dims);
    let limit = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
    if required > limit {
        return Err(GridError::ExceedsDeviceLimits { required, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tutorial_grid_fits_default_limits() {
        assert!(check_device_limits(GridDims::TUTORIAL, &wgpu::Limits::default()).is_ok());
    }

    #[test]
    fn oversized_grid_is_rejected() {
        let dims = GridDims::square(6000).unwrap();
        let limits = wgpu::Limits::default();
        let limit = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
        assert_eq!(
            check_device_limits(dims, &limits),
            Err(GridError::ExceedsDeviceLimits {
                required: 144_000_000,
                limit,
            })
        );
    }

    #[test]
    fn smaller_of_binding_and_buffer_limit_applies() {
        let limits = wgpu::Limits {
            max_buffer_size: 1024,
            ..wgpu::Limits::default()
        };
        // 16x16 cells = 1024 bytes fits, 17x16 does not.
        assert!(check_device_limits(GridDims::square(16).unwrap(), &limits).is_ok());
        assert_eq!(
            check_device_limits(GridDims::new(17, 16).unwrap(), &limits),
            Err(GridError::ExceedsDeviceLimits {
                required: 1088,
                limit: 1024,
            })
        );
    }
}
