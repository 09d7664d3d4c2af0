/// Intended use of a GPU buffer.
///
/// Every role is also a copy destination so contents can be (re)written with
/// `Queue::write_buffer` after creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BufferRole {
    Vertex,
    Uniform,
    /// Read-only from shaders.
    Storage,
}

impl BufferRole {
    pub fn usages(self) -> wgpu::BufferUsages {
        let role = match self {
            BufferRole::Vertex => wgpu::BufferUsages::VERTEX,
            BufferRole::Uniform => wgpu::BufferUsages::UNIFORM,
            BufferRole::Storage => wgpu::BufferUsages::STORAGE,
        };
        role | wgpu::BufferUsages::COPY_DST
    }
}

/// Allocates an uninitialized buffer. Upload is a separate step.
pub fn create_buffer(
    device: &wgpu::Device,
    label: &str,
    size: u64,
    role: BufferRole,
) -> wgpu::Buffer {
    log::debug!("creating {role:?} buffer `{label}` ({size} bytes)");
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size,
        usage: role.usages(),
        mapped_at_creation: false,
    })
}
