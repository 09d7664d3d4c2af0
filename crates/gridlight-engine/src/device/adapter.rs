use anyhow::Result;

/// Rejects adapters that cannot run the grid pipeline.
///
/// The vertex stage reads cell states from a storage buffer, which downlevel
/// backends (e.g. WebGL2-class GL) do not support.
pub(crate) fn check_adapter(adapter: &wgpu::Adapter) -> Result<()> {
    let info = adapter.get_info();
    let downlevel = adapter.get_downlevel_capabilities();

    anyhow::ensure!(
        downlevel.flags.contains(wgpu::DownlevelFlags::VERTEX_STORAGE),
        "adapter `{}` ({:?}) cannot read storage buffers in vertex shaders",
        info.name,
        info.backend
    );
    anyhow::ensure!(
        adapter.limits().max_storage_buffers_per_shader_stage >= 1,
        "adapter `{}` ({:?}) exposes no storage buffer slots",
        info.name,
        info.backend
    );

    log::info!(
        "using adapter `{}` ({:?}, {:?})",
        info.name,
        info.backend,
        info.device_type
    );
    Ok(())
}
