mod app;

use gridlight_engine::device::GpuInit;
use gridlight_engine::grid::GridConfig;
use gridlight_engine::logging::{init_logging, LoggingConfig};
use gridlight_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use app::GridApp;

fn main() {
    init_logging(LoggingConfig::default());

    if let Err(e) = run() {
        log::error!("gridlight failed: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = GridConfig::tutorial();
    let title = format!(
        "gridlight {}x{}",
        config.dims.width(),
        config.dims.height()
    );

    let app = GridApp::new(config)?;

    Runtime::run(
        RuntimeConfig {
            title,
            initial_size: LogicalSize::new(512.0, 512.0),
            resizable: false,
        },
        GpuInit::default(),
        app,
    )
}
