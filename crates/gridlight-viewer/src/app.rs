use gridlight_engine::core::{App, AppControl, FrameCtx};
use gridlight_engine::grid::{CellStates, GridConfig, GridError};
use gridlight_engine::render::GridRenderer;

/// Draws one configured grid whenever the window needs repainting.
pub struct GridApp {
    config: GridConfig,
    states: CellStates,
    /// Built on the first frame, once the device and surface format are known.
    renderer: Option<GridRenderer>,
}

impl GridApp {
    /// Validates the cell states up front so a bad configuration never opens a window.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let states = config.states()?;
        log::info!(
            "grid {}x{}: {} of {} cells active",
            config.dims.width(),
            config.dims.height(),
            states.active_count(),
            states.len()
        );
        Ok(Self {
            config,
            states,
            renderer: None,
        })
    }

    fn ensure_renderer(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<&GridRenderer, GridError> {
        let renderer = match self.renderer.take() {
            Some(r) => r,
            None => {
                let rctx = ctx.render_ctx();
                let r = GridRenderer::new(&rctx, self.config.dims)?;
                r.upload(rctx.queue, &self.states)?;
                r
            }
        };
        Ok(self.renderer.insert(renderer))
    }
}

impl App for GridApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let clear = self.config.clear;
        let renderer = match self.ensure_renderer(ctx) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to prepare grid renderer: {e}");
                return AppControl::Exit;
            }
        };

        ctx.render(|_, target| renderer.encode(target, clear))
    }
}
