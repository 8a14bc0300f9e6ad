use anyhow::Result;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use cracking_engine::core::{App, AppControl, FrameCtx};
use cracking_engine::device::GpuInit;
use cracking_engine::logging::{LoggingConfig, init_logging};
use cracking_engine::mesh::{Color, GeometryStore, MeshCapacity, MeshError, Object, Position};
use cracking_engine::render::{MeshRenderer, RenderCtx, ShaderPaths, SyncAction};
use cracking_engine::window::{Runtime, RuntimeConfig};

/// Two triangles side by side; Space swaps their colors.
struct Demo {
    store: GeometryStore,
    left: Object,
    right: Object,
    swapped: bool,
    renderer: Option<MeshRenderer>,
}

impl Demo {
    fn new() -> Result<Self, MeshError> {
        let mut store = GeometryStore::new(MeshCapacity::default())?;

        let left = store.create_triangle(
            Position::new(0.0, 0.5, 0.0),
            Position::new(-0.5, 0.0, 0.0),
            Position::new(0.5, 0.0, 0.0),
        )?;
        let right = store.create_triangle(
            Position::new(0.6, 0.5, 0.0),
            Position::new(0.6, 0.0, 0.0),
            Position::new(0.9, 0.0, 0.0),
        )?;

        let mut demo = Self {
            store,
            left,
            right,
            swapped: false,
            renderer: None,
        };
        demo.apply_colors()?;
        Ok(demo)
    }

    fn apply_colors(&mut self) -> Result<(), MeshError> {
        let (left, right) = if self.swapped {
            (Color::GREEN, Color::RED)
        } else {
            (Color::RED, Color::GREEN)
        };
        self.store.set_object_color(&self.left, left)?;
        self.store.set_object_color(&self.right, right)
    }
}

impl App for Demo {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        let renderer = MeshRenderer::new(ctx, &ShaderPaths::default(), &self.store)?;
        log::info!(
            "{} vertices, {} indices on the GPU",
            renderer.mesh().vertex_count(),
            renderer.mesh().index_count()
        );
        self.renderer = Some(renderer);
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if let WindowEvent::KeyboardInput { event: key, .. } = event
            && key.state == ElementState::Pressed
            && !key.repeat
            && key.physical_key == PhysicalKey::Code(KeyCode::Space)
        {
            self.swapped = !self.swapped;
            if let Err(e) = self.apply_colors() {
                log::error!("recolor failed: {e}");
                return AppControl::Exit;
            }
        }
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(renderer) = self.renderer.as_mut() else {
            return AppControl::Continue;
        };

        let action = renderer.sync(&ctx.render_ctx(), &self.store);
        if action != SyncAction::Unchanged {
            log::debug!("frame {}: mesh {action:?}", ctx.frame_index);
        }

        let renderer = &*renderer;
        ctx.render(|_, target| renderer.render(target))
    }
}

fn run() -> Result<()> {
    init_logging(LoggingConfig::default());

    let demo = Demo::new()?;
    Runtime::run(RuntimeConfig::default(), GpuInit::default(), demo)
}

fn main() {
    if let Err(e) = run() {
        log::error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(-1);
    }
}
