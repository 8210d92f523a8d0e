//! Window and event loop.
//!
//! [`App`] walks through three phases:
//! 1. `Initializing` until winit resumes the application and the window,
//!    GPU context and scene have been created
//! 2. `Running` while every `RedrawRequested` draws one frame and asks for
//!    the next one
//! 3. `Terminating` once the window was closed or start-up failed

use std::sync::Arc;

use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{config::AppConfig, context::Context, scene::CubeScene};

/// Everything that exists while frames are drawn.
///
/// Fields drop in declaration order: the scene releases its GPU resources
/// before the device and surface go away.
#[derive(Debug)]
pub struct Running {
    scene: CubeScene,
    ctx: Context,
}

#[derive(Debug)]
pub enum Phase {
    Initializing,
    Running(Box<Running>),
    Terminating,
}

pub struct App {
    config: AppConfig,
    async_runtime: tokio::runtime::Runtime,
    phase: Phase,
    error: Option<anyhow::Error>,
    start: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            config,
            async_runtime,
            phase: Phase::Initializing,
            error: None,
            start: Instant::now(),
        })
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Running> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let config = &self.config;
        self.async_runtime.block_on(async move {
            let ctx = Context::new(window, config.clear_colour).await?;
            let scene = CubeScene::new(
                &ctx.device,
                &ctx.queue,
                ctx.config.format,
                ctx.size(),
                config,
            )
            .await?;
            Ok(Running { scene, ctx })
        })
    }

    /// Stop the loop; `run` hands the error to the caller, which reports it.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        self.error = Some(err);
        self.phase = Phase::Terminating;
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Resumed can fire again on some platforms; the window already exists.
        if !matches!(self.phase, Phase::Initializing) {
            return;
        }
        match self.init(event_loop) {
            Ok(running) => {
                log::info!("window open, rendering started");
                running.ctx.window.request_redraw();
                self.start = Instant::now();
                self.phase = Phase::Running(Box::new(running));
            }
            Err(err) => self.fail(event_loop, err.context("initialization failed")),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let running = match &mut self.phase {
            Phase::Running(running) => running,
            _ => return,
        };

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested after {} frames", running.scene.frames());
                self.phase = Phase::Terminating;
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Running { scene, ctx } = running.as_mut();
                let output = match ctx.surface.get_current_texture() {
                    Ok(output) => output,
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        ctx.reconfigure();
                        ctx.window.request_redraw();
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        let err = anyhow::anyhow!("surface ran out of memory");
                        self.fail(event_loop, err);
                        return;
                    }
                    Err(e) => {
                        log::warn!("Unable to render {}", e);
                        ctx.window.request_redraw();
                        return;
                    }
                };
                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                scene.render(
                    &ctx.device,
                    &ctx.queue,
                    &view,
                    &ctx.depth_texture.view,
                    ctx.clear_colour,
                    self.start.elapsed().as_secs_f32(),
                );
                ctx.window.pre_present_notify();
                output.present();
                ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Initialize logging, open the window and run until it is closed.
///
/// Returns the error that stopped initialization, if any.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let mut logger = env_logger::Builder::new();
    match &config.log_filter {
        Some(filter) => logger.parse_filters(filter),
        None => logger.parse_filters(
            &std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        ),
    };
    if let Err(e) = logger.try_init() {
        eprintln!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
