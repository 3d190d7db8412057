use anyhow::{Context, Result};
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Vec2;
use crate::core::{Engine, EngineHandle};
use crate::input::InputDispatcher;
use crate::render::{Gfx, RepaintTarget};

impl RepaintTarget for Window {
    fn request_repaint(&self) {
        self.request_redraw();
    }
}

/// Hands the calling thread to winit until the window closes.
///
/// The engine (and with it the simulation loop and the one-instance guard)
/// is dropped when the event loop returns.
pub fn run(mut engine: Engine) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

    // Input translation moves to the event thread; the engine keeps the rest.
    let dispatcher = engine
        .dispatcher
        .take()
        .unwrap_or_else(|| InputDispatcher::new(Default::default(), Default::default()));

    let mut state = HostState {
        handle: engine.handle(),
        engine,
        dispatcher,
        window: None,
    };

    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    Ok(())
}

struct HostState {
    engine: Engine,
    handle: EngineHandle,
    dispatcher: InputDispatcher,
    window: Option<Arc<Window>>,
}

impl HostState {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (width, height) = self.handle.size();
        let attrs = Window::default_attributes()
            .with_title(self.handle.title())
            .with_inner_size(LogicalSize::new(f64::from(width), f64::from(height)));

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        // From here on, loop-thread repaint requests reach the window.
        self.handle.repaint_handle().bind(window.clone());

        window.request_redraw();
        self.window = Some(window);
        Ok(())
    }

    fn redraw(&self, window: &Window) {
        let size = window
            .inner_size()
            .to_logical::<f64>(window.scale_factor());
        let pipeline = self.handle.pipeline();

        let mut gfx = Gfx::new(
            Vec2::new(size.width as f32, size.height as f32),
            pipeline.translation(),
        );
        pipeline.render(&mut gfx);

        // Presentation is the host's concern; the core only composes the
        // command list.
        let commands = gfx.take_commands();
        log::trace!("frame composed: {} draw command(s)", commands.len());
    }
}

impl ApplicationHandler for HostState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("failed to create engine window: {e:#}");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.id() != window_id {
            return;
        }

        self.dispatcher.on_window_event(&window, &event);

        match event {
            WindowEvent::CloseRequested => {
                self.engine.stop();
                self.window = None;
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                self.redraw(&window);
            }

            _ => {}
        }
    }
}
