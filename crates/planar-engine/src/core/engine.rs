use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::assets::{self, AssetLoader};
use crate::input::{InputDispatcher, KeyboardBundle, MouseBundle};
use crate::render::{Pipeline, RenderFn, RepaintHandle};
use crate::scene::{Node, NodeRegistry};
use crate::sim::{LoopDriver, LoopShared, SimulationLoop};

use super::{EngineConfig, EngineError};

/// One live engine context per process. Claimed on successful
/// `initialize`, released when the `Engine` drops.
static CONTEXT_LIVE: AtomicBool = AtomicBool::new(false);

/// Game-defined boundary callbacks.
///
/// `start` and `update` run on the simulation-loop thread, strictly
/// sequentially; `render` and the input slots run on the host toolkit's
/// event thread. All of them must be fast and non-blocking — a slow update
/// delays every subsequent tick rather than being preempted.
pub struct GameCallbacks {
    /// Invoked exactly once before the first tick (or once total in
    /// single-pass mode).
    pub start: Box<dyn FnMut(&EngineHandle) + Send>,
    /// Invoked once per tick, after the scene component pass.
    pub update: Box<dyn FnMut(&EngineHandle) + Send>,
    /// Base graphics callback; the first thing each render pass runs.
    pub render: RenderFn,
    pub keyboard: KeyboardBundle,
    pub mouse: MouseBundle,
}

impl Default for GameCallbacks {
    fn default() -> Self {
        Self {
            start: Box::new(|_handle| {}),
            update: Box::new(|_handle| {}),
            render: Arc::new(|_gfx| {}),
            keyboard: KeyboardBundle::default(),
            mouse: MouseBundle::default(),
        }
    }
}

/// Read-only observer attached at startup when `run_visualizer` is set.
pub trait Visualizer: Send {
    fn attach(&mut self, handle: &EngineHandle);
}

/// External collaborators the core calls into but never implements.
#[derive(Default)]
pub struct Collaborators {
    pub asset_loader: Option<Box<dyn AssetLoader>>,
    pub visualizer: Option<Box<dyn Visualizer>>,
}

struct EngineShared {
    title: String,
    width: u32,
    height: u32,
    asset_root: std::path::PathBuf,
    tick_rate: f64,
    root: Arc<Node>,
    pipeline: Arc<Pipeline>,
    registry: NodeRegistry,
    repaint: Arc<RepaintHandle>,
    loop_shared: Option<Arc<LoopShared>>,
}

/// Cheaply cloneable, read-only view of the live engine context.
///
/// This is what components, callbacks, and collaborators hold instead of
/// reaching for process globals: the scene root, pipeline, registry, and
/// loop status all hang off the handle.
#[derive(Clone)]
pub struct EngineHandle {
    shared: Arc<EngineShared>,
}

impl EngineHandle {
    pub fn title(&self) -> &str {
        &self.shared.title
    }

    /// Configured window size in logical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.shared.width, self.shared.height)
    }

    pub fn asset_root(&self) -> &Path {
        &self.shared.asset_root
    }

    /// Ticks per second; non-positive means single-pass mode.
    pub fn tick_rate(&self) -> f64 {
        self.shared.tick_rate
    }

    pub fn single_pass(&self) -> bool {
        self.shared.tick_rate <= 0.0
    }

    /// The "world" node every other node descends from.
    pub fn root(&self) -> Arc<Node> {
        self.shared.root.clone()
    }

    pub fn pipeline(&self) -> Arc<Pipeline> {
        self.shared.pipeline.clone()
    }

    /// Node-kind factories; registration happens at startup, typically from
    /// the game's `start` callback.
    pub fn registry(&self) -> &NodeRegistry {
        &self.shared.registry
    }

    /// Render-surface handle the loop repaints through; the host bridge
    /// binds the concrete window to it.
    pub fn repaint_handle(&self) -> Arc<RepaintHandle> {
        self.shared.repaint.clone()
    }

    /// Whether the simulation loop thread is live. Always false in
    /// single-pass mode.
    pub fn loop_alive(&self) -> bool {
        self.shared
            .loop_shared
            .as_ref()
            .is_some_and(|l| l.is_alive())
    }
}

/// The exclusively-owned engine context.
///
/// Constructed at most once per process via [`initialize`]; dropping it
/// stops the loop and releases the one-instance guard (which in practice
/// happens at process exit).
pub struct Engine {
    handle: EngineHandle,
    pub(crate) dispatcher: Option<InputDispatcher>,
    sim: Option<SimulationLoop>,
}

impl Engine {
    /// Builds the whole runtime: asset scan, world root, pipeline, input
    /// dispatcher, and — for a positive tick rate — the simulation loop on
    /// its dedicated thread.
    ///
    /// With `tick_rate <= 0` this is single-pass mode instead: `start` runs
    /// once right here, one repaint is requested, and no loop thread or
    /// input listener exists. Combining single-pass with a non-empty input
    /// bundle is rejected before anything is created.
    pub fn initialize(
        config: EngineConfig,
        game: GameCallbacks,
        collaborators: Collaborators,
    ) -> Result<Engine, EngineError> {
        let GameCallbacks {
            mut start,
            mut update,
            render,
            keyboard,
            mouse,
        } = game;

        if !config.tick_rate.is_finite() {
            let err = EngineError::InvalidConfiguration(format!(
                "tick rate must be finite, got {}",
                config.tick_rate
            ));
            log::error!("{err}");
            return Err(err);
        }

        let single_pass = config.tick_rate <= 0.0;
        if single_pass && (!keyboard.is_empty() || !mouse.is_empty()) {
            let err = EngineError::InvalidConfiguration(
                "input handlers require a positive tick rate".to_string(),
            );
            log::error!("{err}");
            return Err(err);
        }

        if CONTEXT_LIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            let err = EngineError::AlreadyRunning;
            log::error!("{err}");
            return Err(err);
        }

        log::info!(
            "engine context starting: \"{}\" {}x{} @ {} tps",
            config.title,
            config.width,
            config.height,
            config.tick_rate
        );

        if let Some(loader) = &collaborators.asset_loader {
            assets::scan_asset_root(&config.asset_root, loader.as_ref());
        }

        let registry = NodeRegistry::new();
        registry.register("empty", |_node| Ok(()));

        let root = Node::root("world");
        let pipeline = Arc::new(Pipeline::new(render));
        let repaint = RepaintHandle::new();
        let loop_shared = (!single_pass).then(LoopShared::new);

        let handle = EngineHandle {
            shared: Arc::new(EngineShared {
                title: config.title,
                width: config.width,
                height: config.height,
                asset_root: config.asset_root,
                tick_rate: config.tick_rate,
                root: root.clone(),
                pipeline: pipeline.clone(),
                registry,
                repaint: repaint.clone(),
                loop_shared: loop_shared.clone(),
            }),
        };

        let sim = if let Some(loop_shared) = loop_shared {
            pipeline.attach_loop(loop_shared.clone());

            // Bind the handle into the loop-thread callbacks.
            let start_handle = handle.clone();
            let update_handle = handle.clone();
            let driver = LoopDriver {
                start: Box::new(move || start(&start_handle)),
                update: Box::new(move || update(&update_handle)),
                root,
                surface: repaint,
            };

            match SimulationLoop::spawn(loop_shared, config.tick_rate, driver) {
                Ok(sim) => Some(sim),
                Err(err) => {
                    CONTEXT_LIVE.store(false, Ordering::SeqCst);
                    let err = EngineError::LoopStart(err);
                    log::error!("{err}");
                    return Err(err);
                }
            }
        } else {
            start(&handle);
            repaint.request_repaint();
            None
        };

        let dispatcher = InputDispatcher::new(keyboard, mouse);
        if dispatcher.keyboard_registered() {
            log::debug!("keyboard listener registered");
        }
        if dispatcher.mouse_registered() {
            log::debug!("mouse listener registered");
        }

        let engine = Engine {
            handle,
            dispatcher: Some(dispatcher),
            sim,
        };

        if config.run_visualizer {
            match collaborators.visualizer {
                Some(mut visualizer) => visualizer.attach(&engine.handle),
                None => log::warn!("run_visualizer set but no visualizer collaborator supplied"),
            }
        }

        Ok(engine)
    }

    pub fn handle(&self) -> EngineHandle {
        self.handle.clone()
    }

    /// Requests a loop stop, effective at the next tick boundary.
    pub fn stop(&self) {
        if let Some(sim) = &self.sim {
            sim.stop();
        }
    }

    /// Hands the calling (main) thread to the host toolkit until the window
    /// closes. Consumes the engine; dropping it on return tears the loop
    /// down and releases the context guard.
    pub fn run(self) -> anyhow::Result<()> {
        crate::window::run(self)
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("title", &self.handle.title())
            .field("tick_rate", &self.handle.tick_rate())
            .field("loop_alive", &self.handle.loop_alive())
            .finish()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        // Stop and join the loop before releasing the guard so a follow-up
        // context never races the old loop thread.
        self.sim.take();
        CONTEXT_LIVE.store(false, Ordering::SeqCst);
        log::info!("engine context shut down");
    }
}
