use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::render::RepaintHandle;
use crate::scene::Node;

use super::TickClock;

/// Loop lifecycle: `Idle → Running → Stopped`, with `Stopped` terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

const STATE_IDLE: u8 = 0;
const STATE_RUNNING: u8 = 1;
const STATE_STOPPED: u8 = 2;

/// Shared loop status, readable from any thread.
///
/// The render pipeline consults this to skip frames when the loop is not
/// alive; the engine handle exposes it read-only.
#[derive(Debug)]
pub struct LoopShared {
    state: AtomicU8,
    stop: AtomicBool,
}

impl LoopShared {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: AtomicU8::new(STATE_IDLE),
            stop: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> LoopState {
        match self.state.load(Ordering::Acquire) {
            STATE_IDLE => LoopState::Idle,
            STATE_RUNNING => LoopState::Running,
            _ => LoopState::Stopped,
        }
    }

    /// True while the loop thread is live and ticking.
    pub fn is_alive(&self) -> bool {
        self.state() == LoopState::Running
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    pub(crate) fn set_state(&self, state: LoopState) {
        let raw = match state {
            LoopState::Idle => STATE_IDLE,
            LoopState::Running => STATE_RUNNING,
            LoopState::Stopped => STATE_STOPPED,
        };
        self.state.store(raw, Ordering::Release);
    }
}

/// Everything the loop thread drives each tick.
///
/// `start` and `update` run only on the loop thread, strictly sequentially;
/// nothing here synchronizes game state against the host toolkit's thread.
pub struct LoopDriver {
    /// Invoked exactly once before the first tick.
    pub start: Box<dyn FnMut() + Send>,
    /// Invoked once per tick.
    pub update: Box<dyn FnMut() + Send>,
    /// Scene root; its component tree is stepped before `update`.
    pub root: Arc<Node>,
    /// Render surface to repaint after each tick.
    pub surface: Arc<RepaintHandle>,
}

/// Owner of the dedicated simulation thread.
///
/// Dropping the loop requests a stop and joins; the request takes effect at
/// the next tick boundary — in-flight ticks are never cancelled and a slow
/// update delays the stop rather than being preempted.
pub struct SimulationLoop {
    shared: Arc<LoopShared>,
    thread: Option<JoinHandle<()>>,
}

impl SimulationLoop {
    /// Starts the loop thread at `ticks_per_second` (must be positive).
    ///
    /// `shared` must be freshly `Idle`; it transitions to `Running` before
    /// this returns, so a render pass racing with startup sees a live loop.
    pub fn spawn(
        shared: Arc<LoopShared>,
        ticks_per_second: f64,
        driver: LoopDriver,
    ) -> io::Result<SimulationLoop> {
        debug_assert!(ticks_per_second > 0.0);
        debug_assert_eq!(shared.state(), LoopState::Idle);

        shared.set_state(LoopState::Running);

        let thread_shared = shared.clone();
        let thread = std::thread::Builder::new()
            .name("sim-loop".into())
            .spawn(move || run_loop(thread_shared, ticks_per_second, driver))?;

        Ok(SimulationLoop {
            shared,
            thread: Some(thread),
        })
    }

    pub fn is_alive(&self) -> bool {
        self.shared.is_alive()
    }

    /// Requests a stop; effective at the next tick boundary.
    pub fn stop(&self) {
        self.shared.stop.store(true, Ordering::Release);
    }

    /// Requests a stop and waits for the thread to finish.
    pub fn stop_and_join(&mut self) {
        self.stop();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("simulation loop thread panicked");
            }
        }
    }
}

impl Drop for SimulationLoop {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

fn run_loop(shared: Arc<LoopShared>, ticks_per_second: f64, mut driver: LoopDriver) {
    // The state must reach `Stopped` even when a callback panics and unwinds
    // this thread; the render gate trusts `is_alive`.
    struct MarkStopped(Arc<LoopShared>);

    impl Drop for MarkStopped {
        fn drop(&mut self) {
            self.0.set_state(LoopState::Stopped);
        }
    }

    let _stopped = MarkStopped(shared.clone());

    log::debug!("simulation loop started at {ticks_per_second} ticks/s");

    (driver.start)();

    let mut clock = TickClock::new(ticks_per_second);
    while !shared.stop_requested() {
        clock.wait_next_tick();
        if shared.stop_requested() {
            break;
        }

        driver.root.update_components();
        (driver.update)();
        driver.surface.request_repaint();
    }

    log::debug!("simulation loop stopped after {} ticks", clock.ticks());
}
