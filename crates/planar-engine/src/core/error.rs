use thiserror::Error;

/// Failures raised by engine-context construction.
///
/// None are fatal to the process: the construction attempt is abandoned,
/// the failure is logged, and any previously live context is untouched.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A live engine context already exists in this process.
    #[error("an engine context is already live; at most one is allowed per process")]
    AlreadyRunning,

    /// The configuration combination is unusable; no window or loop was
    /// created.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The OS refused the simulation-loop thread.
    #[error("failed to start the simulation loop thread")]
    LoopStart(#[source] std::io::Error),
}
