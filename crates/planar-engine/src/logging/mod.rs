//! Logging utilities.
//!
//! Centralizes logger initialization; everything else in the crate goes
//! through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
