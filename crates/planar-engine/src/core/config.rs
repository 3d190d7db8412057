use std::path::PathBuf;

/// Engine configuration.
///
/// `tick_rate` is in ticks per second; a non-positive value selects
/// single-pass mode (start once, render once, no loop thread, no input).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub title: String,

    /// Window size in logical pixels. The platform may add its own chrome
    /// around the client area.
    pub width: u32,
    pub height: u32,

    /// Directory holding `sprites/` and `audio/` subdirectories.
    pub asset_root: PathBuf,

    pub tick_rate: f64,

    /// Whether to attach the (externally supplied) scene visualizer.
    pub run_visualizer: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "planar".to_string(),
            width: 1280,
            height: 720,
            asset_root: PathBuf::from("assets"),
            tick_rate: 60.0,
            run_visualizer: false,
        }
    }
}
