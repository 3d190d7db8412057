use crate::coords::Vec2;

/// A renderer-agnostic draw command recorded by pipeline callbacks.
///
/// The core never rasterizes these; the host presentation layer (or a test)
/// drains them after the pipeline pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    /// A decoded sprite resource, referenced by asset name.
    Sprite {
        asset: String,
        position: Vec2,
        rotation: f32,
    },
    /// Debug/UI text.
    Label { text: String, position: Vec2 },
}

/// Per-frame graphics context handed to every draw callback.
///
/// Commands keep insertion order; later commands draw over earlier ones,
/// which is what gives the pipeline's callback ordering its meaning.
#[derive(Debug, Default)]
pub struct Gfx {
    viewport: Vec2,
    /// Frame-wide translation applied by the presenter to every command,
    /// e.g. for screen shake or camera scroll.
    pub translation: Vec2,
    commands: Vec<DrawCmd>,
}

impl Gfx {
    pub fn new(viewport: Vec2, translation: Vec2) -> Self {
        Self {
            viewport,
            translation,
            commands: Vec::new(),
        }
    }

    /// Logical viewport size in pixels.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Records a draw command.
    pub fn push(&mut self, cmd: DrawCmd) {
        self.commands.push(cmd);
    }

    /// Recorded commands, in insertion order.
    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Hands the recorded commands to the presenter, leaving the context
    /// empty for reuse.
    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }
}
