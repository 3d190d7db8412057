use crate::coords::Vec2;

/// Spatial state carried implicitly by every scene node.
///
/// `rotation` is in degrees; zero points along the positive x-axis.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Transform {
    /// World-space position.
    pub position: Vec2,
    /// Rotation in degrees, 0 = +x axis.
    pub rotation: f32,
}

impl Transform {
    pub const fn new(position: Vec2, rotation: f32) -> Self {
        Self { position, rotation }
    }
}
