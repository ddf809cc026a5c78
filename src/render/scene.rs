use anyhow::Result;

/// Opaque handle to a visual box owned by a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxHandle(u64);

impl BoxHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Appearance of a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    SnakeHead,
    SnakeBody,
    Food,
}

/// Axis a rotation is applied around
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// The minimal drawing capability the simulation side depends on: colored
/// boxes that can be placed, spun, removed and flushed to the screen.
/// The simulation never calls this directly; [`crate::render::SceneSync`]
/// mirrors logical state through it, so any implementation works as long
/// as it honors handle identity.
pub trait Renderer {
    fn create_box(&mut self, material: Material) -> BoxHandle;
    fn set_position(&mut self, handle: BoxHandle, x: f32, y: f32, z: f32);
    fn set_rotation(&mut self, handle: BoxHandle, axis: RotationAxis, radians: f32);
    fn remove(&mut self, handle: BoxHandle);
    fn draw_frame(&mut self) -> Result<()>;
}
