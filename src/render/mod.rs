pub mod scene;
pub mod sync;
pub mod tui;

pub use scene::{BoxHandle, Material, Renderer, RotationAxis};
pub use sync::SceneSync;
pub use tui::{Hud, TuiRenderer};
