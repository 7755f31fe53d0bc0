pub mod buffer;
pub mod camera;
pub mod draw;
pub mod lighting;
pub mod textures;
pub mod traits;

// Re-export key types for convenient access
pub use traits::{Renderer, RenderError, SceneResources};
pub use draw::{DrawCommand, DrawList, MeshKind, TextureSlot};
