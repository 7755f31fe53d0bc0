pub mod api;
pub mod core;
pub mod driver;
pub mod error;
pub mod input;
pub mod renderer;
pub mod scene;

// Re-export key types at crate root for convenience
pub use api::config::SceneConfig;
pub use core::time::{AnimationClock, FpsCounter};
pub use core::transform_stack::{TransformStack, TransformStackError};
pub use driver::frame::{FrameDriver, FrameState, FrameStats, SimulationState, TickOutcome};
pub use error::{ConfigError, EngineError};
pub use input::queue::{InputEvent, InputQueue, Modifiers};
pub use input::state::{keys, CameraDelta, InputState};
pub use renderer::buffer::BufferRenderer;
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::draw::{DrawCommand, DrawList, MeshKind, TextureSlot};
pub use renderer::lighting::SceneLighting;
pub use renderer::textures::{TextureRequest, TextureTracker};
pub use renderer::traits::{RenderError, Renderer, SceneResources};
pub use scene::composer::{compose_frame, FrameInputs};
pub use scene::mesh::{MeshData, MeshVertex, SceneMeshes};
pub use scene::orbit::{orbit_angle, planet_angle, satellite_pose, OrbitParams, SatellitePose};
pub use scene::satellite::{PartShape, SatellitePart, SATELLITE_PARTS};
