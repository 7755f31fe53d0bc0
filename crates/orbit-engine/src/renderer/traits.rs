//! Renderer contract for the GPU side of the scene.
//!
//! The engine decides what to draw and where; a `Renderer` owns programs,
//! buffers and textures and turns `DrawCommand`s into API calls.

use std::fmt;

use super::camera::CameraUniform;
use super::draw::DrawCommand;
use super::lighting::SceneLighting;
use super::textures::TextureRequest;
use crate::scene::mesh::SceneMeshes;

/// Rendering-resource failures. None are retried automatically; the frame
/// driver suspends until the context is restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ShaderCompile(String),
    ProgramLink(String),
    /// The rendering context was lost mid-frame.
    ContextLost,
    /// Buffer or texture creation failed.
    Resource(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShaderCompile(log) => write!(f, "shader compile failed: {log}"),
            Self::ProgramLink(log) => write!(f, "failed to link shaders: {log}"),
            Self::ContextLost => write!(f, "rendering context lost"),
            Self::Resource(msg) => write!(f, "resource error: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Everything a fresh context needs uploaded before the first frame.
pub struct SceneResources<'a> {
    pub meshes: &'a SceneMeshes,
    pub lighting: &'a SceneLighting,
}

/// Renderer trait for GPU backends.
///
/// Implementors compile the shader program, upload the meshes and lighting in
/// `init_resources`, and issue one indexed draw per `DrawCommand`.
pub trait Renderer {
    /// Backend identifier (e.g., "webgl", "recording").
    fn backend(&self) -> &'static str;

    /// Create programs, buffers and the white texture for a new context.
    fn init_resources(&mut self, resources: &SceneResources<'_>) -> Result<(), RenderError>;

    /// Upload per-frame uniforms and clear the target.
    fn begin_frame(&mut self, camera: &CameraUniform) -> Result<(), RenderError>;

    fn draw(&mut self, command: &DrawCommand) -> Result<(), RenderError>;

    fn end_frame(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Begin fetching an image into a texture. Completion is reported back
    /// through [`FrameDriver::texture_loaded`](crate::driver::frame::FrameDriver::texture_loaded).
    fn request_texture(&mut self, request: TextureRequest);

    /// Drop everything tied to the lost context, including pending loads.
    fn release_resources(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_descriptive() {
        let err = RenderError::ProgramLink("varying mismatch".into());
        assert_eq!(err.to_string(), "failed to link shaders: varying mismatch");
        assert_eq!(RenderError::ContextLost.to_string(), "rendering context lost");
    }
}
