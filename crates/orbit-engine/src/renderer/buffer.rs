use std::collections::VecDeque;

use super::camera::CameraUniform;
use super::draw::DrawCommand;
use super::textures::TextureRequest;
use super::traits::{RenderError, Renderer, SceneResources};

/// Renderer that hands frames to a host-side WebGL renderer through flat
/// buffers in WASM memory instead of issuing GL calls itself.
///
/// The host reads `commands_ptr()`/`command_count()` after each tick, uploads
/// mesh and lighting data whenever `take_upload_request()` returns true, and
/// drains `take_texture_request()` to start image loads.
pub struct BufferRenderer {
    projection: [f32; 16],
    commands: Vec<DrawCommand>,
    texture_requests: VecDeque<TextureRequest>,
    upload_requested: bool,
    live: bool,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self {
            projection: [0.0; 16],
            commands: Vec::with_capacity(16),
            texture_requests: VecDeque::new(),
            upload_requested: false,
            live: false,
        }
    }

    /// Raw pointer to the frame's draw commands (`DrawCommand::FLOATS` each).
    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.as_ptr() as *const f32
    }

    pub fn command_count(&self) -> u32 {
        self.commands.len() as u32
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Column-major projection matrix for the current frame.
    pub fn projection(&self) -> &[f32; 16] {
        &self.projection
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.projection.as_ptr()
    }

    /// True once after each (re)initialization: the host must upload meshes.
    pub fn take_upload_request(&mut self) -> bool {
        std::mem::take(&mut self.upload_requested)
    }

    pub fn take_texture_request(&mut self) -> Option<TextureRequest> {
        self.texture_requests.pop_front()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }
}

impl Default for BufferRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for BufferRenderer {
    fn backend(&self) -> &'static str {
        "webgl-buffer"
    }

    fn init_resources(&mut self, resources: &SceneResources<'_>) -> Result<(), RenderError> {
        if resources.meshes.sphere.vertices.is_empty() || resources.meshes.cube.vertices.is_empty() {
            return Err(RenderError::Resource("empty mesh".into()));
        }
        self.commands.clear();
        self.upload_requested = true;
        self.live = true;
        Ok(())
    }

    fn begin_frame(&mut self, camera: &CameraUniform) -> Result<(), RenderError> {
        if !self.live {
            return Err(RenderError::ContextLost);
        }
        self.projection = bytemuck::cast(camera.projection);
        self.commands.clear();
        Ok(())
    }

    fn draw(&mut self, command: &DrawCommand) -> Result<(), RenderError> {
        self.commands.push(*command);
        Ok(())
    }

    fn request_texture(&mut self, request: TextureRequest) {
        self.texture_requests.push_back(request);
    }

    fn release_resources(&mut self) {
        self.commands.clear();
        self.texture_requests.clear();
        self.upload_requested = false;
        self.live = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;
    use crate::renderer::draw::TextureSlot;
    use crate::renderer::lighting::SceneLighting;
    use crate::scene::mesh::SceneMeshes;

    fn init(r: &mut BufferRenderer) {
        let meshes = SceneMeshes::new(&SceneConfig::default());
        let lighting = SceneLighting::default();
        r.init_resources(&SceneResources { meshes: &meshes, lighting: &lighting }).unwrap();
    }

    #[test]
    fn upload_request_is_one_shot() {
        let mut r = BufferRenderer::new();
        init(&mut r);
        assert!(r.take_upload_request());
        assert!(!r.take_upload_request());
    }

    #[test]
    fn frame_before_init_reports_context_lost() {
        let mut r = BufferRenderer::new();
        let cam = CameraUniform { projection: [[0.0; 4]; 4] };
        assert_eq!(r.begin_frame(&cam), Err(RenderError::ContextLost));
    }

    #[test]
    fn release_drops_pending_texture_requests() {
        let mut r = BufferRenderer::new();
        init(&mut r);
        r.request_texture(TextureRequest { slot: TextureSlot::Planet, url: "a.jpg".into(), generation: 0 });
        r.release_resources();
        assert!(r.take_texture_request().is_none());
        assert!(!r.is_live());
    }

    #[test]
    fn projection_is_flattened_column_major() {
        let mut r = BufferRenderer::new();
        init(&mut r);
        let mut projection = [[0.0; 4]; 4];
        projection[3][2] = 7.0;
        r.begin_frame(&CameraUniform { projection }).unwrap();
        assert_eq!(r.projection()[14], 7.0);
    }
}
