use orbit_engine::{
    BufferRenderer, EngineError, FrameDriver, InputEvent, RenderError, SceneConfig,
    TextureRequest, TextureSlot, TickOutcome,
};

/// Wires the frame driver to the browser host.
///
/// wasm-bindgen cannot export the generic driver directly, so `lib.rs` keeps
/// one `SceneRunner` in a `thread_local!` and forwards free functions to it.
pub struct SceneRunner {
    driver: FrameDriver<BufferRenderer>,
}

impl SceneRunner {
    pub fn new(config: SceneConfig, width: f32, height: f32) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self {
            driver: FrameDriver::new(config, BufferRenderer::new(), aspect),
        }
    }

    pub fn start(&mut self) -> Result<(), EngineError> {
        self.driver.start()
    }

    pub fn push_input(&mut self, event: InputEvent) {
        if !self.driver.push_input(event) {
            log::debug!("input event rejected: queue full");
        }
    }

    /// Run one frame. Returns whether the host should schedule another.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        match self.driver.tick(now_ms) {
            Ok(TickOutcome::Rendered(_)) => true,
            Ok(TickOutcome::Suspended) => false,
            Err(e) => {
                log::error!("tick failed: {}", e);
                self.driver.is_running()
            }
        }
    }

    pub fn context_lost(&mut self) {
        self.driver.context_lost();
    }

    pub fn context_restored(&mut self) -> Result<(), EngineError> {
        self.driver.context_restored()
    }

    pub fn render_failed(&mut self, error: RenderError) {
        self.driver.render_failed(error);
    }

    pub fn texture_loaded(&mut self, slot: u32, generation: u32) -> bool {
        match TextureSlot::from_index(slot) {
            Some(slot) => self.driver.texture_loaded(slot, generation),
            None => {
                log::warn!("texture_loaded: unknown slot {}", slot);
                false
            }
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.driver.resize(width, height);
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    // ---- Frame output accessors ----

    pub fn commands_ptr(&self) -> *const f32 {
        self.driver.renderer().commands_ptr()
    }

    pub fn command_count(&self) -> u32 {
        self.driver.renderer().command_count()
    }

    pub fn projection_ptr(&self) -> *const f32 {
        self.driver.renderer().projection_ptr()
    }

    pub fn fps(&self) -> u32 {
        self.driver.fps()
    }

    // ---- Resource accessors (read after an upload request) ----

    pub fn take_upload_request(&mut self) -> bool {
        self.driver.renderer_mut().take_upload_request()
    }

    pub fn take_texture_request(&mut self) -> Option<TextureRequest> {
        self.driver.renderer_mut().take_texture_request()
    }

    pub fn sphere_vertices(&self) -> &[f32] {
        self.driver.meshes().sphere.vertex_floats()
    }

    pub fn sphere_indices(&self) -> &[u16] {
        &self.driver.meshes().sphere.indices
    }

    pub fn cube_vertices(&self) -> &[f32] {
        self.driver.meshes().cube.vertex_floats()
    }

    pub fn cube_indices(&self) -> &[u16] {
        &self.driver.meshes().cube.indices
    }

    pub fn dish_index_count(&self) -> u32 {
        self.driver.meshes().dish_index_count
    }

    pub fn lighting(&self) -> &[f32] {
        self.driver.lighting().as_floats()
    }
}

/// Map the host's numeric failure code onto a render error.
pub fn render_error_from_code(kind: u32, message: String) -> RenderError {
    match kind {
        0 => RenderError::ContextLost,
        1 => RenderError::ShaderCompile(message),
        2 => RenderError::ProgramLink(message),
        _ => RenderError::Resource(message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_engine::Modifiers;

    fn started() -> SceneRunner {
        let mut runner = SceneRunner::new(SceneConfig::default(), 800.0, 600.0);
        runner.start().unwrap();
        runner
    }

    #[test]
    fn start_requests_upload_and_planet_texture() {
        let mut runner = started();
        assert!(runner.take_upload_request());
        assert!(!runner.take_upload_request());

        let request = runner.take_texture_request().unwrap();
        assert_eq!(request.slot, TextureSlot::Planet);
        assert_eq!(request.url, "texs/earth.jpg");
        assert!(runner.take_texture_request().is_none());
    }

    #[test]
    fn tick_fills_command_buffer() {
        let mut runner = started();
        assert!(runner.tick(0.0));
        assert_eq!(runner.command_count(), 8);
        assert!(!runner.commands_ptr().is_null());
        assert_eq!(runner.sphere_indices().len(), 3750);
        assert_eq!(runner.dish_index_count(), 429);
        assert_eq!(runner.cube_indices().len(), 36);
        assert_eq!(runner.lighting().len(), 12);
        assert_eq!(runner.sphere_vertices().len() % 8, 0);
    }

    #[test]
    fn context_loss_stops_scheduling_until_restored() {
        let mut runner = started();
        assert!(runner.tick(0.0));

        runner.context_lost();
        assert!(!runner.tick(16.0));
        assert_eq!(runner.command_count(), 0);

        runner.context_restored().unwrap();
        assert!(runner.take_upload_request());
        assert!(runner.tick(32.0));
    }

    #[test]
    fn stale_texture_completion_is_ignored() {
        let mut runner = started();
        let first = runner.take_texture_request().unwrap();

        runner.context_lost();
        runner.context_restored().unwrap();
        let second = runner.take_texture_request().unwrap();

        assert!(!runner.texture_loaded(first.slot as u32, first.generation));
        assert!(runner.texture_loaded(second.slot as u32, second.generation));
        assert!(!runner.texture_loaded(9, second.generation));
    }

    #[test]
    fn shader_failure_halts_animation() {
        let mut runner = started();
        runner.render_failed(render_error_from_code(1, "bad shader".into()));
        assert!(!runner.is_running());
        assert!(!runner.tick(0.0));
    }

    #[test]
    fn failure_code_zero_is_context_loss() {
        assert_eq!(render_error_from_code(0, String::new()), RenderError::ContextLost);
        assert_eq!(
            render_error_from_code(7, "oom".into()),
            RenderError::Resource("oom".into())
        );
    }

    #[test]
    fn input_is_accepted_before_start() {
        let mut runner = SceneRunner::new(SceneConfig::default(), 0.0, 0.0);
        runner.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        runner.push_input(InputEvent::PointerMove { x: 5.0, y: 0.0, modifiers: Modifiers::NONE });
        assert!(!runner.tick(0.0));
    }
}
