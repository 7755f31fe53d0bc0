//! The per-frame loop.
//!
//! The host's display loop calls [`FrameDriver::tick`] once per refresh while
//! [`FrameDriver::is_running`] is true; there is no self-scheduling. Input
//! callbacks only enqueue events, which are drained at the top of each tick.

use crate::api::config::SceneConfig;
use crate::core::time::{AnimationClock, FpsCounter};
use crate::core::transform_stack::TransformStack;
use crate::error::EngineError;
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::state::InputState;
use crate::renderer::camera::Camera3D;
use crate::renderer::draw::{DrawList, TextureSlot};
use crate::renderer::lighting::SceneLighting;
use crate::renderer::textures::TextureTracker;
use crate::renderer::traits::{RenderError, Renderer, SceneResources};
use crate::scene::composer::{compose_frame, FrameInputs};
use crate::scene::mesh::SceneMeshes;
use crate::scene::orbit::{planet_angle, satellite_pose, OrbitParams};

/// Whether frames are being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Running,
    /// Not started, context lost, or halted by a render failure.
    Suspended,
}

/// Everything the update steps read and write, passed explicitly.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub input: InputState,
    pub orbit: OrbitParams,
    pub clock: AnimationClock,
    pub fps: FpsCounter,
    pub camera: Camera3D,
    pub stack: TransformStack,
}

impl SimulationState {
    pub fn new(config: &SceneConfig, aspect: f32) -> Self {
        Self {
            input: InputState::new(config),
            orbit: OrbitParams::new(config.initial_orbit_radius(), config.initial_period_ms),
            clock: AnimationClock::new(),
            fps: FpsCounter::new(),
            camera: Camera3D::new(config, aspect),
            stack: TransformStack::default(),
        }
    }

    /// Back to the initial scene. Input state is kept: after a render failure
    /// the user may still be holding a key.
    pub fn reset(&mut self, config: &SceneConfig) {
        let input = self.input.clone();
        let aspect = self.camera.aspect;
        *self = Self::new(config, aspect);
        self.input = input;
    }
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Frames rendered since the last (re)start.
    pub frame: u64,
    pub elapsed_ms: f64,
    pub orbit: OrbitParams,
    pub draw_count: usize,
    /// Set on the first frame of each new wall-clock second.
    pub fps_report: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Rendered(FrameStats),
    /// Nothing was done; the host should stop scheduling frames.
    Suspended,
}

pub struct FrameDriver<R: Renderer> {
    config: SceneConfig,
    renderer: R,
    state: FrameState,
    sim: SimulationState,
    queue: InputQueue,
    meshes: SceneMeshes,
    lighting: SceneLighting,
    textures: TextureTracker,
    draw_list: DrawList,
    frame: u64,
}

impl<R: Renderer> FrameDriver<R> {
    pub fn new(config: SceneConfig, renderer: R, aspect: f32) -> Self {
        Self {
            sim: SimulationState::new(&config, aspect),
            queue: InputQueue::with_capacity(config.input_queue_capacity),
            meshes: SceneMeshes::new(&config),
            lighting: SceneLighting::default(),
            textures: TextureTracker::new(),
            draw_list: DrawList::new(),
            state: FrameState::Suspended,
            frame: 0,
            renderer,
            config,
        }
    }

    /// Create rendering resources and enter `Running`.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let resources = SceneResources {
            meshes: &self.meshes,
            lighting: &self.lighting,
        };
        if let Err(e) = self.renderer.init_resources(&resources) {
            log::error!("{} renderer failed to initialize: {}", self.renderer.backend(), e);
            self.state = FrameState::Suspended;
            return Err(e.into());
        }

        let request = self.textures.request(TextureSlot::Planet, &self.config.planet_texture_url);
        self.renderer.request_texture(request);

        self.sim.reset(&self.config);
        self.frame = 0;
        self.state = FrameState::Running;
        log::info!("scene running on {} backend", self.renderer.backend());
        Ok(())
    }

    /// Queue an input event for the next tick. Valid in any state.
    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.queue.push(event)
    }

    /// Run one frame at wall-clock time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Result<TickOutcome, EngineError> {
        if self.state != FrameState::Running {
            return Ok(TickOutcome::Suspended);
        }

        let elapsed_ms = self.sim.clock.sample(now_ms);

        self.sim.input.apply_all(self.queue.drain());
        self.sim.input.poll_keys(&mut self.sim.orbit);

        let delta = self.sim.input.take_camera_delta();
        self.sim.camera.apply_delta(delta);

        let inputs = FrameInputs {
            planet_angle: planet_angle(elapsed_ms, self.config.planet_spin_period_ms),
            satellite: satellite_pose(elapsed_ms, &self.sim.orbit),
            planet_texture: self.textures.resolve(TextureSlot::Planet),
        };

        if let Err(e) = compose_frame(
            &mut self.sim.stack,
            self.sim.camera.view_matrix(),
            &inputs,
            &self.meshes,
            &mut self.draw_list,
        ) {
            log::error!("frame {} aborted: {}", self.frame, e);
            return Err(e.into());
        }

        if let Err(e) = self.submit() {
            self.render_failed(e.clone());
            return Err(e.into());
        }

        let fps_report = self.sim.fps.tick(now_ms);
        if let Some(fps) = fps_report {
            log::debug!("FPS: {}", fps);
        }

        self.frame += 1;
        Ok(TickOutcome::Rendered(FrameStats {
            frame: self.frame,
            elapsed_ms,
            orbit: self.sim.orbit,
            draw_count: self.draw_list.len(),
            fps_report,
        }))
    }

    fn submit(&mut self) -> Result<(), RenderError> {
        self.renderer.begin_frame(&self.sim.camera.uniform())?;
        for command in self.draw_list.iter() {
            self.renderer.draw(command)?;
        }
        self.renderer.end_frame()
    }

    /// Stop producing frames and drop everything tied to the context.
    /// Pending input and held keys are released; key edges that arrive while
    /// suspended are queued and applied on the first tick after restore.
    pub fn context_lost(&mut self) {
        if self.state == FrameState::Running {
            log::warn!("rendering context lost, suspending after {} frame(s)", self.frame);
        }
        self.state = FrameState::Suspended;
        self.queue.clear();
        self.sim.input.release_all();
        self.textures.invalidate();
        self.renderer.release_resources();
    }

    /// Rebuild resources from scratch and resume.
    pub fn context_restored(&mut self) -> Result<(), EngineError> {
        if self.state == FrameState::Running {
            log::warn!("context restored while still running; ignoring");
            return Ok(());
        }
        log::info!("rendering context restored");
        self.start()
    }

    /// A failure reported by the renderer outside of `tick` (e.g. an async
    /// shader compile). Animation halts until the context is restored.
    pub fn render_failed(&mut self, error: RenderError) {
        if error == RenderError::ContextLost {
            self.context_lost();
            return;
        }
        log::error!("render failure, halting animation: {}", error);
        self.state = FrameState::Suspended;
    }

    /// Report a finished texture load. Returns `false` if it was discarded.
    pub fn texture_loaded(&mut self, slot: TextureSlot, generation: u32) -> bool {
        self.textures.complete(slot, generation)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.camera.resize(width, height);
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == FrameState::Running
    }

    pub fn simulation(&self) -> &SimulationState {
        &self.sim
    }

    pub fn simulation_mut(&mut self) -> &mut SimulationState {
        &mut self.sim
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn meshes(&self) -> &SceneMeshes {
        &self.meshes
    }

    pub fn lighting(&self) -> &SceneLighting {
        &self.lighting
    }

    pub fn textures(&self) -> &TextureTracker {
        &self.textures
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// FPS from the last completed second.
    pub fn fps(&self) -> u32 {
        self.sim.fps.fps()
    }
}
