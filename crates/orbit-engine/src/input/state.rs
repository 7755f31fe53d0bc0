//! Held keys, mouse dragging and the per-frame camera delta.
//!
//! Events are applied in arrival order by [`InputState::apply`]; the frame
//! driver then polls held keys once and takes the camera delta once per tick.

use std::collections::HashSet;

use glam::{Vec2, Vec3};

use crate::api::config::SceneConfig;
use crate::input::queue::{InputEvent, Modifiers};
use crate::scene::orbit::OrbitParams;

/// DOM `keyCode` values for the arrow keys.
pub mod keys {
    pub const ARROW_LEFT: u32 = 37;
    pub const ARROW_UP: u32 = 38;
    pub const ARROW_RIGHT: u32 = 39;
    pub const ARROW_DOWN: u32 = 40;
}

/// Camera motion requested since the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraDelta {
    /// Pan/zoom offset in world units.
    pub translation: Vec3,
    /// Pointer pixels of rotation: `x` turns about the X axis, `y` about the Y axis.
    pub rotation: Vec2,
}

impl CameraDelta {
    pub const ZERO: Self = Self {
        translation: Vec3::ZERO,
        rotation: Vec2::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Camera-control state written by pointer/wheel events.
#[derive(Debug, Clone, Default)]
pub struct CameraState {
    pub delta: CameraDelta,
    pub dragging: bool,
    /// Pointer position at the previous down/move event.
    pub anchor: Vec2,
}

/// Tracks keyboard and mouse state between frames.
#[derive(Debug, Clone)]
pub struct InputState {
    held: HashSet<u32>,
    camera: CameraState,
    drag_pan_divisor: f32,
    wheel_divisor: f32,
    radius_step: f32,
    period_step_ms: i32,
    min_radius: f32,
    min_period_ms: i32,
}

impl InputState {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            held: HashSet::new(),
            camera: CameraState::default(),
            drag_pan_divisor: config.drag_pan_divisor,
            wheel_divisor: config.wheel_divisor,
            radius_step: config.radius_step,
            period_step_ms: config.period_step_ms,
            min_radius: config.min_orbit_radius(),
            min_period_ms: config.min_period_ms,
        }
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn is_held(&self, key_code: u32) -> bool {
        self.held.contains(&key_code)
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown { key_code } => {
                self.held.insert(key_code);
            }
            InputEvent::KeyUp { key_code } => {
                self.held.remove(&key_code);
            }
            InputEvent::PointerDown { x, y } => {
                self.camera.dragging = true;
                self.camera.anchor = Vec2::new(x, y);
            }
            InputEvent::PointerUp => {
                self.camera.dragging = false;
            }
            InputEvent::PointerMove { x, y, modifiers } => self.pointer_move(Vec2::new(x, y), modifiers),
            InputEvent::Wheel { delta, modifiers } => self.wheel(delta, modifiers),
        }
    }

    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    // Each move replaces the previous delta on its axis: the anchor advances on
    // every move, so only the latest frame-to-frame motion is kept.
    fn pointer_move(&mut self, pos: Vec2, modifiers: Modifiers) {
        if !self.camera.dragging {
            return;
        }
        let d = pos - self.camera.anchor;
        let delta = &mut self.camera.delta;
        if modifiers.shift {
            delta.translation.z = d.y / self.drag_pan_divisor;
        } else if modifiers.alt {
            delta.translation.y = -d.y / self.drag_pan_divisor;
        } else {
            delta.rotation.y = d.x;
            delta.rotation.x = d.y;
        }
        self.camera.anchor = pos;
    }

    fn wheel(&mut self, amount: f32, modifiers: Modifiers) {
        let step = amount / self.wheel_divisor;
        let delta = &mut self.camera.delta;
        if modifiers.alt {
            delta.translation.y = -step;
        } else if modifiers.shift {
            delta.translation.x = -step;
        } else {
            delta.translation.z = step;
        }
    }

    /// Apply held-key orbit adjustments. Called once per frame.
    pub fn poll_keys(&self, orbit: &mut OrbitParams) {
        if self.is_held(keys::ARROW_LEFT) {
            orbit.widen(self.radius_step);
        }
        if self.is_held(keys::ARROW_RIGHT) {
            orbit.narrow(self.radius_step, self.min_radius);
        }
        if self.is_held(keys::ARROW_UP) {
            orbit.speed_up(self.period_step_ms, self.min_period_ms);
        }
        if self.is_held(keys::ARROW_DOWN) {
            orbit.slow_down(self.period_step_ms);
        }
    }

    /// Take the accumulated camera delta, leaving zero behind.
    pub fn take_camera_delta(&mut self) -> CameraDelta {
        std::mem::take(&mut self.camera.delta)
    }

    /// Forget held keys and any drag in progress.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.camera = CameraState::default();
    }
}
