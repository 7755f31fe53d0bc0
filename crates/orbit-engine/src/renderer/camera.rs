use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::config::SceneConfig;
use crate::input::state::CameraDelta;

/// Perspective camera whose view transform is the base of every model-view.
/// User motion is folded into the view one frame at a time.
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Current base (view) transform.
    view: Mat4,
    /// Pointer pixels per radian of rotation.
    rotate_divisor: f32,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
}

impl Camera3D {
    pub fn new(config: &SceneConfig, aspect: f32) -> Self {
        let home = Mat4::look_at_rh(Vec3::new(0.0, 0.0, config.eye_distance), Vec3::ZERO, Vec3::Y);
        Self {
            fov_y: config.fov_degrees.to_radians(),
            aspect: sanitize_aspect(aspect),
            near: config.near,
            far: config.far,
            view: home,
            rotate_divisor: config.rotate_divisor,
        }
    }

    /// OpenGL-convention projection (clip z in [-1, 1]) for WebGL.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Fold one frame of user motion into the view:
    /// translate, then turn about X, then about Y.
    pub fn apply_delta(&mut self, delta: CameraDelta) {
        if delta.is_zero() {
            return;
        }
        self.view = self.view
            * Mat4::from_translation(delta.translation)
            * Mat4::from_rotation_x(delta.rotation.x / self.rotate_divisor)
            * Mat4::from_rotation_y(delta.rotation.y / self.rotate_divisor);
    }

    /// Resize the viewport (e.g. on canvas resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = sanitize_aspect(width / height);
        }
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
