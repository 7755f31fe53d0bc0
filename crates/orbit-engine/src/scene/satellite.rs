//! Fixed composition of the satellite model.
//!
//! Every part is a unit primitive (the 2×2×2 cube or the sphere mesh) placed
//! relative to the satellite frame. Offsets and scales are in satellite-local
//! units; the cube is 2 wide, so a scale of 0.25 yields a length of 0.5.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec3};

use crate::core::transform_stack::TransformStack;

pub const GOLDEN: [f32; 3] = [1.0, 0.84, 0.0];
pub const SILVER: [f32; 3] = [0.75, 0.75, 0.75];
pub const BALL_BLUE: [f32; 3] = [0.13, 0.67, 0.8];

/// Primitive mesh a part is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartShape {
    Cube,
    /// A leading slice of the sphere's index buffer, forming a shallow cap.
    Dish,
}

/// One step of a part's local transform, applied in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalOp {
    Translate(Vec3),
    RotateX(f32),
    RotateY(f32),
    RotateZ(f32),
    Scale(Vec3),
}

impl LocalOp {
    pub fn apply(self, stack: &mut TransformStack) {
        match self {
            Self::Translate(v) => stack.translate(v),
            Self::RotateX(a) => stack.rotate_x(a),
            Self::RotateY(a) => stack.rotate_y(a),
            Self::RotateZ(a) => stack.rotate_z(a),
            Self::Scale(v) => stack.scale(v),
        }
    }

    pub fn matrix(self) -> Mat4 {
        match self {
            Self::Translate(v) => Mat4::from_translation(v),
            Self::RotateX(a) => Mat4::from_rotation_x(a),
            Self::RotateY(a) => Mat4::from_rotation_y(a),
            Self::RotateZ(a) => Mat4::from_rotation_z(a),
            Self::Scale(v) => Mat4::from_scale(v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatellitePart {
    pub name: &'static str,
    pub shape: PartShape,
    pub color: [f32; 3],
    pub ops: &'static [LocalOp],
}

impl SatellitePart {
    /// The part's placement within the satellite frame.
    pub fn local_transform(&self) -> Mat4 {
        self.ops.iter().fold(Mat4::IDENTITY, |m, op| m * op.matrix())
    }

    pub fn apply(&self, stack: &mut TransformStack) {
        for op in self.ops {
            op.apply(stack);
        }
    }
}

const fn rod(name: &'static str, ops: &'static [LocalOp]) -> SatellitePart {
    SatellitePart { name, shape: PartShape::Cube, color: GOLDEN, ops }
}

const fn panel(name: &'static str, ops: &'static [LocalOp]) -> SatellitePart {
    SatellitePart { name, shape: PartShape::Cube, color: BALL_BLUE, ops }
}

const ROD_POS_Z: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(0.0, 0.0, 1.25)),
    LocalOp::Scale(Vec3::new(0.1, 0.1, 0.25)),
];
const ROD_NEG_Z: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(0.0, 0.0, -1.25)),
    LocalOp::Scale(Vec3::new(0.1, 0.1, 0.25)),
];
const ANTENNA_MOUNT: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(-1.2, 0.0, 0.0)),
    LocalOp::RotateY(FRAC_PI_2),
    LocalOp::Scale(Vec3::new(0.1, 0.1, 0.2)),
];
const DISH: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(-5.4, 0.0, 0.0)),
    LocalOp::RotateZ(FRAC_PI_2),
    LocalOp::RotateX(PI),
    LocalOp::Scale(Vec3::new(0.4, 0.4, 0.4)),
];
const PANEL_POS_Z: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(0.0, 0.0, 2.5)),
    LocalOp::Scale(Vec3::new(0.5, 0.09, 1.0)),
];
const PANEL_NEG_Z: &[LocalOp] = &[
    LocalOp::Translate(Vec3::new(0.0, 0.0, -2.5)),
    LocalOp::Scale(Vec3::new(0.5, 0.09, 1.0)),
];

/// Parts in draw order. The antenna points along -X, toward the planet
/// when the satellite faces along its orbit.
pub const SATELLITE_PARTS: [SatellitePart; 7] = [
    SatellitePart { name: "body", shape: PartShape::Cube, color: SILVER, ops: &[] },
    rod("rod+z", ROD_POS_Z),
    rod("rod-z", ROD_NEG_Z),
    rod("antenna-mount", ANTENNA_MOUNT),
    SatellitePart { name: "dish", shape: PartShape::Dish, color: GOLDEN, ops: DISH },
    panel("panel+z", PANEL_POS_Z),
    panel("panel-z", PANEL_NEG_Z),
];
