//! Per-frame draw list assembly.
//!
//! The planet and the satellite each get their own push/pop scope off the
//! camera's base transform; every satellite part gets a nested scope so
//! siblings never inherit each other's local transform.

use glam::Mat4;

use crate::core::transform_stack::{TransformStack, TransformStackError};
use crate::renderer::draw::{DrawCommand, DrawList, MeshKind, TextureSlot};
use crate::scene::mesh::SceneMeshes;
use crate::scene::orbit::SatellitePose;
use crate::scene::satellite::{PartShape, SATELLITE_PARTS};

/// Planet surface tint; white leaves the texture unmodulated.
const PLANET_TINT: [f32; 3] = [1.0, 1.0, 1.0];

/// Per-frame inputs to composition.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    /// Planet self-rotation in radians, applied as a negative yaw.
    pub planet_angle: f64,
    pub satellite: SatellitePose,
    /// Texture to bind for the planet (white until the image has loaded).
    pub planet_texture: TextureSlot,
}

/// Fill `out` with the frame's draws, in order: planet, then satellite parts.
///
/// On a push/pop mismatch `out` is left empty so nothing from the broken
/// frame reaches the renderer.
pub fn compose_frame(
    stack: &mut TransformStack,
    base: Mat4,
    inputs: &FrameInputs,
    meshes: &SceneMeshes,
    out: &mut DrawList,
) -> Result<(), TransformStackError> {
    out.clear();
    let result = compose_into(stack, base, inputs, meshes, out);
    if result.is_err() {
        out.clear();
    }
    result
}

fn compose_into(
    stack: &mut TransformStack,
    base: Mat4,
    inputs: &FrameInputs,
    meshes: &SceneMeshes,
    out: &mut DrawList,
) -> Result<(), TransformStackError> {
    stack.begin(base)?;

    stack.scoped(|s| {
        s.rotate_y(-inputs.planet_angle as f32);
        out.push(DrawCommand::new(
            MeshKind::Sphere,
            inputs.planet_texture,
            PLANET_TINT,
            s.current(),
            meshes.sphere.index_count(),
        ));
        Ok(())
    })?;

    stack.scoped(|s| {
        s.translate(inputs.satellite.position);
        s.rotate_y(inputs.satellite.heading);
        for part in &SATELLITE_PARTS {
            s.scoped(|p| {
                part.apply(p);
                let (mesh, index_count) = match part.shape {
                    PartShape::Cube => (MeshKind::Cube, meshes.cube.index_count()),
                    PartShape::Dish => (MeshKind::Sphere, meshes.dish_index_count),
                };
                out.push(DrawCommand::new(mesh, TextureSlot::White, part.color, p.current(), index_count));
                Ok(())
            })?;
        }
        Ok(())
    })?;

    stack.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::SceneConfig;
    use crate::scene::orbit::{satellite_pose, OrbitParams};
    use crate::scene::satellite::{BALL_BLUE, GOLDEN, SILVER};
    use glam::Vec3;

    fn inputs(elapsed_ms: f64) -> FrameInputs {
        FrameInputs {
            planet_angle: 0.0,
            satellite: satellite_pose(elapsed_ms, &OrbitParams::new(15.0, 5000)),
            planet_texture: TextureSlot::Planet,
        }
    }

    fn compose(base: Mat4, inputs: &FrameInputs) -> (DrawList, TransformStack) {
        let meshes = SceneMeshes::new(&SceneConfig::default());
        let mut stack = TransformStack::default();
        let mut list = DrawList::new();
        compose_frame(&mut stack, base, inputs, &meshes, &mut list).unwrap();
        (list, stack)
    }

    #[test]
    fn draws_planet_then_seven_parts_in_order() {
        let (list, stack) = compose(Mat4::IDENTITY, &inputs(0.0));
        assert_eq!(list.len(), 8);
        assert!(stack.is_empty());

        let cmds = list.as_slice();
        assert_eq!(cmds[0].mesh_kind(), MeshKind::Sphere);
        assert_eq!(cmds[0].texture_slot(), TextureSlot::Planet);
        assert_eq!(cmds[0].index_count, 3750.0);

        let colors: Vec<[f32; 3]> = cmds[1..].iter().map(|c| c.color).collect();
        assert_eq!(colors, vec![SILVER, GOLDEN, GOLDEN, GOLDEN, GOLDEN, BALL_BLUE, BALL_BLUE]);

        let dish = &cmds[5];
        assert_eq!(dish.mesh_kind(), MeshKind::Sphere);
        assert_eq!(dish.texture_slot(), TextureSlot::White);
        assert_eq!(dish.index_count, 429.0);
    }

    #[test]
    fn satellite_body_sits_at_orbit_position() {
        // quarter orbit: satellite at (0, 0, 15) facing -π/2 about Y
        let (list, _) = compose(Mat4::IDENTITY, &inputs(1250.0));
        let body = list.as_slice()[1].model_view();
        let center = body.transform_point3(Vec3::ZERO);
        assert!((center - Vec3::new(0.0, 0.0, 15.0)).length() < 1e-4);

        // the antenna's local -X now points back at the planet
        let mount = list.as_slice()[4].model_view().transform_point3(Vec3::ZERO);
        assert!(mount.z < center.z);
        assert!(mount.x.abs() < 1e-4);
    }

    #[test]
    fn parts_are_relative_to_base_transform() {
        let base = Mat4::from_translation(Vec3::new(0.0, 0.0, -45.0));
        let (moved, _) = compose(base, &inputs(700.0));
        let (plain, _) = compose(Mat4::IDENTITY, &inputs(700.0));
        for (m, p) in moved.iter().zip(plain.iter()) {
            assert!(m.model_view().abs_diff_eq(base * p.model_view(), 1e-4));
        }
    }

    #[test]
    fn planet_spins_backwards() {
        let mut frame = inputs(0.0);
        frame.planet_angle = std::f64::consts::FRAC_PI_2;
        let (list, _) = compose(Mat4::IDENTITY, &frame);
        let p = list.as_slice()[0].model_view().transform_point3(Vec3::X);
        // rotate_y(-π/2) maps +X to +Z
        assert!((p - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn leftover_push_aborts_frame() {
        let meshes = SceneMeshes::new(&SceneConfig::default());
        let mut stack = TransformStack::default();
        let mut list = DrawList::new();
        stack.push();
        let err = compose_frame(&mut stack, Mat4::IDENTITY, &inputs(0.0), &meshes, &mut list).unwrap_err();
        assert_eq!(err, TransformStackError::Unbalanced { remaining: 1 });
        assert!(list.is_empty());

        // the stack is usable again on the next frame
        compose_frame(&mut stack, Mat4::IDENTITY, &inputs(0.0), &meshes, &mut list).unwrap();
        assert_eq!(list.len(), 8);
    }
}
