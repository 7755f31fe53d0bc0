//! CPU-side geometry for the two primitives the scene is built from.
//!
//! Vertex data is interleaved (position, normal, uv) and uploaded once per
//! rendering context; indices are u16 to match the WebGL1 element type.

use bytemuck::{Pod, Zeroable};
use std::f32::consts::PI;

use crate::api::config::SceneConfig;

/// Interleaved vertex: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u16>,
}

impl MeshData {
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Vertex data as a flat float slice for buffer upload.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// UV sphere centered on the origin. Texture `u` runs from 1 to 0 with
    /// longitude so the image is not mirrored when seen from outside.
    pub fn sphere(lat_bands: u16, long_bands: u16, radius: f32) -> Self {
        let lat_bands = lat_bands.max(2);
        let long_bands = long_bands.max(3);
        let row = long_bands + 1;

        let mut vertices = Vec::with_capacity(row as usize * (lat_bands as usize + 1));
        for lat in 0..=lat_bands {
            let theta = lat as f32 * PI / lat_bands as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();
            for long in 0..=long_bands {
                let phi = long as f32 * 2.0 * PI / long_bands as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let normal = [sin_theta * cos_phi, cos_theta, sin_phi * sin_theta];
                vertices.push(MeshVertex {
                    position: normal.map(|c| c * radius),
                    normal,
                    uv: [
                        1.0 - long as f32 / long_bands as f32,
                        1.0 - lat as f32 / lat_bands as f32,
                    ],
                });
            }
        }

        let mut indices = Vec::with_capacity(lat_bands as usize * long_bands as usize * 6);
        for lat in 0..lat_bands {
            for long in 0..long_bands {
                let v1 = lat * row + long;
                let v2 = v1 + row;
                let v3 = v1 + 1;
                let v4 = v2 + 1;
                indices.extend_from_slice(&[v1, v2, v3, v3, v2, v4]);
            }
        }

        Self { vertices, indices }
    }

    /// Axis-aligned cube spanning [-1, 1] on every axis, 4 vertices per face.
    pub fn cube() -> Self {
        const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
            // front
            ([0.0, 0.0, 1.0], [[1.0, 1.0, 1.0], [-1.0, 1.0, 1.0], [-1.0, -1.0, 1.0], [1.0, -1.0, 1.0]]),
            // back
            ([0.0, 0.0, -1.0], [[1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [1.0, -1.0, -1.0]]),
            // left
            ([-1.0, 0.0, 0.0], [[-1.0, 1.0, 1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]]),
            // right
            ([1.0, 0.0, 0.0], [[1.0, 1.0, 1.0], [1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [1.0, 1.0, -1.0]]),
            // top
            ([0.0, 1.0, 0.0], [[1.0, 1.0, 1.0], [1.0, 1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, 1.0, 1.0]]),
            // bottom
            ([0.0, -1.0, 0.0], [[1.0, -1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, -1.0, -1.0], [-1.0, -1.0, 1.0]]),
        ];
        // back and bottom wind the other way so every face is counter-clockwise from outside
        const WINDING: [[u16; 6]; 6] = [
            [0, 1, 2, 0, 2, 3],
            [0, 2, 1, 0, 3, 2],
            [0, 1, 2, 0, 2, 3],
            [0, 1, 2, 0, 2, 3],
            [0, 1, 2, 0, 2, 3],
            [0, 2, 1, 0, 3, 2],
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (face, ((normal, corners), winding)) in FACES.iter().zip(WINDING.iter()).enumerate() {
            let base = (face * 4) as u16;
            for corner in corners {
                vertices.push(MeshVertex { position: *corner, normal: *normal, uv: [0.0, 0.0] });
            }
            indices.extend(winding.iter().map(|i| base + i));
        }

        Self { vertices, indices }
    }
}

/// Number of leading sphere indices drawn for the dish cap:
/// `total / ratio`, rounded to the nearest integer and then down to a whole triangle.
pub fn dish_index_count(sphere_index_count: u32, ratio: f32) -> u32 {
    if ratio <= 0.0 {
        return sphere_index_count;
    }
    let n = (sphere_index_count as f32 / ratio).round() as u32;
    (n - n % 3).min(sphere_index_count)
}

/// The meshes every frame draws from, built once from the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneMeshes {
    /// Planet-sized sphere; the dish reuses it with a scale.
    pub sphere: MeshData,
    pub cube: MeshData,
    pub dish_index_count: u32,
}

impl SceneMeshes {
    pub fn new(config: &SceneConfig) -> Self {
        let sphere = MeshData::sphere(config.sphere_lat_bands, config.sphere_long_bands, config.planet_radius);
        let dish_index_count = dish_index_count(sphere.index_count(), config.dish_index_ratio);
        Self {
            sphere,
            cube: MeshData::cube(),
            dish_index_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_vertex_is_8_floats() {
        assert_eq!(std::mem::size_of::<MeshVertex>(), MeshVertex::STRIDE_BYTES);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = MeshData::sphere(25, 25, 10.0);
        assert_eq!(mesh.vertices.len(), 26 * 26);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 10.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_stay_in_bounds() {
        let mesh = MeshData::sphere(25, 25, 10.0);
        assert_eq!(mesh.index_count(), 25 * 25 * 6);
        let max = mesh.vertices.len() as u16;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }

    #[test]
    fn sphere_uvs_cover_unit_square() {
        let mesh = MeshData::sphere(4, 8, 1.0);
        assert_eq!(mesh.vertices[0].uv, [1.0, 1.0]);
        assert_eq!(mesh.vertices.last().unwrap().uv, [0.0, 0.0]);
    }

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let mesh = MeshData::cube();
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.vertex_floats().len(), 24 * MeshVertex::FLOATS);
    }

    #[test]
    fn cube_faces_wind_outward() {
        let mesh = MeshData::cube();
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| glam::Vec3::from(mesh.vertices[i as usize].position));
            let n = glam::Vec3::from(mesh.vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn scene_meshes_follow_config() {
        let meshes = SceneMeshes::new(&SceneConfig::default());
        assert_eq!(meshes.sphere.index_count(), 3750);
        assert_eq!(meshes.dish_index_count, 429);
        assert_eq!(meshes.cube.index_count(), 36);
    }

    #[test]
    fn dish_count_is_whole_triangles() {
        let n = dish_index_count(3750, 8.7);
        assert_eq!(n % 3, 0);
        assert_eq!(n, 429);
        assert_eq!(dish_index_count(30, 0.0), 30);
    }
}
