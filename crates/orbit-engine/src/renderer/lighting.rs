//! Fixed point-light setup for the scene's Phong shader.
//!
//! Uploaded once per rendering context as four `vec3` uniforms.

use bytemuck::{Pod, Zeroable};

/// Wire format (12 floats / 48 bytes):
/// `[position.xyz, ambient.rgb, diffuse.rgb, specular.rgb]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SceneLighting {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl SceneLighting {
    pub const FLOATS: usize = 12;

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

impl Default for SceneLighting {
    /// A grey light high above the planet, slightly toward the viewer.
    fn default() -> Self {
        Self {
            position: [0.0, 60.0, 5.0],
            ambient: [0.2; 3],
            diffuse: [0.7; 3],
            specular: [0.8; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighting_flattens_in_uniform_order() {
        let light = SceneLighting::default();
        let floats = light.as_floats();
        assert_eq!(floats.len(), SceneLighting::FLOATS);
        assert_eq!(&floats[0..3], &[0.0, 60.0, 5.0]);
        assert_eq!(floats[11], 0.8);
    }
}
