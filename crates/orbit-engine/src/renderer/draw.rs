use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4};

/// Which uploaded mesh a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    Sphere = 0,
    Cube = 1,
}

/// Which texture unit binding a draw uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// 1×1 white pixel, so the vertex color shows through unmodulated.
    White = 0,
    /// The planet surface image.
    Planet = 1,
}

impl TextureSlot {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            0 => Some(Self::White),
            1 => Some(Self::Planet),
            _ => None,
        }
    }
}

/// One indexed draw call, written to a flat buffer for the JS WebGL renderer.
/// Must match the TypeScript protocol: 32 floats = 128 bytes stride.
///
/// Matrices are column-major, as `uniformMatrix*fv` expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DrawCommand {
    pub model_view: [f32; 16],
    /// Inverse-transpose of the model-view's upper 3×3.
    pub normal_matrix: [f32; 9],
    pub color: [f32; 3],
    /// `MeshKind` discriminant.
    pub mesh: f32,
    /// Number of leading indices to draw.
    pub index_count: f32,
    /// `TextureSlot` discriminant.
    pub texture: f32,
    _pad: f32,
}

impl DrawCommand {
    pub const FLOATS: usize = 32;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(mesh: MeshKind, texture: TextureSlot, color: [f32; 3], model_view: Mat4, index_count: u32) -> Self {
        Self {
            model_view: model_view.to_cols_array(),
            normal_matrix: normal_matrix(model_view).to_cols_array(),
            color,
            mesh: mesh as u32 as f32,
            index_count: index_count as f32,
            texture: texture as u32 as f32,
            _pad: 0.0,
        }
    }

    pub fn model_view(&self) -> Mat4 {
        Mat4::from_cols_array(&self.model_view)
    }

    pub fn mesh_kind(&self) -> MeshKind {
        if self.mesh == MeshKind::Cube as u32 as f32 {
            MeshKind::Cube
        } else {
            MeshKind::Sphere
        }
    }

    pub fn texture_slot(&self) -> TextureSlot {
        TextureSlot::from_index(self.texture as u32).unwrap_or(TextureSlot::White)
    }
}

/// Normal transform for lighting. Falls back to the plain 3×3 for a singular matrix.
pub fn normal_matrix(model_view: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model_view);
    if m.determinant().abs() < f32::EPSILON {
        return m;
    }
    m.inverse().transpose()
}

/// Ordered list of draw calls for one frame.
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.commands)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn draw_command_is_32_floats() {
        assert_eq!(std::mem::size_of::<DrawCommand>(), DrawCommand::STRIDE_BYTES);
    }

    #[test]
    fn command_round_trips_kind_and_slot() {
        let mv = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let cmd = DrawCommand::new(MeshKind::Cube, TextureSlot::Planet, [0.1, 0.2, 0.3], mv, 36);
        assert_eq!(cmd.mesh_kind(), MeshKind::Cube);
        assert_eq!(cmd.texture_slot(), TextureSlot::Planet);
        assert_eq!(cmd.model_view(), mv);
        assert_eq!(cmd.index_count, 36.0);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let mv = Mat4::from_scale(Vec3::new(2.0, 1.0, 0.5));
        let n = normal_matrix(mv);
        assert!((n.x_axis.x - 0.5).abs() < 1e-6);
        assert!((n.z_axis.z - 2.0).abs() < 1e-6);
    }

    #[test]
    fn normal_matrix_of_rotation_is_rotation() {
        let mv = Mat4::from_rotation_y(0.7) * Mat4::from_translation(Vec3::X * 5.0);
        let n = normal_matrix(mv);
        assert!(n.abs_diff_eq(Mat3::from_rotation_y(0.7), 1e-5));
    }

    #[test]
    fn list_floats_match_stride() {
        let mut list = DrawList::new();
        list.push(DrawCommand::new(MeshKind::Sphere, TextureSlot::White, [1.0; 3], Mat4::IDENTITY, 6));
        list.push(DrawCommand::new(MeshKind::Cube, TextureSlot::White, [1.0; 3], Mat4::IDENTITY, 36));
        assert_eq!(list.as_floats().len(), 2 * DrawCommand::FLOATS);
        list.clear();
        assert!(list.is_empty());
    }
}
