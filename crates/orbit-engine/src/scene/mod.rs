// scene/mod.rs
//
// What to draw and where: orbit kinematics, the satellite's fixed
// composition, primitive meshes, and per-frame draw list assembly.

pub mod composer;
pub mod mesh;
pub mod orbit;
pub mod satellite;
