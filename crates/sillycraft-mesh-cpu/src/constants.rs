//! Shared constants for sillycraft-mesh-cpu.

pub(crate) const FACE_COUNT: usize = 6;
pub(crate) const VERTS_PER_FACE: usize = 4;
pub(crate) const INDICES_PER_FACE: usize = 6;
pub(crate) const POS_COMPONENTS: usize = 3;
pub(crate) const COLOR_COMPONENTS: usize = 4;
