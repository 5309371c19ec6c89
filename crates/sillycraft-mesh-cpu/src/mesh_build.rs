use sillycraft_geom::Vec3;

use crate::constants::{COLOR_COMPONENTS, INDICES_PER_FACE, POS_COMPONENTS, VERTS_PER_FACE};

/// Parallel vertex/index/color buffers for one mesh section.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub idx: Vec<u32>,
    pub col: Vec<f32>,
}

impl MeshBuild {
    /// Clears all arrays but retains capacity for reuse across calls.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.idx.clear();
        self.col.clear();
    }

    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * VERTS_PER_FACE * POS_COMPONENTS);
        self.col.reserve(n_quads * VERTS_PER_FACE * COLOR_COMPONENTS);
        self.idx.reserve(n_quads * INDICES_PER_FACE);
    }

    /// Appends corners in order as two triangles `(n, n+1, n+2)` and
    /// `(n+2, n+3, n)`, with `rgba` repeated per vertex.
    pub fn add_quad(&mut self, corners: [Vec3; 4], rgba: [f32; 4]) {
        let base = self.vertex_count() as u32;
        for v in corners {
            self.pos.extend_from_slice(&v.to_array());
            self.col.extend_from_slice(&rgba);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / POS_COMPONENTS
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / INDICES_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Corners of quad `q` in emission order.
    pub fn quad(&self, q: usize) -> [Vec3; 4] {
        let base = q * VERTS_PER_FACE * POS_COMPONENTS;
        std::array::from_fn(|k| {
            let p = &self.pos[base + k * POS_COMPONENTS..base + (k + 1) * POS_COMPONENTS];
            Vec3::new(p[0], p[1], p[2])
        })
    }

    /// Color of quad `q` (taken from its first vertex).
    pub fn quad_color(&self, q: usize) -> [f32; 4] {
        let base = q * VERTS_PER_FACE * COLOR_COMPONENTS;
        let c = &self.col[base..base + COLOR_COMPONENTS];
        [c[0], c[1], c[2], c[3]]
    }

    /// Returns a slice of interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    /// Returns a slice of interleaved vertex colors (r,g,b,a per vertex).
    pub fn colors(&self) -> &[f32] {
        &self.col
    }
}
