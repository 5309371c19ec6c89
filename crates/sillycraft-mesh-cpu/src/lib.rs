//! CPU meshing crate: face-culling greedy mesher for dense block chunks.
//!
//! A meshing call runs three stages over one chunk:
//! 1. the sweep pass builds a [`VoxelGrid`], culling faces that touch a
//!    neighbor of the same block and joining each new face into the one just
//!    behind it along the face's sweep axis;
//! 2. the greedy pass folds every surviving face forward into its neighbor
//!    along a second in-plane axis when the two share an edge;
//! 3. the emitter writes 4 vertices, 6 indices and 4 colors per remaining
//!    face into a [`MeshBuild`].
#![forbid(unsafe_code)]

mod build;
mod constants;
mod emit;
pub mod error;
pub mod face;
mod greedy;
pub mod mesh_build;
pub mod sink;
pub mod voxel;

use std::time::Instant;

use sillycraft_blocks::BlockRegistry;
use sillycraft_chunk::{BlockSource, CHUNK_SCALE};

pub use error::MeshError;
pub use face::{Axis, Face, JoinKind};
pub use mesh_build::MeshBuild;
pub use sink::{MeshSections, MeshSink};
pub use voxel::{FaceQuad, Voxel, VoxelGrid};

/// Mesh section replaced by [`ChunkMesher::mesh_chunk`].
pub const CHUNK_SECTION: u32 = 0;

/// Reusable working set for meshing calls.
///
/// `Default` leaves the grid unallocated; it is sized by the first call.
#[derive(Clone, Debug, Default)]
pub struct MeshScratch {
    grid: VoxelGrid,
    survivors: Vec<u32>,
}

impl MeshScratch {
    pub fn new() -> Self {
        Self {
            grid: VoxelGrid::new(),
            survivors: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.grid.reset();
        self.survivors.clear();
    }

    /// Grid state left by the most recent call.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Voxels with at least one emitted face, in ascending flat-index order.
    pub fn survivors(&self) -> &[u32] {
        &self.survivors
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Faces that passed the visibility test.
    pub faces_built: usize,
    /// Faces absorbed by the sweep pass.
    pub faces_joined: usize,
    /// Faces absorbed by the greedy pass.
    pub faces_merged: usize,
    pub survivors: usize,
    pub quads: usize,
    pub vertices: usize,
    pub indices: usize,
    pub elapsed_us: u64,
}

/// Meshes chunks against a borrowed registry.
#[derive(Clone, Copy, Debug)]
pub struct ChunkMesher<'r> {
    reg: &'r BlockRegistry,
    scale: f32,
}

impl<'r> ChunkMesher<'r> {
    pub fn new(reg: &'r BlockRegistry) -> Self {
        Self {
            reg,
            scale: CHUNK_SCALE,
        }
    }

    /// World units per grid cell used when emitting vertices.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Builds a fresh mesh for `chunk` using a one-shot scratch.
    pub fn build<S: BlockSource + ?Sized>(&self, chunk: &S) -> Result<MeshBuild, MeshError> {
        let mut scratch = MeshScratch::default();
        let mut out = MeshBuild::default();
        self.build_into(&mut scratch, chunk, &mut out)?;
        Ok(out)
    }

    /// Meshes `chunk` into `out`, replacing its contents. On error `out` is left empty.
    pub fn build_into<S: BlockSource + ?Sized>(
        &self,
        scratch: &mut MeshScratch,
        chunk: &S,
        out: &mut MeshBuild,
    ) -> Result<MeshStats, MeshError> {
        let t0 = Instant::now();
        scratch.reset();
        out.clear_keep_capacity();

        let sweep = build::build_voxel_grid(&mut scratch.grid, chunk, self.reg)?;
        let merged = greedy::greedy_merge(&mut scratch.grid, &mut scratch.survivors);
        out.reserve_quads(
            sweep
                .faces_built
                .saturating_sub(sweep.faces_joined + merged),
        );
        emit::emit_faces(
            &scratch.grid,
            &scratch.survivors,
            self.reg,
            self.scale,
            out,
        );

        let stats = MeshStats {
            faces_built: sweep.faces_built,
            faces_joined: sweep.faces_joined,
            faces_merged: merged,
            survivors: scratch.survivors.len(),
            quads: out.quad_count(),
            vertices: out.vertex_count(),
            indices: out.idx.len(),
            elapsed_us: t0.elapsed().as_micros().min(u128::from(u64::MAX)) as u64,
        };
        log::debug!(
            target: "mesh",
            "meshed chunk: {} faces -> {} quads ({} joined, {} merged, {} survivors) in {}us",
            stats.faces_built,
            stats.quads,
            stats.faces_joined,
            stats.faces_merged,
            stats.survivors,
            stats.elapsed_us
        );
        Ok(stats)
    }

    /// Meshes `chunk` and hands the result to `sink` as section 0.
    /// The sink is only called when meshing succeeds.
    pub fn mesh_chunk<S, K>(&self, chunk: &S, sink: &mut K) -> Result<MeshStats, MeshError>
    where
        S: BlockSource + ?Sized,
        K: MeshSink + ?Sized,
    {
        let mut scratch = MeshScratch::default();
        self.mesh_chunk_with(&mut scratch, chunk, sink)
    }

    pub fn mesh_chunk_with<S, K>(
        &self,
        scratch: &mut MeshScratch,
        chunk: &S,
        sink: &mut K,
    ) -> Result<MeshStats, MeshError>
    where
        S: BlockSource + ?Sized,
        K: MeshSink + ?Sized,
    {
        let mut out = MeshBuild::default();
        let stats = self.build_into(scratch, chunk, &mut out)?;
        sink.replace_section(CHUNK_SECTION, out);
        Ok(stats)
    }
}
