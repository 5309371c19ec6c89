//! Parallel batch meshing on a dedicated worker pool.
#![forbid(unsafe_code)]

mod scratch_pool;

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use hashbrown::HashMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use sillycraft_blocks::BlockRegistry;
use sillycraft_chunk::{CHUNK_SCALE, ChunkBuf, ChunkCoord};
use sillycraft_mesh_cpu::{ChunkMesher, MeshBuild, MeshError, MeshSink, MeshStats};
use thiserror::Error;

pub use scratch_pool::{PooledScratch, ScratchPool};

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("failed to start mesh workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Finished mesh for one chunk.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    pub mesh: MeshBuild,
    pub stats: MeshStats,
}

pub type BatchOutput = HashMap<ChunkCoord, Result<ChunkMesh, MeshError>>;

/// Totals over one [`MeshRuntime::mesh_batch`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub chunks: usize,
    pub failed: usize,
    pub quads: usize,
    pub vertices: usize,
    pub indices: usize,
}

impl BatchStats {
    pub fn from_output(out: &BatchOutput) -> Self {
        let mut stats = BatchStats {
            chunks: out.len(),
            ..Default::default()
        };
        for res in out.values() {
            match res {
                Ok(m) => {
                    stats.quads += m.stats.quads;
                    stats.vertices += m.stats.vertices;
                    stats.indices += m.stats.indices;
                }
                Err(_) => stats.failed += 1,
            }
        }
        stats
    }
}

pub struct MeshRuntime {
    pool: ThreadPool,
    scratch: Arc<ScratchPool>,
    reg: Arc<BlockRegistry>,
    scale: f32,
    workers: usize,
}

impl MeshRuntime {
    /// Starts `workers` mesh threads; `0` picks the available parallelism.
    pub fn new(reg: Arc<BlockRegistry>, workers: usize) -> Result<Self, RuntimeError> {
        let workers = if workers == 0 {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(8)
        } else {
            workers
        };
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sillycraft-mesh-{i}"))
            .build()?;
        log::info!("mesh runtime started with {workers} workers");
        Ok(Self {
            pool,
            scratch: ScratchPool::with_capacity_from_workers(workers),
            reg,
            scale: CHUNK_SCALE,
            workers,
        })
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn registry(&self) -> &Arc<BlockRegistry> {
        &self.reg
    }

    pub fn scratch_pool(&self) -> &ScratchPool {
        &self.scratch
    }

    fn mesher(&self) -> ChunkMesher<'_> {
        ChunkMesher::new(&self.reg).with_scale(self.scale)
    }

    /// Meshes one chunk on the calling thread with pooled scratch.
    pub fn mesh_one(&self, chunk: &ChunkBuf) -> Result<ChunkMesh, MeshError> {
        let mut scratch = self.scratch.acquire();
        let mut mesh = MeshBuild::default();
        let stats = self.mesher().build_into(&mut scratch, chunk, &mut mesh)?;
        Ok(ChunkMesh { mesh, stats })
    }

    /// Meshes every chunk on the worker pool. When a coordinate repeats, the
    /// last chunk with it in `chunks` wins.
    pub fn mesh_batch(&self, chunks: &[ChunkBuf]) -> BatchOutput {
        let t0 = Instant::now();
        let results: Vec<(ChunkCoord, Result<ChunkMesh, MeshError>)> = self.pool.install(|| {
            chunks
                .par_iter()
                .map(|chunk| (chunk.coord, self.mesh_one(chunk)))
                .collect()
        });
        let mut out = HashMap::with_capacity(results.len());
        for (coord, res) in results {
            if let Err(e) = &res {
                log::warn!(
                    "chunk ({}, {}, {}) failed to mesh: {e}",
                    coord.cx,
                    coord.cy,
                    coord.cz
                );
            }
            out.insert(coord, res);
        }
        let stats = BatchStats::from_output(&out);
        log::info!(
            "meshed {} chunks ({} failed): {} quads, {} vertices in {}ms",
            stats.chunks,
            stats.failed,
            stats.quads,
            stats.vertices,
            t0.elapsed().as_millis()
        );
        out
    }

    /// Meshes `chunks` and hands each success to the sink for its coordinate.
    /// Failed chunks leave their sink untouched. Returns the batch totals.
    pub fn mesh_batch_into<K: MeshSink>(
        &self,
        chunks: &[ChunkBuf],
        sinks: &mut HashMap<ChunkCoord, K>,
    ) -> BatchStats {
        let out = self.mesh_batch(chunks);
        let stats = BatchStats::from_output(&out);
        for (coord, res) in out {
            if let (Ok(m), Some(sink)) = (res, sinks.get_mut(&coord)) {
                sink.replace_section(sillycraft_mesh_cpu::CHUNK_SECTION, m.mesh);
            }
        }
        stats
    }
}
