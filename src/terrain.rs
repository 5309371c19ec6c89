use std::error::Error;

use fastnoise_lite::{FastNoiseLite, NoiseType};
use sillycraft_blocks::{BlockId, BlockRegistry};
use sillycraft_chunk::{CHUNK_SIZE, ChunkBuf, ChunkCoord};

use crate::config::{TerrainConfig, WorldExtent};

/// Heightmap terrain over a fixed world extent. Z is up.
pub struct Terrain {
    noise: FastNoiseLite,
    air: BlockId,
    min_h: i32,
    max_h: i32,
    // Block per world elevation, resolved once from the registry bands.
    by_elevation: Vec<BlockId>,
}

impl Terrain {
    pub fn new(
        cfg: &TerrainConfig,
        extent: WorldExtent,
        seed: i32,
        reg: &BlockRegistry,
    ) -> Result<Self, Box<dyn Error>> {
        let fill = reg
            .by_name(&cfg.fill)
            .filter(|b| !b.is_empty())
            .or_else(|| reg.blocks.iter().filter(|b| !b.is_empty()).min_by_key(|b| b.id))
            .ok_or("block registry has no solid block to build terrain from")?
            .id;

        let world_h = (extent.chunks_z * CHUNK_SIZE) as i32;
        let by_elevation = (0..world_h)
            .map(|z| reg.pick_for_elevation(z).map_or(fill, |b| b.id))
            .collect();

        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        noise.set_frequency(Some(cfg.frequency));

        let min_h = (world_h as f32 * cfg.min_ratio) as i32;
        let max_h = (world_h as f32 * cfg.max_ratio) as i32;
        Ok(Self {
            noise,
            air: reg.air_id(),
            min_h,
            max_h: max_h.max(min_h),
            by_elevation,
        })
    }

    /// Number of solid cells in the column at world `(wx, wy)`; at least one.
    pub fn column_height(&self, wx: i32, wy: i32) -> i32 {
        let h = self.noise.get_noise_2d(wx as f32, wy as f32);
        // map [-1,1] -> [min_h, max_h]
        let hh = ((h + 1.0) * 0.5 * (self.max_h - self.min_h) as f32) as i32 + self.min_h;
        hh.clamp(1, self.by_elevation.len().max(1) as i32)
    }

    pub fn block_at_elevation(&self, wz: i32) -> BlockId {
        usize::try_from(wz)
            .ok()
            .and_then(|z| self.by_elevation.get(z).copied())
            .unwrap_or(self.air)
    }

    pub fn generate_chunk(&self, coord: ChunkCoord) -> ChunkBuf {
        let mut chunk = ChunkBuf::filled(coord, self.air);
        let n = CHUNK_SIZE as i32;
        let (x0, y0, z0) = (coord.cx * n, coord.cy * n, coord.cz * n);
        for x in 0..CHUNK_SIZE {
            for y in 0..CHUNK_SIZE {
                let height = self.column_height(x0 + x as i32, y0 + y as i32);
                let top = (height - z0).clamp(0, n) as usize;
                for z in 0..top {
                    chunk.set_local(x, y, z, self.block_at_elevation(z0 + z as i32));
                }
            }
        }
        chunk
    }

    /// All chunks of `extent`, x-major.
    pub fn generate_world(&self, extent: WorldExtent) -> Vec<ChunkBuf> {
        let mut chunks = Vec::with_capacity(extent.chunk_count());
        for cx in 0..extent.chunks_x as i32 {
            for cy in 0..extent.chunks_y as i32 {
                for cz in 0..extent.chunks_z as i32 {
                    chunks.push(self.generate_chunk(ChunkCoord::new(cx, cy, cz)));
                }
            }
        }
        chunks
    }
}
