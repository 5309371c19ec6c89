//! Chunk constants, flat indexing, and the dense chunk buffer.
#![forbid(unsafe_code)]

use sillycraft_blocks::BlockId;

/// Edge length of a chunk in cells.
pub const CHUNK_SIZE: usize = 16;
pub const CHUNK_SIZE_2D: usize = CHUNK_SIZE * CHUNK_SIZE;
pub const CHUNK_SIZE_3D: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;
/// World units per grid cell.
pub const CHUNK_SCALE: f32 = 100.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }
}

/// Flat index of a cell. Y varies fastest, then Z, then X.
#[inline]
pub const fn flat_index(x: usize, y: usize, z: usize) -> usize {
    y + z * CHUNK_SIZE + x * CHUNK_SIZE_2D
}

/// Inverse of [`flat_index`]: returns `(x, y, z)`.
#[inline]
pub const fn delinearize(i: usize) -> (usize, usize, usize) {
    let y = i % CHUNK_SIZE;
    let z = (i / CHUNK_SIZE) % CHUNK_SIZE;
    let x = i / CHUNK_SIZE_2D;
    (x, y, z)
}

/// Read access to a chunk's block ids by flat index.
pub trait BlockSource {
    /// `idx` must lie in `[0, CHUNK_SIZE_3D)`.
    fn block_id(&self, idx: usize) -> BlockId;
}

impl<T: BlockSource + ?Sized> BlockSource for &T {
    #[inline]
    fn block_id(&self, idx: usize) -> BlockId {
        (**self).block_id(idx)
    }
}

impl BlockSource for [BlockId] {
    #[inline]
    fn block_id(&self, idx: usize) -> BlockId {
        self[idx]
    }
}

#[derive(Clone, Debug)]
pub struct ChunkBuf {
    pub coord: ChunkCoord,
    pub blocks: Vec<BlockId>,
}

impl ChunkBuf {
    /// Chunk with every cell set to `id`.
    pub fn filled(coord: ChunkCoord, id: BlockId) -> Self {
        ChunkBuf {
            coord,
            blocks: vec![id; CHUNK_SIZE_3D],
        }
    }

    /// Takes ownership of `blocks`, padding with `fill` or truncating to `CHUNK_SIZE_3D`.
    pub fn from_blocks(coord: ChunkCoord, blocks: Vec<BlockId>, fill: BlockId) -> Self {
        let mut b = blocks;
        if b.len() != CHUNK_SIZE_3D {
            b.resize(CHUNK_SIZE_3D, fill);
        }
        ChunkBuf { coord, blocks: b }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        flat_index(x, y, z)
    }

    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockId {
        self.blocks[self.idx(x, y, z)]
    }

    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, id: BlockId) {
        let i = self.idx(x, y, z);
        self.blocks[i] = id;
    }

    /// Sets every cell of the inclusive box `min..=max`.
    pub fn fill_box(&mut self, min: (usize, usize, usize), max: (usize, usize, usize), id: BlockId) {
        for x in min.0..=max.0 {
            for z in min.2..=max.2 {
                for y in min.1..=max.1 {
                    self.set_local(x, y, z, id);
                }
            }
        }
    }

    #[inline]
    pub fn has_non_air(&self, air: BlockId) -> bool {
        self.blocks.iter().any(|b| *b != air)
    }

    #[inline]
    pub fn is_all_air(&self, air: BlockId) -> bool {
        !self.has_non_air(air)
    }
}

impl BlockSource for ChunkBuf {
    #[inline]
    fn block_id(&self, idx: usize) -> BlockId {
        self.blocks[idx]
    }
}
