use sillycraft_blocks::BlockRegistry;
use sillycraft_chunk::{BlockSource, CHUNK_SIZE_3D, delinearize};
use sillycraft_geom::IVec3;

use crate::error::MeshError;
use crate::face::Face;
use crate::voxel::VoxelGrid;

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SweepCounts {
    pub faces_built: usize,
    pub faces_joined: usize,
}

/// Fills `grid` from `chunk`: culls hidden faces and joins runs along each
/// face's sweep axis. `grid` must be freshly reset.
///
/// Visibility reads neighbors from the source chunk; join compatibility reads
/// the predecessor from the grid, which is always already filled because the
/// predecessor has a lower flat index.
pub(crate) fn build_voxel_grid<S: BlockSource + ?Sized>(
    grid: &mut VoxelGrid,
    chunk: &S,
    reg: &BlockRegistry,
) -> Result<SweepCounts, MeshError> {
    let air = reg.air_id();
    let mut counts = SweepCounts::default();
    for i in 0..CHUNK_SIZE_3D {
        let id = chunk.block_id(i);
        let block = reg.get(id).ok_or(MeshError::UnknownBlock { id, index: i })?;
        grid.voxel_mut(i).id = id;
        if block.is_empty() {
            continue;
        }
        let (x, y, z) = delinearize(i);
        let cell = IVec3::new(x as i32, y as i32, z as i32);
        for f in Face::ALL {
            let neighbor = f.outward_neighbor(i).map_or(air, |n| chunk.block_id(n));
            if neighbor == id {
                continue;
            }
            counts.faces_built += 1;
            let quad = grid.face_mut(i, f);
            quad.visible = true;
            quad.corners = f.unit_corners().map(|c| c + cell);

            let Some(p) = f.sweep_predecessor(i) else {
                continue;
            };
            if grid.voxel(p).id == id && grid.face(p, f).visible {
                grid.join(f, i, p);
                counts.faces_joined += 1;
            }
        }
    }
    Ok(counts)
}
