use sillycraft_chunk::CHUNK_SIZE_3D;

use crate::face::Face;
use crate::voxel::VoxelGrid;

/// Second pass: folds each visible face into its successor along the face's
/// greedy axis. Pushes, in ascending order, every voxel that still has a
/// visible face. Returns the number of faces folded away.
pub(crate) fn greedy_merge(grid: &mut VoxelGrid, survivors: &mut Vec<u32>) -> usize {
    survivors.clear();
    let mut merged = 0;
    for i in 0..CHUNK_SIZE_3D {
        let mut survives = false;
        for f in Face::ALL {
            if !grid.face(i, f).visible {
                continue;
            }
            if let Some(next) = f.greedy_successor(i) {
                if grid.greedy_join(f, i, next) {
                    merged += 1;
                    continue;
                }
            }
            survives = true;
        }
        if survives {
            survivors.push(i as u32);
        }
    }
    merged
}
