use sillycraft_blocks::BlockRegistry;

use crate::mesh_build::MeshBuild;
use crate::voxel::VoxelGrid;

/// Appends one quad per visible face of each survivor, scaled to world units.
pub(crate) fn emit_faces(
    grid: &VoxelGrid,
    survivors: &[u32],
    reg: &BlockRegistry,
    scale: f32,
    out: &mut MeshBuild,
) {
    for &i in survivors {
        let voxel = grid.voxel(i as usize);
        let Some(block) = reg.get(voxel.id) else {
            continue;
        };
        if block.is_empty() {
            continue;
        }
        let rgba = block.color.to_array();
        for quad in voxel.faces.iter().filter(|q| q.visible) {
            out.add_quad(quad.corners.map(|c| c.to_world(scale)), rgba);
        }
    }
}
