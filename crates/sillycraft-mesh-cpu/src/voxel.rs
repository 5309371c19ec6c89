use sillycraft_blocks::BlockId;
use sillycraft_chunk::CHUNK_SIZE_3D;
use sillycraft_geom::IVec3;

use crate::constants::FACE_COUNT;
use crate::face::Face;

/// One candidate quad of a voxel, in grid coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FaceQuad {
    pub visible: bool,
    /// Corners v1..v4.
    pub corners: [IVec3; 4],
    /// Voxel index of the same-direction face this one absorbed in the sweep pass.
    pub prev: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voxel {
    pub id: BlockId,
    pub faces: [FaceQuad; FACE_COUNT],
}

impl Voxel {
    #[inline]
    pub fn face(&self, f: Face) -> &FaceQuad {
        &self.faces[f.index()]
    }

    #[inline]
    pub fn has_visible_face(&self) -> bool {
        self.faces.iter().any(|q| q.visible)
    }
}

/// Dense per-cell working set for one meshing call, indexed by flat index.
/// Faces refer to each other by voxel index, so the grid doubles as the face arena.
///
/// `Default` is an unallocated grid; [`VoxelGrid::reset`] sizes it on first use.
#[derive(Clone, Debug, Default)]
pub struct VoxelGrid {
    voxels: Vec<Voxel>,
}

impl VoxelGrid {
    pub fn new() -> Self {
        Self {
            voxels: vec![Voxel::default(); CHUNK_SIZE_3D],
        }
    }

    /// Clears every voxel while keeping the allocation.
    pub fn reset(&mut self) {
        self.voxels.clear();
        self.voxels.resize(CHUNK_SIZE_3D, Voxel::default());
    }

    #[inline]
    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    #[inline]
    pub fn voxel(&self, i: usize) -> &Voxel {
        &self.voxels[i]
    }

    #[inline]
    pub(crate) fn voxel_mut(&mut self, i: usize) -> &mut Voxel {
        &mut self.voxels[i]
    }

    #[inline]
    pub fn face(&self, i: usize, f: Face) -> &FaceQuad {
        &self.voxels[i].faces[f.index()]
    }

    #[inline]
    pub(crate) fn face_mut(&mut self, i: usize, f: Face) -> &mut FaceQuad {
        &mut self.voxels[i].faces[f.index()]
    }

    /// Extends the face at `prev` into the face at `i` along the sweep axis.
    ///
    /// `prev` is resolved one hop through its link; the resolved head never has
    /// a link of its own, so chains stay at depth one.
    pub(crate) fn join(&mut self, f: Face, i: usize, prev: usize) {
        let mut head = prev;
        if let Some(p) = self.face(prev, f).prev {
            self.face_mut(prev, f).visible = false;
            head = p as usize;
        }
        debug_assert!(
            self.face(head, f).prev.is_none(),
            "merge chain deeper than one hop at voxel {head} ({f:?})"
        );
        let src = self.face(head, f).corners;
        let dst = self.face_mut(i, f);
        for c in f.join_kind().copied_corners() {
            dst.corners[c] = src[c];
        }
        dst.prev = Some(head as u32);
        self.face_mut(head, f).visible = false;
    }

    /// Folds the face at `i` forward into the face at `other` when they share an
    /// edge (`v3 == other.v2`, `v4 == other.v1`). Block ids are not compared;
    /// the grown face keeps `other`'s block.
    pub(crate) fn greedy_join(&mut self, f: Face, i: usize, other: usize) -> bool {
        let a = *self.face(i, f);
        let b = self.face(other, f);
        let mergeable =
            b.visible && a.corners[2] == b.corners[1] && a.corners[3] == b.corners[0];
        if !mergeable {
            return false;
        }
        let b = self.face_mut(other, f);
        b.corners[0] = a.corners[0];
        b.corners[1] = a.corners[1];
        self.face_mut(i, f).visible = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sillycraft_chunk::flat_index;

    fn seed_face(grid: &mut VoxelGrid, i: usize, f: Face, cell: IVec3) {
        let q = grid.face_mut(i, f);
        q.visible = true;
        q.corners = f.unit_corners().map(|c| c + cell);
    }

    #[test]
    fn chained_joins_keep_depth_one_and_a_single_live_head() {
        let mut grid = VoxelGrid::new();
        let f = Face::Top;
        let cells: Vec<usize> = (0..5).map(|y| flat_index(2, y, 3)).collect();
        for (y, &i) in cells.iter().enumerate() {
            seed_face(&mut grid, i, f, IVec3::new(2, y as i32, 3));
            if y > 0 {
                grid.join(f, i, cells[y - 1]);
            }
        }
        for &i in &cells[1..] {
            assert_eq!(grid.face(i, f).prev, Some(cells[0] as u32));
        }
        let live: Vec<usize> = cells
            .iter()
            .copied()
            .filter(|&i| grid.face(i, f).visible)
            .collect();
        assert_eq!(live, vec![cells[4]]);
        let head = grid.face(cells[4], f);
        assert_eq!(head.corners[0], IVec3::new(2, 0, 4));
        assert_eq!(head.corners[1], IVec3::new(2, 5, 4));
        assert_eq!(head.corners[2], IVec3::new(3, 5, 4));
        assert_eq!(head.corners[3], IVec3::new(3, 0, 4));
    }

    #[test]
    fn trailing_join_copies_v2_v3() {
        let mut grid = VoxelGrid::new();
        let f = Face::Left;
        let a = flat_index(0, 0, 0);
        let b = flat_index(1, 0, 0);
        seed_face(&mut grid, a, f, IVec3::new(0, 0, 0));
        seed_face(&mut grid, b, f, IVec3::new(1, 0, 0));
        grid.join(f, b, a);
        let q = grid.face(b, f);
        assert_eq!(
            q.corners,
            [
                IVec3::new(2, 0, 0),
                IVec3::new(0, 0, 0),
                IVec3::new(0, 0, 1),
                IVec3::new(2, 0, 1),
            ]
        );
        assert!(!grid.face(a, f).visible);
    }

    #[test]
    fn greedy_join_requires_shared_edge_only() {
        let mut grid = VoxelGrid::new();
        let f = Face::Front;
        let a = flat_index(0, 0, 0);
        let b = flat_index(0, 0, 1);
        let c = flat_index(0, 0, 2);
        seed_face(&mut grid, a, f, IVec3::new(0, 0, 0));
        seed_face(&mut grid, b, f, IVec3::new(0, 0, 1));
        seed_face(&mut grid, c, f, IVec3::new(0, 0, 2));
        grid.voxel_mut(a).id = 1;
        grid.voxel_mut(b).id = 2;
        grid.voxel_mut(c).id = 1;

        assert!(!grid.greedy_join(f, a, c), "no shared edge");

        // Different blocks still merge; the target keeps its own id.
        assert!(grid.greedy_join(f, a, b));
        assert_eq!(grid.voxel(b).id, 2);
        assert!(!grid.face(a, f).visible);
        let q = grid.face(b, f);
        assert_eq!(q.corners[0], IVec3::new(0, 0, 0));
        assert_eq!(q.corners[1], IVec3::new(0, 1, 0));
        assert_eq!(q.corners[2], IVec3::new(0, 1, 2));
        assert_eq!(q.corners[3], IVec3::new(0, 0, 2));

        // The grown face now shares an edge with `c`, but hidden targets never absorb.
        grid.face_mut(c, f).visible = false;
        assert!(!grid.greedy_join(f, b, c));
    }

    #[test]
    fn reset_clears_links_and_visibility() {
        let mut grid = VoxelGrid::new();
        seed_face(&mut grid, 0, Face::Top, IVec3::ZERO);
        seed_face(&mut grid, 1, Face::Top, IVec3::new(0, 1, 0));
        grid.join(Face::Top, 1, 0);
        grid.reset();
        assert!(grid.voxels().iter().all(|v| *v == Voxel::default()));
    }

    #[test]
    fn default_grid_is_sized_by_reset() {
        let mut grid = VoxelGrid::default();
        assert!(grid.voxels().is_empty());
        grid.reset();
        assert_eq!(grid.voxels().len(), CHUNK_SIZE_3D);
    }
}
