use sillycraft_chunk::{CHUNK_SIZE, CHUNK_SIZE_2D, delinearize};
use sillycraft_geom::IVec3;

/// Grid axis, named in chunk-local coordinates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Flat-index distance between neighbors along this axis.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            Axis::Y => 1,
            Axis::Z => CHUNK_SIZE,
            Axis::X => CHUNK_SIZE_2D,
        }
    }

    #[inline]
    pub const fn of(self, (x, y, z): (usize, usize, usize)) -> usize {
        match self {
            Axis::X => x,
            Axis::Y => y,
            Axis::Z => z,
        }
    }
}

/// Which corner pair a one-axis join copies from the face it absorbs.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum JoinKind {
    /// Copies v1 and v4.
    Leading,
    /// Copies v2 and v3.
    Trailing,
}

impl JoinKind {
    #[inline]
    pub const fn copied_corners(self) -> [usize; 2] {
        match self {
            JoinKind::Leading => [0, 3],
            JoinKind::Trailing => [1, 2],
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Front = 0,
    Back = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

// Unit-quad corners v1..v4 relative to the cell origin. The order fixes the
// winding: cross(v2 - v1, v3 - v1) points against the outward direction.
const UNIT_CORNERS: [[IVec3; 4]; 6] = [
    // Front (-X)
    [
        IVec3::new(0, 0, 0),
        IVec3::new(0, 1, 0),
        IVec3::new(0, 1, 1),
        IVec3::new(0, 0, 1),
    ],
    // Back (+X)
    [
        IVec3::new(1, 1, 0),
        IVec3::new(1, 0, 0),
        IVec3::new(1, 0, 1),
        IVec3::new(1, 1, 1),
    ],
    // Left (-Y)
    [
        IVec3::new(1, 0, 0),
        IVec3::new(0, 0, 0),
        IVec3::new(0, 0, 1),
        IVec3::new(1, 0, 1),
    ],
    // Right (+Y)
    [
        IVec3::new(0, 1, 0),
        IVec3::new(1, 1, 0),
        IVec3::new(1, 1, 1),
        IVec3::new(0, 1, 1),
    ],
    // Top (+Z)
    [
        IVec3::new(0, 0, 1),
        IVec3::new(0, 1, 1),
        IVec3::new(1, 1, 1),
        IVec3::new(1, 0, 1),
    ],
    // Bottom (-Z)
    [
        IVec3::new(0, 1, 0),
        IVec3::new(0, 0, 0),
        IVec3::new(1, 0, 0),
        IVec3::new(1, 1, 0),
    ],
];

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
        Face::Top,
        Face::Bottom,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Axis the face points along and whether it points toward +axis.
    #[inline]
    pub fn outward(self) -> (Axis, bool) {
        match self {
            Face::Front => (Axis::X, false),
            Face::Back => (Axis::X, true),
            Face::Left => (Axis::Y, false),
            Face::Right => (Axis::Y, true),
            Face::Top => (Axis::Z, true),
            Face::Bottom => (Axis::Z, false),
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        let (axis, positive) = self.outward();
        let s = if positive { 1 } else { -1 };
        match axis {
            Axis::X => IVec3::new(s, 0, 0),
            Axis::Y => IVec3::new(0, s, 0),
            Axis::Z => IVec3::new(0, 0, s),
        }
    }

    /// Axis of the first-pass join; the predecessor sits one step back along it.
    #[inline]
    pub fn sweep_axis(self) -> Axis {
        match self {
            Face::Left | Face::Right => Axis::X,
            Face::Front | Face::Back | Face::Top | Face::Bottom => Axis::Y,
        }
    }

    /// Axis of the greedy pass; the merge target sits one step forward along it.
    #[inline]
    pub fn greedy_axis(self) -> Axis {
        match self {
            Face::Front | Face::Back | Face::Left | Face::Right => Axis::Z,
            Face::Top | Face::Bottom => Axis::X,
        }
    }

    #[inline]
    pub fn join_kind(self) -> JoinKind {
        match self {
            Face::Front | Face::Right | Face::Top => JoinKind::Leading,
            Face::Back | Face::Left | Face::Bottom => JoinKind::Trailing,
        }
    }

    #[inline]
    pub fn unit_corners(self) -> [IVec3; 4] {
        UNIT_CORNERS[self.index()]
    }

    /// Flat index of the cell this face looks into, or `None` at the chunk border.
    #[inline]
    pub fn outward_neighbor(self, i: usize) -> Option<usize> {
        let (axis, positive) = self.outward();
        let c = axis.of(delinearize(i));
        if positive {
            (c + 1 < CHUNK_SIZE).then(|| i + axis.stride())
        } else {
            (c > 0).then(|| i - axis.stride())
        }
    }

    #[inline]
    pub fn sweep_predecessor(self, i: usize) -> Option<usize> {
        let axis = self.sweep_axis();
        (axis.of(delinearize(i)) > 0).then(|| i - axis.stride())
    }

    #[inline]
    pub fn greedy_successor(self, i: usize) -> Option<usize> {
        let axis = self.greedy_axis();
        (axis.of(delinearize(i)) + 1 < CHUNK_SIZE).then(|| i + axis.stride())
    }
}
