//! Minimal geometry types for the meshing crates: integer grid corners and
//! float world-space positions.
#![forbid(unsafe_code)]

use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Integer lattice point in chunk-local grid coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct IVec3 {
    #[cfg_attr(test, proptest(strategy = "-4096i32..4096"))]
    pub x: i32,
    #[cfg_attr(test, proptest(strategy = "-4096i32..4096"))]
    pub y: i32,
    #[cfg_attr(test, proptest(strategy = "-4096i32..4096"))]
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: IVec3 = IVec3 { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Converts grid units to world units by scaling every axis by `scale`.
    #[inline]
    pub fn to_world(self, scale: f32) -> Vec3 {
        Vec3::new(
            self.x as f32 * scale,
            self.y as f32 * scale,
            self.z as f32 * scale,
        )
    }
}

impl Add for IVec3 {
    type Output = IVec3;
    #[inline]
    fn add(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for IVec3 {
    #[inline]
    fn add_assign(&mut self, rhs: IVec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for IVec3 {
    type Output = IVec3;
    #[inline]
    fn sub(self, rhs: IVec3) -> IVec3 {
        IVec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for IVec3 {
    type Output = IVec3;
    #[inline]
    fn neg(self) -> IVec3 {
        IVec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<(i32, i32, i32)> for IVec3 {
    #[inline]
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        IVec3::new(x, y, z)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, rhs: Vec3) -> f32 {
        self.x * rhs.x + self.y * rhs.y + self.z * rhs.z
    }

    #[inline]
    pub fn cross(self, rhs: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: f32) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn ivec3_add_then_sub_is_identity(a in any::<IVec3>(), b in any::<IVec3>()) {
            prop_assert_eq!((a + b) - b, a);
        }

        #[test]
        fn ivec3_neg_is_additive_inverse(a in any::<IVec3>()) {
            prop_assert_eq!(a + (-a), IVec3::ZERO);
        }

        // Small lattice values stay exact in f32 after scaling.
        #[test]
        fn to_world_is_componentwise_scale(a in any::<IVec3>(), s in 1u16..=256) {
            let s = s as f32;
            let w = a.to_world(s);
            prop_assert_eq!(w, Vec3::new(a.x as f32 * s, a.y as f32 * s, a.z as f32 * s));
        }
    }
}
