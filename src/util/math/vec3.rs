use std::ops::Sub;

use serde::{Deserialize, Serialize};

/// 3 element vector
///
/// Serialized as a `[x, y, z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3(pub f64, pub f64, pub f64);

impl Vec3 {
    /// Create from constant values
    pub const fn of(x: f64, y: f64, z: f64) -> Self {
        Self(x, y, z)
    }

    /// Vector of all zeroes
    pub const fn zero() -> Self {
        Self(0., 0., 0.)
    }

    #[inline(always)]
    pub const fn x(&self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub const fn y(&self) -> f64 {
        self.1
    }

    #[inline(always)]
    pub const fn z(&self) -> f64 {
        self.2
    }

    /// Magnitude squared
    pub fn mag_sq(&self) -> f64 {
        (self.0 * self.0) + (self.1 * self.1) + (self.2 * self.2)
    }

    /// Vector magnitude
    pub fn mag(&self) -> f64 {
        self.mag_sq().sqrt()
    }

    /// Scale vector
    pub fn scale(&self, rhs: f64) -> Self {
        Self(self.0 * rhs, self.1 * rhs, self.2 * rhs)
    }

    /// Are all components finite?
    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite() && self.2.is_finite()
    }
}

/// Vector subtraction
impl Sub<&Vec3> for &Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: &Vec3) -> Self::Output {
        Vec3(self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2)
    }
}
