use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Pixel-space point
///
/// Serialized as a `[x, y]` array.
#[derive(Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D(f64, f64);

impl Debug for Point2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Point2D")
            .field(&self.0)
            .field(&self.1)
            .finish()
    }
}

impl Point2D {
    #[inline(always)]
    pub const fn zero() -> Self {
        Self(0., 0.)
    }

    #[inline]
    pub const fn of(x: f64, y: f64) -> Self {
        Self(x, y)
    }

    #[inline(always)]
    pub const fn x(&self) -> f64 {
        self.0
    }

    #[inline(always)]
    pub const fn y(&self) -> f64 {
        self.1
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self(x, y)
    }
}
