use serde::{Deserialize, Serialize};

use super::Point2D;

/// Axis-aligned pixel rectangle, `(x, y)` is the top-left corner
///
/// Serialized as `[x, y, w, h]`, the order blob detectors report rects in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanning two inclusive corner pixels
    pub fn from_corners(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            w: (max_x - min_x + 1).max(0) as u32,
            h: (max_y - min_y + 1).max(0) as u32,
        }
    }

    /// One past the rightmost column
    #[inline]
    pub fn right(&self) -> i64 {
        self.x as i64 + self.w as i64
    }

    /// One past the bottom row
    #[inline]
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.h as i64
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    /// Half-open containment: `x <= px < x + w` and `y <= py < y + h`
    pub fn contains(&self, point: Point2D) -> bool {
        let (px, py) = (point.x(), point.y());
        px >= self.x as f64
            && px < self.right() as f64
            && py >= self.y as f64
            && py < self.bottom() as f64
    }

    /// Do the two rectangles share at least one pixel?
    pub fn intersects(&self, other: &PixelRect) -> bool {
        (self.x as i64) < other.right()
            && (other.x as i64) < self.right()
            && (self.y as i64) < other.bottom()
            && (other.y as i64) < self.bottom()
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &PixelRect) -> PixelRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        PixelRect {
            x,
            y,
            w: (right - x as i64) as u32,
            h: (bottom - y as i64) as u32,
        }
    }
}

impl From<[i32; 4]> for PixelRect {
    fn from([x, y, w, h]: [i32; 4]) -> Self {
        Self::new(x, y, w.max(0) as u32, h.max(0) as u32)
    }
}

impl From<PixelRect> for [i32; 4] {
    fn from(value: PixelRect) -> Self {
        [value.x, value.y, value.w as i32, value.h as i32]
    }
}

#[cfg(test)]
mod test {
    use crate::util::{PixelRect, Point2D};

    #[test]
    fn contains_is_half_open() {
        let rect = PixelRect::new(10, 20, 5, 4);
        assert!(rect.contains(Point2D::of(10., 20.)));
        assert!(rect.contains(Point2D::of(14.9, 23.9)));
        assert!(!rect.contains(Point2D::of(15., 21.)));
        assert!(!rect.contains(Point2D::of(11., 24.)));
        assert!(!rect.contains(Point2D::of(9.99, 21.)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let rect = PixelRect::new(0, 0, 0, 0);
        assert!(!rect.contains(Point2D::zero()));
    }

    #[test]
    fn union_and_intersect() {
        let a = PixelRect::new(0, 0, 4, 4);
        let b = PixelRect::new(3, 3, 4, 4);
        let c = PixelRect::new(4, 0, 2, 2);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert_eq!(a.union(&b), PixelRect::new(0, 0, 7, 7));
    }

    #[test]
    fn from_corners_is_inclusive() {
        assert_eq!(PixelRect::from_corners(2, 3, 2, 3), PixelRect::new(2, 3, 1, 1));
        assert_eq!(PixelRect::from_corners(0, 0, 9, 4), PixelRect::new(0, 0, 10, 5));
    }
}
