pub(crate) mod geom;
pub(crate) mod math;

pub use self::geom::{PixelRect, Point2D};
pub use self::math::Vec3;
