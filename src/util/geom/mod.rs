mod point2d;
mod rect;

pub use point2d::Point2D;
pub use rect::PixelRect;
