//! Types and functions on geometries in cartesian coordinates.

mod point;
mod rect;

pub use point::{CartesianPoint2d, CartesianPoint2dFloat, Point2d};
pub use rect::Rect;
