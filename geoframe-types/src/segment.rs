use crate::cartesian::{CartesianPoint2d, CartesianPoint2dFloat};
use num_traits::Float;

/// A straight line segment between two points.
#[derive(Debug, PartialEq)]
pub struct Segment<'a, Point>(pub &'a Point, pub &'a Point);

impl<P: CartesianPoint2d> Segment<'_, P>
where
    P::Num: Float,
{
    /// Euclidean length of the segment.
    pub fn length(&self) -> P::Num {
        self.0.distance(self.1)
    }

    /// Twice the signed area of the triangle formed by the segment and the origin.
    pub(crate) fn cross(&self) -> P::Num {
        self.0.x() * self.1.y() - self.1.x() * self.0.y()
    }
}
