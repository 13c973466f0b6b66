//! Contour is a sequence of points, the shape the planar kernel works on.
//!
//! Contours can be:
//! * **open** - the first and the last points of the contour are not connected, like a road.
//! * **closed** - the first and the last points are connected, like a shoreline. Such a contour is a *ring*.
//!
//! Unlike a textual ring, a closed `Contour` does not repeat its first point at the end. Use [`Contour::from_ring`]
//! to build one from a sequence that does, and [`Contour::iter_points_closing`] to get the closing point back.

use crate::cartesian::{CartesianPoint2d, Rect};
use crate::segment::Segment;
use nalgebra::Point2;
use num_traits::{Float, FromPrimitive};
use serde::{Deserialize, Serialize};

/// Sequence of points. See module level documentation for details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contour<P> {
    points: Vec<P>,
    is_closed: bool,
}

impl<P> Contour<P> {
    /// Creates a new contour.
    pub fn new(points: Vec<P>, is_closed: bool) -> Self {
        Self { points, is_closed }
    }

    /// Open contour.
    pub fn open(points: Vec<P>) -> Self {
        Self::new(points, false)
    }

    /// Closed contour. `points` must not repeat the first point at the end.
    pub fn closed(points: Vec<P>) -> Self {
        Self::new(points, true)
    }

    /// Whether the contour is closed.
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Points of the contour, without the closing point.
    pub fn points(&self) -> &[P] {
        &self.points
    }

    /// Takes the points out of the contour.
    pub fn into_points(self) -> Vec<P> {
        self.points
    }

    /// Same as [`Contour::points`] but for closed contours repeats the first point again at the end.
    pub fn iter_points_closing(&self) -> impl Iterator<Item = &P> {
        let closing = if self.is_closed {
            self.points.first()
        } else {
            None
        };
        self.points.iter().chain(closing)
    }

    /// Iterates over segments of the contour. For closed contours this includes the segment between the last and the
    /// first points.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_, P>> {
        let mut prev: Option<&P> = None;
        self.iter_points_closing().filter_map(move |p| {
            let segment = prev.map(|prev| Segment(prev, p));
            prev = Some(p);
            segment
        })
    }
}

impl<P: CartesianPoint2d> Contour<P> {
    /// Closed contour from a ring, where the last point may repeat the first one.
    pub fn from_ring(mut points: Vec<P>) -> Self {
        if points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if first.equal(last) {
                    points.pop();
                }
            }
        }

        Self::closed(points)
    }

    /// Bounding rectangle of the contour points. `None` for an empty contour.
    pub fn bounding_rect(&self) -> Option<Rect<P::Num>> {
        Rect::from_points(self.points.iter())
    }
}

impl<N, P> Contour<P>
where
    N: Float + FromPrimitive + nalgebra::Scalar,
    P: CartesianPoint2d<Num = N>,
{
    /// Total length of all segments. For a closed contour this is its perimeter.
    pub fn length(&self) -> N {
        self.iter_segments()
            .fold(N::zero(), |acc, segment| acc + segment.length())
    }

    /// Signed area enclosed by the contour (shoelace formula). Positive for counterclockwise contours.
    ///
    /// An open contour is treated as if it were closed.
    pub fn area_signed(&self) -> N {
        let doubled = self
            .ring_segments()
            .fold(N::zero(), |acc, segment| acc + segment.cross());

        doubled / (N::one() + N::one())
    }

    /// Area centroid of the contour. Falls back to the mean of the points for degenerate (zero area) contours.
    pub fn centroid(&self) -> Option<Point2<N>> {
        if self.points.is_empty() {
            return None;
        }

        let area = self.area_signed();
        if area == N::zero() {
            let count = N::from_usize(self.points.len())?;
            let (sx, sy) = self
                .points
                .iter()
                .fold((N::zero(), N::zero()), |(sx, sy), p| (sx + p.x(), sy + p.y()));
            return Some(Point2::new(sx / count, sy / count));
        }

        let (cx, cy) = self
            .ring_segments()
            .fold((N::zero(), N::zero()), |(cx, cy), segment| {
                let cross = segment.cross();
                let Segment(a, b) = segment;
                (cx + (a.x() + b.x()) * cross, cy + (a.y() + b.y()) * cross)
            });
        let six_area = N::from_f64(6.0)? * area;

        Some(Point2::new(cx / six_area, cy / six_area))
    }

    // Segments including the closing one, whether or not the contour is closed.
    fn ring_segments(&self) -> impl Iterator<Item = Segment<'_, P>> {
        self.points
            .iter()
            .zip(self.points.iter().cycle().skip(1))
            .map(|(a, b)| Segment(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartesian::Point2d;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Contour<Point2d> {
        Contour::closed(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 1.0),
        ])
    }

    #[test]
    fn iter_points_closing() {
        let contour = Contour::open(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]);
        assert_eq!(contour.iter_points_closing().count(), 2);
        assert_eq!(
            *contour.iter_points_closing().last().expect("not empty"),
            Point2d::new(1.0, 1.0)
        );

        let contour = Contour::closed(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]);
        assert_eq!(contour.iter_points_closing().count(), 3);
        assert_eq!(
            *contour.iter_points_closing().last().expect("not empty"),
            Point2d::new(0.0, 0.0)
        );
    }

    #[test]
    fn iter_segments() {
        let contour = Contour::open(vec![Point2d::new(0.0, 0.0)]);
        assert_eq!(contour.iter_segments().count(), 0);

        let contour = Contour::open(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]);
        assert_eq!(contour.iter_segments().count(), 1);

        let contour = Contour::closed(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 1.0)]);
        assert_eq!(contour.iter_segments().count(), 2);
        assert_eq!(
            contour.iter_segments().last().expect("not empty"),
            Segment(&Point2d::new(1.0, 1.0), &Point2d::new(0.0, 0.0))
        );
    }

    #[test]
    fn from_ring_drops_closing_point() {
        let contour = Contour::from_ring(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(1.0, 1.0),
            Point2d::new(0.0, 0.0),
        ]);
        assert!(contour.is_closed());
        assert_eq!(contour.points().len(), 3);
    }

    #[test]
    fn area() {
        let contour = Contour::closed(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 1.0),
            Point2d::new(1.0, 0.0),
        ]);
        assert_eq!(contour.area_signed(), -0.5);

        let contour = Contour::closed(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(1.0, 0.0),
            Point2d::new(0.0, 1.0),
        ]);
        assert_eq!(contour.area_signed(), 0.5);
    }

    #[test]
    fn perimeter_and_length() {
        assert_abs_diff_eq!(unit_square().length(), 4.0);

        let open = Contour::open(unit_square().into_points());
        assert_abs_diff_eq!(open.length(), 3.0);
    }

    #[test]
    fn centroid() {
        let centroid = unit_square().centroid().expect("not empty");
        assert_abs_diff_eq!(centroid, Point2d::new(0.5, 0.5), epsilon = 1e-12);

        let line = Contour::open(vec![Point2d::new(0.0, 0.0), Point2d::new(2.0, 0.0)]);
        assert_abs_diff_eq!(
            line.centroid().expect("not empty"),
            Point2d::new(1.0, 0.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn bounding_rect() {
        assert_eq!(
            unit_square().bounding_rect(),
            Some(Rect::new(0.0, 0.0, 1.0, 1.0))
        );
    }
}
