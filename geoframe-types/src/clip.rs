//! Clipping of rings and lines by a rectangle.
//!
//! The heavy lifting is done by the boolean operations of the [`geo`](::geo) crate. Contours are converted on the way in and
//! out, so the results follow the [`Contour`] conventions (no repeated closing point).

use crate::cartesian::{Point2d, Rect};
use crate::contour::Contour;
use ::geo::{BooleanOps, Coord, LineString, MultiLineString, Polygon};

/// Fragment of a polygon that survived clipping.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedPolygon {
    /// Outer ring of the fragment.
    pub outer: Contour<Point2d>,
    /// Holes of the fragment.
    pub inner: Vec<Contour<Point2d>>,
}

/// Clips a polygon given by its outer ring and holes. Returns zero or more fragments.
pub fn clip_polygon(
    outer: &Contour<Point2d>,
    inner: &[Contour<Point2d>],
    rect: &Rect,
) -> Vec<ClippedPolygon> {
    let polygon = Polygon::new(
        to_line_string(outer),
        inner.iter().map(to_line_string).collect(),
    );

    polygon
        .intersection(&rect_polygon(rect))
        .into_iter()
        .map(|fragment| {
            let (exterior, interiors) = fragment.into_inner();
            ClippedPolygon {
                outer: from_line_string(exterior, true),
                inner: interiors
                    .into_iter()
                    .map(|ring| from_line_string(ring, true))
                    .collect(),
            }
        })
        .collect()
}

/// Clips a closed ring. Returns zero or more rings.
pub fn clip_ring(ring: &Contour<Point2d>, rect: &Rect) -> Vec<Contour<Point2d>> {
    clip_polygon(ring, &[], rect)
        .into_iter()
        .map(|fragment| fragment.outer)
        .collect()
}

/// Clips an open line. Returns the pieces of the line that are inside the rectangle.
pub fn clip_line(line: &Contour<Point2d>, rect: &Rect) -> Vec<Contour<Point2d>> {
    let lines = MultiLineString::new(vec![to_line_string(line)]);

    rect_polygon(rect)
        .clip(&lines, false)
        .into_iter()
        .map(|piece| from_line_string(piece, false))
        .filter(|piece| piece.points().len() > 1)
        .collect()
}

fn rect_polygon(rect: &Rect) -> Polygon<f64> {
    ::geo::Rect::new(
        Coord {
            x: rect.x_min,
            y: rect.y_min,
        },
        Coord {
            x: rect.x_max,
            y: rect.y_max,
        },
    )
    .to_polygon()
}

fn to_line_string(contour: &Contour<Point2d>) -> LineString<f64> {
    contour
        .iter_points_closing()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect()
}

fn from_line_string(line: LineString<f64>, is_closed: bool) -> Contour<Point2d> {
    let points = line
        .into_iter()
        .map(|c| Point2d::new(c.x, c.y))
        .collect();
    if is_closed {
        Contour::from_ring(points)
    } else {
        Contour::open(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(min: f64, max: f64) -> Contour<Point2d> {
        Contour::closed(vec![
            Point2d::new(min, min),
            Point2d::new(max, min),
            Point2d::new(max, max),
            Point2d::new(min, max),
        ])
    }

    #[test]
    fn ring_inside_is_unchanged() {
        let clipped = clip_ring(&square(1.0, 2.0), &Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(clipped.len(), 1);
        assert_abs_diff_eq!(clipped[0].area_signed().abs(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn ring_partially_outside() {
        let clipped = clip_ring(&square(0.0, 4.0), &Rect::new(2.0, 2.0, 10.0, 10.0));
        assert_eq!(clipped.len(), 1);
        assert_abs_diff_eq!(clipped[0].area_signed().abs(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn ring_outside_disappears() {
        let clipped = clip_ring(&square(0.0, 1.0), &Rect::new(5.0, 5.0, 6.0, 6.0));
        assert!(clipped.is_empty());
    }

    #[test]
    fn polygon_keeps_holes() {
        let clipped = clip_polygon(
            &square(0.0, 10.0),
            &[square(4.0, 6.0)],
            &Rect::new(-1.0, -1.0, 11.0, 11.0),
        );
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].inner.len(), 1);
    }

    #[test]
    fn line_is_cut_at_border() {
        let line = Contour::open(vec![Point2d::new(-5.0, 1.0), Point2d::new(5.0, 1.0)]);
        let clipped = clip_line(&line, &Rect::new(0.0, 0.0, 2.0, 2.0));
        assert_eq!(clipped.len(), 1);
        assert_abs_diff_eq!(clipped[0].length(), 2.0, epsilon = 1e-9);
    }
}
