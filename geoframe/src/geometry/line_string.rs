use crate::error::{GeoframeError, Result};
use crate::geometry::Point;
use crate::registry::ReferenceSystem;
use geoframe_types::clip::{clip_line, clip_ring};
use geoframe_types::{CartesianPoint2d, Contour, Point2d, Rect};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Ordered sequence of positions in one reference system.
///
/// A line string is a *ring* when its last point repeats the first one. Only rings have an area and a perimeter. A
/// *filled* ring describes the region it encloses rather than just its border.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point2d>,
    is_ring: bool,
    is_filled: bool,
    system: Arc<ReferenceSystem>,
}

impl LineString {
    /// Creates a line string from at least two points.
    ///
    /// The result is a ring if there are at least four points and the last one equals the first one.
    pub fn new(points: Vec<Point2d>, system: Arc<ReferenceSystem>) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeoframeError::Usage(format!(
                "line needs at least 2 points, got {}",
                points.len()
            )));
        }

        let is_ring = points.len() >= 4 && points[0].equal(&points[points.len() - 1]);
        Ok(Self {
            points,
            is_ring,
            is_filled: false,
            system,
        })
    }

    /// Creates a ring, adding the closing point if it is missing. At least three distinct points are required.
    pub fn ring(mut points: Vec<Point2d>, system: Arc<ReferenceSystem>) -> Result<Self> {
        if let (Some(first), Some(last)) = (points.first().copied(), points.last()) {
            if !first.equal(last) {
                points.push(first);
            }
        }

        if points.len() < 4 {
            return Err(GeoframeError::Usage(format!(
                "ring needs at least 3 distinct points, got {}",
                points.len().saturating_sub(1)
            )));
        }

        Ok(Self {
            points,
            is_ring: true,
            is_filled: false,
            system,
        })
    }

    /// Same as [`LineString::ring`], but the ring represents the area it encloses.
    pub fn filled(points: Vec<Point2d>, system: Arc<ReferenceSystem>) -> Result<Self> {
        let mut ring = Self::ring(points, system)?;
        ring.is_filled = true;
        Ok(ring)
    }

    /// Creates a line string from points that all share one reference system.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let Some(first) = points.first() else {
            return Err(GeoframeError::Usage("line needs at least 2 points, got 0".into()));
        };

        if let Some(other) = points
            .iter()
            .find(|p| p.nickname() != first.nickname())
        {
            return Err(GeoframeError::ProjectionMismatch {
                expected: first.nickname().to_string(),
                found: other.nickname().to_string(),
            });
        }

        Self::new(
            points.iter().map(Point::position).collect(),
            first.system().clone(),
        )
    }

    /// Raw coordinates. For a ring the last point repeats the first one.
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// Point at the given index.
    pub fn point(&self, index: usize) -> Option<Point> {
        self.points
            .get(index)
            .map(|p| Point::xy(p.x, p.y, self.system.clone()))
    }

    /// Number of points, including the closing point of a ring.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`: a line string has at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last point repeats the first one.
    pub fn is_ring(&self) -> bool {
        self.is_ring
    }

    /// Whether the ring represents an area.
    pub fn is_filled(&self) -> bool {
        self.is_filled
    }

    /// Reference system.
    pub fn system(&self) -> &Arc<ReferenceSystem> {
        &self.system
    }

    /// Nickname of the reference system.
    pub fn nickname(&self) -> &str {
        self.system.nickname()
    }

    /// First point.
    pub fn begin_point(&self) -> Point {
        let p = self.points[0];
        Point::xy(p.x, p.y, self.system.clone())
    }

    /// Last point.
    pub fn end_point(&self) -> Point {
        let p = self.points[self.points.len() - 1];
        Point::xy(p.x, p.y, self.system.clone())
    }

    /// Smallest box containing every point.
    pub fn bounding_box(&self) -> Rect {
        Contour::open(self.points.clone())
            .bounding_rect()
            .unwrap_or_else(|| Rect::from_point(&self.points[0]))
    }

    /// Sum of the segment lengths, in units of the reference system.
    pub fn length(&self) -> f64 {
        Contour::open(self.points.clone()).length()
    }

    /// Enclosed area. Fails if the line string is not a ring.
    pub fn area(&self) -> Result<f64> {
        Ok(self.contour("area")?.area_signed().abs())
    }

    /// Length of the border. Fails if the line string is not a ring.
    pub fn perimeter(&self) -> Result<f64> {
        Ok(self.contour("perimeter")?.length())
    }

    /// Center of mass of the enclosed area. Fails if the line string is not a ring.
    pub fn centroid(&self) -> Result<Point> {
        let contour = self.contour("centroid")?;
        let center = contour
            .centroid()
            .ok_or_else(|| GeoframeError::Usage("centroid of an empty ring".into()))?;
        Ok(Point::xy(center.x, center.y, self.system.clone()))
    }

    /// Parts of the line string inside the box. A ring produces rings, an open line produces lines.
    pub fn clip(&self, bbox: &Rect) -> Vec<LineString> {
        if self.is_ring {
            clip_ring(&Contour::from_ring(self.points.clone()), bbox)
                .into_iter()
                .map(|ring| self.with_points(ring.iter_points_closing().copied().collect()))
                .collect()
        } else {
            clip_line(&Contour::open(self.points.clone()), bbox)
                .into_iter()
                .map(|line| {
                    let mut piece = self.with_points(line.into_points());
                    piece.is_ring = false;
                    piece
                })
                .collect()
        }
    }

    pub(crate) fn with_points(&self, points: Vec<Point2d>) -> Self {
        Self {
            points,
            is_ring: self.is_ring,
            is_filled: self.is_filled,
            system: self.system.clone(),
        }
    }

    pub(crate) fn with_system(mut self, system: Arc<ReferenceSystem>) -> Self {
        self.system = system;
        self
    }

    pub(crate) fn ring_contour(&self) -> Contour<Point2d> {
        Contour::from_ring(self.points.clone())
    }

    fn contour(&self, operation: &str) -> Result<Contour<Point2d>> {
        if !self.is_ring {
            return Err(GeoframeError::Usage(format!("{operation} requires a ring")));
        }

        Ok(self.ring_contour())
    }

    pub(crate) fn kind(&self) -> &'static str {
        if self.is_filled {
            "filled"
        } else if self.is_ring {
            "ring"
        } else {
            "line"
        }
    }

    pub(crate) fn fmt_coordinates(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let geographic = self.system.is_geographic();
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if geographic {
                write!(f, "{} {}", p.y, p.x)?;
            } else {
                write!(f, "{} {}", p.x, p.y)?;
            }
        }

        Ok(())
    }
}

impl Display for LineString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}](", self.kind(), self.nickname())?;
        self.fmt_coordinates(f)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    fn planar() -> Arc<ReferenceSystem> {
        crate::geometry::tests::planar_system()
    }

    fn square() -> Vec<Point2d> {
        vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(2.0, 0.0),
            Point2d::new(2.0, 2.0),
            Point2d::new(0.0, 2.0),
        ]
    }

    #[test]
    fn ring_detection() {
        let mut closed = square();
        closed.push(Point2d::new(0.0, 0.0));
        assert!(LineString::new(closed, planar()).expect("valid").is_ring());
        assert!(!LineString::new(square(), planar()).expect("valid").is_ring());

        // Two points that coincide are not a ring.
        let line = LineString::new(vec![Point2d::new(1.0, 1.0), Point2d::new(1.0, 1.0)], planar())
            .expect("valid");
        assert!(!line.is_ring());

        assert_matches!(
            LineString::new(vec![Point2d::new(0.0, 0.0)], planar()),
            Err(GeoframeError::Usage(_))
        );
    }

    #[test]
    fn ring_is_closed() {
        let ring = LineString::ring(square(), planar()).expect("valid");
        assert_eq!(ring.len(), 5);
        assert_eq!(ring.begin_point(), ring.end_point());
        assert_matches!(
            LineString::ring(vec![Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0)], planar()),
            Err(GeoframeError::Usage(_))
        );

        let filled = LineString::filled(square(), planar()).expect("valid");
        assert!(filled.is_ring());
        assert!(filled.is_filled());
    }

    #[test]
    fn measures() {
        let ring = LineString::ring(square(), planar()).expect("valid");
        assert_abs_diff_eq!(ring.area().expect("ring"), 4.0);
        assert_abs_diff_eq!(ring.perimeter().expect("ring"), 8.0);
        assert_abs_diff_eq!(ring.length(), 8.0);
        let centroid = ring.centroid().expect("ring");
        assert_abs_diff_eq!(centroid.x(), 1.0);
        assert_abs_diff_eq!(centroid.y(), 1.0);
        assert_eq!(ring.bounding_box(), Rect::new(0.0, 0.0, 2.0, 2.0));

        let diagonal = LineString::new(
            vec![Point2d::new(3.0, -1.0), Point2d::new(-2.0, 4.0)],
            planar(),
        )
        .expect("valid");
        assert_eq!(diagonal.bounding_box(), Rect::new(-2.0, -1.0, 3.0, 4.0));

        let line = LineString::new(square(), planar()).expect("valid");
        assert_abs_diff_eq!(line.length(), 6.0);
        assert_matches!(
            line.area(),
            Err(GeoframeError::Usage(message)) if message == "area requires a ring"
        );
        assert_matches!(line.perimeter(), Err(GeoframeError::Usage(_)));
    }

    #[test]
    fn from_points_checks_system() {
        let wgs84 = Arc::new(ReferenceSystem::wgs84());
        let points = [
            Point::xy(0.0, 0.0, wgs84.clone()),
            Point::xy(1.0, 1.0, planar()),
        ];
        assert_matches!(
            LineString::from_points(&points),
            Err(GeoframeError::ProjectionMismatch { .. })
        );

        let line = LineString::from_points(&[
            Point::xy(0.0, 0.0, wgs84.clone()),
            Point::xy(1.0, 1.0, wgs84),
        ])
        .expect("valid");
        assert_eq!(line.nickname(), "wgs84");
        assert_eq!(line.point(1).map(|p| p.x()), Some(1.0));
    }

    #[test]
    fn clip_line_and_ring() {
        let bbox = Rect::new(1.0, -1.0, 3.0, 3.0);

        let ring = LineString::ring(square(), planar()).expect("valid");
        let clipped = ring.clip(&bbox);
        assert_eq!(clipped.len(), 1);
        assert!(clipped[0].is_ring());
        assert_abs_diff_eq!(clipped[0].area().expect("ring"), 2.0, epsilon = 1e-9);

        let line = LineString::new(
            vec![Point2d::new(0.0, 1.0), Point2d::new(4.0, 1.0)],
            planar(),
        )
        .expect("valid");
        let clipped = line.clip(&bbox);
        assert_eq!(clipped.len(), 1);
        assert!(!clipped[0].is_ring());
        assert_abs_diff_eq!(clipped[0].length(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn display() {
        let ring = LineString::ring(square(), planar()).expect("valid");
        assert_eq!(ring.to_string(), "ring[local](0 0, 2 0, 2 2, 0 2, 0 0)");

        let wgs84 = Arc::new(ReferenceSystem::wgs84());
        let line = LineString::new(vec![Point2d::new(5.0, 52.0), Point2d::new(6.0, 53.0)], wgs84)
            .expect("valid");
        assert_eq!(line.to_string(), "line[wgs84](52 5, 53 6)");
    }
}
