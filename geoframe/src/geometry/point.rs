use crate::dms::{self, degrees_to_dm, lat_dms, long_dms};
use crate::error::Result;
use crate::geometry::bbox_contains;
use crate::registry::{ProjectionRegistry, ReferenceSystem};
use crate::reproject::geographic_position;
use geoframe_types::geo::GeoPoint;
use geoframe_types::{CartesianPoint2d, Point2d, Rect};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Single position in a reference system.
///
/// The point stores one pair of coordinates. `x`/`y` and `long`/`lat` are two views of that pair: `long` is `x` and
/// `lat` is `y`. Which view makes sense depends on whether the system is geographic.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    system: Arc<ReferenceSystem>,
}

impl Point {
    /// Creates a point from planar coordinates.
    pub fn xy(x: f64, y: f64, system: Arc<ReferenceSystem>) -> Self {
        Self { x, y, system }
    }

    /// Creates a point from latitude and longitude.
    pub fn latlong(lat: f64, long: f64, system: Arc<ReferenceSystem>) -> Self {
        Self::xy(long, lat, system)
    }

    /// Creates a point in the system with the given nickname, or in the default system of the registry.
    pub fn new(registry: &ProjectionRegistry, x: f64, y: f64, nickname: Option<&str>) -> Result<Self> {
        let system = match nickname {
            Some(nickname) => registry.require(nickname)?,
            None => registry.require_default()?,
        };

        Ok(Self::xy(x, y, system))
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Latitude, same as [`Point::y`].
    pub fn lat(&self) -> f64 {
        self.y
    }

    /// Longitude, same as [`Point::x`].
    pub fn long(&self) -> f64 {
        self.x
    }

    /// Coordinates as a plain pair.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }

    /// Reference system of the point.
    pub fn system(&self) -> &Arc<ReferenceSystem> {
        &self.system
    }

    /// Nickname of the reference system.
    pub fn nickname(&self) -> &str {
        self.system.nickname()
    }

    /// Degenerate box `(x, y, x, y)`.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_point(self)
    }

    /// Always zero.
    pub fn area(&self) -> f64 {
        0.0
    }

    /// Always zero.
    pub fn perimeter(&self) -> f64 {
        0.0
    }

    /// Whether the point lies inside the box or on its border. The box must be in the point's system.
    pub fn in_bbox(&self, bbox: &Rect) -> bool {
        bbox_contains(bbox, self)
    }

    /// Brings a geographic point into latitude `[-90, 90]` and longitude `(-180, 180]`. Latitude going over a pole
    /// comes back on the other side of the globe. Planar points are returned unchanged.
    pub fn normalize(&self) -> Self {
        if !self.system.is_geographic() {
            return self.clone();
        }

        let mut lat = dms::normalize(self.lat());
        let mut long = self.long();
        if lat > 90.0 {
            lat = 180.0 - lat;
            long += 180.0;
        } else if lat < -90.0 {
            lat = -180.0 - lat;
            long += 180.0;
        }

        Self::latlong(lat, dms::normalize(long), self.system.clone())
    }

    /// Shifts a positive longitude by -360 degrees, **in place**.
    ///
    /// This is the only operation that modifies a geometry. It is used on the corners of boxes crossing the
    /// antimeridian, so that the corners stay numerically contiguous: `170` becomes `-190`, which lies west of `-170`.
    /// The reference system of the point is kept.
    pub fn move_west(&mut self) {
        if self.x > 0.0 {
            self.x -= 360.0;
        }
    }

    /// Position as `52d19'16.680"N, 5d31'48"E`. Planar points are converted to geographic coordinates first.
    pub fn dms(&self, registry: &ProjectionRegistry) -> Result<String> {
        let position = geographic_position(registry, self)?;
        Ok(format!("{}, {}", lat_dms(position.lat()), long_dms(position.lon())))
    }

    /// Same as [`Point::dms`] with minutes precision.
    pub fn dm(&self, registry: &ProjectionRegistry) -> Result<String> {
        let position = geographic_position(registry, self)?;
        Ok(format!(
            "{}, {}",
            degrees_to_dm(position.lat(), "N", "S"),
            degrees_to_dm(position.lon(), "E", "W")
        ))
    }

    pub(crate) fn fmt_coordinates(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.system.is_geographic() {
            write!(f, "{} {}", self.lat(), self.long())
        } else {
            write!(f, "{} {}", self.x, self.y)
        }
    }
}

impl CartesianPoint2d for Point {
    type Num = f64;

    fn x(&self) -> f64 {
        self.x
    }

    fn y(&self) -> f64 {
        self.y
    }
}

/// Only meaningful for points in a geographic system.
impl GeoPoint for Point {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.y
    }

    fn lon(&self) -> f64 {
        self.x
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "point[{}](", self.nickname())?;
        self.fmt_coordinates(f)?;
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectionOptions;
    use crate::error::GeoframeError;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geoframe_types::geo::GeodesyEngine;

    fn registry() -> ProjectionRegistry {
        let registry = ProjectionRegistry::with_wgs84(Arc::new(GeodesyEngine::new()));
        registry
            .register(ProjectionOptions::new("utm31", "utm zone=31 ellps=WGS84"))
            .expect("valid");
        registry
    }

    #[test]
    fn views_share_storage() {
        let registry = registry();
        let point = Point::new(&registry, 5.53, 52.3213, None).expect("default exists");
        assert_eq!(point.nickname(), "wgs84");
        assert_eq!(point.lat(), point.y());
        assert_eq!(point.long(), point.x());
        assert_eq!(point.lat(), 52.3213);
        assert_eq!(point.bounding_box(), Rect::new(5.53, 52.3213, 5.53, 52.3213));
        assert_eq!(point.area(), 0.0);
        assert_eq!(point.perimeter(), 0.0);

        assert_matches!(
            Point::new(&registry, 0.0, 0.0, Some("nowhere")),
            Err(GeoframeError::UnknownProjection { .. })
        );
    }

    #[test]
    fn display() {
        let registry = registry();
        let wgs84 = registry.require("wgs84").expect("registered");
        let utm = registry.require("utm31").expect("registered");
        assert_eq!(
            Point::latlong(52.3213, 5.53, wgs84).to_string(),
            "point[wgs84](52.3213 5.53)"
        );
        assert_eq!(
            Point::xy(12311.5, 34242.25, utm).to_string(),
            "point[utm31](12311.5 34242.25)"
        );
    }

    #[test]
    fn normalize() {
        let wgs84 = Arc::new(ReferenceSystem::wgs84());
        let point = Point::latlong(95.0, 190.0, wgs84.clone()).normalize();
        assert_abs_diff_eq!(point.lat(), 85.0);
        assert_abs_diff_eq!(point.long(), 10.0);

        let point = Point::latlong(-30.0, -200.0, wgs84).normalize();
        assert_abs_diff_eq!(point.lat(), -30.0);
        assert_abs_diff_eq!(point.long(), 160.0);
    }

    #[test]
    fn move_west_only_shifts_positive_longitudes() {
        let wgs84 = Arc::new(ReferenceSystem::wgs84());
        let mut east = Point::latlong(10.0, 170.0, wgs84.clone());
        east.move_west();
        assert_eq!(east.long(), -190.0);
        assert_eq!(east.nickname(), "wgs84");

        let mut west = Point::latlong(10.0, -170.0, wgs84);
        west.move_west();
        assert_eq!(west.long(), -170.0);
    }

    #[test]
    fn dms_text() {
        let registry = registry();
        let wgs84 = registry.require("wgs84").expect("registered");
        let point = Point::latlong(52.3213, 5.53, wgs84);
        assert_eq!(point.dms(&registry).expect("geographic"), "52d19'16.680\"N, 5d31'48\"E");
        assert_eq!(point.dm(&registry).expect("geographic"), "52d19'N, 5d31'E");
    }

    #[test]
    fn in_bbox() {
        let point = Point::latlong(1.0, 2.0, Arc::new(ReferenceSystem::wgs84()));
        assert!(point.in_bbox(&Rect::new(0.0, 0.0, 2.0, 2.0)));
        assert!(!point.in_bbox(&Rect::new(0.0, 0.0, 1.0, 1.0)));
    }
}
