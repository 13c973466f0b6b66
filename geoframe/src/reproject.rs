//! Reprojection of geometries between reference systems.
//!
//! Reprojection never modifies a geometry: it returns a new value of the same shape, tagged with the target system.
//! When the geometry is already in the target system a clone is returned without calling the engine.

use crate::error::{GeoframeError, Result};
use crate::geometry::{Collection, Geometry, LineString, Point, Surface};
use crate::registry::{DatumSource, ProjectionKey, ProjectionRegistry, ReferenceSystem, UTM_LABEL};
use crate::utm::best_utm_projection;
use geoframe_types::geo::{Datum, GeoPoint, NewGeoPoint};
use geoframe_types::{GeoframeTypesError, Point2d};
use log::debug;
use std::sync::Arc;

/// System to reproject into.
#[derive(Debug, Clone, Copy)]
pub enum ProjectionTarget<'a> {
    /// UTM zone best suited for the first point of the geometry, on the datum of the geometry's system.
    Utm,
    /// A registered system.
    Key(ProjectionKey<'a>),
}

impl<'a> From<&'a str> for ProjectionTarget<'a> {
    fn from(value: &'a str) -> Self {
        if value == UTM_LABEL {
            Self::Utm
        } else {
            Self::Key(ProjectionKey::Nickname(value))
        }
    }
}

impl<'a> From<&'a String> for ProjectionTarget<'a> {
    fn from(value: &'a String) -> Self {
        value.as_str().into()
    }
}

impl<'a> From<&'a Arc<ReferenceSystem>> for ProjectionTarget<'a> {
    fn from(value: &'a Arc<ReferenceSystem>) -> Self {
        Self::Key(ProjectionKey::System(value))
    }
}

impl<'a> From<ProjectionKey<'a>> for ProjectionTarget<'a> {
    fn from(value: ProjectionKey<'a>) -> Self {
        Self::Key(value)
    }
}

/// Latitude and longitude in degrees, without a reference system attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

impl GeoPoint for GeoPosition {
    type Num = f64;

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }
}

impl NewGeoPoint for GeoPosition {
    fn latlon(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Geographic coordinates of the point on the datum of its own system.
///
/// Points of geographic systems are returned as they are, planar points are unprojected by the engine.
pub fn geographic_position(registry: &ProjectionRegistry, point: &Point) -> Result<GeoPosition> {
    let system = point.system();
    if system.is_geographic() {
        return Ok(GeoPosition::latlon(point.lat(), point.long()));
    }

    let datum = system.datum().unwrap_or(Datum::WGS84.name());
    let target = registry.engine().geographic_definition(datum);
    let transformed = registry
        .engine()
        .transform(system.definition(), &target, &[point.position()])?;

    transformed
        .first()
        .map(|p| GeoPosition::lonlat(p.x, p.y))
        .ok_or_else(no_coordinates)
}

fn no_coordinates() -> GeoframeError {
    GeoframeTypesError::Projection("engine returned no coordinates".into()).into()
}

fn resolve_target(
    registry: &ProjectionRegistry,
    target: ProjectionTarget<'_>,
    geometry: &Geometry,
) -> Result<Arc<ReferenceSystem>> {
    match target {
        ProjectionTarget::Key(key) => registry.require(key),
        ProjectionTarget::Utm => {
            let first = geometry.first_point().ok_or_else(|| {
                GeoframeError::Usage("utm target requires a geometry with at least one point".into())
            })?;
            best_utm_projection(
                registry,
                &first,
                Some(DatumSource::System(geometry.system())),
            )
        }
    }
}

fn is_current(geometry: &Geometry, target: &ProjectionTarget<'_>) -> bool {
    match target {
        ProjectionTarget::Key(key) => key.nickname() == geometry.nickname(),
        ProjectionTarget::Utm => false,
    }
}

fn transform(
    registry: &ProjectionRegistry,
    source: &ReferenceSystem,
    target: &ReferenceSystem,
    points: &[Point2d],
) -> Result<Vec<Point2d>> {
    Ok(registry
        .engine()
        .transform(source.definition(), target.definition(), points)?)
}

impl Geometry {
    /// Returns the geometry in the target system.
    ///
    /// `target` is a nickname, a [`ReferenceSystem`], or the label `"utm"`, which picks the UTM zone of the first
    /// point of the geometry.
    ///
    /// For a collection the whole collection ends up in the system resolved for its first component; every other
    /// component is converted into that system.
    pub fn reproject<'a>(
        &self,
        registry: &ProjectionRegistry,
        target: impl Into<ProjectionTarget<'a>>,
    ) -> Result<Geometry> {
        let target = target.into();
        if is_current(self, &target) {
            return Ok(self.clone());
        }

        let system = resolve_target(registry, target, self)?;
        self.reproject_into(registry, &system)
    }

    pub(crate) fn reproject_into(
        &self,
        registry: &ProjectionRegistry,
        target: &Arc<ReferenceSystem>,
    ) -> Result<Geometry> {
        if self.nickname() == target.nickname() {
            return Ok(self.clone());
        }

        debug!("Reprojecting {} from '{}' to '{}'", self.kind(), self.nickname(), target.nickname());

        Ok(match self {
            Geometry::Point(point) => {
                let transformed = transform(registry, point.system(), target, &[point.position()])?;
                let p = transformed.first().ok_or_else(no_coordinates)?;
                Geometry::Point(Point::xy(p.x, p.y, target.clone()))
            }
            Geometry::LineString(line) => {
                Geometry::LineString(reproject_line(registry, line, target)?)
            }
            Geometry::Surface(surface) => {
                let outer = reproject_line(registry, surface.outer(), target)?;
                let inner = surface
                    .inner()
                    .iter()
                    .map(|ring| reproject_line(registry, ring, target))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::Surface(Surface::from_parts(outer, inner))
            }
            Geometry::Collection(collection) => {
                let components = collection
                    .components()
                    .iter()
                    .map(|component| component.reproject_into(registry, target))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::Collection(Collection::from_parts(target.clone(), components))
            }
        })
    }

    fn kind(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::LineString(line) => line.kind(),
            Geometry::Surface(_) => "surface",
            Geometry::Collection(_) => "collection",
        }
    }
}

fn reproject_line(
    registry: &ProjectionRegistry,
    line: &LineString,
    target: &Arc<ReferenceSystem>,
) -> Result<LineString> {
    let points = transform(registry, line.system(), target, line.points())?;
    Ok(line.with_points(points).with_system(target.clone()))
}

macro_rules! reproject_variant {
    ($type:ty, $variant:ident) => {
        impl $type {
            /// Returns the value in the target system. See [`Geometry::reproject`].
            pub fn reproject<'a>(
                &self,
                registry: &ProjectionRegistry,
                target: impl Into<ProjectionTarget<'a>>,
            ) -> Result<$type> {
                match Geometry::$variant(self.clone()).reproject(registry, target)? {
                    Geometry::$variant(value) => Ok(value),
                    other => Err(GeoframeError::from(GeoframeTypesError::Projection(format!(
                        "reprojection changed the geometry kind to {}",
                        other.kind()
                    )))),
                }
            }
        }
    };
}

reproject_variant!(Point, Point);
reproject_variant!(LineString, LineString);
reproject_variant!(Surface, Surface);
reproject_variant!(Collection, Collection);

/// Whether `b`, reprojected into the system of `a`, has the same shape as `a` with every coordinate within
/// `tolerance`.
pub fn same_as(registry: &ProjectionRegistry, a: &Geometry, b: &Geometry, tolerance: f64) -> Result<bool> {
    let b = b.reproject(registry, a.system())?;
    Ok(coordinates_close(a, &b, tolerance))
}

fn coordinates_close(a: &Geometry, b: &Geometry, tolerance: f64) -> bool {
    let close = |p: &Point2d, q: &Point2d| (p.x - q.x).abs() <= tolerance && (p.y - q.y).abs() <= tolerance;
    let lines_close = |a: &LineString, b: &LineString| {
        a.is_ring() == b.is_ring()
            && a.len() == b.len()
            && a.points().iter().zip(b.points()).all(|(p, q)| close(p, q))
    };

    match (a, b) {
        (Geometry::Point(a), Geometry::Point(b)) => close(&a.position(), &b.position()),
        (Geometry::LineString(a), Geometry::LineString(b)) => lines_close(a, b),
        (Geometry::Surface(a), Geometry::Surface(b)) => {
            lines_close(a.outer(), b.outer())
                && a.inner().len() == b.inner().len()
                && a.inner().iter().zip(b.inner()).all(|(a, b)| lines_close(a, b))
        }
        (Geometry::Collection(a), Geometry::Collection(b)) => {
            a.len() == b.len()
                && a
                    .components()
                    .iter()
                    .zip(b.components())
                    .all(|(a, b)| coordinates_close(a, b, tolerance))
        }
        _ => false,
    }
}
