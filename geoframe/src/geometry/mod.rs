//! Geometries tagged with a reference system.
//!
//! [`Geometry`] is a closed set of variants. Operations that must work on any of them (reprojection, bounding box,
//! area, perimeter, text rendering) match on the variant.

mod collection;
mod line_string;
mod point;
mod surface;

pub use collection::Collection;
pub use line_string::LineString;
pub use point::Point;
pub use surface::Surface;

use crate::error::{GeoframeError, Result};
use crate::registry::ReferenceSystem;
use geoframe_types::{CartesianPoint2d, Rect};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Any geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Single position.
    Point(Point),
    /// Line or ring.
    LineString(LineString),
    /// Region with holes.
    Surface(Surface),
    /// Group of geometries.
    Collection(Collection),
}

impl Geometry {
    /// Reference system.
    pub fn system(&self) -> &Arc<ReferenceSystem> {
        match self {
            Geometry::Point(v) => v.system(),
            Geometry::LineString(v) => v.system(),
            Geometry::Surface(v) => v.system(),
            Geometry::Collection(v) => v.system(),
        }
    }

    /// Nickname of the reference system.
    pub fn nickname(&self) -> &str {
        self.system().nickname()
    }

    /// Bounding box. `None` only for collections without components.
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Geometry::Point(v) => Some(v.bounding_box()),
            Geometry::LineString(v) => Some(v.bounding_box()),
            Geometry::Surface(v) => Some(v.bounding_box()),
            Geometry::Collection(v) => v.bounding_box(),
        }
    }

    /// Area. Zero for points, an error for lines that are not rings.
    ///
    /// The value is in squared units of the reference system, so it has no real meaning for geographic systems.
    pub fn area(&self) -> Result<f64> {
        match self {
            Geometry::Point(v) => Ok(v.area()),
            Geometry::LineString(v) => v.area(),
            Geometry::Surface(v) => v.area(),
            Geometry::Collection(v) => v.area(),
        }
    }

    /// Perimeter. Zero for points, an error for lines that are not rings.
    pub fn perimeter(&self) -> Result<f64> {
        match self {
            Geometry::Point(v) => Ok(v.perimeter()),
            Geometry::LineString(v) => v.perimeter(),
            Geometry::Surface(v) => v.perimeter(),
            Geometry::Collection(v) => v.perimeter(),
        }
    }

    /// First position of the geometry, looking into nested collections.
    pub fn first_point(&self) -> Option<Point> {
        match self {
            Geometry::Point(v) => Some(v.clone()),
            Geometry::LineString(v) => Some(v.begin_point()),
            Geometry::Surface(v) => Some(v.outer().begin_point()),
            Geometry::Collection(v) => v.components().iter().find_map(Geometry::first_point),
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Self::LineString(value)
    }
}

impl From<Surface> for Geometry {
    fn from(value: Surface) -> Self {
        Self::Surface(value)
    }
}

impl From<Collection> for Geometry {
    fn from(value: Collection) -> Self {
        Self::Collection(value)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Geometry::Point(v) => v.fmt(f),
            Geometry::LineString(v) => v.fmt(f),
            Geometry::Surface(v) => v.fmt(f),
            Geometry::Collection(v) => v.fmt(f),
        }
    }
}

/// Whether the point lies inside the box or on its border.
pub fn bbox_contains(bbox: &Rect, point: &impl CartesianPoint2d<Num = f64>) -> bool {
    bbox.contains(point)
}

/// Center of the box, as a point in the given system.
pub fn bbox_center(bbox: &Rect, system: Arc<ReferenceSystem>) -> Point {
    let center = bbox.center();
    Point::xy(center.x, center.y, system)
}

/// Filled ring along the border of the box, counterclockwise from `(x_min, y_min)`.
pub fn bbox_ring(bbox: &Rect, system: Arc<ReferenceSystem>) -> Result<LineString> {
    if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
        return Err(GeoframeError::Usage(
            "ring of an empty bounding box".into(),
        ));
    }

    LineString::filled(bbox.into_contour().into_points(), system)
}
