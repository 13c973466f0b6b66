use crate::error::{GeoframeError, Result};
use crate::geometry::LineString;
use crate::registry::ReferenceSystem;
use geoframe_types::clip::clip_polygon;
use geoframe_types::{Point2d, Rect};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Region bounded by an outer ring, with zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    outer: LineString,
    inner: Vec<LineString>,
}

impl Surface {
    /// Creates a surface. Every ring must be a ring, and all of them must be in the same reference system.
    pub fn new(outer: LineString, inner: Vec<LineString>) -> Result<Self> {
        for ring in std::iter::once(&outer).chain(&inner) {
            if !ring.is_ring() {
                return Err(GeoframeError::Usage(
                    "surface boundaries must be rings".into(),
                ));
            }
            if ring.nickname() != outer.nickname() {
                return Err(GeoframeError::ProjectionMismatch {
                    expected: outer.nickname().to_string(),
                    found: ring.nickname().to_string(),
                });
            }
        }

        Ok(Self { outer, inner })
    }

    /// Outer boundary.
    pub fn outer(&self) -> &LineString {
        &self.outer
    }

    /// Holes.
    pub fn inner(&self) -> &[LineString] {
        &self.inner
    }

    /// Reference system.
    pub fn system(&self) -> &Arc<ReferenceSystem> {
        self.outer.system()
    }

    /// Nickname of the reference system.
    pub fn nickname(&self) -> &str {
        self.outer.nickname()
    }

    /// Bounding box of the outer ring.
    pub fn bounding_box(&self) -> Rect {
        self.outer.bounding_box()
    }

    /// Area of the outer ring minus the areas of the holes.
    pub fn area(&self) -> Result<f64> {
        let holes = self
            .inner
            .iter()
            .map(LineString::area)
            .sum::<Result<f64>>()?;
        Ok(self.outer.area()? - holes)
    }

    /// Perimeter of the outer ring. Holes do not count.
    pub fn perimeter(&self) -> Result<f64> {
        self.outer.perimeter()
    }

    /// Parts of the surface inside the box.
    pub fn clip(&self, bbox: &Rect) -> Vec<Surface> {
        let inner: Vec<_> = self.inner.iter().map(LineString::ring_contour).collect();
        clip_polygon(&self.outer.ring_contour(), &inner, bbox)
            .into_iter()
            .map(|fragment| {
                let ring = |contour: geoframe_types::Contour<Point2d>| {
                    self.outer
                        .with_points(contour.iter_points_closing().copied().collect())
                };
                Surface {
                    outer: ring(fragment.outer),
                    inner: fragment.inner.into_iter().map(ring).collect(),
                }
            })
            .collect()
    }

    pub(crate) fn from_parts(outer: LineString, inner: Vec<LineString>) -> Self {
        Self { outer, inner }
    }
}

impl Display for Surface {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "surface[{}](", self.nickname())?;
        for (i, ring) in std::iter::once(&self.outer).chain(&self.inner).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "(")?;
            ring.fmt_coordinates(f)?;
            write!(f, ")")?;
        }
        write!(f, ")")
    }
}
