use crate::error::{GeoframeError, Result};
use crate::geometry::{Geometry, LineString, Point};
use crate::registry::{ProjectionRegistry, ReferenceSystem};
use geoframe_types::Rect;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Ordered, heterogeneous group of geometries sharing one reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    components: Vec<Geometry>,
    system: Arc<ReferenceSystem>,
}

impl Collection {
    /// Creates a collection. Every component must already be in `system`.
    pub fn new(system: Arc<ReferenceSystem>, components: Vec<Geometry>) -> Result<Self> {
        if let Some(other) = components
            .iter()
            .find(|c| c.nickname() != system.nickname())
        {
            return Err(GeoframeError::ProjectionMismatch {
                expected: system.nickname().to_string(),
                found: other.nickname().to_string(),
            });
        }

        Ok(Self { components, system })
    }

    /// Creates a collection in the system of the first component, reprojecting the other components into it.
    ///
    /// An empty collection gets the default system of the registry.
    pub fn assemble(registry: &ProjectionRegistry, components: Vec<Geometry>) -> Result<Self> {
        let system = match components.first() {
            Some(first) => first.system().clone(),
            None => registry.require_default()?,
        };

        let components = components
            .into_iter()
            .map(|component| component.reproject(registry, &system))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { components, system })
    }

    /// All components.
    pub fn components(&self) -> &[Geometry] {
        &self.components
    }

    /// Component at the given index.
    pub fn component(&self, index: usize) -> Option<&Geometry> {
        self.components.get(index)
    }

    /// Number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether there are no components.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Reference system.
    pub fn system(&self) -> &Arc<ReferenceSystem> {
        &self.system
    }

    /// Nickname of the reference system.
    pub fn nickname(&self) -> &str {
        self.system.nickname()
    }

    /// Components that are points.
    pub fn only_points(&self) -> Vec<&Point> {
        self.components
            .iter()
            .filter_map(|c| match c {
                Geometry::Point(point) => Some(point),
                _ => None,
            })
            .collect()
    }

    /// Components that are open lines.
    pub fn only_lines(&self) -> Vec<&LineString> {
        self.line_strings().filter(|l| !l.is_ring()).collect()
    }

    /// Components that are rings.
    pub fn only_rings(&self) -> Vec<&LineString> {
        self.line_strings().filter(|l| l.is_ring()).collect()
    }

    fn line_strings(&self) -> impl Iterator<Item = &LineString> {
        self.components.iter().filter_map(|c| match c {
            Geometry::LineString(line) => Some(line),
            _ => None,
        })
    }

    /// Union of the component boxes. `None` if there is nothing with a box in the collection.
    ///
    /// Boxes are merged as they are: the components are expected to be in the collection's system.
    pub fn bounding_box(&self) -> Option<Rect> {
        Rect::merge_all(self.components.iter().filter_map(Geometry::bounding_box))
    }

    /// Sum of the areas of the rings and surfaces, nested collections included.
    pub fn area(&self) -> Result<f64> {
        self.measure(Geometry::area)
    }

    /// Sum of the perimeters of the rings and surfaces, nested collections included.
    pub fn perimeter(&self) -> Result<f64> {
        self.measure(Geometry::perimeter)
    }

    fn measure(&self, measure: fn(&Geometry) -> Result<f64>) -> Result<f64> {
        self.components
            .iter()
            .filter(|c| match c {
                Geometry::Point(_) => false,
                Geometry::LineString(line) => line.is_ring(),
                Geometry::Surface(_) | Geometry::Collection(_) => true,
            })
            .map(measure)
            .sum()
    }

    pub(crate) fn from_parts(system: Arc<ReferenceSystem>, components: Vec<Geometry>) -> Self {
        Self { components, system }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "collection[{}](", self.nickname())?;
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{component}")?;
        }
        write!(f, ")")
    }
}
