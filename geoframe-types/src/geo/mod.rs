//! Geographic coordinates (latitude and longitude) and the engine transforming coordinates between reference systems.

mod datum;
mod definition;
mod engine;
mod point;

#[cfg(feature = "geodesy")]
mod geodesy;

pub use datum::Datum;
pub use definition::ProjectionDefinition;
pub use engine::{DefinitionInfo, GeodeticEngine};
pub use point::{GeoPoint, NewGeoPoint};

#[cfg(feature = "geodesy")]
pub use self::geodesy::GeodesyEngine;
