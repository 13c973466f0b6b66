//! Geoframe labels geometries with named coordinate reference systems, parses loosely formatted coordinate text
//! and reprojects geometries between reference systems on demand.
//!
//! # Quick start
//!
//! ```
//! use geoframe::registry;
//! use geoframe::{Geometry, Point};
//!
//! let registry = registry::global();
//! let point = Point::parse(registry, "52d19'16.68\"N 5d31'48\"E").unwrap().unwrap();
//! assert_eq!(point.nickname(), "wgs84");
//!
//! let utm = point.reproject(registry, "utm").unwrap();
//! assert_eq!(utm.nickname(), "utm-wgs84-31");
//! println!("{}", Geometry::from(utm));
//! ```
//!
//! # Main components
//!
//! * [`ProjectionRegistry`] maps nicknames to [`ReferenceSystem`]s and knows which one is the default. Everything
//!   that needs a lookup takes the registry as a parameter; [`registry::global`] is provided for the outermost layer
//!   of an application.
//! * [`Geometry`] and its variants [`Point`], [`LineString`], [`Surface`] and [`Collection`] carry their reference
//!   system and can be [reprojected](Geometry::reproject), measured and rendered as text.
//! * [`parser`] turns text like `utm 31n 12311.123 34242.12` into points and bounding boxes.
//! * [`dms`] and [`utm`] are the degree/minute/second converter and the UTM zone selector the parser and the
//!   reprojection rely on.
//!
//! Coordinate transformations are done by a [`GeodeticEngine`](geoframe_types::geo::GeodeticEngine), by default the
//! [`GeodesyEngine`](geoframe_types::geo::GeodesyEngine).

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod distance;
pub mod dms;
pub mod error;
pub mod geometry;
pub mod parser;
pub mod registry;
pub mod reproject;
pub mod utm;

pub use config::{ProjectionOptions, RegistryBuilder, RegistryConfig};
pub use distance::{distance, DistanceUnit, GreatCircle};
pub use error::{GeoframeError, Result};
pub use geometry::{Collection, Geometry, LineString, Point, Surface};
pub use parser::{parse_bbox, parse_point, ParsedBbox};
pub use registry::{DatumSource, ProjectionKey, ProjectionRegistry, ReferenceSystem};
pub use reproject::{same_as, ProjectionTarget};

// Reexport geoframe_types
pub use geoframe_types;
