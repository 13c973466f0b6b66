//! Coordinate primitives shared by the `geoframe` crates.
//!
//! This crate holds the two collaborators the reference-system layer calls into:
//!
//! * the planar geometry kernel ([`Contour`], [`Rect`] and the [`clip`] functions), which knows how to compute
//!   bounding boxes, areas, perimeters and clipped fragments of a single ring or line;
//! * the geodetic engine ([`geo::GeodeticEngine`]), which validates reference-system definitions and transforms
//!   coordinate sequences between them. The default implementation is backed by the
//!   [`geodesy`](https://docs.rs/geodesy) crate.

pub mod cartesian;
pub mod clip;
pub mod contour;
pub mod error;
pub mod geo;
pub mod segment;

pub use cartesian::{CartesianPoint2d, Point2d, Rect};
pub use contour::Contour;
pub use error::GeoframeTypesError;
