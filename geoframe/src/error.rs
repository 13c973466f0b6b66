//! Error types used by the crate.

use geoframe_types::GeoframeTypesError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which coordinate of a pair a parse failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinate {
    /// Latitude of a geographic pair.
    Latitude,
    /// Longitude of a geographic pair.
    Longitude,
    /// X of a planar pair.
    X,
    /// Y of a planar pair.
    Y,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Coordinate::Latitude => "latitude",
            Coordinate::Longitude => "longitude",
            Coordinate::X => "x",
            Coordinate::Y => "y",
        };
        f.write_str(name)
    }
}

/// Geoframe error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoframeError {
    /// Label does not name a registered reference system.
    #[error("undefined projection '{nickname}'")]
    UnknownProjection {
        /// Label as given.
        nickname: String,
    },
    /// The geodetic engine rejected the definition of a reference system.
    #[error("invalid definition for projection '{nickname}': {reason}")]
    InvalidDefinition {
        /// Nickname being registered.
        nickname: String,
        /// Engine message.
        reason: String,
    },
    /// UTM input without exactly easting, northing and zone.
    #[error("UTM requires 3 values (easting, northing and zone) in '{input}'")]
    MissingUtmZone {
        /// Text being parsed.
        input: String,
    },
    /// UTM zone absent, zero or greater than 60.
    #[error("illegal UTM zone in '{input}'")]
    InvalidUtmZone {
        /// Text being parsed.
        input: String,
    },
    /// Fewer coordinate values than expected.
    #[error("too few values in '{input}' (got {got}, expect {expected})")]
    TooFewValues {
        /// Text being parsed.
        input: String,
        /// Number of values found.
        got: usize,
        /// Number of values expected.
        expected: usize,
    },
    /// More coordinate values than expected.
    #[error("too many values in '{input}' (got {got}, expect {expected})")]
    TooManyValues {
        /// Text being parsed.
        input: String,
        /// Number of values found.
        got: usize,
        /// Number of values expected.
        expected: usize,
    },
    /// Degree/minute/second text not understood.
    #[error("dms {coordinate} coordinate not understood: '{text}'")]
    DmsParse {
        /// Coordinate that failed.
        coordinate: Coordinate,
        /// Offending token.
        text: String,
    },
    /// Planar coordinate that is not a plain decimal number.
    #[error("illegal character in {coordinate} coordinate '{text}'")]
    IllegalCoordinateCharacter {
        /// Coordinate that failed.
        coordinate: Coordinate,
        /// Offending token.
        text: String,
    },
    /// The bounding-box values cannot be split into two latitudes and two longitudes.
    #[error("cannot tell latitudes from longitudes in '{input}'")]
    AmbiguousBoundingBox {
        /// Text being parsed.
        input: String,
    },
    /// The operation needs a latitude/longitude reference system.
    #[error("projection '{nickname}' is not a latitude/longitude system")]
    GeographicRequired {
        /// Nickname of the offending system.
        nickname: String,
    },
    /// Components that must share a reference system do not.
    #[error("expected projection '{expected}', found '{found}'")]
    ProjectionMismatch {
        /// Nickname required.
        expected: String,
        /// Nickname found.
        found: String,
    },
    /// A default projection was needed before any projection was registered.
    #[error("no default projection: nothing has been registered yet")]
    NoDefaultProjection,
    /// Distance unit not recognized.
    #[error("unknown distance unit '{0}'")]
    UnknownUnit(String),
    /// Operation not defined for the value it was called on.
    #[error("{0}")]
    Usage(String),
    /// Error raised by the geodetic engine while transforming coordinates.
    #[error("projection error: {0}")]
    Projection(#[from] GeoframeTypesError),
    /// Configuration could not be loaded.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GeoframeError {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeoframeError>;
