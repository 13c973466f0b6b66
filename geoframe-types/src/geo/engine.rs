use crate::cartesian::Point2d;
use crate::error::GeoframeTypesError;
use std::fmt::Debug;

/// What the engine knows about a valid definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionInfo {
    /// `true` for angular latitude/longitude systems, `false` for planar x/y ones.
    pub geographic: bool,
    /// Datum the definition refers to, if it names one.
    pub datum: Option<String>,
}

/// Transforms coordinates between reference systems given by their definitions.
///
/// Geographic coordinates are always passed as `(x = longitude, y = latitude)` in degrees. Planar coordinates are
/// passed as they are, usually in meters.
///
/// Implementations must be safe to use from several threads at once.
pub trait GeodeticEngine: Debug + Send + Sync {
    /// Validates a definition and reports whether it is geographic and what datum it uses.
    fn describe(&self, definition: &str) -> Result<DefinitionInfo, GeoframeTypesError>;

    /// Transforms `points` given in the `source` system into the `target` system.
    fn transform(
        &self,
        source: &str,
        target: &str,
        points: &[Point2d],
    ) -> Result<Vec<Point2d>, GeoframeTypesError>;

    /// Definition of the geographic (latitude/longitude) system on the given datum.
    fn geographic_definition(&self, datum: &str) -> String;

    /// Definition of the UTM system for the given zone on the given datum.
    fn utm_definition(&self, zone: u8, datum: &str) -> String;

    /// Whether the definition is geographic.
    fn is_geographic(&self, definition: &str) -> Result<bool, GeoframeTypesError> {
        Ok(self.describe(definition)?.geographic)
    }

    /// Datum of the definition.
    fn datum(&self, definition: &str) -> Result<Option<String>, GeoframeTypesError> {
        Ok(self.describe(definition)?.datum)
    }
}
