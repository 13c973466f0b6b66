use crate::cartesian::Point2d;
use crate::error::GeoframeTypesError;
use crate::geo::datum::Datum;
use crate::geo::definition::ProjectionDefinition;
use crate::geo::engine::{DefinitionInfo, GeodeticEngine};
use ::geodesy::prelude::*;

/// [`GeodeticEngine`] backed by the [`geodesy`](https://docs.rs/geodesy) crate.
///
/// Geographic definitions (`latlong`, `longlat`, ...) need no operator; every other definition is instantiated as a
/// `geodesy` operator taking geographic coordinates forward into the projected plane. A transformation therefore
/// goes source → (inverse) → geographic → (forward) → target.
///
/// Datum shifts are not performed: both ends of a transformation are assumed to share the datum.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeodesyEngine;

impl GeodesyEngine {
    /// Creates a new engine.
    pub fn new() -> Self {
        Self
    }

    fn operator(
        context: &mut Minimal,
        definition: &ProjectionDefinition,
    ) -> Result<OpHandle, GeoframeTypesError> {
        log::trace!("Instantiating geodesy operator '{}'", definition.operator_text());
        context
            .op(&definition.operator_text())
            .map_err(|err| GeoframeTypesError::InvalidDefinition {
                definition: definition.to_string(),
                reason: err.to_string(),
            })
    }
}

impl GeodeticEngine for GeodesyEngine {
    fn describe(&self, definition: &str) -> Result<DefinitionInfo, GeoframeTypesError> {
        let parsed = ProjectionDefinition::parse(definition)?;
        if !parsed.is_geographic() {
            Self::operator(&mut Minimal::new(), &parsed)?;
        }

        Ok(DefinitionInfo {
            geographic: parsed.is_geographic(),
            datum: parsed.datum().map(str::to_string),
        })
    }

    fn transform(
        &self,
        source: &str,
        target: &str,
        points: &[Point2d],
    ) -> Result<Vec<Point2d>, GeoframeTypesError> {
        if source == target {
            return Ok(points.to_vec());
        }

        let source = ProjectionDefinition::parse(source)?;
        let target = ProjectionDefinition::parse(target)?;
        let mut context = Minimal::new();

        let mut data: Vec<Coor2D> = if source.is_geographic() {
            points.iter().map(|p| Coor2D::geo(p.y, p.x)).collect()
        } else {
            points.iter().map(|p| Coor2D([p.x, p.y])).collect()
        };

        if !source.is_geographic() {
            let op = Self::operator(&mut context, &source)?;
            context
                .apply(op, Inv, &mut data)
                .map_err(|err| GeoframeTypesError::Projection(err.to_string()))?;
        }

        if !target.is_geographic() {
            let op = Self::operator(&mut context, &target)?;
            context
                .apply(op, Fwd, &mut data)
                .map_err(|err| GeoframeTypesError::Projection(err.to_string()))?;
        }

        let geographic_out = target.is_geographic();
        data.into_iter()
            .map(|c| {
                let [x, y] = c.0;
                if !x.is_finite() || !y.is_finite() {
                    return Err(GeoframeTypesError::Projection(format!(
                        "coordinate cannot be represented in '{target}'"
                    )));
                }

                Ok(if geographic_out {
                    Point2d::new(x.to_degrees(), y.to_degrees())
                } else {
                    Point2d::new(x, y)
                })
            })
            .collect()
    }

    fn geographic_definition(&self, datum: &str) -> String {
        format!("latlong ellps={}", canonical_datum(datum))
    }

    fn utm_definition(&self, zone: u8, datum: &str) -> String {
        format!("utm zone={zone} ellps={}", canonical_datum(datum))
    }
}

fn canonical_datum(datum: &str) -> &str {
    Datum::named(datum).map(|d| d.name()).unwrap_or(datum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;

    const WGS84: &str = "latlong ellps=WGS84";

    #[test]
    fn describe_definitions() {
        let engine = GeodesyEngine::new();
        assert_eq!(
            engine.describe(WGS84).expect("valid"),
            DefinitionInfo {
                geographic: true,
                datum: Some("WGS84".to_string())
            }
        );
        assert_eq!(engine.is_geographic("utm zone=31"), Ok(false));
        assert_matches!(
            engine.describe("nonsense_operator x=1"),
            Err(GeoframeTypesError::InvalidDefinition { .. })
        );
    }

    #[test]
    fn utm_round_trip() {
        let engine = GeodesyEngine::new();
        let utm = engine.utm_definition(32, "wgs84");
        assert_eq!(utm, "utm zone=32 ellps=WGS84");

        let geo = [Point2d::new(9.0, 55.0)];
        let projected = engine.transform(WGS84, &utm, &geo).expect("projects");
        // Central meridian of zone 32 maps to the false easting.
        assert_abs_diff_eq!(projected[0].x, 500_000.0, epsilon = 1e-3);
        assert!(projected[0].y > 6_000_000.0);

        let back = engine.transform(&utm, WGS84, &projected).expect("unprojects");
        assert_abs_diff_eq!(back[0], geo[0], epsilon = 1e-8);
    }

    #[test]
    fn same_definition_is_identity() {
        let engine = GeodesyEngine::new();
        let points = [Point2d::new(1.0, 2.0)];
        assert_eq!(
            engine.transform(WGS84, WGS84, &points).expect("identity"),
            points.to_vec()
        );
    }
}
