//! Selection of the UTM zone for a position.

use crate::error::Result;
use crate::geometry::Point;
use crate::registry::{DatumSource, ProjectionRegistry, ReferenceSystem};
use crate::reproject::geographic_position;
use geoframe_types::geo::GeoPoint;
use std::sync::Arc;

/// Latitude band letters, 8 degrees each starting at 80°S. `I` and `O` are not used.
const BAND_LETTERS: [char; 20] = [
    'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X',
];

/// UTM zone of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtmZone {
    /// Zone number, `1..=60`.
    pub number: u8,
    /// Latitude band. `None` south of 80°S and north of 84°N.
    pub letter: Option<char>,
    /// Central meridian of the regular zone containing the longitude.
    pub central_meridian: f64,
}

/// Computes the UTM zone of a geographic position.
///
/// Outside the special areas the zone number is `floor(central_meridian / 6) + 31`. Two areas use irregular zones:
///
/// * south-west Norway (56°N to 64°N): zone 32 stretches from 3°E to 12°E;
/// * Svalbard (72°N to 84°N): only zones 31 (0°E..9°E), 33 (..21°E), 35 (..33°E) and 37 (..42°E) are used.
///
/// The reported central meridian is always that of the regular grid.
pub fn zone_for(point: &impl GeoPoint<Num = f64>) -> UtmZone {
    let lat = point.lat();
    let lon = point.lon();

    let central_meridian = (lon / 6.0).trunc() * 6.0 + if lon < 0.0 { -3.0 } else { 3.0 };
    // Longitudes of exactly +-180 fall outside the grid.
    let regular = ((central_meridian / 6.0).floor() + 31.0).clamp(1.0, 60.0) as u8;

    let irregular = if (56.0..64.0).contains(&lat) {
        match lon {
            lon if lon < 3.0 => None,
            lon if lon < 12.0 => Some(32),
            _ => None,
        }
    } else if (72.0..84.0).contains(&lat) {
        match lon {
            lon if lon < 0.0 => None,
            lon if lon < 9.0 => Some(31),
            lon if lon < 21.0 => Some(33),
            lon if lon < 33.0 => Some(35),
            lon if lon < 42.0 => Some(37),
            _ => None,
        }
    } else {
        None
    };

    let letter = if (-80.0..=84.0).contains(&lat) {
        let band = (((lat + 80.0) / 8.0) as usize).min(BAND_LETTERS.len() - 1);
        Some(BAND_LETTERS[band])
    } else {
        None
    };

    UtmZone {
        number: irregular.unwrap_or(regular),
        letter,
        central_meridian,
    }
}

/// Returns the UTM system best suited for the point, registering it if needed.
///
/// The datum is taken from `base`, or from the point's own system when `base` is `None`. Planar points are converted
/// to geographic coordinates to find the zone.
pub fn best_utm_projection(
    registry: &ProjectionRegistry,
    point: &Point,
    base: Option<DatumSource<'_>>,
) -> Result<Arc<ReferenceSystem>> {
    let position = geographic_position(registry, point)?;
    let zone = zone_for(&position);
    let base = base.unwrap_or(DatumSource::System(point.system()));

    registry.synthesize_utm(base, zone.number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reproject::GeoPosition;
    use geoframe_types::geo::{GeodesyEngine, NewGeoPoint};

    fn zone(lat: f64, lon: f64) -> UtmZone {
        zone_for(&GeoPosition::latlon(lat, lon))
    }

    #[test]
    fn regular_zones() {
        let amersfoort = zone(52.3213, 5.53);
        assert_eq!(amersfoort.number, 31);
        assert_eq!(amersfoort.letter, Some('U'));
        assert_eq!(amersfoort.central_meridian, 3.0);

        let west = zone(-33.9, -70.6);
        assert_eq!(west.number, 19);
        assert_eq!(west.letter, Some('H'));
        assert_eq!(west.central_meridian, -69.0);

        assert_eq!(zone(0.0, -0.5).number, 30);
        assert_eq!(zone(0.0, 0.0).number, 31);
        assert_eq!(zone(0.0, 179.9).number, 60);
        assert_eq!(zone(0.0, -179.9).number, 1);
    }

    #[test]
    fn zone_number_follows_meridian() {
        let mut lon = -179.5;
        while lon < 180.0 {
            let z = zone(10.0, lon);
            assert_eq!(f64::from(z.number), (z.central_meridian / 6.0).floor() + 31.0);
            assert!(z.central_meridian - 3.0 <= lon && lon <= z.central_meridian + 3.0);
            lon += 1.25;
        }
    }

    #[test]
    fn norway() {
        assert_eq!(zone(60.0, 2.9).number, 31);
        assert_eq!(zone(60.0, 3.0).number, 32);
        assert_eq!(zone(60.0, 11.9).number, 32);
        assert_eq!(zone(60.0, 12.0).number, 33);
        // Outside the latitude band the regular grid applies.
        assert_eq!(zone(55.9, 5.0).number, 31);
        assert_eq!(zone(64.0, 5.0).number, 31);
    }

    #[test]
    fn svalbard() {
        assert_eq!(zone(78.0, -1.0).number, 30);
        assert_eq!(zone(78.0, 8.9).number, 31);
        assert_eq!(zone(78.0, 9.0).number, 33);
        assert_eq!(zone(78.0, 20.9).number, 33);
        assert_eq!(zone(78.0, 21.0).number, 35);
        assert_eq!(zone(78.0, 32.9).number, 35);
        assert_eq!(zone(78.0, 33.0).number, 37);
        assert_eq!(zone(78.0, 41.9).number, 37);
        assert_eq!(zone(78.0, 42.0).number, 38);
    }

    #[test]
    fn latitude_bands() {
        assert_eq!(zone(-80.0, 0.0).letter, Some('C'));
        assert_eq!(zone(-80.1, 0.0).letter, None);
        assert_eq!(zone(0.0, 0.0).letter, Some('N'));
        assert_eq!(zone(-0.1, 0.0).letter, Some('M'));
        assert_eq!(zone(83.9, 0.0).letter, Some('X'));
        assert_eq!(zone(84.1, 0.0).letter, None);
    }

    #[test]
    fn best_projection() {
        let registry = ProjectionRegistry::with_wgs84(Arc::new(GeodesyEngine::new()));
        let wgs84 = registry.require("wgs84").expect("registered");
        let point = Point::latlong(52.3213, 5.53, wgs84);

        let utm = best_utm_projection(&registry, &point, None).expect("valid");
        assert_eq!(utm.nickname(), "utm-wgs84-31");

        let intl = best_utm_projection(&registry, &point, Some(DatumSource::Named("intl")))
            .expect("valid");
        assert_eq!(intl.nickname(), "utm-intl-31");
    }
}
