//! Great-circle distance between points.
//!
//! Distances in length units are computed by the [`geo`](::geo) crate. The angular units (`degrees`, `radians`) are
//! computed here from the central angle between the points.

use crate::error::{GeoframeError, Result};
use crate::geometry::Point;
use crate::registry::ProjectionRegistry;
use crate::reproject::{geographic_position, GeoPosition};
use ::geo::{GeodesicDistance, HaversineDistance, VincentyDistance};
use geoframe_types::geo::GeoPoint;
use geoframe_types::GeoframeTypesError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Unit of a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    /// Meter.
    #[default]
    Meter,
    /// Kilometer, also `km`.
    Kilometer,
    /// Centimeter.
    Centimeter,
    /// International mile.
    Mile,
    /// Nautical mile.
    NauticalMile,
    /// Yard.
    Yard,
    /// Foot.
    Foot,
    /// Inch.
    Inch,
    /// Central angle in degrees.
    Degrees,
    /// Central angle in radians.
    Radians,
}

impl DistanceUnit {
    /// Length of the unit in meters. `None` for the angular units.
    pub fn meters(&self) -> Option<f64> {
        match self {
            DistanceUnit::Meter => Some(1.0),
            DistanceUnit::Kilometer => Some(1000.0),
            DistanceUnit::Centimeter => Some(0.01),
            DistanceUnit::Mile => Some(1609.344),
            DistanceUnit::NauticalMile => Some(1852.0),
            DistanceUnit::Yard => Some(0.9144),
            DistanceUnit::Foot => Some(0.3048),
            DistanceUnit::Inch => Some(0.0254),
            DistanceUnit::Degrees | DistanceUnit::Radians => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DistanceUnit::Meter => "meter",
            DistanceUnit::Kilometer => "kilometer",
            DistanceUnit::Centimeter => "centimeter",
            DistanceUnit::Mile => "mile",
            DistanceUnit::NauticalMile => "nautical mile",
            DistanceUnit::Yard => "yard",
            DistanceUnit::Foot => "foot",
            DistanceUnit::Inch => "inch",
            DistanceUnit::Degrees => "degrees",
            DistanceUnit::Radians => "radians",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = GeoframeError;

    fn from_str(s: &str) -> Result<Self> {
        let unit = match s.trim().to_lowercase().as_str() {
            "m" | "meter" | "meters" | "metre" | "metres" => DistanceUnit::Meter,
            "km" | "kilometer" | "kilometers" | "kilometre" | "kilometres" => DistanceUnit::Kilometer,
            "cm" | "centimeter" | "centimeters" => DistanceUnit::Centimeter,
            "mile" | "miles" => DistanceUnit::Mile,
            "nautical mile" | "nautical miles" | "nautical_mile" | "nmi" => DistanceUnit::NauticalMile,
            "yard" | "yards" | "yd" => DistanceUnit::Yard,
            "foot" | "feet" | "ft" => DistanceUnit::Foot,
            "inch" | "inches" => DistanceUnit::Inch,
            "degree" | "degrees" | "deg" => DistanceUnit::Degrees,
            "radian" | "radians" | "rad" => DistanceUnit::Radians,
            _ => return Err(GeoframeError::UnknownUnit(s.to_string())),
        };

        Ok(unit)
    }
}

impl Display for DistanceUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Formula used for distances in length units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GreatCircle {
    /// Sphere with the mean earth radius.
    #[default]
    Haversine,
    /// Vincenty's formula on the WGS84 ellipsoid.
    Vincenty,
    /// Karney's geodesic on the WGS84 ellipsoid.
    Geodesic,
}

/// Distance between two points.
///
/// `b` is first reprojected into the system of `a`. Points of planar systems are converted to geographic coordinates
/// on the datum of the system before measuring.
pub fn distance(
    registry: &ProjectionRegistry,
    a: &Point,
    b: &Point,
    unit: DistanceUnit,
    method: GreatCircle,
) -> Result<f64> {
    let b = b.reproject(registry, a.system())?;
    let from = geographic_position(registry, a)?;
    let to = geographic_position(registry, &b)?;

    match unit.meters() {
        Some(meters) => Ok(length(&from, &to, method)? / meters),
        None if unit == DistanceUnit::Degrees => Ok(central_angle(&from, &to).to_degrees()),
        None => Ok(central_angle(&from, &to)),
    }
}

fn length(from: &GeoPosition, to: &GeoPosition, method: GreatCircle) -> Result<f64> {
    let from = ::geo::Point::new(from.lon(), from.lat());
    let to = ::geo::Point::new(to.lon(), to.lat());

    match method {
        GreatCircle::Haversine => Ok(from.haversine_distance(&to)),
        GreatCircle::Geodesic => Ok(from.geodesic_distance(&to)),
        GreatCircle::Vincenty => from.vincenty_distance(&to).map_err(|err| {
            GeoframeError::from(GeoframeTypesError::Conversion(format!(
                "vincenty distance: {err}"
            )))
        }),
    }
}

/// Angle between the points seen from the center of the earth, in radians.
fn central_angle(from: &GeoPosition, to: &GeoPosition) -> f64 {
    let delta_lat = to.lat_rad() - from.lat_rad();
    let delta_lon = to.lon_rad() - from.lon_rad();

    let a = (delta_lat / 2.0).sin().powi(2)
        + from.lat_rad().cos() * to.lat_rad().cos() * (delta_lon / 2.0).sin().powi(2);
    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

impl Point {
    /// Distance to another point. See [`distance`].
    pub fn distance(
        &self,
        registry: &ProjectionRegistry,
        other: &Point,
        unit: DistanceUnit,
        method: GreatCircle,
    ) -> Result<f64> {
        distance(registry, self, other, unit, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use assert_matches::assert_matches;
    use geoframe_types::geo::GeodesyEngine;
    use std::sync::Arc;

    fn registry() -> ProjectionRegistry {
        ProjectionRegistry::with_wgs84(Arc::new(GeodesyEngine::new()))
    }

    fn equator(registry: &ProjectionRegistry, long: f64) -> Point {
        Point::latlong(0.0, long, registry.require("wgs84").expect("registered"))
    }

    #[test]
    fn units_from_str() {
        assert_eq!("km".parse::<DistanceUnit>(), Ok(DistanceUnit::Kilometer));
        assert_eq!("Nautical Mile".parse::<DistanceUnit>(), Ok(DistanceUnit::NauticalMile));
        assert_eq!("radians".parse::<DistanceUnit>(), Ok(DistanceUnit::Radians));
        assert_matches!(
            "furlong".parse::<DistanceUnit>(),
            Err(GeoframeError::UnknownUnit(unit)) if unit == "furlong"
        );
        assert_eq!(DistanceUnit::NauticalMile.to_string(), "nautical mile");
    }

    #[test]
    fn angular_units() {
        let registry = registry();
        let (a, b) = (equator(&registry, 5.0), equator(&registry, 6.0));
        let degrees = distance(&registry, &a, &b, DistanceUnit::Degrees, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(degrees, 1.0, epsilon = 1e-12);
        let radians = a
            .distance(&registry, &b, DistanceUnit::Radians, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(radians, 1f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn length_units() {
        let registry = registry();
        let (a, b) = (equator(&registry, 5.0), equator(&registry, 6.0));

        let km = distance(&registry, &a, &b, DistanceUnit::Kilometer, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(km, 111.195, epsilon = 0.01);

        let miles = distance(&registry, &a, &b, DistanceUnit::Mile, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(miles, km * 1000.0 / 1609.344, epsilon = 1e-9);

        let geodesic = distance(&registry, &a, &b, DistanceUnit::Meter, GreatCircle::Geodesic)
            .expect("measurable");
        assert_abs_diff_eq!(geodesic, 111_319.49, epsilon = 0.1);

        let wgs84 = registry.require("wgs84").expect("registered");
        let c = Point::latlong(52.0, 5.0, wgs84.clone());
        let d = Point::latlong(53.0, 6.0, wgs84);
        let geodesic = distance(&registry, &c, &d, DistanceUnit::Meter, GreatCircle::Geodesic)
            .expect("measurable");
        let vincenty = distance(&registry, &c, &d, DistanceUnit::Meter, GreatCircle::Vincenty)
            .expect("measurable");
        assert_abs_diff_eq!(geodesic, vincenty, epsilon = 0.01);
    }

    #[test]
    fn other_system_is_reprojected() {
        let registry = registry();
        let a = equator(&registry, 5.0);
        let b = equator(&registry, 6.0);
        let b_utm = b.reproject(&registry, "utm").expect("projects");
        assert_ne!(b_utm.nickname(), a.nickname());

        let direct = distance(&registry, &a, &b, DistanceUnit::Meter, GreatCircle::Haversine)
            .expect("measurable");
        let via_utm = distance(&registry, &a, &b_utm, DistanceUnit::Meter, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(direct, via_utm, epsilon = 0.01);

        // Measuring from a planar point works too.
        let from_utm = distance(&registry, &b_utm, &a, DistanceUnit::Meter, GreatCircle::Haversine)
            .expect("measurable");
        assert_abs_diff_eq!(direct, from_utm, epsilon = 0.01);
    }
}
