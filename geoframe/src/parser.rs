//! Parsing of loosely formatted coordinate text.
//!
//! Accepted input for a point, after trimming:
//!
//! ```text
//! [label:] [label] value value          52.3213 5.53
//!                                       5d31'48"E, 52d19'16.68"N
//!                                       wgs84: 52.3213 5.53
//! utm value value zone                  utm 31n 12311.123 34242.12
//! ```
//!
//! Values are separated by commas when the text has any, by whitespace otherwise. A first value starting with two
//! letters is a projection label; it wins over a `label:` prefix. Without a label the default system of the registry
//! is used.
//!
//! In a geographic system the pair is latitude then longitude, unless the direction letters say otherwise
//! (`5.53E 52.32` is swapped). In a planar system both values must be plain decimal numbers.

use crate::dms::{dms_to_degrees, split_direction};
use crate::error::{Coordinate, GeoframeError, Result};
use crate::geometry::Point;
use crate::registry::{DatumSource, ProjectionRegistry, ReferenceSystem, UTM_LABEL};
use geoframe_types::Rect;
use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

lazy_static! {
    static ref LABEL_PREFIX: Regex = Regex::new(r"^(\w+):\s*").expect("valid label pattern");
    static ref LABEL_TOKEN: Regex = Regex::new(r"^[A-Za-z]{2}").expect("valid label pattern");
    static ref UTM_ZONE: Regex =
        Regex::new(r"^(\d\d?)([C-HJ-NP-Xc-hj-np-x])?$").expect("valid zone pattern");
    static ref DECIMAL: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)$").expect("valid number pattern");
    static ref RANGE_DASH: Regex = Regex::new(r"(\d)(?:\s*-\s+|-)(\d)").expect("valid range pattern");
    static ref RANGES: [Regex; 3] = [
        Regex::new(r"(?i)^([nesw])(\d\S*?)-(\d\S*)$").expect("valid range pattern"),
        Regex::new(r"(?i)^(\d\S*?)([nesw])-(\d\S*)$").expect("valid range pattern"),
        Regex::new(r"(?i)^(\d\S*?)-(\d\S*?)([nesw])$").expect("valid range pattern"),
    ];
}

/// Bounding box parsed from text, in a geographic system.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBbox {
    /// Southern edge.
    pub min_lat: f64,
    /// Western edge.
    pub min_long: f64,
    /// Northern edge.
    pub max_lat: f64,
    /// Eastern edge.
    pub max_long: f64,
    /// System the values are in.
    pub system: Arc<ReferenceSystem>,
}

impl ParsedBbox {
    /// Box as a rectangle with longitudes on the x axis.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(self.min_long, self.min_lat, self.max_long, self.max_lat)
    }
}

/// Parses a point. Returns `Ok(None)` for blank text.
///
/// ```
/// use geoframe::parser::parse_point;
/// use geoframe::registry;
///
/// let point = parse_point(registry::global(), "52.3213 5.53").unwrap().unwrap();
/// assert_eq!((point.lat(), point.long()), (52.3213, 5.53));
/// ```
pub fn parse_point(registry: &ProjectionRegistry, text: &str) -> Result<Option<Point>> {
    let input = text.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (label, rest) = strip_label_prefix(input);
    let (label, mut tokens) = take_label(label, split_values(rest));

    let system = match label {
        Some(UTM_LABEL) => {
            if tokens.len() != 3 {
                return Err(GeoframeError::MissingUtmZone {
                    input: input.to_string(),
                });
            }

            let (index, zone) = find_utm_zone(&tokens).ok_or_else(|| GeoframeError::InvalidUtmZone {
                input: input.to_string(),
            })?;
            tokens.remove(index);
            registry.synthesize_utm(DatumSource::Default, zone)?
        }
        Some(label) => registry.require(label)?,
        None => registry.require_default()?,
    };

    check_count(input, tokens.len(), 2)?;

    let point = if system.is_geographic() {
        let (mut lat, mut long) = (tokens[0], tokens[1]);
        if has_direction(lat, &['E', 'W']) || has_direction(long, &['N', 'S']) {
            std::mem::swap(&mut lat, &mut long);
        }

        Point::latlong(
            parse_degrees(lat, Coordinate::Latitude)?,
            parse_degrees(long, Coordinate::Longitude)?,
            system,
        )
    } else {
        Point::xy(
            parse_planar(tokens[0], Coordinate::X)?,
            parse_planar(tokens[1], Coordinate::Y)?,
            system,
        )
    };

    Ok(Some(point))
}

impl Point {
    /// Parses a point from text. See [`parse_point`].
    pub fn parse(registry: &ProjectionRegistry, text: &str) -> Result<Option<Point>> {
        parse_point(registry, text)
    }
}

/// Parses a bounding box given as two latitudes and two longitudes. Returns `Ok(None)` for blank text.
///
/// Besides four separate values, ranges like `52-53N` or `E5-6` are accepted, so `52-53N 5-6E` is a valid box.
/// Values with direction letters are placed first. Values without one fill the side that still lacks a value,
/// and when both sides do they alternate as latitude, longitude, latitude, longitude. The system must be
/// geographic.
pub fn parse_bbox(registry: &ProjectionRegistry, text: &str) -> Result<Option<ParsedBbox>> {
    let input = text.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let (label, rest) = strip_label_prefix(input);
    let joined = if rest.contains(',') {
        split_values(rest).join(" ")
    } else {
        rest.to_string()
    };
    let collapsed = RANGE_DASH.replace_all(&joined, "$1-$2");
    let expanded: Vec<String> = collapsed.split_whitespace().flat_map(expand_range).collect();
    let (label, tokens) = take_label(label, expanded.iter().map(String::as_str).collect());

    let system = match label {
        Some(UTM_LABEL) => {
            return Err(GeoframeError::GeographicRequired {
                nickname: UTM_LABEL.to_string(),
            })
        }
        Some(label) => registry.require(label)?,
        None => registry.require_default()?,
    };
    if !system.is_geographic() {
        return Err(GeoframeError::GeographicRequired {
            nickname: system.nickname().to_string(),
        });
    }

    check_count(input, tokens.len(), 4)?;

    let mut lats = Vec::with_capacity(2);
    let mut longs = Vec::with_capacity(2);
    let mut unlettered = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        match split_direction(token).0 {
            Some('N') | Some('S') => lats.push(*token),
            Some('E') | Some('W') => longs.push(*token),
            _ => unlettered.push((i, *token)),
        }
    }

    // Lettered values settle their side first; the rest fill whichever side is short.
    for (i, token) in unlettered {
        let lat_short = lats.len() < 2;
        let long_short = longs.len() < 2;
        if lat_short && (!long_short || i % 2 == 0) {
            lats.push(token);
        } else {
            longs.push(token);
        }
    }

    if lats.len() != 2 || longs.len() != 2 {
        return Err(GeoframeError::AmbiguousBoundingBox {
            input: input.to_string(),
        });
    }

    let lat1 = parse_degrees(lats[0], Coordinate::Latitude)?;
    let lat2 = parse_degrees(lats[1], Coordinate::Latitude)?;
    let long1 = parse_degrees(longs[0], Coordinate::Longitude)?;
    let long2 = parse_degrees(longs[1], Coordinate::Longitude)?;

    Ok(Some(ParsedBbox {
        min_lat: lat1.min(lat2),
        min_long: long1.min(long2),
        max_lat: lat1.max(lat2),
        max_long: long1.max(long2),
        system,
    }))
}

fn strip_label_prefix(input: &str) -> (Option<&str>, &str) {
    match LABEL_PREFIX.captures(input) {
        Some(captures) => {
            let whole = captures.get(0).map_or(0, |m| m.end());
            (captures.get(1).map(|m| m.as_str()), &input[whole..])
        }
        None => (None, input),
    }
}

fn split_values(text: &str) -> Vec<&str> {
    if !text.contains(',') {
        return text.split_whitespace().collect();
    }

    let mut values: Vec<&str> = text.split(',').map(str::trim).collect();
    while values.last().is_some_and(|v| v.is_empty()) {
        values.pop();
    }
    values
}

fn take_label<'a>(label: Option<&'a str>, mut tokens: Vec<&'a str>) -> (Option<&'a str>, Vec<&'a str>) {
    if tokens.first().is_some_and(|t| LABEL_TOKEN.is_match(t)) {
        let label = tokens.remove(0);
        return (Some(label), tokens);
    }

    (label, tokens)
}

fn find_utm_zone(tokens: &[&str]) -> Option<(usize, u8)> {
    let (index, number) = [0, 2, 1].into_iter().find_map(|i| {
        UTM_ZONE
            .captures(tokens[i])
            .and_then(|c| c.get(1))
            .map(|m| (i, m.as_str()))
    })?;

    let zone: u8 = number.parse().ok()?;
    (1..=60).contains(&zone).then_some((index, zone))
}

fn check_count(input: &str, got: usize, expected: usize) -> Result<()> {
    if got < expected {
        return Err(GeoframeError::TooFewValues {
            input: input.to_string(),
            got,
            expected,
        });
    }
    if got > expected {
        return Err(GeoframeError::TooManyValues {
            input: input.to_string(),
            got,
            expected,
        });
    }

    Ok(())
}

fn has_direction(token: &str, letters: &[char]) -> bool {
    let matches = |c: Option<char>| c.is_some_and(|c| letters.contains(&c.to_ascii_uppercase()));
    matches(token.chars().next()) || matches(token.chars().last())
}

fn parse_degrees(token: &str, coordinate: Coordinate) -> Result<f64> {
    dms_to_degrees(token).ok_or_else(|| GeoframeError::DmsParse {
        coordinate,
        text: token.to_string(),
    })
}

fn parse_planar(token: &str, coordinate: Coordinate) -> Result<f64> {
    let illegal = || GeoframeError::IllegalCoordinateCharacter {
        coordinate,
        text: token.to_string(),
    };

    if !DECIMAL.is_match(token) {
        return Err(illegal());
    }
    token.parse().map_err(|_| illegal())
}

/// Splits a range token like `52-53N` into `52N` and `53N`. Other tokens are returned as they are.
fn expand_range(token: &str) -> Vec<String> {
    for (i, pattern) in RANGES.iter().enumerate() {
        let Some(c) = pattern.captures(token) else {
            continue;
        };
        let group = |n: usize| c.get(n).map_or("", |m| m.as_str());
        let (direction, from, to) = match i {
            0 => (group(1), group(2), group(3)),
            1 => (group(2), group(1), group(3)),
            _ => (group(3), group(1), group(2)),
        };

        return vec![format!("{from}{direction}"), format!("{to}{direction}")];
    }

    vec![token.to_string()]
}
