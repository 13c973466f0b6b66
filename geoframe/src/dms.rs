//! Conversion between decimal degrees and degree/minute/second text.
//!
//! Text is produced in the compact form `52d19'16.680"N`. Parsing is more forgiving and accepts the `°`, `'`, `"`
//! glyphs, the `d`, `m`, `s` letters or nothing at all between the components.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DMS: Regex = Regex::new(
        r#"^([+-]?\d+(?:\.\d+)?)\s*[°dD]?\s*(?:(\d+(?:\.\d+)?)\s*['mM’′]?)?\s*(?:(\d+(?:\.\d+)?)\s*["sS”″]?)?\s*$"#
    )
    .expect("valid DMS pattern");
}

/// Absorbs binary rounding when truncating minutes and seconds.
const EPSILON: f64 = 0.00001;

/// Brings `value` into `(-180, 180]`. Exactly `180` stays `180`.
pub(crate) fn normalize(mut value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    while value > 180.0 {
        value -= 360.0;
    }
    while value <= -180.0 {
        value += 360.0;
    }

    value
}

/// Formats an angle as degrees, minutes and seconds.
///
/// `positive` is appended to values `>= 0`, `negative` to the others. Components are dropped from the end while they
/// are zero, so `5.5` becomes `5d30'E` and `5.0` becomes `5E`. Seconds get three decimals when they have a fraction.
/// With `include_seconds` set to `false` output stops at whole minutes.
///
/// ```
/// use geoframe::dms::degrees_to_dms;
///
/// assert_eq!(degrees_to_dms(52.3213, "N", "S", true), "52d19'16.680\"N");
/// assert_eq!(degrees_to_dms(-5.5, "E", "W", true), "5d30'W");
/// assert_eq!(degrees_to_dms(181.0, "E", "W", true), "179W");
/// ```
pub fn degrees_to_dms(value: f64, positive: &str, negative: &str, include_seconds: bool) -> String {
    let value = normalize(value);
    let (suffix, value) = if value < 0.0 {
        (negative, -value)
    } else {
        (positive, value)
    };

    let degrees = value.trunc();
    let fraction = (value - degrees) * 60.0;
    let minutes = (fraction + EPSILON).trunc();

    if !include_seconds {
        return if minutes != 0.0 {
            format!("{degrees}d{minutes:02}'{suffix}")
        } else {
            format!("{degrees}{suffix}")
        };
    }

    let mut seconds = (fraction - minutes) * 60.0;
    if seconds < 0.001 {
        seconds = 0.0;
    }
    let whole_seconds = (seconds + EPSILON).trunc();
    let millis = ((seconds - whole_seconds) * 1000.0 + 0.0001).trunc();

    if millis != 0.0 {
        format!("{degrees}d{minutes:02}'{whole_seconds:02}.{millis:03}\"{suffix}")
    } else if seconds != 0.0 {
        format!("{degrees}d{minutes:02}'{whole_seconds:02}\"{suffix}")
    } else if minutes != 0.0 {
        format!("{degrees}d{minutes:02}'{suffix}")
    } else {
        format!("{degrees}{suffix}")
    }
}

/// Same as [`degrees_to_dms`] without seconds.
pub fn degrees_to_dm(value: f64, positive: &str, negative: &str) -> String {
    degrees_to_dms(value, positive, negative, false)
}

/// Latitude as DMS text with an `N`/`S` suffix.
pub fn lat_dms(lat: f64) -> String {
    degrees_to_dms(lat, "N", "S", true)
}

/// Longitude as DMS text with an `E`/`W` suffix.
pub fn long_dms(long: f64) -> String {
    degrees_to_dms(long, "E", "W", true)
}

/// Parses DMS text into decimal degrees.
///
/// The text may start or end with one of the direction letters `N`, `E`, `S`, `W` (any case); a trailing letter is
/// looked for first. `S` and `W` as well as a leading minus make the result negative. Returns `None` when the
/// remaining text is not `degrees [minutes [seconds]]`, each optionally followed by its marker.
///
/// Note that a trailing `s` is read as "south", not as a seconds marker.
///
/// ```
/// use geoframe::dms::dms_to_degrees;
///
/// assert_eq!(dms_to_degrees("5d30'W"), Some(-5.5));
/// assert_eq!(dms_to_degrees("N 52 30"), Some(52.5));
/// assert_eq!(dms_to_degrees("east"), None);
/// ```
pub fn dms_to_degrees(text: &str) -> Option<f64> {
    let text = text.trim();
    let (direction, rest) = split_direction(text);

    let captures = DMS.captures(rest)?;
    let degrees: f64 = captures.get(1)?.as_str().parse().ok()?;
    let component = |i: usize| -> Option<f64> {
        match captures.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0.0),
        }
    };
    let minutes = component(2)?;
    let seconds = component(3)?;

    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    let negative = degrees.is_sign_negative() || matches!(direction, Some('S') | Some('W'));

    Some(if negative { -magnitude } else { magnitude })
}

/// Strips a direction letter from the end, or else from the start, of the text.
pub(crate) fn split_direction(text: &str) -> (Option<char>, &str) {
    let is_direction = |c: char| matches!(c.to_ascii_uppercase(), 'N' | 'E' | 'S' | 'W');

    if let Some(last) = text.chars().last() {
        if is_direction(last) {
            return (
                Some(last.to_ascii_uppercase()),
                text[..text.len() - last.len_utf8()].trim_end(),
            );
        }
    }

    if let Some(first) = text.chars().next() {
        if is_direction(first) {
            return (
                Some(first.to_ascii_uppercase()),
                text[first.len_utf8()..].trim_start(),
            );
        }
    }

    (None, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn format_drops_zero_components() {
        assert_eq!(degrees_to_dms(5.0, "E", "W", true), "5E");
        assert_eq!(degrees_to_dms(5.5, "E", "W", true), "5d30'E");
        assert_eq!(degrees_to_dms(5.51, "E", "W", true), "5d30'36\"E");
        assert_eq!(degrees_to_dms(0.0, "N", "S", true), "0N");
        assert_eq!(degrees_to_dms(-0.25, "N", "S", true), "0d15'S");
    }

    #[test]
    fn format_normalizes_range() {
        assert_eq!(degrees_to_dms(180.0, "E", "W", true), "180E");
        assert_eq!(degrees_to_dms(-180.0, "E", "W", true), "180E");
        assert_eq!(degrees_to_dms(540.0, "E", "W", true), "180E");
        assert_eq!(degrees_to_dms(-190.0, "E", "W", true), "170E");
    }

    #[test]
    fn format_minutes_only() {
        assert_eq!(degrees_to_dm(52.3213, "N", "S"), "52d19'N");
        assert_eq!(degrees_to_dm(52.001, "N", "S"), "52N");
        assert_eq!(lat_dms(-33.5), "33d30'S");
        assert_eq!(long_dms(151.25), "151d15'E");
    }

    #[test]
    fn parse_variants() {
        assert_eq!(dms_to_degrees("52"), Some(52.0));
        assert_eq!(dms_to_degrees("-52.5"), Some(-52.5));
        assert_eq!(dms_to_degrees("52.5N"), Some(52.5));
        assert_eq!(dms_to_degrees("52.5 s"), Some(-52.5));
        assert_eq!(dms_to_degrees("W 5"), Some(-5.0));
        assert_eq!(dms_to_degrees("5°30′E"), Some(5.5));
        assert_eq!(dms_to_degrees("5d30m"), Some(5.5));
        assert_abs_diff_eq!(dms_to_degrees("5 30 36").expect("valid"), 5.51, epsilon = 1e-12);
        assert_abs_diff_eq!(
            dms_to_degrees("52d19'16.680\"N").expect("valid"),
            52.3213,
            epsilon = 1e-9
        );
    }

    #[test]
    fn parse_failures() {
        assert_eq!(dms_to_degrees(""), None);
        assert_eq!(dms_to_degrees("N"), None);
        assert_eq!(dms_to_degrees("abc"), None);
        assert_eq!(dms_to_degrees("5x"), None);
        assert_eq!(dms_to_degrees("1 2 3 4"), None);
    }

    #[test]
    fn round_trip_within_a_second() {
        let mut value = -179.987_654;
        while value <= 180.0 {
            let text = degrees_to_dms(value, "E", "W", true);
            let back = dms_to_degrees(&text).expect("formatted text parses");
            assert_abs_diff_eq!(back, value, epsilon = 1.0 / 3600.0);
            value += 7.654_321;
        }
    }
}
