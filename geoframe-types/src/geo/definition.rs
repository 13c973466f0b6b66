use crate::error::GeoframeTypesError;
use crate::geo::datum::Datum;
use std::fmt::{Display, Formatter};

const GEOGRAPHIC_OPERATORS: [&str; 5] = ["latlong", "longlat", "latlon", "lonlat", "geo"];

// proj4 parameters that describe the system but are not understood by the operators themselves.
const DESCRIPTIVE_PARAMS: [&str; 5] = ["datum", "units", "no_defs", "type", "towgs84"];

/// Parsed reference-system definition.
///
/// Definitions are a single operator followed by `key=value` parameters and bare flags:
///
/// ```
/// use geoframe_types::geo::ProjectionDefinition;
///
/// let def = ProjectionDefinition::parse("utm zone=31 ellps=WGS84").unwrap();
/// assert_eq!(def.operator(), "utm");
/// assert_eq!(def.param("zone"), Some("31"));
///
/// let proj4 = ProjectionDefinition::parse("+proj=utm +zone=31 +datum=WGS84 +units=m +no_defs").unwrap();
/// assert_eq!(proj4.operator(), "utm");
/// assert_eq!(proj4.datum(), Some("WGS84"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDefinition {
    operator: String,
    params: Vec<(String, Option<String>)>,
}

impl ProjectionDefinition {
    /// Parses definition text, in either the plain or the proj4 (`+proj=...`) spelling.
    pub fn parse(text: &str) -> Result<Self, GeoframeTypesError> {
        let invalid = |reason: &str| GeoframeTypesError::InvalidDefinition {
            definition: text.to_string(),
            reason: reason.to_string(),
        };

        let mut operator = None;
        let mut params = Vec::new();

        for token in text.split_whitespace() {
            if token == "|" {
                return Err(invalid("pipelines are not supported"));
            }

            let token = token.trim_start_matches('+');
            match token.split_once('=') {
                Some(("proj", value)) | Some(("", value)) if operator.is_none() => {
                    operator = Some(value.to_string())
                }
                Some((key, value)) => params.push((key.to_string(), Some(value.to_string()))),
                None if operator.is_none() => operator = Some(token.to_string()),
                None => params.push((token.to_string(), None)),
            }
        }

        match operator {
            Some(operator) if !operator.is_empty() => Ok(Self { operator, params }),
            _ => Err(invalid("no operator given")),
        }
    }

    /// Name of the operator, e.g. `utm` or `latlong`.
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Value of a `key=value` parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Whether the definition describes angular latitude/longitude coordinates.
    pub fn is_geographic(&self) -> bool {
        GEOGRAPHIC_OPERATORS
            .iter()
            .any(|op| op.eq_ignore_ascii_case(&self.operator))
    }

    /// Datum of the definition: the `datum` parameter, or the `ellps` parameter if there is no datum.
    pub fn datum(&self) -> Option<&str> {
        self.param("datum").or_else(|| self.param("ellps"))
    }

    /// Operator text in the form the `geodesy` crate expects.
    pub fn operator_text(&self) -> String {
        let mut text = self.operator.clone();
        let mut has_ellps = false;

        for (key, value) in &self.params {
            if DESCRIPTIVE_PARAMS.contains(&key.as_str()) {
                continue;
            }
            has_ellps |= key == "ellps";
            text.push(' ');
            text.push_str(key);
            if let Some(value) = value {
                text.push('=');
                text.push_str(value);
            }
        }

        if !has_ellps {
            if let Some(datum) = self.param("datum") {
                text.push_str(" ellps=");
                text.push_str(ellipsoid_for_datum(datum));
            }
        }

        text
    }
}

impl Display for ProjectionDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operator)?;
        for (key, value) in &self.params {
            match value {
                Some(value) => write!(f, " {key}={value}")?,
                None => write!(f, " {key}")?,
            }
        }
        Ok(())
    }
}

fn ellipsoid_for_datum(datum: &str) -> &str {
    if datum.eq_ignore_ascii_case("NAD83") {
        Datum::GRS80.name()
    } else if datum.eq_ignore_ascii_case("NAD27") {
        Datum::CLARKE_1866.name()
    } else {
        Datum::named(datum).map(|d| d.name()).unwrap_or(datum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn plain_definition() {
        let def = ProjectionDefinition::parse("utm zone=32 south ellps=intl").expect("valid");
        assert_eq!(def.operator(), "utm");
        assert_eq!(def.param("zone"), Some("32"));
        assert_eq!(def.param("south"), None);
        assert_eq!(def.datum(), Some("intl"));
        assert!(!def.is_geographic());
        assert_eq!(def.operator_text(), "utm zone=32 south ellps=intl");
        assert_eq!(def.to_string(), "utm zone=32 south ellps=intl");
    }

    #[test]
    fn proj4_definition() {
        let def = ProjectionDefinition::parse("+proj=latlong +datum=wgs84 +no_defs").expect("valid");
        assert_eq!(def.operator(), "latlong");
        assert!(def.is_geographic());
        assert_eq!(def.datum(), Some("wgs84"));
        assert_eq!(def.operator_text(), "latlong ellps=WGS84");
    }

    #[test]
    fn missing_operator() {
        assert_matches!(
            ProjectionDefinition::parse("   "),
            Err(GeoframeTypesError::InvalidDefinition { .. })
        );
        assert_matches!(
            ProjectionDefinition::parse("utm zone=31 | helmert"),
            Err(GeoframeTypesError::InvalidDefinition { .. })
        );
    }
}
