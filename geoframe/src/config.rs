//! Configuration of reference systems.
//!
//! A registry can be set up in code, with [`RegistryBuilder`], or from a JSON document:
//!
//! ```json
//! {
//!     "projections": [
//!         { "nickname": "wgs84", "definition": "latlong ellps=WGS84", "srid": 4326 },
//!         { "nickname": "rd", "definition": "tmerc lat_0=52.15616055555555 lon_0=5.38763888888889 k_0=0.9999079 x_0=155000 y_0=463000 ellps=bessel" }
//!     ],
//!     "default": "wgs84"
//! }
//! ```

use crate::error::Result;
use crate::registry::ProjectionRegistry;
use geoframe_types::geo::GeodeticEngine;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Parameters of a reference system to register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionOptions {
    /// Unique key of the system.
    pub nickname: String,
    /// Definition understood by the geodetic engine.
    pub definition: String,
    /// External numeric identifier. Zero in a configuration file means "none".
    #[serde(default, deserialize_with = "deserialize_srid")]
    pub srid: Option<NonZeroU32>,
    /// Human readable name.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ProjectionOptions {
    /// Creates options with the required parameters.
    pub fn new(nickname: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            nickname: nickname.into(),
            definition: definition.into(),
            srid: None,
            display_name: None,
        }
    }

    /// Sets the external identifier. `0` clears it.
    pub fn with_srid(mut self, srid: u32) -> Self {
        self.srid = NonZeroU32::new(srid);
        self
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

fn deserialize_srid<'de, D>(deserializer: D) -> std::result::Result<Option<NonZeroU32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let srid: Option<u32> = Option::deserialize(deserializer)?;
    Ok(srid.and_then(NonZeroU32::new))
}

/// Serializable description of a whole registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Systems to register, in order. The first one becomes the default unless `default` is set.
    #[serde(default)]
    pub projections: Vec<ProjectionOptions>,
    /// Nickname of the default system.
    #[serde(default)]
    pub default: Option<String>,
}

impl RegistryConfig {
    /// Parses a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Step-by-step construction of a [`ProjectionRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    engine: Arc<dyn GeodeticEngine>,
    projections: Vec<ProjectionOptions>,
    default: Option<String>,
}

impl RegistryBuilder {
    /// Creates a builder for a registry using the given engine.
    pub fn new(engine: Arc<dyn GeodeticEngine>) -> Self {
        Self {
            engine,
            projections: Vec::new(),
            default: None,
        }
    }

    /// Adds a system to register.
    pub fn with_projection(mut self, options: ProjectionOptions) -> Self {
        self.projections.push(options);
        self
    }

    /// Selects the default system by nickname.
    pub fn with_default(mut self, nickname: impl Into<String>) -> Self {
        self.default = Some(nickname.into());
        self
    }

    /// Registers everything and returns the registry.
    ///
    /// Fails on the first invalid definition, or if the default names a system that was not registered.
    pub fn build(self) -> Result<ProjectionRegistry> {
        let registry = ProjectionRegistry::new(self.engine);
        for options in self.projections {
            registry.register(options)?;
        }

        if let Some(default) = &self.default {
            registry.set_default(default)?;
        }

        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoframeError;
    use assert_matches::assert_matches;
    use geoframe_types::geo::GeodesyEngine;

    const CONFIG: &str = r#"{
        "projections": [
            { "nickname": "utm31", "definition": "utm zone=31 ellps=WGS84", "srid": 0 },
            { "nickname": "wgs84", "definition": "latlong ellps=WGS84", "srid": 4326, "display_name": "WGS 84" }
        ],
        "default": "wgs84"
    }"#;

    #[test]
    fn parse_config() {
        let config = RegistryConfig::from_json(CONFIG).expect("valid json");
        assert_eq!(config.projections.len(), 2);
        assert_eq!(config.projections[0].srid, None);
        assert_eq!(config.projections[1].srid, NonZeroU32::new(4326));
        assert_eq!(config.projections[1].display_name.as_deref(), Some("WGS 84"));
        assert_eq!(config.default.as_deref(), Some("wgs84"));
    }

    #[test]
    fn registry_from_config() {
        let config = RegistryConfig::from_json(CONFIG).expect("valid json");
        let registry =
            ProjectionRegistry::from_config(Arc::new(GeodesyEngine::new()), &config).expect("valid");

        assert_eq!(registry.list(), vec!["utm31", "wgs84"]);
        assert_eq!(
            registry.default_projection().map(|s| s.nickname().to_string()),
            Some("wgs84".to_string())
        );
    }

    #[test]
    fn invalid_json() {
        assert_matches!(
            RegistryConfig::from_json("{ projections: "),
            Err(GeoframeError::Config(_))
        );
    }

    #[test]
    fn unknown_default() {
        let result = RegistryBuilder::new(Arc::new(GeodesyEngine::new()))
            .with_projection(ProjectionOptions::new("wgs84", "latlong ellps=WGS84"))
            .with_default("missing")
            .build();
        assert_matches!(result, Err(GeoframeError::UnknownProjection { .. }));
    }

    #[test]
    fn srid_zero_is_none() {
        assert_eq!(ProjectionOptions::new("a", "latlong").with_srid(0).srid, None);
    }
}
