//! Registry of named reference systems.
//!
//! Every geometry is tagged with a [`ReferenceSystem`]; the registry maps short nicknames (`wgs84`, `utm-wgs84-31`)
//! to those systems and remembers which one is the default.
//!
//! Two behaviors are kept on purpose because callers rely on them:
//!
//! * registration is **first-write-wins**: registering a nickname again returns the system registered first and
//!   ignores the new parameters;
//! * the first system ever registered becomes the default, unless [`ProjectionRegistry::set_default`] says otherwise.

use crate::config::{ProjectionOptions, RegistryBuilder, RegistryConfig};
use crate::error::{GeoframeError, Result};
use geoframe_types::geo::{Datum, GeodesyEngine, GeodeticEngine};
use lazy_static::lazy_static;
use log::{debug, warn};
use parking_lot::RwLock;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Nickname of the label that asks for the best fitting UTM zone instead of a concrete system.
pub const UTM_LABEL: &str = "utm";

/// Immutable description of a registered reference system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSystem {
    nickname: String,
    definition: String,
    srid: Option<NonZeroU32>,
    display_name: Option<String>,
    geographic: bool,
    datum: Option<String>,
}

impl ReferenceSystem {
    /// Latitude/longitude on the WGS84 datum (EPSG:4326).
    pub fn wgs84() -> Self {
        Self {
            nickname: "wgs84".to_string(),
            definition: "latlong ellps=WGS84".to_string(),
            srid: NonZeroU32::new(4326),
            display_name: Some("WGS 84".to_string()),
            geographic: true,
            datum: Some(Datum::WGS84.name().to_string()),
        }
    }

    /// Unique key of the system.
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Definition text, as consumed by the geodetic engine.
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// External numeric identifier (usually an EPSG code).
    pub fn srid(&self) -> Option<NonZeroU32> {
        self.srid
    }

    /// Human readable name.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// `true` for latitude/longitude systems, `false` for planar x/y ones.
    pub fn is_geographic(&self) -> bool {
        self.geographic
    }

    /// Datum named by the definition.
    pub fn datum(&self) -> Option<&str> {
        self.datum.as_deref()
    }
}

impl Display for ReferenceSystem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.nickname)
    }
}

/// Either a nickname or an already resolved reference system.
#[derive(Debug, Clone, Copy)]
pub enum ProjectionKey<'a> {
    /// Look the system up by nickname.
    Nickname(&'a str),
    /// Use this system as is.
    System(&'a Arc<ReferenceSystem>),
}

impl<'a> ProjectionKey<'a> {
    /// Nickname the key refers to.
    pub fn nickname(&self) -> &'a str {
        match self {
            ProjectionKey::Nickname(nickname) => nickname,
            ProjectionKey::System(system) => system.nickname(),
        }
    }
}

impl<'a> From<&'a str> for ProjectionKey<'a> {
    fn from(value: &'a str) -> Self {
        Self::Nickname(value)
    }
}

impl<'a> From<&'a String> for ProjectionKey<'a> {
    fn from(value: &'a String) -> Self {
        Self::Nickname(value)
    }
}

impl<'a> From<&'a Arc<ReferenceSystem>> for ProjectionKey<'a> {
    fn from(value: &'a Arc<ReferenceSystem>) -> Self {
        Self::System(value)
    }
}

/// Where the datum of a synthesized UTM system comes from.
#[derive(Debug, Clone, Copy, Default)]
pub enum DatumSource<'a> {
    /// Datum of the default system, or WGS84 if there is none.
    #[default]
    Default,
    /// This datum.
    Named(&'a str),
    /// Datum of this system, or WGS84 if it names none.
    System(&'a ReferenceSystem),
}

#[derive(Debug, Default)]
struct RegistryState {
    systems: HashMap<String, Arc<ReferenceSystem>>,
    default: Option<Arc<ReferenceSystem>>,
}

/// Mapping from nicknames to reference systems, together with the engine that validates and transforms them.
///
/// The registry can be shared between threads: lookups take a read lock, registrations a write lock.
#[derive(Debug)]
pub struct ProjectionRegistry {
    engine: Arc<dyn GeodeticEngine>,
    state: RwLock<RegistryState>,
}

impl ProjectionRegistry {
    /// Creates an empty registry. There is no default system until something is registered.
    pub fn new(engine: Arc<dyn GeodeticEngine>) -> Self {
        Self {
            engine,
            state: RwLock::new(RegistryState::default()),
        }
    }

    /// Creates a registry with [`ReferenceSystem::wgs84`] registered as the default.
    pub fn with_wgs84(engine: Arc<dyn GeodeticEngine>) -> Self {
        let registry = Self::new(engine);
        registry.insert(Arc::new(ReferenceSystem::wgs84()));
        registry
    }

    /// Creates a registry from configuration. See [`RegistryConfig`].
    pub fn from_config(engine: Arc<dyn GeodeticEngine>, config: &RegistryConfig) -> Result<Self> {
        let builder = config
            .projections
            .iter()
            .cloned()
            .fold(RegistryBuilder::new(engine), RegistryBuilder::with_projection);

        match &config.default {
            Some(default) => builder.with_default(default.clone()).build(),
            None => builder.build(),
        }
    }

    /// Engine used to validate definitions and transform coordinates.
    pub fn engine(&self) -> &dyn GeodeticEngine {
        self.engine.as_ref()
    }

    /// Registers a reference system.
    ///
    /// If the nickname is taken, the registered system is returned and `options` are ignored. The first system ever
    /// registered becomes the default.
    pub fn register(&self, options: ProjectionOptions) -> Result<Arc<ReferenceSystem>> {
        if let Some(existing) = self.resolve(options.nickname.as_str()) {
            if existing.definition() != options.definition {
                warn!(
                    "Projection '{}' is already registered as '{}', ignoring '{}'",
                    options.nickname,
                    existing.definition(),
                    options.definition
                );
            }
            return Ok(existing);
        }

        let info = self.engine.describe(&options.definition).map_err(|err| {
            GeoframeError::InvalidDefinition {
                nickname: options.nickname.clone(),
                reason: err.to_string(),
            }
        })?;

        let system = Arc::new(ReferenceSystem {
            nickname: options.nickname,
            definition: options.definition,
            srid: options.srid,
            display_name: options.display_name,
            geographic: info.geographic,
            datum: info.datum,
        });

        Ok(self.insert(system))
    }

    fn insert(&self, system: Arc<ReferenceSystem>) -> Arc<ReferenceSystem> {
        let mut state = self.state.write();
        let registered = match state.systems.entry(system.nickname.clone()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                debug!(
                    "Registered projection '{}': {}",
                    system.nickname(),
                    system.definition()
                );
                entry.insert(system).clone()
            }
        };

        if state.default.is_none() {
            debug!("Default projection is '{}'", registered.nickname());
            state.default = Some(registered.clone());
        }

        registered
    }

    /// Looks a system up. Returns `None` if the nickname is not registered.
    pub fn resolve<'a>(&self, key: impl Into<ProjectionKey<'a>>) -> Option<Arc<ReferenceSystem>> {
        match key.into() {
            ProjectionKey::System(system) => Some(system.clone()),
            ProjectionKey::Nickname(nickname) => self.state.read().systems.get(nickname).cloned(),
        }
    }

    /// Same as [`ProjectionRegistry::resolve`], but a missing system is an error.
    pub fn require<'a>(&self, key: impl Into<ProjectionKey<'a>>) -> Result<Arc<ReferenceSystem>> {
        let key = key.into();
        self.resolve(key)
            .ok_or_else(|| GeoframeError::UnknownProjection {
                nickname: key.nickname().to_string(),
            })
    }

    /// Default system, if anything has been registered.
    pub fn default_projection(&self) -> Option<Arc<ReferenceSystem>> {
        self.state.read().default.clone()
    }

    /// Same as [`ProjectionRegistry::default_projection`], but an empty registry is an error.
    pub fn require_default(&self) -> Result<Arc<ReferenceSystem>> {
        self.default_projection()
            .ok_or(GeoframeError::NoDefaultProjection)
    }

    /// Changes the default system. The system must be registered.
    pub fn set_default<'a>(&self, key: impl Into<ProjectionKey<'a>>) -> Result<()> {
        let key = key.into();
        let mut state = self.state.write();
        let system = match key {
            ProjectionKey::System(system) => system.clone(),
            ProjectionKey::Nickname(nickname) => state
                .systems
                .get(nickname)
                .cloned()
                .ok_or_else(|| GeoframeError::UnknownProjection {
                    nickname: nickname.to_string(),
                })?,
        };

        debug!("Default projection is '{}'", system.nickname());
        state.default = Some(system);
        Ok(())
    }

    /// Nicknames of all registered systems, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut nicknames: Vec<String> = self.state.read().systems.keys().cloned().collect();
        nicknames.sort();
        nicknames
    }

    /// Returns the UTM system for `zone`, registering it on first use under the nickname `utm-<datum>-<zone>`.
    pub fn synthesize_utm(&self, base: DatumSource<'_>, zone: u8) -> Result<Arc<ReferenceSystem>> {
        let datum = match base {
            DatumSource::Named(datum) => datum.to_string(),
            DatumSource::System(system) => system
                .datum()
                .unwrap_or(Datum::WGS84.name())
                .to_string(),
            DatumSource::Default => self
                .default_projection()
                .and_then(|system| system.datum().map(str::to_string))
                .unwrap_or_else(|| Datum::WGS84.name().to_string()),
        };

        let nickname = format!("utm-{}-{zone}", datum.to_lowercase());
        if let Some(existing) = self.resolve(nickname.as_str()) {
            return Ok(existing);
        }

        debug!("Synthesizing UTM projection '{nickname}'");
        let definition = self.engine.utm_definition(zone, &datum);
        self.register(ProjectionOptions::new(nickname, definition))
    }
}

lazy_static! {
    static ref GLOBAL_REGISTRY: ProjectionRegistry =
        ProjectionRegistry::with_wgs84(Arc::new(GeodesyEngine::new()));
}

/// Process-wide registry, backed by [`GeodesyEngine`] and pre-populated with `wgs84`.
///
/// Library code takes the registry as a parameter; this instance is meant for the outermost layer of an
/// application.
pub fn global() -> &'static ProjectionRegistry {
    &GLOBAL_REGISTRY
}
