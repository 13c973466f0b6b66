/// Reference ellipsoid a reference system is defined against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datum {
    name: &'static str,
}

impl Datum {
    /// World Geodetic System 1984.
    pub const WGS84: Self = Datum { name: "WGS84" };

    /// Geodetic Reference System 1980.
    pub const GRS80: Self = Datum { name: "GRS80" };

    /// World Geodetic System 1972.
    pub const WGS72: Self = Datum { name: "WGS72" };

    /// International 1924 (Hayford).
    pub const INTL: Self = Datum { name: "intl" };

    /// Bessel 1841.
    pub const BESSEL: Self = Datum { name: "bessel" };

    /// Clarke 1866.
    pub const CLARKE_1866: Self = Datum { name: "clrk66" };

    /// Airy 1830.
    pub const AIRY: Self = Datum { name: "airy" };

    const KNOWN: [Datum; 7] = [
        Self::WGS84,
        Self::GRS80,
        Self::WGS72,
        Self::INTL,
        Self::BESSEL,
        Self::CLARKE_1866,
        Self::AIRY,
    ];

    /// Looks a datum up by name, ignoring case.
    pub fn named(name: &str) -> Option<Self> {
        Self::KNOWN
            .into_iter()
            .find(|datum| datum.name.eq_ignore_ascii_case(name))
    }

    /// Canonical name of the datum, as the engine spells it.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
