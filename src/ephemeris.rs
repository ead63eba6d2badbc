use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::CalculationResult;
use crate::time::JulianDay;

/// Bodies the ephemeris is asked about, numbered as Swiss Ephemeris numbers them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum EphemerisBody {
    Sun = 0,
    Moon = 1,
    Mercury = 2,
    Venus = 3,
    Mars = 4,
    Jupiter = 5,
    Saturn = 6,
    Uranus = 7,
    Neptune = 8,
    Pluto = 9,
    MeanNode = 10,
}

/// Entries of a chart. Rahu and Ketu both come from the mean lunar node.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Rahu,
    Ketu,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 12] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::Rahu,
        CelestialBody::Ketu,
    ];

    /// Everything except the two nodes, in chart order.
    pub const PLANETS: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    pub fn iter() -> impl Iterator<Item = CelestialBody> {
        CelestialBody::ALL.iter().copied()
    }

    /// Key used in the published JSON.
    pub fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::Rahu => "Rahu (North Node)",
            CelestialBody::Ketu => "Ketu (South Node)",
        }
    }

    pub fn ephemeris_body(self) -> EphemerisBody {
        match self {
            CelestialBody::Sun => EphemerisBody::Sun,
            CelestialBody::Moon => EphemerisBody::Moon,
            CelestialBody::Mercury => EphemerisBody::Mercury,
            CelestialBody::Venus => EphemerisBody::Venus,
            CelestialBody::Mars => EphemerisBody::Mars,
            CelestialBody::Jupiter => EphemerisBody::Jupiter,
            CelestialBody::Saturn => EphemerisBody::Saturn,
            CelestialBody::Uranus => EphemerisBody::Uranus,
            CelestialBody::Neptune => EphemerisBody::Neptune,
            CelestialBody::Pluto => EphemerisBody::Pluto,
            CelestialBody::Rahu | CelestialBody::Ketu => EphemerisBody::MeanNode,
        }
    }
}

/// Source of tropical ecliptic longitudes.
///
/// Implementations must be deterministic for a given `(julian_day, body)`.
pub trait Ephemeris: Send + Sync {
    /// Tropical ecliptic longitude of `body` at `julian_day` (UT), in degrees.
    fn tropical_longitude(&self, julian_day: JulianDay, body: EphemerisBody) -> CalculationResult<f64>;
}

/// Where the ephemeris reads its data files from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemerisConfig {
    pub ephe_path: PathBuf,
}

impl EphemerisConfig {
    pub fn new(ephe_path: impl Into<PathBuf>) -> Self {
        EphemerisConfig {
            ephe_path: ephe_path.into(),
        }
    }
}

impl Default for EphemerisConfig {
    fn default() -> Self {
        EphemerisConfig::new("./ephe")
    }
}
