//! Sidereal (Vedic) positions of the Sun, Moon, planets and lunar nodes for
//! a civil date, time and timezone.
//!
//! The pipeline runs local time to UT, UT to Julian Day, then an ayanamsa
//! correction applied to tropical longitudes from an [`Ephemeris`].

// ---------------------------
// ## Modules
// ---------------------------

pub mod ayanamsa;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod publish;
pub mod time;
pub mod zodiac;

#[cfg(feature = "swiss-ephemeris")]
pub mod swisseph;

#[cfg(feature = "http-server")]
pub mod http;

// ---------------------------
// ## Re-exports
// ---------------------------

pub use ayanamsa::Ayanamsa;
pub use chart::{calculate_chart, calculate_planet_positions, BodyPosition, ChartRequest, ChartResult};
pub use config::Settings;
pub use ephemeris::{CelestialBody, Ephemeris, EphemerisBody, EphemerisConfig};
pub use error::{CalculationResult, ChartError};
pub use publish::write_chart_json;
pub use time::{JulianDay, UtTime};
pub use zodiac::{Dms, ZodiacSign};

#[cfg(feature = "swiss-ephemeris")]
pub use crate::swisseph::SwissEph;
