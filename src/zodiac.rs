use std::fmt;

use serde::{Deserialize, Serialize};

pub const SIGN_SPAN: f64 = 30.0;
pub const FULL_CIRCLE: f64 = 360.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries = 0,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// The twelve signs in zodiacal order, Aries first.
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign at `index`, clamped into 0..=11.
    pub fn from_index(index: usize) -> Self {
        ALL_SIGNS[index.min(ALL_SIGNS.len() - 1)]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        let normalized_longitude = normalize_degrees(longitude);
        ZodiacSign::from_index((normalized_longitude / SIGN_SPAN).floor() as usize)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Wraps an angle into [0, 360).
///
/// A tiny negative input makes `rem_euclid` return exactly 360.0 in floating
/// point; that case folds back to 0.0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(FULL_CIRCLE);
    if wrapped >= FULL_CIRCLE {
        0.0
    } else {
        wrapped
    }
}

/// Tropical longitude minus ayanamsa, wrapped into [0, 360).
pub fn sidereal_longitude(tropical_longitude: f64, ayanamsa: f64) -> f64 {
    let mut sidereal = tropical_longitude - ayanamsa;
    if sidereal < 0.0 {
        sidereal += FULL_CIRCLE;
    }
    normalize_degrees(sidereal)
}

/// Where a sidereal longitude falls: the sign and the degree inside it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SignPlacement {
    pub sign: ZodiacSign,
    pub degree_in_sign: f64,
}

impl SignPlacement {
    pub fn from_sidereal(sidereal_longitude: f64) -> Self {
        let sign = ZodiacSign::from_longitude(sidereal_longitude);
        let degree_in_sign = normalize_degrees(sidereal_longitude) % SIGN_SPAN;
        SignPlacement {
            sign,
            degree_in_sign,
        }
    }
}

/// Degrees, minutes and seconds of an angle; seconds are rounded half-up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Dms {
    pub negative: bool,
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Dms {
    pub fn from_degrees(angle: f64) -> Self {
        let negative = angle < 0.0;
        let x = angle.abs();
        let mut degrees = x.trunc() as u32;
        let arc_minutes = (x - x.trunc()) * 60.0;
        let mut minutes = arc_minutes.trunc() as u32;
        let mut seconds = ((arc_minutes - arc_minutes.trunc()) * 60.0 + 0.5) as u32;
        if seconds == 60 {
            seconds = 0;
            minutes += 1;
        }
        if minutes == 60 {
            minutes = 0;
            degrees += 1;
        }
        Dms {
            negative,
            degrees,
            minutes,
            seconds,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}:{}:{}", self.degrees, self.minutes, self.seconds)
    }
}
