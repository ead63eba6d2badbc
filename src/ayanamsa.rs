//! Ayanamsa approximations over a calendar date.
//!
//! Lahiri and Raman are linear/quadratic fits in `b6`, Julian centuries
//! since 1900 taken from the legacy day count. The KP variants are closed
//! forms directly over day, month and year.
//!
//! `b6` assumes noon at UTC+5:30 whatever zone the chart was requested in.
//! Outside Indian Standard Time the value can therefore be off by up to a
//! day's worth of precession (about 0.00004°).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::civil_day_count;

/// Day count of 1899-12-31 in the legacy calendar, the `b6` epoch.
const B6_EPOCH: i64 = 694025;
const DAYS_PER_CENTURY: f64 = 36525.0;
/// Hardcoded zone of the `b6` fractional day.
const B6_UTC_OFFSET_HOURS: f64 = 5.5;
/// Annual precession used by the KP formulas, arcseconds per year.
const KP_PRECESSION_ARCSEC: f64 = 50.2388475;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ayanamsa {
    #[default]
    Lahiri,
    Raman,
    KpOld,
    KpNew,
    /// Krishnamurti's own reckoning, zero in the year 291.
    KpKrishnamurti,
}

impl Ayanamsa {
    pub const ALL: [Ayanamsa; 5] = [
        Ayanamsa::Lahiri,
        Ayanamsa::Raman,
        Ayanamsa::KpOld,
        Ayanamsa::KpNew,
        Ayanamsa::KpKrishnamurti,
    ];

    /// Ayanamsa in degrees for a local calendar date. Not normalized.
    pub fn value(self, day: u32, month: u32, year: i32) -> f64 {
        match self {
            Ayanamsa::Lahiri => lahiri_ayan(day, month, year),
            Ayanamsa::Raman => raman_ayan(day, month, year),
            Ayanamsa::KpOld => kpayan_old(day, month, year),
            Ayanamsa::KpNew => kpayan_new(day, month, year),
            Ayanamsa::KpKrishnamurti => kpayan_krishnamurti(day, month, year),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ayanamsa::Lahiri => "Lahiri",
            Ayanamsa::Raman => "Raman",
            Ayanamsa::KpOld => "KP Old",
            Ayanamsa::KpNew => "KP New",
            Ayanamsa::KpKrishnamurti => "KP Krishnamurti",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Ayanamsa::Lahiri => "lahiri",
            Ayanamsa::Raman => "raman",
            Ayanamsa::KpOld => "kp_old",
            Ayanamsa::KpNew => "kp_new",
            Ayanamsa::KpKrishnamurti => "kp_krishnamurti",
        }
    }
}

impl fmt::Display for Ayanamsa {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Ayanamsa {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        Ayanamsa::ALL
            .iter()
            .copied()
            .find(|a| a.key() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Ayanamsa::ALL.iter().map(|a| a.key()).collect();
                format!("unknown ayanamsa {:?}, expected one of {}", s, valid.join(", "))
            })
    }
}

/// Julian centuries since the 1900 epoch, for local noon at UTC+5:30.
pub fn calculate_b6(day: u32, month: u32, year: i32) -> f64 {
    let (h, mt, s) = (12.0, 0.0, 0.0);
    let h6 = (h + mt / 60.0 + s / 3600.0 - (12.0 + B6_UTC_OFFSET_HOURS)) / 24.0;
    ((civil_day_count(day, month, year) - B6_EPOCH) as f64 + h6) / DAYS_PER_CENTURY
}

pub fn lahiri_ayan(day: u32, month: u32, year: i32) -> f64 {
    let b6 = calculate_b6(day, month, year);
    22.460148 + 1.396042 * b6 + 0.000308 * b6 * b6
}

pub fn raman_ayan(day: u32, month: u32, year: i32) -> f64 {
    21.013972 + 1.398191 * calculate_b6(day, month, year)
}

pub fn kpayan_old(day: u32, month: u32, year: i32) -> f64 {
    (year as f64 + (month as f64 * 30.0 + day as f64) / 365.0 - 297.3204723) * KP_PRECESSION_ARCSEC
        / 3600.0
}

pub fn kpayan_new(day: u32, month: u32, year: i32) -> f64 {
    let years = f64::from(year) - 1900.0;
    let on_first_january =
        22.0 + (1335.0 + years * KP_PRECESSION_ARCSEC) / 3600.0 + years * years * 0.000111 / 3600.0;
    let days_after_first_january = ((month as f64 - 1.0) * 30.0 + (day as f64 - 1.0)) / 3600.0;
    let correction_for_days =
        days_after_first_january / 365.0 * (KP_PRECESSION_ARCSEC + 0.000111 * 20.0);
    on_first_january + correction_for_days
}

pub fn kpayan_krishnamurti(day: u32, month: u32, year: i32) -> f64 {
    let per_day = KP_PRECESSION_ARCSEC / 365.25;
    let total_days = (f64::from(year) - 291.0) * 365.25 + month as f64 * 30.0 + day as f64 - 114.0;
    per_day * total_days / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_b6_reference_date() {
        // 739750 - 694025 days, less the 5.5h shift
        let expected = (45725.0 - 5.5 / 24.0) / 36525.0;
        assert_abs_diff_eq!(calculate_b6(10, 3, 2025), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_lahiri_2025() {
        let value = Ayanamsa::Lahiri.value(10, 3, 2025);
        assert_abs_diff_eq!(value, 24.2083, epsilon = 1e-3);
    }

    #[test]
    fn test_lahiri_2000() {
        // 15 Aug 2000 sample chart
        assert_abs_diff_eq!(lahiri_ayan(15, 8, 2000), 23.8652, epsilon = 1e-3);
    }

    #[test]
    fn test_lahiri_increases_with_year() {
        let mut previous = lahiri_ayan(21, 6, 1700);
        for year in 1701..=2300 {
            let current = lahiri_ayan(21, 6, year);
            assert!(current > previous, "ayanamsa fell at {}", year);
            previous = current;
        }
    }

    #[test]
    fn test_variants_agree_within_two_degrees_today() {
        let lahiri = Ayanamsa::Lahiri.value(1, 1, 2020);
        for ayanamsa in Ayanamsa::ALL {
            let value = ayanamsa.value(1, 1, 2020);
            assert!(
                (value - lahiri).abs() < 2.0,
                "{} = {} strays from Lahiri {}",
                ayanamsa,
                value,
                lahiri
            );
        }
    }

    #[test]
    fn test_raman_below_lahiri() {
        assert!(raman_ayan(10, 3, 2025) < lahiri_ayan(10, 3, 2025));
    }

    #[test]
    fn test_kp_formulas() {
        assert_abs_diff_eq!(
            kpayan_old(10, 3, 2025),
            (2025.0 + 310.0 / 365.0 - 297.3204723) * 50.2388475 / 3600.0,
            epsilon = 1e-12
        );
        // on 1 Jan the KP-new day correction vanishes
        let years = 125.0;
        let expected = 22.0 + (1335.0 + years * 50.2388475) / 3600.0 + years * years * 0.000111 / 3600.0;
        assert_abs_diff_eq!(kpayan_new(1, 1, 2025), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(
            kpayan_krishnamurti(10, 3, 2025),
            50.2388475 / 365.25 * ((2025.0 - 291.0) * 365.25 + 90.0 + 10.0 - 114.0) / 3600.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_extreme_years_stay_finite() {
        for year in [i32::MIN, i32::MAX] {
            for ayanamsa in Ayanamsa::ALL {
                assert!(ayanamsa.value(1, 1, year).is_finite(), "{} in {}", ayanamsa, year);
            }
        }
    }

    #[test]
    fn test_default_is_lahiri() {
        assert_eq!(Ayanamsa::default(), Ayanamsa::Lahiri);
    }

    #[test]
    fn test_parse() {
        assert_eq!("lahiri".parse::<Ayanamsa>().unwrap(), Ayanamsa::Lahiri);
        assert_eq!("KP-New".parse::<Ayanamsa>().unwrap(), Ayanamsa::KpNew);
        assert_eq!("kp krishnamurti".parse::<Ayanamsa>().unwrap(), Ayanamsa::KpKrishnamurti);
        assert!("fagan_bradley".parse::<Ayanamsa>().is_err());
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&Ayanamsa::KpOld).unwrap(), "\"kp_old\"");
        let parsed: Ayanamsa = serde_json::from_str("\"raman\"").unwrap();
        assert_eq!(parsed, Ayanamsa::Raman);
    }
}
