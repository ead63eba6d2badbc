//! Civil time normalization and the two Julian Day pipelines.
//!
//! The ephemeris is addressed with a proper astronomical Julian Day computed
//! from Universal Time. The ayanamsa approximations instead run on a legacy
//! integer day count taken from the *local* calendar date; the two are kept
//! apart on purpose.

use std::fmt;

use chrono::{DateTime, Datelike, LocalResult, NaiveDate, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use log::debug;

use crate::error::{CalculationResult, ChartError};

pub type JulianDay = f64;

const UT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A civil date/time at UTC offset zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtTime(DateTime<Utc>);

impl UtTime {
    pub fn from_utc(date_time: DateTime<Utc>) -> Self {
        UtTime(date_time)
    }

    pub fn date_time(&self) -> DateTime<Utc> {
        self.0
    }

    /// Julian Day in the convention the ephemeris expects.
    pub fn julian_day(&self) -> JulianDay {
        let dt = self.0;
        let hour = dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;
        julian_day(dt.year(), dt.month(), dt.day(), hour)
    }
}

impl fmt::Display for UtTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(UT_FORMAT))
    }
}

/// Splits a fractional hour into whole hours and rounded minutes.
///
/// The minute may come out as 60 (e.g. `11.9999`); callers add it as a
/// duration so it carries into the next hour.
pub fn split_hour(hour: f64) -> CalculationResult<(u32, u32)> {
    if !hour.is_finite() || !(0.0..24.0).contains(&hour) {
        return Err(ChartError::InvalidDate(format!(
            "hour {} is outside [0, 24)",
            hour
        )));
    }
    let whole = hour.trunc();
    let minute = ((hour - whole) * 60.0).round();
    Ok((whole as u32, minute as u32))
}

/// Resolves an IANA zone name against the bundled timezone database.
pub fn parse_timezone(timezone: &str) -> CalculationResult<Tz> {
    timezone
        .parse::<Tz>()
        .map_err(|_| ChartError::InvalidTimezone(timezone.to_string()))
}

/// Converts a local civil date/time in `timezone` to Universal Time.
///
/// The offset is the one in force on that date, so daylight saving is
/// honoured. Local times skipped by a DST gap do not exist and are rejected;
/// ambiguous times (DST fall-back) take the standard-time reading.
pub fn to_universal_time(
    year: i32,
    month: u32,
    day: u32,
    hour: f64,
    timezone: &str,
) -> CalculationResult<UtTime> {
    let tz = parse_timezone(timezone)?;
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ChartError::InvalidDate(format!(
            "{:04}-{:02}-{:02} is not a calendar date",
            year, month, day
        ))
    })?;
    let (whole_hour, minute) = split_hour(hour)?;
    let local = date
        .and_hms_opt(whole_hour, 0, 0)
        .and_then(|dt| dt.checked_add_signed(TimeDelta::minutes(i64::from(minute))))
        .ok_or_else(|| {
            ChartError::InvalidDate(format!(
                "{} {:02}:{:02} is outside the supported range",
                date, whole_hour, minute
            ))
        })?;

    let localized = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            return Err(ChartError::InvalidDate(format!(
                "{} does not exist in {}",
                local, timezone
            )))
        }
    };
    let ut = localized.with_timezone(&Utc);
    debug!("local_tz {} local_time {} ut_time {}", tz, localized, ut);

    Ok(UtTime(ut))
}

/// Gregorian calendar date + decimal hour to Julian Day.
///
/// Same arithmetic as the Swiss Ephemeris `julday` with the Gregorian flag,
/// so a Julian Day computed here can be handed straight to `calc_ut`.
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> JulianDay {
    let mut u = year as f64;
    if month < 3 {
        u -= 1.0;
    }
    let u0 = u + 4712.0;
    let mut u1 = month as f64 + 1.0;
    if u1 < 4.0 {
        u1 += 12.0;
    }
    let mut jd = (u0 * 365.25).floor() + (30.6 * u1 + 0.000001).floor() + day as f64
        + hour / 24.0
        - 63.5;

    let mut u2 = (u.abs() / 100.0).floor() - (u.abs() / 400.0).floor();
    if u < 0.0 {
        u2 = -u2;
    }
    jd = jd - u2 + 2.0;
    if u < 0.0 && u / 100.0 == (u / 100.0).floor() && u / 400.0 != (u / 400.0).floor() {
        jd -= 1.0;
    }
    jd
}

/// Legacy whole-day count used by the ayanamsa approximations.
///
/// January and February count as months 13 and 14 of the previous year.
/// Divisions floor toward negative infinity, and `30.6 * (M + 1)` is
/// truncated.
pub fn civil_day_count(day: u32, month: u32, year: i32) -> i64 {
    let mut y = i64::from(year);
    let mut m = i64::from(month);
    if m < 3 {
        m += 12;
        y -= 1;
    }
    let a = y.div_euclid(100);
    let l = (30.6 * (m + 1) as f64) as i64;
    365 * y + y.div_euclid(4) + l + 2 - a + a.div_euclid(4) + i64::from(day)
}
