//! The chart pipeline: civil time to UT, Julian Day, ayanamsa, one
//! ephemeris lookup per body, then sign and degree.

use log::debug;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::ayanamsa::Ayanamsa;
use crate::ephemeris::{CelestialBody, Ephemeris, EphemerisBody};
use crate::error::CalculationResult;
use crate::time::{to_universal_time, JulianDay, UtTime};
use crate::zodiac::{normalize_degrees, sidereal_longitude, Dms, SignPlacement, ZodiacSign};

/// Output precision of published degrees.
const DEGREE_DECIMALS: i32 = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Fractional local hour, e.g. 12.5 for 12:30.
    pub hour: f64,
    pub timezone: String,
    /// Formula for the sidereal correction; Lahiri when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ayanamsa: Option<Ayanamsa>,
}

impl ChartRequest {
    pub fn new(year: i32, month: u32, day: u32, hour: f64, timezone: impl Into<String>) -> Self {
        ChartRequest {
            year,
            month,
            day,
            hour,
            timezone: timezone.into(),
            ayanamsa: None,
        }
    }

    pub fn with_ayanamsa(mut self, ayanamsa: Ayanamsa) -> Self {
        self.ayanamsa = Some(ayanamsa);
        self
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BodyPosition {
    pub sign: ZodiacSign,
    #[serde(rename = "degree", serialize_with = "serialize_degrees")]
    pub degree_in_sign: f64,
    #[serde(rename = "tropical", serialize_with = "serialize_degrees")]
    pub tropical_longitude: f64,
    #[serde(rename = "sidereal", serialize_with = "serialize_degrees")]
    pub sidereal_longitude: f64,
}

impl BodyPosition {
    pub fn from_tropical(tropical_longitude: f64, ayanamsa: f64) -> Self {
        let sidereal_longitude = sidereal_longitude(tropical_longitude, ayanamsa);
        let placement = SignPlacement::from_sidereal(sidereal_longitude);
        BodyPosition {
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            tropical_longitude,
            sidereal_longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartResult {
    pub julian_day: JulianDay,
    pub ut_time: UtTime,
    pub ayanamsa: Ayanamsa,
    pub ayanamsa_value: f64,
    /// Lahiri value for the same date, published whatever `ayanamsa` is.
    pub lahiri_ayanamsa: f64,
    /// In catalog order.
    pub positions: Vec<(CelestialBody, BodyPosition)>,
}

impl ChartResult {
    pub fn position(&self, body: CelestialBody) -> Option<&BodyPosition> {
        self.positions
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, position)| position)
    }
}

impl Serialize for ChartResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ChartResult", 7)?;
        state.serialize_field("julian_date", &self.julian_day)?;
        state.serialize_field("ut_time", &self.ut_time.to_string())?;
        state.serialize_field("ayanamsa_system", self.ayanamsa.name())?;
        state.serialize_field("ayanamsa", &round_degrees(self.ayanamsa_value))?;
        state.serialize_field("lahiri_ayanamsa", &round_degrees(self.lahiri_ayanamsa))?;
        state.serialize_field("ayanamsa_dms", &Dms::from_degrees(self.ayanamsa_value).to_string())?;
        state.serialize_field("planet_positions", &PlanetPositions(&self.positions))?;
        state.end()
    }
}

struct PlanetPositions<'a>(&'a [(CelestialBody, BodyPosition)]);

impl Serialize for PlanetPositions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (body, position) in self.0 {
            map.serialize_entry(body.name(), position)?;
        }
        map.end()
    }
}

fn round_degrees(value: f64) -> f64 {
    let scale = 10f64.powi(DEGREE_DECIMALS);
    (value * scale).round() / scale
}

fn serialize_degrees<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_degrees(*value))
}

/// South node: the mean node turned half a circle.
pub fn ketu_longitude(rahu_longitude: f64) -> f64 {
    normalize_degrees(rahu_longitude + 180.0)
}

/// Runs the whole pipeline for one request. Either all twelve positions are
/// produced or the first error is returned.
pub fn calculate_chart<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    request: &ChartRequest,
) -> CalculationResult<ChartResult> {
    // Step 1: local civil time to UT
    let ut_time = to_universal_time(
        request.year,
        request.month,
        request.day,
        request.hour,
        &request.timezone,
    )?;

    // Step 2: UT to Julian Day
    let julian_day = ut_time.julian_day();

    // Step 3: ayanamsa from the local calendar date, not the UT one
    let ayanamsa = request.ayanamsa.unwrap_or_default();
    let ayanamsa_value = ayanamsa.value(request.day, request.month, request.year);
    let lahiri_ayanamsa = Ayanamsa::Lahiri.value(request.day, request.month, request.year);
    debug!("{} ayanamsa {} at JD {}", ayanamsa, ayanamsa_value, julian_day);

    // Step 4: positions
    let mut positions = Vec::with_capacity(CelestialBody::ALL.len());
    for body in CelestialBody::PLANETS {
        let tropical = normalize_degrees(ephemeris.tropical_longitude(julian_day, body.ephemeris_body())?);
        positions.push((body, BodyPosition::from_tropical(tropical, ayanamsa_value)));
    }

    let rahu = normalize_degrees(ephemeris.tropical_longitude(julian_day, EphemerisBody::MeanNode)?);
    positions.push((
        CelestialBody::Rahu,
        BodyPosition::from_tropical(rahu, ayanamsa_value),
    ));
    positions.push((
        CelestialBody::Ketu,
        BodyPosition::from_tropical(ketu_longitude(rahu), ayanamsa_value),
    ));

    Ok(ChartResult {
        julian_day,
        ut_time,
        ayanamsa,
        ayanamsa_value,
        lahiri_ayanamsa,
        positions,
    })
}

/// Library entry point taking the five request fields directly.
pub fn calculate_planet_positions<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
    month: u32,
    day: u32,
    hour: f64,
    timezone: &str,
) -> CalculationResult<ChartResult> {
    calculate_chart(ephemeris, &ChartRequest::new(year, month, day, hour, timezone))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChartError;
    use approx::assert_abs_diff_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Longitudes that move with time, one lane per body.
    struct LinearEphemeris {
        calls: AtomicUsize,
    }

    impl LinearEphemeris {
        fn new() -> Self {
            LinearEphemeris {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Ephemeris for LinearEphemeris {
        fn tropical_longitude(&self, julian_day: JulianDay, body: EphemerisBody) -> CalculationResult<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((julian_day * (body as i32 + 1) as f64 * 0.9856) % 360.0)
        }
    }

    struct BrokenEphemeris;

    impl Ephemeris for BrokenEphemeris {
        fn tropical_longitude(&self, _: JulianDay, body: EphemerisBody) -> CalculationResult<f64> {
            if body == EphemerisBody::Saturn {
                Err(ChartError::EphemerisUnavailable("saturn out of range".to_string()))
            } else {
                Ok(10.0)
            }
        }
    }

    #[test]
    fn test_reference_chart() {
        let eph = LinearEphemeris::new();
        let chart = calculate_planet_positions(&eph, 2025, 3, 10, 12.0, "Asia/Kolkata").unwrap();
        assert_eq!(chart.ut_time.to_string(), "2025-03-10 06:30:00");
        assert_abs_diff_eq!(chart.julian_day, 2460744.5 + 6.5 / 24.0, epsilon = 1e-9);
        assert_abs_diff_eq!(chart.ayanamsa_value, 24.2083, epsilon = 1e-3);
        assert_eq!(chart.ayanamsa, Ayanamsa::Lahiri);
        assert_eq!(chart.positions.len(), 12);
    }

    #[test]
    fn test_mean_node_is_looked_up_once() {
        let eph = LinearEphemeris::new();
        calculate_planet_positions(&eph, 2025, 3, 10, 12.0, "Asia/Kolkata").unwrap();
        assert_eq!(eph.calls.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn test_ketu_opposes_rahu() {
        let eph = LinearEphemeris::new();
        let chart = calculate_planet_positions(&eph, 1991, 6, 18, 7.1667, "Asia/Kolkata").unwrap();
        let rahu = chart.position(CelestialBody::Rahu).unwrap();
        let ketu = chart.position(CelestialBody::Ketu).unwrap();
        assert_eq!(ketu.tropical_longitude, (rahu.tropical_longitude + 180.0).rem_euclid(360.0));
    }

    #[test]
    fn test_selected_ayanamsa_is_used() {
        let eph = LinearEphemeris::new();
        let request = ChartRequest::new(2025, 3, 10, 12.0, "Asia/Kolkata").with_ayanamsa(Ayanamsa::Raman);
        let chart = calculate_chart(&eph, &request).unwrap();
        assert_eq!(chart.ayanamsa, Ayanamsa::Raman);
        assert_abs_diff_eq!(chart.lahiri_ayanamsa, 24.2083, epsilon = 1e-3);
        assert_abs_diff_eq!(
            chart.ayanamsa_value,
            Ayanamsa::Raman.value(10, 3, 2025),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_ephemeris_failure_fails_whole_chart() {
        let err = calculate_planet_positions(&BrokenEphemeris, 2025, 3, 10, 12.0, "Asia/Kolkata")
            .unwrap_err();
        assert!(matches!(err, ChartError::EphemerisUnavailable(_)));
    }

    #[test]
    fn test_invalid_timezone_skips_ephemeris() {
        let eph = LinearEphemeris::new();
        let err = calculate_planet_positions(&eph, 2025, 3, 10, 12.0, "Not/AZone").unwrap_err();
        assert!(matches!(err, ChartError::InvalidTimezone(_)));
        assert_eq!(eph.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_body_position_wraps() {
        let position = BodyPosition::from_tropical(5.0, 24.0);
        assert_eq!(position.sign, ZodiacSign::Pisces);
        assert_abs_diff_eq!(position.sidereal_longitude, 341.0, epsilon = 1e-12);
        assert_abs_diff_eq!(position.degree_in_sign, 11.0, epsilon = 1e-12);
    }

    #[test]
    fn test_json_layout() {
        let eph = LinearEphemeris::new();
        let chart = calculate_planet_positions(&eph, 2025, 3, 10, 12.0, "Asia/Kolkata").unwrap();
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["ut_time"], "2025-03-10 06:30:00");
        assert_eq!(json["ayanamsa_system"], "Lahiri");
        assert_eq!(json["ayanamsa_dms"], "24:12:30");
        assert_eq!(json["lahiri_ayanamsa"], json["ayanamsa"]);

        let positions = json["planet_positions"].as_object().unwrap();
        assert_eq!(positions.len(), 12);
        let sun = &positions["Sun"];
        for key in ["sign", "degree", "tropical", "sidereal"] {
            assert!(sun.get(key).is_some(), "missing {}", key);
        }
        assert!(positions.contains_key("Rahu (North Node)"));
        assert!(positions.contains_key("Ketu (South Node)"));
    }

    #[test]
    fn test_degrees_round_to_six_places() {
        let position = BodyPosition::from_tropical(123.456789123, 0.0);
        let json = serde_json::to_value(position).unwrap();
        assert_eq!(json["tropical"].as_f64().unwrap(), 123.456789);
        // full precision stays in the struct
        assert_eq!(position.tropical_longitude, 123.456789123);
    }

    #[test]
    fn test_request_deserializes_without_ayanamsa() {
        let request: ChartRequest = serde_json::from_str(
            r#"{"year": 2025, "month": 3, "day": 10, "hour": 12, "timezone": "Asia/Kolkata"}"#,
        )
        .unwrap();
        assert_eq!(request, ChartRequest::new(2025, 3, 10, 12.0, "Asia/Kolkata"));
    }
}
