//! Swiss Ephemeris backed [`Ephemeris`].

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use ::swisseph::swe;
use log::info;

use crate::ephemeris::{Ephemeris, EphemerisBody, EphemerisConfig};
use crate::error::{CalculationResult, ChartError};
use crate::time::JulianDay;
use crate::zodiac::normalize_degrees;

/// `SEFLG_SWIEPH`: compute from the Swiss Ephemeris data files.
const SEFLG_SWIEPH: u32 = 2;
const MAXCH: usize = 256;

// The C library keeps one data path for the whole process. Each lookup
// switches it to its own directory under this lock if another instance
// moved it.
static ACTIVE_EPHE_PATH: Mutex<Option<PathBuf>> = Mutex::new(None);

/// SwissEph provides tropical longitudes using the Swiss Ephemeris.
#[derive(Debug)]
pub struct SwissEph {
    ephe_path: PathBuf,
    ephe_path_str: String,
}

impl SwissEph {
    /// Checks the configured data directory; nothing is read until the first lookup.
    pub fn new(config: &EphemerisConfig) -> CalculationResult<Self> {
        let path = &config.ephe_path;
        if !path.is_dir() {
            return Err(ChartError::EphemerisUnavailable(format!(
                "ephemeris data path {} is not a directory",
                path.display()
            )));
        }
        let ephe_path_str = path
            .to_str()
            .ok_or_else(|| {
                ChartError::EphemerisUnavailable(format!(
                    "ephemeris data path {} is not valid UTF-8",
                    path.display()
                ))
            })?
            .to_owned();
        if ephe_path_str.len() >= MAXCH {
            return Err(ChartError::EphemerisUnavailable(format!(
                "ephemeris data path is longer than {} bytes",
                MAXCH - 1
            )));
        }
        info!("Ephemeris file path set to: {}", path.display());

        Ok(SwissEph {
            ephe_path: path.clone(),
            ephe_path_str,
        })
    }

    pub fn ephe_path(&self) -> &Path {
        &self.ephe_path
    }
}

impl Ephemeris for SwissEph {
    fn tropical_longitude(&self, julian_day: JulianDay, body: EphemerisBody) -> CalculationResult<f64> {
        let mut active = ACTIVE_EPHE_PATH
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if active.as_deref() != Some(self.ephe_path.as_path()) {
            swe::set_ephe_path(&self.ephe_path_str);
            *active = Some(self.ephe_path.clone());
        }

        let result = swe::calc_ut(julian_day, body as u32, SEFLG_SWIEPH).map_err(|e| {
            ChartError::EphemerisUnavailable(format!(
                "failed to calculate {:?} at JD {}: {}",
                body, julian_day, e
            ))
        })?;

        let longitude = result.out[0];
        if !longitude.is_finite() {
            return Err(ChartError::EphemerisUnavailable(format!(
                "no longitude for {:?} at JD {}",
                body, julian_day
            )));
        }
        Ok(normalize_degrees(longitude))
    }
}
