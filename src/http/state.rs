//! Application state for the HTTP server.

use std::sync::Arc;

use crate::ayanamsa::Ayanamsa;
use crate::ephemeris::Ephemeris;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup.
    pub ephemeris: Arc<dyn Ephemeris>,
    /// Applied to requests that do not select an ayanamsa.
    pub default_ayanamsa: Ayanamsa,
}

impl AppState {
    pub fn new(ephemeris: Arc<dyn Ephemeris>, default_ayanamsa: Ayanamsa) -> Self {
        Self {
            ephemeris,
            default_ayanamsa,
        }
    }
}
