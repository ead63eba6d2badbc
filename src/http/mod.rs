//! HTTP surface for chart calculation.
//!
//! ```text
//! POST /get_planets   ChartRequest JSON  ->  ChartResult JSON
//! GET  /health        liveness check
//! ```
//!
//! Handlers are thin: they fill in the configured default ayanamsa and hand
//! the request to [`crate::calculate_chart`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
