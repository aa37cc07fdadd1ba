//! Plant-panel dashboard simulator: ATS transfer mode, battery storage,
//! motor speed, and pipe flow with a threshold alarm.

/// REST API for panel state and telemetry.
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Panel engine, derived profiles, and tick scheduling modules.
pub mod sim;
/// Live terminal dashboard.
#[cfg(feature = "tui")]
pub mod tui;
