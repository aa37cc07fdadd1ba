//! Shared test fixtures for integration tests.

use chrono::{NaiveDate, NaiveDateTime};

use panel_sim::config::PanelConfig;
use panel_sim::sim::engine::Engine;

/// Engine built from the baseline preset.
pub fn baseline_engine() -> Engine {
    Engine::from_config(&PanelConfig::baseline()).unwrap()
}

/// A timestamp on a fixed test date.
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 6)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Midday instant, well inside the default peak window.
pub fn midday() -> NaiveDateTime {
    at(12, 0, 0)
}

/// Early-morning instant, well outside the default peak window.
pub fn early_morning() -> NaiveDateTime {
    at(6, 0, 0)
}
