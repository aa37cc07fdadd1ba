//! Core panel types: the per-tick snapshot record.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::ats::AtsMode;
use super::battery::BatteryDirection;
use super::flow::BuzzerState;

/// Complete record of one panel tick.
///
/// Everything the presentation surface renders is derived from this record;
/// all fields observe the single timestamp captured at the start of the tick.
#[derive(Debug, Clone, Serialize)]
pub struct TickSnapshot {
    /// Tick index, starting from 0.
    pub tick: usize,
    /// Timestamp shared by every sub-computation of this tick.
    pub timestamp: NaiveDateTime,
    /// Peak-hours classification of `timestamp`.
    pub peak: bool,
    /// ATS transfer mode.
    pub ats_mode: AtsMode,
    /// Battery charge level after this tick (0.0 to 100.0).
    pub battery_pct: f32,
    /// Battery level direction this tick.
    pub battery_direction: BatteryDirection,
    /// Motor speed (RPM).
    pub motor_rpm: f32,
    /// Flow rate (L/s).
    pub flow_lps: f32,
    /// Buzzer state from the flow threshold comparison.
    pub buzzer: BuzzerState,
}

impl TickSnapshot {
    /// Formats the battery percentage line to one decimal place.
    pub fn battery_display(&self) -> String {
        format!("Battery Level: {:.1}%", self.battery_pct)
    }
}

impl fmt::Display for TickSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>5} {} | ats={:<4} | bat={:>5.1}% ({:<11}) | {:>4.0} RPM | {:.2} L/s [{}]",
            self.tick,
            self.timestamp.format("%H:%M:%S"),
            self.ats_mode.name(),
            self.battery_pct,
            self.battery_direction.label(),
            self.motor_rpm,
            self.flow_lps,
            self.buzzer.name(),
        )
    }
}
