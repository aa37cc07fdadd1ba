//! Color constants for the panel regions.

use ratatui::style::Color;

use crate::sim::ats::AtsMode;
use crate::sim::battery::BatteryDirection;
use crate::sim::flow::BuzzerState;

/// ATS bar color in BESS mode.
pub const BESS_MODE: Color = Color::Yellow;
/// ATS bar color in grid mode.
pub const GRID_MODE: Color = Color::Cyan;
/// Battery gauge color while charging.
pub const CHARGING: Color = Color::Green;
/// Battery gauge color while discharging.
pub const DISCHARGING: Color = Color::Red;
/// Buzzer color when safe.
pub const SAFE: Color = Color::Green;
/// Buzzer color when the flow limit is exceeded.
pub const ALERT: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text and unit suffix color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns the ATS bar color for a mode.
pub fn ats_color(mode: AtsMode) -> Color {
    match mode {
        AtsMode::Bess => BESS_MODE,
        AtsMode::Grid => GRID_MODE,
    }
}

/// Returns the battery gauge color for a level direction.
pub fn battery_color(direction: BatteryDirection) -> Color {
    match direction {
        BatteryDirection::Charging => CHARGING,
        BatteryDirection::Discharging => DISCHARGING,
    }
}

/// Returns the buzzer color for an alarm state.
pub fn buzzer_color(state: BuzzerState) -> Color {
    match state {
        BuzzerState::Safe => SAFE,
        BuzzerState::Alert => ALERT,
    }
}
