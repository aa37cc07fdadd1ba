//! TOML-based panel configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::sim::peak::PeakWindow;

/// Time-of-day format used for the peak window bounds.
const TIME_FMT: &str = "%H:%M:%S";

/// Timestamp format used for the headless start instant.
const START_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// Top-level panel configuration parsed from TOML.
///
/// All fields have defaults matching the baseline panel. Load from TOML
/// with [`PanelConfig::from_toml_file`] or use [`PanelConfig::baseline`]
/// for the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    /// Headless run parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Daily peak-hours window.
    #[serde(default)]
    pub peak_hours: PeakHoursConfig,
    /// Battery storage parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Motor nameplate parameters.
    #[serde(default)]
    pub motor: MotorConfig,
    /// Pipe flow and alarm parameters.
    #[serde(default)]
    pub flow: FlowConfig,
}

/// Headless run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of one-second ticks to execute (must be > 0).
    pub ticks: usize,
    /// Start instant as `YYYY-MM-DDTHH:MM:SS`; empty means "now".
    pub start: String,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: 60,
            start: String::new(),
        }
    }
}

impl SimulationConfig {
    /// Parses the configured start instant, if one is set.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the string is non-empty but malformed.
    pub fn start_instant(&self) -> Result<Option<NaiveDateTime>, ConfigError> {
        if self.start.is_empty() {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&self.start, START_FMT)
            .map(Some)
            .map_err(|e| ConfigError {
                field: "simulation.start".into(),
                message: format!("expected `{START_FMT}` timestamp: {e}"),
            })
    }
}

/// Daily peak-hours window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeakHoursConfig {
    /// Window start as `HH:MM:SS` (inclusive).
    pub start: String,
    /// Window end as `HH:MM:SS` (exclusive).
    pub end: String,
}

impl Default for PeakHoursConfig {
    fn default() -> Self {
        Self {
            start: "10:00:00".to_string(),
            end: "18:00:00".to_string(),
        }
    }
}

impl PeakHoursConfig {
    /// Builds the peak window from the configured bounds.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if either bound is malformed or the start
    /// is not strictly before the end.
    pub fn window(&self) -> Result<PeakWindow, ConfigError> {
        let start = parse_time("peak_hours.start", &self.start)?;
        let end = parse_time("peak_hours.end", &self.end)?;
        if start >= end {
            return Err(ConfigError {
                field: "peak_hours.start".into(),
                message: "must be before peak_hours.end".into(),
            });
        }
        Ok(PeakWindow::new(start, end))
    }
}

fn parse_time(field: &str, value: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, TIME_FMT).map_err(|e| ConfigError {
        field: field.into(),
        message: format!("expected `{TIME_FMT}` time: {e}"),
    })
}

/// Battery storage parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Initial charge level in percent (0.0–100.0).
    pub initial_pct: f32,
    /// Charge rate during off-peak hours (% per minute).
    pub charge_rate_pct_per_min: f32,
    /// Discharge rate during peak hours (% per minute).
    pub discharge_rate_pct_per_min: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            initial_pct: 50.0,
            charge_rate_pct_per_min: 0.5,
            discharge_rate_pct_per_min: 1.0,
        }
    }
}

/// Motor nameplate parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotorConfig {
    /// Line frequency (Hz).
    pub frequency_hz: f32,
    /// Pole count.
    pub poles: u32,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 50.0,
            poles: 5,
        }
    }
}

/// Pipe flow and alarm parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    /// Pipe inner diameter (cm).
    pub pipe_diameter_cm: f32,
    /// Flow velocity (m/s).
    pub velocity_m_per_s: f32,
    /// Alarm threshold (L/s); the buzzer trips strictly above this.
    pub alarm_threshold_lps: f32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            pipe_diameter_cm: 5.0,
            velocity_m_per_s: 10.0,
            alarm_threshold_lps: 5.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"battery.initial_pct"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl PanelConfig {
    /// Returns the baseline panel (same constants as the original plant panel).
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            peak_hours: PeakHoursConfig::default(),
            battery: BatteryConfig::default(),
            motor: MotorConfig::default(),
            flow: FlowConfig::default(),
        }
    }

    /// Returns the overnight preset: nearly empty battery recovering off-peak.
    pub fn overnight() -> Self {
        Self {
            battery: BatteryConfig {
                initial_pct: 5.0,
                charge_rate_pct_per_min: 1.0,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the low-flow preset: velocity low enough to keep the buzzer safe.
    pub fn low_flow() -> Self {
        Self {
            flow: FlowConfig {
                velocity_m_per_s: 2.0,
                ..FlowConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "overnight", "low_flow"];

    /// Loads a panel configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "overnight" => Ok(Self::overnight()),
            "low_flow" => Ok(Self::low_flow()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a panel configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a panel configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.simulation.ticks == 0 {
            errors.push(ConfigError {
                field: "simulation.ticks".into(),
                message: "must be > 0".into(),
            });
        }
        if let Err(e) = self.simulation.start_instant() {
            errors.push(e);
        }
        if let Err(e) = self.peak_hours.window() {
            errors.push(e);
        }

        let bat = &self.battery;
        if !(0.0..=100.0).contains(&bat.initial_pct) {
            errors.push(ConfigError {
                field: "battery.initial_pct".into(),
                message: "must be in [0.0, 100.0]".into(),
            });
        }
        if bat.charge_rate_pct_per_min < 0.0 {
            errors.push(ConfigError {
                field: "battery.charge_rate_pct_per_min".into(),
                message: "must be >= 0".into(),
            });
        }
        if bat.discharge_rate_pct_per_min < 0.0 {
            errors.push(ConfigError {
                field: "battery.discharge_rate_pct_per_min".into(),
                message: "must be >= 0".into(),
            });
        }

        let motor = &self.motor;
        if motor.frequency_hz <= 0.0 {
            errors.push(ConfigError {
                field: "motor.frequency_hz".into(),
                message: "must be > 0".into(),
            });
        }
        if motor.poles == 0 {
            errors.push(ConfigError {
                field: "motor.poles".into(),
                message: "must be > 0".into(),
            });
        }

        let flow = &self.flow;
        if flow.pipe_diameter_cm <= 0.0 {
            errors.push(ConfigError {
                field: "flow.pipe_diameter_cm".into(),
                message: "must be > 0".into(),
            });
        }
        if flow.velocity_m_per_s < 0.0 {
            errors.push(ConfigError {
                field: "flow.velocity_m_per_s".into(),
                message: "must be >= 0".into(),
            });
        }
        if flow.alarm_threshold_lps < 0.0 {
            errors.push(ConfigError {
                field: "flow.alarm_threshold_lps".into(),
                message: "must be >= 0".into(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = PanelConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_baseline() {
        let cfg = PanelConfig::from_preset("baseline");
        assert!(cfg.is_ok());
    }

    #[test]
    fn from_preset_unknown() {
        let err = PanelConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
ticks = 120
start = "2026-08-06T09:59:58"

[peak_hours]
start = "09:00:00"
end = "17:30:00"

[battery]
initial_pct = 75.0
charge_rate_pct_per_min = 0.4
discharge_rate_pct_per_min = 2.0

[motor]
frequency_hz = 60.0
poles = 4

[flow]
pipe_diameter_cm = 8.0
velocity_m_per_s = 3.0
alarm_threshold_lps = 12.0
"#;
        let cfg = PanelConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.simulation.ticks), Some(120));
        assert_eq!(cfg.as_ref().map(|c| c.motor.poles), Some(4));
        assert_eq!(cfg.as_ref().map(|c| c.battery.initial_pct), Some(75.0));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[battery]
initial_pct = 50.0
bogus_field = true
"#;
        let result = PanelConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_ticks() {
        let mut cfg = PanelConfig::baseline();
        cfg.simulation.ticks = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.ticks"));
    }

    #[test]
    fn validation_catches_invalid_initial_pct() {
        let mut cfg = PanelConfig::baseline();
        cfg.battery.initial_pct = 150.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.initial_pct"));
    }

    #[test]
    fn validation_catches_bad_time_string() {
        let mut cfg = PanelConfig::baseline();
        cfg.peak_hours.start = "25:00:00".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "peak_hours.start"));
    }

    #[test]
    fn validation_catches_inverted_window() {
        let mut cfg = PanelConfig::baseline();
        cfg.peak_hours.start = "18:00:00".to_string();
        cfg.peak_hours.end = "10:00:00".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "peak_hours.start"));
    }

    #[test]
    fn validation_catches_bad_start_instant() {
        let mut cfg = PanelConfig::baseline();
        cfg.simulation.start = "not-a-timestamp".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.start"));
    }

    #[test]
    fn validation_catches_zero_poles() {
        let mut cfg = PanelConfig::baseline();
        cfg.motor.poles = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "motor.poles"));
    }

    #[test]
    fn empty_start_means_now() {
        let cfg = PanelConfig::baseline();
        let start = cfg.simulation.start_instant();
        assert!(matches!(start, Ok(None)));
    }

    #[test]
    fn all_presets_are_valid() {
        for name in PanelConfig::PRESETS {
            let cfg = PanelConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn overnight_starts_low() {
        let base = PanelConfig::baseline();
        let night = PanelConfig::overnight();
        assert!(night.battery.initial_pct < base.battery.initial_pct);
        assert!(night.battery.charge_rate_pct_per_min > base.battery.charge_rate_pct_per_min);
    }

    #[test]
    fn low_flow_stays_under_threshold() {
        let cfg = PanelConfig::low_flow();
        assert!(cfg.flow.velocity_m_per_s < PanelConfig::baseline().flow.velocity_m_per_s);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[battery]
initial_pct = 20.0
"#;
        let cfg = PanelConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // initial_pct overridden
        assert_eq!(cfg.as_ref().map(|c| c.battery.initial_pct), Some(20.0));
        // peak window kept default
        assert_eq!(
            cfg.as_ref().map(|c| c.peak_hours.start.as_str()),
            Some("10:00:00")
        );
        // flow kept default
        assert_eq!(cfg.as_ref().map(|c| c.flow.velocity_m_per_s), Some(10.0));
    }
}
