use serde::Serialize;

use crate::config::FlowConfig;

/// Buzzer state driven by the flow-rate threshold comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BuzzerState {
    /// Flow at or below the alarm threshold.
    Safe,
    /// Flow strictly above the alarm threshold.
    Alert,
}

impl BuzzerState {
    /// Returns the display label for the buzzer region.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Alert => "🚨 Flow Limit Exceeded!",
        }
    }

    /// Returns the short state name used in telemetry exports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Alert => "alert",
        }
    }
}

/// Volumetric pipe flow derived once from pipe geometry and velocity.
///
/// The chain is radius (m) from diameter (cm), cross-sectional area,
/// flow in m³/s, then L/s. The alarm compares the unrounded L/s value
/// against the threshold, not the two-decimal display value.
#[derive(Debug, Clone, Copy)]
pub struct FlowProfile {
    /// Flow rate in liters per second.
    pub flow_lps: f32,
    /// Alarm threshold in liters per second.
    pub alarm_threshold_lps: f32,
}

impl FlowProfile {
    /// Derives the flow rate from pipe diameter and flow velocity.
    ///
    /// # Panics
    ///
    /// Panics if the diameter is non-positive, or the velocity or
    /// threshold is negative.
    pub fn new(pipe_diameter_cm: f32, velocity_m_per_s: f32, alarm_threshold_lps: f32) -> Self {
        assert!(pipe_diameter_cm > 0.0);
        assert!(velocity_m_per_s >= 0.0);
        assert!(alarm_threshold_lps >= 0.0);

        let radius_m = pipe_diameter_cm / 100.0 / 2.0;
        let area_m2 = std::f32::consts::PI * radius_m * radius_m;
        let flow_m3_per_s = area_m2 * velocity_m_per_s;

        Self {
            flow_lps: flow_m3_per_s * 1000.0,
            alarm_threshold_lps,
        }
    }

    /// Builds the profile from the configuration section.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range values; run [`crate::config::PanelConfig::validate`]
    /// first.
    pub fn from_config(cfg: &FlowConfig) -> Self {
        Self::new(
            cfg.pipe_diameter_cm,
            cfg.velocity_m_per_s,
            cfg.alarm_threshold_lps,
        )
    }

    /// Returns the buzzer state for the current flow rate.
    pub fn buzzer(&self) -> BuzzerState {
        if self.flow_lps > self.alarm_threshold_lps {
            BuzzerState::Alert
        } else {
            BuzzerState::Safe
        }
    }

    /// Formats the flow rate to two decimals with unit suffix.
    pub fn display(&self) -> String {
        format!("{:.2} L/s", self.flow_lps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_cm_at_ten_m_per_s() {
        let flow = FlowProfile::new(5.0, 10.0, 5.0);
        // radius 0.025 m, area π·0.025² ≈ 0.0019635 m², 19.635 L/s
        assert!((flow.flow_lps - 19.635).abs() < 1e-2);
        assert_eq!(flow.display(), "19.63 L/s");
    }

    #[test]
    fn above_threshold_is_alert() {
        let flow = FlowProfile::new(5.0, 10.0, 5.0);
        assert_eq!(flow.buzzer(), BuzzerState::Alert);
    }

    #[test]
    fn below_threshold_is_safe() {
        // 2 m/s through the same pipe ≈ 3.93 L/s
        let flow = FlowProfile::new(5.0, 2.0, 5.0);
        assert!(flow.flow_lps < 5.0);
        assert_eq!(flow.buzzer(), BuzzerState::Safe);
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let mut flow = FlowProfile::new(5.0, 10.0, 5.0);
        flow.alarm_threshold_lps = flow.flow_lps;
        assert_eq!(flow.buzzer(), BuzzerState::Safe);
    }

    #[test]
    fn threshold_uses_unrounded_value() {
        // Displays as "5.00 L/s" but the raw value sits just above 5.0
        let mut flow = FlowProfile::new(5.0, 10.0, 5.0);
        flow.flow_lps = 5.0001;
        assert_eq!(flow.display(), "5.00 L/s");
        assert_eq!(flow.buzzer(), BuzzerState::Alert);
    }

    #[test]
    fn zero_velocity_is_safe() {
        let flow = FlowProfile::new(5.0, 0.0, 5.0);
        assert_eq!(flow.flow_lps, 0.0);
        assert_eq!(flow.buzzer(), BuzzerState::Safe);
    }

    #[test]
    fn labels_are_distinct() {
        assert_ne!(BuzzerState::Safe.label(), BuzzerState::Alert.label());
        assert_eq!(BuzzerState::Safe.name(), "safe");
        assert_eq!(BuzzerState::Alert.name(), "alert");
    }

    #[test]
    #[should_panic]
    fn zero_diameter_panics() {
        FlowProfile::new(0.0, 10.0, 5.0);
    }
}
