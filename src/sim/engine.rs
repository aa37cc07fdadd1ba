//! Panel engine that orchestrates the per-tick update cycle.

use chrono::NaiveDateTime;

use crate::config::{ConfigError, PanelConfig};

use super::ats::AtsMode;
use super::battery::Battery;
use super::clock::Ticker;
use super::flow::FlowProfile;
use super::motor::MotorProfile;
use super::peak::PeakWindow;
use super::types::TickSnapshot;

/// Panel engine owning the peak window, battery state, and derived profiles.
///
/// The motor and flow profiles are computed once at construction; the
/// battery percentage is the only state mutated across ticks.
pub struct Engine {
    window: PeakWindow,
    battery: Battery,
    motor: MotorProfile,
    flow: FlowProfile,
}

impl Engine {
    /// Creates a new engine from its parts.
    pub fn new(
        window: PeakWindow,
        battery: Battery,
        motor: MotorProfile,
        flow: FlowProfile,
    ) -> Self {
        Self {
            window,
            battery,
            motor,
            flow,
        }
    }

    /// Builds an engine from a panel configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the peak window bounds are malformed.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range numeric fields; run
    /// [`PanelConfig::validate`] first.
    pub fn from_config(cfg: &PanelConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(
            cfg.peak_hours.window()?,
            Battery::from_config(&cfg.battery),
            MotorProfile::from_config(&cfg.motor),
            FlowProfile::from_config(&cfg.flow),
        ))
    }

    /// Executes one panel tick and returns the snapshot.
    ///
    /// The peak classification is evaluated once for the shared timestamp,
    /// so the ATS selector and the battery integrator always agree within
    /// a tick.
    ///
    /// # Arguments
    ///
    /// * `tick` - Tick index
    /// * `now` - Timestamp captured at the start of the tick
    pub fn tick(&mut self, tick: usize, now: NaiveDateTime) -> TickSnapshot {
        // 1. Classify the shared timestamp
        let peak = self.window.contains(now);

        // 2. ATS mode
        let ats_mode = AtsMode::from_peak(peak);

        // 3. Battery update
        let battery_direction = self.battery.step(peak);

        // 4. Motor and flow readouts, buzzer
        TickSnapshot {
            tick,
            timestamp: now,
            peak,
            ats_mode,
            battery_pct: self.battery.percent,
            battery_direction,
            motor_rpm: self.motor.rpm,
            flow_lps: self.flow.flow_lps,
            buzzer: self.flow.buzzer(),
        }
    }

    /// Executes a bounded run of one-second ticks from `start`.
    ///
    /// # Returns
    ///
    /// The complete snapshot vector, one entry per tick.
    pub fn run(&mut self, start: NaiveDateTime, ticks: usize) -> Vec<TickSnapshot> {
        let mut ticker = Ticker::new(start, ticks);
        let mut snapshots = Vec::with_capacity(ticks);
        ticker.run(|tick, now| snapshots.push(self.tick(tick, now)));
        snapshots
    }

    /// Returns a reference to the battery state.
    pub fn battery(&self) -> &Battery {
        &self.battery
    }

    /// Returns the configured peak window.
    pub fn window(&self) -> &PeakWindow {
        &self.window
    }
}
