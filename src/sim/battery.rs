use serde::Serialize;

use crate::config::BatteryConfig;

/// Direction of the battery level change on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryDirection {
    /// Level rising (off-peak, grid supplying).
    Charging,
    /// Level falling (peak, battery supplying).
    Discharging,
}

impl BatteryDirection {
    /// Returns the display label for the battery status line.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Charging => "Charging",
            Self::Discharging => "Discharging",
        }
    }
}

/// Battery charge level integrator.
///
/// Holds the panel's only mutable state: a percentage in `[0, 100]` updated
/// once per one-second tick. Rates are configured per minute and applied as
/// `rate / 60` per tick, so the level only tracks real elapsed time while
/// ticks actually arrive at 1 Hz.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Charge level in percent (0.0 to 100.0).
    pub percent: f32,

    /// Charge rate during off-peak hours (% per minute).
    charge_rate_pct_per_min: f32,

    /// Discharge rate during peak hours (% per minute).
    discharge_rate_pct_per_min: f32,
}

impl Battery {
    /// Creates a new battery at the given initial level.
    ///
    /// # Arguments
    ///
    /// * `initial_pct` - Starting charge level in percent (0.0 to 100.0)
    /// * `charge_rate_pct_per_min` - Off-peak charge rate (>= 0)
    /// * `discharge_rate_pct_per_min` - Peak discharge rate (>= 0)
    ///
    /// # Panics
    ///
    /// Panics if the initial level is out of range or a rate is negative.
    pub fn new(
        initial_pct: f32,
        charge_rate_pct_per_min: f32,
        discharge_rate_pct_per_min: f32,
    ) -> Self {
        assert!((0.0..=100.0).contains(&initial_pct));
        assert!(charge_rate_pct_per_min >= 0.0 && discharge_rate_pct_per_min >= 0.0);

        Self {
            percent: initial_pct,
            charge_rate_pct_per_min,
            discharge_rate_pct_per_min,
        }
    }

    /// Builds a battery from the configuration section.
    ///
    /// # Panics
    ///
    /// Panics on out-of-range values; run [`crate::config::PanelConfig::validate`]
    /// first.
    pub fn from_config(cfg: &BatteryConfig) -> Self {
        Self::new(
            cfg.initial_pct,
            cfg.charge_rate_pct_per_min,
            cfg.discharge_rate_pct_per_min,
        )
    }

    /// Applies one tick's worth of charge or discharge and returns the direction.
    ///
    /// During peak hours the level falls by `discharge_rate / 60` and clamps
    /// at 0; off-peak it rises by `charge_rate / 60` and clamps at 100. Once
    /// saturated, further same-direction ticks leave the level unchanged.
    pub fn step(&mut self, is_peak: bool) -> BatteryDirection {
        if is_peak {
            self.percent -= self.discharge_rate_pct_per_min / 60.0;
            if self.percent < 0.0 {
                self.percent = 0.0;
            }
            BatteryDirection::Discharging
        } else {
            self.percent += self.charge_rate_pct_per_min / 60.0;
            if self.percent > 100.0 {
                self.percent = 100.0;
            }
            BatteryDirection::Charging
        }
    }
}
