//! Panel runner and TUI application state.

use std::collections::VecDeque;
use std::time::Instant;

use chrono::Local;

use crate::config::PanelConfig;
use crate::sim::engine::Engine;
use crate::sim::types::TickSnapshot;

/// Maximum number of history entries kept for the battery chart (10 minutes).
const MAX_HISTORY: usize = 600;

/// TUI application state.
pub struct App {
    /// Panel engine.
    engine: Engine,
    /// Current configuration (kept for restart/preset switch).
    config: PanelConfig,
    /// Rolling history of snapshots for the battery chart.
    pub history: VecDeque<TickSnapshot>,
    /// Next tick index.
    pub tick_count: usize,
    /// Whether the panel is paused.
    pub paused: bool,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// When the last tick was executed.
    pub last_tick: Instant,
    /// Name of the active preset.
    pub preset_name: String,
}

impl App {
    /// Creates a new app from a preset name, falling back to baseline.
    ///
    /// # Panics
    ///
    /// Panics if the built-in preset fails to build, which indicates a
    /// defective preset definition.
    pub fn new(preset: &str) -> Self {
        let config = PanelConfig::from_preset(preset).unwrap_or_else(|_| PanelConfig::baseline());
        let engine = Engine::from_config(&config)
            .unwrap_or_else(|e| panic!("built-in preset \"{preset}\" is invalid: {e}"));
        Self {
            engine,
            config,
            history: VecDeque::with_capacity(MAX_HISTORY),
            tick_count: 0,
            paused: false,
            quit: false,
            last_tick: Instant::now(),
            preset_name: preset.to_string(),
        }
    }

    /// Executes one panel tick against the current wall clock.
    pub fn tick(&mut self) {
        let now = Local::now().naive_local();
        let snapshot = self.engine.tick(self.tick_count, now);
        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
        self.tick_count += 1;
    }

    /// Toggles pause/resume.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Switches to a different preset, resetting panel state.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(config) = PanelConfig::from_preset(name) else {
            return;
        };
        let Ok(engine) = Engine::from_config(&config) else {
            return;
        };
        self.engine = engine;
        self.config = config;
        self.history.clear();
        self.tick_count = 0;
        self.paused = false;
        self.preset_name = name.to_string();
    }

    /// Restarts the current preset from its initial state.
    pub fn restart(&mut self) {
        let name = self.preset_name.clone();
        self.switch_preset(&name);
    }

    /// Returns the current battery level (from the latest tick, or initial).
    pub fn battery_pct(&self) -> f32 {
        self.history
            .back()
            .map_or(self.config.battery.initial_pct, |s| s.battery_pct)
    }

    /// Returns the most recent snapshot, if any.
    pub fn last_snapshot(&self) -> Option<&TickSnapshot> {
        self.history.back()
    }
}
