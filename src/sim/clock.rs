use chrono::{Duration, NaiveDateTime};

/// A synthetic clock that advances one second per tick over a fixed run.
///
/// The `Ticker` lets headless runs and tests single-step the panel without
/// waiting on wall time; the live TUI owns its own 1 Hz cadence instead.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use panel_sim::sim::clock::Ticker;
///
/// let start = NaiveDate::from_ymd_opt(2026, 8, 6)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
/// let mut ticker = Ticker::new(start, 3);
/// let mut seconds = Vec::new();
///
/// ticker.run(|_, now| seconds.push(now.format("%S").to_string()));
/// assert_eq!(seconds, vec!["00", "01", "02"]);
/// ```
pub struct Ticker {
    /// Timestamp of the next tick.
    now: NaiveDateTime,
    /// Current tick index.
    current: usize,
    /// Total ticks to run.
    total: usize,
}

impl Ticker {
    /// Creates a new ticker starting at `start` for `total` ticks.
    pub fn new(start: NaiveDateTime, total: usize) -> Self {
        Self {
            now: start,
            current: 0,
            total,
        }
    }

    /// Advances the ticker by one second.
    ///
    /// # Returns
    ///
    /// * `Some((tick, timestamp))` - The tick index and its timestamp
    /// * `None` - If the ticker has completed all ticks
    pub fn tick(&mut self) -> Option<(usize, NaiveDateTime)> {
        if self.current < self.total {
            let step = (self.current, self.now);
            self.current += 1;
            self.now += Duration::seconds(1);
            Some(step)
        } else {
            None
        }
    }

    /// Runs a function for each remaining tick.
    ///
    /// # Arguments
    ///
    /// * `f` - A function taking the tick index and its timestamp
    pub fn run(&mut self, mut f: impl FnMut(usize, NaiveDateTime)) {
        while let Some((tick, now)) = self.tick() {
            f(tick, now);
        }
    }
}
