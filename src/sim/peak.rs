use chrono::{NaiveDateTime, NaiveTime};

/// Daily recurring peak-hours window in local time.
///
/// The window spans `[start, end)` on whichever calendar day the queried
/// timestamp falls on: the bounds are times of day, not instants, so the
/// window recurs every day.
#[derive(Debug, Clone, Copy)]
pub struct PeakWindow {
    /// Window start time of day (inclusive).
    pub start: NaiveTime,
    /// Window end time of day (exclusive).
    pub end: NaiveTime,
}

impl PeakWindow {
    /// Creates a new peak window spanning `[start, end)` within one day.
    ///
    /// # Panics
    ///
    /// Panics if `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        assert!(start < end);

        Self { start, end }
    }

    /// Returns `true` when the timestamp's time of day falls within the window.
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        let t = now.time();
        t >= self.start && t < self.end
    }
}
