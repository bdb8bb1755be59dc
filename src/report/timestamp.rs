use chrono::{Local, NaiveDateTime, TimeDelta};

/// Local time with millisecond precision, e.g. `2024-03-01T09:15:02.250`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Running wall-clock cursor shared by all suites of one report.
///
/// Each suite starts where the previous one ended: the cursor is read for
/// a suite, then moved forward by that suite's elapsed time. Suites must be
/// stamped in trace order.
#[derive(Debug, Clone)]
pub struct TimestampSequencer {
    cursor: NaiveDateTime,
}

impl TimestampSequencer {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { cursor: start }
    }

    /// Start at the current local time.
    pub fn starting_now() -> Self {
        Self::new(Local::now().naive_local())
    }

    pub fn current(&self) -> NaiveDateTime {
        self.cursor
    }

    /// Formatted value of the cursor.
    pub fn timestamp(&self) -> String {
        self.cursor.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Move the cursor by `elapsed_ms`, rounded to whole milliseconds.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let ms = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms.round() as i64
        } else {
            0
        };
        if let Some(next) = TimeDelta::try_milliseconds(ms)
            .and_then(|delta| self.cursor.checked_add_signed(delta))
        {
            self.cursor = next;
        }
    }

    /// Read the cursor for a suite, then advance past it.
    pub fn stamp(&mut self, elapsed_ms: f64) -> String {
        let stamp = self.timestamp();
        self.advance(elapsed_ms);
        stamp
    }
}
