//! Current and comparison period boundaries for a selected time range.

use chrono::Utc;
use pulse_core::types::{TimeRange, DAY_MS};
use serde::{Deserialize, Serialize};

/// Current period `[start, end]` and comparison period
/// `[prev_start, prev_end]`, all epoch milliseconds, both bounds inclusive.
/// Boundaries are anchored to an instant, not rounded to midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub start: i64,
    pub end: i64,
    pub prev_start: i64,
    pub prev_end: i64,
}

impl PeriodWindow {
    /// For the bounded ranges the comparison period is the span of equal
    /// length ending 1ms before `start`. `AllTime` spans `[0, now]` and has a
    /// zero-width comparison period at epoch 0.
    pub fn resolve(range: TimeRange, now_ms: i64) -> Self {
        match range.span_days() {
            Some(days) => {
                let span = days * DAY_MS;
                let start = now_ms - span;
                let prev_end = start - 1;
                Self {
                    start,
                    end: now_ms,
                    prev_start: prev_end - span,
                    prev_end,
                }
            }
            None => Self {
                start: 0,
                end: now_ms,
                prev_start: 0,
                prev_end: 0,
            },
        }
    }

    pub fn in_current(&self, ts: i64) -> bool {
        ts >= self.start && ts <= self.end
    }

    pub fn in_previous(&self, ts: i64) -> bool {
        ts >= self.prev_start && ts <= self.prev_end
    }

    /// False when the comparison period has zero width; deltas are then
    /// reported as zero.
    pub fn has_comparison(&self) -> bool {
        self.prev_end > self.prev_start
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
