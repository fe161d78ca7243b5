//! Daily revenue trend with zero-filled gaps.

use chrono::{DateTime, NaiveDate};
use pulse_core::error::{PulseError, PulseResult};
use pulse_core::types::EnrichedTransaction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// UTC calendar date of an epoch-millisecond timestamp.
pub fn utc_date(ts_ms: i64) -> PulseResult<NaiveDate> {
    DateTime::from_timestamp_millis(ts_ms)
        .map(|dt| dt.date_naive())
        .ok_or(PulseError::TimestampOutOfRange(ts_ms))
}

/// Sums revenue per UTC day and emits one point for every day between the
/// earliest and latest observed day, inclusive. Days without sales get 0.
/// An empty input gives an empty series.
pub fn build_revenue_trend(
    transactions: &[EnrichedTransaction<'_>],
) -> PulseResult<Vec<TrendPoint>> {
    let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for txn in transactions {
        *daily.entry(utc_date(txn.time())?).or_default() += txn.revenue();
    }

    let (first, last) = match (daily.keys().next(), daily.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return Ok(Vec::new()),
    };

    Ok(first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| TrendPoint {
            date,
            revenue: daily.get(&date).copied().unwrap_or(0.0),
        })
        .collect())
}
