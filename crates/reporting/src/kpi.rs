//! Headline KPIs and period-over-period deltas.

use pulse_core::types::{AcquisitionSource, EnrichedTransaction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::window::PeriodWindow;

/// Transactions split by the period they fall into. A transaction outside
/// both periods is in neither list.
#[derive(Debug, Clone, Default)]
pub struct PeriodPartition<'a> {
    pub current: Vec<EnrichedTransaction<'a>>,
    pub previous: Vec<EnrichedTransaction<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_revenue: f64,
    pub total_transactions: u64,
    /// Distinct customers in the current period. No delta is published.
    pub unique_customers: u64,
    pub revenue_change_pct: f64,
    pub transactions_change_pct: f64,
}

/// Splits `transactions` by the window's inclusive period bounds. The
/// comparison list stays empty when the window has no comparison period.
pub fn partition<'a>(
    transactions: &[EnrichedTransaction<'a>],
    window: &PeriodWindow,
) -> PeriodPartition<'a> {
    let compare = window.has_comparison();
    let mut periods = PeriodPartition::default();
    for txn in transactions {
        let ts = txn.time();
        if window.in_current(ts) {
            periods.current.push(*txn);
        } else if compare && window.in_previous(ts) {
            periods.previous.push(*txn);
        }
    }
    periods
}

pub fn summarize(periods: &PeriodPartition<'_>) -> KpiSummary {
    let total_revenue = revenue_of(&periods.current);
    let total_transactions = periods.current.len() as u64;
    let unique_customers = unique_customers_of(&periods.current);

    let prev_revenue = revenue_of(&periods.previous);
    let prev_transactions = periods.previous.len() as u64;
    debug!(
        current = total_transactions,
        previous = prev_transactions,
        prev_unique_customers = unique_customers_of(&periods.previous),
        "Summarized periods"
    );

    KpiSummary {
        total_revenue,
        total_transactions,
        unique_customers,
        revenue_change_pct: percent_change(total_revenue, prev_revenue),
        transactions_change_pct: percent_change(
            total_transactions as f64,
            prev_transactions as f64,
        ),
    }
}

/// Relative change in percent. A zero baseline, or any result that is not
/// finite, yields 0.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    let change = (current - previous) / previous * 100.0;
    if change.is_finite() {
        change
    } else {
        0.0
    }
}

/// Sources in order of first appearance.
pub fn distinct_sources(transactions: &[EnrichedTransaction<'_>]) -> Vec<AcquisitionSource> {
    let mut seen = HashSet::new();
    transactions
        .iter()
        .map(|t| t.source())
        .filter(|s| seen.insert(*s))
        .cloned()
        .collect()
}

fn revenue_of(transactions: &[EnrichedTransaction<'_>]) -> f64 {
    transactions.iter().map(|t| t.revenue()).sum()
}

fn unique_customers_of(transactions: &[EnrichedTransaction<'_>]) -> u64 {
    transactions
        .iter()
        .map(|t| t.transaction.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64
}
