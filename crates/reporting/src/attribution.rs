//! Revenue attribution: share of current-period revenue per acquisition source.

use pulse_core::error::PulseResult;
use pulse_core::palette::ColorPalette;
use pulse_core::types::{AcquisitionSource, EnrichedTransaction};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionShare {
    pub source: AcquisitionSource,
    /// Whole percent of total revenue, rounded independently per source.
    pub percentage: u32,
    pub color: String,
    pub label: String,
}

/// Computes one share per entry of `sources`, in that order.
///
/// Shares are rounded on their own and are not adjusted to add up to 100.
/// Zero total revenue gives every source a zero share.
pub fn build_attribution(
    transactions: &[EnrichedTransaction<'_>],
    sources: &[AcquisitionSource],
    palette: &ColorPalette,
) -> PulseResult<Vec<AttributionShare>> {
    let mut by_source: HashMap<&AcquisitionSource, f64> = HashMap::new();
    let mut total_revenue = 0.0;
    for txn in transactions {
        *by_source.entry(txn.source()).or_default() += txn.revenue();
        total_revenue += txn.revenue();
    }

    sources
        .iter()
        .map(|source| {
            let colors = palette.source(source)?;
            let revenue = by_source.get(source).copied().unwrap_or(0.0);
            Ok(AttributionShare {
                source: source.clone(),
                percentage: share_of(revenue, total_revenue),
                color: colors.node_color.clone(),
                label: source.display_name(),
            })
        })
        .collect()
}

fn share_of(revenue: f64, total: f64) -> u32 {
    if total == 0.0 {
        return 0;
    }
    let pct = (revenue / total * 100.0).round();
    if pct.is_finite() {
        pct.clamp(0.0, 100.0) as u32
    } else {
        0
    }
}
