//! Transaction enricher: attaches the age group to each transaction and
//! drops those rejected by the active filters.

use pulse_core::types::{EnrichedTransaction, Transaction};
use tracing::debug;

use crate::filter_set::FilterSet;

/// Classifies every transaction without filtering.
pub fn enrich(transactions: &[Transaction]) -> Vec<EnrichedTransaction<'_>> {
    transactions.iter().map(EnrichedTransaction::new).collect()
}

/// Classifies every transaction and keeps those admitted by `filters`.
/// Input order is preserved. `None` or an inactive filter set keeps all.
pub fn enrich_and_filter<'a>(
    transactions: &'a [Transaction],
    filters: Option<&FilterSet>,
) -> Vec<EnrichedTransaction<'a>> {
    let enriched = enrich(transactions);
    let filters = match filters {
        Some(f) if f.is_active() => f,
        _ => return enriched,
    };

    let kept: Vec<_> = enriched.into_iter().filter(|t| filters.matches(t)).collect();
    debug!(
        total = transactions.len(),
        kept = kept.len(),
        "Applied transaction filters"
    );
    kept
}
