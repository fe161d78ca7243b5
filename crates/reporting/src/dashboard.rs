//! Dashboard aggregation: one pure pass from a transaction snapshot to every
//! figure the dashboard renders.

use pulse_core::error::PulseResult;
use pulse_core::palette::ColorPalette;
use pulse_core::types::{TimeRange, Transaction};
use pulse_segmentation::{enrich_and_filter, FilterSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::attribution::{build_attribution, AttributionShare};
use crate::demographics::{build_demographic_graph, DemographicGraph};
use crate::kpi::{distinct_sources, partition, summarize, KpiSummary};
use crate::trend::{build_revenue_trend, TrendPoint};
use crate::window::{now_millis, PeriodWindow};

/// What to aggregate: a range, the instant it is anchored to (wall clock when
/// unset), and optional filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub range: TimeRange,
    #[serde(default)]
    pub now_ms: Option<i64>,
    #[serde(default)]
    pub filters: Option<FilterSet>,
}

impl AggregationRequest {
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            ..Default::default()
        }
    }

    pub fn at(mut self, now_ms: i64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub range: TimeRange,
    pub window: PeriodWindow,
    #[serde(flatten)]
    pub kpis: KpiSummary,
    pub demographics: DemographicGraph,
    pub attribution: Vec<AttributionShare>,
    pub revenue_trend: Vec<TrendPoint>,
}

/// Stateless aggregation engine bound to a color palette.
#[derive(Debug, Clone, Default)]
pub struct DashboardEngine {
    palette: ColorPalette,
}

impl DashboardEngine {
    pub fn new(palette: ColorPalette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    pub fn compute(
        &self,
        transactions: &[Transaction],
        request: &AggregationRequest,
    ) -> PulseResult<AggregationResult> {
        let now_ms = request.now_ms.unwrap_or_else(now_millis);
        self.compute_at(transactions, request.range, request.filters.as_ref(), now_ms)
    }

    /// Filters, windows and reduces `transactions`. Only the KPI deltas look
    /// at the comparison period; everything else is current-period only.
    pub fn compute_at(
        &self,
        transactions: &[Transaction],
        range: TimeRange,
        filters: Option<&FilterSet>,
        now_ms: i64,
    ) -> PulseResult<AggregationResult> {
        let span = debug_span!(
            "aggregate",
            range = range.label(),
            transactions = transactions.len()
        );
        let _guard = span.enter();

        let enriched = enrich_and_filter(transactions, filters);
        let window = PeriodWindow::resolve(range, now_ms);
        let periods = partition(&enriched, &window);

        let kpis = summarize(&periods);
        let sources = distinct_sources(&periods.current);
        let demographics = build_demographic_graph(&periods.current, &self.palette)?;
        let attribution = build_attribution(&periods.current, &sources, &self.palette)?;
        let revenue_trend = build_revenue_trend(&periods.current)?;

        metrics::counter!("aggregation.passes").increment(1);
        metrics::counter!("aggregation.transactions").increment(transactions.len() as u64);
        debug!(
            current = periods.current.len(),
            previous = periods.previous.len(),
            sources = sources.len(),
            trend_days = revenue_trend.len(),
            "Aggregation complete"
        );

        Ok(AggregationResult {
            range,
            window,
            kpis,
            demographics,
            attribution,
            revenue_trend,
        })
    }
}

/// Aggregates with the built-in palette.
pub fn compute(
    transactions: &[Transaction],
    range: TimeRange,
    filters: Option<&FilterSet>,
    now_ms: i64,
) -> PulseResult<AggregationResult> {
    DashboardEngine::default().compute_at(transactions, range, filters, now_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::types::{CustomerMetadata, DeviceType, Gender, DAY_MS, YEAR_MS};

    fn txn(id: &str, source: &str, day: i64, revenue: f64) -> Transaction {
        Transaction {
            transaction_id: id.into(),
            revenue_usd: revenue,
            customer_id: format!("cust-{id}"),
            transaction_time: day * DAY_MS,
            utm_source: source.into(),
            customer_metadata: CustomerMetadata {
                birthday_time: day * DAY_MS - (33.0 * YEAR_MS) as i64,
                gender: Gender::Male,
                country: "US".into(),
                device: DeviceType::Web,
            },
        }
    }

    #[test]
    fn test_request_builder() {
        let req = AggregationRequest::new(TimeRange::Last30Days).at(42);
        assert_eq!(req.range, TimeRange::Last30Days);
        assert_eq!(req.now_ms, Some(42));
        assert!(req.filters.is_none());
    }

    #[test]
    fn test_compute_at_reference_example() {
        let txns = vec![txn("a", "google", 4, 100.0), txn("b", "facebook", 10, 50.0)];
        let result = compute(&txns, TimeRange::Last7Days, None, 10 * DAY_MS).unwrap();

        assert_eq!(result.kpis.total_revenue, 150.0);
        assert_eq!(result.kpis.total_transactions, 2);
        assert_eq!(result.kpis.revenue_change_pct, 0.0);
        assert_eq!(result.demographics.links.len(), 2);
        assert_eq!(result.attribution.len(), 2);
        assert_eq!(result.revenue_trend.len(), 7);
    }

    #[test]
    fn test_engine_uses_its_palette() {
        let txns = vec![txn("a", "direct", 9, 10.0)];
        assert!(compute(&txns, TimeRange::Last7Days, None, 10 * DAY_MS).is_err());

        let mut extra = std::collections::BTreeMap::new();
        extra.insert(
            "direct".to_string(),
            pulse_core::palette::SourceColors::new("#101010", "rgba(16, 16, 16, 0.4)"),
        );
        let engine = DashboardEngine::new(ColorPalette::default().merged(extra));
        let result = engine
            .compute(&txns, &AggregationRequest::new(TimeRange::Last7Days).at(10 * DAY_MS))
            .unwrap();
        assert_eq!(result.attribution[0].color, "#101010");
    }

    #[test]
    fn test_unknown_source_outside_window_is_ignored() {
        let txns = vec![txn("a", "google", 9, 10.0), txn("b", "direct", 1, 10.0)];
        let result = compute(&txns, TimeRange::Last7Days, None, 10 * DAY_MS).unwrap();
        assert_eq!(result.kpis.total_transactions, 1);
    }

    #[test]
    fn test_result_wire_shape_flattens_kpis() {
        let txns = vec![txn("a", "google", 9, 10.0)];
        let result = compute(&txns, TimeRange::AllTime, None, 10 * DAY_MS).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["range"], "all");
        assert_eq!(json["total_revenue"], 10.0);
        assert_eq!(json["unique_customers"], 1);
        assert_eq!(json["window"]["prev_end"], 0);
        assert_eq!(json["attribution"][0]["percentage"], 100);
    }
}
