//! Dashboard analytics: KPI aggregation with period-over-period deltas,
//! demographic flow graph, revenue attribution, and daily revenue trend.

pub mod attribution;
pub mod dashboard;
pub mod demographics;
pub mod format;
pub mod kpi;
pub mod trend;
pub mod window;

pub use attribution::{build_attribution, AttributionShare};
pub use dashboard::{compute, AggregationRequest, AggregationResult, DashboardEngine};
pub use demographics::{build_demographic_graph, DemographicGraph, GraphLink, GraphNode};
pub use format::{format_compact, format_with_affixes};
pub use kpi::{distinct_sources, partition, summarize, KpiSummary, PeriodPartition};
pub use trend::{build_revenue_trend, TrendPoint};
pub use window::PeriodWindow;
