//! Transaction filtering and enrichment: toggleable per-dimension
//! selections, revenue bands, and the age-group enricher.

pub mod builder;
pub mod enricher;
pub mod filter_set;
pub mod selection;

pub use builder::FilterBuilder;
pub use enricher::{enrich, enrich_and_filter};
pub use filter_set::{FilterSet, RevenueRange};
pub use selection::Selection;
