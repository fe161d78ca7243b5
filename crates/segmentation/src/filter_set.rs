//! Filter criteria applied to transactions before windowing.
//!
//! Dimensions combine with AND; the values selected within one dimension
//! combine with OR. An empty dimension lets every transaction through.

use pulse_core::types::{AcquisitionSource, AgeGroup, EnrichedTransaction, Gender};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::selection::Selection;

/// Revenue band with an inclusive minimum and an inclusive (or absent) maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevenueRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl RevenueRange {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn bounded(min: f64, max: f64) -> Self {
        Self::new(min, Some(max))
    }

    pub fn at_least(min: f64) -> Self {
        Self::new(min, None)
    }

    pub fn contains(&self, revenue: f64) -> bool {
        revenue >= self.min && self.max.map_or(true, |max| revenue <= max)
    }
}

impl fmt::Display for RevenueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "${}-${}", self.min, max),
            None => write!(f, "${}+", self.min),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    #[serde(default)]
    pub sources: Selection<AcquisitionSource>,
    #[serde(default)]
    pub genders: Selection<Gender>,
    #[serde(default)]
    pub age_groups: Selection<AgeGroup>,
    #[serde(default)]
    pub revenue_ranges: Selection<RevenueRange>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one dimension restricts the transaction set.
    pub fn is_active(&self) -> bool {
        !(self.sources.is_empty()
            && self.genders.is_empty()
            && self.age_groups.is_empty()
            && self.revenue_ranges.is_empty())
    }

    pub fn matches(&self, txn: &EnrichedTransaction<'_>) -> bool {
        let revenue = txn.revenue();
        self.sources.admits(txn.source())
            && self.genders.admits(&txn.transaction.customer_metadata.gender)
            && self.age_groups.admits(&txn.age_group)
            && self.revenue_ranges.admits_by(|range| range.contains(revenue))
    }

    pub fn toggle_source(&mut self, source: impl Into<AcquisitionSource>) -> bool {
        self.sources.toggle(source.into())
    }

    pub fn toggle_gender(&mut self, gender: Gender) -> bool {
        self.genders.toggle(gender)
    }

    pub fn toggle_age_group(&mut self, group: AgeGroup) -> bool {
        self.age_groups.toggle(group)
    }

    pub fn toggle_revenue_range(&mut self, range: RevenueRange) -> bool {
        self.revenue_ranges.toggle(range)
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.genders.clear();
        self.age_groups.clear();
        self.revenue_ranges.clear();
    }
}
