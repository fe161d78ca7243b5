//! Filter builder: fluent API for constructing filter criteria.

use pulse_core::types::{AcquisitionSource, AgeGroup, Gender};

use crate::filter_set::{FilterSet, RevenueRange};

#[derive(Debug, Default)]
pub struct FilterBuilder {
    filters: FilterSet,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(mut self, source: impl Into<AcquisitionSource>) -> Self {
        self.filters.sources.insert(source.into());
        self
    }

    pub fn sources<S: Into<AcquisitionSource>>(
        mut self,
        sources: impl IntoIterator<Item = S>,
    ) -> Self {
        for source in sources {
            self.filters.sources.insert(source.into());
        }
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.filters.genders.insert(gender);
        self
    }

    pub fn age_group(mut self, group: AgeGroup) -> Self {
        self.filters.age_groups.insert(group);
        self
    }

    pub fn revenue_between(mut self, min: f64, max: f64) -> Self {
        self.filters.revenue_ranges.insert(RevenueRange::bounded(min, max));
        self
    }

    pub fn revenue_at_least(mut self, min: f64) -> Self {
        self.filters.revenue_ranges.insert(RevenueRange::at_least(min));
        self
    }

    pub fn revenue_range(mut self, range: RevenueRange) -> Self {
        self.filters.revenue_ranges.insert(range);
        self
    }

    pub fn build(self) -> FilterSet {
        self.filters
    }
}
