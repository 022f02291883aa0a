//! Scenario parameters for one planning run.

use serde::{Deserialize, Serialize};

use super::id::{FacilityId, WarehouseId};

/// Explicit parameter set handed to the normalizer and model builder.
///
/// Target lists are ordered; reports follow the configured order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub target_facilities: Vec<FacilityId>,
    pub target_warehouses: Vec<WarehouseId>,
    #[serde(default = "default_days_per_year")]
    pub days_per_year: u32,
    #[serde(default = "default_amortization_years")]
    pub amortization_years: u32,
    /// Ceiling on total annual cost.
    pub budget_limit: f64,
    /// Exact number of sites to open.
    #[serde(default = "default_site_count")]
    pub site_count: usize,
}

const fn default_days_per_year() -> u32 {
    365
}

const fn default_amortization_years() -> u32 {
    10
}

const fn default_site_count() -> usize {
    2
}

impl Scenario {
    pub fn new(
        target_facilities: impl IntoIterator<Item = impl Into<FacilityId>>,
        target_warehouses: impl IntoIterator<Item = impl Into<WarehouseId>>,
        budget_limit: f64,
    ) -> Self {
        Self {
            target_facilities: target_facilities.into_iter().map(Into::into).collect(),
            target_warehouses: target_warehouses.into_iter().map(Into::into).collect(),
            days_per_year: default_days_per_year(),
            amortization_years: default_amortization_years(),
            budget_limit,
            site_count: default_site_count(),
        }
    }

    #[must_use]
    pub fn with_site_count(mut self, site_count: usize) -> Self {
        self.site_count = site_count;
        self
    }

    #[must_use]
    pub fn with_budget(mut self, budget_limit: f64) -> Self {
        self.budget_limit = budget_limit;
        self
    }

    #[must_use]
    pub fn with_days_per_year(mut self, days_per_year: u32) -> Self {
        self.days_per_year = days_per_year;
        self
    }

    #[must_use]
    pub fn with_amortization_years(mut self, amortization_years: u32) -> Self {
        self.amortization_years = amortization_years;
        self
    }
}
