//! Active-filter chips.

use crate::state::{FilterField, FilterState};

/// One removable chip describing an active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// Field reset when the chip is removed.
    pub field: FilterField,
    pub label: String,
}

/// Chips for every filter field that differs from its default.
#[must_use]
pub fn active_filter_chips(filters: &FilterState) -> Vec<FilterChip> {
    filters
        .active_filters()
        .into_iter()
        .map(|field| FilterChip {
            field,
            label: chip_label(filters, field),
        })
        .collect()
}

fn chip_label(filters: &FilterState, field: FilterField) -> String {
    match field {
        FilterField::Query => format!("Search: {}", filters.query()),
        FilterField::Category => filters.category().to_string(),
        FilterField::Author => format!("Author: {}", filters.author()),
        FilterField::InStock => "In Stock".to_string(),
        FilterField::PriceMax => format!("Max ₹{}", filters.price_max()),
    }
}
