//! Status enums for catalog items and display preferences.

use serde::{Deserialize, Serialize};

/// Stock availability derived from an item's stock count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "remaining")]
pub enum StockStatus {
    /// Nothing left; add-to-cart is disabled.
    OutOfStock,
    /// Fewer than [`StockStatus::LOW_STOCK_THRESHOLD`] copies left.
    LowStock(u32),
    /// Plenty of copies.
    InStock,
}

impl StockStatus {
    /// Counts strictly below this are reported as low stock.
    pub const LOW_STOCK_THRESHOLD: i64 = 10;

    /// Classify a raw stock count. Negative counts are treated as zero.
    #[must_use]
    pub fn from_stock(stock: i64) -> Self {
        if stock <= 0 {
            Self::OutOfStock
        } else if stock < Self::LOW_STOCK_THRESHOLD {
            Self::LowStock(u32::try_from(stock).unwrap_or(0))
        } else {
            Self::InStock
        }
    }

    /// Whether the item can be added to the cart.
    #[must_use]
    pub const fn is_available(self) -> bool {
        !matches!(self, Self::OutOfStock)
    }

    /// Badge text shown on the item card.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::OutOfStock => "Out of Stock".to_string(),
            Self::LowStock(remaining) => format!("Only {remaining} left"),
            Self::InStock => "In Stock".to_string(),
        }
    }
}

/// Errors that can occur when parsing a [`ViewMode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid view mode: {0}")]
pub struct ViewModeError(pub String);

/// Result list layout preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    /// Stored / wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ViewMode {
    type Err = ViewModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => Err(ViewModeError(other.to_string())),
        }
    }
}
