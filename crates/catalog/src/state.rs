//! Filter, sort and pagination state for one browsing session.
//!
//! [`FilterState`] is the single source of truth for what the catalog query
//! looks like. Every mutation goes through [`FilterState::apply`], which
//! enforces the page-reset rule: changing any filter field sends the user
//! back to page 1, while changing the sort order or the page does not.

use shelfwise_core::ViewMode;

use crate::api::CatalogQuery;

/// Sentinel category meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Largest accepted price bound.
pub const PRICE_MAX_LIMIT: u32 = 3000;

/// Price bound of a fresh session; values below it show an active-filter chip.
pub const DEFAULT_PRICE_MAX: u32 = 2000;

/// Sort key of a fresh session.
pub const DEFAULT_SORT: &str = "rating";

/// Server-defined sort key. Opaque to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortKey(String);

impl SortKey {
    /// Create a sort key; blank input falls back to [`DEFAULT_SORT`].
    #[must_use]
    pub fn new(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() {
            Self::default()
        } else {
            Self(key.to_string())
        }
    }

    /// The key as sent to the service.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SortKey {
    fn default() -> Self {
        Self(DEFAULT_SORT.to_string())
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A removable filter field (one active-filter chip each).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Query,
    Category,
    Author,
    InStock,
    PriceMax,
}

impl FilterField {
    /// All removable fields, in chip order.
    pub const ALL: [Self; 5] = [
        Self::Query,
        Self::Category,
        Self::Author,
        Self::InStock,
        Self::PriceMax,
    ];

    /// Query parameter name for the field.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Query => "q",
            Self::Category => "category",
            Self::Author => "author",
            Self::InStock => "in_stock",
            Self::PriceMax => "price_max",
        }
    }
}

/// One mutation of the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterUpdate {
    /// Free-text search term (trimmed).
    Query(String),
    /// Category name; blank means [`ALL_CATEGORIES`].
    Category(String),
    /// Price bound, clamped to `[0, PRICE_MAX_LIMIT]`.
    PriceMax(i64),
    /// Author filter (trimmed).
    Author(String),
    /// In-stock-only toggle.
    InStockOnly(bool),
    /// Sort key. Keeps the current page.
    Sort(SortKey),
    /// Page number, at least 1.
    Page(u32),
    /// Result layout. Not a filter; keeps the current page.
    ViewMode(ViewMode),
    /// Reset one field to its default.
    Remove(FilterField),
    /// Reset every filter field; sort and view mode are kept.
    ClearAll,
}

/// Subset of the state recoverable from the address bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSeed {
    pub query: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
}

/// Current catalog query of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    query: String,
    category: String,
    price_max: u32,
    author: String,
    in_stock_only: bool,
    sort: SortKey,
    page: u32,
    view_mode: ViewMode,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            category: ALL_CATEGORIES.to_string(),
            price_max: DEFAULT_PRICE_MAX,
            author: String::new(),
            in_stock_only: false,
            sort: SortKey::default(),
            page: 1,
            view_mode: ViewMode::default(),
        }
    }
}

impl FilterState {
    /// A fresh state with the given layout preference.
    #[must_use]
    pub fn with_view_mode(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub const fn price_max(&self) -> u32 {
        self.price_max
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub const fn in_stock_only(&self) -> bool {
        self.in_stock_only
    }

    #[must_use]
    pub const fn sort(&self) -> &SortKey {
        &self.sort
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Whether a category other than [`ALL_CATEGORIES`] is selected.
    #[must_use]
    pub fn has_category(&self) -> bool {
        self.category != ALL_CATEGORIES
    }

    /// Apply one mutation.
    ///
    /// Every filter change resets the page to 1; `Sort`, `Page` and
    /// `ViewMode` leave it alone.
    pub fn apply(&mut self, update: FilterUpdate) {
        let resets_page = !matches!(
            update,
            FilterUpdate::Sort(_) | FilterUpdate::Page(_) | FilterUpdate::ViewMode(_)
        );

        match update {
            FilterUpdate::Query(query) => query.trim().clone_into(&mut self.query),
            FilterUpdate::Category(category) => self.category = sanitize_category(&category),
            FilterUpdate::PriceMax(price) => self.price_max = clamp_price(price),
            FilterUpdate::Author(author) => author.trim().clone_into(&mut self.author),
            FilterUpdate::InStockOnly(in_stock) => self.in_stock_only = in_stock,
            FilterUpdate::Sort(sort) => self.sort = sort,
            FilterUpdate::Page(page) => self.page = page.max(1),
            FilterUpdate::ViewMode(mode) => self.view_mode = mode,
            FilterUpdate::Remove(field) => self.reset_field(field),
            FilterUpdate::ClearAll => {
                for field in FilterField::ALL {
                    self.reset_field(field);
                }
            }
        }

        if resets_page {
            self.page = 1;
        }
    }

    /// Seed from an address without the page-reset rule.
    ///
    /// Absent fields keep their current values; the page is applied last.
    pub fn apply_seed(&mut self, seed: AddressSeed) {
        if let Some(query) = seed.query {
            query.trim().clone_into(&mut self.query);
        }
        if let Some(category) = seed.category {
            self.category = sanitize_category(&category);
        }
        if let Some(author) = seed.author {
            author.trim().clone_into(&mut self.author);
        }
        if let Some(sort) = seed.sort {
            self.sort = SortKey::new(&sort);
        }
        if let Some(page) = seed.page {
            self.page = page.max(1);
        }
    }

    /// Filter fields currently differing from their defaults, in chip order.
    #[must_use]
    pub fn active_filters(&self) -> Vec<FilterField> {
        FilterField::ALL
            .into_iter()
            .filter(|field| match field {
                FilterField::Query => !self.query.is_empty(),
                FilterField::Category => self.has_category(),
                FilterField::Author => !self.author.is_empty(),
                FilterField::InStock => self.in_stock_only,
                FilterField::PriceMax => self.price_max < DEFAULT_PRICE_MAX,
            })
            .collect()
    }

    /// Catalog request for the current state.
    #[must_use]
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery {
            q: self.query.clone(),
            category: if self.has_category() {
                self.category.clone()
            } else {
                String::new()
            },
            price_max: self.price_max,
            author: self.author.clone(),
            in_stock: self.in_stock_only,
            sort: self.sort.as_str().to_string(),
            page: self.page,
        }
    }

    fn reset_field(&mut self, field: FilterField) {
        match field {
            FilterField::Query => self.query.clear(),
            FilterField::Category => ALL_CATEGORIES.clone_into(&mut self.category),
            FilterField::Author => self.author.clear(),
            FilterField::InStock => self.in_stock_only = false,
            FilterField::PriceMax => self.price_max = DEFAULT_PRICE_MAX,
        }
    }
}

fn sanitize_category(category: &str) -> String {
    let category = category.trim();
    if category.is_empty() {
        ALL_CATEGORIES.to_string()
    } else {
        category.to_string()
    }
}

fn clamp_price(price: i64) -> u32 {
    u32::try_from(price.clamp(0, i64::from(PRICE_MAX_LIMIT))).unwrap_or(PRICE_MAX_LIMIT)
}
