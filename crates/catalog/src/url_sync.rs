//! Address bar synchronisation.
//!
//! The address carries `q`, `category`, `sort`, `page` and, when non-empty,
//! `author`. Price bound, stock toggle and view mode are never written.
//! Updates replace the current entry; history is never pushed.

use std::sync::{Mutex, PoisonError};

use url::Url;

use crate::state::{AddressSeed, FilterField, FilterState};

const PARAM_SORT: &str = "sort";
const PARAM_PAGE: &str = "page";

/// Parameters owned by the synchroniser.
const MANAGED_PARAMS: [&str; 5] = [
    FilterField::Query.key(),
    FilterField::Category.key(),
    PARAM_SORT,
    PARAM_PAGE,
    FilterField::Author.key(),
];

/// The navigable address of the page session.
pub trait AddressBar: Send + Sync {
    /// Current address.
    fn current(&self) -> Url;

    /// Replace the current history entry with `url`.
    fn replace(&self, url: Url);
}

/// In-process address bar.
#[derive(Debug)]
pub struct MemoryAddressBar {
    url: Mutex<Url>,
    replacements: Mutex<usize>,
}

impl MemoryAddressBar {
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url: Mutex::new(url),
            replacements: Mutex::new(0),
        }
    }

    /// Number of `replace` calls so far.
    #[must_use]
    pub fn replacements(&self) -> usize {
        *self
            .replacements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl AddressBar for MemoryAddressBar {
    fn current(&self) -> Url {
        self.url
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, url: Url) {
        *self.url.lock().unwrap_or_else(PoisonError::into_inner) = url;
        *self
            .replacements
            .lock()
            .unwrap_or_else(PoisonError::into_inner) += 1;
    }
}

/// Address reflecting `filters`, keeping unrelated parameters of `current`.
#[must_use]
pub fn write_address(current: &Url, filters: &FilterState) -> Url {
    let retained: Vec<(String, String)> = current
        .query_pairs()
        .filter(|(key, _)| !MANAGED_PARAMS.contains(&&**key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = current.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(&retained);
        pairs.append_pair(FilterField::Query.key(), filters.query());
        pairs.append_pair(FilterField::Category.key(), filters.category());
        pairs.append_pair(PARAM_SORT, filters.sort().as_str());
        pairs.append_pair(PARAM_PAGE, &filters.page().to_string());
        if !filters.author().is_empty() {
            pairs.append_pair(FilterField::Author.key(), filters.author());
        }
    }
    url
}

/// Recover the address-backed subset of the filter state.
///
/// Missing parameters stay `None`; an unparsable or zero `page` is ignored.
#[must_use]
pub fn read_address(url: &Url) -> AddressSeed {
    let mut seed = AddressSeed::default();
    for (key, value) in url.query_pairs() {
        match &*key {
            "q" => seed.query = Some(value.into_owned()),
            "category" => seed.category = Some(value.into_owned()),
            "author" => seed.author = Some(value.into_owned()),
            PARAM_SORT => seed.sort = Some(value.into_owned()),
            PARAM_PAGE => {
                seed.page = value.trim().parse::<u32>().ok().filter(|page| *page >= 1);
            }
            _ => {}
        }
    }
    seed
}
