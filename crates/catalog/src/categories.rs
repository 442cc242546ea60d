//! Category options offered by the category selector.

use crate::state::ALL_CATEGORIES;

/// Categories used when the page was served without a category list.
pub const FALLBACK_CATEGORIES: [&str; 12] = [
    "Fiction",
    "Non-Fiction",
    "Science Fiction",
    "Fantasy",
    "Romance",
    "Mystery",
    "Thriller",
    "Biography",
    "History",
    "Children's",
    "Academic",
    "Science",
];

/// The selectable categories, always led by [`ALL_CATEGORIES`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptions {
    options: Vec<String>,
}

impl Default for CategoryOptions {
    fn default() -> Self {
        Self::resolve(Vec::new())
    }
}

impl CategoryOptions {
    /// Build the option list from server-supplied names.
    ///
    /// Blank names, duplicates and the `All` sentinel are dropped. If nothing
    /// usable remains, [`FALLBACK_CATEGORIES`] is used instead.
    #[must_use]
    pub fn resolve(server: Vec<String>) -> Self {
        let mut names: Vec<String> = Vec::with_capacity(server.len());
        for name in server {
            let name = name.trim();
            if name.is_empty() || name == ALL_CATEGORIES || names.iter().any(|n| n == name) {
                continue;
            }
            names.push(name.to_string());
        }

        if names.is_empty() {
            names = FALLBACK_CATEGORIES.iter().map(ToString::to_string).collect();
        }

        let mut options = Vec::with_capacity(names.len() + 1);
        options.push(ALL_CATEGORIES.to_string());
        options.extend(names);
        Self { options }
    }

    /// All options, `All` first.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Map a requested category onto a known option.
    ///
    /// Matching ignores case and surrounding whitespace and returns the
    /// canonical spelling; unknown names select `All`.
    #[must_use]
    pub fn normalize(&self, requested: &str) -> String {
        let requested = requested.trim();
        self.options
            .iter()
            .find(|option| option.eq_ignore_ascii_case(requested))
            .cloned()
            .unwrap_or_else(|| ALL_CATEGORIES.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_when_server_list_empty() {
        let options = CategoryOptions::resolve(Vec::new());
        assert_eq!(options.options().len(), FALLBACK_CATEGORIES.len() + 1);
        assert_eq!(options.options().first().map(String::as_str), Some("All"));
        assert!(options.options().iter().any(|o| o == "Children's"));
    }

    #[test]
    fn test_server_list_is_cleaned() {
        let options = CategoryOptions::resolve(vec![
            "All".to_string(),
            " Poetry ".to_string(),
            String::new(),
            "Poetry".to_string(),
            "Drama".to_string(),
        ]);
        assert_eq!(options.options(), ["All", "Poetry", "Drama"]);
    }

    #[test]
    fn test_normalize_known_and_unknown() {
        let options = CategoryOptions::default();
        assert_eq!(options.normalize("fantasy"), "Fantasy");
        assert_eq!(options.normalize(" Science Fiction "), "Science Fiction");
        assert_eq!(options.normalize("Cookbooks"), "All");
        assert_eq!(options.normalize(""), "All");
        assert_eq!(options.normalize("all"), "All");
    }
}
