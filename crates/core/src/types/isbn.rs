//! Book identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Isbn`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IsbnError {
    /// The input string is empty (after trimming).
    #[error("isbn cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("isbn must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or characters that cannot appear in a URL path segment.
    #[error("isbn contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// An ISBN-like catalog key.
///
/// The catalog service keys books by ISBN-13, but older records carry ISBN-10
/// values or vendor SKUs, so only the structural shape is checked here.
///
/// ## Constraints
///
/// - Length: 1-32 characters after trimming
/// - Only ASCII alphanumerics and `-`
///
/// ## Examples
///
/// ```
/// use shelfwise_core::Isbn;
///
/// assert!(Isbn::parse("9780441172719").is_ok());
/// assert!(Isbn::parse("0-441-17271-7").is_ok());
///
/// assert!(Isbn::parse("").is_err());
/// assert!(Isbn::parse("978 0441").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "IsbnRepr", into = "String")]
pub struct Isbn(String);

/// Wire representation: some catalog exports serialize ISBNs as bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum IsbnRepr {
    Text(String),
    Number(u64),
}

impl Isbn {
    /// Maximum length of a catalog key.
    pub const MAX_LENGTH: usize = 32;

    /// Parse an `Isbn` from a string. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than
    /// [`Self::MAX_LENGTH`], or contains anything other than ASCII
    /// alphanumerics and hyphens.
    pub fn parse(s: &str) -> Result<Self, IsbnError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(IsbnError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(IsbnError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(IsbnError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Isbn` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Path of the book detail page for this key.
    #[must_use]
    pub fn detail_path(&self) -> String {
        format!("/book/{}", self.0)
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Isbn {
    type Err = IsbnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<IsbnRepr> for Isbn {
    type Error = IsbnError;

    fn try_from(repr: IsbnRepr) -> Result<Self, Self::Error> {
        match repr {
            IsbnRepr::Text(s) => Self::parse(&s),
            IsbnRepr::Number(n) => Self::parse(&n.to_string()),
        }
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}
