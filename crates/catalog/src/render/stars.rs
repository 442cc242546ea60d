//! Star rating display.

/// Number of symbols in a full rating.
pub const MAX_STARS: u8 = 5;

const FULL: char = '★';
const HALF: char = '⯪';
const EMPTY: char = '☆';

/// Star breakdown for a 0-5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarRating {
    /// No usable rating; shown as a neutral indicator.
    Unrated,
    /// `full + half + empty == MAX_STARS`.
    Stars { full: u8, half: bool, empty: u8 },
}

impl StarRating {
    /// Break a rating into star symbols.
    ///
    /// Missing, zero and non-finite ratings are [`StarRating::Unrated`];
    /// anything else is clamped to `[0, 5]` first.
    #[must_use]
    pub fn from_rating(rating: Option<f64>) -> Self {
        let Some(rating) = rating.filter(|r| r.is_finite() && *r > 0.0) else {
            return Self::Unrated;
        };

        let rating = rating.min(f64::from(MAX_STARS));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let full = rating.floor() as u8;
        let half = full < MAX_STARS && rating.fract() >= 0.5;
        let empty = MAX_STARS - full - u8::from(half);

        Self::Stars { full, half, empty }
    }

    /// Symbols to draw, or an empty vec when unrated.
    #[must_use]
    pub fn symbols(self) -> Vec<char> {
        match self {
            Self::Unrated => Vec::new(),
            Self::Stars { full, half, empty } => std::iter::repeat_n(FULL, full.into())
                .chain(half.then_some(HALF))
                .chain(std::iter::repeat_n(EMPTY, empty.into()))
                .collect(),
        }
    }

    /// Text form used by plain-text views.
    #[must_use]
    pub fn render_text(self) -> String {
        match self {
            Self::Unrated => "No rating".to_string(),
            Self::Stars { .. } => self.symbols().into_iter().collect(),
        }
    }
}
