//! Random quote selection and rendering

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::category::CategoryFilter;
use crate::models::Quote;

/// Message shown when the filter leaves nothing to pick from.
pub const NO_QUOTES_MESSAGE: &str = "No quotes available for this category.";

/// What the display region currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Display {
    /// Nothing has been drawn yet
    #[default]
    Blank,
    /// The candidate pool was empty
    Empty,
    /// A picked quote
    Quote(Quote),
}

impl Display {
    /// Text content of the display region.
    pub fn render(&self) -> String {
        match self {
            Self::Blank => String::new(),
            Self::Empty => NO_QUOTES_MESSAGE.to_string(),
            Self::Quote(quote) => quote.to_string(),
        }
    }

    pub const fn quote(&self) -> Option<&Quote> {
        match self {
            Self::Quote(quote) => Some(quote),
            Self::Blank | Self::Empty => None,
        }
    }
}

/// Quotes eligible for display under `selected`.
pub fn candidate_pool<'a>(quotes: &'a [Quote], selected: &str) -> Vec<&'a Quote> {
    if selected == CategoryFilter::ALL {
        quotes.iter().collect()
    } else {
        quotes
            .iter()
            .filter(|quote| quote.category == selected)
            .collect()
    }
}

/// Pick one quote uniformly at random from the pool for `selected`.
pub fn show_random<R: Rng + ?Sized>(quotes: &[Quote], selected: &str, rng: &mut R) -> Display {
    candidate_pool(quotes, selected)
        .choose(rng)
        .map_or(Display::Empty, |quote| Display::Quote((*quote).clone()))
}
