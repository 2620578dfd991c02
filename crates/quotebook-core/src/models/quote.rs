//! Quote model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::normalize_field;

/// A short quote with its category label.
///
/// Quotes carry no identity field: two quotes are the same quote when their
/// serialized form is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    /// Quote body
    pub text: String,
    /// Category label used for filtering
    pub category: String,
}

impl Quote {
    /// Create a quote from raw field values.
    ///
    /// Returns `None` when either field is empty after trimming. Stored values
    /// are the trimmed ones.
    #[must_use]
    pub fn new(text: &str, category: &str) -> Option<Self> {
        Some(Self {
            text: normalize_field(text)?,
            category: normalize_field(category)?,
        })
    }

    /// Whether both fields are non-empty after trimming.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.text.trim().is_empty() && !self.category.trim().is_empty()
    }

    /// Compact JSON form used as the merge equality key.
    #[must_use]
    pub fn content_key(&self) -> String {
        // Two owned strings always serialize.
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}

/// Decode a JSON array of quote records.
///
/// `source_name` labels the data origin in the returned [`Error::Decode`].
/// Every element must carry non-empty `text` and `category` strings.
pub fn decode_quote_list(raw: &str, source_name: &'static str) -> Result<Vec<Quote>> {
    let quotes: Vec<Quote> = serde_json::from_str(raw)
        .map_err(|error| Error::decode(source_name, error.to_string()))?;

    if let Some(index) = quotes.iter().position(|quote| !quote.is_valid()) {
        return Err(Error::decode(
            source_name,
            format!("record {index} has an empty text or category"),
        ));
    }

    Ok(quotes)
}
