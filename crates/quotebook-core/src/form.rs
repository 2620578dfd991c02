//! New-quote form state

use crate::models::Quote;

/// Two-field add-quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteForm {
    pub text: String,
    pub category: String,
}

impl QuoteForm {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// The trimmed quote, or `None` when either field is blank.
    pub fn submit(&self) -> Option<Quote> {
        Quote::new(&self.text, &self.category)
    }

    /// Clear both fields.
    pub fn reset(&mut self) {
        self.text.clear();
        self.category.clear();
    }
}
