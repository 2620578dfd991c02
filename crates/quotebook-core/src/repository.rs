//! In-memory quote collection and its derived category set

use crate::models::Quote;

/// Authoritative quote collection plus the categories seen so far.
///
/// Categories are kept in first-seen order and only ever grow: replacing the
/// collection unions in the new categories but never drops old ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRepository {
    quotes: Vec<Quote>,
    categories: Vec<String>,
}

impl QuoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a loaded collection.
    pub fn from_quotes(quotes: Vec<Quote>) -> Self {
        let mut repository = Self::new();
        repository.replace_all(quotes);
        repository
    }

    /// Append `quote` when both fields are non-empty after trimming.
    ///
    /// Returns `false` and leaves the repository untouched otherwise.
    pub fn add(&mut self, quote: Quote) -> bool {
        if !quote.is_valid() {
            return false;
        }
        self.insert_category(&quote.category);
        self.quotes.push(quote);
        true
    }

    /// Append every quote in `quotes`, without deduplication.
    pub fn extend(&mut self, quotes: impl IntoIterator<Item = Quote>) {
        for quote in quotes {
            self.insert_category(&quote.category);
            self.quotes.push(quote);
        }
    }

    /// Replace the collection and union its categories into the set.
    pub fn replace_all(&mut self, quotes: Vec<Quote>) {
        for quote in &quotes {
            self.insert_category(&quote.category);
        }
        self.quotes = quotes;
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    fn insert_category(&mut self, category: &str) {
        if !self.categories.iter().any(|known| known == category) {
            self.categories.push(category.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn quote(text: &str, category: &str) -> Quote {
        Quote::new(text, category).unwrap()
    }

    #[test]
    fn add_valid_quote_grows_collection_and_categories() {
        let mut repository = QuoteRepository::new();

        assert!(repository.add(quote("A", "X")));
        assert!(repository.add(quote("A", "X")));

        assert_eq!(repository.len(), 2);
        assert_eq!(repository.categories(), ["X".to_string()]);
    }

    #[test]
    fn add_rejects_blank_fields_without_side_effects() {
        let mut repository = QuoteRepository::from_quotes(vec![quote("A", "X")]);
        let before = repository.clone();

        let blank_text = Quote {
            text: "   ".to_string(),
            category: "Y".to_string(),
        };
        let blank_category = Quote {
            text: "B".to_string(),
            category: String::new(),
        };

        assert!(!repository.add(blank_text));
        assert!(!repository.add(blank_category));
        assert_eq!(repository, before);
    }

    #[test]
    fn categories_keep_first_seen_order() {
        let repository = QuoteRepository::from_quotes(vec![
            quote("1", "zeta"),
            quote("2", "alpha"),
            quote("3", "zeta"),
            quote("4", "mid"),
        ]);

        assert_eq!(repository.categories(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn replace_all_never_forgets_categories() {
        let mut repository = QuoteRepository::from_quotes(vec![quote("A", "X")]);

        repository.replace_all(vec![quote("B", "Y")]);

        assert_eq!(repository.quotes(), [quote("B", "Y")]);
        assert_eq!(repository.categories(), ["X", "Y"]);
    }

    #[test]
    fn extend_appends_duplicates() {
        let mut repository = QuoteRepository::from_quotes(vec![quote("A", "X")]);

        repository.extend(vec![quote("A", "X"), quote("B", "Y")]);

        assert_eq!(
            repository.quotes(),
            [quote("A", "X"), quote("A", "X"), quote("B", "Y")]
        );
        assert_eq!(repository.categories(), ["X", "Y"]);
    }

    fn padded(value: &str, lead: usize, trail: usize) -> String {
        format!("{}{value}{}", " \t".repeat(lead), "\n ".repeat(trail))
    }

    proptest! {
        #[test]
        fn valid_form_input_adds_exactly_one(
            text in "[A-Za-z][A-Za-z .,!?]{0,20}",
            category in "[a-z][a-z -]{0,10}",
            lead in 0usize..3,
            trail in 0usize..3,
        ) {
            let mut repository = QuoteRepository::from_quotes(vec![quote("seed", "base")]);
            let submitted = Quote::new(&padded(&text, lead, trail), &padded(&category, trail, lead));
            prop_assert!(submitted.is_some());

            prop_assert!(repository.add(submitted.unwrap()));
            prop_assert_eq!(repository.len(), 2);
            prop_assert!(repository.categories().iter().any(|known| known == category.trim()));
        }

        #[test]
        fn blank_form_input_changes_nothing(
            text in "[A-Za-z]{1,10}",
            blank in "[ \t\n]{0,4}",
            blank_text in any::<bool>(),
        ) {
            let mut repository = QuoteRepository::from_quotes(vec![quote("seed", "base")]);
            let before = repository.clone();
            let (text, category) = if blank_text {
                (blank.as_str(), text.as_str())
            } else {
                (text.as_str(), blank.as_str())
            };

            prop_assert!(Quote::new(text, category).is_none());
            let raw = Quote {
                text: text.to_string(),
                category: category.to_string(),
            };
            prop_assert!(!repository.add(raw));
            prop_assert_eq!(repository, before);
        }
    }
}
