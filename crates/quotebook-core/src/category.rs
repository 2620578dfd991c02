//! Category filter options and the current selection

use serde::Serialize;

/// One selectable entry of the category filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Render the filter option list: the "all" entry first, then one entry per
/// category in the order given.
pub fn render_options(categories: &[String]) -> Vec<FilterOption> {
    let mut options = Vec::with_capacity(categories.len() + 1);
    options.push(FilterOption {
        value: CategoryFilter::ALL.to_string(),
        label: CategoryFilter::ALL_LABEL.to_string(),
    });
    options.extend(categories.iter().map(|category| FilterOption {
        value: category.clone(),
        label: category.clone(),
    }));
    options
}

/// Currently selected category filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: String,
}

impl CategoryFilter {
    /// Filter value that matches every quote.
    pub const ALL: &'static str = "all";
    /// Display label of the match-everything option.
    pub const ALL_LABEL: &'static str = "All Categories";

    pub fn new() -> Self {
        Self {
            selected: Self::ALL.to_string(),
        }
    }

    /// Change the selection to an option value, matched exactly.
    ///
    /// Blank input selects "all".
    pub fn select(&mut self, value: &str) {
        self.selected = if value.trim().is_empty() {
            Self::ALL.to_string()
        } else {
            value.to_string()
        };
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn is_all(&self) -> bool {
        self.selected == Self::ALL
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self::new()
    }
}
