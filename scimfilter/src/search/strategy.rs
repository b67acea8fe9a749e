use super::aliases::OperatorCode;
use crate::errors::{FilterError, FilterResult};

/// Placeholder replaced by the typed search term.
pub const SEARCH_VALUE_PLACEHOLDER: &str = "%search-value%";

/// Template applied when the user types a bare term instead of a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStrategy {
    template: String,
}

impl SearchStrategy {
    /// `<attribute> <operator> %search-value%`
    pub fn new(attribute: &str, operator: OperatorCode) -> Self {
        Self {
            template: format!("{attribute} {operator} {SEARCH_VALUE_PLACEHOLDER}"),
        }
    }

    pub fn from_template(template: impl Into<String>) -> FilterResult<Self> {
        let template = template.into();
        if !template.contains(SEARCH_VALUE_PLACEHOLDER) {
            return Err(FilterError::invalid(format!(
                "search strategy '{template}' does not contain {SEARCH_VALUE_PLACEHOLDER}"
            )));
        }
        Ok(Self { template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute `term` for every placeholder occurrence.
    pub fn apply(&self, term: &str) -> String {
        self.template.replace(SEARCH_VALUE_PLACEHOLDER, term.trim())
    }
}
