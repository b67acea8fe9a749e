use log::debug;
use serde::{Deserialize, Serialize};

use super::normalizer::QueryNormalizer;
use super::strategy::SearchStrategy;

/// Whether submitted text goes through the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    #[default]
    Process,
    Verbatim,
}

impl QueryMode {
    #[inline]
    pub const fn from_flag(process: bool) -> Self {
        if process { QueryMode::Process } else { QueryMode::Verbatim }
    }
}

/// Filter sent downstream for a submitted query.
pub fn submit(normalizer: &QueryNormalizer, mode: QueryMode, query: &str) -> String {
    match mode {
        QueryMode::Process => normalizer.normalize(query),
        QueryMode::Verbatim => query.to_string(),
    }
}

/// Search box behaviour: strategy for bare terms, normalizer for filters.
#[derive(Debug, Clone)]
pub struct SearchSubmission {
    pub normalizer: QueryNormalizer,
    pub strategy: SearchStrategy,
    pub mode: QueryMode,
}

impl SearchSubmission {
    pub fn new(normalizer: QueryNormalizer, strategy: SearchStrategy, mode: QueryMode) -> Self {
        Self {
            normalizer,
            strategy,
            mode,
        }
    }

    /// Resolve whatever the user typed into the filter to send.
    ///
    /// A single word is a search term and is expanded through the strategy.
    /// Anything longer is treated as a filter and submitted per `mode`.
    /// Blank input yields an empty filter.
    pub fn resolve(&self, input: &str) -> String {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return String::new();
        }
        if !trimmed.contains(char::is_whitespace) {
            debug!("expanding bare term {trimmed:?} with search strategy");
            return self.strategy.apply(trimmed);
        }
        submit(&self.normalizer, self.mode, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::OperatorCode;

    fn submission(mode: QueryMode) -> SearchSubmission {
        SearchSubmission::new(
            QueryNormalizer::default(),
            SearchStrategy::new("userName", OperatorCode::Sw),
            mode,
        )
    }

    #[test]
    fn submit_processes_or_forwards() {
        let normalizer = QueryNormalizer::default();
        assert_eq!(submit(&normalizer, QueryMode::Process, "name contains jo"), "name co jo");
        assert_eq!(
            submit(&normalizer, QueryMode::Verbatim, "name contains jo"),
            "name contains jo"
        );
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(QueryMode::from_flag(true), QueryMode::Process);
        assert_eq!(QueryMode::from_flag(false), QueryMode::Verbatim);
    }

    #[test]
    fn resolve_expands_bare_terms() {
        assert_eq!(submission(QueryMode::Process).resolve("  john "), "userName sw john");
    }

    #[test]
    fn resolve_normalizes_filters_in_process_mode() {
        assert_eq!(
            submission(QueryMode::Process).resolve("name ends with doe"),
            "name ew doe"
        );
        assert_eq!(
            submission(QueryMode::Verbatim).resolve("name ends with doe"),
            "name ends with doe"
        );
    }

    #[test]
    fn resolve_blank_input() {
        assert_eq!(submission(QueryMode::Process).resolve("   "), "");
    }
}
