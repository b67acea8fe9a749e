//! Rewrites free-text search phrases into `attribute code value` filters.
//!
//! `name starts with john doe` becomes `name sw john doe`. The first word is
//! always the attribute and is never scanned. The remaining words are scanned
//! left to right for a known alias phrase; at every position a one-word
//! phrase is tried before a two-word phrase. Input with no recognizable
//! phrase is returned unchanged, so canonical filters pass straight through.

use std::borrow::Cow;

use log::debug;

use super::aliases::{DEFAULT_ALIASES, OperatorAliasTable, OperatorCode};

/// Normalize with the default alias table.
pub fn normalize(raw: &str) -> String {
    QueryNormalizer::default().normalize(raw)
}

/// Location of the operator phrase inside the tokens following the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub code: OperatorCode,
    /// Index of the first phrase token, counted after the attribute.
    pub start: usize,
    /// Number of tokens the phrase spans (1 or 2).
    pub width: usize,
}

impl PhraseMatch {
    #[inline]
    fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Outcome of scanning a raw query.
#[derive(Debug, Clone)]
pub struct Normalization<'q> {
    raw: &'q str,
    tokens: Vec<&'q str>,
    matched: Option<PhraseMatch>,
}

impl<'q> Normalization<'q> {
    pub fn raw(&self) -> &'q str {
        self.raw
    }

    pub fn attribute(&self) -> &'q str {
        self.tokens.first().copied().unwrap_or_default()
    }

    pub fn matched(&self) -> Option<PhraseMatch> {
        self.matched
    }

    pub fn code(&self) -> Option<OperatorCode> {
        self.matched.map(|m| m.code)
    }

    pub fn is_rewritten(&self) -> bool {
        self.matched.is_some()
    }

    /// The phrase that was recognized, joined with single spaces.
    pub fn phrase(&self) -> Option<String> {
        let m = self.matched?;
        Some(self.rest()[m.start..m.end()].join(" "))
    }

    /// Everything after the phrase, joined with single spaces.
    pub fn value(&self) -> Option<String> {
        let m = self.matched?;
        Some(self.rest()[m.end()..].join(" "))
    }

    /// The filter to send downstream.
    pub fn render(&self) -> Cow<'q, str> {
        match (self.code(), self.value()) {
            (Some(code), Some(value)) => Cow::Owned(format!("{} {} {}", self.attribute(), code, value)),
            _ => Cow::Borrowed(self.raw),
        }
    }

    fn rest(&self) -> &[&'q str] {
        self.tokens.get(1..).unwrap_or(&[])
    }
}

/// Normalizer bound to an alias table.
#[derive(Debug, Clone)]
pub struct QueryNormalizer {
    aliases: Cow<'static, OperatorAliasTable>,
}

impl Default for QueryNormalizer {
    fn default() -> Self {
        Self {
            aliases: Cow::Borrowed(&*DEFAULT_ALIASES),
        }
    }
}

impl QueryNormalizer {
    pub fn new(aliases: OperatorAliasTable) -> Self {
        Self {
            aliases: Cow::Owned(aliases),
        }
    }

    pub fn aliases(&self) -> &OperatorAliasTable {
        &self.aliases
    }

    /// Rewrite `raw` into canonical form, or return it unchanged.
    pub fn normalize(&self, raw: &str) -> String {
        self.analyze(raw).render().into_owned()
    }

    /// Scan `raw` and report where the operator phrase sits, if anywhere.
    pub fn analyze<'q>(&self, raw: &'q str) -> Normalization<'q> {
        let tokens: Vec<&'q str> = raw.split(' ').collect();
        let matched = tokens.get(1..).and_then(|rest| self.find_phrase(rest));

        match matched {
            Some(m) => debug!("normalized query {raw:?}: operator {} at token {}", m.code, m.start + 1),
            None => debug!("query {raw:?} has no operator phrase, passing through"),
        }

        Normalization { raw, tokens, matched }
    }

    fn find_phrase(&self, rest: &[&str]) -> Option<PhraseMatch> {
        for (start, token) in rest.iter().enumerate() {
            if let Some(code) = self.aliases.code_for(token) {
                return Some(PhraseMatch { code, start, width: 1 });
            }
            if let Some(next) = rest.get(start + 1) {
                let pair = format!("{token} {next}");
                if let Some(code) = self.aliases.code_for(&pair) {
                    return Some(PhraseMatch { code, start, width: 2 });
                }
            }
        }
        None
    }
}
