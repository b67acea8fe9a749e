//! Operator codes and the human phrases that resolve to them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, FilterResult};

/// Phrases recognized out of the box, keyed by the code they resolve to.
const DEFAULT_PHRASES: &[(OperatorCode, &[&str])] = &[
    (OperatorCode::Sw, &["start with", "starts with"]),
    (OperatorCode::Ew, &["end with", "ends with"]),
    (OperatorCode::Co, &["contain", "contains"]),
    (OperatorCode::Eq, &["equal", "equals"]),
];

/// Longest phrase, in words, the normalizer scan can see.
pub const MAX_PHRASE_WORDS: usize = 2;

/// The alias table every default normalizer shares.
pub static DEFAULT_ALIASES: Lazy<OperatorAliasTable> = Lazy::new(|| {
    let mut table = OperatorAliasTable::empty();
    for (code, phrases) in DEFAULT_PHRASES {
        for phrase in *phrases {
            table.push_unchecked(*code, phrase);
        }
    }
    table
});

/// Machine operator understood by the downstream filter API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorCode {
    Sw,
    Ew,
    Co,
    Eq,
}

impl OperatorCode {
    /// Every code, in the order the condition dropdown lists them.
    pub const ALL: [OperatorCode; 4] = [OperatorCode::Sw, OperatorCode::Ew, OperatorCode::Co, OperatorCode::Eq];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            OperatorCode::Sw => "sw",
            OperatorCode::Ew => "ew",
            OperatorCode::Co => "co",
            OperatorCode::Eq => "eq",
        }
    }

    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            OperatorCode::Sw => "Starts with",
            OperatorCode::Ew => "Ends with",
            OperatorCode::Co => "Contains",
            OperatorCode::Eq => "Equals",
        }
    }
}

impl fmt::Display for OperatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorCode {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownOperator {
                operator: s.to_string(),
            })
    }
}

/// Immutable mapping from operator codes to the phrases that stand for them.
///
/// Phrase sets are disjoint: a phrase resolves to exactly one code. Use
/// [`AliasTableBuilder`] to construct anything other than [`DEFAULT_ALIASES`].
#[derive(Debug, Clone, Default)]
pub struct OperatorAliasTable {
    phrases: HashMap<OperatorCode, Vec<String>>,
    lookup: HashMap<String, OperatorCode>,
}

impl OperatorAliasTable {
    fn empty() -> Self {
        Self::default()
    }

    /// Start a builder seeded with the default phrases.
    pub fn builder() -> AliasTableBuilder {
        AliasTableBuilder::with_defaults()
    }

    /// Code a phrase resolves to, if any. Matching is exact.
    #[inline]
    pub fn code_for(&self, phrase: &str) -> Option<OperatorCode> {
        self.lookup.get(phrase).copied()
    }

    /// Phrases registered for a code, in insertion order.
    pub fn phrases(&self, code: OperatorCode) -> &[String] {
        self.phrases.get(&code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Codes with their phrases, in dropdown order.
    pub fn iter(&self) -> impl Iterator<Item = (OperatorCode, &[String])> + '_ {
        OperatorCode::ALL.into_iter().map(move |code| (code, self.phrases(code)))
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    fn push_unchecked(&mut self, code: OperatorCode, phrase: &str) {
        self.lookup.insert(phrase.to_string(), code);
        self.phrases.entry(code).or_default().push(phrase.to_string());
    }

    fn insert(&mut self, code: OperatorCode, phrase: &str) -> FilterResult<()> {
        match self.lookup.get(phrase) {
            Some(existing) if *existing == code => Ok(()),
            Some(existing) => Err(FilterError::AliasConflict {
                phrase: phrase.to_string(),
                existing: *existing,
                requested: code,
            }),
            None => {
                self.push_unchecked(code, phrase);
                Ok(())
            }
        }
    }
}

/// Collects phrases and validates them into an [`OperatorAliasTable`].
#[derive(Debug, Clone, Default)]
pub struct AliasTableBuilder {
    entries: Vec<(OperatorCode, String)>,
}

impl AliasTableBuilder {
    /// Builder with no phrases at all.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let entries = DEFAULT_PHRASES
            .iter()
            .flat_map(|(code, phrases)| phrases.iter().map(move |phrase| (*code, phrase.to_string())))
            .collect();
        Self { entries }
    }

    #[inline]
    pub fn alias(mut self, code: OperatorCode, phrase: impl Into<String>) -> Self {
        self.entries.push((code, phrase.into()));
        self
    }

    pub fn aliases<S: Into<String>>(mut self, code: OperatorCode, phrases: impl IntoIterator<Item = S>) -> Self {
        self.entries.extend(phrases.into_iter().map(|phrase| (code, phrase.into())));
        self
    }

    /// Validate every phrase and freeze the table.
    ///
    /// Phrases are trimmed. A phrase must be one or two words separated by a
    /// single space, must not be a machine code itself, and must not already
    /// belong to a different code.
    pub fn build(self) -> FilterResult<OperatorAliasTable> {
        let mut table = OperatorAliasTable::empty();
        for (code, raw) in self.entries {
            let phrase = raw.trim();
            validate_phrase(phrase)?;
            table.insert(code, phrase)?;
        }
        Ok(table)
    }
}

fn validate_phrase(phrase: &str) -> FilterResult<()> {
    if phrase.is_empty() {
        return Err(FilterError::invalid("alias phrase must not be empty"));
    }
    let words: Vec<&str> = phrase.split(' ').collect();
    if words.iter().any(|word| word.is_empty() || word.chars().any(char::is_whitespace)) {
        return Err(FilterError::invalid(format!(
            "alias phrase '{phrase}' must separate words with single spaces"
        )));
    }
    if words.len() > MAX_PHRASE_WORDS {
        return Err(FilterError::invalid(format!(
            "alias phrase '{phrase}' has {} words, at most {MAX_PHRASE_WORDS} are supported",
            words.len()
        )));
    }
    if phrase.parse::<OperatorCode>().is_ok() {
        return Err(FilterError::invalid(format!(
            "alias phrase '{phrase}' collides with a machine operator code"
        )));
    }
    Ok(())
}
