//! # Search query normalization
//!
//! Turns what a user types into a search box into the three-part filter the
//! identity server understands.
//!
//! | Input                         | Output                  | Path                    |
//! |-------------------------------|-------------------------|-------------------------|
//! | `name contains john`          | `name co john`          | [`normalize`]           |
//! | `name starts with john doe`   | `name sw john doe`      | [`normalize`]           |
//! | `name eq john`                | `name eq john`          | pass-through            |
//! | `john` (bare term)            | `name co john`          | [`SearchStrategy`]      |
//!
//! Recognized phrases live in an [`OperatorAliasTable`]. The default table is
//! a process-wide static; custom tables are built with [`AliasTableBuilder`]
//! and owned by a [`QueryNormalizer`].

pub mod aliases;
pub mod expression;
pub mod normalizer;
pub mod strategy;
pub mod submission;

pub use aliases::{AliasTableBuilder, DEFAULT_ALIASES, MAX_PHRASE_WORDS, OperatorAliasTable, OperatorCode};
pub use expression::FilterExpression;
pub use normalizer::{Normalization, PhraseMatch, QueryNormalizer, normalize};
pub use strategy::{SEARCH_VALUE_PLACEHOLDER, SearchStrategy};
pub use submission::{QueryMode, SearchSubmission, submit};
