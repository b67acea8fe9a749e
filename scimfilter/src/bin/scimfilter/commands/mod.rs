pub mod aliases;
pub mod build;
pub mod normalize;
pub mod parse;
pub mod search;
pub mod strategy;

use scimfilter::search::OperatorCode;

/// clap value parser for operator codes (`sw`, `ew`, `co`, `eq`)
pub fn parse_operator(value: &str) -> Result<OperatorCode, String> {
    value.parse::<OperatorCode>().map_err(|err| err.to_string())
}

/// Join trailing words back into one query string
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
