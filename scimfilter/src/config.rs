//! TOML configuration stored in `.scimfilter/config.toml`.

use std::collections::BTreeMap;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{FilterError, FilterResult};
use crate::search::{
    AliasTableBuilder, OperatorAliasTable, OperatorCode, QueryMode, QueryNormalizer, SearchStrategy,
    SearchSubmission,
};

pub const CONFIG_DIR: &str = ".scimfilter";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScimFilterConfig {
    #[serde(default)]
    pub search: SearchSettings,
    /// Extra phrases per operator code, added on top of the defaults.
    #[serde(default)]
    pub aliases: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_attribute")]
    pub default_attribute: String,
    #[serde(default = "default_operator")]
    pub default_operator: OperatorCode,
    #[serde(default = "default_process_queries")]
    pub process_queries: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_attribute: default_attribute(),
            default_operator: default_operator(),
            process_queries: default_process_queries(),
        }
    }
}

fn default_attribute() -> String {
    "name".to_string()
}

fn default_operator() -> OperatorCode {
    OperatorCode::Co
}

fn default_process_queries() -> bool {
    true
}

impl ScimFilterConfig {
    pub fn from_toml_str(content: &str) -> FilterResult<Self> {
        let config: Self = toml::from_str(content).map_err(|err| FilterError::Config {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when it does not exist.
    pub fn load(path: &Path) -> FilterResult<Self> {
        if !path.exists() {
            warn!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> FilterResult<String> {
        toml::to_string_pretty(self).map_err(|err| FilterError::Config {
            message: err.to_string(),
        })
    }

    fn validate(&self) -> FilterResult<()> {
        let attribute = self.search.default_attribute.trim();
        if attribute.is_empty() || attribute.contains(char::is_whitespace) {
            return Err(FilterError::Config {
                message: format!(
                    "search.default_attribute must be a single word, got '{}'",
                    self.search.default_attribute
                ),
            });
        }
        Ok(())
    }

    /// Default phrases plus everything under `[aliases]`.
    pub fn alias_table(&self) -> FilterResult<OperatorAliasTable> {
        let mut builder = AliasTableBuilder::with_defaults();
        for (code, phrases) in &self.aliases {
            let code: OperatorCode = code.parse()?;
            builder = builder.aliases(code, phrases.iter().cloned());
        }
        builder.build()
    }

    pub fn normalizer(&self) -> FilterResult<QueryNormalizer> {
        if self.aliases.is_empty() {
            return Ok(QueryNormalizer::default());
        }
        Ok(QueryNormalizer::new(self.alias_table()?))
    }

    pub fn strategy(&self) -> SearchStrategy {
        SearchStrategy::new(self.search.default_attribute.trim(), self.search.default_operator)
    }

    pub fn query_mode(&self) -> QueryMode {
        QueryMode::from_flag(self.search.process_queries)
    }

    pub fn submission(&self) -> FilterResult<SearchSubmission> {
        Ok(SearchSubmission::new(self.normalizer()?, self.strategy(), self.query_mode()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScimFilterConfig::default();
        assert_eq!(config.search.default_attribute, "name");
        assert_eq!(config.search.default_operator, OperatorCode::Co);
        assert!(config.search.process_queries);
        assert!(config.aliases.is_empty());
        assert_eq!(config.strategy().template(), "name co %search-value%");
    }

    #[test]
    fn test_config_serialization() {
        let config = ScimFilterConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("default_attribute"));
        assert!(toml_str.contains("default_operator = \"co\""));
        assert_eq!(ScimFilterConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ScimFilterConfig::from_toml_str(
            r#"
            [search]
            default_operator = "sw"
            "#,
        )
        .unwrap();
        assert_eq!(config.search.default_attribute, "name");
        assert_eq!(config.search.default_operator, OperatorCode::Sw);
    }

    #[test]
    fn test_aliases_extend_normalizer() {
        let config = ScimFilterConfig::from_toml_str(
            r#"
            [search]
            process_queries = false

            [aliases]
            sw = ["begins with"]
            eq = ["is"]
            "#,
        )
        .unwrap();
        assert_eq!(config.query_mode(), QueryMode::Verbatim);
        let normalizer = config.normalizer().unwrap();
        assert_eq!(normalizer.normalize("name begins with jo"), "name sw jo");
        assert_eq!(normalizer.normalize("age is 30"), "age eq 30");
        assert_eq!(normalizer.normalize("name contains jo"), "name co jo");
    }

    #[test]
    fn test_conflicting_alias_is_rejected() {
        let config = ScimFilterConfig::from_toml_str(
            r#"
            [aliases]
            co = ["starts with"]
            "#,
        )
        .unwrap();
        assert!(matches!(config.alias_table(), Err(FilterError::AliasConflict { .. })));
    }

    #[test]
    fn test_unknown_alias_code_is_rejected() {
        let config = ScimFilterConfig::from_toml_str(
            r#"
            [aliases]
            gt = ["greater than"]
            "#,
        )
        .unwrap();
        assert!(matches!(config.normalizer(), Err(FilterError::UnknownOperator { operator }) if operator == "gt"));
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let err = ScimFilterConfig::from_toml_str("[search]\ndefault_operator = \"gt\"\n")
            .expect_err("unknown operator code");
        assert!(matches!(err, FilterError::Config { .. }));

        let err = ScimFilterConfig::from_toml_str("[search]\ndefault_attribute = \"user name\"\n")
            .expect_err("attribute with space");
        assert!(matches!(err, FilterError::Config { message } if message.contains("default_attribute")));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScimFilterConfig::load(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, ScimFilterConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[search]\ndefault_attribute = \"emails\"\n").unwrap();
        let config = ScimFilterConfig::load(&path).unwrap();
        assert_eq!(config.strategy().apply("jo"), "emails co jo");
    }
}
