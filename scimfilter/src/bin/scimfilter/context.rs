use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use scimfilter::config::{CONFIG_DIR, CONFIG_FILE, ScimFilterConfig};

/// Resolved configuration for a CLI invocation
pub struct ConfigContext {
    /// Where the configuration was read from, if anywhere
    pub config_path: Option<PathBuf>,
    /// Loaded configuration (defaults when no file was found)
    pub config: ScimFilterConfig,
}

impl ConfigContext {
    /// Use `explicit` when given, otherwise search from the current directory
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let current_dir = std::env::current_dir().context("Failed to get current directory")?;
                Self::find_from(&current_dir)
            }
        }
    }

    /// Find `.scimfilter/config.toml` in `start` or any parent directory
    pub fn find_from(start: &Path) -> Result<Self> {
        match Self::find_config_file(start) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self {
                config_path: None,
                config: ScimFilterConfig::default(),
            }),
        }
    }

    /// Load a config file that must exist
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("Config file {} does not exist", path.display());
        }
        let config = ScimFilterConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    fn find_config_file(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_DIR).join(CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Human description of the configuration source
    pub fn source(&self) -> String {
        self.config_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scimfilter::search::OperatorCode;

    #[test]
    fn test_defaults_when_nothing_found() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ConfigContext::find_from(dir.path()).unwrap();
        assert!(ctx.config_path.is_none());
        assert_eq!(ctx.source(), "built-in defaults");
        assert_eq!(ctx.config, ScimFilterConfig::default());
    }

    #[test]
    fn test_finds_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(config_dir.join(CONFIG_FILE), "[search]\ndefault_operator = \"eq\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = ConfigContext::find_from(&nested).unwrap();
        assert_eq!(ctx.config_path.as_deref(), Some(config_dir.join(CONFIG_FILE).as_path()));
        assert_eq!(ctx.config.search.default_operator, OperatorCode::Eq);
    }

    #[test]
    fn test_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(ConfigContext::resolve(Some(&missing)).is_err());
    }
}
