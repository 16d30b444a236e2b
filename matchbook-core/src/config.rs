//! Workspace configuration, loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::{MatchbookError, MatchbookResult};

/// Top-level configuration for the matchbook system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchbookConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,
    /// Bind address for the read API.
    pub bind_addr: String,
    /// Default page size when the client does not send one.
    pub default_page_size: u32,
    /// Hard upper bound on page size.
    pub max_page_size: u32,
}

impl Default for MatchbookConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("matchbook.db"),
            bind_addr: "127.0.0.1:3001".to_string(),
            default_page_size: constants::DEFAULT_PAGE_SIZE,
            max_page_size: constants::MAX_PAGE_SIZE,
        }
    }
}

impl MatchbookConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> MatchbookResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| MatchbookError::InvalidConfig(format!("read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| MatchbookError::InvalidConfig(format!("parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the file named by `MATCHBOOK_CONFIG`, or defaults if unset.
    pub fn load_from_env() -> MatchbookResult<Self> {
        match std::env::var("MATCHBOOK_CONFIG") {
            Ok(path) => Self::load(Path::new(&path)),
            Err(_) => Ok(Self::default()),
        }
    }

    fn validate(&self) -> MatchbookResult<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(MatchbookError::InvalidConfig(
                "page sizes must be at least 1".to_string(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(MatchbookError::InvalidConfig(format!(
                "default_page_size {} exceeds max_page_size {}",
                self.default_page_size, self.max_page_size
            )));
        }
        // PageRequest clamps to the hard bound regardless, so a larger
        // configured maximum would silently not apply.
        if self.max_page_size > constants::MAX_PAGE_SIZE {
            return Err(MatchbookError::InvalidConfig(format!(
                "max_page_size {} exceeds hard bound {}",
                self.max_page_size,
                constants::MAX_PAGE_SIZE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchbookConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_page_size, 25);
    }

    #[test]
    fn rejects_default_above_max() {
        let config = MatchbookConfig {
            default_page_size: 500,
            max_page_size: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_max_above_hard_bound() {
        let config = MatchbookConfig {
            max_page_size: constants::MAX_PAGE_SIZE + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let config: MatchbookConfig =
            toml::from_str("bind_addr = \"0.0.0.0:8080\"").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.max_page_size, 200);
    }
}
