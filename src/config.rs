use crate::lir::{SearchInclude, NEWEST};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Defaults applied to search requests.
///
/// ```toml
/// default_limit = 10
/// max_limit = 100
/// default_include = "all"
/// default_sort = "newest"
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Page size when the request doesn't ask for one.
    pub default_limit: u32,
    /// Upper bound for the page size of a request.
    pub max_limit: u32,
    pub default_include: SearchInclude,
    pub default_sort: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
            default_include: SearchInclude::All,
            default_sort: NEWEST.to_string(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loading search configuration from {}", path.display());
        Self::from_toml(&content)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.max_limit == 0 {
            return Err(ConfigError::Invalid("max_limit must be positive".into()));
        }
        if self.default_limit == 0 || self.default_limit > self.max_limit {
            return Err(ConfigError::Invalid(format!(
                "default_limit must be between 1 and {}",
                self.max_limit
            )));
        }
        Ok(self)
    }

    /// Resolve the requested page into the number of documents to skip and to return.
    ///
    /// Pages start at 1, page 0 is treated as the first page. A missing or zero limit falls back
    /// to the default, larger limits are capped.
    pub fn paginate(&self, page: Option<u32>, limit: Option<u32>) -> Page {
        let limit = match limit {
            None | Some(0) => self.default_limit,
            Some(limit) => limit.min(self.max_limit),
        };
        let page = page.unwrap_or(1).max(1);

        Page {
            skip: u64::from(page - 1) * u64::from(limit),
            limit: u64::from(limit),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}
