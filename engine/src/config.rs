use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    lexer::scoring::Weights,
    search::{PageRequest, SearchError},
    search_log,
};

pub static ENV_VAR_DEFAULT_PER_PAGE: &str = "SEARCH_DEFAULT_PER_PAGE";
pub static ENV_VAR_MAX_PER_PAGE: &str = "SEARCH_MAX_PER_PAGE";
pub static ENV_VAR_EXACT_WEIGHT: &str = "SEARCH_EXACT_WEIGHT";
pub static ENV_VAR_PARTIAL_WEIGHT: &str = "SEARCH_PARTIAL_WEIGHT";

pub static DEFAULT_PER_PAGE: u64 = 10;
pub static DEFAULT_MAX_PER_PAGE: u64 = 100;
pub static DEFAULT_EXACT_WEIGHT: u32 = 2;
pub static DEFAULT_PARTIAL_WEIGHT: u32 = 1;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Environment variable {name} has invalid value '{value}'")]
    InvalidValue { name: &'static str, value: String },
    #[error("{0} must be at least 1")]
    Zero(&'static str),
    #[error("Default page size {default} exceeds the maximum page size {max}")]
    DefaultExceedsMax { default: u64, max: u64 },
}

/// Weights and paging limits shared by every search an engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub default_per_page: u64,
    pub max_per_page: u64,
    pub exact_weight: u32,
    pub partial_weight: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: DEFAULT_MAX_PER_PAGE,
            exact_weight: DEFAULT_EXACT_WEIGHT,
            partial_weight: DEFAULT_PARTIAL_WEIGHT,
        }
    }
}

fn read_var<T: FromStr>(
    name: &'static str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<Option<T>, ConfigError> {
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

impl SearchConfig {
    /// Reads every `SEARCH_*` variable, failing on the first unparsable or
    /// inconsistent value. Unset variables keep their defaults.
    pub fn from_env() -> Result<SearchConfig, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SearchConfig::from_env`], but bad values are logged and replaced
    /// by their defaults.
    pub fn from_env_or_default() -> SearchConfig {
        Self::from_lookup_or_default(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<SearchConfig, ConfigError> {
        let defaults = SearchConfig::default();
        let config = SearchConfig {
            default_per_page: read_var(ENV_VAR_DEFAULT_PER_PAGE, &lookup)?
                .unwrap_or(defaults.default_per_page),
            max_per_page: read_var(ENV_VAR_MAX_PER_PAGE, &lookup)?.unwrap_or(defaults.max_per_page),
            exact_weight: read_var(ENV_VAR_EXACT_WEIGHT, &lookup)?.unwrap_or(defaults.exact_weight),
            partial_weight: read_var(ENV_VAR_PARTIAL_WEIGHT, &lookup)?
                .unwrap_or(defaults.partial_weight),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_lookup_or_default(lookup: impl Fn(&str) -> Option<String>) -> SearchConfig {
        fn or_default<T: FromStr>(
            name: &'static str,
            lookup: &impl Fn(&str) -> Option<String>,
            default: T,
        ) -> T {
            match read_var(name, lookup) {
                Ok(value) => value.unwrap_or(default),
                Err(err) => {
                    search_log!(warn, "SearchConfig", "env", "{}, using default", err);
                    default
                }
            }
        }

        let defaults = SearchConfig::default();
        let config = SearchConfig {
            default_per_page: or_default(ENV_VAR_DEFAULT_PER_PAGE, &lookup, defaults.default_per_page),
            max_per_page: or_default(ENV_VAR_MAX_PER_PAGE, &lookup, defaults.max_per_page),
            exact_weight: or_default(ENV_VAR_EXACT_WEIGHT, &lookup, defaults.exact_weight),
            partial_weight: or_default(ENV_VAR_PARTIAL_WEIGHT, &lookup, defaults.partial_weight),
        };
        match config.validate() {
            Ok(()) => config,
            Err(err) => {
                search_log!(warn, "SearchConfig", "env", "{}, using default paging", err);
                SearchConfig {
                    default_per_page: defaults.default_per_page,
                    max_per_page: defaults.max_per_page,
                    ..config
                }
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_per_page < 1 {
            return Err(ConfigError::Zero(ENV_VAR_DEFAULT_PER_PAGE));
        }
        if self.max_per_page < 1 {
            return Err(ConfigError::Zero(ENV_VAR_MAX_PER_PAGE));
        }
        if self.default_per_page > self.max_per_page {
            return Err(ConfigError::DefaultExceedsMax {
                default: self.default_per_page,
                max: self.max_per_page,
            });
        }
        Ok(())
    }

    pub fn weights(&self) -> Weights {
        Weights {
            exact: self.exact_weight,
            partial: self.partial_weight,
        }
    }

    /// Builds a page window from optional request parameters. A missing page
    /// is the first one and a missing size is the configured default.
    pub fn page_request(
        &self,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<PageRequest, SearchError> {
        let per_page = per_page.unwrap_or(self.default_per_page);
        if per_page > self.max_per_page {
            return Err(SearchError::PerPageTooLarge {
                requested: per_page,
                max: self.max_per_page,
            });
        }
        PageRequest::new(page.unwrap_or(1), per_page)
    }
}
