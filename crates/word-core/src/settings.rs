//! Engine settings loaded from TOML.
//!
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml(toml)` parses and validates a custom file
//!
//! Settings are plain values handed to constructors; nothing here is global.

use std::time::Duration;

use serde::Deserialize;

use crate::loader::RetryPolicy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source: SourceSettings,
    pub cache: CacheSettings,
    pub frequency: FrequencySettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub url: String,
    pub max_attempts: u32,
    pub backoff_ms: u64,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub schema_version: String,
    pub max_age_hours: u64,
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FrequencySettings {
    pub chunk_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub word_anagram_limit: usize,
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.source.max_attempts,
            base_delay: Duration::from_millis(self.source.backoff_ms),
            timeout: Duration::from_millis(self.source.timeout_ms),
        }
    }

    pub fn max_cache_age(&self) -> Duration {
        Duration::from_secs(self.cache.max_age_hours * 3600)
    }
}

impl Default for Settings {
    fn default() -> Self {
        // Covered by `parse_default_toml`; the embedded file is always valid.
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }
    macro_rules! check_not_blank {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_not_blank!(source.url);
    check_positive!(source.max_attempts);
    check_positive!(source.timeout_ms);

    check_not_blank!(cache.schema_version);
    check_not_blank!(cache.key);
    check_positive!(cache.max_age_hours);

    check_positive!(frequency.chunk_size);
    check_positive!(search.word_anagram_limit);

    if !(s.source.url.starts_with("http://") || s.source.url.starts_with("https://")) {
        return Err(SettingsError::InvalidValue {
            field: "source.url".to_string(),
            reason: "must be an http(s) URL".to_string(),
        });
    }

    Ok(())
}
