//! Schema configuration
//!
//! A deployment picks one version encoding and one timestamp strictness and
//! keeps them for every schema and controller it builds. Configuration is
//! plain data; reading it from disk is the embedding application's job.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::model::{TimestampStrictness, VersionScheme};

/// Default schema name, used in logs and external rejections
pub const DEFAULT_SCHEMA_NAME: &str = "entity";

/// Settings shared by a schema and the controller built on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaConfig {
    pub name: String,
    pub version_scheme: VersionScheme,
    pub timestamp_strictness: TimestampStrictness,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_SCHEMA_NAME.to_string(),
            version_scheme: VersionScheme::default(),
            timestamp_strictness: TimestampStrictness::default(),
        }
    }
}

impl SchemaConfig {
    /// Integer-counter versions, tolerant timestamps
    pub fn counter() -> Self {
        Self {
            version_scheme: VersionScheme::Counter,
            ..Self::default()
        }
    }

    /// `MAJOR.MINOR.PATCH` versions, tolerant timestamps
    pub fn semantic() -> Self {
        Self {
            version_scheme: VersionScheme::Semantic,
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_strictness(mut self, strictness: TimestampStrictness) -> Self {
        self.timestamp_strictness = strictness;
        self
    }

    /// Parse configuration from TOML text
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// # Example
    /// ```
    /// use basis_core::config::SchemaConfig;
    /// use basis_core::model::VersionScheme;
    ///
    /// let config = SchemaConfig::from_toml_str("version_scheme = \"counter\"").unwrap();
    /// assert_eq!(config.version_scheme, VersionScheme::Counter);
    /// ```
    ///
    /// # Errors
    /// `Config` when the text is not valid TOML or names an unknown key or
    /// variant.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
