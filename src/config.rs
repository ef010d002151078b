//! Dialect configuration.
//!
//! Read-only capabilities the translator and the DDL builder consult. Loaded
//! from TOML, e.g. `~/.config/qail/spanner.toml`:
//!
//! ```toml
//! follow_on_locking = false
//! lowercase_function = "lower"
//! literal_escape = "backslash"
//!
//! [temporary_table]
//! supports_null_constraint = true
//! supports_primary_key = true
//!
//! [temporary_table.column_annotations]
//! timestamp = "options (allow_commit_timestamp=true)"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TranslateError, TranslateResult};
use crate::types::SqlType;

/// Env var pointing at a config file.
pub const CONFIG_ENV: &str = "QAIL_SPANNER_CONFIG";

/// How string literals are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralEscape {
    /// `'it''s'`
    Standard,
    /// `'it\'s'`, backslashes doubled (GoogleSQL string literals)
    #[default]
    Backslash,
}

/// Temporary-table capabilities of the dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporaryTableStrategy {
    /// Extra text after the type of a column, keyed by type name (`timestamp`, `big_int`, ...).
    pub column_annotations: BTreeMap<String, String>,
    /// Emit `not null` / null markers on columns.
    pub supports_null_constraint: bool,
    /// Emit a `primary key (..)` clause.
    pub supports_primary_key: bool,
}

impl Default for TemporaryTableStrategy {
    fn default() -> Self {
        Self {
            column_annotations: BTreeMap::new(),
            supports_null_constraint: true,
            supports_primary_key: true,
        }
    }
}

impl TemporaryTableStrategy {
    pub fn column_annotation(&self, sql_type: SqlType) -> &str {
        self.column_annotations
            .get(sql_type.name())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Dialect configuration shared read-only by every translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// The dialect prefers locking through follow-up statements.
    pub follow_on_locking: bool,
    /// Function used to emulate case-insensitive LIKE.
    pub lowercase_function: String,
    pub literal_escape: LiteralEscape,
    pub create_table_string: String,
    /// Marker appended to nullable columns in DDL (often empty).
    pub null_column_string: String,
    /// DDL type names overriding the built-in GoogleSQL ones, keyed by type name.
    pub type_names: BTreeMap<String, String>,
    pub temporary_table: Option<TemporaryTableStrategy>,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::spanner()
    }
}

impl DialectConfig {
    /// Cloud Spanner defaults.
    pub fn spanner() -> Self {
        Self {
            follow_on_locking: false,
            lowercase_function: "lower".to_string(),
            literal_escape: LiteralEscape::Backslash,
            create_table_string: "create table".to_string(),
            null_column_string: String::new(),
            type_names: BTreeMap::new(),
            temporary_table: Some(TemporaryTableStrategy::default()),
        }
    }

    /// ANSI-flavoured defaults for the generic dialect.
    pub fn generic() -> Self {
        Self {
            literal_escape: LiteralEscape::Standard,
            ..Self::spanner()
        }
    }

    /// Create a builder starting from the Spanner defaults.
    pub fn builder() -> DialectConfigBuilder {
        DialectConfigBuilder::default()
    }

    /// Load a config file. Missing keys fall back to the Spanner defaults.
    pub fn load(path: impl AsRef<Path>) -> TranslateResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: DialectConfig = toml::from_str(&text)?;
        tracing::debug!("Loaded dialect config from {}", path.display());
        Ok(config)
    }

    /// Explicit path, then `$QAIL_SPANNER_CONFIG`, then the user config dir.
    pub fn discover(explicit: Option<&Path>) -> TranslateResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::spanner()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("qail").join("spanner.toml"))
    }

    pub fn to_toml(&self) -> TranslateResult<String> {
        toml::to_string_pretty(self).map_err(|e| TranslateError::config(e.to_string()))
    }

    /// Render a string as a SQL literal.
    pub fn quote_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        match self.literal_escape {
            LiteralEscape::Standard => out.push_str(&value.replace('\'', "''")),
            LiteralEscape::Backslash => {
                for c in value.chars() {
                    match c {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\n' => out.push_str("\\n"),
                        other => out.push(other),
                    }
                }
            }
        }
        out.push('\'');
        out
    }

    /// DDL type name for a column type.
    pub fn type_name(&self, sql_type: SqlType) -> &str {
        self.type_names
            .get(sql_type.name())
            .map(String::as_str)
            .unwrap_or_else(|| sql_type.spanner_type_name())
    }

    pub fn temporary_table_strategy(&self) -> TranslateResult<&TemporaryTableStrategy> {
        self.temporary_table.as_ref().ok_or_else(|| {
            TranslateError::config("dialect returned no temporary table strategy")
        })
    }
}

/// Builder for DialectConfig
#[derive(Debug, Default)]
pub struct DialectConfigBuilder {
    config: DialectConfig,
}

impl DialectConfigBuilder {
    pub fn follow_on_locking(mut self, enabled: bool) -> Self {
        self.config.follow_on_locking = enabled;
        self
    }

    pub fn lowercase_function(mut self, name: impl Into<String>) -> Self {
        self.config.lowercase_function = name.into();
        self
    }

    pub fn literal_escape(mut self, escape: LiteralEscape) -> Self {
        self.config.literal_escape = escape;
        self
    }

    pub fn null_column_string(mut self, marker: impl Into<String>) -> Self {
        self.config.null_column_string = marker.into();
        self
    }

    pub fn type_name(mut self, sql_type: SqlType, name: impl Into<String>) -> Self {
        self.config.type_names.insert(sql_type.name().to_string(), name.into());
        self
    }

    pub fn temporary_table(mut self, strategy: Option<TemporaryTableStrategy>) -> Self {
        self.config.temporary_table = strategy;
        self
    }

    pub fn build(self) -> DialectConfig {
        self.config
    }
}
