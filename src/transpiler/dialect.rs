use serde::{Deserialize, Serialize};

use crate::config::DialectConfig;
use crate::transpiler::sql::generic::GenericDialect;
use crate::transpiler::sql::spanner::SpannerDialect;
use crate::transpiler::traits::SqlDialect;

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Standard syntax, no emulation.
    Generic,
    /// Cloud Spanner (GoogleSQL).
    #[default]
    Spanner,
}

impl Dialect {
    pub fn sql_dialect(self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Generic => &GenericDialect,
            Dialect::Spanner => &SpannerDialect,
        }
    }

    /// Built-in configuration for the dialect.
    pub fn default_config(self) -> DialectConfig {
        match self {
            Dialect::Generic => DialectConfig::generic(),
            Dialect::Spanner => DialectConfig::spanner(),
        }
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" | "ansi" => Ok(Dialect::Generic),
            "spanner" | "googlesql" => Ok(Dialect::Spanner),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}
