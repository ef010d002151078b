//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `generic`: standard rendering with no emulation
//! - `spanner`: the Spanner emulations
//! - `ddl`: temporary-table statements

mod ddl;
mod spanner;

use crate::ast::Statement;
use crate::config::DialectConfig;
use crate::error::TranslateResult;
use crate::transpiler::{Dialect, Translation, translate};

pub(super) fn to_spanner(statement: Statement) -> TranslateResult<Translation> {
    translate(&statement, Dialect::Spanner, &DialectConfig::spanner())
}

pub(super) fn to_generic(statement: Statement) -> TranslateResult<Translation> {
    translate(&statement, Dialect::Generic, &DialectConfig::generic())
}
