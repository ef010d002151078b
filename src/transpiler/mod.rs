//! SQL renderer for the portable statement AST.
//!
//! A [`Renderer`] walks one statement depth-first and writes SQL text,
//! offering each overridable node to a [`SqlDialect`] first. The generic
//! dialect takes every default; the Spanner dialect emulates what Spanner
//! lacks.

pub mod clause;
pub mod conditions;
pub mod ddl;
pub mod dialect;
pub mod dml;
pub mod expr;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use serde::Serialize;

use crate::ast::{Parameter, QuerySpec, Statement};
use crate::config::DialectConfig;
use crate::error::TranslateResult;
use crate::types::SqlType;

pub use clause::Clause;
pub use ddl::{QualifiedTableName, TemporaryColumn, TemporaryTable, TemporaryTableExporter};
pub use dialect::Dialect;
pub use sql::generic::GenericDialect;
pub use sql::spanner::SpannerDialect;
pub use traits::{Emit, SqlDialect};

/// How the locks a query asks for are acquired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStrategy {
    /// No locking at all.
    #[default]
    None,
    /// A lock clause on the query (`for update`).
    Clause,
    /// Locks taken by follow-up statements the caller issues.
    FollowOn,
}

/// A `?` placeholder written into the SQL, in text order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterBinding {
    /// 1-based position
    pub position: usize,
    pub name: Option<String>,
    pub sql_type: SqlType,
}

/// Result of translating one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub sql: String,
    pub parameters: Vec<ParameterBinding>,
    /// Physical tables the statement reads or writes.
    pub affected_tables: BTreeSet<String>,
    pub lock_strategy: LockStrategy,
}

/// Per-query rendering context.
///
/// Each (sub)query is rendered with its own scope, so nothing leaks from a
/// LATERAL wrapper into queries nested below it.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryScope<'q> {
    /// Rendered inside a correlated `unnest(array(..))` wrapper.
    pub correlated: bool,
    /// Positional aliases forced onto the selections.
    pub column_aliases: &'q [String],
}

impl<'q> QueryScope<'q> {
    pub fn correlated(column_aliases: &'q [String]) -> Self {
        Self { correlated: true, column_aliases }
    }

    pub fn aliased(column_aliases: &'q [String]) -> Self {
        Self { correlated: false, column_aliases }
    }
}

/// Translate a statement.
///
/// # Example
/// ```
/// use qail_spanner::ast::builders::*;
/// use qail_spanner::ast::{DeleteStatement, Statement};
/// use qail_spanner::config::DialectConfig;
/// use qail_spanner::transpiler::{translate, Dialect};
///
/// let stmt = Statement::Delete(DeleteStatement::new(table("t")));
/// let out = translate(&stmt, Dialect::Spanner, &DialectConfig::spanner()).unwrap();
/// assert_eq!(out.sql, "delete from t where true");
/// ```
pub fn translate(
    statement: &Statement,
    dialect: Dialect,
    config: &DialectConfig,
) -> TranslateResult<Translation> {
    let sql_dialect = dialect.sql_dialect();
    tracing::debug!("Translating {} statement for {}", statement.kind(), sql_dialect.name());
    let mut renderer = Renderer::new(sql_dialect, config);
    match renderer.render_statement(statement) {
        Ok(()) => {
            let translation = renderer.finish();
            tracing::debug!(
                "Rendered {} chars, {} parameter(s)",
                translation.sql.len(),
                translation.parameters.len()
            );
            Ok(translation)
        }
        Err(e) => {
            tracing::debug!("Translation of {} statement failed: {}", statement.kind(), e);
            Err(e)
        }
    }
}

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to SQL for the default dialect.
    fn to_sql(&self) -> TranslateResult<String> {
        self.to_sql_with_dialect(Dialect::default())
    }
    /// Convert this node to SQL for a specific dialect, using its default config.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> TranslateResult<String>;
}

impl ToSql for Statement {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> TranslateResult<String> {
        translate(self, dialect, &dialect.default_config()).map(|t| t.sql)
    }
}

impl ToSql for QuerySpec {
    fn to_sql_with_dialect(&self, dialect: Dialect) -> TranslateResult<String> {
        let config = dialect.default_config();
        let mut renderer = Renderer::new(dialect.sql_dialect(), &config);
        renderer.render_query(self, QueryScope::default())?;
        Ok(renderer.finish().sql)
    }
}

/// Depth-first SQL writer for one statement.
///
/// Owns the output buffer, the clause stack, the parameter list and the
/// affected-table set. Rendering methods are spread over the submodules:
/// expressions in `expr`, predicates in `conditions`, queries and DML in
/// `dml`.
pub struct Renderer<'a> {
    dialect: &'a dyn SqlDialect,
    config: &'a DialectConfig,
    sql: String,
    clauses: Vec<Clause>,
    parameters: Vec<ParameterBinding>,
    affected_tables: BTreeSet<String>,
    lock_strategy: LockStrategy,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn SqlDialect, config: &'a DialectConfig) -> Self {
        Self {
            dialect,
            config,
            sql: String::new(),
            clauses: Vec::new(),
            parameters: Vec::new(),
            affected_tables: BTreeSet::new(),
            lock_strategy: LockStrategy::None,
        }
    }

    pub fn config(&self) -> &'a DialectConfig {
        self.config
    }

    /// SQL written so far.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn append(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    pub fn append_char(&mut self, c: char) {
        self.sql.push(c);
    }

    /// Innermost clause being rendered.
    pub fn current_clause(&self) -> Option<Clause> {
        self.clauses.last().copied()
    }

    /// Run `f` with `clause` pushed. The clause is popped on every exit path.
    pub fn in_clause<T>(
        &mut self,
        clause: Clause,
        f: impl FnOnce(&mut Self) -> TranslateResult<T>,
    ) -> TranslateResult<T> {
        self.clauses.push(clause);
        let result = f(self);
        self.clauses.pop();
        result
    }

    pub fn register_affected_table(&mut self, table: &str) {
        self.affected_tables.insert(table.to_string());
    }

    /// Write a `?` and record its binding.
    pub fn add_parameter(&mut self, parameter: &Parameter) {
        self.parameters.push(ParameterBinding {
            position: self.parameters.len() + 1,
            name: parameter.name.clone(),
            sql_type: parameter.sql_type,
        });
        self.sql.push('?');
    }

    pub fn render_statement(&mut self, statement: &Statement) -> TranslateResult<()> {
        match statement {
            Statement::Select(query) => self.render_query(query, QueryScope::default()),
            Statement::Insert(insert) => self.render_insert(insert),
            Statement::Update(update) => self.render_update(update),
            Statement::Delete(delete) => self.render_delete(delete),
        }
    }

    /// Write `items` separated by `separator`, rendering each with `f`.
    pub fn render_list<T>(
        &mut self,
        items: &[T],
        separator: &str,
        mut f: impl FnMut(&mut Self, &T) -> TranslateResult<()>,
    ) -> TranslateResult<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(separator);
            }
            f(self, item)?;
        }
        Ok(())
    }

    pub fn finish(self) -> Translation {
        Translation {
            sql: self.sql,
            parameters: self.parameters,
            affected_tables: self.affected_tables,
            lock_strategy: self.lock_strategy,
        }
    }
}
