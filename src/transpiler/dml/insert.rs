//! INSERT rendering.

use crate::ast::{ConflictAction, ConflictClause, InsertSource, InsertStatement};
use crate::error::TranslateResult;
use crate::transpiler::{Clause, Emit, QueryScope, Renderer};

impl Renderer<'_> {
    pub fn render_insert(&mut self, statement: &InsertStatement) -> TranslateResult<()> {
        if let Some(conflict) = &statement.conflict {
            let dialect = self.dialect;
            if dialect.render_insert_with_conflict(self, statement, conflict)? == Emit::Rendered {
                return Ok(());
            }
        }
        self.in_clause(Clause::Insert, |r| {
            r.append("insert into ");
            r.render_dml_target(&statement.target)?;
            if !statement.columns.is_empty() {
                r.append(" (");
                r.append(&statement.columns.join(","));
                r.append_char(')');
            }
            Ok(())
        })?;
        self.append_char(' ');
        self.render_insert_source(&statement.source)?;
        if let Some(conflict) = &statement.conflict {
            self.default_conflict_clause(conflict)?;
        }
        self.render_returning(&statement.returning)
    }

    /// `values (..),(..)` or the source query.
    pub fn render_insert_source(&mut self, source: &InsertSource) -> TranslateResult<()> {
        match source {
            InsertSource::Values(rows) if rows.is_empty() => {
                self.append("default values");
                Ok(())
            }
            InsertSource::Values(rows) => self.in_clause(Clause::Values, |r| {
                r.append("values ");
                r.render_list(rows, ",", |r, row| {
                    r.append_char('(');
                    r.render_list(row, ",", |r, value| r.render_expr(value))?;
                    r.append_char(')');
                    Ok(())
                })
            }),
            InsertSource::Query(query) => self.render_query(query, QueryScope::default()),
        }
    }

    /// ` on conflict[ on constraint n| (cols)] do nothing|do update set ..[ where p]`
    pub fn default_conflict_clause(&mut self, conflict: &ConflictClause) -> TranslateResult<()> {
        self.in_clause(Clause::Conflict, |r| {
            r.append(" on conflict");
            if let Some(name) = &conflict.constraint_name {
                r.append(" on constraint ");
                r.append(name);
            } else if !conflict.constraint_columns.is_empty() {
                r.append(" (");
                r.append(&conflict.constraint_columns.join(","));
                r.append_char(')');
            }
            match &conflict.action {
                ConflictAction::DoNothing => {
                    r.append(" do nothing");
                    Ok(())
                }
                ConflictAction::DoUpdate(assignments) => {
                    r.append(" do update set ");
                    r.render_assignments(assignments)?;
                    r.render_restriction(Clause::Where, " where ", conflict.predicate.as_ref())
                }
            }
        })
    }
}
