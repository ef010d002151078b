//! DML rendering.
//!
//! SELECT lives in `select`; INSERT, UPDATE and DELETE share the target and
//! RETURNING helpers below.

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

use crate::ast::{Assignment, ColumnReference, NamedTableReference};
use crate::error::TranslateResult;
use crate::transpiler::{Clause, Emit, Renderer};

impl Renderer<'_> {
    /// Target table of a DML statement.
    pub fn render_dml_target(&mut self, target: &NamedTableReference) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_dml_target(self, target)? == Emit::Rendered {
            return Ok(());
        }
        self.default_dml_target(target);
        Ok(())
    }

    /// The table name alone; the table is registered as affected.
    pub fn default_dml_target(&mut self, target: &NamedTableReference) {
        self.append(&target.table);
        self.register_affected_table(&target.table);
    }

    /// ` returning c1,c2`
    pub fn render_returning(&mut self, columns: &[ColumnReference]) -> TranslateResult<()> {
        if columns.is_empty() {
            return Ok(());
        }
        self.in_clause(Clause::Returning, |r| {
            r.append(" returning ");
            r.render_list(columns, ",", |r, column| {
                r.render_column(column);
                Ok(())
            })
        })
    }

    /// `c=v,c2=v2`, column names unqualified.
    pub fn render_assignments(&mut self, assignments: &[Assignment]) -> TranslateResult<()> {
        self.render_list(assignments, ",", |r, assignment| {
            r.append(&assignment.column.name);
            r.append_char('=');
            r.render_expr(&assignment.value)
        })
    }
}
