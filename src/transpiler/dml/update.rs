//! UPDATE rendering.

use crate::ast::{Assignment, UpdateStatement};
use crate::error::TranslateResult;
use crate::transpiler::{Clause, Emit, Renderer};

impl Renderer<'_> {
    pub fn render_update(&mut self, statement: &UpdateStatement) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_update(self, statement)? == Emit::Rendered {
            return Ok(());
        }
        self.render_update_clause(statement)?;
        self.render_set_clause(&statement.assignments)?;
        self.render_restriction(Clause::Where, " where ", statement.restriction.as_ref())?;
        self.render_returning(&statement.returning)
    }

    /// `update <target>`
    pub fn render_update_clause(&mut self, statement: &UpdateStatement) -> TranslateResult<()> {
        self.in_clause(Clause::Update, |r| {
            r.append("update ");
            r.render_dml_target(&statement.target)
        })
    }

    /// ` set c=v,...`
    pub fn render_set_clause(&mut self, assignments: &[Assignment]) -> TranslateResult<()> {
        self.in_clause(Clause::Set, |r| {
            r.append(" set ");
            r.render_assignments(assignments)
        })
    }
}
