//! DELETE rendering.

use crate::ast::DeleteStatement;
use crate::error::TranslateResult;
use crate::transpiler::{Clause, Emit, Renderer};

impl Renderer<'_> {
    pub fn render_delete(&mut self, statement: &DeleteStatement) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_delete(self, statement)? == Emit::Rendered {
            return Ok(());
        }
        self.render_delete_clause(statement)?;
        self.render_restriction(Clause::Where, " where ", statement.restriction.as_ref())?;
        self.render_returning(&statement.returning)
    }

    /// `delete from <target>`
    pub fn render_delete_clause(&mut self, statement: &DeleteStatement) -> TranslateResult<()> {
        self.in_clause(Clause::Delete, |r| {
            r.append("delete from ");
            r.render_dml_target(&statement.target)
        })
    }
}
