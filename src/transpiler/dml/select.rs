//! SELECT rendering: query specs, FROM items, paging and locking.

use crate::ast::{
    DerivedSource, DerivedTableReference, Expr, FollowOnLocking, LockMode, LockOptions, LockWait,
    NamedTableReference, QuerySpec, SelectClause, TableGroup, TableReference,
};
use crate::config::DialectConfig;
use crate::error::{TranslateError, TranslateResult};
use crate::transpiler::{Clause, Emit, LockStrategy, QueryScope, Renderer};

/// Locking decision when the dialect has no opinion.
///
/// Follow-on locking is used when forced, or when allowed and the dialect
/// configuration prefers it; otherwise the query carries a lock clause.
pub fn default_lock_strategy(lock: &LockOptions, config: &DialectConfig) -> LockStrategy {
    match lock.follow_on {
        FollowOnLocking::Force => LockStrategy::FollowOn,
        FollowOnLocking::Allow if config.follow_on_locking => LockStrategy::FollowOn,
        _ => LockStrategy::Clause,
    }
}

/// Positional column aliases can only be pushed onto explicit selections.
pub fn check_column_aliases(query: &QuerySpec, aliases: &[String]) -> TranslateResult<()> {
    if aliases.is_empty() {
        return Ok(());
    }
    let selections = &query.select.selections;
    if selections.iter().any(|s| s.expr == Expr::Star) {
        return Err(TranslateError::illegal(
            "Can't apply derived column names to a star selection",
        ));
    }
    if selections.len() != aliases.len() {
        return Err(TranslateError::illegal(format!(
            "Derived table declares {} column names but the query selects {} columns",
            aliases.len(),
            selections.len()
        )));
    }
    Ok(())
}

impl Renderer<'_> {
    pub fn render_query(&mut self, query: &QuerySpec, scope: QueryScope<'_>) -> TranslateResult<()> {
        self.in_clause(Clause::Select, |r| r.render_select_clause(&query.select, scope))?;
        if !query.from.is_empty() {
            self.in_clause(Clause::From, |r| {
                r.append(" from ");
                r.render_from(&query.from)
            })?;
        }
        self.render_restriction(Clause::Where, " where ", query.restriction.as_ref())?;
        if !query.group_by.is_empty() {
            self.in_clause(Clause::GroupBy, |r| {
                r.append(" group by ");
                r.render_list(&query.group_by, ",", |r, item| r.render_partition_item(item))
            })?;
        }
        self.render_restriction(Clause::Having, " having ", query.having.as_ref())?;
        if !query.order_by.is_empty() {
            self.in_clause(Clause::OrderBy, |r| {
                r.append(" order by ");
                r.render_list(&query.order_by, ",", |r, spec| r.render_sort_specification(spec))
            })?;
        }
        self.render_offset_fetch(query)?;
        self.render_for_update(query)
    }

    pub fn render_select_clause(&mut self, select: &SelectClause, scope: QueryScope<'_>) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_select_clause(self, select, scope)? == Emit::Rendered {
            return Ok(());
        }
        self.append("select ");
        if select.distinct {
            self.append("distinct ");
        }
        self.render_selections(select, scope)
    }

    /// Selections with their aliases; aliases forced by the scope win.
    pub fn render_selections(&mut self, select: &SelectClause, scope: QueryScope<'_>) -> TranslateResult<()> {
        if select.selections.is_empty() {
            self.append_char('*');
            return Ok(());
        }
        for (i, selection) in select.selections.iter().enumerate() {
            if i > 0 {
                self.append_char(',');
            }
            self.render_expr(&selection.expr)?;
            let alias = scope.column_aliases.get(i).or(selection.alias.as_ref());
            if let Some(alias) = alias {
                self.append_char(' ');
                self.append(alias);
            }
        }
        Ok(())
    }

    pub fn render_from(&mut self, groups: &[TableGroup]) -> TranslateResult<()> {
        self.render_list(groups, ",", |r, group| {
            r.render_table_reference(&group.primary)?;
            for join in &group.joins {
                r.append(join.kind.sql_text());
                r.render_table_reference(&join.table)?;
                if let Some(on) = join.on.as_ref().filter(|p| !p.is_empty()) {
                    r.append(" on ");
                    r.render_predicate(on)?;
                }
            }
            Ok(())
        })
    }

    pub fn render_table_reference(&mut self, table: &TableReference) -> TranslateResult<()> {
        match table {
            TableReference::Named(named) => {
                self.render_named_table(named);
                Ok(())
            }
            TableReference::Derived(derived) => self.render_derived_table(derived),
        }
    }

    /// `name[ alias]`
    pub fn render_named_table(&mut self, table: &NamedTableReference) {
        self.append(&table.table);
        self.register_affected_table(&table.table);
        if let Some(alias) = &table.alias {
            self.append_char(' ');
            self.append(alias);
        }
    }

    pub fn render_derived_table(&mut self, table: &DerivedTableReference) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_derived_table_reference(self, table)? == Emit::Rendered {
            return Ok(());
        }
        if table.lateral {
            self.append("lateral ");
        }
        match &table.source {
            DerivedSource::QueryPart(query) => self.render_query_part_table_reference(query, table)?,
            DerivedSource::Function(function) => self.render_function(function)?,
        }
        self.render_derived_identification_variable(table)
    }

    pub fn render_query_part_table_reference(
        &mut self,
        query: &QuerySpec,
        table: &DerivedTableReference,
    ) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_query_part_table_reference(self, query, table)? == Emit::Rendered {
            return Ok(());
        }
        self.render_subquery(query)
    }

    pub fn render_derived_identification_variable(&mut self, table: &DerivedTableReference) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_derived_identification_variable(self, table)? == Emit::Rendered {
            return Ok(());
        }
        self.render_table_alias(table);
        if !table.column_names.is_empty() {
            self.append_char('(');
            self.append(&table.column_names.join(","));
            self.append_char(')');
        }
        Ok(())
    }

    /// ` alias`
    pub fn render_table_alias(&mut self, table: &DerivedTableReference) {
        self.append_char(' ');
        self.append(&table.alias);
    }

    /// `(query)` with the derived table's column names pushed onto the
    /// selections, for dialects without `alias(c1,c2)` syntax.
    pub fn emulate_query_part_column_aliasing(
        &mut self,
        query: &QuerySpec,
        column_names: &[String],
    ) -> TranslateResult<()> {
        check_column_aliases(query, column_names)?;
        if !column_names.is_empty() {
            tracing::trace!("Pushing {} derived column names into the subquery", column_names.len());
        }
        self.append_char('(');
        self.render_query(query, QueryScope::aliased(column_names))?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_offset_fetch(&mut self, query: &QuerySpec) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_offset_fetch(self, query)? == Emit::Rendered {
            return Ok(());
        }
        if let Some(offset) = &query.offset {
            self.in_clause(Clause::Offset, |r| {
                r.append(" offset ");
                r.render_expr(offset)?;
                r.append(" rows");
                Ok(())
            })?;
        }
        if let Some(fetch) = &query.fetch {
            self.in_clause(Clause::Fetch, |r| {
                r.append(" fetch first ");
                r.render_expr(fetch)?;
                r.append(" rows only");
                Ok(())
            })?;
        }
        Ok(())
    }

    /// ` limit f offset o`
    pub fn render_limit_offset_clause(&mut self, query: &QuerySpec) -> TranslateResult<()> {
        if let Some(fetch) = &query.fetch {
            self.in_clause(Clause::Fetch, |r| {
                r.append(" limit ");
                r.render_expr(fetch)
            })?;
        }
        if let Some(offset) = &query.offset {
            self.in_clause(Clause::Offset, |r| {
                r.append(" offset ");
                r.render_expr(offset)
            })?;
        }
        Ok(())
    }

    fn render_for_update(&mut self, query: &QuerySpec) -> TranslateResult<()> {
        let Some(lock) = &query.lock else {
            return Ok(());
        };
        let dialect = self.dialect;
        let strategy = dialect
            .lock_strategy(lock, self.config)
            .unwrap_or_else(|| default_lock_strategy(lock, self.config));
        self.lock_strategy = strategy;
        if strategy != LockStrategy::Clause {
            return Ok(());
        }
        self.in_clause(Clause::ForUpdate, |r| {
            r.append(match lock.mode {
                LockMode::Write => " for update",
                LockMode::Read => " for share",
            });
            match lock.wait {
                LockWait::Wait => {}
                LockWait::NoWait => r.append(" nowait"),
                LockWait::SkipLocked => r.append(" skip locked"),
            }
            Ok(())
        })
    }
}
