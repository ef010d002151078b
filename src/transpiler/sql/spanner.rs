//! Cloud Spanner (GoogleSQL) dialect.
//!
//! Spanner has no LATERAL, ILIKE, LIKE ... ESCAPE, row-value comparisons,
//! IS DISTINCT FROM, ROLLUP/CUBE, ON CONFLICT or WHERE-less DML. The hooks
//! below emulate what can be emulated and reject the rest.

use crate::ast::{
    BinaryArithmetic, Comparison, ComparisonOp, ConflictClause, DeleteStatement,
    DerivedSource, DerivedTableReference, Expr, FunctionCall, InArrayPredicate, InsertStatement,
    LikePredicate, LockOptions, NamedTableReference, QuerySpec, SelectClause, UpdateStatement,
    Value, has_restriction,
};
use crate::config::DialectConfig;
use crate::error::{TranslateError, TranslateResult};
use crate::transpiler::dml::select::check_column_aliases;
use crate::transpiler::traits::{Emit, SqlDialect};
use crate::transpiler::{Clause, LockStrategy, QueryScope, Renderer};

/// Cloud Spanner dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpannerDialect;

impl SqlDialect for SpannerDialect {
    fn name(&self) -> &'static str {
        "spanner"
    }

    fn lock_strategy(&self, lock: &LockOptions, _config: &DialectConfig) -> Option<LockStrategy> {
        tracing::trace!("Ignoring {:?} lock request", lock.mode);
        Some(LockStrategy::None)
    }

    fn render_offset_fetch(&self, r: &mut Renderer<'_>, query: &QuerySpec) -> TranslateResult<Emit> {
        r.render_limit_offset_clause(query)?;
        Ok(Emit::Rendered)
    }

    fn render_comparison(&self, r: &mut Renderer<'_>, comparison: &Comparison) -> TranslateResult<Emit> {
        match (comparison.op, &comparison.rhs) {
            (ComparisonOp::Eq, Expr::Any(query)) => {
                r.render_expr(&comparison.lhs)?;
                r.append(" in ");
                r.render_subquery(query)?;
            }
            (ComparisonOp::Ne, Expr::Every(query)) => {
                r.render_expr(&comparison.lhs)?;
                r.append(" not in ");
                r.render_subquery(query)?;
            }
            _ => r.render_comparison_emulate_intersect(comparison)?,
        }
        Ok(Emit::Rendered)
    }

    fn render_select_tuple_comparison(
        &self,
        r: &mut Renderer<'_>,
        selections: &[Expr],
        tuple: &[Expr],
        op: ComparisonOp,
    ) -> TranslateResult<Emit> {
        r.emulate_tuple_comparison(selections, tuple, op, true)?;
        Ok(Emit::Rendered)
    }

    fn render_partition_item(&self, r: &mut Renderer<'_>, item: &Expr) -> TranslateResult<Emit> {
        match item {
            // a constant that is not an empty grouping set
            Expr::Literal(_) => {
                r.append("'0' || '0'");
                Ok(Emit::Rendered)
            }
            Expr::Summarization(summarization) => Err(TranslateError::unsupported(format!(
                "Summarization ({}) is not supported by Spanner",
                summarization.kind.sql_text()
            ))),
            _ => Ok(Emit::Default),
        }
    }

    fn render_select_clause(
        &self,
        r: &mut Renderer<'_>,
        select: &SelectClause,
        scope: QueryScope<'_>,
    ) -> TranslateResult<Emit> {
        r.append("select ");
        if scope.correlated {
            r.append("as struct ");
        }
        if select.distinct {
            r.append("distinct ");
        }
        r.render_selections(select, scope)?;
        Ok(Emit::Rendered)
    }

    fn render_derived_table_reference(
        &self,
        r: &mut Renderer<'_>,
        table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        if !table.lateral {
            return Ok(Emit::Default);
        }
        match &table.source {
            DerivedSource::QueryPart(query) => {
                tracing::trace!("Emulating lateral subquery '{}' with unnest(array(..))", table.alias);
                check_column_aliases(query, &table.column_names)?;
                r.append("unnest(array(");
                r.render_query(query, QueryScope::correlated(&table.column_names))?;
                r.append("))");
            }
            // table-valued functions such as unnest are correlated already
            DerivedSource::Function(function) => {
                r.render_function(function)?;
                return self.render_derived_identification_variable(r, table);
            }
        }
        // the alias goes after the wrapper: unnest(..) alias
        r.render_table_alias(table);
        Ok(Emit::Rendered)
    }

    fn render_derived_identification_variable(
        &self,
        r: &mut Renderer<'_>,
        table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        match &table.source {
            DerivedSource::Function(function) => render_function_alias(r, function, table)?,
            // column names were pushed into the subquery's selections
            DerivedSource::QueryPart(_) => r.render_table_alias(table),
        }
        Ok(Emit::Rendered)
    }

    fn render_query_part_table_reference(
        &self,
        r: &mut Renderer<'_>,
        query: &QuerySpec,
        table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        r.emulate_query_part_column_aliasing(query, &table.column_names)?;
        Ok(Emit::Rendered)
    }

    fn render_dml_target(&self, r: &mut Renderer<'_>, target: &NamedTableReference) -> TranslateResult<Emit> {
        r.default_dml_target(target);
        if r.current_clause() != Some(Clause::Insert) {
            if let Some(alias) = &target.alias {
                r.append_char(' ');
                r.append(alias);
            }
        }
        Ok(Emit::Rendered)
    }

    fn render_delete(&self, r: &mut Renderer<'_>, statement: &DeleteStatement) -> TranslateResult<Emit> {
        if has_restriction(statement.restriction.as_ref()) {
            return Ok(Emit::Default);
        }
        // DELETE requires a WHERE clause
        tracing::trace!("Adding 'where true' to unrestricted delete");
        r.render_delete_clause(statement)?;
        r.append(" where true");
        r.render_returning(&statement.returning)?;
        Ok(Emit::Rendered)
    }

    fn render_update(&self, r: &mut Renderer<'_>, statement: &UpdateStatement) -> TranslateResult<Emit> {
        if has_restriction(statement.restriction.as_ref()) {
            return Ok(Emit::Default);
        }
        tracing::trace!("Adding 'where true' to unrestricted update");
        r.render_update_clause(statement)?;
        r.render_set_clause(&statement.assignments)?;
        r.append(" where true");
        r.render_returning(&statement.returning)?;
        Ok(Emit::Rendered)
    }

    fn render_insert_with_conflict(
        &self,
        r: &mut Renderer<'_>,
        statement: &InsertStatement,
        conflict: &ConflictClause,
    ) -> TranslateResult<Emit> {
        check_conflict_clause(conflict)?;
        r.in_clause(Clause::Insert, |r| {
            r.append(if conflict.is_do_update() {
                "insert or update into "
            } else {
                "insert or ignore into "
            });
            r.render_dml_target(&statement.target)?;
            if !statement.columns.is_empty() {
                r.append_char('(');
                r.append(&statement.columns.join(","));
                r.append_char(')');
            }
            r.append_char(' ');
            Ok(())
        })?;
        r.render_insert_source(&statement.source)?;
        r.render_returning(&statement.returning)?;
        Ok(Emit::Rendered)
    }

    fn render_in_array(&self, r: &mut Renderer<'_>, predicate: &InArrayPredicate) -> TranslateResult<Emit> {
        r.render_expr(&predicate.test)?;
        r.append(" in unnest(");
        r.render_expr(&predicate.array)?;
        r.append_char(')');
        Ok(Emit::Rendered)
    }

    fn render_like(&self, r: &mut Renderer<'_>, predicate: &LikePredicate) -> TranslateResult<Emit> {
        let Some(escape) = &predicate.escape else {
            if predicate.case_sensitive {
                return Ok(Emit::Default);
            }
            r.render_case_insensitive_like_emulation(predicate)?;
            return Ok(Emit::Rendered);
        };

        // Spanner has no ESCAPE clause; backslash is its only escape character
        let escape = escape_character(escape)?;
        let pattern = if escape == '\\' {
            predicate.pattern.clone()
        } else {
            let Some(Value::String(pattern)) = predicate.pattern.as_literal() else {
                return Err(TranslateError::unresolvable(format!(
                    "Like pattern must be a string literal to use escape character '{}' on Spanner",
                    escape
                )));
            };
            tracing::trace!("Rewriting like pattern for escape character '{}'", escape);
            Expr::Literal(Value::String(rewrite_like_pattern(pattern, escape)))
        };
        let adjusted = LikePredicate {
            expr: predicate.expr.clone(),
            pattern,
            escape: None,
            case_sensitive: predicate.case_sensitive,
            negated: predicate.negated,
        };
        if adjusted.case_sensitive {
            r.default_like(&adjusted)?;
        } else {
            r.render_case_insensitive_like_emulation(&adjusted)?;
        }
        Ok(Emit::Rendered)
    }

    fn render_binary_arithmetic(
        &self,
        r: &mut Renderer<'_>,
        arithmetic: &BinaryArithmetic,
    ) -> TranslateResult<Emit> {
        if !arithmetic.is_integer_division() {
            return Ok(Emit::Default);
        }
        r.render_function_syntax("div", &arithmetic.left, &arithmetic.right)?;
        Ok(Emit::Rendered)
    }
}

/// Spanner's INSERT OR UPDATE / INSERT OR IGNORE always targets the primary key.
fn check_conflict_clause(conflict: &ConflictClause) -> TranslateResult<()> {
    if conflict.constraint_name.is_some() {
        return Err(TranslateError::illegal(
            "Cloud Spanner does not support named constraints in conflict clauses",
        ));
    }
    if !conflict.constraint_columns.is_empty() {
        return Err(TranslateError::illegal(
            "Cloud Spanner does not support specifying constraint columns in conflict clauses",
        ));
    }
    if conflict.predicate.as_ref().is_some_and(|p| !p.is_empty()) {
        return Err(TranslateError::illegal(
            "Cloud Spanner does not support predicates (WHERE clause) in conflict clauses",
        ));
    }
    Ok(())
}

fn escape_character(escape: &Expr) -> TranslateResult<char> {
    if let Some(Value::String(s)) = escape.as_literal() {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Ok(c);
        }
    }
    Err(TranslateError::unresolvable(
        "Like escape character must be a single-character string literal",
    ))
}

/// Spanner has no column alias list for function sources. `unnest` yields a
/// single value column, and its alias names that column, so `unnest(..) t(x)`
/// renders as `unnest(..) x`.
fn render_function_alias(
    r: &mut Renderer<'_>,
    function: &FunctionCall,
    table: &DerivedTableReference,
) -> TranslateResult<()> {
    match table.column_names.as_slice() {
        [] => r.render_table_alias(table),
        [column] if function.name.eq_ignore_ascii_case("unnest") => {
            r.append_char(' ');
            r.append(column);
        }
        columns => {
            return Err(TranslateError::illegal(format!(
                "Spanner can't alias columns ({}) of {}() in '{}'",
                columns.join(","),
                function.name,
                table.alias
            )));
        }
    }
    Ok(())
}

/// Rewrite a LIKE pattern written for escape character `escape` into one with
/// the same match set under backslash escaping.
///
/// - `\` becomes `\\`
/// - `E%` and `E_` become `\%` and `\_`
/// - `EE` becomes `E`
/// - any other `E` is kept
///
/// # Example
/// ```
/// use qail_spanner::transpiler::sql::spanner::rewrite_like_pattern;
///
/// assert_eq!(rewrite_like_pattern("50!%", '!'), "50\\%");
/// ```
pub fn rewrite_like_pattern(pattern: &str, escape: char) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push_str("\\\\");
        } else if c == escape {
            match chars.peek().copied() {
                Some(next @ ('%' | '_')) => {
                    out.push('\\');
                    out.push(next);
                    chars.next();
                }
                Some(next) if next == escape => {
                    out.push(escape);
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_wildcards() {
        assert_eq!(rewrite_like_pattern("100!%", '!'), "100\\%");
        assert_eq!(rewrite_like_pattern("a!_b%", '!'), "a\\_b%");
    }

    #[test]
    fn test_rewrite_doubles_backslash() {
        assert_eq!(rewrite_like_pattern("C:\\dir", '!'), "C:\\\\dir");
    }

    #[test]
    fn test_rewrite_escaped_escape() {
        assert_eq!(rewrite_like_pattern("a!!b", '!'), "a!b");
        // literal `!` followed by a wildcard
        assert_eq!(rewrite_like_pattern("!!%", '!'), "!%");
    }

    #[test]
    fn test_rewrite_lone_escape_kept() {
        assert_eq!(rewrite_like_pattern("a!b", '!'), "a!b");
        assert_eq!(rewrite_like_pattern("ab!", '!'), "ab!");
    }

    #[test]
    fn test_escape_character_must_be_single_literal() {
        assert_eq!(escape_character(&Expr::Literal(Value::String("#".into()))).unwrap(), '#');
        assert!(matches!(
            escape_character(&Expr::Literal(Value::String("##".into()))),
            Err(TranslateError::UnresolvableLiteral(_))
        ));
        assert!(matches!(
            escape_character(&Expr::Literal(Value::Int(1))),
            Err(TranslateError::UnresolvableLiteral(_))
        ));
    }

    #[test]
    fn test_conflict_clause_checks() {
        let mut conflict = ConflictClause::do_nothing();
        assert!(check_conflict_clause(&conflict).is_ok());
        conflict.constraint_columns = vec!["id".into()];
        assert!(matches!(
            check_conflict_clause(&conflict),
            Err(TranslateError::IllegalQueryOperation(_))
        ));
    }
}
