//! Predicate rendering and the comparison emulations dialects build on.

use crate::ast::{
    BetweenPredicate, Comparison, ComparisonOp, ExistsPredicate, Expr, InArrayPredicate,
    InListPredicate, InSubqueryPredicate, Junction, JunctionKind, LikePredicate,
    NullnessPredicate, Predicate, QuerySpec,
};
use crate::error::{TranslateError, TranslateResult};
use crate::transpiler::{Clause, Emit, Renderer};

fn op_text(op: ComparisonOp) -> &'static str {
    match op {
        ComparisonOp::DistinctFrom => " is distinct from ",
        ComparisonOp::NotDistinctFrom => " is not distinct from ",
        other => other.sql_text(),
    }
}

impl Renderer<'_> {
    pub fn render_predicate(&mut self, predicate: &Predicate) -> TranslateResult<()> {
        match predicate {
            Predicate::Comparison(comparison) => self.render_comparison(comparison),
            Predicate::InList(p) => self.render_in_list(p),
            Predicate::InSubquery(p) => self.render_in_subquery(p),
            Predicate::InArray(p) => self.render_in_array(p),
            Predicate::Like(p) => self.render_like(p),
            Predicate::Nullness(p) => self.render_nullness(p),
            Predicate::Between(p) => self.render_between(p),
            Predicate::Exists(p) => self.render_exists(p),
            Predicate::Junction(j) => self.render_junction(j),
            Predicate::Negated(inner) => {
                self.append("not (");
                self.render_predicate(inner)?;
                self.append_char(')');
                Ok(())
            }
        }
    }

    /// Render `keyword predicate` in `clause` if the predicate restricts anything.
    pub fn render_restriction(
        &mut self,
        clause: Clause,
        keyword: &str,
        restriction: Option<&Predicate>,
    ) -> TranslateResult<()> {
        let Some(predicate) = restriction.filter(|p| !p.is_empty()) else {
            return Ok(());
        };
        self.in_clause(clause, |r| {
            r.append(keyword);
            r.render_predicate(predicate)
        })
    }

    fn render_junction(&mut self, junction: &Junction) -> TranslateResult<()> {
        let separator = match junction.kind {
            JunctionKind::And => " and ",
            JunctionKind::Or => " or ",
        };
        let parts: Vec<&Predicate> = junction.predicates.iter().filter(|p| !p.is_empty()).collect();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.append(separator);
            }
            // nested junctions keep their grouping
            let nested = matches!(part, Predicate::Junction(j) if j.predicates.len() > 1);
            if nested {
                self.append_char('(');
            }
            self.render_predicate(part)?;
            if nested {
                self.append_char(')');
            }
        }
        Ok(())
    }

    pub fn render_comparison(&mut self, comparison: &Comparison) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_comparison(self, comparison)? == Emit::Rendered {
            return Ok(());
        }
        self.render_native_comparison(&comparison.lhs, comparison.op, &comparison.rhs)
    }

    /// `lhs op rhs` exactly as written.
    pub fn render_native_comparison(&mut self, lhs: &Expr, op: ComparisonOp, rhs: &Expr) -> TranslateResult<()> {
        self.render_expr(lhs)?;
        self.append(op_text(op));
        self.render_expr(rhs)
    }

    /// Comparison for dialects without `is distinct from` or row-value comparisons.
    ///
    /// - `a is [not] distinct from b` → `[not ]exists (select a intersect select b)`
    /// - `(a,b) op (c,d)` → expanded through the select-tuple-comparison hook
    /// - `(a,b) op (subquery)` → `[not ]exists` over the subquery
    /// - anything else renders natively
    pub fn render_comparison_emulate_intersect(&mut self, comparison: &Comparison) -> TranslateResult<()> {
        let Comparison { lhs, op, rhs } = comparison;
        match op {
            ComparisonOp::DistinctFrom | ComparisonOp::NotDistinctFrom => {
                tracing::trace!("Emulating {} with intersect", op.sql_text());
                if *op == ComparisonOp::DistinctFrom {
                    self.append("not ");
                }
                self.append("exists (select ");
                self.render_intersect_operand(lhs)?;
                self.append(" intersect select ");
                self.render_intersect_operand(rhs)?;
                self.append_char(')');
                Ok(())
            }
            _ => match (lhs, rhs) {
                (Expr::Tuple(left), Expr::Tuple(right)) => {
                    self.render_select_tuple_comparison(left, right, *op)
                }
                (Expr::Tuple(left), Expr::Subquery(query) | Expr::Any(query)) => {
                    if *op == ComparisonOp::Ne && matches!(rhs, Expr::Subquery(_)) {
                        self.emulate_subquery_tuple_comparison(left, query, ComparisonOp::Eq, true)
                    } else {
                        self.emulate_subquery_tuple_comparison(left, query, *op, false)
                    }
                }
                (Expr::Tuple(left), Expr::Every(query)) => {
                    self.emulate_subquery_tuple_comparison(left, query, op.negate(), true)
                }
                _ => self.render_native_comparison(lhs, *op, rhs),
            },
        }
    }

    fn render_intersect_operand(&mut self, operand: &Expr) -> TranslateResult<()> {
        match operand {
            Expr::Tuple(items) => self.render_list(items, ",", |r, item| r.render_expr(item)),
            other => self.render_expr(other),
        }
    }

    /// `[not ]exists (select 1 from .. where [(restriction) and ]<selections op' tuple>)`
    ///
    /// A grouped subquery keeps its `where` and `group by` and gets the
    /// comparison in `having`, after any `having` it already carries.
    fn emulate_subquery_tuple_comparison(
        &mut self,
        tuple: &[Expr],
        query: &QuerySpec,
        op: ComparisonOp,
        negated: bool,
    ) -> TranslateResult<()> {
        if query.fetch.is_some() || query.offset.is_some() {
            return Err(TranslateError::unsupported(
                "Row-value comparison against a subquery with a limit or offset",
            ));
        }
        tracing::trace!("Emulating row-value comparison against a subquery");
        let selections: Vec<Expr> = query.select.selections.iter().map(|s| s.expr.clone()).collect();
        if negated {
            self.append("not ");
        }
        self.append("exists (select 1");
        if !query.from.is_empty() {
            self.append(" from ");
            self.render_from(&query.from)?;
        }
        let grouped = !query.group_by.is_empty() || query.having.is_some();
        let (keyword, restriction) = if grouped {
            self.render_restriction(Clause::Where, " where ", query.restriction.as_ref())?;
            if !query.group_by.is_empty() {
                self.in_clause(Clause::GroupBy, |r| {
                    r.append(" group by ");
                    r.render_list(&query.group_by, ",", |r, item| r.render_partition_item(item))
                })?;
            }
            (" having ", query.having.as_ref())
        } else {
            (" where ", query.restriction.as_ref())
        };
        self.append(keyword);
        if let Some(restriction) = restriction.filter(|p| !p.is_empty()) {
            self.append_char('(');
            self.render_predicate(restriction)?;
            self.append(") and ");
        }
        // operands are swapped, so is the operator
        self.render_select_tuple_comparison(&selections, tuple, op.invert())?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_select_tuple_comparison(
        &mut self,
        selections: &[Expr],
        tuple: &[Expr],
        op: ComparisonOp,
    ) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_select_tuple_comparison(self, selections, tuple, op)? == Emit::Rendered {
            return Ok(());
        }
        self.emulate_tuple_comparison(selections, tuple, op, false)
    }

    /// Expand a row-value comparison into scalar comparisons.
    ///
    /// `=` becomes a conjunction, `<>` a disjunction and ordering operators a
    /// lexicographic expansion. With `index_optimized` every level leads with
    /// an inclusive range predicate an index can use:
    /// `(a,b) > (1,2)` → `(a>=1 and (a>1 or b>2))`.
    pub fn emulate_tuple_comparison(
        &mut self,
        lhs: &[Expr],
        rhs: &[Expr],
        op: ComparisonOp,
        index_optimized: bool,
    ) -> TranslateResult<()> {
        if lhs.len() != rhs.len() {
            return Err(TranslateError::illegal(format!(
                "Row value of {} elements compared with one of {}",
                lhs.len(),
                rhs.len()
            )));
        }
        if lhs.is_empty() {
            return Err(TranslateError::illegal("Empty row value in comparison"));
        }
        if lhs.len() == 1 {
            return self.render_native_comparison(&lhs[0], op, &rhs[0]);
        }
        tracing::trace!("Expanding {}-element row comparison", lhs.len());
        match op {
            ComparisonOp::Eq | ComparisonOp::Ne => {
                let separator = if op == ComparisonOp::Eq { " and " } else { " or " };
                self.append_char('(');
                for (i, (l, r)) in lhs.iter().zip(rhs).enumerate() {
                    if i > 0 {
                        self.append(separator);
                    }
                    self.render_native_comparison(l, op, r)?;
                }
                self.append_char(')');
                Ok(())
            }
            ComparisonOp::Lt | ComparisonOp::Lte | ComparisonOp::Gt | ComparisonOp::Gte => {
                self.append_char('(');
                self.render_lexicographic(lhs, rhs, op, index_optimized)?;
                self.append_char(')');
                Ok(())
            }
            ComparisonOp::DistinctFrom | ComparisonOp::NotDistinctFrom => Err(
                TranslateError::unsupported("Row value distinct-from comparison can't be expanded"),
            ),
        }
    }

    fn render_lexicographic(
        &mut self,
        lhs: &[Expr],
        rhs: &[Expr],
        op: ComparisonOp,
        index_optimized: bool,
    ) -> TranslateResult<()> {
        let (l, r) = (&lhs[0], &rhs[0]);
        if lhs.len() == 1 {
            return self.render_native_comparison(l, op, r);
        }
        if index_optimized {
            self.render_native_comparison(l, op.inclusive(), r)?;
            self.append(" and (");
            self.render_native_comparison(l, op.strict(), r)?;
            self.append(" or ");
            self.render_lexicographic(&lhs[1..], &rhs[1..], op, index_optimized)?;
            self.append_char(')');
        } else {
            self.render_native_comparison(l, op.strict(), r)?;
            self.append(" or ");
            self.render_native_comparison(l, ComparisonOp::Eq, r)?;
            self.append(" and ");
            let nested = lhs.len() > 2;
            if nested {
                self.append_char('(');
            }
            self.render_lexicographic(&lhs[1..], &rhs[1..], op, index_optimized)?;
            if nested {
                self.append_char(')');
            }
        }
        Ok(())
    }

    fn render_in_list(&mut self, predicate: &InListPredicate) -> TranslateResult<()> {
        if predicate.values.is_empty() {
            // nothing is in an empty list
            self.append(if predicate.negated { "1=1" } else { "1=0" });
            return Ok(());
        }
        self.render_expr(&predicate.test)?;
        self.append(if predicate.negated { " not in (" } else { " in (" });
        self.render_list(&predicate.values, ",", |r, value| r.render_expr(value))?;
        self.append_char(')');
        Ok(())
    }

    fn render_in_subquery(&mut self, predicate: &InSubqueryPredicate) -> TranslateResult<()> {
        self.render_expr(&predicate.test)?;
        self.append(if predicate.negated { " not in " } else { " in " });
        self.render_subquery(&predicate.query)
    }

    pub fn render_in_array(&mut self, predicate: &InArrayPredicate) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_in_array(self, predicate)? == Emit::Rendered {
            return Ok(());
        }
        self.render_expr(&predicate.test)?;
        self.append("=any(");
        self.render_expr(&predicate.array)?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_like(&mut self, predicate: &LikePredicate) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_like(self, predicate)? == Emit::Rendered {
            return Ok(());
        }
        self.default_like(predicate)
    }

    /// `x [not ]like p[ escape e]`; `ilike` when case-insensitive.
    pub fn default_like(&mut self, predicate: &LikePredicate) -> TranslateResult<()> {
        self.render_expr(&predicate.expr)?;
        if predicate.negated {
            self.append(" not");
        }
        self.append(if predicate.case_sensitive { " like " } else { " ilike " });
        self.render_like_pattern(predicate)
    }

    /// `lower(x) [not ]like lower(p)` using the configured lower-casing function.
    pub fn render_case_insensitive_like_emulation(&mut self, predicate: &LikePredicate) -> TranslateResult<()> {
        tracing::trace!("Emulating case-insensitive like");
        let lower = self.config().lowercase_function.as_str();
        self.append(lower);
        self.append_char('(');
        self.render_expr(&predicate.expr)?;
        self.append_char(')');
        if predicate.negated {
            self.append(" not");
        }
        self.append(" like ");
        self.append(lower);
        self.append_char('(');
        self.render_expr(&predicate.pattern)?;
        self.append_char(')');
        if let Some(escape) = &predicate.escape {
            self.append(" escape ");
            self.render_expr(escape)?;
        }
        Ok(())
    }

    fn render_like_pattern(&mut self, predicate: &LikePredicate) -> TranslateResult<()> {
        self.render_expr(&predicate.pattern)?;
        if let Some(escape) = &predicate.escape {
            self.append(" escape ");
            self.render_expr(escape)?;
        }
        Ok(())
    }

    fn render_nullness(&mut self, predicate: &NullnessPredicate) -> TranslateResult<()> {
        self.render_expr(&predicate.expr)?;
        self.append(if predicate.negated { " is not null" } else { " is null" });
        Ok(())
    }

    fn render_between(&mut self, predicate: &BetweenPredicate) -> TranslateResult<()> {
        self.render_expr(&predicate.expr)?;
        self.append(if predicate.negated { " not between " } else { " between " });
        self.render_expr(&predicate.low)?;
        self.append(" and ");
        self.render_expr(&predicate.high)
    }

    fn render_exists(&mut self, predicate: &ExistsPredicate) -> TranslateResult<()> {
        if predicate.negated {
            self.append("not ");
        }
        self.append("exists ");
        self.render_subquery(&predicate.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::*;
    use crate::config::DialectConfig;
    use crate::transpiler::GenericDialect;

    fn expand(lhs: Vec<Expr>, rhs: Vec<Expr>, op: ComparisonOp, index_optimized: bool) -> String {
        let config = DialectConfig::generic();
        let mut r = Renderer::new(&GenericDialect, &config);
        r.emulate_tuple_comparison(&lhs, &rhs, op, index_optimized).unwrap();
        r.finish().sql
    }

    #[test]
    fn test_tuple_equality_expansion() {
        assert_eq!(
            expand(vec![col("a"), col("b")], vec![int(1), int(2)], ComparisonOp::Eq, false),
            "(a=1 and b=2)"
        );
        assert_eq!(
            expand(vec![col("a"), col("b")], vec![int(1), int(2)], ComparisonOp::Ne, false),
            "(a<>1 or b<>2)"
        );
    }

    #[test]
    fn test_tuple_ordering_expansion() {
        assert_eq!(
            expand(vec![col("a"), col("b")], vec![int(1), int(2)], ComparisonOp::Gt, false),
            "(a>1 or a=1 and b>2)"
        );
        assert_eq!(
            expand(
                vec![col("a"), col("b"), col("c")],
                vec![int(1), int(2), int(3)],
                ComparisonOp::Lte,
                false
            ),
            "(a<1 or a=1 and (b<2 or b=2 and c<=3))"
        );
    }

    #[test]
    fn test_tuple_ordering_index_optimized() {
        assert_eq!(
            expand(vec![col("a"), col("b")], vec![int(1), int(2)], ComparisonOp::Gt, true),
            "(a>=1 and (a>1 or b>2))"
        );
        assert_eq!(
            expand(
                vec![col("a"), col("b"), col("c")],
                vec![int(1), int(2), int(3)],
                ComparisonOp::Gte,
                true
            ),
            "(a>=1 and (a>1 or b>=2 and (b>2 or c>=3)))"
        );
    }

    #[test]
    fn test_tuple_arity_mismatch_is_illegal() {
        let config = DialectConfig::generic();
        let mut r = Renderer::new(&GenericDialect, &config);
        let err = r
            .emulate_tuple_comparison(&[col("a"), col("b")], &[int(1)], ComparisonOp::Eq, false)
            .unwrap_err();
        assert!(matches!(err, TranslateError::IllegalQueryOperation(_)));
    }

    #[test]
    fn test_distinct_from_emulation() {
        let config = DialectConfig::generic();
        let mut r = Renderer::new(&GenericDialect, &config);
        let comparison = Comparison {
            lhs: col("a"),
            op: ComparisonOp::DistinctFrom,
            rhs: param(crate::types::SqlType::BigInt),
        };
        r.render_comparison_emulate_intersect(&comparison).unwrap();
        assert_eq!(r.finish().sql, "not exists (select a intersect select ?)");
    }
}
