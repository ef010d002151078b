//! Dialect hooks.

use crate::ast::{
    BinaryArithmetic, Comparison, ComparisonOp, ConflictClause, DeleteStatement,
    DerivedTableReference, Expr, InArrayPredicate, InsertStatement, LikePredicate, LockOptions,
    NamedTableReference, QuerySpec, SelectClause, UpdateStatement,
};
use crate::config::DialectConfig;
use crate::error::TranslateResult;
use crate::transpiler::{LockStrategy, QueryScope, Renderer};

/// Outcome of a dialect hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Nothing was written; render the node the standard way.
    Default,
    /// The hook wrote the node itself.
    Rendered,
}

/// Trait for dialect-specific rendering.
///
/// The renderer offers every overridable node to the dialect before rendering
/// it. A hook either answers [`Emit::Default`] without touching the renderer,
/// or writes the complete node and answers [`Emit::Rendered`]. Hooks that
/// render usually lean on the renderer's `default_*` methods and emulation
/// helpers for the parts they don't change.
///
/// Every method has a default that answers [`Emit::Default`], so a dialect
/// only implements what it changes.
pub trait SqlDialect: Send + Sync + std::fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Pick how a locking query is locked. `None` uses the standard decision.
    fn lock_strategy(&self, _lock: &LockOptions, _config: &DialectConfig) -> Option<LockStrategy> {
        None
    }

    /// Paging clause of a query spec.
    fn render_offset_fetch(&self, _r: &mut Renderer<'_>, _query: &QuerySpec) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_comparison(&self, _r: &mut Renderer<'_>, _comparison: &Comparison) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// Comparison of a subquery's selections against a row value.
    fn render_select_tuple_comparison(
        &self,
        _r: &mut Renderer<'_>,
        _selections: &[Expr],
        _tuple: &[Expr],
        _op: ComparisonOp,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// A GROUP BY or PARTITION BY item.
    fn render_partition_item(&self, _r: &mut Renderer<'_>, _item: &Expr) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_select_clause(
        &self,
        _r: &mut Renderer<'_>,
        _select: &SelectClause,
        _scope: QueryScope<'_>,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// A whole derived table reference, source and alias included.
    fn render_derived_table_reference(
        &self,
        _r: &mut Renderer<'_>,
        _table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// The alias (and column list) following a derived table.
    fn render_derived_identification_variable(
        &self,
        _r: &mut Renderer<'_>,
        _table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// The `(query)` part of a non-lateral derived table.
    fn render_query_part_table_reference(
        &self,
        _r: &mut Renderer<'_>,
        _query: &QuerySpec,
        _table: &DerivedTableReference,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// Target table of INSERT, UPDATE and DELETE.
    fn render_dml_target(&self, _r: &mut Renderer<'_>, _target: &NamedTableReference) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_delete(&self, _r: &mut Renderer<'_>, _statement: &DeleteStatement) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_update(&self, _r: &mut Renderer<'_>, _statement: &UpdateStatement) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    /// An INSERT carrying a conflict clause.
    fn render_insert_with_conflict(
        &self,
        _r: &mut Renderer<'_>,
        _statement: &InsertStatement,
        _conflict: &ConflictClause,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_in_array(&self, _r: &mut Renderer<'_>, _predicate: &InArrayPredicate) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_like(&self, _r: &mut Renderer<'_>, _predicate: &LikePredicate) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }

    fn render_binary_arithmetic(
        &self,
        _r: &mut Renderer<'_>,
        _arithmetic: &BinaryArithmetic,
    ) -> TranslateResult<Emit> {
        Ok(Emit::Default)
    }
}
