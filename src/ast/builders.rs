//! Ergonomic builder functions for AST nodes.
//!
//! # Example
//! ```
//! use qail_spanner::ast::builders::*;
//! use qail_spanner::ast::{DeleteStatement, Statement};
//!
//! let stmt = Statement::Delete(
//!     DeleteStatement::new(table("users").alias("u")).filter(eq(qcol("u", "id"), int(7))),
//! );
//! assert_eq!(stmt.kind(), "delete");
//! ```

use crate::ast::{
    ArithmeticOp, BinaryArithmetic, ColumnReference, Comparison, ComparisonOp,
    DerivedTableReference, ExistsPredicate, Expr, FunctionCall, InArrayPredicate,
    InListPredicate, InSubqueryPredicate, LikePredicate, NamedTableReference, NullnessPredicate,
    Parameter, Predicate, QuerySpec, Summarization, SummarizationKind, Value,
};
use crate::types::SqlType;

// Tables

pub fn table(name: &str) -> NamedTableReference {
    NamedTableReference::new(name)
}

pub fn derived(query: QuerySpec, alias: &str) -> DerivedTableReference {
    DerivedTableReference::query(query, alias)
}

// Columns & parameters

pub fn col(name: &str) -> Expr {
    Expr::Column(ColumnReference::new(name))
}

pub fn qcol(qualifier: &str, name: &str) -> Expr {
    Expr::Column(ColumnReference::qualified(qualifier, name))
}

pub fn typed_col(name: &str, sql_type: SqlType) -> Expr {
    Expr::Column(ColumnReference::new(name).typed(sql_type))
}

pub fn param(sql_type: SqlType) -> Expr {
    Expr::Parameter(Parameter { name: None, sql_type })
}

pub fn named_param(name: &str, sql_type: SqlType) -> Expr {
    Expr::Parameter(Parameter { name: Some(name.to_string()), sql_type })
}

// Literals

pub fn int(n: i64) -> Expr {
    Expr::Literal(Value::Int(n))
}

pub fn float(n: f64) -> Expr {
    Expr::Literal(Value::Float(n))
}

pub fn text(s: &str) -> Expr {
    Expr::Literal(Value::String(s.to_string()))
}

pub fn boolean(b: bool) -> Expr {
    Expr::Literal(Value::Bool(b))
}

pub fn null() -> Expr {
    Expr::Literal(Value::Null)
}

// Compound expressions

pub fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Function(FunctionCall { name: name.to_string(), args, return_type: SqlType::Other })
}

pub fn tuple(items: Vec<Expr>) -> Expr {
    Expr::Tuple(items)
}

pub fn arith(left: Expr, op: ArithmeticOp, right: Expr) -> Expr {
    Expr::Arithmetic(BinaryArithmetic { left: Box::new(left), op, right: Box::new(right) })
}

pub fn any(query: QuerySpec) -> Expr {
    Expr::Any(Box::new(query))
}

pub fn all(query: QuerySpec) -> Expr {
    Expr::Every(Box::new(query))
}

pub fn subquery(query: QuerySpec) -> Expr {
    Expr::Subquery(Box::new(query))
}

pub fn rollup(groupings: Vec<Expr>) -> Expr {
    Expr::Summarization(Summarization { kind: SummarizationKind::Rollup, groupings })
}

pub fn cube(groupings: Vec<Expr>) -> Expr {
    Expr::Summarization(Summarization { kind: SummarizationKind::Cube, groupings })
}

// Predicates

pub fn cmp(lhs: Expr, op: ComparisonOp, rhs: Expr) -> Predicate {
    Predicate::Comparison(Comparison { lhs, op, rhs })
}

pub fn eq(lhs: Expr, rhs: Expr) -> Predicate {
    cmp(lhs, ComparisonOp::Eq, rhs)
}

pub fn ne(lhs: Expr, rhs: Expr) -> Predicate {
    cmp(lhs, ComparisonOp::Ne, rhs)
}

pub fn lt(lhs: Expr, rhs: Expr) -> Predicate {
    cmp(lhs, ComparisonOp::Lt, rhs)
}

pub fn gt(lhs: Expr, rhs: Expr) -> Predicate {
    cmp(lhs, ComparisonOp::Gt, rhs)
}

pub fn like(expr: Expr, pattern: Expr) -> LikePredicate {
    LikePredicate { expr, pattern, escape: None, case_sensitive: true, negated: false }
}

pub fn ilike(expr: Expr, pattern: Expr) -> LikePredicate {
    LikePredicate { case_sensitive: false, ..like(expr, pattern) }
}

pub fn is_null(expr: Expr) -> Predicate {
    Predicate::Nullness(NullnessPredicate { expr, negated: false })
}

pub fn in_list(test: Expr, values: Vec<Expr>) -> Predicate {
    Predicate::InList(InListPredicate { test, values, negated: false })
}

pub fn in_subquery(test: Expr, query: QuerySpec) -> Predicate {
    Predicate::InSubquery(InSubqueryPredicate { test, query: Box::new(query), negated: false })
}

pub fn in_array(test: Expr, array: Expr) -> Predicate {
    Predicate::InArray(InArrayPredicate { test, array })
}

pub fn exists(query: QuerySpec) -> Predicate {
    Predicate::Exists(ExistsPredicate { query: Box::new(query), negated: false })
}

impl LikePredicate {
    pub fn escape(mut self, escape: Expr) -> Self {
        self.escape = Some(escape);
        self
    }

    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }
}

impl From<LikePredicate> for Predicate {
    fn from(like: LikePredicate) -> Self {
        Predicate::Like(like)
    }
}
