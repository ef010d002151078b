use serde::{Deserialize, Serialize};

use crate::ast::{Expr, QuerySpec};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    DistinctFrom,
    NotDistinctFrom,
}

impl ComparisonOp {
    pub fn sql_text(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Lte => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Gte => ">=",
            ComparisonOp::DistinctFrom => "is distinct from",
            ComparisonOp::NotDistinctFrom => "is not distinct from",
        }
    }

    /// The operator with its operands swapped: `a < b` ⇔ `b > a`.
    pub fn invert(self) -> Self {
        match self {
            ComparisonOp::Lt => ComparisonOp::Gt,
            ComparisonOp::Lte => ComparisonOp::Gte,
            ComparisonOp::Gt => ComparisonOp::Lt,
            ComparisonOp::Gte => ComparisonOp::Lte,
            other => other,
        }
    }

    /// The logical complement: `not (a < b)` ⇔ `a >= b`.
    pub fn negate(self) -> Self {
        match self {
            ComparisonOp::Eq => ComparisonOp::Ne,
            ComparisonOp::Ne => ComparisonOp::Eq,
            ComparisonOp::Lt => ComparisonOp::Gte,
            ComparisonOp::Lte => ComparisonOp::Gt,
            ComparisonOp::Gt => ComparisonOp::Lte,
            ComparisonOp::Gte => ComparisonOp::Lt,
            ComparisonOp::DistinctFrom => ComparisonOp::NotDistinctFrom,
            ComparisonOp::NotDistinctFrom => ComparisonOp::DistinctFrom,
        }
    }

    /// Strict part of an ordering operator (`<=` → `<`).
    pub fn strict(self) -> Self {
        match self {
            ComparisonOp::Lte => ComparisonOp::Lt,
            ComparisonOp::Gte => ComparisonOp::Gt,
            other => other,
        }
    }

    /// Inclusive part of an ordering operator (`<` → `<=`).
    pub fn inclusive(self) -> Self {
        match self {
            ComparisonOp::Lt => ComparisonOp::Lte,
            ComparisonOp::Gt => ComparisonOp::Gte,
            other => other,
        }
    }

    pub fn is_ordering(self) -> bool {
        matches!(
            self,
            ComparisonOp::Lt | ComparisonOp::Lte | ComparisonOp::Gt | ComparisonOp::Gte
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub lhs: Expr,
    pub op: ComparisonOp,
    pub rhs: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InListPredicate {
    pub test: Expr,
    pub values: Vec<Expr>,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InSubqueryPredicate {
    pub test: Expr,
    pub query: Box<QuerySpec>,
    #[serde(default)]
    pub negated: bool,
}

/// Membership in an array-valued expression (usually a bound array parameter).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InArrayPredicate {
    pub test: Expr,
    pub array: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikePredicate {
    pub expr: Expr,
    pub pattern: Expr,
    #[serde(default)]
    pub escape: Option<Expr>,
    #[serde(default = "default_true")]
    pub case_sensitive: bool,
    #[serde(default)]
    pub negated: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NullnessPredicate {
    pub expr: Expr,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetweenPredicate {
    pub expr: Expr,
    pub low: Expr,
    pub high: Expr,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistsPredicate {
    pub query: Box<QuerySpec>,
    #[serde(default)]
    pub negated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JunctionKind {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub kind: JunctionKind,
    pub predicates: Vec<Predicate>,
}

/// A boolean-valued node (WHERE, HAVING, ON, conflict predicates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Predicate {
    Comparison(Comparison),
    InList(InListPredicate),
    InSubquery(InSubqueryPredicate),
    InArray(InArrayPredicate),
    Like(LikePredicate),
    Nullness(NullnessPredicate),
    Between(BetweenPredicate),
    Exists(ExistsPredicate),
    Junction(Junction),
    Negated(Box<Predicate>),
}

impl Predicate {
    /// An empty junction renders nothing and restricts nothing, negated or not.
    pub fn is_empty(&self) -> bool {
        match self {
            Predicate::Junction(j) => j.predicates.iter().all(Predicate::is_empty),
            Predicate::Negated(inner) => inner.is_empty(),
            _ => false,
        }
    }

    pub fn and(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Junction(Junction {
            kind: JunctionKind::And,
            predicates: predicates.into_iter().collect(),
        })
    }

    pub fn or(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Junction(Junction {
            kind: JunctionKind::Or,
            predicates: predicates.into_iter().collect(),
        })
    }
}

/// Whether an optional restriction actually restricts anything.
pub fn has_restriction(restriction: Option<&Predicate>) -> bool {
    restriction.is_some_and(|p| !p.is_empty())
}
