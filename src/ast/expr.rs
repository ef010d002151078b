use serde::{Deserialize, Serialize};

use crate::ast::{QuerySpec, SortSpecification, Value};
use crate::types::SqlType;

/// Arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division with database semantics (/)
    Divide,
    /// Division with portable semantics: integer division when both operands are integral
    DividePortable,
    /// Modulo, rendered as mod(l,r)
    Modulo,
}

impl ArithmeticOp {
    pub fn sql_text(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide | ArithmeticOp::DividePortable => "/",
            ArithmeticOp::Modulo => "%",
        }
    }
}

/// ROLLUP / CUBE grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummarizationKind {
    Rollup,
    Cube,
}

impl SummarizationKind {
    pub fn sql_text(self) -> &'static str {
        match self {
            SummarizationKind::Rollup => "rollup",
            SummarizationKind::Cube => "cube",
        }
    }
}

/// A (possibly qualified) column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnReference {
    /// Table alias or name the column belongs to
    #[serde(default)]
    pub qualifier: Option<String>,
    pub name: String,
    #[serde(default)]
    pub sql_type: SqlType,
}

impl ColumnReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { qualifier: None, name: name.into(), sql_type: SqlType::Other }
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self { qualifier: Some(qualifier.into()), name: name.into(), sql_type: SqlType::Other }
    }

    pub fn typed(mut self, sql_type: SqlType) -> Self {
        self.sql_type = sql_type;
        self
    }
}

/// A bind parameter. Rendered as `?`; the position is assigned during traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sql_type: SqlType,
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryArithmetic {
    pub left: Box<Expr>,
    pub op: ArithmeticOp,
    pub right: Box<Expr>,
}

impl BinaryArithmetic {
    pub fn result_type(&self) -> SqlType {
        let (l, r) = (self.left.sql_type(), self.right.sql_type());
        if l.is_integral() && r.is_integral() {
            l.max(r)
        } else if l.is_floating() || r.is_floating() {
            SqlType::Double
        } else {
            SqlType::Numeric
        }
    }

    /// Whether this is a portable division whose operands demand integer semantics.
    pub fn is_integer_division(&self) -> bool {
        self.op == ArithmeticOp::DividePortable
            && self.left.sql_type().is_integral()
            && self.right.sql_type().is_integral()
    }
}

/// Scalar function call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Expr>,
    #[serde(default)]
    pub return_type: SqlType,
}

/// Window function: `f(args) over (partition by .. order by ..)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub function: FunctionCall,
    #[serde(default)]
    pub partition_by: Vec<Expr>,
    #[serde(default)]
    pub order_by: Vec<SortSpecification>,
}

/// A ROLLUP/CUBE grouping item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summarization {
    pub kind: SummarizationKind,
    pub groupings: Vec<Expr>,
}

/// A general expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// All columns (*)
    Star,
    Literal(Value),
    Column(ColumnReference),
    Parameter(Parameter),
    Arithmetic(BinaryArithmetic),
    Function(FunctionCall),
    Window(Box<Window>),
    /// Row value `(a,b)`
    Tuple(Vec<Expr>),
    /// `any(subquery)`, only meaningful as a comparison operand
    Any(Box<QuerySpec>),
    /// `all(subquery)`, only meaningful as a comparison operand
    Every(Box<QuerySpec>),
    /// Scalar subquery
    Subquery(Box<QuerySpec>),
    Summarization(Summarization),
}

impl Expr {
    pub fn sql_type(&self) -> SqlType {
        match self {
            Expr::Literal(v) => v.sql_type(),
            Expr::Column(c) => c.sql_type,
            Expr::Parameter(p) => p.sql_type,
            Expr::Arithmetic(a) => a.result_type(),
            Expr::Function(f) => f.return_type,
            Expr::Window(w) => w.function.return_type,
            Expr::Subquery(q) => q
                .select
                .selections
                .first()
                .map(|s| s.expr.sql_type())
                .unwrap_or_default(),
            Expr::Star
            | Expr::Tuple(_)
            | Expr::Any(_)
            | Expr::Every(_)
            | Expr::Summarization(_) => SqlType::Other,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            Expr::Literal(v) => Some(v),
            _ => None,
        }
    }
}

impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(v)
    }
}

impl From<ColumnReference> for Expr {
    fn from(c: ColumnReference) -> Self {
        Expr::Column(c)
    }
}

impl From<FunctionCall> for Expr {
    fn from(f: FunctionCall) -> Self {
        Expr::Function(f)
    }
}
