pub mod builders;
pub mod expr;
pub mod predicate;
pub mod statement;
pub mod table;
pub mod values;

pub use self::expr::{
    ArithmeticOp, BinaryArithmetic, ColumnReference, Expr, FunctionCall, Parameter,
    Summarization, SummarizationKind, Window,
};
pub use self::predicate::{
    BetweenPredicate, Comparison, ComparisonOp, ExistsPredicate, InArrayPredicate,
    InListPredicate, InSubqueryPredicate, Junction, JunctionKind, LikePredicate,
    NullnessPredicate, Predicate, has_restriction,
};
pub use self::statement::{
    Assignment, ConflictAction, ConflictClause, DeleteStatement, FollowOnLocking, InsertSource,
    InsertStatement, LockMode, LockOptions, LockWait, NullPrecedence, QuerySpec, SelectClause,
    Selection, SortSpecification, Statement, UpdateStatement,
};
pub use self::table::{
    DerivedSource, DerivedTableReference, JoinKind, NamedTableReference, TableGroup, TableJoin,
    TableReference,
};
pub use self::values::Value;
