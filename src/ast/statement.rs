use serde::{Deserialize, Serialize};

use crate::ast::{
    ColumnReference, Expr, NamedTableReference, Predicate, TableGroup, TableReference,
};

/// Root of a translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Select(QuerySpec),
    Insert(InsertStatement),
    Update(UpdateStatement),
    Delete(DeleteStatement),
}

impl Statement {
    pub fn kind(&self) -> &'static str {
        match self {
            Statement::Select(_) => "select",
            Statement::Insert(_) => "insert",
            Statement::Update(_) => "update",
            Statement::Delete(_) => "delete",
        }
    }
}

/// One projected expression, optionally aliased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub expr: Expr,
    #[serde(default)]
    pub alias: Option<String>,
}

impl From<Expr> for Selection {
    fn from(expr: Expr) -> Self {
        Self { expr, alias: None }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectClause {
    #[serde(default)]
    pub distinct: bool,
    pub selections: Vec<Selection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NullPrecedence {
    First,
    Last,
}

/// ORDER BY item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpecification {
    pub expr: Expr,
    #[serde(default)]
    pub descending: bool,
    #[serde(default)]
    pub nulls: Option<NullPrecedence>,
}

impl SortSpecification {
    pub fn asc(expr: Expr) -> Self {
        Self { expr, descending: false, nulls: None }
    }

    pub fn desc(expr: Expr) -> Self {
        Self { expr, descending: true, nulls: None }
    }
}

/// Requested row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockMode {
    /// Shared lock (`for share`)
    Read,
    /// Exclusive lock (`for update`)
    Write,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockWait {
    #[default]
    Wait,
    NoWait,
    SkipLocked,
}

/// Whether the caller accepts locking through follow-up statements
/// instead of a lock clause on the query itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FollowOnLocking {
    /// Let the dialect decide.
    #[default]
    Allow,
    /// Always lock via a clause.
    Disallow,
    /// Always lock via follow-up statements.
    Force,
    /// Ignore follow-on concerns entirely.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockOptions {
    pub mode: LockMode,
    #[serde(default)]
    pub wait: LockWait,
    #[serde(default)]
    pub follow_on: FollowOnLocking,
}

/// A SELECT query specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    pub select: SelectClause,
    #[serde(default)]
    pub from: Vec<TableGroup>,
    #[serde(default)]
    pub restriction: Option<Predicate>,
    #[serde(default)]
    pub group_by: Vec<Expr>,
    #[serde(default)]
    pub having: Option<Predicate>,
    #[serde(default)]
    pub order_by: Vec<SortSpecification>,
    #[serde(default)]
    pub offset: Option<Expr>,
    #[serde(default)]
    pub fetch: Option<Expr>,
    #[serde(default)]
    pub lock: Option<LockOptions>,
}

impl QuerySpec {
    /// Start a query over a single table.
    ///
    /// # Example
    /// ```
    /// use qail_spanner::ast::builders::*;
    /// use qail_spanner::ast::QuerySpec;
    ///
    /// let q = QuerySpec::from_table(table("users"))
    ///     .column(col("id"))
    ///     .filter(eq(col("active"), boolean(true)))
    ///     .limit(10);
    /// assert_eq!(q.select.selections.len(), 1);
    /// ```
    pub fn from_table(table: impl Into<TableReference>) -> Self {
        Self {
            from: vec![TableGroup::new(table)],
            ..Self::default()
        }
    }

    /// Add a FROM item (comma join).
    pub fn also_from(mut self, group: TableGroup) -> Self {
        self.from.push(group);
        self
    }

    /// Join onto the last FROM item.
    pub fn join(
        mut self,
        kind: crate::ast::JoinKind,
        table: impl Into<TableReference>,
        on: Option<Predicate>,
    ) -> Self {
        if let Some(group) = self.from.pop() {
            self.from.push(group.join(kind, table, on));
        }
        self
    }

    pub fn select_all(self) -> Self {
        self.column(Expr::Star)
    }

    pub fn column(mut self, expr: Expr) -> Self {
        self.select.selections.push(Selection::from(expr));
        self
    }

    pub fn column_as(mut self, expr: Expr, alias: impl Into<String>) -> Self {
        self.select.selections.push(Selection { expr, alias: Some(alias.into()) });
        self
    }

    pub fn distinct(mut self) -> Self {
        self.select.distinct = true;
        self
    }

    /// AND a predicate into the restriction.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.restriction = Some(and_into(self.restriction.take(), predicate));
        self
    }

    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(and_into(self.having.take(), predicate));
        self
    }

    pub fn order_by(mut self, spec: SortSpecification) -> Self {
        self.order_by.push(spec);
        self
    }

    pub fn limit(mut self, n: i64) -> Self {
        self.fetch = Some(Expr::Literal(n.into()));
        self
    }

    pub fn offset(mut self, n: i64) -> Self {
        self.offset = Some(Expr::Literal(n.into()));
        self
    }

    pub fn lock(mut self, options: LockOptions) -> Self {
        self.lock = Some(options);
        self
    }
}

fn and_into(existing: Option<Predicate>, predicate: Predicate) -> Predicate {
    match existing {
        None => predicate,
        Some(Predicate::Junction(mut j)) if j.kind == crate::ast::JunctionKind::And => {
            j.predicates.push(predicate);
            Predicate::Junction(j)
        }
        Some(other) => Predicate::and([other, predicate]),
    }
}

/// `column = value` in SET and DO UPDATE SET lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub column: ColumnReference,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConflictAction {
    DoNothing,
    DoUpdate(Vec<Assignment>),
}

/// ON CONFLICT attachment of an INSERT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictClause {
    pub action: ConflictAction,
    #[serde(default)]
    pub constraint_name: Option<String>,
    #[serde(default)]
    pub constraint_columns: Vec<String>,
    #[serde(default)]
    pub predicate: Option<Predicate>,
}

impl ConflictClause {
    pub fn do_nothing() -> Self {
        Self {
            action: ConflictAction::DoNothing,
            constraint_name: None,
            constraint_columns: Vec::new(),
            predicate: None,
        }
    }

    pub fn do_update(assignments: Vec<Assignment>) -> Self {
        Self { action: ConflictAction::DoUpdate(assignments), ..Self::do_nothing() }
    }

    pub fn is_do_update(&self) -> bool {
        matches!(self.action, ConflictAction::DoUpdate(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InsertSource {
    Values(Vec<Vec<Expr>>),
    Query(Box<QuerySpec>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertStatement {
    pub target: NamedTableReference,
    #[serde(default)]
    pub columns: Vec<String>,
    pub source: InsertSource,
    #[serde(default)]
    pub conflict: Option<ConflictClause>,
    #[serde(default)]
    pub returning: Vec<ColumnReference>,
}

impl InsertStatement {
    pub fn new(target: NamedTableReference) -> Self {
        Self {
            target,
            columns: Vec::new(),
            source: InsertSource::Values(Vec::new()),
            conflict: None,
            returning: Vec::new(),
        }
    }

    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one VALUES row.
    pub fn values(mut self, row: Vec<Expr>) -> Self {
        match &mut self.source {
            InsertSource::Values(rows) => rows.push(row),
            InsertSource::Query(_) => self.source = InsertSource::Values(vec![row]),
        }
        self
    }

    pub fn select(mut self, query: QuerySpec) -> Self {
        self.source = InsertSource::Query(Box::new(query));
        self
    }

    pub fn on_conflict(mut self, conflict: ConflictClause) -> Self {
        self.conflict = Some(conflict);
        self
    }

    pub fn returning(mut self, column: ColumnReference) -> Self {
        self.returning.push(column);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatement {
    pub target: NamedTableReference,
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub restriction: Option<Predicate>,
    #[serde(default)]
    pub returning: Vec<ColumnReference>,
}

impl UpdateStatement {
    pub fn new(target: NamedTableReference) -> Self {
        Self { target, assignments: Vec::new(), restriction: None, returning: Vec::new() }
    }

    pub fn set(mut self, column: ColumnReference, value: Expr) -> Self {
        self.assignments.push(Assignment { column, value });
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.restriction = Some(and_into(self.restriction.take(), predicate));
        self
    }

    pub fn returning(mut self, column: ColumnReference) -> Self {
        self.returning.push(column);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteStatement {
    pub target: NamedTableReference,
    #[serde(default)]
    pub restriction: Option<Predicate>,
    #[serde(default)]
    pub returning: Vec<ColumnReference>,
}

impl DeleteStatement {
    pub fn new(target: NamedTableReference) -> Self {
        Self { target, restriction: None, returning: Vec::new() }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.restriction = Some(and_into(self.restriction.take(), predicate));
        self
    }

    pub fn returning(mut self, column: ColumnReference) -> Self {
        self.returning.push(column);
        self
    }
}
