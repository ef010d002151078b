use serde::{Deserialize, Serialize};

use crate::ast::{FunctionCall, Predicate, QuerySpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn sql_text(self) -> &'static str {
        match self {
            JoinKind::Inner => " join ",
            JoinKind::Left => " left join ",
            JoinKind::Right => " right join ",
            JoinKind::Full => " full join ",
            JoinKind::Cross => " cross join ",
        }
    }
}

/// A physical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedTableReference {
    pub table: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl NamedTableReference {
    pub fn new(table: impl Into<String>) -> Self {
        Self { table: table.into(), alias: None }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// What a derived table reads from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DerivedSource {
    /// A subquery in FROM position.
    QueryPart(Box<QuerySpec>),
    /// A table-valued function, e.g. `unnest(?)`.
    Function(FunctionCall),
}

/// A row source that is not a physical table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTableReference {
    pub source: DerivedSource,
    pub alias: String,
    /// Column names declared on the reference: `(..) alias(c1,c2)`
    #[serde(default)]
    pub column_names: Vec<String>,
    /// May reference columns of preceding FROM items.
    #[serde(default)]
    pub lateral: bool,
}

impl DerivedTableReference {
    pub fn query(query: QuerySpec, alias: impl Into<String>) -> Self {
        Self {
            source: DerivedSource::QueryPart(Box::new(query)),
            alias: alias.into(),
            column_names: Vec::new(),
            lateral: false,
        }
    }

    pub fn function(function: FunctionCall, alias: impl Into<String>) -> Self {
        Self {
            source: DerivedSource::Function(function),
            alias: alias.into(),
            column_names: Vec::new(),
            lateral: false,
        }
    }

    pub fn lateral(mut self) -> Self {
        self.lateral = true;
        self
    }

    pub fn columns<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.column_names = names.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableReference {
    Named(NamedTableReference),
    Derived(DerivedTableReference),
}

impl TableReference {
    pub fn alias(&self) -> Option<&str> {
        match self {
            TableReference::Named(t) => t.alias.as_deref(),
            TableReference::Derived(t) => Some(&t.alias),
        }
    }
}

impl From<NamedTableReference> for TableReference {
    fn from(t: NamedTableReference) -> Self {
        TableReference::Named(t)
    }
}

impl From<DerivedTableReference> for TableReference {
    fn from(t: DerivedTableReference) -> Self {
        TableReference::Derived(t)
    }
}

/// A join definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableJoin {
    pub kind: JoinKind,
    pub table: TableReference,
    #[serde(default)]
    pub on: Option<Predicate>,
}

/// One comma-separated FROM item: a primary table and its joins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableGroup {
    pub primary: TableReference,
    #[serde(default)]
    pub joins: Vec<TableJoin>,
}

impl TableGroup {
    pub fn new(primary: impl Into<TableReference>) -> Self {
        Self { primary: primary.into(), joins: Vec::new() }
    }

    pub fn join(
        mut self,
        kind: JoinKind,
        table: impl Into<TableReference>,
        on: Option<Predicate>,
    ) -> Self {
        self.joins.push(TableJoin { kind, table: table.into(), on });
        self
    }
}
