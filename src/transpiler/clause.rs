/// The clause currently being rendered.
///
/// Dialect hooks inspect the innermost entry through
/// [`Renderer::current_clause`](super::Renderer::current_clause), e.g. to
/// leave the alias off an INSERT target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    From,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Offset,
    Fetch,
    ForUpdate,
    Insert,
    Values,
    Conflict,
    Update,
    Set,
    Delete,
    Returning,
    Partition,
}

impl Clause {
    pub fn name(self) -> &'static str {
        match self {
            Clause::Select => "select",
            Clause::From => "from",
            Clause::Where => "where",
            Clause::GroupBy => "group by",
            Clause::Having => "having",
            Clause::OrderBy => "order by",
            Clause::Offset => "offset",
            Clause::Fetch => "fetch",
            Clause::ForUpdate => "for update",
            Clause::Insert => "insert",
            Clause::Values => "values",
            Clause::Conflict => "on conflict",
            Clause::Update => "update",
            Clause::Set => "set",
            Clause::Delete => "delete",
            Clause::Returning => "returning",
            Clause::Partition => "partition by",
        }
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
