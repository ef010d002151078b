//! Spanner emulation tests.

use pretty_assertions::assert_eq;

use super::to_spanner;
use crate::ast::builders::*;
use crate::ast::*;
use crate::error::{ErrorKind, TranslateError};
use crate::transpiler::LockStrategy;
use crate::types::SqlType;

fn sql(statement: Statement) -> String {
    to_spanner(statement).unwrap().sql
}

fn select(query: QuerySpec) -> String {
    sql(Statement::Select(query))
}

fn select_err(query: QuerySpec) -> TranslateError {
    to_spanner(Statement::Select(query)).unwrap_err()
}

fn from_t() -> QuerySpec {
    QuerySpec::from_table(table("t")).select_all()
}

// DML without restriction

#[test]
fn test_delete_without_where() {
    let stmt = Statement::Delete(DeleteStatement::new(table("t")));
    assert_eq!(sql(stmt), "delete from t where true");
}

#[test]
fn test_delete_with_alias_and_restriction() {
    let stmt = Statement::Delete(
        DeleteStatement::new(table("t").alias("x")).filter(eq(qcol("x", "id"), int(1))),
    );
    assert_eq!(sql(stmt), "delete from t x where x.id=1");
}

#[test]
fn test_delete_empty_junction_counts_as_no_restriction() {
    let mut delete = DeleteStatement::new(table("t"));
    delete.restriction = Some(Predicate::and([]));
    assert_eq!(sql(Statement::Delete(delete)), "delete from t where true");
}

#[test]
fn test_delete_negated_empty_junction_counts_as_no_restriction() {
    let stmt = Statement::Delete(
        DeleteStatement::new(table("t")).filter(Predicate::Negated(Box::new(Predicate::and([])))),
    );
    assert_eq!(sql(stmt), "delete from t where true");

    let stmt = Statement::Delete(DeleteStatement::new(table("t")).filter(Predicate::and([
        Predicate::Negated(Box::new(Predicate::or([]))),
        eq(col("id"), int(1)),
    ])));
    assert_eq!(sql(stmt), "delete from t where id=1");
}

#[test]
fn test_delete_returning() {
    let stmt = Statement::Delete(DeleteStatement::new(table("t")).returning(ColumnReference::new("id")));
    assert_eq!(sql(stmt), "delete from t where true returning id");
}

#[test]
fn test_update_without_where() {
    let stmt = Statement::Update(UpdateStatement::new(table("t").alias("x")).set(ColumnReference::new("a"), int(1)));
    assert_eq!(sql(stmt), "update t x set a=1 where true");
}

#[test]
fn test_update_with_restriction() {
    let stmt = Statement::Update(
        UpdateStatement::new(table("t").alias("x"))
            .set(ColumnReference::new("a"), int(1))
            .filter(eq(qcol("x", "id"), param(SqlType::BigInt))),
    );
    let out = to_spanner(stmt).unwrap();
    assert_eq!(out.sql, "update t x set a=1 where x.id=?");
    assert_eq!(out.parameters.len(), 1);
    assert!(out.affected_tables.contains("t"));
}

// Comparisons

#[test]
fn test_eq_any_becomes_in() {
    let q = from_t().filter(eq(col("x"), any(QuerySpec::from_table(table("s")).column(col("y")))));
    assert_eq!(select(q), "select * from t where x in (select y from s)");
}

#[test]
fn test_ne_all_becomes_not_in() {
    let q = from_t().filter(ne(col("x"), all(QuerySpec::from_table(table("s")).column(col("y")))));
    assert_eq!(select(q), "select * from t where x not in (select y from s)");
}

#[test]
fn test_distinct_from_uses_intersect() {
    let q = from_t().filter(cmp(col("a"), ComparisonOp::DistinctFrom, col("b")));
    assert_eq!(select(q), "select * from t where not exists (select a intersect select b)");

    let q = from_t().filter(cmp(col("a"), ComparisonOp::NotDistinctFrom, col("b")));
    assert_eq!(select(q), "select * from t where exists (select a intersect select b)");
}

#[test]
fn test_tuple_comparison_expanded() {
    let q = from_t().filter(eq(tuple(vec![col("a"), col("b")]), tuple(vec![int(1), int(2)])));
    assert_eq!(select(q), "select * from t where (a=1 and b=2)");

    let q = from_t().filter(gt(tuple(vec![col("a"), col("b")]), tuple(vec![int(1), int(2)])));
    assert_eq!(select(q), "select * from t where (a>=1 and (a>1 or b>2))");
}

#[test]
fn test_tuple_against_subquery() {
    let sub = QuerySpec::from_table(table("s"))
        .column(col("x"))
        .column(col("y"))
        .filter(eq(col("k"), int(1)));
    let q = from_t().filter(eq(tuple(vec![col("a"), col("b")]), subquery(sub.clone())));
    assert_eq!(
        select(q),
        "select * from t where exists (select 1 from s where (k=1) and (x=a and y=b))"
    );

    let q = from_t().filter(lt(tuple(vec![col("a"), col("b")]), subquery(sub)));
    assert_eq!(
        select(q),
        "select * from t where exists (select 1 from s where (k=1) and (x>=a and (x>a or y>b)))"
    );
}

#[test]
fn test_tuple_against_grouped_subquery_compares_in_having() {
    let sub = QuerySpec::from_table(table("s"))
        .column(col("x"))
        .column(func("max", vec![col("y")]))
        .group_by(col("x"));
    let q = from_t().filter(eq(tuple(vec![col("a"), col("b")]), subquery(sub.clone())));
    assert_eq!(
        select(q),
        "select * from t where exists (select 1 from s group by x having (x=a and max(y)=b))"
    );

    let sub = sub
        .filter(eq(col("k"), int(1)))
        .having(gt(func("count", vec![Expr::Star]), int(1)));
    let q = from_t().filter(ne(tuple(vec![col("a"), col("b")]), subquery(sub)));
    assert_eq!(
        select(q),
        "select * from t where not exists (select 1 from s where k=1 group by x having (count(*)>1) and (x=a and max(y)=b))"
    );
}

#[test]
fn test_tuple_against_limited_subquery_is_rejected() {
    let sub = QuerySpec::from_table(table("s")).column(col("x")).column(col("y"));
    let q = from_t().filter(eq(tuple(vec![col("a"), col("b")]), subquery(sub.clone().limit(1))));
    assert_eq!(select_err(q).kind(), ErrorKind::UnsupportedOperation);

    let q = from_t().filter(lt(tuple(vec![col("a"), col("b")]), any(sub.offset(5))));
    assert_eq!(select_err(q).kind(), ErrorKind::UnsupportedOperation);
}

#[test]
fn test_string_literal_escaping() {
    let q = from_t().filter(eq(col("name"), text("it's")));
    assert_eq!(select(q), "select * from t where name='it\\'s'");
}

#[test]
fn test_non_finite_float_literals_are_cast() {
    let q = QuerySpec::default()
        .column(float(f64::NAN))
        .column(float(f64::INFINITY))
        .column(float(f64::NEG_INFINITY))
        .column(float(2.5));
    assert_eq!(
        select(q),
        "select cast('nan' as float64),cast('inf' as float64),cast('-inf' as float64),2.5"
    );
}

// LATERAL

fn orders() -> QuerySpec {
    QuerySpec::from_table(table("orders").alias("o"))
        .column(qcol("o", "id"))
        .filter(eq(qcol("o", "person_id"), qcol("p", "id")))
}

#[test]
fn test_lateral_subquery_becomes_unnest_array() {
    let q = QuerySpec::from_table(table("person").alias("p"))
        .column(qcol("p", "name"))
        .column(qcol("x", "id"))
        .also_from(TableGroup::new(derived(orders(), "x").lateral()));
    assert_eq!(
        select(q),
        "select p.name,x.id from person p,unnest(array(select as struct o.id from orders o where o.person_id=p.id)) x"
    );
}

#[test]
fn test_lateral_column_names_become_selection_aliases() {
    let q = QuerySpec::from_table(table("person").alias("p"))
        .select_all()
        .also_from(TableGroup::new(derived(orders(), "x").lateral().columns(["order_id"])));
    assert_eq!(
        select(q),
        "select * from person p,unnest(array(select as struct o.id order_id from orders o where o.person_id=p.id)) x"
    );
}

#[test]
fn test_query_nested_in_lateral_is_not_correlated() {
    let items = QuerySpec::from_table(table("items").alias("i"))
        .column(int(1))
        .filter(eq(qcol("i", "order_id"), qcol("o", "id")));
    let inner = QuerySpec::from_table(table("orders").alias("o"))
        .column(qcol("o", "id"))
        .filter(exists(items));
    let q = QuerySpec::from_table(table("person").alias("p"))
        .select_all()
        .also_from(TableGroup::new(derived(inner, "x").lateral()));
    assert_eq!(
        select(q),
        "select * from person p,unnest(array(select as struct o.id from orders o where exists (select 1 from items i where i.order_id=o.id))) x"
    );
}

#[test]
fn test_lateral_function_keeps_alias_outside() {
    let unnest = FunctionCall {
        name: "unnest".into(),
        args: vec![qcol("p", "tags")],
        return_type: SqlType::Other,
    };
    let q = QuerySpec::from_table(table("person").alias("p"))
        .select_all()
        .also_from(TableGroup::new(DerivedTableReference::function(unnest, "tag").lateral()));
    assert_eq!(select(q), "select * from person p,unnest(p.tags) tag");
}

fn unnest_call(array: Expr) -> FunctionCall {
    FunctionCall { name: "unnest".into(), args: vec![array], return_type: SqlType::Other }
}

#[test]
fn test_unnest_column_name_becomes_alias() {
    let source = DerivedTableReference::function(unnest_call(param(SqlType::Array)), "t").columns(["x"]);
    let q = QuerySpec::from_table(source).column(col("x"));
    assert_eq!(select(q), "select x from unnest(?) x");

    let tags = DerivedTableReference::function(unnest_call(qcol("p", "tags")), "t")
        .columns(["tag"])
        .lateral();
    let q = QuerySpec::from_table(table("person").alias("p"))
        .column(qcol("p", "name"))
        .column(col("tag"))
        .also_from(TableGroup::new(tags));
    assert_eq!(select(q), "select p.name,tag from person p,unnest(p.tags) tag");
}

#[test]
fn test_function_column_names_that_cannot_be_kept_are_rejected() {
    let pairs = DerivedTableReference::function(unnest_call(param(SqlType::Array)), "t").columns(["k", "v"]);
    let err = select_err(QuerySpec::from_table(pairs).select_all());
    assert!(matches!(err, TranslateError::IllegalQueryOperation(_)));

    let series = FunctionCall {
        name: "generate_array".into(),
        args: vec![int(1), int(3)],
        return_type: SqlType::Other,
    };
    let source = DerivedTableReference::function(series, "g").columns(["n"]).lateral();
    let q = QuerySpec::from_table(table("person").alias("p")).select_all().also_from(TableGroup::new(source));
    assert!(matches!(select_err(q), TranslateError::IllegalQueryOperation(_)));
}

#[test]
fn test_nested_lateral_subqueries() {
    let items = QuerySpec::from_table(table("items").alias("i"))
        .column(qcol("i", "id"))
        .filter(eq(qcol("i", "order_id"), qcol("o", "id")));
    let orders = QuerySpec::from_table(table("orders").alias("o"))
        .column(qcol("y", "id"))
        .also_from(TableGroup::new(derived(items, "y").lateral()))
        .filter(eq(qcol("o", "person_id"), qcol("p", "id")));
    let q = QuerySpec::from_table(table("person").alias("p"))
        .select_all()
        .also_from(TableGroup::new(derived(orders, "x").lateral()))
        .filter(exists(QuerySpec::from_table(table("z")).column(int(1))));
    assert_eq!(
        select(q),
        "select * from person p,unnest(array(select as struct y.id from orders o,\
         unnest(array(select as struct i.id from items i where i.order_id=o.id)) y \
         where o.person_id=p.id)) x where exists (select 1 from z)"
    );
}

// Derived tables

#[test]
fn test_derived_column_names_pushed_into_subquery() {
    let inner = QuerySpec::from_table(table("t")).column(col("a")).column(col("b"));
    let q = QuerySpec::from_table(derived(inner, "d").columns(["c1", "c2"])).select_all();
    assert_eq!(select(q), "select * from (select a c1,b c2 from t) d");
}

#[test]
fn test_derived_column_names_on_star_selection_rejected() {
    let inner = QuerySpec::from_table(table("t")).select_all();
    let q = QuerySpec::from_table(derived(inner, "d").columns(["c1"])).select_all();
    let err = select_err(q);
    assert!(matches!(err, TranslateError::IllegalQueryOperation(_)));
}

#[test]
fn test_derived_column_count_mismatch_rejected() {
    let inner = QuerySpec::from_table(table("t")).column(col("a"));
    let q = QuerySpec::from_table(derived(inner, "d").columns(["c1", "c2"])).select_all();
    assert!(matches!(select_err(q), TranslateError::IllegalQueryOperation(_)));
}

// Grouping

#[test]
fn test_literal_partition_item() {
    let q = QuerySpec::from_table(table("t"))
        .column(func("count", vec![Expr::Star]))
        .group_by(int(1));
    assert_eq!(select(q), "select count(*) from t group by '0' || '0'");
}

#[test]
fn test_window_partition_literal() {
    let window = Window {
        function: FunctionCall { name: "row_number".into(), args: vec![], return_type: SqlType::BigInt },
        partition_by: vec![int(1)],
        order_by: vec![SortSpecification::desc(col("a"))],
    };
    let q = QuerySpec::from_table(table("t")).column(Expr::Window(Box::new(window)));
    assert_eq!(select(q), "select row_number() over (partition by '0' || '0' order by a desc) from t");
}

#[test]
fn test_summarization_unsupported() {
    let q = QuerySpec::from_table(table("t"))
        .column(col("a"))
        .group_by(rollup(vec![col("a"), col("b")]));
    let err = select_err(q.clone());
    assert!(matches!(err, TranslateError::Unsupported(_)));
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    // fails the same way every time
    assert!(matches!(select_err(q), TranslateError::Unsupported(_)));

    let q = QuerySpec::from_table(table("t")).column(col("a")).group_by(cube(vec![col("a")]));
    assert!(matches!(select_err(q), TranslateError::Unsupported(_)));
}

// Paging and locking

#[test]
fn test_limit_offset() {
    let q = from_t().limit(10).offset(5);
    assert_eq!(select(q), "select * from t limit 10 offset 5");
}

#[test]
fn test_locks_are_ignored() {
    for follow_on in [FollowOnLocking::Allow, FollowOnLocking::Force, FollowOnLocking::Disallow] {
        let q = from_t().lock(LockOptions { mode: LockMode::Write, wait: LockWait::NoWait, follow_on });
        let out = to_spanner(Statement::Select(q)).unwrap();
        assert_eq!(out.sql, "select * from t");
        assert_eq!(out.lock_strategy, LockStrategy::None);
    }
}

// IN array

#[test]
fn test_in_array_uses_unnest() {
    let q = from_t().filter(in_array(col("id"), param(SqlType::Array)));
    let out = to_spanner(Statement::Select(q)).unwrap();
    assert_eq!(out.sql, "select * from t where id in unnest(?)");
    assert_eq!(out.parameters[0].sql_type, SqlType::Array);
}

// LIKE

#[test]
fn test_ilike_emulated_with_lower() {
    let q = from_t().filter(ilike(col("name"), text("%ab%")).into());
    assert_eq!(select(q), "select * from t where lower(name) like lower('%ab%')");

    let q = from_t().filter(ilike(col("name"), text("%ab%")).negate().into());
    assert_eq!(select(q), "select * from t where lower(name) not like lower('%ab%')");
}

#[test]
fn test_like_custom_escape_rewritten() {
    let q = from_t().filter(like(col("name"), text("100!%")).escape(text("!")).into());
    // pattern 100\% written as a GoogleSQL literal
    assert_eq!(select(q), "select * from t where name like '100\\\\%'");
}

#[test]
fn test_like_backslash_escape_unchanged() {
    let q = from_t().filter(like(col("name"), text("a\\%")).escape(text("\\")).into());
    assert_eq!(select(q), "select * from t where name like 'a\\\\%'");
}

#[test]
fn test_ilike_with_custom_escape() {
    let q = from_t().filter(ilike(col("name"), text("a!_%")).escape(text("!")).into());
    assert_eq!(select(q), "select * from t where lower(name) like lower('a\\\\_%')");
}

#[test]
fn test_like_escape_needs_literals() {
    let q = from_t().filter(like(col("name"), param(SqlType::Varchar)).escape(text("!")).into());
    let err = select_err(q);
    assert!(matches!(err, TranslateError::UnresolvableLiteral(_)));
    assert_eq!(err.kind(), ErrorKind::IllegalQueryOperation);

    let q = from_t().filter(like(col("name"), text("a")).escape(param(SqlType::Char)).into());
    assert!(matches!(select_err(q), TranslateError::UnresolvableLiteral(_)));
}

// INSERT and conflicts

#[test]
fn test_insert_or_update() {
    let stmt = Statement::Insert(
        InsertStatement::new(table("t"))
            .columns(["a", "b"])
            .values(vec![int(1), int(2)])
            .values(vec![int(3), int(4)])
            .on_conflict(ConflictClause::do_update(vec![Assignment {
                column: ColumnReference::new("b"),
                value: int(9),
            }])),
    );
    assert_eq!(sql(stmt), "insert or update into t(a,b) values (1,2),(3,4)");
}

#[test]
fn test_insert_or_ignore_from_query() {
    let stmt = Statement::Insert(
        InsertStatement::new(table("t").alias("x"))
            .columns(["a"])
            .select(QuerySpec::from_table(table("s")).column(col("a")))
            .on_conflict(ConflictClause::do_nothing())
            .returning(ColumnReference::new("a")),
    );
    let out = to_spanner(stmt).unwrap();
    assert_eq!(out.sql, "insert or ignore into t(a) select a from s returning a");
    assert_eq!(out.affected_tables.len(), 2);
}

#[test]
fn test_conflict_clause_features_rejected() {
    let named = ConflictClause { constraint_name: Some("pk".into()), ..ConflictClause::do_nothing() };
    let with_columns = ConflictClause { constraint_columns: vec!["a".into()], ..ConflictClause::do_nothing() };
    let with_predicate = ConflictClause {
        predicate: Some(eq(col("a"), int(1))),
        ..ConflictClause::do_update(vec![])
    };
    for conflict in [named, with_columns, with_predicate] {
        let stmt = Statement::Insert(
            InsertStatement::new(table("t")).columns(["a"]).values(vec![int(1)]).on_conflict(conflict),
        );
        let err = to_spanner(stmt).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalQueryOperation);
    }
}

#[test]
fn test_conflict_with_empty_predicate_allowed() {
    let conflict = ConflictClause { predicate: Some(Predicate::and([])), ..ConflictClause::do_nothing() };
    let stmt = Statement::Insert(
        InsertStatement::new(table("t")).columns(["a"]).values(vec![int(1)]).on_conflict(conflict),
    );
    assert_eq!(sql(stmt), "insert or ignore into t(a) values (1)");
}

#[test]
fn test_plain_insert_has_no_alias() {
    let stmt = Statement::Insert(
        InsertStatement::new(table("t").alias("x"))
            .columns(["a", "b"])
            .values(vec![int(1), param(SqlType::BigInt)]),
    );
    assert_eq!(sql(stmt), "insert into t (a,b) values (1,?)");
}

// Arithmetic

#[test]
fn test_integer_division_uses_div() {
    let q = QuerySpec::from_table(table("t")).column(arith(
        typed_col("a", SqlType::Integer),
        ArithmeticOp::DividePortable,
        typed_col("b", SqlType::BigInt),
    ));
    assert_eq!(select(q), "select div(a,b) from t");
}

#[test]
fn test_other_division_unchanged() {
    let q = QuerySpec::from_table(table("t")).column(arith(
        typed_col("c", SqlType::Double),
        ArithmeticOp::DividePortable,
        typed_col("b", SqlType::BigInt),
    ));
    assert_eq!(select(q), "select (c/b) from t");

    let q = QuerySpec::from_table(table("t")).column(arith(
        typed_col("a", SqlType::Integer),
        ArithmeticOp::Divide,
        typed_col("b", SqlType::Integer),
    ));
    assert_eq!(select(q), "select (a/b) from t");
}

#[test]
fn test_join_registers_affected_tables() {
    let q = QuerySpec::from_table(table("t").alias("a")).select_all().join(
        JoinKind::Inner,
        table("s").alias("b"),
        Some(eq(qcol("a", "id"), qcol("b", "tid"))),
    );
    let out = to_spanner(Statement::Select(q)).unwrap();
    assert_eq!(out.sql, "select * from t a join s b on a.id=b.tid");
    assert_eq!(out.affected_tables.into_iter().collect::<Vec<_>>(), vec!["s", "t"]);
}
