//! Temporary-table statements.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;

use crate::config::{DialectConfig, TemporaryTableStrategy};
use crate::error::TranslateError;
use crate::transpiler::{QualifiedTableName, TemporaryColumn, TemporaryTable, TemporaryTableExporter};
use crate::types::SqlType;

fn person_table() -> TemporaryTable {
    TemporaryTable::new(QualifiedTableName::new("ht_person"))
        .column(TemporaryColumn::new("id", SqlType::BigInt).primary_key())
        .column(TemporaryColumn::new("name", SqlType::Varchar))
}

fn create(config: &DialectConfig, table: &TemporaryTable) -> String {
    TemporaryTableExporter::new(config).create_command(table).unwrap()
}

#[test]
fn test_primary_key_after_columns() {
    let config = DialectConfig::spanner();
    assert_eq!(
        create(&config, &person_table()),
        "create table ht_person(id int64 not null, name string(max)) primary key (id)"
    );
}

#[test]
fn test_composite_primary_key() {
    let table = TemporaryTable::new(QualifiedTableName::new("ht_item"))
        .column(TemporaryColumn::new("order_id", SqlType::BigInt).primary_key())
        .column(TemporaryColumn::new("line", SqlType::Integer).primary_key());
    assert_eq!(
        create(&DialectConfig::spanner(), &table),
        "create table ht_item(order_id int64 not null, line int64 not null) primary key (order_id, line)"
    );
}

#[test]
fn test_without_primary_key_columns() {
    let table = TemporaryTable::new(QualifiedTableName::new("ht_log"))
        .column(TemporaryColumn::new("message", SqlType::Varchar).not_null());
    assert_eq!(
        create(&DialectConfig::spanner(), &table),
        "create table ht_log(message string(max) not null)"
    );
}

#[test]
fn test_primary_key_unsupported() {
    let strategy = TemporaryTableStrategy { supports_primary_key: false, ..TemporaryTableStrategy::default() };
    let config = DialectConfig::builder().temporary_table(Some(strategy)).build();
    assert_eq!(
        create(&config, &person_table()),
        "create table ht_person(id int64 not null, name string(max))"
    );
}

#[test]
fn test_null_constraint_unsupported() {
    let strategy = TemporaryTableStrategy { supports_null_constraint: false, ..TemporaryTableStrategy::default() };
    let config = DialectConfig::builder()
        .null_column_string(" null")
        .temporary_table(Some(strategy))
        .build();
    assert_eq!(
        create(&config, &person_table()),
        "create table ht_person(id int64, name string(max)) primary key (id)"
    );
}

#[test]
fn test_nullable_marker() {
    let config = DialectConfig::builder().null_column_string(" null").build();
    assert_eq!(
        create(&config, &person_table()),
        "create table ht_person(id int64 not null, name string(max) null) primary key (id)"
    );

    // The marker is not repeated when the type definition already carries it.
    let table = TemporaryTable::new(QualifiedTableName::new("t"))
        .column(TemporaryColumn::new("v", SqlType::Varchar).type_definition("string(10) null"));
    assert_eq!(create(&config, &table), "create table t(v string(10) null)");
}

#[test]
fn test_column_annotation() {
    let mut annotations = BTreeMap::new();
    annotations.insert("timestamp".to_string(), "options (allow_commit_timestamp=true)".to_string());
    let strategy = TemporaryTableStrategy { column_annotations: annotations, ..TemporaryTableStrategy::default() };
    let config = DialectConfig::builder().temporary_table(Some(strategy)).build();

    let table = TemporaryTable::new(QualifiedTableName::new("ht_event"))
        .column(TemporaryColumn::new("id", SqlType::BigInt).primary_key())
        .column(TemporaryColumn::new("at", SqlType::Timestamp).not_null());
    assert_eq!(
        create(&config, &table),
        "create table ht_event(id int64 not null, at timestamp options (allow_commit_timestamp=true) not null) primary key (id)"
    );
}

#[test]
fn test_type_definitions() {
    let config = DialectConfig::builder().type_name(SqlType::Varchar, "string(255)").build();
    let table = TemporaryTable::new(QualifiedTableName::new("t"))
        .column(TemporaryColumn::new("a", SqlType::Varchar))
        .column(TemporaryColumn::new("b", SqlType::Other).type_definition("json"))
        .column(TemporaryColumn::new("c", SqlType::Boolean));
    assert_eq!(create(&config, &table), "create table t(a string(255), b json, c bool)");
}

#[test]
fn test_qualified_name() {
    let name = QualifiedTableName::new("ht_person").schema("app").catalog("main");
    assert_eq!(name.to_string(), "main.app.ht_person");
    let table = TemporaryTable::new(name).column(TemporaryColumn::new("id", SqlType::BigInt));
    assert_eq!(create(&DialectConfig::spanner(), &table), "create table main.app.ht_person(id int64)");
}

#[test]
fn test_missing_strategy() {
    let config = DialectConfig::builder().temporary_table(None).build();
    let err = TemporaryTableExporter::new(&config).create_command(&person_table()).unwrap_err();
    assert!(matches!(err, TranslateError::Config(_)));
}

#[test]
fn test_drop_and_truncate() {
    let config = DialectConfig::spanner();
    let exporter = TemporaryTableExporter::new(&config);
    let table = person_table();
    assert_eq!(exporter.drop_command(&table), "drop table ht_person");
    assert_eq!(exporter.truncate_command(&table), "delete from ht_person where true");

    let shared = table.session_uid_column("hib_sess_id");
    assert_eq!(exporter.truncate_command(&shared), "delete from ht_person where hib_sess_id=?");
}

#[test]
fn test_descriptor_from_json() {
    let table: TemporaryTable = serde_json::from_str(
        r#"{
            "name": {"table": "ht_person"},
            "columns": [
                {"name": "id", "sql_type": "big_int", "primary_key": true, "nullable": false},
                {"name": "email"}
            ]
        }"#,
    )
    .unwrap();
    assert!(table.columns[1].nullable);
    assert_eq!(
        create(&DialectConfig::spanner(), &table),
        "create table ht_person(id int64 not null, email string(max)) primary key (id)"
    );
}
