//! Session temporary tables.
//!
//! Spanner has no temporary tables, so bulk operations use ordinary tables
//! created, cleared and dropped by the caller. This module only writes the
//! statements.

use serde::{Deserialize, Serialize};

use crate::config::DialectConfig;
use crate::error::TranslateResult;
use crate::types::SqlType;

/// `[catalog.][schema.]table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedTableName {
    #[serde(default)]
    pub catalog: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    pub table: String,
}

impl QualifiedTableName {
    pub fn new(table: impl Into<String>) -> Self {
        Self { catalog: None, schema: None, table: table.into() }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

impl std::fmt::Display for QualifiedTableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(catalog) = &self.catalog {
            write!(f, "{}.", catalog)?;
        }
        if let Some(schema) = &self.schema {
            write!(f, "{}.", schema)?;
        }
        f.write_str(&self.table)
    }
}

fn default_nullable() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryColumn {
    pub name: String,
    #[serde(default)]
    pub sql_type: SqlType,
    /// Explicit DDL type, used verbatim.
    #[serde(default)]
    pub type_definition: Option<String>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub primary_key: bool,
}

impl TemporaryColumn {
    pub fn new(name: impl Into<String>, sql_type: SqlType) -> Self {
        Self {
            name: name.into(),
            sql_type,
            type_definition: None,
            nullable: true,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Primary key columns are never nullable.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn type_definition(mut self, definition: impl Into<String>) -> Self {
        self.type_definition = Some(definition.into());
        self
    }
}

/// Descriptor of a session temporary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporaryTable {
    pub name: QualifiedTableName,
    pub columns: Vec<TemporaryColumn>,
    /// Column holding the owning session's id, for tables shared between sessions.
    #[serde(default)]
    pub session_uid_column: Option<String>,
}

impl TemporaryTable {
    pub fn new(name: QualifiedTableName) -> Self {
        Self { name, columns: Vec::new(), session_uid_column: None }
    }

    pub fn column(mut self, column: TemporaryColumn) -> Self {
        self.columns.push(column);
        self
    }

    pub fn session_uid_column(mut self, name: impl Into<String>) -> Self {
        self.session_uid_column = Some(name.into());
        self
    }
}

/// Writes create/drop/truncate statements for temporary tables.
///
/// # Example
/// ```
/// use qail_spanner::config::DialectConfig;
/// use qail_spanner::transpiler::{QualifiedTableName, TemporaryColumn, TemporaryTable, TemporaryTableExporter};
/// use qail_spanner::types::SqlType;
///
/// let table = TemporaryTable::new(QualifiedTableName::new("ht_person"))
///     .column(TemporaryColumn::new("id", SqlType::BigInt).primary_key());
/// let config = DialectConfig::spanner();
/// let sql = TemporaryTableExporter::new(&config).create_command(&table).unwrap();
/// assert_eq!(sql, "create table ht_person(id int64 not null) primary key (id)");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TemporaryTableExporter<'a> {
    config: &'a DialectConfig,
}

impl<'a> TemporaryTableExporter<'a> {
    pub fn new(config: &'a DialectConfig) -> Self {
        Self { config }
    }

    /// `create table t(<columns>)[ primary key (..)]`
    ///
    /// Spanner declares the primary key after the column list, outside the
    /// parentheses.
    pub fn create_command(&self, table: &TemporaryTable) -> TranslateResult<String> {
        let strategy = self.config.temporary_table_strategy()?;

        let mut sql = String::new();
        sql.push_str(&self.config.create_table_string);
        sql.push(' ');
        sql.push_str(&table.name.to_string());
        sql.push('(');

        let mut defs = Vec::with_capacity(table.columns.len());
        for column in &table.columns {
            let type_name = column
                .type_definition
                .as_deref()
                .unwrap_or_else(|| self.config.type_name(column.sql_type));
            let mut def = format!("{} {}", column.name, type_name);

            let annotation = strategy.column_annotation(column.sql_type);
            if !annotation.is_empty() {
                def.push(' ');
                def.push_str(annotation);
            }

            if strategy.supports_null_constraint {
                if column.nullable {
                    let marker = &self.config.null_column_string;
                    if !type_name.contains(marker.as_str()) {
                        def.push_str(marker);
                    }
                } else {
                    def.push_str(" not null");
                }
            }
            defs.push(def);
        }
        sql.push_str(&defs.join(", "));
        sql.push(')');

        if strategy.supports_primary_key {
            let keys: Vec<&str> = table
                .columns
                .iter()
                .filter(|c| c.primary_key)
                .map(|c| c.name.as_str())
                .collect();
            if !keys.is_empty() {
                sql.push_str(" primary key (");
                sql.push_str(&keys.join(", "));
                sql.push(')');
            }
        }

        tracing::debug!("Temporary table DDL for {}: {}", table.name, sql);
        Ok(sql)
    }

    pub fn drop_command(&self, table: &TemporaryTable) -> String {
        format!("drop table {}", table.name)
    }

    /// Spanner has no TRUNCATE and DELETE needs a WHERE clause.
    pub fn truncate_command(&self, table: &TemporaryTable) -> String {
        match &table.session_uid_column {
            Some(column) => format!("delete from {} where {}=?", table.name, column),
            None => format!("delete from {} where true", table.name),
        }
    }
}
