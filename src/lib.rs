//! # qail-spanner: portable SQL ASTs on Cloud Spanner
//!
//! Renders a backend-agnostic statement AST as Spanner SQL, emulating the
//! constructs Spanner lacks: LATERAL, ILIKE, row-value comparisons,
//! `is distinct from`, WHERE-less DML, ON CONFLICT and integer division.
//!
//! ## Quick Example
//!
//! ```rust
//! use qail_spanner::prelude::*;
//!
//! let query = QuerySpec::from_table(table("t"))
//!     .select_all()
//!     .filter(eq(col("x"), any(QuerySpec::from_table(table("s")).column(col("y")))));
//! let out = translate(&Statement::Select(query), Dialect::Spanner, &DialectConfig::spanner())?;
//! assert_eq!(out.sql, "select * from t where x in (select y from s)");
//! # Ok::<(), TranslateError>(())
//! ```
//!
//! ## Modules
//!
//! | Module       | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `ast`        | Statement AST and builder helpers              |
//! | `transpiler` | Renderer, dialects, temporary-table DDL        |
//! | `array`      | Array parameter widening and narrowing         |
//! | `config`     | Dialect configuration, TOML loading            |

pub mod array;
pub mod ast;
pub mod config;
pub mod error;
pub mod transpiler;
pub mod types;

pub mod prelude {
    pub use crate::array::{ArrayValue, SpannerArrayType};
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::config::DialectConfig;
    pub use crate::error::*;
    pub use crate::transpiler::{
        Dialect, LockStrategy, TemporaryTableExporter, ToSql, Translation, translate,
    };
    pub use crate::types::SqlType;
}
