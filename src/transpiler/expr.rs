//! Expression rendering.

use crate::ast::{
    ArithmeticOp, BinaryArithmetic, ColumnReference, Expr, FunctionCall, NullPrecedence,
    QuerySpec, SortSpecification, Summarization, Value, Window,
};
use crate::error::TranslateResult;
use crate::transpiler::{Clause, Emit, QueryScope, Renderer};
use crate::types::SqlType;

impl Renderer<'_> {
    pub fn render_expr(&mut self, expr: &Expr) -> TranslateResult<()> {
        match expr {
            Expr::Star => {
                self.append_char('*');
                Ok(())
            }
            Expr::Literal(value) => {
                self.render_literal(value);
                Ok(())
            }
            Expr::Column(column) => {
                self.render_column(column);
                Ok(())
            }
            Expr::Parameter(parameter) => {
                self.add_parameter(parameter);
                Ok(())
            }
            Expr::Arithmetic(arithmetic) => self.render_binary_arithmetic(arithmetic),
            Expr::Function(function) => self.render_function(function),
            Expr::Window(window) => self.render_window(window),
            Expr::Tuple(items) => {
                self.append_char('(');
                self.render_list(items, ",", |r, item| r.render_expr(item))?;
                self.append_char(')');
                Ok(())
            }
            Expr::Any(query) => {
                self.append("any(");
                self.render_query(query, QueryScope::default())?;
                self.append_char(')');
                Ok(())
            }
            Expr::Every(query) => {
                self.append("all(");
                self.render_query(query, QueryScope::default())?;
                self.append_char(')');
                Ok(())
            }
            Expr::Subquery(query) => self.render_subquery(query),
            Expr::Summarization(summarization) => self.render_summarization(summarization),
        }
    }

    /// `(query)`, rendered in a fresh scope.
    pub fn render_subquery(&mut self, query: &QuerySpec) -> TranslateResult<()> {
        self.append_char('(');
        self.render_query(query, QueryScope::default())?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_literal(&mut self, value: &Value) {
        let text = match value {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) if !n.is_finite() => {
                let text = if n.is_nan() {
                    "nan"
                } else if n.is_sign_negative() {
                    "-inf"
                } else {
                    "inf"
                };
                format!("cast('{}' as {})", text, self.config().type_name(SqlType::Double))
            }
            Value::Float(n) => format!("{:?}", n),
            Value::String(s) => self.config().quote_literal(s),
            Value::Date(d) => format!("date '{}'", d.format("%Y-%m-%d")),
            Value::Timestamp(ts) => format!("timestamp '{}'", ts.format("%Y-%m-%d %H:%M:%S%.f")),
        };
        self.append(&text);
    }

    pub fn render_column(&mut self, column: &ColumnReference) {
        if let Some(qualifier) = &column.qualifier {
            self.append(qualifier);
            self.append_char('.');
        }
        self.append(&column.name);
    }

    pub fn render_binary_arithmetic(&mut self, arithmetic: &BinaryArithmetic) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_binary_arithmetic(self, arithmetic)? == Emit::Rendered {
            return Ok(());
        }
        self.default_binary_arithmetic(arithmetic)
    }

    /// `(l+r)` style infix; modulo as `mod(l,r)`.
    pub fn default_binary_arithmetic(&mut self, arithmetic: &BinaryArithmetic) -> TranslateResult<()> {
        if arithmetic.op == ArithmeticOp::Modulo {
            return self.render_function_syntax("mod", &arithmetic.left, &arithmetic.right);
        }
        self.append_char('(');
        self.render_expr(&arithmetic.left)?;
        self.append(arithmetic.op.sql_text());
        self.render_expr(&arithmetic.right)?;
        self.append_char(')');
        Ok(())
    }

    /// `name(l,r)`
    pub fn render_function_syntax(&mut self, name: &str, left: &Expr, right: &Expr) -> TranslateResult<()> {
        self.append(name);
        self.append_char('(');
        self.render_expr(left)?;
        self.append_char(',');
        self.render_expr(right)?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_function(&mut self, function: &FunctionCall) -> TranslateResult<()> {
        self.append(&function.name);
        self.append_char('(');
        self.render_list(&function.args, ",", |r, arg| r.render_expr(arg))?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_window(&mut self, window: &Window) -> TranslateResult<()> {
        self.render_function(&window.function)?;
        self.append(" over (");
        if !window.partition_by.is_empty() {
            self.in_clause(Clause::Partition, |r| {
                r.append("partition by ");
                r.render_list(&window.partition_by, ",", |r, item| r.render_partition_item(item))
            })?;
        }
        if !window.order_by.is_empty() {
            if !window.partition_by.is_empty() {
                self.append_char(' ');
            }
            self.in_clause(Clause::OrderBy, |r| {
                r.append("order by ");
                r.render_list(&window.order_by, ",", |r, spec| r.render_sort_specification(spec))
            })?;
        }
        self.append_char(')');
        Ok(())
    }

    /// A GROUP BY or PARTITION BY item.
    pub fn render_partition_item(&mut self, item: &Expr) -> TranslateResult<()> {
        let dialect = self.dialect;
        if dialect.render_partition_item(self, item)? == Emit::Rendered {
            return Ok(());
        }
        self.default_partition_item(item)
    }

    /// Literals group everything into one bucket: `()`.
    pub fn default_partition_item(&mut self, item: &Expr) -> TranslateResult<()> {
        match item {
            Expr::Literal(_) => {
                self.append("()");
                Ok(())
            }
            other => self.render_expr(other),
        }
    }

    pub fn render_summarization(&mut self, summarization: &Summarization) -> TranslateResult<()> {
        self.append(summarization.kind.sql_text());
        self.append_char('(');
        self.render_list(&summarization.groupings, ",", |r, item| r.render_expr(item))?;
        self.append_char(')');
        Ok(())
    }

    pub fn render_sort_specification(&mut self, spec: &SortSpecification) -> TranslateResult<()> {
        self.render_expr(&spec.expr)?;
        if spec.descending {
            self.append(" desc");
        }
        match spec.nulls {
            Some(NullPrecedence::First) => self.append(" nulls first"),
            Some(NullPrecedence::Last) => self.append(" nulls last"),
            None => {}
        }
        Ok(())
    }
}
