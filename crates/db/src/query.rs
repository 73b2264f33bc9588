//! Helpers for dynamically-built list queries.
//!
//! List endpoints assemble their `WHERE` clause at runtime from optional
//! filters. [`FilterBuilder`] tracks the placeholder index and the typed bind
//! values so the data query and its `COUNT(*)` twin bind identically.

use greenhomes_core::types::Timestamp;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};
use sqlx::Postgres;

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone)]
pub enum BindValue {
    BigInt(i64),
    Int(i32),
    Bool(bool),
    Text(String),
    Timestamp(Timestamp),
}

/// Accumulates `WHERE` conditions and their bind values.
#[derive(Debug, Default)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The placeholder number the next bound value will receive.
    pub fn next_idx(&self) -> usize {
        self.values.len() + 1
    }

    /// Add a condition without parameters.
    pub fn push_raw(&mut self, condition: impl Into<String>) {
        self.conditions.push(condition.into());
    }

    /// Add a condition with a single parameter. `{}` in `template` is replaced
    /// by the placeholder, e.g. `"l.status = {}"`.
    pub fn push(&mut self, template: &str, value: BindValue) {
        let placeholder = format!("${}", self.next_idx());
        self.conditions.push(template.replace("{}", &placeholder));
        self.values.push(value);
    }

    /// Add an OR-group of ILIKE matches that share one bound pattern.
    pub fn push_search(&mut self, columns: &[&str], pattern: String) {
        let placeholder = format!("${}", self.next_idx());
        let ors: Vec<String> = columns
            .iter()
            .map(|col| format!("{col} ILIKE {placeholder}"))
            .collect();
        self.conditions.push(format!("({})", ors.join(" OR ")));
        self.values.push(BindValue::Text(pattern));
    }

    /// The rendered `WHERE ...` clause, or an empty string.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
pub fn bind_values<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        q = match value {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Bool(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
pub fn bind_values_scalar<'q, O>(
    mut q: QueryScalar<'q, Postgres, O, PgArguments>,
    values: &'q [BindValue],
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for value in values {
        q = match value {
            BindValue::BigInt(v) => q.bind(*v),
            BindValue::Int(v) => q.bind(*v),
            BindValue::Bool(v) => q.bind(*v),
            BindValue::Text(v) => q.bind(v.as_str()),
            BindValue::Timestamp(v) => q.bind(*v),
        };
    }
    q
}
