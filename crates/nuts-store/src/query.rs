//! # Queries
//!
//! A [`Query`] is a list of `(field name, value)` filters, in the spirit
//! of keyword arguments: names are plain strings and values are loosely
//! typed until the store resolves them. Resolution happens when the query
//! runs, so every structural problem surfaces from
//! [`RegionStore::query`](crate::RegionStore::query) before any lookup.
//!
//! ## Semantics
//!
//! - A filter whose value is a list matches a region holding **any** of
//!   the listed values.
//! - Separate filters must **all** match.
//! - Each field may be filtered once. To accept several values for one
//!   field, pass them as a list.
//!
//! ## Accepted values
//!
//! A string, an integer, or a non-empty list whose elements are all
//! strings or all integers. Everything else (nested lists, mixed lists,
//! empty lists, booleans, nulls, objects, fractional numbers) is rejected
//! with [`QueryError::InvalidFilterValue`].

use nuts_core::{Field, Level, QueryError, Scalar};
use serde_json::Value;

/// A loosely typed filter value, validated when the query runs.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterValue(Value);

impl FilterValue {
    /// The raw JSON form of this value.
    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for FilterValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self(Value::from(value))
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<Level> for FilterValue {
    fn from(value: Level) -> Self {
        Self(Value::from(i64::from(value)))
    }
}

impl From<Scalar> for FilterValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Str(s) => Self(Value::from(s)),
            Scalar::Int(n) => Self(Value::from(n)),
        }
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(values: Vec<T>) -> Self {
        Self(Value::Array(
            values.into_iter().map(|v| v.into().0).collect(),
        ))
    }
}

impl<T: Into<FilterValue>, const N: usize> From<[T; N]> for FilterValue {
    fn from(values: [T; N]) -> Self {
        Self::from(Vec::from(values))
    }
}

/// A validated filter: one field and the values it may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub field: Field,
    pub values: Vec<Scalar>,
}

/// A set of field filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filters: Vec<(String, FilterValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. Nothing is validated until the query runs.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Build a query from `(field, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FilterValue>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |query, (field, value)| query.filter(field, value))
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Validate every filter.
    ///
    /// # Errors
    ///
    /// - [`QueryError::EmptyQuery`] if there are no filters.
    /// - [`QueryError::UnknownField`] for a name that is not a region field.
    /// - [`QueryError::InvalidFilterValue`] for an unacceptable value, or
    ///   for a field filtered more than once.
    pub fn resolve(&self) -> Result<Vec<Criterion>, QueryError> {
        if self.filters.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        let mut criteria: Vec<Criterion> = Vec::with_capacity(self.filters.len());
        for (name, value) in &self.filters {
            let field: Field = name.parse()?;
            if criteria.iter().any(|c| c.field == field) {
                return Err(invalid(
                    name,
                    "field filtered more than once; pass a list to match any of several values",
                ));
            }
            let values = resolve_values(name, &value.0)?;
            criteria.push(Criterion { field, values });
        }
        Ok(criteria)
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> QueryError {
    QueryError::InvalidFilterValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn resolve_scalar(field: &str, value: &Value) -> Result<Scalar, QueryError> {
    match value {
        Value::String(s) => Ok(Scalar::Str(s.clone())),
        Value::Number(n) => n
            .as_i64()
            .map(Scalar::Int)
            .ok_or_else(|| invalid(field, format!("{n} is not an integer"))),
        Value::Array(_) => Err(invalid(field, "nested lists are not allowed")),
        Value::Bool(_) => Err(invalid(field, "booleans are not allowed")),
        Value::Null => Err(invalid(field, "null is not allowed")),
        Value::Object(_) => Err(invalid(field, "objects are not allowed")),
    }
}

fn resolve_values(field: &str, value: &Value) -> Result<Vec<Scalar>, QueryError> {
    let Value::Array(items) = value else {
        return resolve_scalar(field, value).map(|s| vec![s]);
    };
    let scalars = items
        .iter()
        .map(|item| resolve_scalar(field, item))
        .collect::<Result<Vec<_>, _>>()?;
    let Some(first) = scalars.first() else {
        return Err(invalid(field, "list is empty"));
    };
    if let Some(other) = scalars.iter().find(|s| s.kind() != first.kind()) {
        return Err(invalid(
            field,
            format!("mixed list of {} and {} values", first.kind(), other.kind()),
        ));
    }
    Ok(scalars)
}
