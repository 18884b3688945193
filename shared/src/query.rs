//! Filtered, ordered and bounded reads against the record store
//!
//! [`RecordQuery`] is the portable description of a read. Remote stores render it
//! into their own dialect; the in-memory store evaluates it with [`RecordQuery::apply`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::types::{ProfileId, Record, Role};

/// Record collections known to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Profiles,
    Ratings,
    StatusHistory,
    EducationOutcomes,
}

impl Collection {
    /// Table (or view) name in the backing store
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Profiles => "profiles",
            Collection::Ratings => "inclusion_ratings",
            Collection::StatusHistory => "career_status_history",
            Collection::EducationOutcomes => "education_outcomes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Comparable column value
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Render the value the way a query string expects it
    pub fn render(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Integer(value) => value.to_string(),
            FieldValue::Timestamp(ts) => ts.to_rfc3339(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<ProfileId> for FieldValue {
    fn from(value: ProfileId) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<Role> for FieldValue {
    fn from(value: Role) -> Self {
        FieldValue::Text(value.as_str().to_string())
    }
}

/// Row predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Column equals value
    Eq { field: String, value: FieldValue },
    /// Text column contains substring (case-sensitive)
    Contains { field: String, needle: String },
    /// Column equals one of the values
    In { field: String, values: Vec<FieldValue> },
}

impl Filter {
    pub fn field(&self) -> &str {
        match self {
            Filter::Eq { field, .. } | Filter::Contains { field, .. } | Filter::In { field, .. } => field,
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        match self {
            Filter::Eq { field, value } => record.field(field).as_ref() == Some(value),
            Filter::Contains { field, needle } => {
                matches!(record.field(field), Some(FieldValue::Text(text)) if text.contains(needle.as_str()))
            }
            Filter::In { field, values } => record.field(field).map_or(false, |value| values.contains(&value)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

/// Read description: filters are conjunctive, then ordering, then limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<usize>,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn contains(mut self, field: &str, needle: impl Into<String>) -> Self {
        self.filters.push(Filter::Contains {
            field: field.to_string(),
            needle: needle.into(),
        });
        self
    }

    pub fn one_of<V, I>(mut self, field: &str, values: I) -> Self
    where
        V: Into<FieldValue>,
        I: IntoIterator<Item = V>,
    {
        self.filters.push(Filter::In {
            field: field.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn order_by(mut self, field: &str, direction: SortDirection) -> Self {
        self.order = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn newest_first(self, field: &str) -> Self {
        self.order_by(field, SortDirection::Descending)
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.filters.iter().all(|filter| filter.matches(record))
    }

    /// Evaluate the query over an in-memory row set.
    ///
    /// Rows with a null sort column go last in either direction.
    pub fn apply<'a, R, I>(&self, rows: I) -> Vec<R>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let mut selected: Vec<R> = rows.into_iter().filter(|row| self.matches(*row)).cloned().collect();

        if let Some(order) = &self.order {
            selected.sort_by(|a, b| {
                match (a.field(&order.field), b.field(&order.field)) {
                    (Some(left), Some(right)) => {
                        let ordering = left.partial_cmp(&right).unwrap_or(Ordering::Equal);
                        match order.direction {
                            SortDirection::Ascending => ordering,
                            SortDirection::Descending => ordering.reverse(),
                        }
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            });
        }

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
