//! Read query description and its PostgREST encoding.
//!
//! A [`Query`] is a column list, a conjunction of [`Filter`]s and an optional
//! [`Order`]. [`Query::to_params`] renders it as URL query pairs, e.g.
//! `select=*`, `tags=cs.{x,y}`, `id=in.(a,b)`, `order=added_at.desc`.

#![allow(clippy::missing_const_for_fn)]

/// A single row predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// `column = value`
    Eq {
        /// Column name.
        column: String,
        /// Value to compare against.
        value: String,
    },
    /// Array column contains every listed value.
    Contains {
        /// Column name.
        column: String,
        /// Required elements.
        values: Vec<String>,
    },
    /// Column value is one of the listed values.
    In {
        /// Column name.
        column: String,
        /// Allowed values.
        values: Vec<String>,
    },
}

impl Filter {
    /// Column the filter applies to.
    #[must_use]
    pub fn column(&self) -> &str {
        match self {
            Self::Eq { column, .. } | Self::Contains { column, .. } | Self::In { column, .. } => {
                column
            }
        }
    }

    /// Operator-prefixed value, as PostgREST expects it.
    #[must_use]
    pub fn encode(&self) -> String {
        match self {
            Self::Eq { value, .. } => format!("eq.{value}"),
            Self::Contains { values, .. } => format!("cs.{{{}}}", join_quoted(values)),
            Self::In { values, .. } => format!("in.({})", join_quoted(values)),
        }
    }
}

/// Sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Column to sort by.
    pub column: String,
    /// Newest/largest first when true.
    pub descending: bool,
}

impl Order {
    fn encode(&self) -> String {
        let direction = if self.descending { "desc" } else { "asc" };
        format!("{}.{direction}", self.column)
    }
}

/// A read query against one table. Every column is always selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<Filter>,
    order: Option<Order>,
}

impl Query {
    /// No filters, unordered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality filter.
    #[must_use]
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    /// Add a containment filter on an array column.
    #[must_use]
    pub fn contains<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::Contains {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Add a membership filter.
    #[must_use]
    pub fn in_list<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Sort descending by `column`.
    #[must_use]
    pub fn order_desc(mut self, column: impl Into<String>) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending: true,
        });
        self
    }

    /// Filters in insertion order.
    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Requested ordering.
    #[must_use]
    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    /// URL query pairs for this query. Values are not yet percent-encoded.
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(self.filters.len() + 2);
        params.push(("select".to_string(), "*".to_string()));
        for filter in &self.filters {
            params.push((filter.column().to_string(), filter.encode()));
        }
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.encode()));
        }
        params
    }
}

/// Join list elements, quoting any that contain reserved characters.
fn join_quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| quote_element(v))
        .collect::<Vec<_>>()
        .join(",")
}

fn quote_element(value: &str) -> String {
    let reserved = value.is_empty()
        || value
            .chars()
            .any(|c| matches!(c, ',' | '(' | ')' | '{' | '}' | '"' | '\\') || c.is_whitespace());
    if !reserved {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
