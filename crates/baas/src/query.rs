//! PostgREST query strings.
//!
//! Filters are rendered the way PostgREST expects them in the URL:
//! `column=eq.value`, `order=column.desc`.

use std::fmt::Display;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    table: String,
    params: Vec<(String, String)>,
}

impl Query {
    pub fn table(name: &str) -> Self {
        Self {
            table: name.to_string(),
            params: Vec::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn push(mut self, key: &str, value: String) -> Self {
        self.params.push((key.to_string(), value));
        self
    }

    #[must_use]
    pub fn select(self, columns: &str) -> Self {
        self.push("select", columns.to_string())
    }

    #[must_use]
    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, format!("eq.{value}"))
    }

    #[must_use]
    pub fn order(self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.push("order", format!("{column}.{direction}"))
    }
}
