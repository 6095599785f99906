//! Data table component types.
//!
//! These types configure the one list template every back-office screen
//! renders through.

use serde::Serialize;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Rendered narrow (dates, times, counters).
    pub compact: bool,
}

impl TableColumn {
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            compact: false,
        }
    }

    /// Create a narrow column.
    #[must_use]
    pub fn compact(key: &str, label: &str) -> Self {
        Self {
            compact: true,
            ..Self::new(key, label)
        }
    }
}

/// Option for the select filter above a table.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
    /// Currently applied.
    pub selected: bool,
}

impl FilterOption {
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: false,
        }
    }
}

/// Single-select filter narrowing a table to one category.
#[derive(Debug, Clone, Serialize)]
pub struct TableFilter {
    /// Query parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    pub options: Vec<FilterOption>,
}

impl TableFilter {
    /// Filter built from a `(value, label)` option list.
    #[must_use]
    pub fn select(key: &str, label: &str, options: &[(&str, &str)]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            options: options
                .iter()
                .map(|(value, label)| FilterOption::new(value, label))
                .collect(),
        }
    }

    /// Mark `value` as the applied option.
    pub fn apply(&mut self, value: Option<&str>) {
        for option in &mut self.options {
            option.selected = value == Some(option.value.as_str());
        }
    }
}

/// One rendered row.
#[derive(Debug, Clone, Serialize)]
pub struct TableRow {
    /// Record ID used in the row's edit/delete links.
    pub id: String,
    /// Cell text, in column order.
    pub cells: Vec<String>,
    /// Extra per-row links (label, href).
    pub links: Vec<(String, String)>,
}

impl TableRow {
    #[must_use]
    pub fn new(id: impl ToString, cells: Vec<String>) -> Self {
        Self {
            id: id.to_string(),
            cells,
            links: vec![],
        }
    }

    /// Add a per-row link next to edit/delete.
    #[must_use]
    pub fn link(mut self, label: &str, href: String) -> Self {
        self.links.push((label.to_string(), href));
        self
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Category filter, if the screen has one.
    pub filter: Option<TableFilter>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filter: None,
            empty_title: "Nenhum registro encontrado".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Set the category filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }
}
