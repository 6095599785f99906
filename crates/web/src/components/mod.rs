//! Reusable view components.

pub mod data_table;
pub mod form;

pub use data_table::{DataTableConfig, FilterOption, TableColumn, TableFilter, TableRow};
pub use form::{FormField, SelectOption};
