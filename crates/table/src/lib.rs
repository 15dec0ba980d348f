//! Tabular model for staybook
//!
//! Provides a header-addressed table of dynamically typed cells, backed by
//! spreadsheet files. Columns are named by the file's header row; a column
//! that is absent from the file is absent from the table, and callers are
//! expected to guard with [`Table::has_columns`] before depending on one.
//!
//! # Examples
//!
//! ## Building a table
//!
//! ```
//! use staybook_table::{Cell, Table};
//!
//! let mut table = Table::with_headers(["Guest Name", "Apartment"]);
//! table.push_row(vec![Cell::from("Alice"), Cell::Int(101)]);
//!
//! assert_eq!(table.row_count(), 1);
//! assert!(table.has_columns(&["Guest Name"]));
//! ```
//!
//! ## Column arithmetic
//!
//! ```
//! use staybook_table::{Cell, Table};
//!
//! let mut table = Table::with_headers(["Value"]);
//! table.push_row(vec![Cell::Float(10.5)]);
//! table.push_row(vec![Cell::Float(4.5)]);
//!
//! assert_eq!(table.column_sum("Value"), 15.0);
//! ```
//!
//! ## Loading from a spreadsheet
//!
//! ```no_run
//! use staybook_table::Table;
//!
//! let table = Table::from_xlsx_path("bookings.xlsx").unwrap();
//! ```

mod cell;
mod csv;
mod error;
mod table;
mod xlsx;

pub use cell::Cell;
pub use error::{Result, TableError};
pub use table::Table;
