use crate::cell::Cell;
use crate::error::{Result, TableError};
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// A table of cells addressed by header name (row-major storage)
///
/// The header row is kept separate from the body: `row_count` and every
/// row accessor deal in data rows only. Column lookups go through the
/// header index, so a column missing from the source file is simply not
/// addressable, which is what the aggregation guards test for.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Table {
    /// Create an empty table with no columns
    #[must_use]
    pub fn new() -> Self {
        Table::default()
    }

    /// Create an empty table with the given column headers
    ///
    /// A repeated header keeps the last position in the lookup index.
    #[must_use]
    pub fn with_headers<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let index = build_index(&headers);
        Table {
            headers,
            rows: Vec::new(),
            index,
        }
    }

    /// Create a table from headers and data rows
    ///
    /// Rows are padded or truncated to the header width.
    #[must_use]
    pub fn from_rows<I, S>(headers: I, rows: Vec<Vec<Cell>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Table::with_headers(headers);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Get the column headers
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the number of data rows
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Check if the table has no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the index of a column by header name
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Check that every named column is present
    ///
    /// Missing columns are reported with a diagnostic; this is the guard
    /// the aggregations run before touching optional columns.
    #[must_use]
    pub fn has_columns(&self, names: &[&str]) -> bool {
        let missing: Vec<&str> = names
            .iter()
            .filter(|name| !self.index.contains_key(**name))
            .copied()
            .collect();
        if missing.is_empty() {
            true
        } else {
            warn!(columns = ?missing, "required columns are absent");
            false
        }
    }

    /// Get a data row by index (0-based)
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Iterate over the data rows
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Get a cell by row index and column name
    #[must_use]
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    /// Append a data row, padding or truncating to the header width
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Null);
        self.rows.push(row);
    }

    /// Replace the row at `index`
    ///
    /// An out-of-range index leaves the table unchanged and returns
    /// `false` with a diagnostic; it is never an error.
    pub fn update_row(&mut self, index: usize, mut row: Vec<Cell>) -> bool {
        if index >= self.rows.len() {
            warn!(index, rows = self.rows.len(), "update of absent row ignored");
            return false;
        }
        row.resize(self.headers.len(), Cell::Null);
        self.rows[index] = row;
        true
    }

    /// Set a single cell by row index and column name
    ///
    /// Returns `false` when the row or column does not exist.
    pub fn set_value(&mut self, row: usize, column: &str, cell: Cell) -> bool {
        let Some(col) = self.column_index(column) else {
            return false;
        };
        match self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Remove and return the row at `index`, if present
    pub fn remove_row(&mut self, index: usize) -> Option<Vec<Cell>> {
        if index >= self.rows.len() {
            warn!(index, rows = self.rows.len(), "removal of absent row ignored");
            return None;
        }
        Some(self.rows.remove(index))
    }

    /// Keep only the rows matching the predicate
    pub fn retain<F>(&mut self, predicate: F)
    where
        F: Fn(&[Cell]) -> bool,
    {
        self.rows.retain(|row| predicate(row));
    }

    /// Return a new table with the same headers and the matching rows
    #[must_use]
    pub fn filtered<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Table, &[Cell]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(self, row))
            .cloned()
            .collect();
        Table {
            headers: self.headers.clone(),
            rows,
            index: self.index.clone(),
        }
    }

    /// Get all cells of a column by header name
    pub fn column(&self, name: &str) -> Result<Vec<Cell>> {
        let col = self
            .column_index(name)
            .ok_or_else(|| TableError::ColumnNotFound {
                name: name.to_string(),
            })?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(col).cloned().unwrap_or(Cell::Null))
            .collect())
    }

    /// Sum a column as floats
    ///
    /// Cells that do not read as numbers contribute zero; a missing column
    /// sums to zero with a diagnostic rather than failing.
    #[must_use]
    pub fn column_sum(&self, name: &str) -> f64 {
        let Some(col) = self.column_index(name) else {
            warn!(column = name, "summing absent column as zero");
            return 0.0;
        };
        self.rows
            .iter()
            .filter_map(|row| row.get(col))
            .filter_map(Cell::as_float)
            .sum()
    }

    /// Count the distinct non-null values of a column
    ///
    /// A missing column counts zero with a diagnostic.
    #[must_use]
    pub fn distinct_count(&self, name: &str) -> usize {
        let Some(col) = self.column_index(name) else {
            warn!(column = name, "counting absent column as zero");
            return 0;
        };
        let mut seen = std::collections::HashSet::new();
        for row in &self.rows {
            if let Some(cell) = row.get(col) {
                if !cell.is_null() {
                    seen.insert(cell.display());
                }
            }
        }
        seen.len()
    }

    /// Project the table onto the named columns, in the given order
    pub fn select(&self, columns: &[&str]) -> Result<Table> {
        let indices: Vec<usize> = columns
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::ColumnNotFound {
                        name: (*name).to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = self
            .rows
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Cell::Null))
                    .collect()
            })
            .collect();

        Ok(Table {
            headers: columns.iter().map(|&c| c.to_string()).collect(),
            rows,
            index: build_index_from_strs(columns),
        })
    }

    /// Add a column at the end, filling existing rows with `fill`
    ///
    /// A column that already exists is left as is.
    pub fn add_column(&mut self, name: &str, fill: Cell) {
        if self.index.contains_key(name) {
            return;
        }
        self.index.insert(name.to_string(), self.headers.len());
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(fill.clone());
        }
    }
}

fn build_index(headers: &[String]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

fn build_index_from_strs(headers: &[&str]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| ((*name).to_string(), i))
        .collect()
}
