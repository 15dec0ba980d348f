use crate::columns::{booking, owner, partner};
use crate::error::{Result, StoreError};
use crate::records::{Booking, NewBooking, NewOwner, NewPartner, Owner, Partner};
use staybook_table::{Cell, Table};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Locations of the three spreadsheet files
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub bookings: PathBuf,
    pub partners: PathBuf,
    pub owners: PathBuf,
}

impl StorePaths {
    /// Standard file layout inside a data directory
    #[must_use]
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        StorePaths {
            bookings: dir.join("bookings.xlsx"),
            partners: dir.join("partners.xlsx"),
            owners: dir.join("owners.xlsx"),
        }
    }
}

/// File format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Xlsx,
    Csv,
}

fn format_for(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("xlsx") => Ok(FileFormat::Xlsx),
        Some("csv") => Ok(FileFormat::Csv),
        _ => Err(StoreError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

/// The in-memory tables plus the files they persist to
///
/// Mutations append or update a row and immediately flush the affected
/// table; the returned `Result` is the save outcome.
#[derive(Debug)]
pub struct Store {
    paths: StorePaths,
    bookings: Table,
    partners: Table,
    owners: Table,
}

impl Store {
    /// Load all three tables
    ///
    /// Missing or unreadable files yield empty tables with canonical
    /// headers; nothing here fails.
    #[must_use]
    pub fn open(paths: StorePaths) -> Self {
        let mut store = Store {
            bookings: Table::new(),
            partners: Table::new(),
            owners: Table::new(),
            paths,
        };
        store.reload();
        store
    }

    /// Re-read all three tables from disk, replacing the in-memory state
    pub fn reload(&mut self) {
        self.bookings = load_or_empty(&self.paths.bookings, booking::ALL);
        self.partners = load_or_empty(&self.paths.partners, partner::ALL);
        self.owners = load_or_empty(&self.paths.owners, owner::ALL);
    }

    #[must_use]
    pub fn paths(&self) -> &StorePaths {
        &self.paths
    }

    #[must_use]
    pub fn bookings(&self) -> &Table {
        &self.bookings
    }

    #[must_use]
    pub fn partners(&self) -> &Table {
        &self.partners
    }

    #[must_use]
    pub fn owners(&self) -> &Table {
        &self.owners
    }

    // ===== Bookings =====

    #[must_use]
    pub fn list_bookings(&self) -> Vec<Booking> {
        (0..self.bookings.row_count())
            .filter_map(|i| Booking::from_row(&self.bookings, i))
            .collect()
    }

    #[must_use]
    pub fn get_booking(&self, id: &str) -> Option<Booking> {
        let row = position_of(&self.bookings, booking::ID, id)?;
        Booking::from_row(&self.bookings, row)
    }

    /// Append a booking and flush the bookings file
    pub fn add_booking(&mut self, fields: NewBooking) -> Result<Booking> {
        let id = Uuid::new_v4().to_string();
        let row = build_row(&self.bookings, None, |h| fields.cell_for(h, &id));
        self.bookings.push_row(row);
        save_table(&self.bookings, &self.paths.bookings)?;
        Ok(Booking { id, fields })
    }

    /// Update the booking with the given ID and flush
    ///
    /// An unknown ID is a logged no-op reported as `Ok(false)`.
    pub fn update_booking(&mut self, id: &str, fields: NewBooking) -> Result<bool> {
        let Some(index) = position_of(&self.bookings, booking::ID, id) else {
            warn!(id, "booking not found, update ignored");
            return Ok(false);
        };
        let existing = self.bookings.row(index).map(<[Cell]>::to_vec);
        let row = build_row(&self.bookings, existing.as_deref(), |h| {
            fields.cell_for(h, id)
        });
        self.bookings.update_row(index, row);
        save_table(&self.bookings, &self.paths.bookings)?;
        Ok(true)
    }

    // ===== Partners =====

    #[must_use]
    pub fn list_partners(&self) -> Vec<Partner> {
        (0..self.partners.row_count())
            .filter_map(|i| Partner::from_row(&self.partners, i))
            .collect()
    }

    #[must_use]
    pub fn get_partner(&self, id: &str) -> Option<Partner> {
        let row = position_of(&self.partners, partner::ID, id)?;
        Partner::from_row(&self.partners, row)
    }

    pub fn add_partner(&mut self, fields: NewPartner) -> Result<Partner> {
        let id = Uuid::new_v4().to_string();
        let row = build_row(&self.partners, None, |h| fields.cell_for(h, &id));
        self.partners.push_row(row);
        save_table(&self.partners, &self.paths.partners)?;
        Ok(Partner { id, fields })
    }

    pub fn update_partner(&mut self, id: &str, fields: NewPartner) -> Result<bool> {
        let Some(index) = position_of(&self.partners, partner::ID, id) else {
            warn!(id, "partner not found, update ignored");
            return Ok(false);
        };
        let existing = self.partners.row(index).map(<[Cell]>::to_vec);
        let row = build_row(&self.partners, existing.as_deref(), |h| {
            fields.cell_for(h, id)
        });
        self.partners.update_row(index, row);
        save_table(&self.partners, &self.paths.partners)?;
        Ok(true)
    }

    // ===== Owners =====

    #[must_use]
    pub fn list_owners(&self) -> Vec<Owner> {
        (0..self.owners.row_count())
            .filter_map(|i| Owner::from_row(&self.owners, i))
            .collect()
    }

    #[must_use]
    pub fn get_owner(&self, id: &str) -> Option<Owner> {
        let row = position_of(&self.owners, owner::ID, id)?;
        Owner::from_row(&self.owners, row)
    }

    pub fn add_owner(&mut self, fields: NewOwner) -> Result<Owner> {
        let id = Uuid::new_v4().to_string();
        let row = build_row(&self.owners, None, |h| fields.cell_for(h, &id));
        self.owners.push_row(row);
        save_table(&self.owners, &self.paths.owners)?;
        Ok(Owner { id, fields })
    }

    pub fn update_owner(&mut self, id: &str, fields: NewOwner) -> Result<bool> {
        let Some(index) = position_of(&self.owners, owner::ID, id) else {
            warn!(id, "owner not found, update ignored");
            return Ok(false);
        };
        let existing = self.owners.row(index).map(<[Cell]>::to_vec);
        let row = build_row(&self.owners, existing.as_deref(), |h| {
            fields.cell_for(h, id)
        });
        self.owners.update_row(index, row);
        save_table(&self.owners, &self.paths.owners)?;
        Ok(true)
    }
}

/// Load a table, degrading to empty-with-headers on any problem
fn load_or_empty(path: &Path, canonical: &[&str]) -> Table {
    if !path.exists() {
        warn!(path = %path.display(), "data file not found, starting empty");
        return Table::with_headers(canonical.iter().copied());
    }

    let loaded = match format_for(path) {
        Ok(FileFormat::Xlsx) => Table::from_xlsx_path(path),
        Ok(FileFormat::Csv) => Table::from_csv_path(path),
        Err(e) => {
            warn!(path = %path.display(), %e, "unrecognized data file, starting empty");
            return Table::with_headers(canonical.iter().copied());
        }
    };

    match loaded {
        Ok(mut table) => {
            ensure_ids(&mut table, canonical);
            info!(path = %path.display(), rows = table.row_count(), "loaded data file");
            table
        }
        Err(e) => {
            warn!(path = %path.display(), %e, "failed to read data file, starting empty");
            Table::with_headers(canonical.iter().copied())
        }
    }
}

/// Backfill the generated ID column for files that predate it
///
/// `canonical[0]` is the ID header for every sheet.
fn ensure_ids(table: &mut Table, canonical: &[&str]) {
    let id_column = canonical[0];
    table.add_column(id_column, Cell::Null);
    for row in 0..table.row_count() {
        let blank = table
            .value(row, id_column)
            .map(|cell| cell.display().trim().is_empty())
            .unwrap_or(true);
        if blank {
            table.set_value(row, id_column, Cell::from(Uuid::new_v4().to_string()));
        }
    }
}

/// Assemble a row against the table's live headers
///
/// Headers the record does not know keep their existing cell (or null on
/// append), so extra columns in a user's file survive edits.
fn build_row<F>(table: &Table, existing: Option<&[Cell]>, cell_for: F) -> Vec<Cell>
where
    F: Fn(&str) -> Option<Cell>,
{
    table
        .headers()
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cell_for(header).unwrap_or_else(|| {
                existing
                    .and_then(|row| row.get(i).cloned())
                    .unwrap_or(Cell::Null)
            })
        })
        .collect()
}

fn position_of(table: &Table, id_column: &str, id: &str) -> Option<usize> {
    let col = table.column_index(id_column)?;
    table
        .rows()
        .position(|row| row.get(col).map(Cell::display).as_deref() == Some(id))
}

fn save_table(table: &Table, path: &Path) -> Result<()> {
    let result = match format_for(path)? {
        FileFormat::Xlsx => table.save_xlsx_path(path),
        FileFormat::Csv => table.save_csv_path(path),
    };
    result.map_err(|source| {
        error!(path = %path.display(), %source, "failed to flush table");
        StoreError::Save {
            path: path.display().to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_for() {
        assert_eq!(
            format_for(Path::new("a/bookings.xlsx")).unwrap(),
            FileFormat::Xlsx
        );
        assert_eq!(
            format_for(Path::new("partners.csv")).unwrap(),
            FileFormat::Csv
        );
        assert!(format_for(Path::new("owners.ods")).is_err());
    }

    #[test]
    fn test_ensure_ids_backfills_blanks() {
        let mut table = Table::with_headers([booking::GUEST]);
        table.push_row(vec![Cell::from("Alice")]);
        table.push_row(vec![Cell::from("Bob")]);

        ensure_ids(&mut table, booking::ALL);

        let ids = table.column(booking::ID).unwrap();
        assert_eq!(ids.len(), 2);
        assert!(ids.iter().all(|c| !c.display().is_empty()));
    }

    #[test]
    fn test_ensure_ids_preserves_existing() {
        let mut table = Table::with_headers([booking::ID, booking::GUEST]);
        table.push_row(vec![Cell::from("keep-me"), Cell::from("Alice")]);

        ensure_ids(&mut table, booking::ALL);

        assert_eq!(table.value(0, booking::ID), Some(&Cell::from("keep-me")));
    }

    #[test]
    fn test_build_row_preserves_unknown_columns() {
        let mut table = Table::with_headers([partner::ID, partner::NAME, "Notes"]);
        table.push_row(vec![
            Cell::from("p-1"),
            Cell::from("Acme"),
            Cell::from("preferred"),
        ]);

        let fields = NewPartner {
            name: "Acme Corp".to_string(),
            receivable: 10.0,
            payable: 0.0,
        };
        let existing = table.row(0).map(<[Cell]>::to_vec);
        let row = build_row(&table, existing.as_deref(), |h| fields.cell_for(h, "p-1"));

        assert_eq!(row[1], Cell::from("Acme Corp"));
        assert_eq!(row[2], Cell::from("preferred"));
    }
}
