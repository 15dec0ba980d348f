use crate::cell::Cell;
use crate::error::{Result, TableError};
use crate::table::Table;
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{DateTime, NaiveDate};
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Days between the Excel epoch (1899-12-30) and the Unix epoch
const EXCEL_UNIX_OFFSET: i64 = 25569;

const SECONDS_PER_DAY: i64 = 86400;

/// Convert an Excel serial date to a calendar date
fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    let days = serial.floor() as i64;
    let unix_seconds = (days - EXCEL_UNIX_OFFSET) * SECONDS_PER_DAY;
    DateTime::from_timestamp(unix_seconds, 0).map(|dt| dt.date_naive())
}

/// Convert a calendar date to an Excel serial date
fn date_to_serial(date: NaiveDate) -> f64 {
    let unix_days = date
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp() / SECONDS_PER_DAY)
        .unwrap_or(0);
    (unix_days + EXCEL_UNIX_OFFSET) as f64
}

/// Convert a calamine cell to a `Cell`
fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => Cell::parse(s),
        Data::DateTime(dt) => serial_to_date(dt.as_f64())
            .map(Cell::Date)
            .unwrap_or(Cell::Null),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::parse(s),
        Data::Error(e) => Cell::Text(format!("#ERROR: {e:?}")),
    }
}

impl Table {
    /// Load a table from the first worksheet of an Excel file
    ///
    /// The first row becomes the column headers. Date-formatted cells are
    /// read as [`Cell::Date`].
    pub fn from_xlsx_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook: Xlsx<BufReader<File>> =
            open_workbook(path.as_ref()).map_err(|e: calamine::XlsxError| TableError::Xlsx(e.to_string()))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| TableError::EmptyWorkbook {
                path: path.as_ref().display().to_string(),
            })?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| TableError::Xlsx(e.to_string()))?;

        let mut rows = range.rows();

        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .iter()
                .map(|cell| data_to_cell(cell).display())
                .collect(),
            None => return Ok(Table::new()),
        };

        let mut table = Table::with_headers(headers);
        for row in rows {
            table.push_row(row.iter().map(data_to_cell).collect());
        }

        Ok(table)
    }

    /// Save the table to an Excel file with a single worksheet
    ///
    /// The header row is written first; [`Cell::Date`] cells are written as
    /// date-formatted numbers so they round-trip as dates.
    pub fn save_xlsx_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");

        for (col, header) in self.headers().iter().enumerate() {
            worksheet
                .write_string(0, col as u16, header)
                .map_err(|e| TableError::Xlsx(e.to_string()))?;
        }

        for (row_idx, row) in self.rows().enumerate() {
            let row_num = (row_idx + 1) as u32;
            for (col_idx, cell) in row.iter().enumerate() {
                let col_num = col_idx as u16;
                match cell {
                    Cell::Null => {} // leave empty
                    Cell::Bool(b) => {
                        worksheet
                            .write_boolean(row_num, col_num, *b)
                            .map_err(|e| TableError::Xlsx(e.to_string()))?;
                    }
                    Cell::Int(i) => {
                        worksheet
                            .write_number(row_num, col_num, *i as f64)
                            .map_err(|e| TableError::Xlsx(e.to_string()))?;
                    }
                    Cell::Float(f) => {
                        worksheet
                            .write_number(row_num, col_num, *f)
                            .map_err(|e| TableError::Xlsx(e.to_string()))?;
                    }
                    Cell::Date(d) => {
                        worksheet
                            .write_number_with_format(
                                row_num,
                                col_num,
                                date_to_serial(*d),
                                &date_format,
                            )
                            .map_err(|e| TableError::Xlsx(e.to_string()))?;
                    }
                    Cell::Text(s) => {
                        worksheet
                            .write_string(row_num, col_num, s)
                            .map_err(|e| TableError::Xlsx(e.to_string()))?;
                    }
                }
            }
        }

        workbook
            .save(path.as_ref())
            .map_err(|e| TableError::Xlsx(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_serial_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let serial = date_to_serial(date);
        assert!((serial - 44562.0).abs() < 0.001);
        assert_eq!(serial_to_date(serial), Some(date));
    }

    #[test]
    fn test_xlsx_write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bookings.xlsx");

        let mut table = Table::with_headers(["Guest Name", "Apartment", "Value"]);
        table.push_row(vec![
            Cell::from("Alice"),
            Cell::Int(101),
            Cell::Float(100.5),
        ]);
        table.push_row(vec![Cell::from("Bob"), Cell::Int(102), Cell::Float(80.0)]);

        table.save_xlsx_path(&path).unwrap();
        let loaded = Table::from_xlsx_path(&path).unwrap();

        assert_eq!(loaded.headers(), &["Guest Name", "Apartment", "Value"]);
        assert_eq!(loaded.row_count(), 2);
        assert_eq!(loaded.value(0, "Guest Name"), Some(&Cell::from("Alice")));
        // Ints come back as floats from Excel
        assert_eq!(loaded.value(1, "Apartment").unwrap().as_int(), Some(102));
    }

    #[test]
    fn test_xlsx_date_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dates.xlsx");

        let check_in = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut table = Table::with_headers(["Check-In"]);
        table.push_row(vec![Cell::Date(check_in)]);

        table.save_xlsx_path(&path).unwrap();
        let loaded = Table::from_xlsx_path(&path).unwrap();

        assert_eq!(loaded.value(0, "Check-In"), Some(&Cell::Date(check_in)));
    }

    #[test]
    fn test_xlsx_missing_file() {
        let dir = tempdir().unwrap();
        let result = Table::from_xlsx_path(dir.path().join("absent.xlsx"));
        assert!(result.is_err());
    }
}
