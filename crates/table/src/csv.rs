use crate::cell::Cell;
use crate::error::Result;
use crate::table::Table;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

impl Table {
    /// Load a table from a CSV file
    ///
    /// The first record is taken as the header row; remaining fields are
    /// parsed with type inference.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Load a table from any CSV reader
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false) // header handling is ours
            .from_reader(reader);

        let mut records = csv_reader.records();

        let headers: Vec<String> = match records.next() {
            Some(record) => record?.iter().map(str::to_string).collect(),
            None => return Ok(Table::new()),
        };

        let mut table = Table::with_headers(headers);
        for record in records {
            let row: Vec<Cell> = record?.iter().map(Cell::parse).collect();
            table.push_row(row);
        }

        Ok(table)
    }

    /// Save the table to a CSV file, header row first
    pub fn save_csv_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_csv(BufWriter::new(file))
    }

    /// Write the table to a writer as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if !self.headers().is_empty() {
            csv_writer.write_record(self.headers())?;
        }
        for row in self.rows() {
            let record: Vec<String> = row.iter().map(Cell::display).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Render the table as a CSV string
    #[must_use]
    pub fn to_csv_string(&self) -> String {
        let mut buffer = Vec::new();
        // String rendering cannot fail on a Vec sink
        let _ = self.write_csv(&mut buffer);
        String::from_utf8_lossy(&buffer).to_string()
    }
}
