use crate::partners::{owner_report, partner_report};
use crate::weekly::weekly_totals;
use chrono::NaiveDate;
use staybook_store::columns::{booking, owner, partner};
use staybook_store::Store;
use staybook_table::{Cell, Table};

/// Render a downloadable report: a summary block of label/value pairs,
/// one blank line, then the detail table with floats at two decimals
#[must_use]
pub fn render_report(summary: &[(&str, String)], detail: &Table) -> String {
    let mut out = Vec::new();

    {
        let mut writer = csv::Writer::from_writer(&mut out);
        // String rendering cannot fail on a Vec sink
        let _ = writer.write_record(["Description", "Value"]);
        for (label, value) in summary {
            let _ = writer.write_record([*label, value.as_str()]);
        }
        let _ = writer.flush();
    }

    out.push(b'\n');

    {
        let mut writer = csv::Writer::from_writer(&mut out);
        let _ = writer.write_record(detail.headers());
        for row in detail.rows() {
            let record: Vec<String> = row.iter().map(format_cell).collect();
            let _ = writer.write_record(&record);
        }
        let _ = writer.flush();
    }

    String::from_utf8_lossy(&out).to_string()
}

/// The weekly report export
#[must_use]
pub fn weekly_report_csv(store: &Store, today: NaiveDate) -> String {
    let totals = weekly_totals(store, today);
    let detail = project_present(&totals.bookings, booking::REPORT);

    let summary = [
        ("Lodging Total", money(totals.lodging_total)),
        ("Payable Total", money(totals.payable_total)),
        ("Receivable Total", money(totals.receivable_total)),
        (
            "Occupied Apartments",
            totals.occupied_apartments.to_string(),
        ),
    ];
    render_report(&summary, &detail)
}

/// The partner report export
#[must_use]
pub fn partner_report_csv(store: &Store) -> String {
    let report = partner_report(store);
    let detail = project_present(&report.partners, partner::REPORT);

    let summary = [
        ("Receivable Total", money(report.receivable_total)),
        ("Payable Total", money(report.payable_total)),
    ];
    render_report(&summary, &detail)
}

/// The owner report export
///
/// The payable column is appended to the detail only when the loaded
/// file carries it.
#[must_use]
pub fn owner_report_csv(store: &Store) -> String {
    let report = owner_report(store);

    let mut detail_columns: Vec<&str> = owner::REPORT.to_vec();
    if report.owners.column_index(owner::PAYABLE).is_some() {
        detail_columns.push(owner::PAYABLE);
    }
    let detail = project_present(&report.owners, &detail_columns);

    let summary = [("Owner Payable Total", money(report.payable_total))];
    render_report(&summary, &detail)
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Float(f) => format!("{f:.2}"),
        _ => cell.display(),
    }
}

/// Project onto the listed columns, skipping any the table lacks
fn project_present(table: &Table, columns: &[&str]) -> Table {
    let present: Vec<&str> = columns
        .iter()
        .filter(|name| table.column_index(name).is_some())
        .copied()
        .collect();
    // Cannot fail: every selected column was just checked
    table.select(&present).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report_shape() {
        let mut detail = Table::with_headers(["Partner", "Receivable"]);
        detail.push_row(vec![Cell::from("Acme"), Cell::Float(100.0)]);

        let summary = [("Receivable Total", money(100.0))];
        let out = render_report(&summary, &detail);

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Description,Value");
        assert_eq!(lines[1], "Receivable Total,100.00");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Partner,Receivable");
        assert_eq!(lines[4], "Acme,100.00");
    }

    #[test]
    fn test_floats_render_two_decimals() {
        assert_eq!(format_cell(&Cell::Float(3.5)), "3.50");
        assert_eq!(format_cell(&Cell::Int(3)), "3");
        assert_eq!(format_cell(&Cell::from("x")), "x");
    }

    #[test]
    fn test_project_present_skips_missing() {
        let mut table = Table::with_headers(["A", "B"]);
        table.push_row(vec![Cell::Int(1), Cell::Int(2)]);

        let projected = project_present(&table, &["B", "Z"]);
        assert_eq!(projected.headers(), &["B"]);
        assert_eq!(projected.row_count(), 1);
    }
}
