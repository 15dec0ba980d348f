use chrono::{Duration, NaiveDate};
use staybook_store::columns::{booking, owner, partner};
use staybook_store::Store;
use staybook_table::{Cell, Table};

/// Weekly occupancy and financial figures
///
/// `bookings` holds the rows whose stay overlaps the window, with the
/// same headers as the source table.
#[derive(Debug, Clone)]
pub struct WeeklyTotals {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub lodging_total: f64,
    pub payable_total: f64,
    pub receivable_total: f64,
    pub occupied_apartments: usize,
    pub bookings: Table,
}

/// The reporting window: the last 7 calendar days ending today,
/// inclusive on both ends
#[must_use]
pub fn week_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(7), today)
}

/// Compute the weekly report from the current store state
///
/// A booking is in the window when its stay overlaps it: check-in on or
/// before the window end and check-out on or after the window start. A
/// row without a readable check-in date never matches; a missing
/// check-out is treated as a same-day stay.
///
/// The payable total is the owner table's whole `Payable` column and the
/// receivable total the partner table's whole `Receivable` column; both
/// degrade to zero when the column is absent.
#[must_use]
pub fn weekly_totals(store: &Store, today: NaiveDate) -> WeeklyTotals {
    let (window_start, window_end) = week_window(today);

    let subset = store
        .bookings()
        .filtered(|table, row| stay_overlaps(table, row, window_start, window_end));

    WeeklyTotals {
        window_start,
        window_end,
        lodging_total: subset.column_sum(booking::VALUE),
        payable_total: store.owners().column_sum(owner::PAYABLE),
        receivable_total: store.partners().column_sum(partner::RECEIVABLE),
        occupied_apartments: subset.distinct_count(booking::APARTMENT),
        bookings: subset,
    }
}

fn stay_overlaps(table: &Table, row: &[Cell], start: NaiveDate, end: NaiveDate) -> bool {
    let cell = |name: &str| {
        table
            .column_index(name)
            .and_then(|i| row.get(i))
            .and_then(Cell::as_date)
    };

    let Some(check_in) = cell(booking::CHECK_IN) else {
        return false;
    };
    let check_out = cell(booking::CHECK_OUT).unwrap_or(check_in);

    check_in <= end && check_out >= start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking_row(table: &Table, check_in: &str, check_out: &str) -> Vec<Cell> {
        table
            .headers()
            .iter()
            .map(|h| match h.as_str() {
                booking::CHECK_IN => Cell::parse(check_in),
                booking::CHECK_OUT => Cell::parse(check_out),
                _ => Cell::Null,
            })
            .collect()
    }

    #[test]
    fn test_week_window_is_rolling() {
        let (start, end) = week_window(date(2024, 1, 8));
        assert_eq!(start, date(2024, 1, 1));
        assert_eq!(end, date(2024, 1, 8));
    }

    #[test]
    fn test_stay_overlap() {
        let table = Table::with_headers([booking::CHECK_IN, booking::CHECK_OUT]);
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 8);

        let inside = booking_row(&table, "2024-01-02", "2024-01-04");
        assert!(stay_overlaps(&table, &inside, start, end));

        // Started before the window, still checked in during it
        let spanning = booking_row(&table, "2023-12-28", "2024-01-02");
        assert!(stay_overlaps(&table, &spanning, start, end));

        let after = booking_row(&table, "2024-01-09", "2024-01-10");
        assert!(!stay_overlaps(&table, &after, start, end));

        let before = booking_row(&table, "2023-12-20", "2023-12-28");
        assert!(!stay_overlaps(&table, &before, start, end));
    }

    #[test]
    fn test_unreadable_check_in_never_matches() {
        let table = Table::with_headers([booking::CHECK_IN, booking::CHECK_OUT]);
        let row = booking_row(&table, "soon", "2024-01-02");
        assert!(!stay_overlaps(&table, &row, date(2024, 1, 1), date(2024, 1, 8)));
    }

    #[test]
    fn test_missing_check_out_is_same_day() {
        let table = Table::with_headers([booking::CHECK_IN, booking::CHECK_OUT]);
        let row = booking_row(&table, "2023-12-30", "");
        // Same-day stay before the window start
        assert!(!stay_overlaps(&table, &row, date(2024, 1, 1), date(2024, 1, 8)));
    }
}
