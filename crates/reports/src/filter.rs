use chrono::NaiveDate;
use serde::Deserialize;
use staybook_store::columns::booking;
use staybook_table::{Cell, Table};

/// Criteria for the booking list filters
///
/// Unset criteria match everything; set criteria are combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    /// Case-insensitive guest-name substring
    pub guest: Option<String>,
    /// Exact apartment number
    pub apartment: Option<i64>,
    /// Inclusive lower bound on the check-in date
    pub check_in_from: Option<NaiveDate>,
    /// Inclusive upper bound on the check-in date
    pub check_in_to: Option<NaiveDate>,
}

impl BookingFilter {
    /// Apply the filter to a booking table
    #[must_use]
    pub fn apply(&self, bookings: &Table) -> Table {
        bookings.filtered(|table, row| self.matches(table, row))
    }

    fn matches(&self, table: &Table, row: &[Cell]) -> bool {
        let cell = |name: &str| table.column_index(name).and_then(|i| row.get(i));

        if let Some(needle) = &self.guest {
            let guest = cell(booking::GUEST).map(Cell::display).unwrap_or_default();
            if !guest.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if let Some(apartment) = self.apartment {
            if cell(booking::APARTMENT).and_then(Cell::as_int) != Some(apartment) {
                return false;
            }
        }

        if self.check_in_from.is_some() || self.check_in_to.is_some() {
            let Some(check_in) = cell(booking::CHECK_IN).and_then(Cell::as_date) else {
                return false;
            };
            if let Some(from) = self.check_in_from {
                if check_in < from {
                    return false;
                }
            }
            if let Some(to) = self.check_in_to {
                if check_in > to {
                    return false;
                }
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        let mut table = Table::with_headers([
            booking::GUEST,
            booking::APARTMENT,
            booking::CHECK_IN,
        ]);
        table.push_row(vec![
            Cell::from("Alice Martin"),
            Cell::Int(101),
            Cell::parse("2024-01-02"),
        ]);
        table.push_row(vec![
            Cell::from("Bob Osei"),
            Cell::Int(102),
            Cell::parse("2024-01-20"),
        ]);
        table.push_row(vec![
            Cell::from("alicia keys"),
            Cell::Int(101),
            Cell::parse("2024-02-01"),
        ]);
        table
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let filtered = BookingFilter::default().apply(&table());
        assert_eq!(filtered.row_count(), 3);
    }

    #[test]
    fn test_guest_substring_is_case_insensitive() {
        let filter = BookingFilter {
            guest: Some("ALIC".to_string()),
            ..BookingFilter::default()
        };
        assert_eq!(filter.apply(&table()).row_count(), 2);
    }

    #[test]
    fn test_apartment_exact_match() {
        let filter = BookingFilter {
            apartment: Some(102),
            ..BookingFilter::default()
        };
        let filtered = filter.apply(&table());
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(filtered.value(0, booking::GUEST), Some(&Cell::from("Bob Osei")));
    }

    #[test]
    fn test_check_in_range_inclusive() {
        let filter = BookingFilter {
            check_in_from: NaiveDate::from_ymd_opt(2024, 1, 2),
            check_in_to: NaiveDate::from_ymd_opt(2024, 1, 20),
            ..BookingFilter::default()
        };
        assert_eq!(filter.apply(&table()).row_count(), 2);
    }

    #[test]
    fn test_combined_criteria() {
        let filter = BookingFilter {
            guest: Some("ali".to_string()),
            apartment: Some(101),
            check_in_from: NaiveDate::from_ymd_opt(2024, 2, 1),
            check_in_to: None,
        };
        let filtered = filter.apply(&table());
        assert_eq!(filtered.row_count(), 1);
        assert_eq!(
            filtered.value(0, booking::GUEST),
            Some(&Cell::from("alicia keys"))
        );
    }
}
