use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single table cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Text(String),
}

impl Cell {
    /// Check if the cell is null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Try to get the cell as a float
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Cell::Float(f) => Some(*f),
            Cell::Int(i) => Some(*i as f64),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Null | Cell::Date(_) => None,
        }
    }

    /// Try to get the cell as an integer
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Float(f) => Some(*f as i64),
            Cell::Bool(b) => Some(i64::from(*b)),
            Cell::Text(s) => s.trim().parse().ok(),
            Cell::Null | Cell::Date(_) => None,
        }
    }

    /// Try to get the cell as a calendar date
    ///
    /// Text cells are accepted when they hold an ISO `YYYY-MM-DD` date.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            Cell::Text(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
            _ => None,
        }
    }

    /// Get the cell rendered as a string
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Bool(b) => b.to_string(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => f.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Text(s) => s.clone(),
        }
    }

    /// Parse a string into a `Cell` with type inference
    /// Tries: null -> bool -> int -> float -> date -> text
    #[must_use]
    pub fn parse(s: &str) -> Cell {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Cell::Null;
        }

        match trimmed.to_lowercase().as_str() {
            "true" | "yes" => return Cell::Bool(true),
            "false" | "no" => return Cell::Bool(false),
            _ => {}
        }

        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Int(i);
        }

        if let Ok(f) = trimmed.parse::<f64>() {
            return Cell::Float(f);
        }

        if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Cell::Date(d);
        }

        Cell::Text(s.to_string())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Null
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::Int(i64::from(i))
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<NaiveDate> for Cell {
    fn from(d: NaiveDate) -> Self {
        Cell::Date(d)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_null() {
        assert_eq!(Cell::parse(""), Cell::Null);
        assert_eq!(Cell::parse("  "), Cell::Null);
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(Cell::parse("true"), Cell::Bool(true));
        assert_eq!(Cell::parse("No"), Cell::Bool(false));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(Cell::parse("42"), Cell::Int(42));
        assert_eq!(Cell::parse("-2.5"), Cell::Float(-2.5));
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(Cell::parse("2024-01-03"), Cell::Date(expected));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(Cell::parse("Alice"), Cell::Text("Alice".to_string()));
        // Not ISO formatted, stays text
        assert_eq!(
            Cell::parse("03/01/2024"),
            Cell::Text("03/01/2024".to_string())
        );
    }

    #[test]
    fn test_as_date_from_text() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(
            Cell::Text("2024-01-03".to_string()).as_date(),
            Some(expected)
        );
        assert_eq!(Cell::Int(44562).as_date(), None);
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Cell::Int(42).as_float(), Some(42.0));
        assert_eq!(Cell::Float(3.9).as_int(), Some(3));
        assert_eq!(Cell::Text("101".to_string()).as_int(), Some(101));
        assert_eq!(Cell::Null.as_float(), None);
    }

    #[test]
    fn test_display() {
        let d = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Cell::Date(d).display(), "2024-02-29");
        assert_eq!(Cell::Null.display(), "");
    }
}
