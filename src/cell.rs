use chrono::NaiveDateTime;
use std::fmt;

/// Contents of a single table cell.
///
/// The store hands back whatever the user typed: free text, a number, a real
/// date-time, or nothing at all.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// An empty string counts as empty, the same as a blank cell.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Reads the cell as a non-negative counter. Anything that is not a
    /// whole non-negative number reads as 0.
    pub fn as_count(&self) -> u32 {
        match self {
            CellValue::Number(n) if *n >= 0.0 && n.is_finite() => *n as u32,
            CellValue::Text(s) => s.trim().parse::<u32>().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            // Whole numbers print without a trailing ".0"
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(dt) => write!(f, "{}", dt.format("%d/%m/%Y")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_detection() {
        assert!(CellValue::Empty.is_empty());
        assert!(CellValue::text("").is_empty());
        assert!(!CellValue::text(" ").is_empty());
        assert!(!CellValue::Number(0.0).is_empty());
        println!("✓ Blank cells and empty strings are both empty");
    }

    #[test]
    fn test_as_count() {
        assert_eq!(CellValue::Number(3.0).as_count(), 3);
        assert_eq!(CellValue::text("4").as_count(), 4);
        assert_eq!(CellValue::text("abc").as_count(), 0);
        assert_eq!(CellValue::Number(-2.0).as_count(), 0);
        assert_eq!(CellValue::Empty.as_count(), 0);
        println!("✓ Counter cells read as non-negative integers");
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Number(12.0).to_string(), "12");
        assert_eq!(CellValue::Number(1.5).to_string(), "1.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        let dt = NaiveDate::from_ymd_opt(2025, 3, 7)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(CellValue::Date(dt).to_string(), "07/03/2025");
        println!("✓ Cell values display in sheet form");
    }
}
