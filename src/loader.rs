use crate::cell::CellValue;
use crate::error::{Result, TrackerError};
use crate::spreadsheet::Spreadsheet;
use std::fs;
use std::path::Path;

/// Load a tracker sheet from a CSV file
///
/// The first record is the header row. Blank fields become empty cells and
/// every other field is kept as text exactly as written, so columns the
/// tracker never touches export back unchanged. Counters and dates are read
/// from text when needed.
///
/// Quoted fields may hold commas, doubled quotes and line breaks.
///
/// # Arguments
/// * `filepath` - Path to the CSV file to load
///
/// # Examples
/// ```no_run
/// use recruit_tracker::loader::from_csv;
///
/// match from_csv("tracker.csv") {
///     Ok(sheet) => println!("Loaded {} rows", sheet.rows),
///     Err(e) => eprintln!("Error loading CSV: {}", e),
/// }
/// ```
pub fn from_csv(filepath: impl AsRef<Path>) -> Result<Spreadsheet> {
    let text = fs::read_to_string(filepath)?;
    from_csv_str(&text)
}

/// Same as [`from_csv`], from CSV text already in memory.
pub fn from_csv_str(text: &str) -> Result<Spreadsheet> {
    let records = parse_csv(text)?;

    let Some(header) = records.first() else {
        return Err(TrackerError::Csv("CSV file is empty".to_string()));
    };
    if header.iter().all(|f| f.trim().is_empty()) {
        return Err(TrackerError::Csv("CSV file is empty".to_string()));
    }

    let width = header.len();
    let mut sheet = Spreadsheet::spreadsheet_create(records.len(), width);

    for (r, fields) in records.into_iter().enumerate() {
        // Extra fields beyond the header are dropped
        for (c, field) in fields.into_iter().take(width).enumerate() {
            sheet.cells[r * width + c] = CellValue::from(field.as_str());
        }
    }

    Ok(sheet)
}

// Parse CSV text into records. Line breaks inside quotes belong to the field.
fn parse_csv(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Doubled quote inside a quoted field
                    current_field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                    quoted = true;
                }
            }
            ',' if !in_quotes => {
                record.push(std::mem::take(&mut current_field));
                quoted = false;
            }
            '\r' | '\n' if !in_quotes => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut current_field));
                records.push(std::mem::take(&mut record));
                quoted = false;
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    if in_quotes {
        return Err(TrackerError::Csv(format!(
            "unterminated quote in record {}",
            records.len() + 1
        )));
    }

    // Last record without a trailing line break
    if !record.is_empty() || !current_field.is_empty() || quoted {
        record.push(current_field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TableStore;
    use std::io::Write;

    #[test]
    fn test_parse_csv_quotes() {
        let records = parse_csv("a,\"b,c\",\"say \"\"hi\"\"\",,\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b,c", r#"say "hi""#, "", ""]]);
        assert!(parse_csv("a,\"open\n").is_err());
        println!("✓ Quoted fields, escaped quotes and blanks parse");
    }

    #[test]
    fn test_quoted_line_breaks() {
        let records = parse_csv("Name,Status\r\nAsha,\"call back\nMonday\"\r\nRavi,\"\"\n").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["Asha", "call back\nMonday"]);
        assert_eq!(records[2], vec!["Ravi", ""]);
        println!("✓ Line breaks inside quotes stay in the field");
    }

    #[test]
    fn test_fields_load_as_text() {
        let sheet = from_csv_str(
            "Name,Phone,Cand_followup,Cand_Date_update\r\nAsha,09876543210,2,01/06/2025\nRavi, 12 ,,1e3\n",
        )
        .unwrap();
        assert_eq!(sheet.rows, 3);
        assert_eq!(sheet.cols, 4);
        assert_eq!(sheet.get_cell(2, 2).unwrap(), CellValue::text("09876543210"));
        assert_eq!(sheet.get_cell(2, 3).unwrap(), CellValue::text("2"));
        assert_eq!(sheet.get_cell(2, 3).unwrap().as_count(), 2);
        assert_eq!(sheet.get_cell(2, 4).unwrap(), CellValue::text("01/06/2025"));
        assert_eq!(sheet.get_cell(3, 2).unwrap(), CellValue::text(" 12 "));
        assert_eq!(sheet.get_cell(3, 3).unwrap(), CellValue::Empty);
        assert_eq!(sheet.get_cell(3, 4).unwrap(), CellValue::text("1e3"));
        assert_eq!(sheet.header_row().unwrap()[3], "Cand_Date_update");
        println!("✓ Fields load as text exactly as written, blanks as empty");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(from_csv_str(""), Err(TrackerError::Csv(_))));
        println!("✓ Empty CSV is rejected");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Status,Remark_gap").unwrap();
        writeln!(file, "Applied,3").unwrap();
        let sheet = from_csv(file.path()).unwrap();
        assert_eq!(sheet.get_cell(2, 1).unwrap(), CellValue::text("Applied"));
        assert_eq!(sheet.last_row(), 2);
        println!("✓ CSV loads from disk");
    }
}
