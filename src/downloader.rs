use crate::spreadsheet::Spreadsheet;
use crate::store::TableStore;

/// Convert a tracker sheet to CSV
///
/// Every row up to the last populated one is written, header included.
/// Fields holding commas, quotes or line breaks are quoted, with inner quotes
/// doubled.
///
/// # Examples
/// ```
/// use recruit_tracker::spreadsheet::Spreadsheet;
/// use recruit_tracker::downloader::to_csv;
///
/// let sheet = Spreadsheet::with_header(&["Status", "Remark_gap"]);
/// assert_eq!(to_csv(&sheet), "Status,Remark_gap\n");
/// ```
pub fn to_csv(sheet: &Spreadsheet) -> String {
    let mut csv_content = String::new();

    for r in 1..=sheet.last_row() {
        let line: Vec<String> = sheet
            .row_values(r)
            .iter()
            .map(|value| escape_field(&value.to_string()))
            .collect();
        csv_content.push_str(&line.join(","));
        csv_content.push('\n');
    }

    csv_content
}

fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;
    use crate::loader::from_csv_str;

    #[test]
    fn test_escaping() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\r"), "\"line\r\"");
        println!("✓ Special characters are quoted");
    }

    #[test]
    fn test_export_reloads() {
        let mut sheet = Spreadsheet::with_header(&["Status", "Cand_followup"]);
        sheet.push_row(vec![CellValue::text("On hold, call back"), CellValue::Number(3.0)]);
        let csv = to_csv(&sheet);
        assert_eq!(csv, "Status,Cand_followup\n\"On hold, call back\",3\n");

        let reloaded = from_csv_str(&csv).unwrap();
        assert_eq!(
            reloaded.row_values(2),
            vec![CellValue::text("On hold, call back"), CellValue::text("3")]
        );
        assert_eq!(to_csv(&reloaded), csv);
        println!("✓ Exported CSV loads back to the same text");
    }

    #[test]
    fn test_untouched_fields_survive_reload() {
        let input = "Name,Phone,Cand_Date_update,Notes\n\
                     Asha,09876543210,01/06/2025,1.50\n\
                     Ravi, 12 ,1e3,\"call back\nMonday\"\n\
                     Meena,+91 98,007,\"said \"\"later\"\", retry\"\n";
        let sheet = from_csv_str(input).unwrap();
        assert_eq!(sheet.last_row(), 4);
        assert_eq!(to_csv(&sheet), input);
        println!("✓ Load then export leaves the file byte-identical");
    }
}
