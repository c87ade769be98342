use crate::cell::CellValue;
use crate::date_parser::parse_date;
use crate::error::Result;
use crate::gap::{RowGaps, gap};
use crate::schema::{ColumnRole, Schema};
use crate::store::TableStore;
use chrono::NaiveDate;

/// One data row of the tracker, read through a [`Schema`].
///
/// Columns absent from the schema read as empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub row: usize,
    pub candidate_date: Option<NaiveDate>,
    pub client_date: Option<NaiveDate>,
    pub remark_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub candidate_followup: u32,
    pub client_followup: u32,
    pub candidate_gap: u32,
    pub client_gap: u32,
    pub remark_gap: u32,
}

impl Record {
    pub fn load<S: TableStore + ?Sized>(store: &S, schema: &Schema, row: usize) -> Result<Self> {
        let read = |role: ColumnRole| -> Result<CellValue> {
            match schema.index(role) {
                Some(col) => store.get_cell(row, col),
                None => Ok(CellValue::Empty),
            }
        };

        Ok(Record {
            row,
            candidate_date: parse_date(&read(ColumnRole::CandidateDate)?),
            client_date: parse_date(&read(ColumnRole::ClientDate)?),
            remark_date: parse_date(&read(ColumnRole::RemarkDate)?),
            status: read(ColumnRole::Status)?.as_text().map(str::to_string),
            candidate_followup: read(ColumnRole::CandidateFollowup)?.as_count(),
            client_followup: read(ColumnRole::ClientFollowup)?.as_count(),
            candidate_gap: read(ColumnRole::CandidateGap)?.as_count(),
            client_gap: read(ColumnRole::ClientGap)?.as_count(),
            remark_gap: read(ColumnRole::RemarkGap)?.as_count(),
        })
    }

    /// Gaps this record should hold on `today`.
    pub fn gaps(&self, today: NaiveDate) -> RowGaps {
        RowGaps {
            candidate: gap(self.candidate_date, today),
            client: gap(self.client_date, today),
            remark: gap(self.remark_date, today),
        }
    }

    /// Gaps currently stored in the row.
    pub fn stored_gaps(&self) -> RowGaps {
        RowGaps {
            candidate: self.candidate_gap,
            client: self.client_gap,
            remark: self.remark_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnNames;
    use crate::spreadsheet::Spreadsheet;

    #[test]
    fn test_load_and_gaps() {
        let mut sheet = Spreadsheet::with_header(&[
            "Cand_Date_update",
            "Cand_followup",
            "Status",
            "Remark_date_change",
            "candidate_gap",
        ]);
        sheet.push_row(vec![
            CellValue::text("01/06/2025"),
            CellValue::Number(2.0),
            CellValue::text("Interview"),
            CellValue::text("10-06-2025"),
            CellValue::Number(5.0),
        ]);
        let schema = Schema::resolve(&sheet, &ColumnNames::default()).unwrap();
        let record = Record::load(&sheet, &schema, 2).unwrap();

        assert_eq!(record.candidate_date, NaiveDate::from_ymd_opt(2025, 6, 1));
        assert_eq!(record.client_date, None);
        assert_eq!(record.status.as_deref(), Some("Interview"));
        assert_eq!(record.candidate_followup, 2);
        assert_eq!(record.stored_gaps().candidate, 5);

        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let gaps = record.gaps(today);
        assert_eq!(gaps.candidate, 13);
        assert_eq!(gaps.client, 0);
        assert_eq!(gaps.remark, 4);
        println!("✓ Record loads through the schema and derives its gaps");
    }
}
