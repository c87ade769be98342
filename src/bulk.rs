//! Batch gap recomputation.
//!
//! Two passes share one gap rule:
//! - [`recalculate_all`] walks every data row and writes each gap cell on
//!   its own. It checks the header first and writes nothing if a column is
//!   missing.
//! - [`recalculate_column`] refreshes one gap column with a single bulk read
//!   and a single bulk write.
//!
//! Rows excluded by [`TrackerConfig`] keep whatever gaps they already hold.

use crate::cell::CellValue;
use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::date_parser::parse_date;
use crate::error::Result;
use crate::gap::{GapKind, RowGaps, gap};
use crate::record::Record;
use crate::schema::{ColumnRole, Schema};
use crate::store::TableStore;
use chrono::NaiveDate;
use log::{debug, info};

/// First row below the header.
pub const FIRST_DATA_ROW: usize = 2;

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecalcReport {
    pub rows_scanned: usize,
    pub rows_skipped: usize,
    pub cells_written: usize,
}

/// Recomputes the three gaps of `row` and writes the ones whose column is
/// present. Returns the computed gaps.
pub fn recalculate_row<S: TableStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    row: usize,
    today: NaiveDate,
) -> Result<RowGaps> {
    let record = Record::load(&*store, schema, row)?;
    let gaps = record.gaps(today);
    write_row_gaps(store, schema, row, gaps)?;
    Ok(gaps)
}

fn write_row_gaps<S: TableStore + ?Sized>(
    store: &mut S,
    schema: &Schema,
    row: usize,
    gaps: RowGaps,
) -> Result<usize> {
    let mut written = 0;
    for kind in GapKind::ALL {
        match schema.index(ColumnRole::gap_of(kind)) {
            Some(col) => {
                store.set_cell(row, col, CellValue::from(gaps.get(kind)))?;
                written += 1;
            }
            None => debug!("row {}: no {:?} gap column, write skipped", row, kind),
        }
    }
    Ok(written)
}

/// Full recompute of every data row.
pub fn recalculate_all<S: TableStore + ?Sized, C: Clock>(
    store: &mut S,
    config: &TrackerConfig,
    clock: &C,
) -> Result<RecalcReport> {
    let schema = Schema::resolve(&*store, &config.columns)?;
    schema.require(&ColumnRole::RECALC)?;

    let today = clock.today();
    let last_row = store.last_row();
    let mut report = RecalcReport::default();

    for row in FIRST_DATA_ROW..=last_row {
        report.rows_scanned += 1;
        let record = Record::load(&*store, &schema, row)?;
        if config.is_excluded(row, record.remark_date) {
            debug!("row {}: excluded, stored gaps kept", row);
            report.rows_skipped += 1;
            continue;
        }
        report.cells_written += write_row_gaps(store, &schema, row, record.gaps(today))?;
    }

    info!(
        "full recompute for {}: {} rows, {} skipped, {} cells written",
        today, report.rows_scanned, report.rows_skipped, report.cells_written
    );
    Ok(report)
}

/// Refreshes a single gap column with one bulk read and one bulk write.
///
/// The date column must exist. A missing gap column is only reported when
/// the write is attempted, so an empty table succeeds without one.
pub fn recalculate_column<S: TableStore + ?Sized, C: Clock>(
    store: &mut S,
    config: &TrackerConfig,
    clock: &C,
    kind: GapKind,
) -> Result<RecalcReport> {
    let schema = Schema::resolve(&*store, &config.columns)?;
    let date_col = schema.index_or_err(ColumnRole::date_of(kind))?;

    let today = clock.today();
    let last_row = store.last_row();
    let mut report = RecalcReport::default();
    if last_row < FIRST_DATA_ROW {
        return Ok(report);
    }
    let height = last_row - FIRST_DATA_ROW + 1;

    let dates = read_column(&*store, FIRST_DATA_ROW, date_col, height)?;
    let gap_col = schema.index(ColumnRole::gap_of(kind));

    // Exclusions need the remark dates and the gaps already stored.
    let (remarks, stored) = if config.has_exclusions() {
        let remarks = match schema.index(ColumnRole::RemarkDate) {
            Some(col) => read_column(&*store, FIRST_DATA_ROW, col, height)?,
            None => vec![CellValue::Empty; height],
        };
        let stored = match gap_col {
            Some(col) => read_column(&*store, FIRST_DATA_ROW, col, height)?,
            None => vec![CellValue::Empty; height],
        };
        (remarks, stored)
    } else {
        (Vec::new(), Vec::new())
    };

    let mut out = Vec::with_capacity(height);
    for (i, date) in dates.iter().enumerate() {
        let row = FIRST_DATA_ROW + i;
        report.rows_scanned += 1;
        if config.has_exclusions() && config.is_excluded(row, parse_date(&remarks[i])) {
            report.rows_skipped += 1;
            out.push(vec![stored[i].clone()]);
            continue;
        }
        out.push(vec![CellValue::from(gap(parse_date(date), today))]);
    }

    let gap_col = schema.index_or_err(ColumnRole::gap_of(kind))?;
    store.set_range(FIRST_DATA_ROW, gap_col, out)?;
    report.cells_written = height - report.rows_skipped;

    info!(
        "{:?} gap column refreshed for {}: {} rows, {} skipped",
        kind, today, report.rows_scanned, report.rows_skipped
    );
    Ok(report)
}

fn read_column<S: TableStore + ?Sized>(
    store: &S,
    row: usize,
    col: usize,
    height: usize,
) -> Result<Vec<CellValue>> {
    Ok(store
        .get_range(row, col, height, 1)?
        .into_iter()
        .map(|mut line| line.pop().unwrap_or_default())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::spreadsheet::Spreadsheet;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())
    }

    #[test]
    fn test_empty_table_without_gap_column() {
        let mut sheet = Spreadsheet::with_header(&["Cand_Date_update"]);
        let report =
            recalculate_column(&mut sheet, &TrackerConfig::default(), &clock(), GapKind::Candidate)
                .unwrap();
        assert_eq!(report, RecalcReport::default());
        println!("✓ Nothing to write means no missing-column failure");
    }

    #[test]
    fn test_missing_gap_column_fails_on_write() {
        let mut sheet = Spreadsheet::with_header(&["Cand_Date_update"]);
        sheet.push_row(vec![CellValue::text("01/06/2025")]);
        let err =
            recalculate_column(&mut sheet, &TrackerConfig::default(), &clock(), GapKind::Candidate)
                .unwrap_err();
        assert!(matches!(err, crate::error::TrackerError::MissingColumn(ref n) if n == "candidate_gap"));
        println!("✓ Missing gap column fails at the write");
    }

    #[test]
    fn test_row_without_gap_columns() {
        let mut sheet = Spreadsheet::with_header(&["Cand_Date_update"]);
        sheet.push_row(vec![CellValue::text("01/06/2025")]);
        let schema = Schema::resolve(&sheet, &TrackerConfig::default().columns).unwrap();
        let gaps = recalculate_row(&mut sheet, &schema, 2, clock().0).unwrap();
        assert_eq!(gaps.candidate, 13);
        assert_eq!(sheet.cols, 1);
        println!("✓ Row recompute skips absent gap columns");
    }
}
