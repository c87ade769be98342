use crate::cell::CellValue;
use crate::error::{Result, TrackerError};
use crate::store::TableStore;

/// In-memory table. Cells are stored row-major; the grid grows when a write
/// lands outside the current bounds, the way a sheet does.
#[derive(Clone, Debug, Default)]
pub struct Spreadsheet {
    pub rows: usize,
    pub cols: usize,
    pub cells: Vec<CellValue>,
}

impl Spreadsheet {
    pub fn spreadsheet_create(rows: usize, cols: usize) -> Self {
        Spreadsheet {
            rows,
            cols,
            cells: vec![CellValue::Empty; rows * cols],
        }
    }

    /// Builds a sheet whose first row holds `header`.
    pub fn with_header<S: AsRef<str>>(header: &[S]) -> Self {
        let mut sheet = Spreadsheet::spreadsheet_create(1, header.len());
        for (c, name) in header.iter().enumerate() {
            sheet.cells[c] = CellValue::from(name.as_ref());
        }
        sheet
    }

    /// Appends a data row after the last populated row and returns its index.
    pub fn push_row(&mut self, values: Vec<CellValue>) -> usize {
        let row = self.last_row() + 1;
        for (c, value) in values.into_iter().enumerate() {
            self.put(row, c + 1, value);
        }
        row
    }

    /// Row `row` as a vector of `cols` values.
    pub fn row_values(&self, row: usize) -> Vec<CellValue> {
        (1..=self.cols).map(|c| self.peek(row, c)).collect()
    }

    fn check_address(row: usize, col: usize) -> Result<()> {
        if row == 0 || col == 0 {
            return Err(TrackerError::InvalidAddress { row, col });
        }
        Ok(())
    }

    fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.cols + (col - 1)
    }

    fn peek(&self, row: usize, col: usize) -> CellValue {
        if row > self.rows || col > self.cols {
            return CellValue::Empty;
        }
        self.cells[self.index(row, col)].clone()
    }

    fn grow(&mut self, rows: usize, cols: usize) {
        if rows <= self.rows && cols <= self.cols {
            return;
        }
        let new_rows = rows.max(self.rows);
        let new_cols = cols.max(self.cols);
        let mut cells = vec![CellValue::Empty; new_rows * new_cols];
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[r * new_cols + c] = std::mem::take(&mut self.cells[r * self.cols + c]);
            }
        }
        self.rows = new_rows;
        self.cols = new_cols;
        self.cells = cells;
    }

    fn put(&mut self, row: usize, col: usize, value: CellValue) {
        self.grow(row, col);
        let idx = self.index(row, col);
        self.cells[idx] = value;
    }
}

impl TableStore for Spreadsheet {
    fn get_cell(&self, row: usize, col: usize) -> Result<CellValue> {
        Self::check_address(row, col)?;
        Ok(self.peek(row, col))
    }

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<()> {
        Self::check_address(row, col)?;
        self.put(row, col, value);
        Ok(())
    }

    fn get_range(
        &self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<Vec<Vec<CellValue>>> {
        Self::check_address(row, col)?;
        Ok((row..row + height)
            .map(|r| (col..col + width).map(|c| self.peek(r, c)).collect())
            .collect())
    }

    fn set_range(&mut self, row: usize, col: usize, values: Vec<Vec<CellValue>>) -> Result<()> {
        Self::check_address(row, col)?;
        for (dr, line) in values.into_iter().enumerate() {
            for (dc, value) in line.into_iter().enumerate() {
                self.put(row + dr, col + dc, value);
            }
        }
        Ok(())
    }

    fn header_row(&self) -> Result<Vec<String>> {
        Ok((1..=self.cols).map(|c| self.peek(1, c).to_string()).collect())
    }

    fn last_row(&self) -> usize {
        (1..=self.rows)
            .rev()
            .find(|&r| (1..=self.cols).any(|c| !self.peek(r, c).is_empty()))
            .unwrap_or(0)
    }
}
