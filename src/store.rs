use crate::cell::CellValue;
use crate::error::Result;

/// A tabular store addressed by 1-based row and column.
///
/// Row 1 is the header row. Implementations write through immediately;
/// nothing in this crate batches writes behind the store's back.
pub trait TableStore {
    fn get_cell(&self, row: usize, col: usize) -> Result<CellValue>;

    fn set_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<()>;

    /// Bulk read of a `height` x `width` block starting at (`row`, `col`).
    fn get_range(
        &self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<Vec<Vec<CellValue>>>;

    /// Bulk write of a block whose top-left corner is (`row`, `col`).
    fn set_range(&mut self, row: usize, col: usize, values: Vec<Vec<CellValue>>) -> Result<()>;

    /// Column names from row 1, in order.
    fn header_row(&self) -> Result<Vec<String>>;

    /// Index of the last row holding any value, 0 for an empty store.
    fn last_row(&self) -> usize;
}
