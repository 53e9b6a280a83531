//! Spreadsheet writer: a [`Grid`] back into single-sheet `.xlsx` bytes.
//!
//! The flat row sequence `instructions ++ [header] ++ rows` is written to one
//! worksheet with a caller-supplied name, and the workbook is serialized
//! entirely in memory. Writing cannot fail for a well-formed grid; any codec
//! refusal is surfaced unchanged as a write error.

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::DecodeResult;
use crate::grid::{Cell, Grid};

/// Serialize a grid as a single-sheet `.xlsx` workbook.
pub fn write_workbook(grid: &Grid, sheet_name: &str) -> DecodeResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (row_idx, row) in grid.iter_rows().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            write_cell(worksheet, row_idx, col_idx, cell)?;
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Write one cell at the given position, preserving its scalar type.
fn write_cell(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    cell: &Cell,
) -> Result<(), XlsxError> {
    let row = cast_row_num(row_idx)?;
    let col = cast_col_num(col_idx)?;

    match cell {
        // Blank cells are simply not written.
        Cell::Empty => {}
        Cell::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        Cell::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Cell::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

fn cast_row_num(value: usize) -> Result<u32, XlsxError> {
    u32::try_from(value).map_err(|_| XlsxError::RowColumnLimitError)
}

fn cast_col_num(value: usize) -> Result<u16, XlsxError> {
    u16::try_from(value).map_err(|_| XlsxError::RowColumnLimitError)
}
