//! Spreadsheet codec boundary: raw bytes to [`crate::grid::Grid`] and back.
//!
//! The codec is the only place that touches the on-disk spreadsheet formats.
//! Reading sniffs the container from the byte signature (zip for `.xlsx`,
//! CFB for `.xls`, everything else treated as CSV); writing always produces
//! a single-sheet `.xlsx` workbook.

pub mod read;
pub mod write;

pub use read::{decode_rows, detect_delimiter, detect_encoding, read_grid};
pub use write::write_workbook;
