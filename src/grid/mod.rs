//! The in-memory grid model: instruction rows, header row, data rows.
//!
//! Every input file follows the same fixed layout, a domain constant rather
//! than a detected structure:
//!
//! - rows 0-1: free-form instruction rows
//! - row 2: the header row naming the columns
//! - rows 3+: data rows
//!
//! A [`Grid`] is built once per input file by the reader, consumed read-only
//! by exactly one transform, and discarded. Transforms never mutate an input
//! grid in place; they always build new grids, so concurrent calls over
//! different inputs are safe without locking.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// 0-based index of the header row in every source file.
pub const HEADER_ROW_INDEX: usize = 2;

/// 0-based index of the first data row in every source file.
pub const DATA_START_INDEX: usize = 3;

/// Minimum parsed row count for a valid source (instructions + header).
pub const MIN_ROW_COUNT: usize = DATA_START_INDEX;

/// A single untyped cell, exactly as the spreadsheet codec produced it.
///
/// No coercion or validation happens here; a cell that arrived as text stays
/// text through every transform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    /// A blank cell.
    #[default]
    Empty,
    /// A text cell.
    Text(String),
    /// A numeric cell (integers included; spreadsheets store them as floats).
    Number(f64),
    /// A boolean cell.
    Bool(bool),
}

impl Cell {
    /// Text content for display purposes (previews, logs).
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value.to_string())
        }
    }
}

/// A parsed spreadsheet, split into its three logical regions.
///
/// Data rows are order-significant and are carried verbatim through every
/// transform. Rows are not required to have uniform length; no column-count
/// validation is performed anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    /// Originating file name, used only for naming outputs.
    pub source_name: String,
    /// The instruction rows preceding the header (rows 0-1 of the source).
    pub instructions: Vec<Vec<Cell>>,
    /// The single header row naming the columns (row 2 of the source).
    pub header: Vec<Cell>,
    /// The data rows (rows 3+ of the source), order preserved.
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Slice a flat row sequence (as decoded from a source file) into a grid.
    ///
    /// Fails with [`GridError::TooShort`] when there are not enough rows to
    /// contain the instruction block plus the header row.
    pub fn from_rows(
        source_name: impl Into<String>,
        mut all_rows: Vec<Vec<Cell>>,
    ) -> GridResult<Self> {
        if all_rows.len() <= HEADER_ROW_INDEX {
            return Err(GridError::TooShort {
                found: all_rows.len(),
            });
        }

        let rows = all_rows.split_off(DATA_START_INDEX);
        let header = all_rows.pop().unwrap_or_default();
        let instructions = all_rows;

        Ok(Self {
            source_name: source_name.into(),
            instructions,
            header,
            rows,
        })
    }

    /// Number of data rows.
    pub fn data_row_count(&self) -> usize {
        self.rows.len()
    }

    /// Reconstruct the flat row sequence `instructions ++ [header] ++ rows`.
    ///
    /// This sequence is exactly what gets re-serialized by the writer.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let mut flat = Vec::with_capacity(self.instructions.len() + 1 + self.rows.len());
        flat.extend(self.instructions.iter().cloned());
        flat.push(self.header.clone());
        flat.extend(self.rows.iter().cloned());
        flat
    }

    /// Borrowing iterator over the flat row sequence, in serialization order.
    pub fn iter_rows(&self) -> impl Iterator<Item = &Vec<Cell>> {
        self.instructions
            .iter()
            .chain(std::iter::once(&self.header))
            .chain(self.rows.iter())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a text row from string slices. Shared by transform tests.
    pub(crate) fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|c| Cell::from(*c)).collect()
    }

    /// A small well-formed grid used across the test suite.
    pub(crate) fn sample_grid(name: &str, data: &[&[&str]]) -> Grid {
        Grid {
            source_name: name.to_string(),
            instructions: vec![text_row(&["I1"]), text_row(&["I2"])],
            header: text_row(&["H1", "H2"]),
            rows: data.iter().map(|r| text_row(r)).collect(),
        }
    }

    #[test]
    fn test_from_rows_slices_regions() {
        let grid = Grid::from_rows(
            "input.xlsx",
            vec![
                text_row(&["I1"]),
                text_row(&["I2"]),
                text_row(&["H1", "H2"]),
                text_row(&["a", "b"]),
                text_row(&["c", "d"]),
            ],
        )
        .unwrap();

        assert_eq!(grid.source_name, "input.xlsx");
        assert_eq!(grid.instructions, vec![text_row(&["I1"]), text_row(&["I2"])]);
        assert_eq!(grid.header, text_row(&["H1", "H2"]));
        assert_eq!(grid.rows, vec![text_row(&["a", "b"]), text_row(&["c", "d"])]);
    }

    #[test]
    fn test_from_rows_exactly_three_rows_has_no_data() {
        let grid = Grid::from_rows(
            "min.xlsx",
            vec![text_row(&["I1"]), text_row(&["I2"]), text_row(&["H"])],
        )
        .unwrap();

        assert!(grid.rows.is_empty());
        assert_eq!(grid.header, text_row(&["H"]));
    }

    #[test]
    fn test_from_rows_two_rows_rejected() {
        let result = Grid::from_rows("short.xlsx", vec![text_row(&["I1"]), text_row(&["I2"])]);
        let err = result.unwrap_err();
        assert!(matches!(err, GridError::TooShort { found: 2 }));
    }

    #[test]
    fn test_from_rows_empty_rejected() {
        let result = Grid::from_rows("empty.xlsx", vec![]);
        assert!(matches!(result, Err(GridError::TooShort { found: 0 })));
    }

    #[test]
    fn test_to_rows_reconstructs_order() {
        let grid = sample_grid("g.xlsx", &[&["a", "b"], &["c", "d"]]);
        let flat = grid.to_rows();

        assert_eq!(flat.len(), 5);
        assert_eq!(flat[0], text_row(&["I1"]));
        assert_eq!(flat[2], text_row(&["H1", "H2"]));
        assert_eq!(flat[4], text_row(&["c", "d"]));
    }

    #[test]
    fn test_ragged_rows_are_preserved() {
        // Rows of differing width are legal and pass through untouched.
        let grid = Grid::from_rows(
            "ragged.xlsx",
            vec![
                text_row(&["I1"]),
                text_row(&["I2"]),
                text_row(&["H1", "H2", "H3"]),
                text_row(&["a"]),
                text_row(&["b", "c", "d", "e"]),
            ],
        )
        .unwrap();

        assert_eq!(grid.rows[0].len(), 1);
        assert_eq!(grid.rows[1].len(), 4);
    }

    #[test]
    fn test_cell_from_empty_str_is_empty() {
        assert_eq!(Cell::from(""), Cell::Empty);
        assert_eq!(Cell::from("x"), Cell::Text("x".to_string()));
    }

    #[test]
    fn test_cell_display_text() {
        assert_eq!(Cell::Number(42.0).display_text(), "42");
        assert_eq!(Cell::Bool(true).display_text(), "true");
        assert_eq!(Cell::Empty.display_text(), "");
    }
}
