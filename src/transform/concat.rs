//! Concatenate transform: combine N grids' data rows under one prefix.

use crate::error::{TransformError, TransformResult};
use crate::grid::Grid;

/// Concatenate the data rows of every input grid, in input order, under the
/// first grid's instructions and header.
///
/// "First file wins" is deliberate: later grids' instructions and header are
/// discarded entirely, without being compared against the first. Rows of
/// differing width from different sources are concatenated as-is; column
/// alignment is not checked. Input grids are never mutated.
pub fn concatenate(grids: &[Grid]) -> TransformResult<Grid> {
    let first = grids.first().ok_or(TransformError::EmptyInput)?;

    let mut rows = Vec::with_capacity(grids.iter().map(|g| g.rows.len()).sum());
    for grid in grids {
        rows.extend(grid.rows.iter().cloned());
    }

    Ok(Grid {
        source_name: first.source_name.clone(),
        instructions: first.instructions.clone(),
        header: first.header.clone(),
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::tests::{sample_grid, text_row};
    use crate::grid::Grid;

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(concatenate(&[]), Err(TransformError::EmptyInput)));
    }

    #[test]
    fn test_single_grid_is_unchanged() {
        let grid = sample_grid("one.xlsx", &[&["a", "b"], &["c", "d"]]);
        let merged = concatenate(std::slice::from_ref(&grid)).unwrap();
        assert_eq!(merged, grid);
    }

    #[test]
    fn test_rows_appended_in_input_order() {
        let g1 = sample_grid("first.xlsx", &[&["a", "b"]]);
        let g2 = sample_grid("second.xlsx", &[&["c", "d"], &["e", "f"]]);

        let merged = concatenate(&[g1.clone(), g2.clone()]).unwrap();
        assert_eq!(merged.rows.len(), 3);
        assert_eq!(merged.rows[0], text_row(&["a", "b"]));
        assert_eq!(merged.rows[2], text_row(&["e", "f"]));

        // Inputs are untouched.
        assert_eq!(g1.rows.len(), 1);
        assert_eq!(g2.rows.len(), 2);
    }

    #[test]
    fn test_first_grid_prefix_wins() {
        let g1 = sample_grid("first.xlsx", &[&["a", "b"]]);
        let mut g2 = sample_grid("second.xlsx", &[&["c", "d"]]);
        g2.instructions = vec![text_row(&["OTHER1"]), text_row(&["OTHER2"])];
        g2.header = text_row(&["X1", "X2", "X3"]);

        let merged = concatenate(&[g1.clone(), g2]).unwrap();
        assert_eq!(merged.instructions, g1.instructions);
        assert_eq!(merged.header, g1.header);
        assert_eq!(merged.source_name, "first.xlsx");
        assert_eq!(merged.rows.len(), 2);
    }

    #[test]
    fn test_mismatched_row_widths_pass_through() {
        let g1 = sample_grid("a.xlsx", &[&["1", "2"]]);
        let g2 = sample_grid("b.xlsx", &[&["wide", "row", "here", "now"]]);

        let merged = concatenate(&[g1, g2]).unwrap();
        assert_eq!(merged.rows[0].len(), 2);
        assert_eq!(merged.rows[1].len(), 4);
    }

    #[test]
    fn test_three_instruction_scenario() {
        // Two grids with one data row each merge into one grid with two data
        // rows and the first grid's prefix.
        let g1 = Grid {
            source_name: "one.xlsx".to_string(),
            instructions: vec![text_row(&["A"]), text_row(&["B"])],
            header: text_row(&["H"]),
            rows: vec![text_row(&["r1"])],
        };
        let g2 = Grid {
            source_name: "two.xlsx".to_string(),
            instructions: vec![text_row(&["C"]), text_row(&["D"])],
            header: text_row(&["Z"]),
            rows: vec![text_row(&["r2"])],
        };

        let merged = concatenate(&[g1.clone(), g2]).unwrap();
        assert_eq!(merged.rows, vec![text_row(&["r1"]), text_row(&["r2"])]);
        assert_eq!(merged.header, g1.header);
        assert_eq!(merged.instructions, g1.instructions);
    }

    #[test]
    fn test_deterministic_for_same_input_order() {
        let g1 = sample_grid("a.xlsx", &[&["1"]]);
        let g2 = sample_grid("b.xlsx", &[&["2"]]);

        let first = concatenate(&[g1.clone(), g2.clone()]).unwrap();
        let second = concatenate(&[g1, g2]).unwrap();
        assert_eq!(first, second);
    }
}
