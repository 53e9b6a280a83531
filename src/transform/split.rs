//! Split transform: partition one grid's data rows into row-bounded parts.

use crate::error::{TransformError, TransformResult};
use crate::grid::Grid;

/// Partition the grid's data rows into contiguous chunks of at most
/// `rows_per_part` rows each, preserving row order. The last part may be
/// smaller.
///
/// Every part is wrapped as a new grid reusing the original instructions and
/// header verbatim - the structural prefix is duplicated identically into
/// every part, which is the defining guarantee of the split feature. A grid
/// with zero data rows still yields exactly one (empty) part so that the
/// split flow always produces something downloadable.
pub fn split(grid: &Grid, rows_per_part: usize) -> TransformResult<Vec<Grid>> {
    if rows_per_part < 1 {
        return Err(TransformError::InvalidRowCount(rows_per_part));
    }

    if grid.rows.is_empty() {
        return Ok(vec![grid.clone()]);
    }

    Ok(grid
        .rows
        .chunks(rows_per_part)
        .map(|chunk| Grid {
            source_name: grid.source_name.clone(),
            instructions: grid.instructions.clone(),
            header: grid.header.clone(),
            rows: chunk.to_vec(),
        })
        .collect())
}
