//! REST API types for frontend integration.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::grid::Grid;

/// Grid metadata returned by `POST /api/inspect`, used by the UI to preview
/// an uploaded file before merging or splitting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectResponse {
    /// Original file name.
    pub source_name: String,

    /// The instruction rows, rendered as display text.
    pub instructions: Vec<Vec<String>>,

    /// The header row, rendered as display text.
    pub header: Vec<String>,

    /// Number of data rows in the file.
    pub data_row_count: usize,
}

impl From<&Grid> for InspectResponse {
    fn from(grid: &Grid) -> Self {
        Self {
            source_name: grid.source_name.clone(),
            instructions: grid
                .instructions
                .iter()
                .map(|row| row.iter().map(|c| c.display_text()).collect())
                .collect(),
            header: grid.header.iter().map(|c| c.display_text()).collect(),
            data_row_count: grid.data_row_count(),
        }
    }
}

/// Create an error response body.
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}
