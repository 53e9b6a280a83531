//! High-level pipeline API for file-level merge and split operations.
//!
//! This module combines the reader, the transforms, the writer, and the
//! archive packager into the two operations the CLI and the HTTP API expose.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetsplice::{merge_files, InputFile};
//!
//! let inputs = vec![
//!     InputFile::new("january.xlsx", std::fs::read("january.xlsx")?),
//!     InputFile::new("february.xlsx", std::fs::read("february.xlsx")?),
//! ];
//! let output = merge_files(&inputs)?;
//! std::fs::write(&output.file_name, &output.bytes)?;
//! ```

use chrono::Utc;
use serde::Serialize;

use crate::api::logs::{log_info, log_success, log_success_indent};
use crate::archive::{pack, ArchiveEntry};
use crate::codec::{read_grid, write_workbook};
use crate::error::{PipelineResult, TransformError};
use crate::transform::{concatenate, split};

/// Sheet name used for merged output workbooks.
pub const MERGED_SHEET_NAME: &str = "Merged Data";

/// One uploaded or on-disk input file: its name plus raw bytes.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Original file name, carried through for output naming.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Result of a merge operation: one workbook plus summary metadata.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// Suggested download name, `merged_<ISO-date>.xlsx`.
    pub file_name: String,
    /// Serialized single-sheet workbook.
    pub bytes: Vec<u8>,
    /// Summary for display at the boundary.
    pub summary: MergeSummary,
}

/// Summary metadata for a merge.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    /// Number of input files merged.
    pub source_count: usize,
    /// Total data rows in the output.
    pub data_row_count: usize,
    /// Width of the (first file's) header row.
    pub column_count: usize,
}

/// Result of a split operation: one archive plus summary metadata.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    /// Suggested download name, `<basename>_split.zip`.
    pub file_name: String,
    /// Serialized zip archive with one workbook per part.
    pub bytes: Vec<u8>,
    /// Summary for display at the boundary.
    pub summary: SplitSummary,
}

/// Summary metadata for a split.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitSummary {
    /// Number of parts in the archive.
    pub part_count: usize,
    /// Total data rows across all parts.
    pub data_row_count: usize,
    /// Requested maximum rows per part.
    pub rows_per_part: usize,
}

/// Merge several input files into one workbook.
///
/// Every input is parsed into a grid, the grids are concatenated under the
/// first file's instructions and header, and the result is serialized as one
/// `.xlsx` workbook. A single unreadable input aborts the whole batch.
pub fn merge_files(inputs: &[InputFile]) -> PipelineResult<MergeOutput> {
    if inputs.is_empty() {
        return Err(TransformError::EmptyInput.into());
    }

    log_info(format!("📖 Reading {} input files...", inputs.len()));
    let mut grids = Vec::with_capacity(inputs.len());
    for input in inputs {
        let grid = read_grid(&input.name, &input.bytes)?;
        log_success_indent(
            format!("{}: {} data rows", input.name, grid.data_row_count()),
            1,
        );
        grids.push(grid);
    }

    let merged = concatenate(&grids)?;
    log_success(format!(
        "Merged {} files into {} data rows",
        inputs.len(),
        merged.data_row_count()
    ));

    let bytes = write_workbook(&merged, MERGED_SHEET_NAME)?;
    let file_name = format!("merged_{}.xlsx", Utc::now().format("%Y-%m-%d"));
    log_success(format!("Wrote {file_name} ({} bytes)", bytes.len()));

    Ok(MergeOutput {
        file_name,
        summary: MergeSummary {
            source_count: inputs.len(),
            data_row_count: merged.data_row_count(),
            column_count: merged.header.len(),
        },
        bytes,
    })
}

/// Split one input file into row-bounded parts, packed into a zip archive.
///
/// Each part workbook gets the original instructions and header and the
/// sheet name `Part <n>`; archive entries are named
/// `<basename>_part_<n>.xlsx`.
pub fn split_file(input: &InputFile, rows_per_part: usize) -> PipelineResult<SplitOutput> {
    log_info(format!("📖 Reading {}...", input.name));
    let grid = read_grid(&input.name, &input.bytes)?;
    log_success(format!("{} data rows", grid.data_row_count()));

    let parts = split(&grid, rows_per_part)?;
    log_info(format!(
        "✂️  Splitting into {} parts of at most {} rows...",
        parts.len(),
        rows_per_part
    ));

    let base = base_name(&input.name);
    let mut entries = Vec::with_capacity(parts.len());
    for (idx, part) in parts.iter().enumerate() {
        let part_number = idx + 1;
        let bytes = write_workbook(part, &format!("Part {part_number}"))?;
        let entry_name = format!("{base}_part_{part_number}.xlsx");
        log_success_indent(
            format!("{entry_name}: {} data rows", part.data_row_count()),
            1,
        );
        entries.push(ArchiveEntry::new(entry_name, bytes));
    }

    let archive = pack(&entries)?;
    let file_name = format!("{base}_split.zip");
    log_success(format!("Wrote {file_name} ({} bytes)", archive.len()));

    Ok(SplitOutput {
        file_name,
        bytes: archive,
        summary: SplitSummary {
            part_count: parts.len(),
            data_row_count: grid.data_row_count(),
            rows_per_part,
        },
    })
}

/// Original file name without its final extension.
fn base_name(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((base, _)) if !base.is_empty() => base,
        _ => name,
    }
}
