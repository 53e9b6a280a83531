//! # sheetsplice - merge and split structured spreadsheets
//!
//! sheetsplice recombines tabular spreadsheet files that share a fixed
//! layout: two instruction rows, one header row, then data rows. It can
//! merge several files into one, or split one file into row-bounded parts,
//! carrying the instruction/header prefix into every output unchanged.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  File bytes │────▶│   Reader    │────▶│  Transform  │────▶│   Writer    │
//! │ (xlsx/csv)  │     │  (to Grid)  │     │ merge/split │     │ (+ archive) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sheetsplice::{split_file, InputFile};
//!
//! let bytes = std::fs::read("report.xlsx")?;
//! let output = split_file(&InputFile::new("report.xlsx", bytes), 100)?;
//! std::fs::write(&output.file_name, &output.bytes)?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`grid`] - The instruction/header/data grid model
//! - [`codec`] - Spreadsheet reader and writer
//! - [`transform`] - Concatenate, split, and the file-level pipeline
//! - [`archive`] - Zip packaging for split outputs
//! - [`api`] - HTTP API server

// Core modules
pub mod error;
pub mod grid;

// Codec boundary
pub mod codec;

// Transforms
pub mod transform;

// Archive packaging
pub mod archive;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    DecodeError, GridError, PackError, PipelineError, ServerError, TransformError,
};

// =============================================================================
// Re-exports - Grid model
// =============================================================================

pub use grid::{Cell, Grid, DATA_START_INDEX, HEADER_ROW_INDEX, MIN_ROW_COUNT};

// =============================================================================
// Re-exports - Codec
// =============================================================================

pub use codec::{read_grid, write_workbook};

// =============================================================================
// Re-exports - Transforms
// =============================================================================

pub use transform::{concatenate, split};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    merge_files, split_file, InputFile, MergeOutput, MergeSummary, SplitOutput, SplitSummary,
    MERGED_SHEET_NAME,
};

// =============================================================================
// Re-exports - Archive
// =============================================================================

pub use archive::{pack, ArchiveEntry};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
