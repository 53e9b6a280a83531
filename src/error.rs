//! Error types for the sheetsplice pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`DecodeError`] - Spreadsheet codec failures (read and write)
//! - [`GridError`] - Structural problems with a parsed grid
//! - [`TransformError`] - Concatenate/split parameter errors
//! - [`PackError`] - Archive packaging errors
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

use crate::grid::MIN_ROW_COUNT;

// =============================================================================
// Spreadsheet Codec Errors
// =============================================================================

/// Errors from the spreadsheet codec, in either direction.
///
/// A read failure means the bytes could not be interpreted as a workbook or
/// CSV; a write failure means the codec could not represent a grid. Both are
/// surfaced verbatim and never retried.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The workbook codec rejected the bytes.
    #[error("Failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The CSV codec rejected the bytes.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The workbook contained no sheets at all.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// The workbook writer could not serialize a grid.
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}

// =============================================================================
// Grid Structure Errors
// =============================================================================

/// Structural problems detected while slicing parsed rows into a grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// Too few rows to hold the instruction block plus the header row.
    #[error(
        "File is too short to contain the required structure: \
         found {found} rows, need at least {MIN_ROW_COUNT} \
         (2 instruction rows + 1 header row)"
    )]
    TooShort { found: usize },
}

// =============================================================================
// Transform Errors
// =============================================================================

/// Errors from the concatenate and split transforms.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Concatenate called with zero input grids.
    #[error("No input files provided")]
    EmptyInput,

    /// Split called with a non-positive rows-per-part count.
    #[error("Invalid rows per part: {0} (must be at least 1)")]
    InvalidRowCount(usize),
}

// =============================================================================
// Archive Packaging Errors
// =============================================================================

/// Errors from the archive packager.
#[derive(Debug, Error)]
pub enum PackError {
    /// The zip codec failed.
    #[error("Failed to build archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// IO error while writing into the in-memory archive.
    #[error("Archive IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the main error type returned by [`crate::transform::pipeline`]
/// operations. It wraps all lower-level errors; each one is terminal for the
/// operation in progress - a single corrupt input aborts the whole batch
/// rather than silently skipping the bad file.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Spreadsheet codec error.
    #[error("Codec error: {0}")]
    Decode(#[from] DecodeError),

    /// Grid structure error.
    #[error("Input error: {0}")]
    Grid(#[from] GridError),

    /// Transform error.
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Archive packaging error.
    #[error("Packaging error: {0}")]
    Pack(#[from] PackError),

    /// Filesystem IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Server internal error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for codec operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Result type for grid construction.
pub type GridResult<T> = Result<T, GridError>;

/// Result type for transform operations.
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for archive operations.
pub type PackResult<T> = Result<T, PackError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // GridError -> PipelineError
        let grid_err = GridError::TooShort { found: 2 };
        let pipeline_err: PipelineError = grid_err.into();
        assert!(pipeline_err.to_string().contains("too short"));

        // TransformError -> PipelineError
        let transform_err = TransformError::InvalidRowCount(0);
        let pipeline_err: PipelineError = transform_err.into();
        assert!(pipeline_err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_too_short_names_minimum() {
        let err = GridError::TooShort { found: 2 };
        let msg = err.to_string();
        assert!(msg.contains("found 2 rows"));
        assert!(msg.contains("at least 3"));
    }

    #[test]
    fn test_empty_input_message() {
        let err = TransformError::EmptyInput;
        assert_eq!(err.to_string(), "No input files provided");
    }
}
