//! Spreadsheet reader: raw file bytes into a [`Grid`].
//!
//! Workbook containers are decoded with calamine; only the first sheet of a
//! multi-sheet workbook is read - additional sheets are ignored. This is a
//! known limitation, not a bug. Plain-text inputs are decoded as CSV with
//! encoding and delimiter auto-detection.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{DecodeError, DecodeResult, PipelineResult};
use crate::grid::{Cell, Grid};

/// Leading bytes of a zip container (`.xlsx` and friends).
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

/// Leading bytes of a CFB container (legacy `.xls`).
const CFB_MAGIC: [u8; 8] = [0xd0, 0xcf, 0x11, 0xe0, 0xa1, 0xb1, 0x1a, 0xe1];

/// Read raw file bytes into a [`Grid`].
///
/// Fails with a codec error when the bytes cannot be decoded, or with a grid
/// error when the decoded table has fewer than the required 3 rows. The two
/// kinds stay distinguished so callers can show different messages.
pub fn read_grid(source_name: &str, bytes: &[u8]) -> PipelineResult<Grid> {
    let rows = decode_rows(bytes)?;
    Ok(Grid::from_rows(source_name, rows)?)
}

/// Decode bytes into a flat table of cells, sniffing the container format.
pub fn decode_rows(bytes: &[u8]) -> DecodeResult<Vec<Vec<Cell>>> {
    if bytes.starts_with(&ZIP_MAGIC) || bytes.starts_with(&CFB_MAGIC) {
        decode_workbook_rows(bytes)
    } else {
        decode_csv_rows(bytes)
    }
}

/// Decode a workbook container, taking the first sheet only.
fn decode_workbook_rows(bytes: &[u8]) -> DecodeResult<Vec<Vec<Cell>>> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoSheets)??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_from_codec).collect())
        .collect())
}

/// Map one calamine cell into the grid model, without coercion.
fn cell_from_codec(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Decode CSV bytes with encoding and delimiter auto-detection.
///
/// All CSV values arrive as text cells; the CSV codec carries no type
/// information, and the core performs no coercion.
fn decode_csv_rows(bytes: &[u8]) -> DecodeResult<Vec<Vec<Cell>>> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter as u8)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(Cell::from).collect());
    }
    Ok(rows)
}

/// Detect the encoding of raw bytes using chardet.
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the detected encoding, lossily on mismatch.
fn decode_content(bytes: &[u8], encoding: &str) -> String {
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.to_string(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.to_string(),
        _ => String::from_utf8_lossy(bytes).to_string(),
    }
}

/// Detect the delimiter by counting occurrences in the first line.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}
