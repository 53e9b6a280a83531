//! Archive packager: named byte blobs into a single downloadable zip.
//!
//! Entries are written in the order given, deflate-compressed, with no
//! further requirements beyond "valid archive readable by common tools".
//! Packing succeeds for a single entry and even for zero entries; only an
//! underlying zip codec failure is an error.

use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackResult;

/// One named file inside the output archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// File name inside the archive.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Pack the entries into an in-memory zip archive.
pub fn pack(entries: &[ArchiveEntry]) -> PackResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.name.as_str(), options)?;
        writer.write_all(&entry.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn test_pack_preserves_names_and_content() {
        let entries = vec![
            ArchiveEntry::new("report_part_1.xlsx", b"first".to_vec()),
            ArchiveEntry::new("report_part_2.xlsx", b"second".to_vec()),
        ];

        let bytes = pack(&entries).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

        assert_eq!(archive.len(), 2);

        let mut first = String::new();
        archive
            .by_name("report_part_1.xlsx")
            .unwrap()
            .read_to_string(&mut first)
            .unwrap();
        assert_eq!(first, "first");

        let mut second = String::new();
        archive
            .by_name("report_part_2.xlsx")
            .unwrap()
            .read_to_string(&mut second)
            .unwrap();
        assert_eq!(second, "second");
    }

    #[test]
    fn test_pack_keeps_entry_order() {
        let entries = vec![
            ArchiveEntry::new("b.xlsx", vec![1]),
            ArchiveEntry::new("a.xlsx", vec![2]),
        ];

        let bytes = pack(&entries).unwrap();
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["b.xlsx", "a.xlsx"]);
    }

    #[test]
    fn test_pack_zero_entries_is_a_valid_archive() {
        let bytes = pack(&[]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[test]
    fn test_pack_single_entry() {
        let bytes = pack(&[ArchiveEntry::new("only.xlsx", b"x".to_vec())]).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 1);
    }
}
