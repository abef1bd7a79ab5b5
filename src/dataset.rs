//! Downloaded bulk dataset payloads
//!
//! Passenger volume datasets arrive as ZIP archives holding a single CSV;
//! traffic flow arrives as JSON. [`DatasetFile`] keeps the raw bytes together
//! with the filename taken from the signed link and offers read-only access
//! to archive members.

use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use crate::utils::get_unique_path;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Local file header signature every ZIP archive starts with
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// A downloaded dataset: raw payload plus the filename from its link
#[derive(Clone, PartialEq, Eq)]
pub struct DatasetFile {
    /// Last path segment of the signed link, percent-decoded
    pub filename: String,
    /// Payload exactly as served
    pub bytes: Vec<u8>,
}

/// One member of a ZIP dataset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path of the member inside the archive
    pub name: String,
    /// Uncompressed size in bytes
    pub size: u64,
}

impl std::fmt::Debug for DatasetFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetFile")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl DatasetFile {
    /// Wrap a payload
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Payload size in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Whether the payload looks like a ZIP archive
    pub fn is_zip(&self) -> bool {
        self.bytes.starts_with(ZIP_MAGIC)
    }

    fn archive(&self) -> Result<ZipArchive<Cursor<&[u8]>>> {
        if !self.is_zip() {
            return Err(Error::Archive(format!("{} is not a ZIP archive", self.filename)));
        }
        Ok(ZipArchive::new(Cursor::new(self.bytes.as_slice()))?)
    }

    /// Members of the archive, in archive order
    pub fn entries(&self) -> Result<Vec<ArchiveEntry>> {
        let mut archive = self.archive()?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            entries.push(ArchiveEntry {
                name: file.name().to_string(),
                size: file.size(),
            });
        }
        Ok(entries)
    }

    /// Uncompressed contents of the member called `name`
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive()?;
        let mut file = archive.by_name(name)?;
        let mut contents = Vec::with_capacity(usize::try_from(file.size()).unwrap_or(0));
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Name and text of the first `.csv` member
    ///
    /// A leading UTF-8 byte order mark is stripped.
    pub fn first_csv(&self) -> Result<(String, String)> {
        let name = self
            .entries()?
            .into_iter()
            .map(|entry| entry.name)
            .find(|name| name.to_ascii_lowercase().ends_with(".csv"))
            .ok_or_else(|| Error::Archive(format!("{} contains no CSV file", self.filename)))?;

        let bytes = self.read_entry(&name)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::Archive(format!("{name} is not valid UTF-8: {e}")))?;
        let text = match text.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };
        Ok((name, text))
    }

    /// Write the payload into `dir` under its filename
    ///
    /// Returns the path written, which differs from `dir/filename` when
    /// `action` is [`FileCollisionAction::Rename`] and the name is taken.
    pub async fn save(&self, dir: impl AsRef<Path>, action: FileCollisionAction) -> Result<PathBuf> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let path = get_unique_path(&dir.join(&self.filename), action)?;
        tokio::fs::write(&path, &self.bytes).await?;

        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved dataset");
        Ok(path)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;

    fn zip_with(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn lists_and_reads_members() {
        let file = DatasetFile::new(
            "transport_node_bus_202406.zip",
            zip_with(&[
                ("README.txt", b"notes".as_slice()),
                ("transport_node_bus_202406.csv", b"YEAR_MONTH,DAY_TYPE\n2024-06,WEEKDAY\n".as_slice()),
            ]),
        );

        assert!(file.is_zip());
        let entries = file.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "transport_node_bus_202406.csv");
        assert_eq!(file.read_entry("README.txt").unwrap(), b"notes");
    }

    #[test]
    fn first_csv_strips_bom() {
        let file = DatasetFile::new(
            "pv.zip",
            zip_with(&[("pv.CSV", "\u{feff}YEAR_MONTH\n2024-06\n".as_bytes())]),
        );
        let (name, text) = file.first_csv().unwrap();
        assert_eq!(name, "pv.CSV");
        assert!(text.starts_with("YEAR_MONTH"));
    }

    #[test]
    fn missing_member_is_archive_error() {
        let file = DatasetFile::new("pv.zip", zip_with(&[("a.txt", b"a".as_slice())]));
        assert!(matches!(file.read_entry("b.txt"), Err(Error::Archive(_))));
        assert!(matches!(file.first_csv(), Err(Error::Archive(_))));
    }

    #[test]
    fn non_zip_payload_is_archive_error() {
        let file = DatasetFile::new("flow.json", br#"{"value": []}"#.to_vec());
        assert!(!file.is_zip());
        assert!(matches!(file.entries(), Err(Error::Archive(_))));
    }

    #[tokio::test]
    async fn save_renames_on_collision() {
        let dir = TempDir::new().unwrap();
        let file = DatasetFile::new("pv.zip", b"PK\x03\x04data".to_vec());

        let first = file.save(dir.path(), FileCollisionAction::Rename).await.unwrap();
        let second = file.save(dir.path(), FileCollisionAction::Rename).await.unwrap();

        assert_eq!(first, dir.path().join("pv.zip"));
        assert_eq!(second, dir.path().join("pv (1).zip"));
        assert_eq!(std::fs::read(&second).unwrap(), file.bytes);
    }

    #[tokio::test]
    async fn save_skip_refuses_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = DatasetFile::new("pv.zip", b"one".to_vec());
        file.save(dir.path(), FileCollisionAction::Skip).await.unwrap();

        let result = file.save(dir.path(), FileCollisionAction::Skip).await;
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn save_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("datasets").join("2024");
        let file = DatasetFile::new("flow.json", b"{}".to_vec());

        let path = file.save(&nested, FileCollisionAction::Overwrite).await.unwrap();
        assert_eq!(path, nested.join("flow.json"));
    }
}
