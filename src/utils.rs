//! Filename extraction and output path helpers

use crate::config::FileCollisionAction;
use crate::error::{Error, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use url::Url;

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Filename used when a link has no usable last path segment
pub const FALLBACK_FILENAME: &str = "dataset";

/// Filename of a dataset link: its last path segment, percent-decoded
///
/// The signed query string is ignored. Path separators that appear after
/// decoding are replaced so the result is always a single path component.
///
/// # Examples
///
/// ```
/// use lta_datamall::utils::filename_from_url;
/// use url::Url;
///
/// let link = Url::parse("https://host/202406/origin_destination_bus_202406.zip?X-Amz-Expires=300").unwrap();
/// assert_eq!(filename_from_url(&link), "origin_destination_bus_202406.zip");
/// ```
pub fn filename_from_url(url: &Url) -> String {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let decoded = urlencoding::decode(segment)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name = decoded.replace(['/', '\\'], "_");
    let name = name.trim();

    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_FILENAME.to_string()
    } else {
        name.to_string()
    }
}

/// Get a unique path for a file, handling collisions according to `action`
///
/// `Rename` appends ` (1)`, ` (2)`, ... before the extension, `Overwrite`
/// returns the path unchanged and `Skip` fails if the file already exists.
///
/// # Examples
///
/// ```
/// use lta_datamall::utils::get_unique_path;
/// use lta_datamall::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/transport_node_bus_202406.zip");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// // If the file exists, returns /tmp/transport_node_bus_202406 (1).zip
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip => {
            if path.exists() {
                return Err(Error::Io(std::io::Error::new(
                    ErrorKind::AlreadyExists,
                    format!("{} already exists", path.display()),
                )));
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            let invalid = |reason: &str| {
                Error::Io(std::io::Error::new(
                    ErrorKind::InvalidInput,
                    format!("{}: {reason}", path.display()),
                ))
            };
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| invalid("cannot extract file stem"))?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path
                .parent()
                .ok_or_else(|| invalid("cannot extract parent directory"))?;

            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{stem} ({i}).{ext}"),
                    None => format!("{stem} ({i})"),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::Io(std::io::Error::new(
                ErrorKind::AlreadyExists,
                format!(
                    "no free name for {} after {MAX_RENAME_ATTEMPTS} attempts",
                    path.display()
                ),
            )))
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn name(link: &str) -> String {
        filename_from_url(&Url::parse(link).unwrap())
    }

    #[test]
    fn filename_is_last_segment_without_query() {
        assert_eq!(
            name("https://ltafarecard.s3.amazonaws.com/202406/transport_node_train_202406.zip?X-Amz-Algorithm=AWS4&X-Amz-Signature=abc"),
            "transport_node_train_202406.zip"
        );
    }

    #[test]
    fn filename_is_percent_decoded() {
        assert_eq!(name("https://host/data/traffic%20flow.json"), "traffic flow.json");
    }

    #[test]
    fn decoded_separators_cannot_escape_directory() {
        assert_eq!(name("https://host/x/..%2F..%2Fetc%2Fpasswd"), ".._.._etc_passwd");
        assert_eq!(name("https://host/x/%2E%2E"), FALLBACK_FILENAME);
    }

    #[test]
    fn filename_falls_back_when_no_segment() {
        assert_eq!(name("https://host"), FALLBACK_FILENAME);
        assert_eq!(name("https://host/dir/"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_get_unique_path_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.zip");

        for action in [
            FileCollisionAction::Rename,
            FileCollisionAction::Overwrite,
            FileCollisionAction::Skip,
        ] {
            assert_eq!(get_unique_path(&path, action).unwrap(), path);
        }
    }

    #[test]
    fn test_get_unique_path_rename_with_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.zip");
        fs::write(&path, "original").unwrap();

        let unique = get_unique_path(&path, FileCollisionAction::Rename).unwrap();
        assert_eq!(unique, temp_dir.path().join("test (1).zip"));

        fs::write(&unique, "first rename").unwrap();
        let unique2 = get_unique_path(&path, FileCollisionAction::Rename).unwrap();
        assert_eq!(unique2, temp_dir.path().join("test (2).zip"));
    }

    #[test]
    fn test_get_unique_path_rename_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dataset");
        fs::write(&path, "original").unwrap();

        let unique = get_unique_path(&path, FileCollisionAction::Rename).unwrap();
        assert_eq!(unique, temp_dir.path().join("dataset (1)"));
    }

    #[test]
    fn test_get_unique_path_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.zip");
        fs::write(&path, "original").unwrap();

        assert_eq!(
            get_unique_path(&path, FileCollisionAction::Overwrite).unwrap(),
            path
        );
    }

    #[test]
    fn test_get_unique_path_skip_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.zip");
        fs::write(&path, "original").unwrap();

        match get_unique_path(&path, FileCollisionAction::Skip) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), ErrorKind::AlreadyExists),
            other => panic!("expected AlreadyExists, got {other:?}"),
        }
    }
}
