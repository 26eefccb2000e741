//! Output artifact writing.
//!
//! The rendered document arrives as a complete in-memory string; the only
//! job here is putting it on disk without ever exposing a half-written
//! artifact. The document lands in a sibling temp file first and is renamed
//! into place, so the output path always holds either the previous artifact
//! or the complete new one.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Writes the figure document to its final path.
///
/// Missing parent directories are created. The temp file is removed again
/// if the final rename fails.
pub fn write_figure(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, document)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("figure"));
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_document_to_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accuracy.svg");
        write_figure(&path, "<svg></svg>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg></svg>");
    }

    #[test]
    fn test_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("figures").join("nested").join("accuracy.svg");
        write_figure(&path, "<svg></svg>").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accuracy.svg");
        write_figure(&path, "<svg></svg>").unwrap();
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn test_replaces_an_existing_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("accuracy.svg");
        write_figure(&path, "old").unwrap();
        write_figure(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }
}
