//! Preserving previous output
//!
//! Before a run writes into a directory, any existing directory at that path
//! is moved aside to `<path>_<YYYY_MM_DD_HH_MM_SS>`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Error, Result};

/// Timestamp format appended to archived directories
pub const ARCHIVE_SUFFIX_FORMAT: &str = "%Y_%m_%d_%H_%M_%S";

/// The path a directory is archived to at the current local time
pub fn archive_path(path: &Path) -> PathBuf {
    let suffix = Local::now().format(ARCHIVE_SUFFIX_FORMAT);
    let mut archived = path.as_os_str().to_os_string();
    archived.push(format!("_{}", suffix));
    PathBuf::from(archived)
}

/// Move an existing output directory aside
///
/// Returns the new location, or `None` when there was no directory to move.
/// A path that cannot be inspected is treated as absent; only a failed rename
/// is an error.
pub fn archive(path: &Path) -> Result<Option<PathBuf>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Nothing to archive");
            return Ok(None);
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Cannot inspect output path, not archiving"
            );
            return Ok(None);
        }
    };

    if !metadata.is_dir() {
        tracing::debug!(path = %path.display(), "Not a directory, skipping archive");
        return Ok(None);
    }

    let target = archive_path(path);
    fs::rename(path, &target).map_err(|e| Error::ArchiveError {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(
        from = %path.display(),
        to = %target.display(),
        "Archived previous output"
    );

    Ok(Some(target))
}
