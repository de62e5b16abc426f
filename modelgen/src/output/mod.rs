//! Writing generated files to disk

pub mod archive;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

pub use archive::archive;

/// What a generation run left on disk
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Where the previous output was moved, if there was any
    pub archived_to: Option<PathBuf>,
    /// Files written, in write order
    pub files: Vec<PathBuf>,
}

/// Write one file into `dir`, returning its path
pub fn write_file(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote file");
    Ok(path)
}
