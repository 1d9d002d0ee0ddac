//! Log directory setup

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker that keeps the whole directory out of version control
pub const GITIGNORE_NAME: &str = ".gitignore";
const GITIGNORE_CONTENT: &str = "*";

/// Create the log directory (and parents) and its `.gitignore` marker.
///
/// Safe to call any number of times; an existing directory or marker is
/// left untouched.
pub fn ensure_log_dir(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| Error::io("failed to create log directory", path, e))?;

    let gitignore = path.join(GITIGNORE_NAME);
    if !gitignore.exists() {
        fs::write(&gitignore, GITIGNORE_CONTENT)
            .map_err(|e| Error::io("failed to write", &gitignore, e))?;
    }

    Ok(path.to_path_buf())
}
