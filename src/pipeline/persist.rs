//! Output-directory creation and the final write.
//!
//! The write is direct, not atomic: an existing file at the output path is
//! overwritten without warning, and a failure mid-write can leave a
//! truncated file behind. That matches the behaviour this pipeline
//! specifies; callers needing replace-on-success semantics can write to a
//! sibling path and rename afterwards.

use crate::error::MdPressError;
use std::path::Path;
use tracing::{debug, info};

/// Mode applied to created output directories on Unix (rwxrwxr-x).
#[cfg(unix)]
const OUTPUT_DIR_MODE: u32 = 0o775;

/// Ensure the directory exists, creating it recursively when missing.
///
/// Idempotent: an already-existing directory is a no-op.
pub fn ensure_output_dir(dir: &Path) -> Result<(), MdPressError> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }

    info!("Output directory missing, creating {}", dir.display());

    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(OUTPUT_DIR_MODE);
    }
    builder.create(dir).map_err(|e| MdPressError::OutputDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Write the PDF bytes to the output path, creating the parent directory
/// first when needed.
pub fn write_artifact(bytes: &[u8], path: &Path) -> Result<(), MdPressError> {
    if let Some(parent) = path.parent() {
        ensure_output_dir(parent)?;
    }

    std::fs::write(path, bytes).map_err(|e| MdPressError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
