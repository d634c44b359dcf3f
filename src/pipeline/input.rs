//! Pre-flight validation and source read.
//!
//! Existence and readability are checked by actually opening the file, so
//! there is no TOCTOU gap between the check and the read. The content is
//! assumed to be UTF-8; invalid sequences are replaced rather than rejected,
//! because a stray byte in a large document should not abort the whole
//! conversion.

use crate::error::MdPressError;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The source document: path plus raw Markdown text.
///
/// Read once at pipeline start, held in memory, discarded after the
/// transform stage.
#[derive(Debug)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

/// Validate the input path and read its content.
pub fn read_source(path: &Path) -> Result<SourceDocument, MdPressError> {
    if !path.exists() {
        return Err(MdPressError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => MdPressError::PermissionDenied {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::NotFound => MdPressError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => MdPressError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| MdPressError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

    let text = String::from_utf8_lossy(&bytes).into_owned();
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(SourceDocument {
        path: path.to_path_buf(),
        text,
    })
}
