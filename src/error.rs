//! Error types for the mdpress library.
//!
//! One public enum covers every way a conversion can fail. Each variant is
//! **terminal**: nothing is retried or recovered internally, and the pipeline
//! driver aborts at the first error. The split into variants exists so that
//! callers (tests, other tools) can match on the failure *kind* instead of
//! parsing message text.
//!
//! Remote-asset fetch failures are deliberately absent here — a missing
//! external image degrades the output but never kills the run, so those are
//! logged and counted in [`crate::output::ConversionStats`] instead.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the mdpress library.
#[derive(Debug, Error)]
pub enum MdPressError {
    // ── Bootstrap errors ──────────────────────────────────────────────────
    /// The PDF engine failed its self-check before any file I/O began.
    #[error("PDF render engine unavailable: {detail}\nThis indicates a broken build of the render backend; reinstall mdpress.")]
    EngineUnavailable { detail: String },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Input file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file exists but reading its content failed.
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Could not write the PDF bytes to the output path.
    #[error("Failed to write PDF to '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The engine could not lay out the HTML document.
    ///
    /// Carries the engine's own message; typical causes are malformed raw
    /// HTML passed through from the Markdown source or CSS the engine does
    /// not support.
    #[error("PDF rendering failed: {detail}")]
    Render { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
