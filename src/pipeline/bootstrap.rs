//! Render-engine self-check, run before any file I/O.
//!
//! Interpreted conversion tools check that their libraries can be loaded
//! before touching the input file. Rust links its dependencies at compile
//! time, so "loadable" is the wrong question — instead the check exercises
//! the engine once on a trivial document and verifies the output carries a
//! PDF header. A broken engine build fails here, with nothing half-done on
//! disk, rather than mid-pipeline.
//!
//! The check runs once per process; subsequent pipeline runs reuse the
//! cached verdict.

use crate::config::RenderConfig;
use crate::error::MdPressError;
use crate::output::PDF_MAGIC;
use crate::pipeline::{render, template};
use once_cell::sync::Lazy;
use tracing::debug;

static ENGINE_CHECK: Lazy<Result<(), String>> = Lazy::new(run_engine_check);

fn run_engine_check() -> Result<(), String> {
    let html = template::wrap_fragment("", "sans-serif");
    let config = RenderConfig {
        remote_assets: false,
        ..RenderConfig::default()
    };

    let artifact = render::render_pdf(&html, &config).map_err(|e| e.to_string())?;
    if !artifact.bytes.starts_with(PDF_MAGIC) {
        return Err("self-check output is missing the PDF header".to_string());
    }

    debug!(
        "Render engine self-check passed ({} bytes)",
        artifact.bytes.len()
    );
    Ok(())
}

/// Verify the Markdown parser and PDF engine are operational.
///
/// Cheap after the first call in a process.
pub fn verify_render_engine() -> Result<(), MdPressError> {
    ENGINE_CHECK
        .clone()
        .map_err(|detail| MdPressError::EngineUnavailable { detail })
}
