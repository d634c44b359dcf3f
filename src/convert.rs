//! Pipeline driver: the top-level conversion entry points.
//!
//! Orchestrates bootstrap → pre-flight → transform → render → persist in
//! strict sequence. Any failure aborts the remaining stages, so a render
//! failure can never leave a partial PDF behind — the write stage simply
//! never runs. Each stage boundary is reported through `tracing` and the
//! optional progress callback.

use crate::config::RenderConfig;
use crate::error::MdPressError;
use crate::output::{ConversionOutput, ConversionStats};
use crate::pipeline::{assets, bootstrap, input, persist, render, template, transform};
use crate::progress::Stage;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Convert a Markdown file to PDF bytes held in memory.
///
/// This is the primary library entry point. The returned
/// [`ConversionOutput`] carries the PDF, the intermediate HTML document, and
/// run statistics; nothing is written to disk.
///
/// # Errors
/// Any stage failure is returned as an [`MdPressError`]; see the error
/// enum for the full taxonomy. Remote-asset fetch failures are *not*
/// errors — they are counted in `stats.assets_failed`.
pub fn convert(
    input_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<ConversionOutput, MdPressError> {
    let input_path = input_path.as_ref();
    let total_start = Instant::now();
    let cb = config.progress_callback.as_deref();
    info!("Starting conversion of {}", input_path.display());

    // ── Stage 1: Bootstrap ───────────────────────────────────────────────
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Bootstrap);
    }
    bootstrap::verify_render_engine()?;
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Bootstrap, "engine ready");
    }

    // ── Stage 2: Pre-flight and read ─────────────────────────────────────
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Preflight);
    }
    let source = input::read_source(input_path)?;
    let input_bytes = source.text.len();
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Preflight, &format!("{input_bytes} bytes read"));
    }

    // ── Stage 3: Transform, wrap, inline assets ──────────────────────────
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Transform);
    }
    let transform_start = Instant::now();
    let fragment = transform::to_fragment(&source.text);
    let fragment_bytes = fragment.len();
    let wrapped = template::wrap_fragment(&fragment, &config.default_font);
    let (html, asset_report) = assets::inline_remote_images(&wrapped, config);
    let transform_duration_ms = transform_start.elapsed().as_millis() as u64;
    info!(
        "Transformed markdown in {transform_duration_ms}ms ({} assets inlined, {} failed)",
        asset_report.fetched, asset_report.failed
    );
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Transform, &format!("{} bytes of HTML", html.len()));
    }

    // ── Stage 4: Render ──────────────────────────────────────────────────
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Render);
    }
    let render_start = Instant::now();
    let artifact = render::render_pdf(&html, config)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    info!(
        "Rendered {} bytes of PDF in {render_duration_ms}ms",
        artifact.bytes.len()
    );
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Render, &format!("{} bytes", artifact.bytes.len()));
    }

    let stats = ConversionStats {
        input_bytes,
        fragment_bytes,
        html_bytes: html.len(),
        pdf_bytes: artifact.bytes.len(),
        assets_fetched: asset_report.fetched,
        assets_failed: asset_report.failed,
        render_warnings: artifact.warnings,
        transform_duration_ms,
        render_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    Ok(ConversionOutput {
        pdf: artifact.bytes,
        html,
        stats,
    })
}

/// Convert a Markdown file and write the PDF to `output_path`.
///
/// The output directory is created (recursively, mode 0775 on Unix) when
/// missing. An existing file at the output path is overwritten. Returns the
/// run statistics with the persist time folded into `total_duration_ms`.
pub fn convert_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<ConversionStats, MdPressError> {
    let output_path = output_path.as_ref();
    let total_start = Instant::now();
    let cb = config.progress_callback.as_deref();

    let output = convert(input_path, config)?;

    // ── Stage 5: Persist ─────────────────────────────────────────────────
    if let Some(cb) = cb {
        cb.on_stage_start(Stage::Persist);
    }
    persist::write_artifact(&output.pdf, output_path)?;
    info!(
        "Saved {} bytes to {}",
        output.pdf.len(),
        output_path.display()
    );
    if let Some(cb) = cb {
        cb.on_stage_complete(Stage::Persist, &output_path.display().to_string());
    }

    let mut stats = output.stats;
    stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    Ok(stats)
}
