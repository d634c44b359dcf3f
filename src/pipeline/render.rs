//! HTML → PDF via printpdf's HTML layout engine.
//!
//! Rendering is synchronous and blocking from the caller's perspective and
//! can take non-trivial wall-clock time for large documents; no timeout is
//! enforced here — a caller that needs one must impose it externally. A
//! layout failure is terminal for the invocation: the engine's own message
//! is propagated inside [`MdPressError::Render`] and nothing is retried.
//!
//! Image and font maps are passed empty on purpose: remote images were
//! already inlined as data URIs by the asset stage, and fonts resolve to the
//! engine's built-in families through the template's CSS.

use crate::config::RenderConfig;
use crate::error::MdPressError;
use crate::output::PDF_MAGIC;
use printpdf::{GeneratePdfOptions, PdfDocument, PdfSaveOptions};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Rendered PDF bytes plus the engine's warning count.
pub struct RenderedArtifact {
    pub bytes: Vec<u8>,
    pub warnings: usize,
}

/// Render a complete HTML document string to PDF bytes.
pub fn render_pdf(html: &str, config: &RenderConfig) -> Result<RenderedArtifact, MdPressError> {
    let (width_mm, height_mm) = config.page_dimensions_mm();
    let options = GeneratePdfOptions {
        page_width: Some(width_mm),
        page_height: Some(height_mm),
        ..Default::default()
    };

    let images = BTreeMap::new();
    let fonts = BTreeMap::new();
    let mut layout_warnings = Vec::new();

    let doc = PdfDocument::from_html(html, &images, &fonts, &options, &mut layout_warnings)
        .map_err(|e| MdPressError::Render {
            detail: e.to_string(),
        })?;

    let mut save_warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut save_warnings);

    let warnings = layout_warnings.len() + save_warnings.len();
    if warnings > 0 {
        warn!("Render engine emitted {warnings} warning(s)");
    }

    verify_pdf_header(&bytes)?;

    debug!(
        "Rendered {} bytes of HTML into {} bytes of PDF ({}×{} mm)",
        html.len(),
        bytes.len(),
        width_mm,
        height_mm
    );

    Ok(RenderedArtifact { bytes, warnings })
}

/// Guard against an engine run that returns without error but without a PDF.
fn verify_pdf_header(bytes: &[u8]) -> Result<(), MdPressError> {
    if bytes.starts_with(PDF_MAGIC) {
        Ok(())
    } else {
        Err(MdPressError::Render {
            detail: "engine produced a byte stream without a PDF header".into(),
        })
    }
}
