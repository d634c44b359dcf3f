//! Conversion result types.
//!
//! [`ConversionOutput`] carries the PDF bytes, the intermediate HTML, and a
//! [`ConversionStats`] record. Exposing the intermediate HTML lets tests and
//! debugging tools inspect the transform stage in isolation from the render
//! engine; the stats struct lets callers assert on what happened
//! programmatically instead of parsing console text.

use serde::{Deserialize, Serialize};

/// The first bytes of every valid PDF file.
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Result of a successful conversion.
pub struct ConversionOutput {
    /// The rendered PDF byte stream.
    pub pdf: Vec<u8>,
    /// The complete HTML document handed to the render engine
    /// (fragment + template, after asset inlining).
    pub html: String,
    /// Counters and timings collected during the run.
    pub stats: ConversionStats,
}

impl ConversionOutput {
    /// True when the PDF bytes start with the `%PDF-` magic header.
    pub fn has_pdf_magic(&self) -> bool {
        self.pdf.starts_with(PDF_MAGIC)
    }
}

impl std::fmt::Debug for ConversionOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionOutput")
            .field("pdf", &format_args!("<{} bytes>", self.pdf.len()))
            .field("html", &format_args!("<{} bytes>", self.html.len()))
            .field("stats", &self.stats)
            .finish()
    }
}

/// Counters and timings for one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Bytes of Markdown read from the input file.
    pub input_bytes: usize,
    /// Bytes of the HTML fragment produced by the transform stage.
    pub fragment_bytes: usize,
    /// Bytes of the wrapped HTML document handed to the renderer.
    pub html_bytes: usize,
    /// Bytes of the rendered PDF.
    pub pdf_bytes: usize,
    /// Remote images successfully fetched and inlined.
    pub assets_fetched: usize,
    /// Remote images that failed to fetch (left un-inlined, non-fatal).
    pub assets_failed: usize,
    /// Warnings emitted by the render engine during layout.
    pub render_warnings: usize,
    /// Wall-clock time of the transform stage (parse + wrap + assets).
    pub transform_duration_ms: u64,
    /// Wall-clock time of the render stage.
    pub render_duration_ms: u64,
    /// Wall-clock time of the whole pipeline.
    pub total_duration_ms: u64,
}
