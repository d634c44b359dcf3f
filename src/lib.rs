//! # mdpress
//!
//! Convert a Markdown document to a print-styled PDF.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Bootstrap  render-engine self-check before any file I/O
//!  ├─ 2. Pre-flight input readable, output directory creatable
//!  ├─ 3. Transform  markdown → HTML fragment → fixed print template
//!  ├─ 4. Render     HTML → PDF bytes (printpdf layout engine)
//!  └─ 5. Persist    direct write to the output path
//! ```
//!
//! Markdown parsing follows pulldown-cmark's CommonMark + GFM-extension
//! rules; PDF layout is delegated entirely to printpdf's HTML engine. The
//! pipeline is strictly sequential and synchronous: every stage consumes the
//! previous stage's sole output, the first failure aborts the run, and a
//! render failure can never leave a partial file on disk.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mdpress::{convert_to_file, RenderConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::default();
//!     let stats = convert_to_file("documentation.md", "public/assets/documentation.pdf", &config)?;
//!     eprintln!("{} bytes of PDF in {}ms", stats.pdf_bytes, stats.total_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `mdpress` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! mdpress = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod progress;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{Orientation, PaperSize, RenderConfig, RenderConfigBuilder};
pub use convert::{convert, convert_to_file};
pub use error::MdPressError;
pub use output::{ConversionOutput, ConversionStats, PDF_MAGIC};
pub use progress::{NoopProgressCallback, PipelineProgressCallback, ProgressCallback, Stage};
