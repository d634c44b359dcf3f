//! Progress-callback trait for stage-boundary events.
//!
//! Inject an [`Arc<dyn PipelineProgressCallback>`] via
//! [`crate::config::RenderConfigBuilder::progress_callback`] to receive an
//! event as each pipeline stage starts and completes. The CLI binary uses
//! this to drive its terminal output; library callers can forward events to
//! whatever channel the host application uses, without the library knowing
//! anything about it.
//!
//! The pipeline itself is single-threaded, but the trait is `Send + Sync`
//! so a callback can be shared with other threads of the host application
//! (a UI thread polling state, for example).

use std::fmt;
use std::sync::Arc;

/// The five sequential stages of the conversion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Render-engine self-check before any file I/O.
    Bootstrap,
    /// Input readability check and source read.
    Preflight,
    /// Markdown → HTML fragment → wrapped document (and asset inlining).
    Transform,
    /// HTML document → PDF bytes.
    Render,
    /// PDF bytes → output file.
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Bootstrap => "bootstrap",
            Stage::Preflight => "pre-flight checks",
            Stage::Transform => "markdown transform",
            Stage::Render => "pdf render",
            Stage::Persist => "write output",
        };
        f.write_str(name)
    }
}

/// Called by the pipeline driver at each stage boundary.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait PipelineProgressCallback: Send + Sync {
    /// Called once when a stage begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when a stage completes successfully.
    ///
    /// `detail` is a short human-readable note, e.g. "4312 bytes read".
    fn on_stage_complete(&self, stage: Stage, detail: &str) {
        let _ = (stage, detail);
    }

    /// Called for each remote asset successfully fetched and inlined.
    fn on_asset_fetched(&self, url: &str, bytes: usize) {
        let _ = (url, bytes);
    }

    /// Called for each remote asset that could not be fetched.
    ///
    /// Asset failures are never fatal; the document renders without the
    /// image.
    fn on_asset_failed(&self, url: &str, error: &str) {
        let _ = (url, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl PipelineProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::RenderConfig`].
pub type ProgressCallback = Arc<dyn PipelineProgressCallback>;
