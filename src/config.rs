//! Configuration types for Markdown-to-PDF conversion.
//!
//! All conversion behaviour is controlled through [`RenderConfig`], built via
//! its [`RenderConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to run the same pipeline against different inputs from a library
//! context and to diff two runs to understand why their outputs differ.
//!
//! The HTML document template itself is *not* configurable — it is a fixed
//! print stylesheet (see [`crate::pipeline::template`]). The only value the
//! template takes from this config is the default font family.

use crate::error::MdPressError;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical page dimensions for the rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    /// 210 × 297 mm (default).
    #[default]
    A4,
    /// 215.9 × 279.4 mm.
    Letter,
    /// 215.9 × 355.6 mm.
    Legal,
    /// 297 × 420 mm.
    A3,
    /// 148 × 210 mm.
    A5,
}

impl PaperSize {
    /// Portrait (width, height) in millimetres.
    pub fn dimensions_mm(self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A5 => (148.0, 210.0),
        }
    }
}

/// Page layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Height exceeds width (default).
    #[default]
    Portrait,
    /// Width exceeds height.
    Landscape,
}

/// Configuration for a single Markdown-to-PDF conversion.
///
/// Fixed at invocation; the pipeline never mutates it at runtime.
///
/// # Example
/// ```rust
/// use mdpress::{PaperSize, RenderConfig};
///
/// let config = RenderConfig::builder()
///     .paper_size(PaperSize::Letter)
///     .remote_assets(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct RenderConfig {
    /// Paper size for every page of the output. Default: [`PaperSize::A4`].
    pub paper_size: PaperSize,

    /// Page orientation. Default: [`Orientation::Portrait`].
    pub orientation: Orientation,

    /// Fetch externally referenced images before rendering. Default: true.
    ///
    /// Documentation commonly references badges and diagrams by URL.
    /// Fetched bytes are inlined as base64 data URIs so the render engine
    /// itself never touches the network. When false, no network I/O occurs
    /// anywhere in the pipeline and remote `<img>` tags render as missing.
    pub remote_assets: bool,

    /// Fallback font family for glyph coverage. Default: "DejaVu Sans".
    ///
    /// Injected into the document template's body rule ahead of the generic
    /// `sans-serif` fallback. A Unicode-capable family keeps symbols and
    /// non-Latin text from rendering as tofu boxes.
    pub default_font: String,

    /// Per-asset fetch timeout in seconds. Default: 30.
    pub asset_timeout_secs: u64,

    /// Maximum accepted size of a single fetched asset in bytes. Default: 8 MiB.
    ///
    /// A hot-linked image of unbounded size would otherwise be inlined into
    /// the HTML string and held in memory twice (raw + base64).
    pub max_asset_bytes: usize,

    /// Optional progress callback invoked at stage boundaries.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            remote_assets: true,
            default_font: "DejaVu Sans".to_string(),
            asset_timeout_secs: 30,
            max_asset_bytes: 8 * 1024 * 1024,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for RenderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderConfig")
            .field("paper_size", &self.paper_size)
            .field("orientation", &self.orientation)
            .field("remote_assets", &self.remote_assets)
            .field("default_font", &self.default_font)
            .field("asset_timeout_secs", &self.asset_timeout_secs)
            .field("max_asset_bytes", &self.max_asset_bytes)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }

    /// Page (width, height) in millimetres after applying the orientation.
    pub fn page_dimensions_mm(&self) -> (f32, f32) {
        let (w, h) = self.paper_size.dimensions_mm();
        match self.orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn paper_size(mut self, size: PaperSize) -> Self {
        self.config.paper_size = size;
        self
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    pub fn remote_assets(mut self, enabled: bool) -> Self {
        self.config.remote_assets = enabled;
        self
    }

    pub fn default_font(mut self, font: impl Into<String>) -> Self {
        self.config.default_font = font.into();
        self
    }

    pub fn asset_timeout_secs(mut self, secs: u64) -> Self {
        self.config.asset_timeout_secs = secs;
        self
    }

    pub fn max_asset_bytes(mut self, bytes: usize) -> Self {
        self.config.max_asset_bytes = bytes;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, MdPressError> {
        let c = &self.config;
        if c.default_font.trim().is_empty() {
            return Err(MdPressError::InvalidConfig(
                "default_font must not be empty".into(),
            ));
        }
        // Quotes would break out of the font-family CSS declaration the
        // template injects this value into.
        if c.default_font.contains(['"', '\'', ';', '}']) {
            return Err(MdPressError::InvalidConfig(format!(
                "default_font contains characters not valid in a CSS font family: '{}'",
                c.default_font
            )));
        }
        if c.asset_timeout_secs == 0 {
            return Err(MdPressError::InvalidConfig(
                "asset_timeout_secs must be ≥ 1".into(),
            ));
        }
        if c.max_asset_bytes == 0 {
            return Err(MdPressError::InvalidConfig(
                "max_asset_bytes must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}
