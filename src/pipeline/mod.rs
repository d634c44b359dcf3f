//! Pipeline stages for Markdown-to-PDF conversion.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap an
//! implementation (e.g. a different render backend) without touching the
//! others.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ transform ──▶ template ──▶ assets ──▶ render ──▶ persist
//! (read md)  (md→html)    (wrap+css)  (inline)   (printpdf)  (write)
//! ```
//!
//! 1. [`bootstrap`] — render-engine self-check, run before any file I/O
//! 2. [`input`]     — pre-flight validation and source read
//! 3. [`transform`] — Markdown → HTML fragment via pulldown-cmark
//! 4. [`template`]  — wrap the fragment in the fixed print-styled document
//! 5. [`assets`]    — fetch remote images and inline them as data URIs
//! 6. [`render`]    — HTML document → PDF bytes via printpdf
//! 7. [`persist`]   — output-directory creation and final write
//!
//! Every stage consumes the previous stage's sole output and produces
//! exactly one output; a failure in any stage aborts the rest.

pub mod assets;
pub mod bootstrap;
pub mod input;
pub mod persist;
pub mod render;
pub mod template;
pub mod transform;
