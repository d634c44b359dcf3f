//! End-to-end integration tests for mdpress.
//!
//! Every test runs the real pipeline against files in a temporary
//! directory; nothing here touches the network (remote assets are disabled
//! throughout, so the tests stay deterministic and offline).

use mdpress::{
    convert, convert_to_file, MdPressError, Orientation, PaperSize, PipelineProgressCallback,
    ProgressCallback, RenderConfig, Stage, PDF_MAGIC,
};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn offline_config() -> RenderConfig {
    RenderConfig::builder().remote_assets(false).build().unwrap()
}

fn write_markdown(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const SAMPLE_MD: &str = "\
# Project Documentation

Some **bold** and *italic* text with `inline code`.

## Table

| Feature | Status |
|---------|--------|
| Tables  | done   |
| Rules   | done   |

---

```rust
fn main() { println!(\"hi\"); }
```
";

/// Assert the bytes look like a plausible PDF document.
fn assert_valid_pdf(bytes: &[u8], context: &str) {
    assert!(
        bytes.starts_with(PDF_MAGIC),
        "[{context}] Output must start with %PDF-, got {:?}",
        &bytes[..bytes.len().min(8)]
    );
    assert!(
        bytes.len() > 200,
        "[{context}] Output suspiciously small: {} bytes",
        bytes.len()
    );
}

// ── Conversion tests ─────────────────────────────────────────────────────────

#[test]
fn well_formed_markdown_produces_valid_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", SAMPLE_MD);

    let output = convert(&input, &offline_config()).unwrap();

    assert_valid_pdf(&output.pdf, "sample");
    assert!(output.has_pdf_magic());
    // Transform stage fidelity: the intermediate HTML must carry the parsed
    // structure and the fixed template.
    assert!(output.html.contains("<h1>Project Documentation</h1>"));
    assert!(output.html.contains("<table>"));
    assert!(output.html.contains("charset=utf-8"));
}

#[test]
fn empty_input_yields_minimal_pdf_not_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "empty.md", "");

    let output = convert(&input, &offline_config()).unwrap();

    assert_valid_pdf(&output.pdf, "empty");
    assert_eq!(output.stats.input_bytes, 0);
    assert_eq!(output.stats.fragment_bytes, 0);
}

#[test]
fn missing_input_fails_without_creating_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does-not-exist.md");
    let out = dir.path().join("out").join("doc.pdf");

    let err = convert_to_file(&input, &out, &offline_config()).unwrap_err();

    assert!(matches!(err, MdPressError::InputNotFound { .. }));
    assert!(!out.exists(), "no output file may be created on failure");
    assert!(
        !out.parent().unwrap().exists(),
        "failure precedes directory creation"
    );
}

#[test]
fn missing_output_directory_is_created_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", "# Hi");
    let out = dir.path().join("public").join("assets").join("doc.pdf");

    convert_to_file(&input, &out, &offline_config()).unwrap();

    assert!(out.parent().unwrap().is_dir());
    assert_valid_pdf(&std::fs::read(&out).unwrap(), "created-dir");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(out.parent().unwrap())
            .unwrap()
            .permissions()
            .mode()
            & 0o777;
        assert_eq!(mode & 0o700, 0o700, "owner bits must survive, got {mode:o}");
    }
}

#[test]
fn rerun_overwrites_with_latest_content() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("doc.pdf");

    let first = write_markdown(dir.path(), "a.md", "# First version");
    convert_to_file(&first, &out, &offline_config()).unwrap();
    let first_bytes = std::fs::read(&out).unwrap();

    let second = write_markdown(
        dir.path(),
        "b.md",
        "# Second version\n\nWith considerably more paragraph content than before.\n",
    );
    convert_to_file(&second, &out, &offline_config()).unwrap();
    let second_bytes = std::fs::read(&out).unwrap();

    assert_valid_pdf(&second_bytes, "overwrite");
    assert_ne!(
        first_bytes, second_bytes,
        "re-run must reflect the latest input, not stale content"
    );
}

#[test]
fn render_stage_failure_leaves_no_output_file() {
    // Raw HTML passes through the transform stage untouched, so this drives
    // deeply nested unclosed markup into the layout engine. The engine is
    // tolerant and may still lay it out; the guarantee under test holds in
    // both cases: on failure the error is Render-class and nothing reaches
    // disk, on success the file is a complete PDF — never a partial file.
    let dir = tempfile::tempdir().unwrap();
    let broken: String = "<div><span><table><tr><td>unclosed\n".repeat(60);
    let input = write_markdown(dir.path(), "broken.md", &broken);
    let out = dir.path().join("render-out").join("broken.pdf");

    match convert_to_file(&input, &out, &offline_config()) {
        Ok(_) => {
            assert_valid_pdf(&std::fs::read(&out).unwrap(), "tolerated-markup");
        }
        Err(e) => {
            assert!(matches!(e, MdPressError::Render { .. }), "got {e:?}");
            assert!(!out.exists(), "render failure must not leave a file");
            assert!(
                !out.parent().unwrap().exists(),
                "render failure precedes directory creation"
            );
        }
    }
}

#[test]
fn paper_and_orientation_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", "# Wide");

    let config = RenderConfig::builder()
        .remote_assets(false)
        .paper_size(PaperSize::Letter)
        .orientation(Orientation::Landscape)
        .build()
        .unwrap();

    let output = convert(&input, &config).unwrap();
    assert_valid_pdf(&output.pdf, "landscape-letter");
}

// ── Stats and intermediate-output tests ──────────────────────────────────────

#[test]
fn stats_are_internally_consistent() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", SAMPLE_MD);

    let output = convert(&input, &offline_config()).unwrap();
    let s = &output.stats;

    assert_eq!(s.input_bytes, SAMPLE_MD.len());
    assert_eq!(s.pdf_bytes, output.pdf.len());
    assert_eq!(s.html_bytes, output.html.len());
    assert!(s.html_bytes > s.fragment_bytes, "template adds the shell");
    assert!(s.total_duration_ms >= s.render_duration_ms);
    assert_eq!(s.assets_fetched, 0);
    assert_eq!(s.assets_failed, 0);
}

#[test]
fn remote_assets_disabled_means_no_rewriting() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(
        dir.path(),
        "doc.md",
        "![badge](https://example.invalid/badge.png)\n",
    );

    let output = convert(&input, &offline_config()).unwrap();

    // The tag survives untouched and nothing was fetched.
    assert!(output
        .html
        .contains(r#"src="https://example.invalid/badge.png""#));
    assert_eq!(output.stats.assets_fetched, 0);
    assert_eq!(output.stats.assets_failed, 0);
}

#[test]
fn custom_font_reaches_the_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", "body text");

    let config = RenderConfig::builder()
        .remote_assets(false)
        .default_font("Noto Sans")
        .build()
        .unwrap();

    let output = convert(&input, &config).unwrap();
    assert!(output.html.contains("Noto Sans, sans-serif"));
}

// ── Progress-callback tests ──────────────────────────────────────────────────

struct RecordingCallback {
    stages: Mutex<Vec<Stage>>,
    completes: AtomicUsize,
}

impl PipelineProgressCallback for RecordingCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.stages.lock().unwrap().push(stage);
    }

    fn on_stage_complete(&self, _stage: Stage, _detail: &str) {
        self.completes.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn driver_reports_all_stages_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_markdown(dir.path(), "doc.md", "# Staged");
    let out = dir.path().join("doc.pdf");

    let recorder = Arc::new(RecordingCallback {
        stages: Mutex::new(Vec::new()),
        completes: AtomicUsize::new(0),
    });

    let config = RenderConfig::builder()
        .remote_assets(false)
        .progress_callback(Arc::clone(&recorder) as ProgressCallback)
        .build()
        .unwrap();

    convert_to_file(&input, &out, &config).unwrap();

    let stages = recorder.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            Stage::Bootstrap,
            Stage::Preflight,
            Stage::Transform,
            Stage::Render,
            Stage::Persist,
        ]
    );
    assert_eq!(recorder.completes.load(Ordering::SeqCst), 5);
}

#[test]
fn failure_stops_before_later_stages() {
    let recorder = Arc::new(RecordingCallback {
        stages: Mutex::new(Vec::new()),
        completes: AtomicUsize::new(0),
    });

    let config = RenderConfig::builder()
        .remote_assets(false)
        .progress_callback(Arc::clone(&recorder) as ProgressCallback)
        .build()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let err = convert(dir.path().join("absent.md"), &config).unwrap_err();
    assert!(matches!(err, MdPressError::InputNotFound { .. }));

    let stages = recorder.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![Stage::Bootstrap, Stage::Preflight],
        "pre-flight failure must abort transform, render, and persist"
    );
}
