//! CLI binary for mdpress.
//!
//! A thin shim over the library crate that maps CLI flags to `RenderConfig`,
//! drives the conversion, and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use mdpress::{
    convert_to_file, Orientation, PaperSize, PipelineProgressCallback, ProgressCallback,
    RenderConfig, Stage,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress: a spinner tracking the current stage, with a log line
/// printed as each stage completes. The render stage can take a while on
/// large documents, so live feedback matters more than the line count
/// suggests.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        Arc::new(Self { bar })
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl PipelineProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_message(format!("{stage}…"));
    }

    fn on_stage_complete(&self, stage: Stage, detail: &str) {
        self.bar
            .println(format!("  {} {stage}  {}", green("✓"), dim(detail)));
    }

    fn on_asset_fetched(&self, url: &str, bytes: usize) {
        self.bar
            .println(format!("    {} {url} {}", dim("↓"), dim(&format!("({bytes} bytes)"))));
    }

    fn on_asset_failed(&self, url: &str, error: &str) {
        self.bar
            .println(format!("    {} {url}  {}", red("✗"), red(error)));
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion (writes documentation.pdf next to the input)
  mdpress documentation.md

  # Explicit output path; missing directories are created (mode 0775)
  mdpress documentation.md -o public/assets/documentation.pdf

  # Letter paper, landscape
  mdpress report.md --paper letter --landscape -o report.pdf

  # Fully offline: never fetch remote images
  mdpress README.md --no-remote-assets -o readme.pdf

  # Machine-readable run statistics on stdout
  mdpress documentation.md --json -o out/doc.pdf

PAPER SIZES:
  a4 (default), letter, legal, a3, a5

REMOTE ASSETS:
  Images referenced by http(s) URL are fetched before rendering and inlined
  as data URIs, so the render engine itself never touches the network.
  A failed fetch is a warning, not an error — the document renders without
  that image. Disable all network I/O with --no-remote-assets.
"#;

/// Convert a Markdown file to a print-styled PDF.
#[derive(Parser, Debug)]
#[command(
    name = "mdpress",
    version,
    about = "Convert a Markdown file to a print-styled PDF",
    long_about = "Convert a single Markdown document to PDF. The document is parsed with \
CommonMark + GFM-extension rules, wrapped in a fixed print stylesheet (code blocks, \
tables, rules), and laid out by the printpdf HTML engine.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the input Markdown file.
    input: PathBuf,

    /// Output PDF path. Defaults to the input path with a .pdf extension.
    #[arg(short, long, env = "MDPRESS_OUTPUT")]
    output: Option<PathBuf>,

    /// Paper size.
    #[arg(long, env = "MDPRESS_PAPER", value_enum, default_value = "a4")]
    paper: PaperArg,

    /// Landscape orientation (default is portrait).
    #[arg(long, env = "MDPRESS_LANDSCAPE")]
    landscape: bool,

    /// Fallback font family for body text.
    #[arg(long, env = "MDPRESS_FONT", default_value = "DejaVu Sans")]
    font: String,

    /// Never fetch externally referenced images.
    #[arg(long, env = "MDPRESS_NO_REMOTE_ASSETS")]
    no_remote_assets: bool,

    /// Per-image fetch timeout in seconds.
    #[arg(long, env = "MDPRESS_ASSET_TIMEOUT", default_value_t = 30)]
    asset_timeout: u64,

    /// Print run statistics as JSON on stdout.
    #[arg(long, env = "MDPRESS_JSON")]
    json: bool,

    /// Disable the progress display.
    #[arg(long, env = "MDPRESS_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MDPRESS_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MDPRESS_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum PaperArg {
    A4,
    Letter,
    Legal,
    A3,
    A5,
}

impl From<PaperArg> for PaperSize {
    fn from(v: PaperArg) -> Self {
        match v {
            PaperArg::A4 => PaperSize::A4,
            PaperArg::Letter => PaperSize::Letter,
            PaperArg::Legal => PaperSize::Legal,
            PaperArg::A3 => PaperSize::A3,
            PaperArg::A5 => PaperSize::A5,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!();
        eprintln!("{}", red("─────────────────────────────────────────────"));
        eprintln!("{} {}", red("✘"), bold("Conversion failed"));
        for (i, cause) in e.chain().enumerate() {
            if i == 0 {
                eprintln!("  {}", cause);
            } else {
                eprintln!("  {} {}", dim("caused by:"), cause);
            }
        }
        eprintln!("{}", red("─────────────────────────────────────────────"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    // The progress display provides all the feedback that matters to an
    // interactive user; suppress INFO-level library logs while it is active.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    // ── Build config ─────────────────────────────────────────────────────
    let progress = if show_progress {
        Some(CliProgressCallback::new())
    } else {
        None
    };

    let mut builder = RenderConfig::builder()
        .paper_size(cli.paper.into())
        .orientation(if cli.landscape {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        })
        .remote_assets(!cli.no_remote_assets)
        .default_font(cli.font.clone())
        .asset_timeout_secs(cli.asset_timeout);

    if let Some(ref cb) = progress {
        builder = builder.progress_callback(Arc::clone(cb) as ProgressCallback);
    }

    let config = builder.build().context("Invalid configuration")?;

    // ── Run conversion ───────────────────────────────────────────────────
    let result = convert_to_file(&cli.input, &output_path, &config);

    if let Some(ref cb) = progress {
        cb.finish();
    }
    let stats = result.context("Conversion failed")?;

    // ── Summary ──────────────────────────────────────────────────────────
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).context("Failed to serialise statistics")?
        );
    }
    if !cli.quiet {
        eprintln!(
            "{} {} {}  {}",
            green("✔"),
            bold("Saved"),
            bold(&output_path.display().to_string()),
            dim(&format!(
                "{} bytes, {}ms total",
                stats.pdf_bytes, stats.total_duration_ms
            )),
        );
        if stats.assets_failed > 0 {
            eprintln!(
                "  {} {} remote image(s) could not be fetched",
                red("⚠"),
                stats.assets_failed
            );
        }
    }

    Ok(())
}
