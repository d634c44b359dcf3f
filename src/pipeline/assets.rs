//! Remote-asset prefetch: inline externally hosted images as data URIs.
//!
//! The render engine itself performs no network I/O. When `remote_assets`
//! is enabled we fetch each `<img src="http…">` target up front, with a
//! bounded timeout and size cap, and rewrite the `src` attribute to a
//! `data:<mime>;base64,…` URI. A fetch failure leaves the tag untouched and
//! the document renders without that image — never fatal, because a broken
//! hot-link in the source must not kill the conversion.
//!
//! When `remote_assets` is disabled this stage returns its input unchanged
//! and the pipeline touches the network nowhere.

use crate::config::RenderConfig;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, warn};

/// Matches the `src` attribute of an `<img>` tag referencing a remote URL.
static RE_REMOTE_IMG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img[^>]*?\bsrc="(https?://[^"]+)""#).unwrap());

/// Per-document outcome of the asset stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetReport {
    /// Assets fetched and inlined.
    pub fetched: usize,
    /// Assets that failed to fetch and were left as-is.
    pub failed: usize,
}

/// Fetch remote images referenced by the document and inline them.
///
/// Returns the rewritten HTML and a fetch report. With `remote_assets`
/// disabled the HTML is returned byte-identical.
pub fn inline_remote_images(html: &str, config: &RenderConfig) -> (String, AssetReport) {
    if !config.remote_assets {
        return (html.to_string(), AssetReport::default());
    }

    // Deduplicate: a badge referenced five times is fetched once.
    let urls: BTreeSet<String> = RE_REMOTE_IMG
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect();

    if urls.is_empty() {
        return (html.to_string(), AssetReport::default());
    }

    let client = match reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(config.asset_timeout_secs))
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            // No client means no fetches; render proceeds without images.
            warn!("Could not build HTTP client for asset prefetch: {e}");
            return (
                html.to_string(),
                AssetReport {
                    fetched: 0,
                    failed: urls.len(),
                },
            );
        }
    };

    let mut rewritten = html.to_string();
    let mut report = AssetReport::default();

    for attr_url in &urls {
        // The attribute value is HTML-escaped (`&` arrives as `&amp;`); the
        // wire request needs the raw URL, while the rewrite below must match
        // the escaped form still present in the document.
        let url = unescape_attribute(attr_url);
        match fetch_asset(&client, &url, config.max_asset_bytes) {
            Ok((mime, bytes)) => {
                debug!("Fetched asset {url} ({} bytes, {mime})", bytes.len());
                if let Some(ref cb) = config.progress_callback {
                    cb.on_asset_fetched(&url, bytes.len());
                }
                let data_uri = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));
                rewritten = rewritten.replace(
                    &format!("src=\"{attr_url}\""),
                    &format!("src=\"{data_uri}\""),
                );
                report.fetched += 1;
            }
            Err(e) => {
                warn!("Skipping remote asset {url}: {e}");
                if let Some(ref cb) = config.progress_callback {
                    cb.on_asset_failed(&url, &e);
                }
                report.failed += 1;
            }
        }
    }

    (rewritten, report)
}

/// Undo the attribute escaping the HTML emitter applied to the URL.
///
/// Only the entities the emitter produces in attribute position are handled;
/// `&amp;` is the one that matters in practice, since badge URLs routinely
/// carry multi-parameter query strings.
fn unescape_attribute(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&#38;", "&")
        .replace("&#x26;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
}

/// Fetch one asset, enforcing the size cap. Returns (mime, bytes).
fn fetch_asset(
    client: &reqwest::blocking::Client,
    url: &str,
    max_bytes: usize,
) -> Result<(String, Vec<u8>), String> {
    let response = client.get(url).send().map_err(|e| {
        if e.is_timeout() {
            "request timed out".to_string()
        } else {
            e.to_string()
        }
    })?;

    if !response.status().is_success() {
        return Err(format!("HTTP {}", response.status()));
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| v.starts_with("image/"))
        .unwrap_or_else(|| mime_from_url(url).to_string());

    // Reject declared-oversized assets before reading a single body byte.
    if let Some(len) = response.content_length() {
        if len > max_bytes as u64 {
            return Err(format!("asset is {len} bytes, exceeds cap of {max_bytes}"));
        }
    }

    // Servers may omit or understate Content-Length, so the read itself is
    // capped too: one byte past the limit proves the asset is oversized
    // without buffering the rest.
    use std::io::Read;
    let mut bytes = Vec::new();
    response
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| e.to_string())?;
    if bytes.len() > max_bytes {
        return Err(format!("asset exceeds cap of {max_bytes} bytes"));
    }

    Ok((mime, bytes))
}

/// Guess an image MIME type from the URL's extension.
///
/// Used only when the server sends no usable Content-Type.
fn mime_from_url(url: &str) -> &'static str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match path.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "webp" => "image/webp",
        Some(ext) if ext == "svg" => "image/svg+xml",
        Some(ext) if ext == "bmp" => "image/bmp",
        _ => "image/png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;

    fn config_without_remote() -> RenderConfig {
        RenderConfig::builder().remote_assets(false).build().unwrap()
    }

    #[test]
    fn disabled_leaves_html_untouched() {
        let html = r#"<p><img src="https://example.com/a.png" alt=""></p>"#;
        let (out, report) = inline_remote_images(html, &config_without_remote());
        assert_eq!(out, html);
        assert_eq!(report.fetched, 0);
        assert_eq!(report.failed, 0);
    }

    #[test]
    fn no_remote_images_means_no_rewrite() {
        let html = r#"<p><img src="local/diagram.png"> and <img src="data:image/png;base64,AAAA">"#;
        let (out, report) = inline_remote_images(html, &RenderConfig::default());
        assert_eq!(out, html);
        assert_eq!(report.fetched + report.failed, 0);
    }

    #[test]
    fn regex_finds_remote_sources_only() {
        let html = r#"
            <img src="https://example.com/a.png">
            <img alt="x" src="http://example.com/b.jpg">
            <img src="relative/c.png">
        "#;
        let urls: Vec<&str> = RE_REMOTE_IMG
            .captures_iter(html)
            .map(|c| c.get(1).unwrap().as_str())
            .collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a.png", "http://example.com/b.jpg"]
        );
    }

    #[test]
    fn escaped_ampersands_are_unescaped_before_fetch() {
        assert_eq!(
            unescape_attribute("https://img.shields.io/badge?style=flat&amp;logo=rust"),
            "https://img.shields.io/badge?style=flat&logo=rust"
        );
        assert_eq!(
            unescape_attribute("https://x.io/a?b=1&#38;c=2&#x26;d=3"),
            "https://x.io/a?b=1&c=2&d=3"
        );
        // Already-raw URLs pass through unchanged.
        assert_eq!(
            unescape_attribute("https://x.io/a.png"),
            "https://x.io/a.png"
        );
    }

    #[test]
    fn markdown_badge_url_survives_escaping_round_trip() {
        // The emitter writes `&` as `&amp;` in the src attribute; the regex
        // must capture the escaped form (so the rewrite key matches the
        // document) and unescaping must recover the fetchable URL.
        let raw = "https://img.shields.io/badge/build-passing?style=flat&logo=rust";
        let fragment =
            crate::pipeline::transform::to_fragment(&format!("![badge]({raw})"));
        assert!(fragment.contains("&amp;"), "got: {fragment}");

        let captured = RE_REMOTE_IMG
            .captures(&fragment)
            .expect("remote image should be captured")[1]
            .to_string();
        assert!(captured.contains("&amp;"));
        assert_eq!(unescape_attribute(&captured), raw);
        assert!(fragment.contains(&format!("src=\"{captured}\"")));
    }

    #[test]
    fn mime_guess_from_extension() {
        assert_eq!(mime_from_url("https://x.io/a.png"), "image/png");
        assert_eq!(mime_from_url("https://x.io/a.JPG?v=2"), "image/jpeg");
        assert_eq!(mime_from_url("https://x.io/a.svg#frag"), "image/svg+xml");
        assert_eq!(mime_from_url("https://x.io/no-extension"), "image/png");
    }
}
