//! Document template: wrap an HTML fragment in the fixed print-styled shell.
//!
//! The template is constant across invocations — UTF-8 meta declaration plus
//! a small print stylesheet: monospace code blocks on a light-gray background
//! with a border, collapsed-border tables with padded and shaded header
//! cells, thin horizontal rules. There is no user-configurable theming; the
//! only injected values are the fragment itself and the configured default
//! font family.
//!
//! Wrapping is a pure function of its inputs, which keeps the transform
//! stage testable without ever invoking the render engine.

/// Print stylesheet embedded in every document.
///
/// `{FONT}` is replaced with the configured default font family.
const STYLESHEET: &str = "\
body { font-family: {FONT}, sans-serif; line-height: 1.6; font-size: 12px; }
pre { background-color: #f4f4f4; padding: 10px; border: 1px solid #ddd; white-space: pre-wrap; word-wrap: break-word; }
code { font-family: DejaVu Sans Mono, monospace; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ddd; padding: 8px; }
th { background-color: #f2f2f2; }
hr { border: 0; border-top: 1px solid #ccc; }";

/// Wrap an HTML fragment in the full document shell.
pub fn wrap_fragment(fragment: &str, default_font: &str) -> String {
    let stylesheet = STYLESHEET.replace("{FONT}", default_font);
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n\
         <style>\n{stylesheet}\n</style>\n\
         </head>\n\
         <body>{fragment}</body>\n\
         </html>\n"
    )
}
