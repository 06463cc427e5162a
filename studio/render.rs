//! Template renderer for the converter page.
//!
//! The studio serves a single HTML template (`studio/assets/index.html`) with
//! placeholder tokens like `{{TOKEN}}`, loaded at compile time. Placeholders the
//! caller does not fill are blanked so raw `{{TOKEN}}` strings never reach the
//! browser.

use crate::handlers::upload::{DEFAULT_COLORS, MAX_COLORS, MIN_COLORS};

const TEMPLATE: &str = include_str!("assets/index.html");

/// Renders the upload page.
///
/// # Arguments
/// - `error`         : optional error text shown above the form
/// - `max_upload_mb` : size limit quoted in the form hint
pub fn render_index(error: Option<&str>, max_upload_mb: usize) -> String {
    let mut html = TEMPLATE.to_owned();

    html = html.replace("{{FLASH}}", &render_flash_html(error));
    html = html.replace("{{COLOR_OPTIONS}}", &color_options());
    html = html.replace("{{MAX_UPLOAD_MB}}", &max_upload_mb.to_string());

    blank_remaining(html)
}

fn render_flash_html(error: Option<&str>) -> String {
    match error {
        None => String::new(),
        Some(text) => format!(r#"<div class="flash flash-error">{}</div>"#, html_escape(text)),
    }
}

fn color_options() -> String {
    (MIN_COLORS..=MAX_COLORS)
        .map(|n| {
            let sel = if n == DEFAULT_COLORS { " selected" } else { "" };
            format!("<option value=\"{n}\"{sel}>{n} colors</option>")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
}

/// Replaces any `{{UPPERCASE_TOKEN}}` that wasn't already substituted with an
/// empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}
