//! Output rendering for icon variants
//!
//! Every function here is pure: the same variant, format and color always
//! produce the same string.

use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::interface::OutputFormat;
use crate::models::IconVariant;

/// Existing fill attributes in SVG markup
static FILL_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"fill="[^"]*""#).unwrap()
});

const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// `<i class="fas fa-star"></i>`
fn html_tag(variant: &IconVariant) -> String {
    format!(r#"<i class="{}"></i>"#, variant.class_name)
}

/// The string placed in the clipboard for `format`.
///
/// Unicode falls back to the class name when the icon has no code point,
/// SVG falls back to the HTML tag when the icon has no markup.
pub fn copy_payload(variant: &IconVariant, format: OutputFormat, color: &str) -> String {
    match format {
        OutputFormat::Html => html_tag(variant),
        OutputFormat::Class => variant.class_name.clone(),
        OutputFormat::Unicode => {
            if variant.unicode_codepoint.is_empty() {
                variant.class_name.clone()
            } else {
                format!("&#x{};", variant.unicode_codepoint)
            }
        }
        OutputFormat::Svg => {
            if variant.svg_markup.trim().is_empty() {
                html_tag(variant)
            } else {
                recolor_svg(&variant.svg_markup, color)
            }
        }
    }
}

/// Preview for the result row: recolored SVG as a data URI, or the class name
/// when there is no markup to draw.
pub fn rendered_preview(variant: &IconVariant, color: &str) -> String {
    if variant.svg_markup.trim().is_empty() {
        return variant.class_name.clone();
    }
    let svg = recolor_svg(&variant.svg_markup, color);
    let encoded = base64::engine::general_purpose::STANDARD.encode(svg.as_bytes());
    format!("{}{}", SVG_DATA_URI_PREFIX, encoded)
}

/// Set the fill color of SVG markup.
/// Adds a `fill` attribute to the `<svg>` tag when none exists, otherwise
/// replaces every existing fill value. Markup without an `<svg` tag is
/// returned unchanged.
pub fn recolor_svg(markup: &str, color: &str) -> String {
    if !markup.contains("<svg") {
        return markup.to_string();
    }
    let fill = format!(r#"fill="{}""#, color);
    if FILL_ATTR_REGEX.is_match(markup) {
        FILL_ATTR_REGEX
            .replace_all(markup, regex::NoExpand(&fill))
            .into_owned()
    } else {
        markup.replacen("<svg", &format!("<svg {}", fill), 1)
    }
}

/// Normalize a CSS color to lowercase hex (`#rrggbb`, or `#rrggbbaa` when translucent).
/// Returns None if the string is not a valid color.
pub fn normalize_color(text: &str) -> Option<String> {
    let color = csscolorparser::parse(text.trim()).ok()?;
    let [r, g, b, a] = color.to_rgba8();
    if a == 255 {
        Some(format!("#{:02x}{:02x}{:02x}", r, g, b))
    } else {
        Some(format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a))
    }
}
