//! Core data models for Glint
//!
//! `IconVariant` is built once by the catalog loader and never mutated.

use crate::interface::IconStyle;

/// Keywords shown after the style in a row subtitle
pub(crate) const SUBTITLE_KEYWORDS: usize = 5;

/// One style rendering of a logical icon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconVariant {
    /// Base name shared by all styles of the icon, e.g. "star"
    pub logical_name: String,
    pub style: IconStyle,
    /// Human-readable display name
    pub label: String,
    /// Hex code point without prefix, e.g. "f005". May be empty.
    pub unicode_codepoint: String,
    /// e.g. "fas fa-star"
    pub class_name: String,
    /// Complete `<svg>` markup. May be empty.
    pub svg_markup: String,
    /// Category tags, deduplicated, in source order
    pub categories: Vec<String>,
    /// Synonyms in source order
    pub keywords: Vec<String>,
}

impl IconVariant {
    /// Unique catalog key
    pub fn key(&self) -> (&str, IconStyle) {
        (&self.logical_name, self.style)
    }

    /// Row subtitle: "Star · Solid icon - award, favorite, ..."
    pub fn subtitle(&self) -> String {
        let mut subtitle = format!("{} · {} icon", self.label, self.style.display_name());
        if !self.keywords.is_empty() {
            let shown: Vec<&str> = self
                .keywords
                .iter()
                .take(SUBTITLE_KEYWORDS)
                .map(String::as_str)
                .collect();
            subtitle.push_str(" - ");
            subtitle.push_str(&shown.join(", "));
        }
        subtitle
    }
}

#[cfg(test)]
pub(crate) fn test_variant(name: &str, style: IconStyle) -> IconVariant {
    IconVariant {
        logical_name: name.to_string(),
        style,
        label: name.to_string(),
        unicode_codepoint: "f000".to_string(),
        class_name: format!("{} fa-{}", style.class_prefix(), name),
        svg_markup: r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 512 512"><path d="M0 0h512v512H0z"/></svg>"#.to_string(),
        categories: Vec::new(),
        keywords: Vec::new(),
    }
}
