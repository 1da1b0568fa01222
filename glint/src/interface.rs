//! Glint FFI Interface Definition
//!
//! This file defines the public interface exposed to the launcher host via UniFFI.
//! It acts as the source of truth for shared types.

use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// Icon style namespace. Combined with the logical name it forms the unique
/// key of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, uniffi::Enum)]
pub enum IconStyle {
    Solid,
    Regular,
    Light,
    Thin,
    Duotone,
    Brands,
}

impl IconStyle {
    pub const ALL: [IconStyle; 6] = [
        IconStyle::Solid,
        IconStyle::Regular,
        IconStyle::Light,
        IconStyle::Thin,
        IconStyle::Duotone,
        IconStyle::Brands,
    ];

    /// Lowercase name as it appears in the catalog source and in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            IconStyle::Solid => "solid",
            IconStyle::Regular => "regular",
            IconStyle::Light => "light",
            IconStyle::Thin => "thin",
            IconStyle::Duotone => "duotone",
            IconStyle::Brands => "brands",
        }
    }

    /// Parse an exact (already lowercased) style name
    pub fn parse(name: &str) -> Option<IconStyle> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Default class prefix when the catalog source doesn't give one
    pub fn class_prefix(&self) -> &'static str {
        match self {
            IconStyle::Solid => "fas",
            IconStyle::Regular => "far",
            IconStyle::Light => "fal",
            IconStyle::Thin => "fat",
            IconStyle::Duotone => "fad",
            IconStyle::Brands => "fab",
        }
    }

    /// Capitalized name for subtitles
    pub fn display_name(&self) -> &'static str {
        match self {
            IconStyle::Solid => "Solid",
            IconStyle::Regular => "Regular",
            IconStyle::Light => "Light",
            IconStyle::Thin => "Thin",
            IconStyle::Duotone => "Duotone",
            IconStyle::Brands => "Brands",
        }
    }
}

/// What ends up in the clipboard when a result is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, uniffi::Enum)]
pub enum OutputFormat {
    /// `<i class="fas fa-star"></i>`
    #[default]
    Html,
    /// `fas fa-star`
    Class,
    /// `&#xf005;`
    Unicode,
    /// Full SVG markup, recolored to the preview color
    Svg,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Class => "class",
            OutputFormat::Unicode => "unicode",
            OutputFormat::Svg => "svg",
        }
    }

    /// Parse a preference value. Unknown values are `None`; callers decide the fallback.
    pub fn parse(value: &str) -> Option<OutputFormat> {
        match value.trim().to_lowercase().as_str() {
            "html" => Some(OutputFormat::Html),
            "class" => Some(OutputFormat::Class),
            "unicode" => Some(OutputFormat::Unicode),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

/// The type of match that produced a highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum HighlightKind {
    Exact,
    Prefix,
    Substring,
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// A highlight range (start, end) in characters of the row title
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct HighlightRange {
    pub start: u64,
    pub end: u64,
    pub kind: HighlightKind,
}

/// Raw user preferences as stored by the host.
///
/// `keyword` is the trigger the host dispatches on; the core never reads it.
/// Everything else is resolved into a `QueryConfig` before each query.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct Preferences {
    pub keyword: String,
    pub output_format: String,
    pub preview_color: String,
    pub max_results: Option<u32>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            keyword: crate::config::DEFAULT_KEYWORD.to_string(),
            output_format: OutputFormat::default().as_str().to_string(),
            preview_color: crate::config::DEFAULT_PREVIEW_COLOR.to_string(),
            max_results: Some(crate::config::DEFAULT_RESULT_LIMIT as u32),
        }
    }
}

/// One display row for the launcher list
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ResultRow {
    /// Logical icon name
    pub title: String,
    /// Label, style and a handful of keywords
    pub subtitle: String,
    /// `data:image/svg+xml;base64,...` preview, or the class name when the icon has no markup
    pub preview: String,
    /// Opaque token for `activate`. `None` for informational rows.
    pub action: Option<String>,
    /// Matched ranges of `title`
    pub highlights: Vec<HighlightRange>,
}

/// Query response container
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct QueryResponse {
    pub rows: Vec<ResultRow>,
    /// Number of real matches (placeholder rows are not counted)
    pub total_matches: u64,
}

/// Error type for Glint operations
#[derive(Debug, Error, uniffi::Error)]
pub enum GlintError {
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),
    #[error("Icon not found: {0}")]
    NotFound(String),
    #[error("Invalid action token: {0}")]
    InvalidAction(String),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE INTERFACE
// ═══════════════════════════════════════════════════════════════════════════════

/// The primary interface the launcher host talks to.
/// This matches the functionality exposed by the `IconSearcher` object.
#[uniffi::export(with_foreign)]
pub trait IconSearchApi: Send + Sync {
    /// Rank icons for the text typed after the trigger keyword.
    /// Empty input browses the catalog in its natural order.
    fn on_query(&self, raw_input: String, preferences: Preferences) -> QueryResponse;

    /// Resolve an action token from a row into the clipboard payload
    fn activate(&self, action: String) -> Result<String, GlintError>;

    /// Number of icon variants in the loaded catalog
    fn catalog_size(&self) -> u64;
}

impl From<crate::catalog::CatalogLoadError> for GlintError {
    fn from(e: crate::catalog::CatalogLoadError) -> Self {
        GlintError::CatalogLoad(e.to_string())
    }
}
