//! Demo icon catalog shared by tests, benchmarks and the command-line host.
//!
//! The catalog is a hand-picked subset of Font Awesome metadata in the
//! launcher's catalog source format. SVG paths are truncated.

use once_cell::sync::Lazy;

/// Raw catalog source (JSON), in display order.
pub const CATALOG_JSON: &str = include_str!("../data/icons.json");

/// Number of icon variants (name + style pairs) in [`CATALOG_JSON`].
pub const VARIANT_COUNT: usize = 36;

/// Logical icon names in [`CATALOG_JSON`].
pub static ICON_NAMES: Lazy<Vec<String>> = Lazy::new(|| {
    serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(CATALOG_JSON)
        .map(|icons| icons.keys().cloned().collect())
        .unwrap_or_default()
});

/// Queries typed by people while exercising the launcher, used by benchmarks.
pub const SAMPLE_QUERIES: &[(&str, &str)] = &[
    ("empty", ""),
    ("single_char", "s"),
    ("exact_name", "star"),
    ("prefix", "arr"),
    ("substring", "github"),
    ("category", "medical"),
    ("keyword", "favorite"),
    ("style_filter", "brands github"),
    ("multi_token", "user medical"),
    ("no_match", "zzzzzz"),
];
