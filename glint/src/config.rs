//! Query configuration resolved from host preferences.
//!
//! Preferences arrive as loosely-typed strings from the host's preference
//! storage. They are resolved once per query into a `QueryConfig`, so the
//! search engine never sees an invalid format or color.

use crate::interface::{OutputFormat, Preferences};
use crate::render::normalize_color;

/// Trigger keyword the host registers by default
pub const DEFAULT_KEYWORD: &str = "fa";
/// Icon color used when the preference is missing or unparsable
pub const DEFAULT_PREVIEW_COLOR: &str = "#7dcfff";
/// Result cap used when the preference is missing
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Resolved settings for one search invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub output_format: OutputFormat,
    /// Normalized lowercase hex color
    pub preview_color: String,
    /// Maximum number of results; zero yields no results
    pub result_limit: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            preview_color: DEFAULT_PREVIEW_COLOR.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl QueryConfig {
    /// Resolve raw preferences.
    ///
    /// - empty format: the default (`html`)
    /// - unrecognized format: `class`, the plainest representation
    /// - unparsable color: the default color
    /// - missing `max_results`: the default limit
    pub fn resolve(preferences: &Preferences) -> Self {
        let requested_format = preferences.output_format.trim();
        let output_format = if requested_format.is_empty() {
            OutputFormat::default()
        } else {
            OutputFormat::parse(requested_format).unwrap_or_else(|| {
                tracing::warn!(format = requested_format, "unknown output format, using class");
                OutputFormat::Class
            })
        };

        let preview_color = normalize_color(&preferences.preview_color).unwrap_or_else(|| {
            if !preferences.preview_color.trim().is_empty() {
                tracing::warn!(
                    color = preferences.preview_color.as_str(),
                    "invalid preview color, using default"
                );
            }
            DEFAULT_PREVIEW_COLOR.to_string()
        });

        let result_limit = preferences
            .max_results
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_RESULT_LIMIT);

        Self {
            output_format,
            preview_color,
            result_limit,
        }
    }

    pub fn with_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }

    pub fn with_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }
}
