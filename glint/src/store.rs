//! IconSearcher - main API for the launcher host
//!
//! Holds one immutable `Catalog` behind an `Arc` and answers queries against
//! it. Nothing is mutated after construction, so concurrent `on_query` calls
//! from the host need no locking.
//!
//! Rows carry an opaque action token; `activate` turns the token back into the
//! clipboard payload the row was rendered with.

use std::path::PathBuf;
use std::sync::{Arc, Once};

use crate::catalog::Catalog;
use crate::config::QueryConfig;
use crate::interface::{
    GlintError, IconSearchApi, IconStyle, OutputFormat, Preferences, QueryResponse, ResultRow,
};
use crate::render::{self, normalize_color};
use crate::search::{self, ResultDescriptor};

const ACTION_SCHEME: &str = "glint";
const NO_MATCH_TITLE: &str = "No matching icons found";

static RAYON_INIT: Once = Once::new();

/// Initialize the global Rayon pool, leaving one core to the host UI thread
fn init_rayon() {
    RAYON_INIT.call_once(|| {
        let num_threads = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4);
        let rayon_threads = num_threads.saturating_sub(1).max(1);

        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(rayon_threads)
            .thread_name(|i| format!("glint-rayon-{}", i))
            .build_global()
        {
            // Another component (or a test harness) got there first
            tracing::debug!(error = %e, "rayon global pool already initialized");
        }
    });
}

// ─────────────────────────────────────────────────────────────────────────────
// Action tokens
// ─────────────────────────────────────────────────────────────────────────────

/// Decoded form of `glint:{format}:{color}:{style}:{name}`.
/// The name comes last so it may itself contain colons.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ActionToken {
    format: OutputFormat,
    color: String,
    style: IconStyle,
    name: String,
}

impl ActionToken {
    fn for_row(descriptor: &ResultDescriptor<'_>, config: &QueryConfig) -> Self {
        Self {
            format: config.output_format,
            color: config.preview_color.clone(),
            style: descriptor.variant.style,
            name: descriptor.variant.logical_name.clone(),
        }
    }

    fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            ACTION_SCHEME,
            self.format.as_str(),
            self.color,
            self.style.as_str(),
            self.name
        )
    }

    fn decode(token: &str) -> Result<Self, GlintError> {
        let invalid = || GlintError::InvalidAction(token.to_string());
        let mut parts = token.splitn(5, ':');

        if parts.next() != Some(ACTION_SCHEME) {
            return Err(invalid());
        }
        let format = parts.next().and_then(OutputFormat::parse).ok_or_else(invalid)?;
        let color = parts.next().and_then(normalize_color).ok_or_else(invalid)?;
        let style = parts.next().and_then(IconStyle::parse).ok_or_else(invalid)?;
        let name = parts
            .next()
            .filter(|name| !name.is_empty())
            .ok_or_else(invalid)?;

        Ok(Self {
            format,
            color,
            style,
            name: name.to_string(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IconSearcher
// ─────────────────────────────────────────────────────────────────────────────

/// Thread-safe icon searcher over a read-only catalog
#[derive(uniffi::Object)]
pub struct IconSearcher {
    catalog: Arc<Catalog>,
}

// Internal implementation (not exported via FFI)
impl IconSearcher {
    pub fn from_catalog(catalog: Catalog) -> Self {
        init_rayon();
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// The loaded catalog, for Rust callers (CLI, benchmarks)
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn result_row(descriptor: &ResultDescriptor<'_>, config: &QueryConfig, raw_input: &str) -> ResultRow {
        let variant = descriptor.variant;
        ResultRow {
            title: variant.logical_name.clone(),
            subtitle: variant.subtitle(),
            preview: descriptor.rendered_preview.clone(),
            action: Some(ActionToken::for_row(descriptor, config).encode()),
            highlights: search::name_highlights(&variant.logical_name, raw_input),
        }
    }

    fn placeholder_row(raw_input: &str) -> ResultRow {
        ResultRow {
            title: NO_MATCH_TITLE.to_string(),
            subtitle: format!("No icons match '{}'", raw_input.trim()),
            preview: String::new(),
            action: None,
            highlights: Vec::new(),
        }
    }
}

// FFI-exported constructors (must be in standalone impl block)
#[uniffi::export]
impl IconSearcher {
    /// Load the catalog source file at `catalog_path`
    #[uniffi::constructor]
    pub fn new(catalog_path: String) -> Result<Self, GlintError> {
        let catalog = Catalog::load(PathBuf::from(catalog_path))?;
        Ok(Self::from_catalog(catalog))
    }

    /// Build from catalog source text already in memory
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Self, GlintError> {
        let catalog = Catalog::from_json_str(&json)?;
        Ok(Self::from_catalog(catalog))
    }
}

#[uniffi::export]
impl IconSearchApi for IconSearcher {
    fn on_query(&self, raw_input: String, preferences: Preferences) -> QueryResponse {
        let config = QueryConfig::resolve(&preferences);
        let results = search::search(&raw_input, &self.catalog, &config);

        let mut rows: Vec<ResultRow> = results
            .iter()
            .map(|descriptor| Self::result_row(descriptor, &config, &raw_input))
            .collect();

        if rows.is_empty() && config.result_limit > 0 && !search::normalize_query(&raw_input).is_empty() {
            rows.push(Self::placeholder_row(&raw_input));
        }

        QueryResponse {
            rows,
            total_matches: results.len() as u64,
        }
    }

    fn activate(&self, action: String) -> Result<String, GlintError> {
        let token = ActionToken::decode(&action)?;
        let variant = self
            .catalog
            .get(&token.name, token.style)
            .ok_or_else(|| GlintError::NotFound(format!("{} ({})", token.name, token.style.as_str())))?;
        Ok(render::copy_payload(variant, token.format, &token.color))
    }

    fn catalog_size(&self) -> u64 {
        self.catalog.len() as u64
    }
}
