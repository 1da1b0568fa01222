//! Search candidate with memoized derived state.
//!
//! Module isolation ensures no code outside this module can mutate the wrapped
//! `IconVariant` after construction, so the `OnceLock` caches can never go stale.

use std::sync::OnceLock;

use crate::models::IconVariant;

/// A catalog entry plus its lowercased search fields.
/// The lowercased fields are computed on first access and cached, so only
/// entries that are actually scored pay for them, and only once per process.
#[derive(Debug)]
pub struct SearchCandidate {
    variant: IconVariant,
    name_lower: OnceLock<String>,
    categories_lower: OnceLock<Vec<String>>,
    keywords_lower: OnceLock<Vec<String>>,
}

impl SearchCandidate {
    pub fn new(variant: IconVariant) -> Self {
        Self {
            variant,
            name_lower: OnceLock::new(),
            categories_lower: OnceLock::new(),
            keywords_lower: OnceLock::new(),
        }
    }

    pub fn variant(&self) -> &IconVariant {
        &self.variant
    }

    pub fn name_lower(&self) -> &str {
        self.name_lower
            .get_or_init(|| self.variant.logical_name.to_lowercase())
    }

    pub fn categories_lower(&self) -> &[String] {
        self.categories_lower.get_or_init(|| {
            self.variant.categories.iter().map(|c| c.to_lowercase()).collect()
        })
    }

    pub fn keywords_lower(&self) -> &[String] {
        self.keywords_lower.get_or_init(|| {
            self.variant.keywords.iter().map(|k| k.to_lowercase()).collect()
        })
    }
}
