//! Catalog store: the immutable, in-memory icon collection.
//!
//! The catalog source is a JSON object keyed by logical icon name, each record
//! carrying shared `categories`/`keywords` and a `styles` object with the
//! style-specific fields. Loading is all-or-nothing: any schema violation or
//! duplicate key rejects the whole source.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::candidate::SearchCandidate;
use crate::interface::IconStyle;
use crate::models::IconVariant;

#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed catalog source: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Icon name must not be empty")]
    EmptyName,
    #[error("Duplicate icon: {0}")]
    DuplicateIcon(String),
    #[error("Icon {0} has no styles")]
    NoStyles(String),
    #[error("Icon {icon} has unknown style {style:?}")]
    UnknownStyle { icon: String, style: String },
    #[error("Duplicate style {style} for icon {icon}")]
    DuplicateStyle { icon: String, style: &'static str },
    #[error("Icon {icon} ({style}) is missing {field}")]
    MissingField {
        icon: String,
        style: &'static str,
        field: &'static str,
    },
    #[error("Icon {icon} ({style}) has invalid code point {codepoint:?}")]
    InvalidCodepoint {
        icon: String,
        style: &'static str,
        codepoint: String,
    },
    #[error("Code point {codepoint} is used by both {first} and {second} in style {style}")]
    DuplicateCodepoint {
        codepoint: String,
        style: &'static str,
        first: String,
        second: String,
    },
}

pub type CatalogResult<T> = Result<T, CatalogLoadError>;

// ─────────────────────────────────────────────────────────────────────────────
// SOURCE SCHEMA
// ─────────────────────────────────────────────────────────────────────────────

/// JSON object read as an ordered list of entries.
/// Keeps source order and surfaces duplicate keys instead of collapsing them.
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[derive(Deserialize)]
struct IconRecord {
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    keywords: Vec<String>,
    styles: OrderedEntries<StyleRecord>,
}

#[derive(Deserialize)]
struct StyleRecord {
    label: String,
    #[serde(default)]
    unicode: String,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    view_box: Option<String>,
    #[serde(default)]
    path: Option<String>,
    /// Complete markup, used instead of `view_box` + `path` when present
    #[serde(default)]
    svg: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// CATALOG
// ─────────────────────────────────────────────────────────────────────────────

/// Entry positions of one logical name, indexed by `IconStyle as usize`
type StyleSlots = [Option<usize>; IconStyle::ALL.len()];

/// Immutable collection of all icon variants.
///
/// Iteration order is source order: icons as listed, styles of one icon as listed.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<SearchCandidate>,
    /// Entry position per style, keyed by logical name
    index: HashMap<String, StyleSlots>,
}

impl Catalog {
    /// Load and validate a catalog source file
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let start = Instant::now();
        let source = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&source)?;
        tracing::info!(
            path = %path.display(),
            variants = catalog.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded icon catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog source held in memory
    pub fn from_json_str(source: &str) -> CatalogResult<Self> {
        let icons: OrderedEntries<IconRecord> = serde_json::from_str(source)?;

        let mut variants = Vec::new();
        let mut names: HashSet<String> = HashSet::with_capacity(icons.0.len());
        for (name, record) in icons.0 {
            if name.trim().is_empty() {
                return Err(CatalogLoadError::EmptyName);
            }
            if !names.insert(name.clone()) {
                return Err(CatalogLoadError::DuplicateIcon(name));
            }
            if record.styles.0.is_empty() {
                return Err(CatalogLoadError::NoStyles(name));
            }
            let categories = dedup_preserving_order(record.categories);
            for (style_name, style_record) in record.styles.0 {
                let style = IconStyle::parse(&style_name).ok_or_else(|| {
                    CatalogLoadError::UnknownStyle {
                        icon: name.clone(),
                        style: style_name.clone(),
                    }
                })?;
                variants.push(build_variant(
                    &name,
                    style,
                    style_record,
                    &categories,
                    &record.keywords,
                )?);
            }
        }

        Self::from_variants(variants)
    }

    /// Build a catalog from already-typed variants, enforcing key uniqueness
    pub fn from_variants(variants: Vec<IconVariant>) -> CatalogResult<Self> {
        let mut index: HashMap<String, StyleSlots> = HashMap::with_capacity(variants.len());
        let mut codepoints: HashMap<(&str, IconStyle), &str> = HashMap::new();

        for (i, variant) in variants.iter().enumerate() {
            if variant.logical_name.trim().is_empty() {
                return Err(CatalogLoadError::EmptyName);
            }
            let slot = &mut index
                .entry(variant.logical_name.clone())
                .or_insert([None; IconStyle::ALL.len()])[variant.style as usize];
            if slot.is_some() {
                return Err(CatalogLoadError::DuplicateStyle {
                    icon: variant.logical_name.clone(),
                    style: variant.style.as_str(),
                });
            }
            *slot = Some(i);
            if variant.unicode_codepoint.is_empty() {
                continue;
            }
            if let Some(first) = codepoints.insert(
                (variant.unicode_codepoint.as_str(), variant.style),
                variant.logical_name.as_str(),
            ) {
                return Err(CatalogLoadError::DuplicateCodepoint {
                    codepoint: variant.unicode_codepoint.clone(),
                    style: variant.style.as_str(),
                    first: first.to_string(),
                    second: variant.logical_name.clone(),
                });
            }
        }

        Ok(Self {
            entries: variants.into_iter().map(SearchCandidate::new).collect(),
            index,
        })
    }

    /// Lookup by unique key
    pub fn get(&self, logical_name: &str, style: IconStyle) -> Option<&IconVariant> {
        self.index
            .get(logical_name)
            .and_then(|slots| slots[style as usize])
            .map(|i| self.entries[i].variant())
    }

    /// All variants in catalog order
    pub fn all_entries(&self) -> impl ExactSizeIterator<Item = &IconVariant> + '_ {
        self.entries.iter().map(SearchCandidate::variant)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn candidates(&self) -> &[SearchCandidate] {
        &self.entries
    }
}

fn build_variant(
    name: &str,
    style: IconStyle,
    record: StyleRecord,
    categories: &[String],
    keywords: &[String],
) -> CatalogResult<IconVariant> {
    let missing = |field: &'static str| CatalogLoadError::MissingField {
        icon: name.to_string(),
        style: style.as_str(),
        field,
    };

    if record.label.trim().is_empty() {
        return Err(missing("label"));
    }

    let codepoint = record.unicode.trim().to_lowercase();
    let valid_codepoint = codepoint.is_empty()
        || (codepoint.len() <= 6 && codepoint.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid_codepoint {
        return Err(CatalogLoadError::InvalidCodepoint {
            icon: name.to_string(),
            style: style.as_str(),
            codepoint: record.unicode,
        });
    }

    let svg_markup = match record.svg {
        Some(svg) => svg,
        None => {
            let view_box = record.view_box.ok_or_else(|| missing("view_box"))?;
            let path = record.path.ok_or_else(|| missing("path"))?;
            format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}"><path d="{}"/></svg>"#,
                view_box, path
            )
        }
    };

    let prefix = record
        .prefix
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| style.class_prefix().to_string());

    Ok(IconVariant {
        logical_name: name.to_string(),
        style,
        label: record.label,
        unicode_codepoint: codepoint,
        class_name: format!("{} fa-{}", prefix, name),
        svg_markup,
        categories: categories.to_vec(),
        keywords: keywords.to_vec(),
    })
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
