//! Generate a large synthetic icon catalog for benchmarks.
//!
//! The output uses the same source format as the shipped catalog and is
//! validated by loading it back through `Catalog::load`.
//!
//! Usage:
//!     cargo run --release --bin generate-perf-catalog [output_path]
//!
//! Default output: benches/synthetic_icons.json

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use glint::{Catalog, IconStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};

/// Number of logical icons to generate
const NUM_ICONS: usize = 20_000;

/// First code point handed out (Unicode private use area)
const FIRST_CODEPOINT: u32 = 0xe000;

/// Fixed seed so benchmark runs compare like with like
const SEED: u64 = 0x6c69_6e74;

/// Name fragments, joined with dashes
const NAME_WORDS: &[&str] = &[
    "arrow", "user", "star", "file", "folder", "circle", "square", "chart", "cloud",
    "lock", "key", "bell", "heart", "house", "gear", "pen", "book", "camera", "phone",
    "envelope", "calendar", "clock", "map", "pin", "flag", "tag", "cart", "bag", "truck",
    "plane", "car", "bolt", "fire", "water", "leaf", "sun", "moon", "code", "terminal",
];

/// Modifiers that appear in real icon names
const MODIFIERS: &[&str] = &[
    "up", "down", "left", "right", "plus", "minus", "check", "xmark", "slash", "half",
    "alt", "open", "solid", "outline", "small", "large",
];

const CATEGORIES: &[&str] = &[
    "arrows", "business", "coding", "communication", "design", "editing", "files",
    "maps", "medical", "shapes", "social", "time", "transportation", "weather",
];

const KEYWORDS: &[&str] = &[
    "add", "remove", "edit", "save", "share", "search", "alert", "direction", "favorite",
    "navigation", "notification", "person", "settings", "status", "storage", "upload",
];

fn pick<'a>(rng: &mut StdRng, words: &[&'a str]) -> &'a str {
    words[rng.gen_range(0..words.len())]
}

fn pick_many(rng: &mut StdRng, words: &[&str], max: usize) -> Vec<String> {
    let count = rng.gen_range(0..=max);
    let mut picked: Vec<String> = (0..count).map(|_| pick(rng, words).to_string()).collect();
    picked.sort();
    picked.dedup();
    picked
}

fn label_for(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn generate_icon(rng: &mut StdRng, index: usize) -> (String, Value) {
    let mut name = pick(rng, NAME_WORDS).to_string();
    if rng.gen_bool(0.6) {
        name.push('-');
        name.push_str(pick(rng, MODIFIERS));
    }
    // Index suffix keeps names unique and source order stable
    name.push_str(&format!("-{:05}", index));

    let label = label_for(&name);
    let codepoint = format!("{:x}", FIRST_CODEPOINT + index as u32);
    let path = format!("M0 0h{}v512H0z", 64 + rng.gen_range(0..448));

    let mut styles = Map::new();
    let style_count = rng.gen_range(1..=3);
    let mut offered: Vec<IconStyle> = IconStyle::ALL.to_vec();
    for _ in 0..style_count {
        let style = offered.remove(rng.gen_range(0..offered.len()));
        styles.insert(
            style.as_str().to_string(),
            json!({
                "label": label,
                "unicode": codepoint,
                "view_box": "0 0 512 512",
                "path": path,
            }),
        );
    }

    let icon = json!({
        "categories": pick_many(rng, CATEGORIES, 3),
        "keywords": pick_many(rng, KEYWORDS, 6),
        "styles": styles,
    });
    (name, icon)
}

/// Icons in generation order. `Map` keeps insertion order (serde_json
/// `preserve_order`), so the written catalog follows the index suffixes.
fn generate_catalog(count: usize, seed: u64) -> Map<String, Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut icons = Map::new();
    for i in 0..count {
        let (name, icon) = generate_icon(&mut rng, i);
        icons.insert(name, icon);

        if (i + 1) % 5_000 == 0 {
            println!("  Generated {}/{} icons...", i + 1, count);
        }
    }
    icons
}

fn main() -> Result<()> {
    let output_path = match env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("benches")
            .join("synthetic_icons.json"),
    };

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    println!("Generating performance test catalog...");
    println!("Output: {}", output_path.display());

    let icons = generate_catalog(NUM_ICONS, SEED);
    let source = serde_json::to_string(&Value::Object(icons))?;
    std::fs::write(&output_path, &source)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    let catalog = Catalog::load(&output_path).context("Generated catalog failed to load")?;

    println!();
    println!("Catalog created: {}", output_path.display());
    println!("  Icons: {}", NUM_ICONS);
    println!("  Variants: {}", catalog.len());
    println!("  Size: {:.2} MB", source.len() as f64 / 1024.0 / 1024.0);
    Ok(())
}
