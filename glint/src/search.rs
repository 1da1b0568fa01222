//! Query Engine (tiered scoring + dedup by logical name)
//!
//! A query is normalized (trimmed, lowercased) and split on whitespace. Every
//! catalog entry is scored in parallel by `ranking::score_entry`; survivors are
//! sorted by score with catalog order breaking ties, collapsed to one variant
//! per logical name, truncated, and rendered for the configured output format.
//!
//! Tokens that name a style ("brands", "regular", ...) restrict candidates to
//! those styles before scoring. An empty query browses the catalog in order.

use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;

use crate::candidate::SearchCandidate;
use crate::catalog::Catalog;
use crate::config::QueryConfig;
use crate::interface::{HighlightKind, HighlightRange, IconStyle};
use crate::models::IconVariant;
use crate::ranking::{score_entry, EntryScore, MatchTier, QueryToken};
use crate::render;

/// One ranked, render-ready match. Borrows the catalog entry it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultDescriptor<'a> {
    pub variant: &'a IconVariant,
    /// Relevance score; zero for browse results
    pub score: u32,
    /// Row preview (SVG data URI, or class name without markup)
    pub rendered_preview: String,
    /// Clipboard payload for the configured output format
    pub copy_payload: String,
}

/// Position of a scored entry in the catalog plus its score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScoredEntry {
    pub(crate) index: usize,
    pub(crate) score: EntryScore,
}

/// Trim and lowercase
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Split a query into normalized tokens, tagging style names
pub fn tokenize_query(query: &str) -> Vec<QueryToken> {
    normalize_query(query)
        .split_whitespace()
        .map(QueryToken::new)
        .collect()
}

/// Rank the catalog for `query`.
///
/// Returns at most `config.result_limit` descriptors. Never fails: an empty
/// catalog or a query with no matches yields an empty list.
pub fn search<'a>(query: &str, catalog: &'a Catalog, config: &QueryConfig) -> Vec<ResultDescriptor<'a>> {
    if config.result_limit == 0 || catalog.is_empty() {
        return Vec::new();
    }

    let t0 = Instant::now();
    let tokens = tokenize_query(query);
    let ranked = if tokens.is_empty() {
        browse_entries(catalog, config.result_limit)
    } else {
        rank_entries(catalog, &tokens, config.result_limit)
    };

    #[cfg(feature = "perf-log")]
    let t1 = Instant::now();

    let candidates = catalog.candidates();
    let results: Vec<ResultDescriptor<'a>> = ranked
        .iter()
        .map(|entry| describe(candidates[entry.index].variant(), entry.score.total, config))
        .collect();

    #[cfg(feature = "perf-log")]
    tracing::debug!(
        rank_ms = (t1 - t0).as_secs_f64() * 1000.0,
        render_ms = t1.elapsed().as_secs_f64() * 1000.0,
        "search phases"
    );

    tracing::debug!(
        tokens = tokens.len(),
        candidates = catalog.len(),
        results = results.len(),
        elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0,
        "search finished"
    );

    results
}

/// First `limit` entries in catalog order with a neutral score
fn browse_entries(catalog: &Catalog, limit: usize) -> Vec<ScoredEntry> {
    (0..catalog.len().min(limit))
        .map(|index| ScoredEntry {
            index,
            score: EntryScore::NEUTRAL,
        })
        .collect()
}

/// Score, filter, sort, dedup and truncate. `tokens` must be non-empty.
pub(crate) fn rank_entries(catalog: &Catalog, tokens: &[QueryToken], limit: usize) -> Vec<ScoredEntry> {
    let requested_styles: Vec<IconStyle> = tokens.iter().filter_map(|t| t.style).collect();
    let candidates = catalog.candidates();

    #[cfg(feature = "perf-log")]
    let t_score = Instant::now();

    let mut scored: Vec<ScoredEntry> = candidates
        .par_iter()
        .enumerate()
        .filter(|(_, c)| {
            requested_styles.is_empty() || requested_styles.contains(&c.variant().style)
        })
        .filter_map(|(index, c)| score_entry(tokens, c).map(|score| ScoredEntry { index, score }))
        .collect();

    #[cfg(feature = "perf-log")]
    let t_sort = Instant::now();
    #[cfg(feature = "perf-log")]
    let matched = scored.len();

    scored.sort_unstable_by(|a, b| {
        b.score.total.cmp(&a.score.total).then_with(|| a.index.cmp(&b.index))
    });
    order_prefix_ties(candidates, &mut scored);

    // Sorted best-first, so the first variant seen for a name is its best style
    let mut seen: HashSet<&str> = HashSet::with_capacity(scored.len());
    scored.retain(|entry| seen.insert(candidates[entry.index].variant().logical_name.as_str()));
    scored.truncate(limit);

    #[cfg(feature = "perf-log")]
    tracing::debug!(
        matched,
        score_ms = (t_sort - t_score).as_secs_f64() * 1000.0,
        sort_ms = t_sort.elapsed().as_secs_f64() * 1000.0,
        "rank phases"
    );

    scored
}

/// Within each run of equal scores, reorder the name-prefix matches among
/// the slots they already occupy: shorter name first, then alphabetical.
/// Every other entry keeps its catalog-order slot.
fn order_prefix_ties(candidates: &[SearchCandidate], scored: &mut [ScoredEntry]) {
    let mut start = 0;
    while start < scored.len() {
        let total = scored[start].score.total;
        let run = scored[start..]
            .iter()
            .take_while(|entry| entry.score.total == total)
            .count();
        let group = &mut scored[start..start + run];
        start += run;

        let slots: Vec<usize> = group
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.score.best_tier == MatchTier::NamePrefix)
            .map(|(slot, _)| slot)
            .collect();
        if slots.len() < 2 {
            continue;
        }

        let mut prefixed: Vec<ScoredEntry> = slots.iter().map(|&slot| group[slot]).collect();
        prefixed.sort_by_cached_key(|entry| {
            let name = candidates[entry.index].name_lower();
            (name.chars().count(), name, entry.index)
        });
        for (&slot, entry) in slots.iter().zip(prefixed) {
            group[slot] = entry;
        }
    }
}

fn describe<'a>(variant: &'a IconVariant, score: u32, config: &QueryConfig) -> ResultDescriptor<'a> {
    ResultDescriptor {
        variant,
        score,
        rendered_preview: render::rendered_preview(variant, &config.preview_color),
        copy_payload: render::copy_payload(variant, config.output_format, &config.preview_color),
    }
}

/// Character ranges of `name` matched by the query's tokens.
/// Overlapping matches keep the earlier (then longer) range.
pub fn name_highlights(name: &str, query: &str) -> Vec<HighlightRange> {
    // Lowercasing may expand a char ("İ" -> "i̇"), so keep the original char
    // index of every lowercased char
    let mut name_lower = String::with_capacity(name.len());
    let mut origin: Vec<usize> = Vec::with_capacity(name.len());
    let mut name_len = 0;
    for (i, ch) in name.chars().enumerate() {
        for lower in ch.to_lowercase() {
            name_lower.push(lower);
            origin.push(i);
        }
        name_len = i + 1;
    }
    let to_original = |start: usize, end: usize| (origin[start], origin[end - 1] + 1);

    let mut ranges: Vec<(usize, usize, HighlightKind)> = tokenize_query(query)
        .iter()
        .filter_map(|token| {
            let token_len = token.text.chars().count();
            if name_lower == token.text {
                Some((0, name_len, HighlightKind::Exact))
            } else if name_lower.starts_with(&token.text) {
                let (start, end) = to_original(0, token_len);
                Some((start, end, HighlightKind::Prefix))
            } else {
                name_lower.find(&token.text).map(|byte_offset| {
                    let lower_start = name_lower[..byte_offset].chars().count();
                    let (start, end) = to_original(lower_start, lower_start + token_len);
                    (start, end, HighlightKind::Substring)
                })
            }
        })
        .collect();

    ranges.sort_unstable_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)));

    let mut highlights: Vec<HighlightRange> = Vec::with_capacity(ranges.len());
    for (start, end, kind) in ranges {
        if highlights.last().map_or(false, |last| (start as u64) < last.end) {
            continue;
        }
        highlights.push(HighlightRange {
            start: start as u64,
            end: end as u64,
            kind,
        });
    }
    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::OutputFormat;
    use crate::models::test_variant;
    use crate::ranking::{EXACT_NAME_SCORE, STYLE_MATCH_BOOST};

    struct Entry<'a> {
        name: &'a str,
        style: IconStyle,
        categories: &'a [&'a str],
        keywords: &'a [&'a str],
    }

    fn e<'a>(name: &'a str, style: IconStyle) -> Entry<'a> {
        Entry { name, style, categories: &[], keywords: &[] }
    }

    fn catalog(entries: &[Entry]) -> Catalog {
        let variants = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut variant = test_variant(entry.name, entry.style);
                variant.unicode_codepoint = format!("e{:03x}", i);
                variant.categories = entry.categories.iter().map(|s| s.to_string()).collect();
                variant.keywords = entry.keywords.iter().map(|s| s.to_string()).collect();
                variant
            })
            .collect();
        Catalog::from_variants(variants).unwrap()
    }

    fn config(limit: usize) -> QueryConfig {
        QueryConfig::default().with_limit(limit)
    }

    fn keys<'a>(results: &[ResultDescriptor<'a>]) -> Vec<(&'a str, IconStyle)> {
        results.iter().map(|r| r.variant.key()).collect()
    }

    fn names<'a>(results: &[ResultDescriptor<'a>]) -> Vec<&'a str> {
        results.iter().map(|r| r.variant.logical_name.as_str()).collect()
    }

    // ── normalization ────────────────────────────────────────────

    #[test]
    fn test_tokenize_query() {
        let tokens = tokenize_query("  Brands   GitHub ");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["brands", "github"]);
        assert_eq!(tokens[0].style, Some(IconStyle::Brands));
        assert_eq!(tokens[1].style, None);
        assert!(tokenize_query(" \t\n").is_empty());
    }

    // ── browse (empty query) ─────────────────────────────────────

    #[test]
    fn test_empty_query_browses_in_catalog_order() {
        let cat = catalog(&[
            e("zebra", IconStyle::Solid),
            e("apple", IconStyle::Solid),
            e("apple", IconStyle::Regular),
        ]);
        for query in ["", "   ", "\t"] {
            let results = search(query, &cat, &config(10));
            assert_eq!(
                keys(&results),
                vec![
                    ("zebra", IconStyle::Solid),
                    ("apple", IconStyle::Solid),
                    ("apple", IconStyle::Regular),
                ]
            );
            assert!(results.iter().all(|r| r.score == 0));
        }
        assert_eq!(search("", &cat, &config(2)).len(), 2);
    }

    // ── limits and degenerate inputs ─────────────────────────────

    #[test]
    fn test_zero_limit_is_empty() {
        let cat = catalog(&[e("star", IconStyle::Solid)]);
        assert!(search("", &cat, &config(0)).is_empty());
        assert!(search("star", &cat, &config(0)).is_empty());
    }

    #[test]
    fn test_empty_catalog_is_empty() {
        let cat = catalog(&[]);
        assert!(search("", &cat, &config(10)).is_empty());
        assert!(search("star", &cat, &config(10)).is_empty());
    }

    #[test]
    fn test_results_never_exceed_limit() {
        let entries: Vec<String> = (0..30).map(|i| format!("star-{}", i)).collect();
        let cat = catalog(&entries.iter().map(|n| e(n, IconStyle::Solid)).collect::<Vec<_>>());
        for limit in [1, 5, 29, 30, 31] {
            assert!(search("star", &cat, &config(limit)).len() <= limit);
            assert!(search("", &cat, &config(limit)).len() <= limit);
        }
        assert_eq!(search("star", &cat, &config(100)).len(), 30);
    }

    #[test]
    fn test_no_match_is_empty() {
        let cat = catalog(&[e("star", IconStyle::Solid)]);
        assert!(search("moon", &cat, &config(10)).is_empty());
    }

    // ── tier ordering ────────────────────────────────────────────

    #[test]
    fn test_exact_beats_prefix() {
        let cat = catalog(&[e("stars", IconStyle::Solid), e("star", IconStyle::Solid)]);
        let results = search("star", &cat, &config(10));
        assert_eq!(names(&results), vec!["star", "stars"]);
        assert!(results[0].score > results[1].score);
    }

    #[test]
    fn test_tiers_rank_in_order() {
        let cat = catalog(&[
            Entry { name: "kw-substring", style: IconStyle::Solid, categories: &[], keywords: &["superbell"] },
            Entry { name: "kw-exact", style: IconStyle::Solid, categories: &[], keywords: &["bell"] },
            Entry { name: "cat", style: IconStyle::Solid, categories: &["bells"], keywords: &[] },
            e("big-bell", IconStyle::Solid),
            e("bell-slash", IconStyle::Solid),
            e("bell", IconStyle::Solid),
        ]);
        let results = search("bell", &cat, &config(10));
        assert_eq!(
            names(&results),
            vec!["bell", "bell-slash", "big-bell", "cat", "kw-exact", "kw-substring"]
        );
    }

    #[test]
    fn test_prefix_ties_break_by_length_then_alphabetically() {
        let cat = catalog(&[
            e("arrow-up-long", IconStyle::Solid),
            e("arrow-up", IconStyle::Solid),
            e("arrow-right", IconStyle::Solid),
            e("arrow-left", IconStyle::Solid),
        ]);
        let results = search("arrow", &cat, &config(10));
        assert_eq!(names(&results), vec!["arrow-up", "arrow-left", "arrow-right", "arrow-up-long"]);
    }

    #[test]
    fn test_equal_prefix_scores_sort_alphabetically() {
        let cat = catalog(&[
            e("arrow-up", IconStyle::Solid),
            Entry { name: "pointer", style: IconStyle::Solid, categories: &[], keywords: &["arrow"] },
            e("arrow-in", IconStyle::Solid),
        ]);
        let results = search("arrow", &cat, &config(10));
        assert_eq!(names(&results), vec!["arrow-in", "arrow-up", "pointer"]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_equal_scores_across_tiers_keep_catalog_order() {
        // category + category vs name substring + keyword substring, both 800
        let far_name = format!("{}foo", "y".repeat(50));
        let cat = catalog(&[
            Entry { name: "alpha", style: IconStyle::Solid, categories: &["foo", "bar"], keywords: &[] },
            Entry { name: &far_name, style: IconStyle::Solid, categories: &[], keywords: &["xbarx"] },
        ]);
        let results = search("foo bar", &cat, &config(10));
        assert_eq!(names(&results), vec!["alpha", far_name.as_str()]);
        assert_eq!(results[0].score, results[1].score);
    }

    #[test]
    fn test_equal_scores_keep_catalog_order() {
        let cat = catalog(&[
            Entry { name: "b", style: IconStyle::Solid, categories: &[], keywords: &["shared"] },
            Entry { name: "a", style: IconStyle::Solid, categories: &[], keywords: &["shared"] },
            Entry { name: "c", style: IconStyle::Solid, categories: &[], keywords: &["shared"] },
        ]);
        assert_eq!(names(&search("shared", &cat, &config(10))), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_search_is_deterministic() {
        let cat = Catalog::from_json_str(demo_catalog::CATALOG_JSON).unwrap();
        for (_, query) in demo_catalog::SAMPLE_QUERIES {
            let first = search(query, &cat, &config(50));
            for _ in 0..5 {
                assert_eq!(search(query, &cat, &config(50)), first, "query {:?}", query);
            }
        }
    }

    // ── dedup and style filtering ────────────────────────────────

    fn github_catalog() -> Catalog {
        catalog(&[
            e("github", IconStyle::Solid),
            e("github", IconStyle::Regular),
            e("github", IconStyle::Brands),
            e("square-github", IconStyle::Solid),
            e("square-github", IconStyle::Brands),
        ])
    }

    #[test]
    fn test_dedup_returns_one_variant_per_name() {
        let cat = github_catalog();
        let results = search("github", &cat, &config(10));
        assert_eq!(names(&results), vec!["github", "square-github"]);
        // Equal scores across styles: the first in catalog order wins
        assert_eq!(results[0].variant.style, IconStyle::Solid);
    }

    #[test]
    fn test_style_token_filters_variants() {
        let cat = github_catalog();
        let results = search("brands github", &cat, &config(10));
        assert_eq!(
            keys(&results),
            vec![("github", IconStyle::Brands), ("square-github", IconStyle::Brands)]
        );
        assert_eq!(results[0].score, EXACT_NAME_SCORE + STYLE_MATCH_BOOST);
    }

    #[test]
    fn test_style_token_order_does_not_matter() {
        let cat = github_catalog();
        let a = search("brands github", &cat, &config(10));
        let b = search("github brands", &cat, &config(10));
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_style_tokens_allow_either_style() {
        let cat = github_catalog();
        let results = search("regular brands github", &cat, &config(10));
        assert_eq!(
            keys(&results),
            vec![("github", IconStyle::Regular), ("square-github", IconStyle::Brands)]
        );
    }

    #[test]
    fn test_style_only_query_needs_text_match() {
        let cat = github_catalog();
        let results = search("brands", &cat, &config(10));
        assert!(results.is_empty());
    }

    // ── multi-token AND ──────────────────────────────────────────

    #[test]
    fn test_multi_token_and_semantics() {
        let cat = catalog(&[
            Entry { name: "user", style: IconStyle::Solid, categories: &["medical"], keywords: &[] },
            e("user-plus", IconStyle::Solid),
        ]);
        assert!(search("user nonexistentterm", &cat, &config(10)).is_empty());
        assert_eq!(names(&search("user medical", &cat, &config(10))), vec!["user"]);
    }

    // ── rendering ────────────────────────────────────────────────

    #[test]
    fn test_rendering_follows_config() {
        let cat = catalog(&[e("star", IconStyle::Solid)]);
        let results = search("star", &cat, &config(10).with_format(OutputFormat::Class));
        assert_eq!(results[0].copy_payload, "fas fa-star");
        assert!(results[0].rendered_preview.starts_with("data:image/svg+xml;base64,"));

        let results = search("star", &cat, &config(10).with_format(OutputFormat::Html));
        assert_eq!(results[0].copy_payload, r#"<i class="fas fa-star"></i>"#);
    }

    #[test]
    fn test_descriptor_references_catalog_entry() {
        let cat = catalog(&[e("star", IconStyle::Solid)]);
        let results = search("star", &cat, &config(10));
        let entry = cat.get("star", IconStyle::Solid).unwrap();
        assert!(std::ptr::eq(results[0].variant, entry));
    }

    // ── highlights ───────────────────────────────────────────────

    #[test]
    fn test_name_highlights() {
        assert_eq!(
            name_highlights("star", "star"),
            vec![HighlightRange { start: 0, end: 4, kind: HighlightKind::Exact }]
        );
        assert_eq!(
            name_highlights("star-half", "star"),
            vec![HighlightRange { start: 0, end: 4, kind: HighlightKind::Prefix }]
        );
        assert_eq!(
            name_highlights("square-github", "brands GitHub"),
            vec![HighlightRange { start: 7, end: 13, kind: HighlightKind::Substring }]
        );
        assert!(name_highlights("user", "medical").is_empty());
    }

    #[test]
    fn test_name_highlights_use_original_char_offsets() {
        // "İ" lowercases to two chars
        assert_eq!(
            name_highlights("İstanbul", "stanbul"),
            vec![HighlightRange { start: 1, end: 8, kind: HighlightKind::Substring }]
        );
        assert_eq!(
            name_highlights("Ab-İx", "x"),
            vec![HighlightRange { start: 4, end: 5, kind: HighlightKind::Substring }]
        );
    }

    #[test]
    fn test_name_highlights_skip_overlaps() {
        let highlights = name_highlights("arrow-right", "arrow arr right");
        assert_eq!(
            highlights,
            vec![
                HighlightRange { start: 0, end: 5, kind: HighlightKind::Prefix },
                HighlightRange { start: 6, end: 11, kind: HighlightKind::Substring },
            ]
        );
    }
}
