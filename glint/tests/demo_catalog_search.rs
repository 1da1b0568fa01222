//! Ranking behavior over the bundled demo catalog, through the public API.

use glint::{search, Catalog, IconStyle, OutputFormat, QueryConfig, ResultDescriptor};

fn demo() -> Catalog {
    Catalog::from_json_str(demo_catalog::CATALOG_JSON).expect("demo catalog loads")
}

fn names<'a>(results: &[ResultDescriptor<'a>]) -> Vec<&'a str> {
    results.iter().map(|r| r.variant.logical_name.as_str()).collect()
}

#[test]
fn test_demo_catalog_shape() {
    let catalog = demo();
    assert_eq!(catalog.len(), demo_catalog::VARIANT_COUNT);

    // Iteration follows source order: icons first, then their styles
    let first: Vec<(&str, IconStyle)> = catalog.all_entries().take(3).map(|v| v.key()).collect();
    assert_eq!(
        first,
        vec![
            ("star", IconStyle::Solid),
            ("star", IconStyle::Regular),
            ("star-half", IconStyle::Solid),
        ]
    );

    let mut seen = std::collections::HashSet::new();
    for variant in catalog.all_entries() {
        assert!(seen.insert(variant.key()), "duplicate key {:?}", variant.key());
        assert!(demo_catalog::ICON_NAMES.contains(&variant.logical_name));
    }
}

#[test]
fn test_exact_then_prefixes() {
    let catalog = demo();
    let results = search("star", &catalog, &QueryConfig::default());
    assert_eq!(names(&results), vec!["star", "star-half", "star-of-life"]);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_prefix_query() {
    let catalog = demo();
    let results = search("arr", &catalog, &QueryConfig::default());
    assert_eq!(names(&results), vec!["arrow-left", "arrow-right"]);
}

#[test]
fn test_category_query_keeps_catalog_order() {
    let catalog = demo();
    let results = search("medical", &catalog, &QueryConfig::default());
    assert_eq!(
        names(&results),
        vec!["star-of-life", "user-doctor", "hospital", "stethoscope", "heart"]
    );
}

#[test]
fn test_keyword_query() {
    let catalog = demo();
    let results = search("Favorite", &catalog, &QueryConfig::default());
    assert_eq!(names(&results), vec!["star", "heart"]);
}

#[test]
fn test_multi_token_narrows() {
    let catalog = demo();
    let config = QueryConfig::default();
    assert_eq!(names(&search("user medical", &catalog, &config)), vec!["user-doctor"]);
    assert!(search("user nonexistentterm", &catalog, &config).is_empty());
}

#[test]
fn test_style_filter_over_brands() {
    let catalog = demo();
    let results = search("brands github", &catalog, &QueryConfig::default());
    assert_eq!(names(&results), vec!["github", "github-alt", "square-github"]);
    assert!(results.iter().all(|r| r.variant.style == IconStyle::Brands));
}

#[test]
fn test_one_row_per_icon() {
    let catalog = demo();
    let results = search("font-awesome", &catalog, &QueryConfig::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].variant.style, IconStyle::Solid);

    let results = search("font-awesome brands", &catalog, &QueryConfig::default());
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].variant.style, IconStyle::Brands);
    assert_eq!(results[0].copy_payload, r#"<i class="fab fa-font-awesome"></i>"#);
}

#[test]
fn test_limit_is_respected() {
    let catalog = demo();
    for limit in 0..=12 {
        let config = QueryConfig::default().with_limit(limit);
        for (_, query) in demo_catalog::SAMPLE_QUERIES {
            assert!(search(query, &catalog, &config).len() <= limit);
        }
    }
    let config = QueryConfig::default().with_limit(100);
    assert_eq!(search("", &catalog, &config).len(), demo_catalog::VARIANT_COUNT);
}

#[test]
fn test_unicode_payloads() {
    let catalog = demo();
    let config = QueryConfig::default().with_format(OutputFormat::Unicode);
    let results = search("bell", &catalog, &config);
    assert_eq!(results[0].copy_payload, "&#xf0f3;");
}

#[test]
fn test_queries_are_repeatable() {
    let catalog = demo();
    let config = QueryConfig::default().with_format(OutputFormat::Svg);
    for (_, query) in demo_catalog::SAMPLE_QUERIES {
        let first = search(query, &catalog, &config);
        let second = search(query, &catalog, &config);
        assert_eq!(first, second, "query {:?}", query);
    }
}
