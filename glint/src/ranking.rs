//! Tiered ranking for icon search.
//!
//! Every query token is matched against the icon name, then categories, then
//! keywords, and scored by the best tier it reaches. Tier base scores are spaced
//! so that within-tier adjustments (suffix length, substring offset) can never
//! push a match into a neighbouring tier: exact always beats prefix, prefix
//! always beats substring, and so on down to keyword substrings.
//!
//! An entry's score is the sum of its per-token scores. Every token must
//! qualify (AND semantics), and at least one token must match text; a token
//! that only names a style adds a boost but never qualifies an entry alone.

use crate::candidate::SearchCandidate;
use crate::interface::IconStyle;

/// `logical_name == token`
pub const EXACT_NAME_SCORE: u32 = 1000;
/// Name starts with the token, minus the length of the remaining suffix
pub const NAME_PREFIX_SCORE: u32 = 800;
/// Name contains the token, minus the character offset of the first occurrence
pub const NAME_SUBSTRING_SCORE: u32 = 600;
/// A category equals or contains the token
pub const CATEGORY_SCORE: u32 = 400;
/// A keyword equals the token
pub const KEYWORD_EXACT_SCORE: u32 = 350;
/// A keyword contains the token
pub const KEYWORD_SUBSTRING_SCORE: u32 = 250;
/// Added when a token names the variant's style
pub const STYLE_MATCH_BOOST: u32 = 100;

/// Cap on within-tier penalties. Must stay below the gap between the prefix,
/// substring and category base scores.
pub const MAX_TIER_PENALTY: u32 = 150;

/// Match quality of one token against one entry. Derived `Ord` follows
/// declaration order, so later variants are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    None,
    KeywordSubstring,
    KeywordExact,
    Category,
    NameSubstring,
    NamePrefix,
    ExactName,
}

impl MatchTier {
    /// Base score before within-tier adjustments
    pub fn base_score(&self) -> u32 {
        match self {
            MatchTier::None => 0,
            MatchTier::KeywordSubstring => KEYWORD_SUBSTRING_SCORE,
            MatchTier::KeywordExact => KEYWORD_EXACT_SCORE,
            MatchTier::Category => CATEGORY_SCORE,
            MatchTier::NameSubstring => NAME_SUBSTRING_SCORE,
            MatchTier::NamePrefix => NAME_PREFIX_SCORE,
            MatchTier::ExactName => EXACT_NAME_SCORE,
        }
    }

    /// Whether the tier comes from the icon name (and can be highlighted in the title)
    pub fn is_name_match(&self) -> bool {
        matches!(
            self,
            MatchTier::ExactName | MatchTier::NamePrefix | MatchTier::NameSubstring
        )
    }
}

/// One whitespace-separated piece of a normalized query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryToken {
    pub text: String,
    /// Set when the token is exactly a style name ("brands", "regular", ...)
    pub style: Option<IconStyle>,
}

impl QueryToken {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: IconStyle::parse(text),
        }
    }
}

/// Best textual match of a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch {
    pub tier: MatchTier,
    pub score: u32,
}

impl TokenMatch {
    const NONE: TokenMatch = TokenMatch { tier: MatchTier::None, score: 0 };

    fn new(tier: MatchTier, penalty: usize) -> Self {
        let penalty = (penalty as u32).min(MAX_TIER_PENALTY);
        Self {
            tier,
            score: tier.base_score() - penalty,
        }
    }
}

/// Aggregated score of an entry across all tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryScore {
    pub total: u32,
    /// Best tier reached by any token
    pub best_tier: MatchTier,
}

impl EntryScore {
    /// Score used for browse results (empty query)
    pub const NEUTRAL: EntryScore = EntryScore { total: 0, best_tier: MatchTier::None };
}

/// Score one (lowercased, non-empty) token against a candidate's text fields.
/// Returns the highest tier only; lower tiers are not inspected once one matches.
pub fn score_token(token: &str, candidate: &SearchCandidate) -> TokenMatch {
    if token.is_empty() {
        return TokenMatch::NONE;
    }

    let name = candidate.name_lower();
    if name == token {
        return TokenMatch::new(MatchTier::ExactName, 0);
    }
    if name.starts_with(token) {
        let extra = name.chars().count() - token.chars().count();
        return TokenMatch::new(MatchTier::NamePrefix, extra);
    }
    if let Some(byte_offset) = name.find(token) {
        let offset = name[..byte_offset].chars().count();
        return TokenMatch::new(MatchTier::NameSubstring, offset);
    }

    if candidate
        .categories_lower()
        .iter()
        .any(|c| c.contains(token))
    {
        return TokenMatch::new(MatchTier::Category, 0);
    }

    let keywords = candidate.keywords_lower();
    if keywords.iter().any(|k| k == token) {
        return TokenMatch::new(MatchTier::KeywordExact, 0);
    }
    if keywords.iter().any(|k| k.contains(token)) {
        return TokenMatch::new(MatchTier::KeywordSubstring, 0);
    }

    TokenMatch::NONE
}

/// Score an entry against all query tokens.
///
/// Style tokens always qualify here: the caller has already restricted the
/// candidates to the requested styles. `None` means the entry is excluded.
pub fn score_entry(tokens: &[QueryToken], candidate: &SearchCandidate) -> Option<EntryScore> {
    let style = candidate.variant().style;
    let mut total = 0u32;
    let mut best_tier = MatchTier::None;

    for token in tokens {
        let matched = score_token(&token.text, candidate);
        if matched.tier == MatchTier::None && token.style.is_none() {
            return None;
        }
        total += matched.score;
        if token.style == Some(style) {
            total += STYLE_MATCH_BOOST;
        }
        best_tier = best_tier.max(matched.tier);
    }

    if best_tier == MatchTier::None {
        return None;
    }

    Some(EntryScore { total, best_tier })
}
