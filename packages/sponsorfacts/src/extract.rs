//! Heuristic fact extraction from raw HTML.
//!
//! A small ordered list of regex rules, each yielding at most one
//! candidate. This is deliberately *not* an HTML parser: the rules are
//! best-effort pattern matches over the raw markup, and malformed input
//! simply produces fewer candidates. Swapping in a real parser would
//! change which candidates are found.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

use crate::clean::clean;

/// Candidates at or above this length after cleaning are dropped.
const MAX_FACT_CHARS: usize = 180;

/// Body-sentence selection bounds (exclusive, on the trimmed sentence).
const SENTENCE_MIN_CHARS: usize = 40;
const SENTENCE_MAX_CHARS: usize = 200;

static RE_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>(.*?)</title>").unwrap());
static RE_OG_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+property=["']og:description["'][^>]+content=["']([^"']+)["']"#)
        .unwrap()
});
static RE_META_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+name=["']description["'][^>]+content=["']([^"']+)["']"#).unwrap()
});
static RE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script.*?</script>").unwrap());
static RE_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style.*?</style>").unwrap());
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_FOUNDED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)founded\s+in\s+(\d{4})").unwrap());
static RE_HEADQUARTERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i:headquartered\s+in\s+)([A-Z][A-Za-z\s,]+)").unwrap());

/// First capture group of `re` in `haystack`, trimmed, if non-empty.
fn match1(re: &Regex, haystack: &str) -> Option<String> {
    let captured = re.captures(haystack)?.get(1)?.as_str().trim();
    if captured.is_empty() {
        None
    } else {
        Some(captured.to_string())
    }
}

/// Plain-text rendering of the page body: scripts and styles removed
/// entirely, remaining tags stripped, whitespace collapsed.
fn body_text(html: &str) -> String {
    let text = RE_SCRIPT.replace_all(html, " ");
    let text = RE_STYLE.replace_all(&text, " ");
    let text = RE_TAG.replace_all(&text, " ");
    RE_WHITESPACE.replace_all(&text, " ").into_owned()
}

/// First `.`-delimited sentence whose trimmed length falls strictly
/// between the substantive-but-short bounds.
fn first_substantive_sentence(text: &str) -> Option<String> {
    text.split('.').map(str::trim).find_map(|sentence| {
        let len = sentence.chars().count();
        if len > SENTENCE_MIN_CHARS && len < SENTENCE_MAX_CHARS {
            Some(sentence.to_string())
        } else {
            None
        }
    })
}

/// Derive candidate facts from raw HTML.
///
/// Rules run in a fixed order (title, og:description, meta description,
/// founded-in year, headquartered-in place, first substantive body
/// sentence); every candidate is cleaned, empties and over-long results
/// are dropped, and duplicates are suppressed with insertion order
/// preserved. Never fails: input that matches nothing yields an empty
/// set.
pub fn extract_facts(html: &str) -> IndexSet<String> {
    let mut raw: Vec<String> = Vec::new();

    for re in [&RE_TITLE, &RE_OG_DESCRIPTION, &RE_META_DESCRIPTION] {
        if let Some(candidate) = match1(re, html) {
            raw.push(candidate);
        }
    }

    let text = body_text(html);

    if let Some(year) = match1(&RE_FOUNDED, &text) {
        raw.push(format!("founded in {year}"));
    }
    if let Some(place) = match1(&RE_HEADQUARTERED, &text) {
        raw.push(format!("headquartered in {place}"));
    }
    if let Some(sentence) = first_substantive_sentence(&text) {
        raw.push(sentence);
    }

    raw.into_iter()
        .map(|candidate| clean(&candidate))
        .filter(|candidate| !candidate.is_empty() && candidate.chars().count() < MAX_FACT_CHARS)
        .collect()
}
