//! Neutrality cleaning for candidate fact strings.
//!
//! A single pure pass that normalizes whitespace and punctuation and
//! strips a fixed vocabulary of promotional adjectives, so downstream
//! consumers can display the text without editorializing.

use std::sync::LazyLock;

use regex::Regex;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Non-greedy, so nested parentheses are not handled: "(a (b) c)" drops
// only "(a (b)" worth of span up to the first ')'. Known limitation.
static RE_PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").unwrap());

static RE_PROMOTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(leading|premier|renowned|world[- ]class|iconic|innovative|cutting-edge|award[- ]winning|best|ultimate|state-of-the-art|top[- ]tier)\b",
    )
    .unwrap()
});

/// Drop parenthetical asides and em-dashes without any other
/// normalization. Used on the Wikipedia intro extract before sentence
/// splitting, so asides spanning a sentence boundary vanish whole.
pub(crate) fn strip_asides(text: &str) -> String {
    RE_PARENTHETICAL.replace_all(text, "").replace('\u{2014}', " ")
}

/// Clean a candidate fact string.
///
/// Collapses runs of whitespace, maps curly quotes/apostrophes and
/// em-dashes to plain ASCII, drops parenthetical asides, removes
/// promotional adjectives, and collapses again so the result carries
/// no double spaces. Empty input yields an empty string.
///
/// Idempotent: `clean(clean(s)) == clean(s)`.
pub fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = RE_WHITESPACE.replace_all(raw, " ");
    let text = text
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace('\u{2019}', "'")
        .replace('\u{2014}', " ");
    let mut text = RE_PARENTHETICAL.replace_all(&text, "").into_owned();

    // Stripping can expose new matches for the spaced phrases: a
    // dropped aside leaves "world  class", and removing a word can
    // splice its neighbors into "world class". Collapse and strip to a
    // fixpoint (each removal shortens the string, so this terminates).
    loop {
        let pass = RE_WHITESPACE.replace_all(&text, " ");
        let pass = RE_PROMOTIONAL.replace_all(&pass, "").into_owned();
        if pass == text {
            break;
        }
        text = pass;
    }

    text.trim().to_string()
}
