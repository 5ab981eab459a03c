//! Text normalization and tokenization for catalog search.

use unicode_normalization::UnicodeNormalization;

/// Spanish filler words dropped during tokenization.
pub const STOPWORDS: &[&str] = &[
    "de", "del", "la", "el", "los", "las", "un", "una", "unos", "unas", "para", "por", "que",
    "esta", "estoy", "busco", "buscar", "quiero", "necesito", "puedes", "ayudarme", "encontrar",
];

/// Lowercase, fold diacritics, replace everything outside `a-z0-9` with
/// spaces and collapse runs. Idempotent, so already-normalized text passes
/// through unchanged.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.to_lowercase().nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            out.push(ch);
        } else {
            out.push(' ');
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase and fold diacritics only, keeping punctuation and symbols.
/// Category names like `plata.925` need the dot to survive.
pub fn strip_accents(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_combining_mark(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

/// Search tokens from free text: normalized words, singularized, with
/// stopwords and single characters removed.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(singularize)
        .filter(|token| token.len() >= 2 && !STOPWORDS.contains(&token.as_str()))
        .collect()
}

/// Naive Spanish singularization: drop a trailing `s` from words longer
/// than three characters so `anillos` and `anillo` hit the same rows.
fn singularize(word: &str) -> String {
    if word.len() > 3 && word.ends_with('s') {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}
