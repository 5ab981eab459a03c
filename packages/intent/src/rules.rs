//! Keyword tables driving extraction and relaxed search.
//!
//! Everything the extractor recognizes lives here as data so new surface
//! forms land as one-line table edits.

use crate::text::normalize;

/// Canonical catalog category with its surface forms.
pub struct CategoryRule {
    /// Name as stored in the categories table, e.g. `Anillo`.
    pub canonical: &'static str,
    /// Singular type word used when building relaxed search queries.
    pub keyword: &'static str,
    pub forms: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        canonical: "Anillo",
        keyword: "anillo",
        forms: &["anillo", "anillos", "sortija", "sortijas"],
    },
    CategoryRule {
        canonical: "Collar",
        keyword: "collar",
        forms: &["collar", "collares", "gargantilla", "gargantillas"],
    },
    CategoryRule {
        canonical: "Pulsera",
        keyword: "pulsera",
        forms: &["pulsera", "pulseras", "brazalete", "brazaletes"],
    },
    CategoryRule {
        canonical: "Arete",
        keyword: "arete",
        forms: &["arete", "aretes", "pendiente", "pendientes", "aros", "piercing"],
    },
];

/// Keyword with the surface forms that map to it.
pub struct KeywordRule {
    pub keyword: &'static str,
    pub forms: &'static [&'static str],
}

/// Materials, checked in order; the first hit wins.
pub const MATERIAL_RULES: &[KeywordRule] = &[
    KeywordRule { keyword: "oro", forms: &["oro", "dorado", "dorada", "dorados", "doradas"] },
    KeywordRule { keyword: "plata", forms: &["plata", "plateado", "plateada", "plateados", "plateadas"] },
    KeywordRule { keyword: "acero", forms: &["acero", "acero inoxidable", "acero quirurgico"] },
    KeywordRule { keyword: "rodio", forms: &["rodio", "rodinado", "bano de oro"] },
];

/// Product features that only feed relaxed search queries.
pub const FEATURE_RULES: &[KeywordRule] = &[
    KeywordRule { keyword: "cadena", forms: &["cadena", "cadenas"] },
    KeywordRule { keyword: "dorado", forms: &["dorado", "dorada"] },
    KeywordRule { keyword: "plateado", forms: &["plateado", "plateada"] },
    KeywordRule { keyword: "perla", forms: &["perla", "perlas"] },
    KeywordRule { keyword: "diamante", forms: &["diamante", "diamantes"] },
    KeywordRule { keyword: "esmeralda", forms: &["esmeralda", "esmeraldas"] },
    KeywordRule { keyword: "zafiro", forms: &["zafiro", "zafiros"] },
    KeywordRule { keyword: "rubi", forms: &["rubi", "rubies"] },
];

/// Verbs that signal a catalog request.
pub const INTENT_VERBS: &[&str] = &[
    "busca", "buscar", "muestrame", "quiero", "necesito", "tienen", "tienes", "hay", "existen",
    "dame", "ver",
];

/// Availability phrases that switch on the in-stock filter.
pub const STOCK_PHRASES: &[&str] = &[
    "en stock", "disponible", "disponibles", "disponibilidad", "existencia", "existencias", "hay",
    "tienen", "tienes",
];

/// Command vocabulary removed when deriving free search text.
pub const COMMAND_WORDS: &[&str] = &[
    "busca", "buscar", "muestrame", "quiero", "necesito", "tienen", "tienes", "hay", "existen",
    "dame", "ver", "en", "de", "la", "el", "los", "las", "un", "una", "unos", "unas",
];

/// Price vocabulary left over once the numeric phrases are gone.
pub const PRICE_WORDS: &[&str] = &[
    "entre", "rango", "hasta", "desde", "maximo", "minimo", "menos", "mas", "precio", "a", "y",
    "al",
];

/// Word-bounded containment on normalized text. Multi-word forms match as
/// phrases; both sides must already be normalized.
pub fn has_term(normalized: &str, form: &str) -> bool {
    format!(" {} ", normalized).contains(&format!(" {} ", form))
}

/// First category whose surface form appears in the text.
pub fn detect_category(normalized: &str) -> Option<&'static CategoryRule> {
    CATEGORY_RULES
        .iter()
        .find(|rule| rule.forms.iter().any(|form| has_term(normalized, form)))
}

/// First material keyword whose surface form appears in the text.
pub fn detect_material(normalized: &str) -> Option<&'static str> {
    MATERIAL_RULES
        .iter()
        .find(|rule| rule.forms.iter().any(|form| has_term(normalized, form)))
        .map(|rule| rule.keyword)
}

pub fn has_intent_verb(normalized: &str) -> bool {
    INTENT_VERBS.iter().any(|verb| has_term(normalized, verb))
}

pub fn has_stock_phrase(normalized: &str) -> bool {
    STOCK_PHRASES.iter().any(|phrase| has_term(normalized, phrase))
}

/// Jewelry keywords present in an utterance, in table order and without
/// duplicates: category type words first, then materials, then features.
pub fn keywords_from_message(message: &str) -> Vec<&'static str> {
    let normalized = normalize(message);
    let mut found: Vec<&'static str> = Vec::new();
    for rule in CATEGORY_RULES {
        if rule.forms.iter().any(|form| has_term(&normalized, form)) {
            found.push(rule.keyword);
        }
    }
    for rule in MATERIAL_RULES.iter().chain(FEATURE_RULES) {
        if !found.contains(&rule.keyword)
            && rule.forms.iter().any(|form| has_term(&normalized, form))
        {
            found.push(rule.keyword);
        }
    }
    found
}

/// The subset of keywords naming a product type, used to build the
/// loosest useful relaxed query.
pub fn product_type_keywords<'a>(keywords: &[&'a str]) -> Vec<&'a str> {
    const TYPES: &[&str] = &["anillo", "collar", "pulsera", "arete", "cadena"];
    keywords.iter().copied().filter(|k| TYPES.contains(k)).collect()
}
