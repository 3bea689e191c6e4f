//! Text normalizer for the local fallback classifier.
//!
//! Lowercases, collapses whitespace, strips punctuation, drops English and
//! Brazilian Portuguese stopwords, then applies a light suffix strip.
//! Pure and deterministic: no I/O, no language detection.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Unicode punctuation and symbols, a superset of ASCII punctuation.
static PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\p{P}\p{S}]").unwrap());

/// Suffixes tried in order; the first one that fits wins. `edly` is listed
/// twice and the second entry never matches.
const SUFFIXES: [&str; 5] = ["ing", "edly", "edly", "ed", "s"];

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        // English
        "a", "an", "the", "and", "or", "but", "if", "while", "of", "to", "in", "on", "for",
        "at", "by", "from", "with", "as", "is", "are", "was", "were", "be", "been", "being",
        "this", "that", "these", "those", "it", "its", "i", "you", "your", "yours", "we",
        "our", "ours", "they", "their", "theirs", "he", "she", "him", "her", "his", "hers",
        "not", "no", "do", "does", "did", "done", "can", "could", "should", "would", "will",
        "just", "so", "than", "then", "there", "here", "about", "into", "over", "under",
        // Portuguese (pt-BR)
        "o", "os", "um", "uma", "uns", "umas",
        "de", "da", "das", "dos", "duma", "dum", "dumas", "duns",
        "em", "na", "nos", "nas", "num", "numa", "nuns", "numas",
        "por", "pelo", "pela", "pelos", "pelas",
        "para", "pra", "com", "sem", "sob", "sobre", "entre", "até", "após", "antes", "desde",
        "durante", "contra", "perante",
        "e", "ou", "mas", "porém", "contudo", "todavia", "porque", "que", "como", "quando", "onde",
        "se", "pois", "portanto", "então", "também", "ainda", "já", "só", "somente", "nunca",
        "sempre", "talvez",
        "muito", "muita", "muitos", "muitas", "pouco", "pouca", "poucos", "poucas", "todo", "toda",
        "todos", "todas",
        "mesmo", "mesma", "mesmos", "mesmas", "cada", "qualquer", "quaisquer", "nada", "tudo",
        "eu", "tu", "você", "vocês", "ele", "ela", "eles", "elas", "nós", "vós",
        "me", "te", "vos", "lhe", "lhes",
        "meu", "minha", "meus", "minhas", "teu", "tua", "teus", "tuas",
        "seu", "sua", "seus", "suas", "dele", "dela", "deles", "delas",
        "este", "esta", "estes", "estas", "esse", "essa", "esses", "essas", "aquele", "aquela",
        "aqueles", "aquelas", "isto", "isso", "aquilo",
        "aqui", "aí", "ali", "lá",
        "ser", "estar", "ter", "haver", "foi", "era", "são", "está", "estão", "fui", "foram",
    ])
});

/// Whether `token` is in the fixed bilingual stopword set (exact match).
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Lowercase, collapse whitespace, strip punctuation and split into tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let stripped = PUNCTUATION.replace_all(&collapsed, "");
    stripped
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip the first listed suffix that leaves more than two characters.
pub fn stem(token: &str) -> &str {
    let len = token.chars().count();
    for suffix in SUFFIXES {
        if len > suffix.len() + 2 {
            if let Some(stripped) = token.strip_suffix(suffix) {
                return stripped;
            }
        }
    }
    token
}

/// Full normalization: tokenize, drop stopwords, stem.
pub fn normalize(text: &str) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .map(|t| stem(&t).to_string())
        .collect()
}

/// Stopword-filtered tokens joined by single spaces, before stemming.
///
/// `normalize(&canonical_text(x)) == normalize(x)` for any `x`. Stemming
/// itself is not idempotent ("meetings" -> "meeting" -> "meet"), so the
/// fixed point lives here rather than on the stemmed output.
pub fn canonical_text(text: &str) -> String {
    tokenize(text)
        .into_iter()
        .filter(|t| !is_stopword(t))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tokenize_lowercases_and_strips_punctuation() {
        assert_eq!(
            tokenize("Hello,   WORLD!\nHow's\tit going?"),
            vec!["hello", "world", "hows", "it", "going"]
        );
    }

    #[test]
    fn punctuation_between_spaces_leaves_no_empty_token() {
        assert_eq!(tokenize("a - b"), vec!["a", "b"]);
        assert!(tokenize("  ... !!! ").is_empty());
    }

    #[test]
    fn punctuation_does_not_split_words() {
        assert_eq!(tokenize("e-mail follow-up"), vec!["email", "followup"]);
    }

    #[test]
    fn non_ascii_punctuation_is_removed() {
        assert_eq!(tokenize("¿Qué? «sim» — ok…"), vec!["qué", "sim", "ok"]);
    }

    #[test]
    fn stem_first_matching_suffix_wins() {
        assert_eq!(stem("meeting"), "meet");
        assert_eq!(stem("reportedly"), "report");
        assert_eq!(stem("confirmed"), "confirm");
        assert_eq!(stem("invoices"), "invoice");
    }

    #[test]
    fn stem_keeps_at_least_three_chars() {
        assert_eq!(stem("sing"), "sing");
        assert_eq!(stem("bed"), "bed");
        assert_eq!(stem("bus"), "bus");
        assert_eq!(stem("buss"), "bus");
        assert_eq!(stem("seeds"), "seed");
    }

    #[test]
    fn stem_counts_characters_not_bytes() {
        // "çés" is 3 chars but 5 bytes; stripping "s" would leave 2 chars.
        assert_eq!(stem("çés"), "çés");
        assert_eq!(stem("ações"), "açõe");
    }

    #[test]
    fn normalize_drops_bilingual_stopwords() {
        assert_eq!(
            normalize("The report is about the meeting"),
            vec!["report", "meet"]
        );
        assert_eq!(
            normalize("Você pode enviar o relatório para mim"),
            vec!["pode", "enviar", "relatório", "mim"]
        );
    }

    #[test]
    fn stopwords_are_matched_before_stemming() {
        // "things" is not a stopword, and its stem is not checked again.
        assert_eq!(normalize("these things"), vec!["thing"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(normalize("").is_empty());
        assert!(normalize(" \n\t ").is_empty());
    }

    #[test]
    fn canonical_text_is_unstemmed() {
        assert_eq!(canonical_text("The Meetings, today!"), "meetings today");
    }

    proptest! {
        #[test]
        fn normalize_is_stable_on_canonical_text(input in "[a-zA-ZÀ-ÿ0-9 .,;:!?'\"()\n\t-]{0,120}") {
            prop_assert_eq!(normalize(&canonical_text(&input)), normalize(&input));
        }

        #[test]
        fn tokens_have_no_whitespace_or_punctuation(input in "\\PC{0,120}") {
            for token in normalize(&input) {
                prop_assert!(!token.is_empty());
                prop_assert!(!token.chars().any(char::is_whitespace), "whitespace in {:?}", token);
                prop_assert!(!PUNCTUATION.is_match(&token), "punctuation in {:?}", token);
            }
        }
    }
}
