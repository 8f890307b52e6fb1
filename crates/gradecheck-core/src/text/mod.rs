//! Text normalization utilities shared by checklist lines and source code

use rust_stemmers::{Algorithm, Stemmer};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Punctuation removed by [`normalize`]. Hyphens and slashes are kept.
pub const STRIPPED_PUNCTUATION: &[char] = &[
    '[', ']', '*', '(', ')', '.', ':', ',', '\\', '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}',
];

/// Snowball stemmer for Portuguese text
static STEMMER: OnceLock<Stemmer> = OnceLock::new();

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::Portuguese))
}

/// Lower-case and strip diacritics.
///
/// Text is NFD-decomposed and everything outside ASCII is dropped, so accented
/// letters collapse to their base letter and unrepresentable characters vanish.
pub fn fold(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| c.is_ascii())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Remove the fixed punctuation set
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

/// Canonical comparable form: folded and punctuation-stripped.
///
/// Total and idempotent: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    strip_punctuation(&fold(text))
}

/// Split normalized text into identifier-like words
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|s| !s.is_empty())
}

/// Reduce a lower-case Portuguese word to its stem
pub fn stem(word: &str) -> String {
    get_stemmer().stem(word).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("Console WriteLine"), "console writeline");
    }

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Programação"), "programacao");
        assert_eq!(normalize("número inteiro à vista"), "numero inteiro a vista");
        assert_eq!(normalize("Programação"), normalize("programacao"));
    }

    #[test]
    fn test_normalize_drops_unrepresentable_characters() {
        assert_eq!(normalize("fila 🚀 ok"), "fila  ok");
        assert_eq!(normalize("日本 menu"), " menu");
    }

    #[test]
    fn test_normalize_strips_punctuation_set() {
        assert_eq!(
            normalize("[ ] Exibir (menu): \"Olá\", 'x'. a\\b"),
            "  exibir menu ola x ab"
        );
        assert_eq!(normalize("“curly” ‘quotes’"), "curly quotes");
    }

    #[test]
    fn test_normalize_keeps_other_punctuation() {
        assert_eq!(normalize("do-while e/ou x = y;"), "do-while e/ou x = y;");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "[ ] Validar entrada do usuário com número inteiro",
            "int numero = Console.ReadLine();",
            "“Ação” (ex: `for`, `while`)",
            "",
            "ÇÃÕ---///",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_words_split_identifiers() {
        let tokens: Vec<&str> = words("int numero = console readline();").collect();
        assert_eq!(tokens, vec!["int", "numero", "console", "readline"]);
    }

    #[test]
    fn test_stem_reduces_inflections() {
        assert_eq!(stem("adicionar"), "adicion");
        assert_eq!(stem("adicionado"), stem("adicionar"));
    }
}
