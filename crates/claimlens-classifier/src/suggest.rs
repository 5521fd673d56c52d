//! Unmatched-term suggestions

use crate::dictionary::PatternDictionary;
use regex::Regex;
use std::sync::OnceLock;

/// Whitespace plus ASCII and full-width punctuation
const TOKEN_SEPARATORS: &str = r"[\s,，。！!？?；;：:、]+";

fn separators() -> Option<&'static Regex> {
    static SEPARATORS: OnceLock<Option<Regex>> = OnceLock::new();
    SEPARATORS
        .get_or_init(|| Regex::new(TOKEN_SEPARATORS).ok())
        .as_ref()
}

/// Split a claim into lowercase candidate tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    match separators() {
        Some(re) => re
            .split(&lowered)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        None => lowered.split_whitespace().map(str::to_string).collect(),
    }
}

/// Tokens that no dictionary pattern covers, as keyword candidates
///
/// Tokens shorter than `min_chars` characters are dropped, duplicates are
/// collapsed, and at most `limit` tokens are kept in text order.
pub fn suggest_keywords(
    text: &str,
    dictionary: &PatternDictionary,
    min_chars: usize,
    limit: usize,
) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();
    for token in tokenize(text) {
        if suggestions.len() >= limit {
            break;
        }
        if token.chars().count() < min_chars
            || dictionary.matches_any_pattern(&token)
            || suggestions.contains(&token)
        {
            continue;
        }
        suggestions.push(token);
    }
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_mixed_punctuation() {
        let tokens = tokenize("Hello, 世界！ 好用；FOO");
        assert_eq!(tokens, vec!["hello", "世界", "好用", "foo"]);
    }

    #[test]
    fn test_suggestions_skip_known_and_short_tokens() {
        let dict = PatternDictionary::base();
        let suggestions = suggest_keywords("xyzxyz q 补水面膜 abcdef", &dict, 2, 5);
        assert_eq!(suggestions, vec!["xyzxyz", "abcdef"]);
    }

    #[test]
    fn test_suggestions_collapse_repeats_and_respect_length() {
        let dict = PatternDictionary::base();
        let text = "xy qqq xy qqq";
        assert_eq!(suggest_keywords(text, &dict, 2, 5), vec!["xy", "qqq"]);
        assert_eq!(suggest_keywords(text, &dict, 3, 5), vec!["qqq"]);
    }

    #[test]
    fn test_suggestions_are_limited() {
        let dict = PatternDictionary::base();
        let suggestions = suggest_keywords("aa bb cc dd ee ff gg", &dict, 2, 5);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "aa");
    }

    #[test]
    fn test_suggestions_deduplicate() {
        let dict = PatternDictionary::base();
        assert_eq!(suggest_keywords("zz zz ZZ", &dict, 2, 5), vec!["zz"]);
    }
}
