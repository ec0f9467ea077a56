use crate::error::CleanError;

/// Configuration for token cleaning
#[derive(Debug, Clone)]
pub struct CleanConfig {
    /// ASCII punctuation characters that survive cleaning. Everything else
    /// in `string.punctuation` territory is removed.
    pub retained_punctuation: Vec<char>,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            retained_punctuation: vec!['\'', '[', ']', '-'],
        }
    }
}

/// Clean a single raw token.
///
/// Returns the normalized token; an empty string means "drop". The steps
/// are order-sensitive:
/// 1. Strip surrounding whitespace
/// 2. Remove ASCII punctuation outside the retained set, lowercase
/// 3. Drop a trailing `--` (transcription marker for pauses/stutters)
/// 4. Drop a trailing `'s` (possessive suffix; detection is purely
///    suffix-based, so contractions lose it too)
/// 5. Repeatedly strip leading letter-hyphen stutter markers (`b-b-book`)
/// 6. Drop anything left with one character or fewer
pub fn clean_token(raw: &str, config: &CleanConfig) -> Result<String, CleanError> {
    if raw.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return Err(CleanError::NonText {
            token: raw.to_string(),
        });
    }

    let mut word: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() || config.retained_punctuation.contains(c))
        .flat_map(char::to_lowercase)
        .collect();

    if word.ends_with("--") {
        word.truncate(word.len() - 2);
    }
    if word.ends_with("'s") {
        word.truncate(word.len() - 2);
    }

    while word.chars().count() > 1 && word.chars().nth(1) == Some('-') {
        word = word.chars().skip(2).collect();
    }

    if word.chars().count() <= 1 {
        word.clear();
    }

    Ok(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(raw: &str) -> String {
        clean_token(raw, &CleanConfig::default()).unwrap()
    }

    #[test]
    fn test_retains_apostrophe_in_contractions() {
        assert_eq!(clean("don't"), "don't");
        assert_eq!(clean("Don't,"), "don't");
    }

    #[test]
    fn test_strips_possessive_suffix() {
        assert_eq!(clean("it's"), "it");
        assert_eq!(clean("Sam's"), "sam");
    }

    #[test]
    fn test_strips_trailing_double_hyphen() {
        assert_eq!(clean("pause--"), "pause");
        // Single trailing hyphen is not a pause marker
        assert_eq!(clean("well-"), "well-");
    }

    #[test]
    fn test_strips_leading_stutters() {
        assert_eq!(clean("b-book"), "book");
        assert_eq!(clean("b-b-book"), "book");
    }

    #[test]
    fn test_drops_short_residues() {
        assert_eq!(clean("I"), "");
        assert_eq!(clean("a."), "");
        assert_eq!(clean("um--"), "");
        assert_eq!(clean("..."), "");
        assert_eq!(clean("  "), "");
    }

    #[test]
    fn test_removes_punctuation_and_lowercases() {
        assert_eq!(clean("Hello!"), "hello");
        assert_eq!(clean("\"Okay?\""), "okay");
        assert_eq!(clean("[inaudible]"), "[inaudible]");
    }

    #[test]
    fn test_idempotent_on_cleaned_tokens() {
        let config = CleanConfig::default();
        for raw in ["Hello!", "it's", "b-b-book", "pause--", "don't", "I"] {
            let once = clean_token(raw, &config).unwrap();
            let twice = clean_token(&once, &config).unwrap();
            assert_eq!(once, twice, "clean not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_rejects_control_characters() {
        assert!(clean_token("wor\u{0}d", &CleanConfig::default()).is_err());
    }

    #[test]
    fn test_custom_retained_set() {
        let config = CleanConfig {
            retained_punctuation: vec!['\''],
        };
        assert_eq!(clean_token("[um]", &config).unwrap(), "um");
    }
}
