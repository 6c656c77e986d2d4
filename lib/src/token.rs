use unicode_segmentation::UnicodeSegmentation;

/// Filters applied to the raw token stream, in the order the fields are
/// declared: case-fold, then punctuation filter, then number filter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenizeOptions {
    /// Lowercase every token before anything downstream sees it.
    pub fold_case: bool,
    /// Drop tokens with any non-alphanumeric character.
    pub drop_punctuation: bool,
    /// Drop purely numeric tokens.
    pub drop_numbers: bool,
}

/// The ordered word sequence for one run, plus the pre-filter count for
/// diagnostics.
#[derive(Debug)]
pub struct Tokens {
    pub words: Vec<String>,
    pub raw_count: usize,
}

impl Tokens {
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Split `text` into word tokens along Unicode word boundaries (UAX #29).
/// Whitespace segments are never tokens; punctuation and numbers are tokens
/// until a filter in `options` says otherwise.
///
/// Unlike Penn-Treebank-style tokenizers, UAX #29 keeps a contraction as a
/// single token: `don't` stays `don't` rather than splitting into `do` and
/// `n't`.
pub fn tokenize(text: &str, options: TokenizeOptions) -> Tokens {
    let mut raw_count = 0;
    let words = text.split_word_bounds()
        .filter(|segment| !segment.chars().all(char::is_whitespace))
        .inspect(|_| raw_count += 1)
        .map(|segment| match options.fold_case {
            true => segment.to_lowercase(),
            false => segment.to_string(),
        })
        .filter(|token| !options.drop_punctuation
            || token.chars().all(char::is_alphanumeric))
        .filter(|token| !options.drop_numbers
            || !token.chars().all(char::is_numeric))
        .collect();

    Tokens { words, raw_count }
}

#[cfg(test)]
mod tokenize_tests {
    use super::*;

    fn words(text: &str, options: TokenizeOptions) -> Vec<String> {
        tokenize(text, options).words
    }

    #[test]
    fn test_plain_split() {
        let tokens = tokenize("The cat sat.", TokenizeOptions::default());
        assert_eq!(tokens.words, ["The", "cat", "sat", "."]);
        assert_eq!(tokens.raw_count, 4);
    }

    #[test]
    fn test_contractions_stay_whole() {
        let tokens = tokenize("don't stop", TokenizeOptions::default());
        assert_eq!(tokens.words, ["don't", "stop"]);
    }

    #[test]
    fn test_fold_case() {
        let options = TokenizeOptions { fold_case: true, ..Default::default() };
        assert_eq!(words("The CAT", options), ["the", "cat"]);
    }

    #[test]
    fn test_drop_punctuation() {
        let options = TokenizeOptions { drop_punctuation: true, ..Default::default() };
        let tokens = tokenize("stop. really! -- yes?", options);
        assert_eq!(tokens.words, ["stop", "really", "yes"]);
        // Pre-filter diagnostics still see the punctuation tokens; the two
        // dashes split at the word boundary between them.
        assert_eq!(tokens.raw_count, 8);
    }

    #[test]
    fn test_drop_numbers() {
        let options = TokenizeOptions { drop_numbers: true, ..Default::default() };
        assert_eq!(words("7 times 7 is 49", options), ["times", "is"]);
    }

    #[test]
    fn test_numbers_survive_punctuation_filter() {
        let options = TokenizeOptions { drop_punctuation: true, ..Default::default() };
        assert_eq!(words("chapter 12!", options), ["chapter", "12"]);
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("  \n\t ", TokenizeOptions::default());
        assert!(tokens.is_empty());
        assert_eq!(tokens.raw_count, 0);
    }
}
