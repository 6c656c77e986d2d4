//! Metric generators: each maps the word sequence to one normalized value
//! per token, or per adjacent token pair for the bigram metrics.
//!
//! Every generator works in two passes. The first pass builds an immutable
//! count table over the entire sequence; the second emits one value per
//! token/pair in input order by consulting that table. Nothing is memoized
//! across calls: the output is a pure function of the input sequence.

use rustc_hash::FxHashMap;

use crate::error::Result;

/// One emitted value and the display string it was computed from. Labels and
/// values stay aligned by construction, which is what the viewer's tooltip
/// lookup relies on.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    WordFreq,
    WordFreqLinear,
    BigramProb,
    BigramDiversity,
    WordLength,
    WordPosition,
    UniqueWord,
}

impl Metric {
    pub const ALL: [Metric; 7] = [
        Metric::WordFreq,
        Metric::WordFreqLinear,
        Metric::BigramProb,
        Metric::BigramDiversity,
        Metric::WordLength,
        Metric::WordPosition,
        Metric::UniqueWord,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::WordFreq => "word-freq",
            Metric::WordFreqLinear => "word-freq-linear",
            Metric::BigramProb => "bigram-prob",
            Metric::BigramDiversity => "bigram-diversity",
            Metric::WordLength => "word-length",
            Metric::WordPosition => "word-position",
            Metric::UniqueWord => "unique-word",
        }
    }

    pub fn about(&self) -> &'static str {
        match self {
            Metric::WordFreq => "word frequency, log scale; common words are high",
            Metric::WordFreqLinear => "word frequency, linear scale",
            Metric::BigramProb => "conditional probability P(w2|w1) for each bigram",
            Metric::BigramDiversity => "how many distinct words can follow each word",
            Metric::WordLength => "word length relative to the longest word",
            Metric::WordPosition => "position in the text, start to end",
            Metric::UniqueWord => "a consistent value per distinct word, in first-seen order",
        }
    }

    pub fn from_name(name: &str) -> Result<Metric> {
        Metric::ALL.into_iter()
            .find(|metric| metric.name() == name)
            .ok_or_else(|| error! {
                "unknown metric",
                "name" => name,
                "available" => Metric::ALL.map(|m| m.name()).join(", "),
            })
    }

    /// Bigram metrics emit one value per adjacent pair, so their output is
    /// one shorter than the word sequence (and empty below 2 words).
    pub fn per_bigram(&self) -> bool {
        matches!(self, Metric::BigramProb | Metric::BigramDiversity)
    }

    /// Produce the finite value sequence for `words`, one `Measurement` per
    /// token (or pair), in input order.
    pub fn measure(&self, words: &[String]) -> Vec<Measurement> {
        match self {
            Metric::WordFreq => word_freq(words, true),
            Metric::WordFreqLinear => word_freq(words, false),
            Metric::BigramProb => bigram_prob(words),
            Metric::BigramDiversity => bigram_diversity(words),
            Metric::WordLength => word_length(words),
            Metric::WordPosition => word_position(words),
            Metric::UniqueWord => unique_word(words),
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.name().fmt(f)
    }
}

fn counts(words: &[String]) -> FxHashMap<&str, usize> {
    let mut table: FxHashMap<&str, usize> = FxHashMap::default();
    for word in words {
        *table.entry(word).or_default() += 1;
    }

    table
}

/// Pair counts keyed by the leading word: successor -> count, plus the total
/// number of pairs starting with that word.
fn conditional_counts(words: &[String]) -> FxHashMap<&str, (FxHashMap<&str, usize>, usize)> {
    let mut table: FxHashMap<&str, (FxHashMap<&str, usize>, usize)> = FxHashMap::default();
    for pair in words.windows(2) {
        let entry = table.entry(&pair[0]).or_default();
        *entry.0.entry(&pair[1]).or_default() += 1;
        entry.1 += 1;
    }

    table
}

fn pair_label(pair: &[String]) -> String {
    format!("{} {}", pair[0], pair[1])
}

fn word_freq(words: &[String], log_scale: bool) -> Vec<Measurement> {
    let table = counts(words);
    let max = table.values().copied().max().unwrap_or(0);
    let max_log = (max as f64).ln();

    words.iter()
        .map(|word| {
            let count = table[word.as_str()];
            let value = match log_scale {
                // With a mode count of 1 the log denominator vanishes and
                // every word is a mode; call them all 1.0.
                true if max_log == 0.0 => 1.0,
                true => (count as f64).ln() / max_log,
                false => count as f64 / max as f64,
            };

            Measurement { label: word.clone(), value }
        })
        .collect()
}

fn bigram_prob(words: &[String]) -> Vec<Measurement> {
    let table = conditional_counts(words);
    words.windows(2)
        .map(|pair| {
            let (successors, total) = &table[pair[0].as_str()];
            let count = successors[pair[1].as_str()];
            Measurement {
                label: pair_label(pair),
                value: count as f64 / *total as f64,
            }
        })
        .collect()
}

fn bigram_diversity(words: &[String]) -> Vec<Measurement> {
    let table = conditional_counts(words);
    let max = table.values().map(|(successors, _)| successors.len()).max().unwrap_or(0);

    words.windows(2)
        .map(|pair| Measurement {
            label: pair_label(pair),
            value: table[pair[0].as_str()].0.len() as f64 / max as f64,
        })
        .collect()
}

fn word_length(words: &[String]) -> Vec<Measurement> {
    let max = words.iter().map(|word| word.chars().count()).max().unwrap_or(1);
    words.iter()
        .map(|word| Measurement {
            label: word.clone(),
            value: word.chars().count() as f64 / max as f64,
        })
        .collect()
}

fn word_position(words: &[String]) -> Vec<Measurement> {
    let total = words.len();
    words.iter()
        .enumerate()
        .map(|(i, word)| Measurement {
            label: word.clone(),
            value: i as f64 / total as f64,
        })
        .collect()
}

fn unique_word(words: &[String]) -> Vec<Measurement> {
    let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
    for word in words {
        let next = ids.len();
        ids.entry(word).or_insert(next);
    }

    let denominator = match ids.len() {
        0 | 1 => 1,
        distinct => distinct - 1,
    };

    words.iter()
        .map(|word| Measurement {
            label: word.clone(),
            value: ids[word.as_str()] as f64 / denominator as f64,
        })
        .collect()
}

#[cfg(test)]
mod metric_tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn values(metric: Metric, text: &str) -> Vec<f64> {
        metric.measure(&words(text)).into_iter().map(|m| m.value).collect()
    }

    #[test]
    fn test_mode_maps_to_one() {
        // "the" is the mode in both scales.
        for metric in [Metric::WordFreq, Metric::WordFreqLinear] {
            let samples = metric.measure(&words("the cat the mat the"));
            for sample in &samples {
                assert!(sample.value <= 1.0);
                if sample.label == "the" {
                    assert_eq!(sample.value, 1.0);
                }
            }
        }
    }

    #[test]
    fn test_word_freq_linear_ratio() {
        let got = values(Metric::WordFreqLinear, "a a b");
        assert_eq!(got, [1.0, 1.0, 0.5]);
    }

    #[test]
    fn test_word_freq_all_unique() {
        // Mode count 1: the log denominator degenerates and every word
        // counts as the mode.
        assert_eq!(values(Metric::WordFreq, "each word once"), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_bigram_prob() {
        // Pairs: (a,b) (b,a) (a,c). P(b|a) = 1/2, P(a|b) = 1, P(c|a) = 1/2.
        let samples = Metric::BigramProb.measure(&words("a b a c"));
        let got: Vec<_> = samples.iter().map(|m| (m.label.as_str(), m.value)).collect();
        assert_eq!(got, [("a b", 0.5), ("b a", 1.0), ("a c", 0.5)]);
    }

    #[test]
    fn test_bigram_diversity() {
        // distinct successors: a -> {b, c}, b -> {a}. Max is 2.
        assert_eq!(values(Metric::BigramDiversity, "a b a c"), [1.0, 0.5, 1.0]);
    }

    #[test]
    fn test_bigram_metrics_need_two_words() {
        for metric in [Metric::BigramProb, Metric::BigramDiversity] {
            assert!(metric.per_bigram());
            assert!(metric.measure(&words("lonely")).is_empty());
            assert!(metric.measure(&[]).is_empty());
        }
    }

    #[test]
    fn test_word_length() {
        assert_eq!(values(Metric::WordLength, "ab abcd"), [0.5, 1.0]);
    }

    #[test]
    fn test_word_position() {
        assert_eq!(values(Metric::WordPosition, "x y z w"), [0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_unique_word_first_seen_order() {
        // ids: the=0, cat=1, sat=2; denominator 2.
        assert_eq!(values(Metric::UniqueWord, "the cat sat the"), [0.0, 0.5, 1.0, 0.0]);
    }

    #[test]
    fn test_unique_word_single_distinct() {
        // One distinct word: the denominator defaults to 1 and the value is 0.
        assert_eq!(values(Metric::UniqueWord, "echo echo echo"), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_per_token_output_length() {
        let corpus = words("one two three four");
        for metric in Metric::ALL {
            let expected = match metric.per_bigram() {
                true => corpus.len() - 1,
                false => corpus.len(),
            };

            assert_eq!(metric.measure(&corpus).len(), expected, "{metric}");
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Metric::from_name("bigram-prob").unwrap(), Metric::BigramProb);
        assert!(Metric::from_name("entropy").is_err());
    }
}
