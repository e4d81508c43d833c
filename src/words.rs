//! Word-frequency extraction for the word cloud

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Common English words excluded from the word cloud
pub const STOP_WORDS: [&str; 24] = [
    "the", "and", "is", "it", "to", "of", "in", "for", "with", "on", "that", "this", "was", "my",
    "at", "as", "but", "are", "be", "have", "not", "you", "very", "good",
];

/// Shortest token kept is one longer than this
const MIN_TOKEN_LEN: usize = 3;

/// Word cloud entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub text: String,
    pub value: usize,
}

/// Rank the most frequent qualifying tokens across all texts.
///
/// Ties keep the order in which the words were first seen.
pub fn word_frequencies<'a>(texts: impl IntoIterator<Item = &'a str>, limit: usize) -> Vec<WordCount> {
    let all_text = texts.into_iter().collect::<Vec<_>>().join(" ").to_lowercase();

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for token in all_text.split_whitespace().filter(|t| keep_token(t)) {
        let next_rank = counts.len();
        counts.entry(token).or_insert((0, next_rank)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first_seen))| (word, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, count, _)| WordCount {
            text: word.to_string(),
            value: count,
        })
        .collect()
}

fn keep_token(token: &str) -> bool {
    token.chars().all(char::is_alphabetic)
        && token.chars().count() > MIN_TOKEN_LEN
        && !STOP_WORDS.contains(&token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let texts = ["Great battery great screen", "battery died", "Great value"];
        let words = word_frequencies(texts, 50);
        assert_eq!(
            words,
            vec![
                WordCount { text: "great".into(), value: 3 },
                WordCount { text: "battery".into(), value: 2 },
                WordCount { text: "screen".into(), value: 1 },
                WordCount { text: "died".into(), value: 1 },
                WordCount { text: "value".into(), value: 1 },
            ]
        );
    }

    #[test]
    fn test_filters_short_punctuated_and_stop_words() {
        let texts = ["this product was very good, with that sparkle!", "have fun with the product"];
        let words = word_frequencies(texts, 50);
        let text: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        // "good," and "sparkle!" carry punctuation so are not purely alphabetic
        assert_eq!(text, vec!["product"]);
        assert_eq!(words[0].value, 2);
    }

    #[test]
    fn test_stop_words_removed_even_when_long() {
        let words = word_frequencies(["that this have with very good"], 50);
        assert!(words.is_empty());
    }

    #[test]
    fn test_limit_and_descending_order() {
        let text: String = (0..80)
            .map(|i| {
                let word: String = std::iter::repeat(char::from(b'a' + (i % 26) as u8))
                    .take(4 + i / 26)
                    .collect();
                std::iter::repeat(word).take(i % 7 + 1).collect::<Vec<_>>().join(" ")
            })
            .collect::<Vec<_>>()
            .join(" ");
        let words = word_frequencies([text.as_str()], 50);
        assert_eq!(words.len(), 50);
        assert!(words.windows(2).all(|w| w[0].value >= w[1].value));
        assert!(words.iter().all(|w| w.text.len() > 3));
    }

    #[test]
    fn test_empty_input() {
        assert!(word_frequencies(Vec::<&str>::new(), 50).is_empty());
    }
}
