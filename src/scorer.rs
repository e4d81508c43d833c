//! Text polarity scoring
//!
//! The pipeline only sees the [`TextScorer`] capability. [`LexiconScorer`] is
//! the bundled implementation: a lexicon of general review vocabulary with
//! per-word polarity and subjectivity, intensifiers and negation.

use std::collections::HashMap;

/// Polarity and subjectivity of one text
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polarity {
    /// Negative to positive (-1.0 to 1.0)
    pub polarity: f64,
    /// Factual to opinionated (0.0 to 1.0)
    pub subjectivity: f64,
}

impl Polarity {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Anything that maps text to polarity/subjectivity
#[cfg_attr(test, mockall::automock)]
pub trait TextScorer {
    fn score(&self, text: &str) -> Polarity;
}

/// Lexicon entry: polarity, subjectivity
#[derive(Debug, Clone, Copy)]
struct Entry {
    polarity: f64,
    subjectivity: f64,
}

/// Lexicon-based scorer
pub struct LexiconScorer {
    lexicon: HashMap<String, Entry>,
    /// Intensity modifiers (very, extremely, etc.)
    intensifiers: HashMap<String, f64>,
    negations: Vec<String>,
}

impl LexiconScorer {
    /// Create a scorer with the default lexicons
    pub fn new() -> Self {
        let mut scorer = Self {
            lexicon: HashMap::new(),
            intensifiers: HashMap::new(),
            negations: Vec::new(),
        };
        scorer.init_lexicons();
        scorer
    }

    fn init_lexicons(&mut self) {
        let positive_words = [
            ("good", 0.7, 0.6),
            ("great", 0.8, 0.75),
            ("excellent", 1.0, 1.0),
            ("amazing", 0.6, 0.9),
            ("awesome", 1.0, 1.0),
            ("fantastic", 0.4, 0.9),
            ("wonderful", 1.0, 1.0),
            ("best", 1.0, 0.3),
            ("love", 0.5, 0.6),
            ("loved", 0.7, 0.8),
            ("loves", 0.5, 0.6),
            ("like", 0.2, 0.4),
            ("happy", 0.8, 1.0),
            ("beautiful", 0.85, 1.0),
            ("perfect", 1.0, 1.0),
            ("nice", 0.6, 1.0),
            ("recommend", 0.4, 0.5),
            ("recommended", 0.4, 0.5),
            ("pleased", 0.5, 0.7),
            ("satisfied", 0.5, 0.6),
            ("comfortable", 0.4, 0.6),
            ("easy", 0.43, 0.83),
            ("fast", 0.2, 0.6),
            ("quick", 0.33, 0.5),
            ("friendly", 0.38, 0.5),
            ("helpful", 0.5, 0.5),
            ("reliable", 0.4, 0.5),
            ("sturdy", 0.3, 0.5),
            ("worth", 0.3, 0.1),
            ("impressive", 1.0, 1.0),
            ("enjoy", 0.4, 0.5),
            ("enjoyed", 0.4, 0.5),
            ("fine", 0.42, 0.5),
            ("delicious", 1.0, 1.0),
            ("brilliant", 0.9, 1.0),
            ("superb", 1.0, 1.0),
            ("solid", 0.2, 0.4),
            ("clean", 0.37, 0.69),
            ("fresh", 0.3, 0.5),
        ];

        let negative_words = [
            ("bad", -0.7, 0.67),
            ("terrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("poor", -0.4, 0.6),
            ("worst", -1.0, 1.0),
            ("hate", -0.8, 0.9),
            ("hated", -0.9, 0.7),
            ("dislike", -0.4, 0.5),
            ("sad", -0.5, 1.0),
            ("ugly", -0.7, 1.0),
            ("broke", -0.6, 0.6),
            ("broken", -0.4, 0.4),
            ("slow", -0.3, 0.39),
            ("disappointed", -0.75, 0.75),
            ("disappointing", -0.6, 0.7),
            ("useless", -0.5, 0.2),
            ("waste", -0.6, 0.5),
            ("cheap", -0.1, 0.7),
            ("rude", -0.3, 0.6),
            ("dirty", -0.6, 0.8),
            ("wrong", -0.5, 0.9),
            ("late", -0.3, 0.6),
            ("defective", -0.5, 0.5),
            ("faulty", -0.5, 0.5),
            ("annoying", -0.8, 0.9),
            ("expensive", -0.5, 0.7),
            ("refund", -0.2, 0.3),
            ("return", -0.1, 0.2),
            ("problem", -0.3, 0.4),
            ("problems", -0.3, 0.4),
            ("fail", -0.5, 0.3),
            ("failed", -0.5, 0.3),
            ("never", -0.1, 0.3),
            ("boring", -1.0, 1.0),
            ("mediocre", -0.3, 0.6),
        ];

        for (word, polarity, subjectivity) in positive_words.iter().chain(negative_words.iter()) {
            self.lexicon.insert(
                word.to_string(),
                Entry {
                    polarity: *polarity,
                    subjectivity: *subjectivity,
                },
            );
        }

        let intensifiers = [
            ("very", 1.3),
            ("really", 1.3),
            ("extremely", 1.5),
            ("absolutely", 1.4),
            ("completely", 1.4),
            ("totally", 1.3),
            ("so", 1.2),
            ("super", 1.3),
            ("incredibly", 1.4),
            ("highly", 1.3),
            ("quite", 1.1),
            ("pretty", 1.1),
        ];

        for (word, factor) in intensifiers {
            self.intensifiers.insert(word.to_string(), factor);
        }

        self.negations = [
            "not", "no", "never", "isn't", "aren't", "wasn't", "weren't", "hasn't", "haven't",
            "doesn't", "don't", "didn't", "won't", "wouldn't", "can't", "cannot", "couldn't",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
    }

    /// Strip punctuation and lowercase
    fn clean_word(&self, word: &str) -> String {
        word.chars()
            .filter(|c| c.is_alphanumeric() || *c == '\'' || *c == '-')
            .collect::<String>()
            .to_lowercase()
    }

    /// Apply intensifiers and negation found in the preceding words
    fn apply_modifiers(&self, words: &[String], index: usize, mut entry: Entry) -> Entry {
        let start = index.saturating_sub(2);

        for prev_word in &words[start..index] {
            if let Some(&factor) = self.intensifiers.get(prev_word) {
                entry.polarity *= factor;
                entry.subjectivity *= factor;
            }

            if self.negations.contains(prev_word) {
                // Flip and dampen
                entry.polarity *= -0.5;
            }
        }

        Entry {
            polarity: entry.polarity.clamp(-1.0, 1.0),
            subjectivity: entry.subjectivity.clamp(0.0, 1.0),
        }
    }
}

impl TextScorer for LexiconScorer {
    /// Mean polarity and subjectivity over lexicon hits; no hits scores 0/0
    fn score(&self, text: &str) -> Polarity {
        let words: Vec<String> = text
            .split_whitespace()
            .map(|w| self.clean_word(w))
            .filter(|w| !w.is_empty())
            .collect();

        let hits: Vec<Entry> = words
            .iter()
            .enumerate()
            .filter_map(|(i, word)| {
                self.lexicon
                    .get(word)
                    .map(|&entry| self.apply_modifiers(&words, i, entry))
            })
            .collect();

        if hits.is_empty() {
            return Polarity::default();
        }

        let n = hits.len() as f64;
        Polarity::new(
            hits.iter().map(|e| e.polarity).sum::<f64>() / n,
            hits.iter().map(|e| e.subjectivity).sum::<f64>() / n,
        )
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_text() {
        let scorer = LexiconScorer::new();
        let result = scorer.score("Amazing product, loved it!");
        assert!(result.polarity > 0.1);
        assert!(result.subjectivity > 0.5);
    }

    #[test]
    fn test_negative_text() {
        let scorer = LexiconScorer::new();
        let result = scorer.score("Terrible, broke immediately");
        assert!(result.polarity < -0.1);
    }

    #[test]
    fn test_factual_text() {
        let scorer = LexiconScorer::new();
        let result = scorer.score("It arrived on Tuesday");
        assert_eq!(result, Polarity::default());
    }

    #[test]
    fn test_intensifier_boosts() {
        let scorer = LexiconScorer::new();
        let normal = scorer.score("This is good");
        let boosted = scorer.score("This is very good");
        assert!(boosted.polarity > normal.polarity);
    }

    #[test]
    fn test_negation_flips() {
        let scorer = LexiconScorer::new();
        let positive = scorer.score("This is good");
        let negated = scorer.score("This is not good");
        assert!(positive.polarity > 0.0);
        assert!(negated.polarity < 0.0);
    }

    #[test]
    fn test_scores_stay_in_range() {
        let scorer = LexiconScorer::new();
        let result = scorer.score("extremely absolutely perfect excellent wonderful");
        assert!(result.polarity <= 1.0);
        assert!(result.subjectivity <= 1.0);

        let result = scorer.score("absolutely terrible horrible awful");
        assert!(result.polarity >= -1.0);
    }

    #[test]
    fn test_empty_text() {
        let scorer = LexiconScorer::default();
        assert_eq!(scorer.score(""), Polarity::default());
    }

    #[test]
    fn test_clean_word() {
        let scorer = LexiconScorer::new();
        assert_eq!(scorer.clean_word("Great!!!"), "great");
        assert_eq!(scorer.clean_word("don't"), "don't");
    }

    #[test]
    fn test_polarity_new_clamps() {
        let p = Polarity::new(1.7, -0.2);
        assert_eq!(p.polarity, 1.0);
        assert_eq!(p.subjectivity, 0.0);
    }
}
