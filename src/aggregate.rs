//! Aggregate statistics and sample selection over an annotated dataset

use crate::types::{AnnotatedRecord, Dataset, SentimentCategory};
use rand::seq::IndexedRandom;
use std::collections::BTreeMap;

pub const NO_POSITIVE: &str = "No positive reviews found.";
pub const NO_NEGATIVE: &str = "No negative reviews found.";
pub const NO_NEUTRAL: &str = "No neutral reviews found.";
pub const NO_EDGE_CASES: &str = "No edge cases detected.";

/// Opinionated text with a near-neutral score
const MISMATCH_POLARITY: f64 = 0.1;
const MISMATCH_SUBJECTIVITY: f64 = 0.5;
/// Fallback when nothing is both subjective and near-neutral
const NEAR_ZERO_POLARITY: f64 = 0.05;

/// Representative text samples per bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
    pub mismatch: Vec<String>,
}

/// Count of records per category; every category present
pub fn category_counts(dataset: &Dataset) -> BTreeMap<SentimentCategory, usize> {
    let mut counts: BTreeMap<SentimentCategory, usize> =
        SentimentCategory::ALL.iter().map(|&c| (c, 0)).collect();
    for record in &dataset.records {
        *counts.entry(record.category).or_insert(0) += 1;
    }
    counts
}

pub fn mean_polarity(dataset: &Dataset) -> f64 {
    mean(dataset.records.iter().map(|r| r.polarity))
}

pub fn mean_subjectivity(dataset: &Dataset) -> f64 {
    mean(dataset.records.iter().map(|r| r.subjectivity))
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Round to `places` decimals, exact halves to even
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Map mean polarity [-1, 1] onto a 0-5 star scale, one decimal
pub fn star_rating(mean_polarity: f64) -> f64 {
    round_to((mean_polarity + 1.0) * 2.5, 1).clamp(0.0, 5.0)
}

/// Pick the positive, negative, neutral and mismatch samples
pub fn samples(dataset: &Dataset, limit: usize) -> Samples {
    let records = &dataset.records;

    let mut positive: Vec<&AnnotatedRecord> = by_category(records, SentimentCategory::Positive).collect();
    positive.sort_by(|a, b| b.polarity.total_cmp(&a.polarity));

    let mut negative: Vec<&AnnotatedRecord> = by_category(records, SentimentCategory::Negative).collect();
    negative.sort_by(|a, b| a.polarity.total_cmp(&b.polarity));

    let neutral = by_category(records, SentimentCategory::Neutral);

    Samples {
        positive: or_placeholder(take_texts(positive.into_iter(), limit), NO_POSITIVE),
        negative: or_placeholder(take_texts(negative.into_iter(), limit), NO_NEGATIVE),
        neutral: or_placeholder(take_texts(neutral, limit), NO_NEUTRAL),
        mismatch: or_placeholder(mismatches(records, limit), NO_EDGE_CASES),
    }
}

/// Subjective but near-neutral records, falling back to near-zero polarity
pub fn mismatches(records: &[AnnotatedRecord], limit: usize) -> Vec<String> {
    let subjective = take_texts(
        records.iter().filter(|r| {
            r.polarity.abs() < MISMATCH_POLARITY && r.subjectivity > MISMATCH_SUBJECTIVITY
        }),
        limit,
    );
    if !subjective.is_empty() {
        return subjective;
    }

    take_texts(
        records.iter().filter(|r| r.polarity.abs() < NEAR_ZERO_POLARITY),
        limit,
    )
}

/// Uniform sample of texts without replacement
pub fn random_texts(dataset: &Dataset, amount: usize) -> Vec<String> {
    let mut rng = rand::rng();
    dataset
        .records
        .choose_multiple(&mut rng, amount.min(dataset.len()))
        .map(|r| r.text().to_string())
        .collect()
}

fn by_category(
    records: &[AnnotatedRecord],
    category: SentimentCategory,
) -> impl Iterator<Item = &AnnotatedRecord> {
    records.iter().filter(move |r| r.category == category)
}

fn take_texts<'a>(records: impl Iterator<Item = &'a AnnotatedRecord>, limit: usize) -> Vec<String> {
    records.take(limit).map(|r| r.text().to_string()).collect()
}

fn or_placeholder(samples: Vec<String>, placeholder: &str) -> Vec<String> {
    if samples.is_empty() {
        vec![placeholder.to_string()]
    } else {
        samples
    }
}
