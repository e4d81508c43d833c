//! Core data types shared across the pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Polarity above this is positive, below its negation negative
pub const CATEGORY_THRESHOLD: f64 = 0.1;

/// Sentiment bucket derived from a polarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
}

impl SentimentCategory {
    pub const ALL: [SentimentCategory; 3] = [
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
    ];

    /// Classify a polarity score
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > CATEGORY_THRESHOLD {
            SentimentCategory::Positive
        } else if polarity < -CATEGORY_THRESHOLD {
            SentimentCategory::Negative
        } else {
            SentimentCategory::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed input table. `None` cells are nulls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row`/`col`, treating short rows as null-padded
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|c| c.as_deref())
    }
}

/// One input row with its text resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub text: String,
    /// Raw cell from the resolved date column, if any
    pub date: Option<String>,
    /// Original cells in header order, written back untouched
    pub original: Vec<Option<String>>,
}

/// A record with its sentiment fields attached
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record: Record,
    pub category: SentimentCategory,
    pub polarity: f64,
    pub subjectivity: f64,
}

impl AnnotatedRecord {
    pub fn text(&self) -> &str {
        &self.record.text
    }
}

/// Annotated rows sharing one text column and optional date column
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub text_column: String,
    pub date_column: Option<String>,
    pub records: Vec<AnnotatedRecord>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.text())
    }

    pub fn polarities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.polarity).collect()
    }
}
