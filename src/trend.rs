//! Sentiment trend over time or position
//!
//! When the dataset has a date column whose cells parse, polarity is averaged
//! per calendar day. Otherwise a trailing moving average over row order is used.

use crate::types::{AnnotatedRecord, Dataset};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Axis label: a calendar day or a row index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrendLabel {
    Index(usize),
    Day(String),
}

/// Time- or position-ordered mean polarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub data: Vec<f64>,
    pub labels: Vec<TrendLabel>,
    pub has_date: bool,
}

/// Parsed timestamp of one dataset row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedRow {
    pub index: usize,
    pub timestamp: NaiveDateTime,
    pub polarity: f64,
}

/// Outcome of trying to place records on a date axis
#[derive(Debug, Clone, PartialEq)]
pub enum DateResolution {
    /// Every row whose date parsed, sorted by timestamp
    Resolved(Vec<DatedRow>),
    Unresolvable(String),
}

/// Build the trend, preferring the date axis when it resolves.
///
/// On the date axis the dataset itself is reordered by timestamp, rows
/// without a parseable date last.
pub fn build(dataset: &mut Dataset, window_divisor: usize) -> Trend {
    match resolve_dates(dataset) {
        DateResolution::Resolved(rows) => {
            debug!("Building daily trend from {} dated rows", rows.len());
            sort_by_date(dataset, &rows);
            daily(&rows)
        }
        DateResolution::Unresolvable(reason) => {
            debug!("Using positional trend: {}", reason);
            let window = rolling_window(dataset.len(), window_divisor);
            positional(&dataset.polarities(), window)
        }
    }
}

/// Parse the date column. Unparseable cells are skipped; no parsed cell at all
/// makes the column unresolvable.
pub fn resolve_dates(dataset: &Dataset) -> DateResolution {
    let Some(column) = &dataset.date_column else {
        return DateResolution::Unresolvable("no date column".to_string());
    };

    let mut rows: Vec<DatedRow> = dataset
        .records
        .iter()
        .enumerate()
        .filter_map(|(index, r)| {
            r.record
                .date
                .as_deref()
                .and_then(parse_timestamp)
                .map(|timestamp| DatedRow {
                    index,
                    timestamp,
                    polarity: r.polarity,
                })
        })
        .collect();

    if rows.is_empty() {
        return DateResolution::Unresolvable(format!("no parseable values in column '{}'", column));
    }

    rows.sort_by_key(|row| row.timestamp);
    DateResolution::Resolved(rows)
}

/// Reorder records to follow `rows`, then the undated ones in original order
fn sort_by_date(dataset: &mut Dataset, rows: &[DatedRow]) {
    let mut slots: Vec<Option<AnnotatedRecord>> =
        std::mem::take(&mut dataset.records).into_iter().map(Some).collect();

    let mut sorted = Vec::with_capacity(slots.len());
    sorted.extend(rows.iter().filter_map(|row| slots[row.index].take()));
    sorted.extend(slots.into_iter().flatten());
    dataset.records = sorted;
}

/// Parse one date cell into a naive timestamp in the writer's local time
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Mean polarity per calendar day, empty days filled with 0
fn daily(rows: &[DatedRow]) -> Trend {
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let bucket = buckets.entry(row.timestamp.date()).or_insert((0.0, 0));
        bucket.0 += row.polarity;
        bucket.1 += 1;
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Trend {
            data: vec![],
            labels: vec![],
            has_date: true,
        };
    };

    let mut data = Vec::new();
    let mut labels = Vec::new();
    let mut next = Some(first);
    while let Some(day) = next.filter(|d| *d <= last) {
        let mean = buckets
            .get(&day)
            .map(|(sum, n)| sum / *n as f64)
            .unwrap_or(0.0);
        data.push(mean);
        labels.push(TrendLabel::Day(day.format("%Y-%m-%d").to_string()));
        next = day.succ_opt();
    }

    Trend {
        data,
        labels,
        has_date: true,
    }
}

/// Window size for the positional trend
pub fn rolling_window(rows: usize, divisor: usize) -> usize {
    (rows / divisor.max(1)).max(1)
}

/// Trailing moving average; positions before the first full window are 0
pub fn positional(polarities: &[f64], window: usize) -> Trend {
    let window = window.max(1);
    let data: Vec<f64> = (0..polarities.len())
        .map(|i| {
            if i + 1 < window {
                0.0
            } else {
                polarities[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            }
        })
        .collect();

    Trend {
        labels: (0..data.len()).map(TrendLabel::Index).collect(),
        data,
        has_date: false,
    }
}
