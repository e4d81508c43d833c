//! Row analysis: score every retained row and attach its sentiment fields

use crate::columns::ResolvedColumns;
use crate::scorer::TextScorer;
use crate::types::{AnnotatedRecord, Dataset, Record, SentimentCategory, Table};
use tracing::debug;

/// Build the annotated dataset from a table.
///
/// Rows whose text cell is null are dropped before scoring.
pub fn analyze<S: TextScorer + ?Sized>(table: &Table, columns: &ResolvedColumns, scorer: &S) -> Dataset {
    let mut dropped = 0usize;
    let mut records = Vec::with_capacity(table.len());

    for (i, row) in table.rows.iter().enumerate() {
        let Some(text) = table.cell(i, columns.text) else {
            dropped += 1;
            continue;
        };

        let record = Record {
            text: text.to_string(),
            date: columns
                .date
                .and_then(|col| table.cell(i, col))
                .map(str::to_string),
            original: row.clone(),
        };

        records.push(annotate(record, scorer));
    }

    if dropped > 0 {
        debug!("Dropped {} rows with empty text", dropped);
    }

    Dataset {
        headers: table.headers.clone(),
        text_column: table.headers[columns.text].clone(),
        date_column: columns.date.map(|col| table.headers[col].clone()),
        records,
    }
}

/// Score a single record
pub fn annotate<S: TextScorer + ?Sized>(record: Record, scorer: &S) -> AnnotatedRecord {
    let scored = scorer.score(&record.text);
    AnnotatedRecord {
        category: SentimentCategory::from_polarity(scored.polarity),
        polarity: scored.polarity,
        subjectivity: scored.subjectivity,
        record,
    }
}
