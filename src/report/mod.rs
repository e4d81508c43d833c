//! Report assembly: the full pipeline from table to report and artifact

use crate::aggregate;
use crate::analyzer;
use crate::artifact::{ArtifactHandle, ArtifactStore};
use crate::columns;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::scorer::TextScorer;
use crate::trend::{self, TrendLabel};
use crate::types::{SentimentCategory, Table};
use crate::words::{self, WordCount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{error, info};

/// Aggregate view of one analyzed upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub status: String,
    pub summary: BTreeMap<SentimentCategory, usize>,
    pub total: usize,
    pub avg: f64,
    pub subj: f64,
    pub star_rating: f64,
    pub word_cloud: Vec<WordCount>,
    pub timeline_data: Vec<f64>,
    pub timeline_labels: Vec<TrendLabel>,
    pub has_date: bool,
    pub flying_samples: Vec<String>,
    pub pos_samples: Vec<String>,
    pub neu_samples: Vec<String>,
    pub neg_samples: Vec<String>,
    pub mis_samples: Vec<String>,
}

/// Failure response; never accompanies a partial report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: String,
}

/// Either side of an analysis request, serialized as the response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Success {
        #[serde(flatten)]
        report: Report,
        artifact: ArtifactHandle,
    },
    Failure(ErrorDocument),
}

/// Runs the analysis pipeline against one scorer and artifact store
pub struct ReportAssembler<S> {
    scorer: S,
    store: ArtifactStore,
    config: ReportConfig,
}

impl<S: TextScorer> ReportAssembler<S> {
    pub fn new(scorer: S, store: ArtifactStore, config: ReportConfig) -> Self {
        Self {
            scorer,
            store,
            config,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Resolve, analyze, aggregate and persist
    pub fn assemble(&self, table: &Table) -> Result<(Report, ArtifactHandle)> {
        let resolved = columns::resolve(&table.headers)?;
        let mut dataset = analyzer::analyze(table, &resolved, &self.scorer);
        info!(
            "Analyzing {} rows from column '{}'",
            dataset.len(),
            dataset.text_column
        );

        // Samples and the word cloud see input order; the date trend then
        // reorders the dataset before it is persisted.
        let summary = aggregate::category_counts(&dataset);
        let mean_polarity = aggregate::mean_polarity(&dataset);
        let mean_subjectivity = aggregate::mean_subjectivity(&dataset);
        let samples = aggregate::samples(&dataset, self.config.sample_limit);
        let word_cloud = words::word_frequencies(dataset.texts(), self.config.word_cloud_limit);
        let flying_samples = aggregate::random_texts(&dataset, self.config.flying_sample_size);
        let trend = trend::build(&mut dataset, self.config.trend_window_divisor);

        let report = Report {
            status: "success".to_string(),
            summary,
            total: dataset.len(),
            avg: aggregate::round_to(mean_polarity, 2),
            subj: aggregate::round_to(mean_subjectivity, 2),
            star_rating: aggregate::star_rating(mean_polarity),
            word_cloud,
            timeline_data: trend.data,
            timeline_labels: trend.labels,
            has_date: trend.has_date,
            flying_samples,
            pos_samples: samples.positive,
            neu_samples: samples.neutral,
            neg_samples: samples.negative,
            mis_samples: samples.mismatch,
        };

        let handle = self.store.write(&dataset)?;
        info!(
            "Report ready: {} rows, avg {:.2}, {} stars",
            report.total, report.avg, report.star_rating
        );
        Ok((report, handle))
    }

    /// Run the pipeline and fold any failure into an error document
    pub fn respond(&self, table: &Table) -> AnalysisResponse {
        match self.assemble(table) {
            Ok((report, artifact)) => AnalysisResponse::Success { report, artifact },
            Err(e) => {
                error!("Analysis failed: {}", e);
                AnalysisResponse::Failure(ErrorDocument {
                    error: e.to_string(),
                })
            }
        }
    }
}
