//! Configuration management

use crate::error::{AnalysisError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub artifact: ArtifactConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    /// Directory the annotated spreadsheets are written to
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows kept per positive/negative/neutral/mismatch sample list
    pub sample_limit: usize,
    /// Texts drawn at random for the front-end ticker
    pub flying_sample_size: usize,
    /// Maximum word-cloud entries
    pub word_cloud_limit: usize,
    /// Positional trend window is `max(1, rows / divisor)`
    pub trend_window_divisor: usize,
}

impl Config {
    /// Load configuration from file, layered under environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(Self::environment())
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to built-in defaults
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = [
            "review-sentiment.toml",
            "review-sentiment.yaml",
            "~/.config/review-sentiment/config.toml",
        ];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        let settings = config::Config::builder()
            .add_source(Self::environment())
            .build()?;
        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("REVIEW_SENTIMENT")
            .prefix_separator("_")
            .separator("__")
    }

    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.report.trend_window_divisor == 0 {
            return Err(AnalysisError::Config(
                "report.trend_window_divisor must be at least 1".to_string(),
            ));
        }
        if self.artifact.dir.as_os_str().is_empty() {
            return Err(AnalysisError::Config("artifact.dir must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("analyzed"),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_limit: 5,
            flying_sample_size: 30,
            word_cloud_limit: 50,
            trend_window_divisor: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_report_defaults() {
        let report = ReportConfig::default();
        assert_eq!(report.sample_limit, 5);
        assert_eq!(report.flying_sample_size, 30);
        assert_eq!(report.word_cloud_limit, 50);
        assert_eq!(report.trend_window_divisor, 20);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[artifact]\ndir = \"/tmp/reports\"\n\n[report]\nsample_limit = 3").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.artifact.dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.report.sample_limit, 3);
        assert_eq!(config.report.word_cloud_limit, 50);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[report]\ntrend_window_divisor = 0").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AnalysisError>(),
            Some(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn test_empty_artifact_dir_rejected() {
        let mut config = Config::default();
        config.artifact.dir = PathBuf::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("artifact.dir"));
    }
}
