//! Column resolution by header keywords

use crate::error::{AnalysisError, Result};

/// Header fragments that mark a free-text column
pub const TEXT_KEYWORDS: [&str; 6] = ["review", "text", "comment", "desc", "body", "content"];

/// Header fragments that mark a date column
pub const DATE_KEYWORDS: [&str; 2] = ["date", "time"];

/// Resolved column positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub text: usize,
    pub date: Option<usize>,
}

/// Pick the text column (required) and the date column (optional)
pub fn resolve(headers: &[String]) -> Result<ResolvedColumns> {
    let text = find_first(headers, &TEXT_KEYWORDS).ok_or_else(|| AnalysisError::ColumnNotFound {
        available: headers.to_vec(),
    })?;
    let date = find_first(headers, &DATE_KEYWORDS);

    Ok(ResolvedColumns { text, date })
}

fn find_first(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let lower = header.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_text_and_date() {
        let resolved = resolve(&headers(&["id", "date", "comment"])).unwrap();
        assert_eq!(resolved.text, 2);
        assert_eq!(resolved.date, Some(1));
    }

    #[test]
    fn test_first_match_wins() {
        let resolved = resolve(&headers(&["Review Title", "Review Body"])).unwrap();
        assert_eq!(resolved.text, 0);
    }

    #[test]
    fn test_case_insensitive() {
        let resolved = resolve(&headers(&["ID", "CustomerFeedbackTEXT", "Timestamp"])).unwrap();
        assert_eq!(resolved.text, 1);
        assert_eq!(resolved.date, Some(2));
    }

    #[test]
    fn test_substring_match() {
        let resolved = resolve(&headers(&["product_description"])).unwrap();
        assert_eq!(resolved.text, 0);
        assert_eq!(resolved.date, None);
    }

    #[test]
    fn test_missing_text_column() {
        let err = resolve(&headers(&["id", "score"])).unwrap_err();
        match err {
            AnalysisError::ColumnNotFound { available } => {
                assert_eq!(available, vec!["id", "score"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_date_is_not_an_error() {
        let resolved = resolve(&headers(&["text"])).unwrap();
        assert_eq!(resolved.date, None);
    }
}
