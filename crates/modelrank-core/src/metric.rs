//! Accuracy extraction from free-form job output.
//!
//! Jobs report their score as a human-readable line such as
//! `Correct: 4375/5000 = 87.50% Accuracy`. The first line containing both the
//! keyword and a percent sign is the metric line; the number after the
//! separator is the value. Anything unparseable yields `None`, never an error.

use serde::{Deserialize, Serialize};

/// Keyword and separator that locate the metric line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricPattern {
    pub keyword: String,
    pub separator: char,
}

impl Default for MetricPattern {
    fn default() -> Self {
        Self {
            keyword: "Correct".to_string(),
            separator: '=',
        }
    }
}

impl MetricPattern {
    /// Whether `line` is a candidate metric line.
    pub fn qualifies(&self, line: &str) -> bool {
        line.contains(self.keyword.as_str()) && line.contains('%')
    }

    /// Extract the metric from `output`.
    ///
    /// Only the first qualifying line is considered. If its value segment
    /// does not parse, the result is `None` even when later lines would.
    pub fn extract(&self, output: &str) -> Option<f64> {
        let line = output.lines().find(|line| self.qualifies(line))?;
        self.parse_value(line)
    }

    fn parse_value(&self, line: &str) -> Option<f64> {
        let segment = line.split(self.separator).nth(1)?;
        let number = match segment.find('%') {
            Some(idx) => &segment[..idx],
            None => segment,
        };
        let value: f64 = number.trim().parse().ok()?;
        value.is_finite().then_some(value)
    }
}

/// Extract with the default `Correct` / `=` pattern.
pub fn extract_metric(output: &str) -> Option<f64> {
    MetricPattern::default().extract(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_simple_line() {
        assert_eq!(extract_metric("Correct = 87.50%"), Some(87.50));
    }

    #[test]
    fn test_extracts_with_surrounding_text() {
        let output = "Loading data...\nTraining\nCorrect: 4375/5000 = 87.50% Accuracy\nDone\n";
        assert_eq!(extract_metric(output), Some(87.50));
    }

    #[test]
    fn test_ellipsis_around_value() {
        assert_eq!(extract_metric("... Correct = 87.50% ..."), Some(87.50));
    }

    #[test]
    fn test_first_qualifying_line_wins() {
        let output = "Correct = 70.00%\nCorrect = 90.00%\n";
        assert_eq!(extract_metric(output), Some(70.0));
    }

    #[test]
    fn test_no_qualifying_line() {
        assert_eq!(extract_metric("no metric here"), None);
        assert_eq!(extract_metric(""), None);
    }

    #[test]
    fn test_keyword_without_percent_does_not_qualify() {
        let output = "Correct = 12\nCorrect = 55.5%\n";
        assert_eq!(extract_metric(output), Some(55.5));
    }

    #[test]
    fn test_percent_without_keyword_does_not_qualify() {
        assert_eq!(extract_metric("Progress = 50%"), None);
    }

    #[test]
    fn test_malformed_first_line_yields_none() {
        let output = "Correct = abc%\nCorrect = 90.00%\n";
        assert_eq!(extract_metric(output), None);
    }

    #[test]
    fn test_missing_separator_yields_none() {
        assert_eq!(extract_metric("Correct: 87.5%"), None);
    }

    #[test]
    fn test_zero_is_a_valid_score() {
        assert_eq!(extract_metric("Correct = 0.00%"), Some(0.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(extract_metric("Correct = NaN%"), None);
        assert_eq!(extract_metric("Correct = inf%"), None);
    }

    #[test]
    fn test_crlf_output() {
        assert_eq!(extract_metric("header\r\nCorrect = 66.67%\r\n"), Some(66.67));
    }

    #[test]
    fn test_custom_pattern() {
        let pattern = MetricPattern {
            keyword: "Accuracy".to_string(),
            separator: ':',
        };
        assert_eq!(pattern.extract("Accuracy: 91.2%"), Some(91.2));
        assert_eq!(pattern.extract("Correct = 91.2%"), None);
    }
}
