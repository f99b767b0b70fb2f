//! Ranked comparison report.
//!
//! Scored jobs come first, highest score on top; ties keep registration
//! order. Unscored and failed jobs follow in registration order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::outcome::{JobOutcome, ResultSet};

const NAME_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 15;

/// Placeholder shown for a job that ran but printed no metric.
pub const UNAVAILABLE_MARKER: &str = "N/A";
/// Placeholder shown for a job that failed.
pub const FAILED_MARKER: &str = "ERROR";

/// One line of the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub name: String,
    pub outcome: JobOutcome,
}

/// Order results for the report.
pub fn rank(results: &ResultSet) -> Vec<ReportRow> {
    let (mut scored, unscored): (Vec<ReportRow>, Vec<ReportRow>) = results
        .iter()
        .map(|(name, outcome)| ReportRow {
            name: name.to_string(),
            outcome,
        })
        .partition(|row| row.outcome.is_scored());

    // `sort_by` is stable, so equal scores stay in registration order.
    scored.sort_by(|a, b| {
        let a = a.outcome.score().unwrap_or(f64::MIN);
        let b = b.outcome.score().unwrap_or(f64::MIN);
        b.total_cmp(&a)
    });

    scored.extend(unscored);
    scored
}

/// The comparison report for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub batch_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Digest of the registry that produced these results, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_digest: Option<String>,
    pub rows: Vec<ReportRow>,
    /// First row of the ranking. With no scored jobs this is simply the
    /// first registered job.
    pub best: Option<String>,
}

impl Report {
    pub fn new(results: &ResultSet) -> Self {
        let rows = rank(results);
        let best = rows.first().map(|row| row.name.clone());
        Self {
            batch_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            registry_digest: None,
            rows,
            best,
        }
    }

    pub fn with_batch_id(mut self, batch_id: Uuid) -> Self {
        self.batch_id = batch_id;
        self
    }

    pub fn with_registry_digest(mut self, digest: impl Into<String>) -> Self {
        self.registry_digest = Some(digest.into());
        self
    }

    pub fn best(&self) -> Option<&str> {
        self.best.as_deref()
    }

    /// Render the fixed-width table followed by the conclusion line.
    ///
    /// Output depends only on the rows, so rendering is repeatable.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "| {:^nw$} | {:^vw$} |\n",
            "Model",
            "Accuracy (%)",
            nw = NAME_WIDTH,
            vw = VALUE_WIDTH
        ));
        out.push_str(&format!(
            "|{}|{}|\n",
            "-".repeat(NAME_WIDTH + 2),
            "-".repeat(VALUE_WIDTH + 2)
        ));

        for row in &self.rows {
            let line = match row.outcome {
                JobOutcome::Score(value) => format!(
                    "| {:nw$} | {:>vw$.2} |\n",
                    row.name,
                    value,
                    nw = NAME_WIDTH,
                    vw = VALUE_WIDTH
                ),
                JobOutcome::Unavailable => placeholder_row(&row.name, UNAVAILABLE_MARKER),
                JobOutcome::Failed => placeholder_row(&row.name, FAILED_MARKER),
            };
            out.push_str(&line);
        }

        out.push('\n');
        match self.best() {
            Some(name) => out.push_str(&format!(
                "Conclusion: the best performing model was '{}'\n",
                name
            )),
            None => out.push_str("No models were run.\n"),
        }
        out
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn placeholder_row(name: &str, marker: &str) -> String {
    format!(
        "| {:nw$} | {:^vw$} |\n",
        name,
        marker,
        nw = NAME_WIDTH,
        vw = VALUE_WIDTH
    )
}
