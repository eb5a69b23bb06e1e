use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

/// Verbosity of rendered narrative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DetailLevel {
    Brief,
    #[default]
    Standard,
    Detailed,
}

impl DetailLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailLevel::Brief => "brief",
            DetailLevel::Standard => "standard",
            DetailLevel::Detailed => "detailed",
        }
    }
}

impl fmt::Display for DetailLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brief" => Ok(DetailLevel::Brief),
            "standard" => Ok(DetailLevel::Standard),
            "detailed" => Ok(DetailLevel::Detailed),
            _ => Err(CoreError::UnknownDetailLevel(s.to_string())),
        }
    }
}

/// Lifecycle of one report section within a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionStatus {
    Pending,
    Processing,
    Complete,
    Error,
}

impl SectionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, SectionStatus::Complete | SectionStatus::Error)
    }
}

/// Progress of a single section, as shown to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSection {
    pub id: String,
    pub label: String,
    /// 0–100.
    pub progress: u8,
    pub status: SectionStatus,
    pub error: Option<String>,
}

/// Live state of one generation run.
///
/// Sections keep their run order; look them up by id with
/// [`GenerationProgress::section`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GenerationProgress {
    pub run_id: Uuid,
    /// 0–100, share of sections that reached a terminal state.
    pub overall_progress: u8,
    pub sections: Vec<ReportSection>,
    pub cancelled: bool,
    pub started_at: jiff::Timestamp,
}

impl GenerationProgress {
    /// Fresh progress with every section pending at 0.
    pub fn new<'a, I>(sections: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let sections = sections
            .into_iter()
            .map(|(id, label)| ReportSection {
                id: id.to_string(),
                label: label.to_string(),
                progress: 0,
                status: SectionStatus::Pending,
                error: None,
            })
            .collect();

        let mut progress = Self {
            run_id: Uuid::new_v4(),
            overall_progress: 0,
            sections,
            cancelled: false,
            started_at: jiff::Timestamp::now(),
        };
        progress.recompute_overall();
        progress
    }

    pub fn section(&self, id: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut ReportSection> {
        self.sections.iter_mut().find(|s| s.id == id)
    }

    pub fn finished_count(&self) -> usize {
        self.sections.iter().filter(|s| s.status.is_terminal()).count()
    }

    /// Recompute `overall_progress` from section states. An empty run is
    /// trivially complete.
    pub fn recompute_overall(&mut self) {
        let total = self.sections.len();
        self.overall_progress = if total == 0 {
            100
        } else {
            ((self.finished_count() * 100) / total) as u8
        };
    }

    pub fn is_finished(&self) -> bool {
        self.sections.iter().all(|s| s.status.is_terminal())
    }
}

/// A section to generate: its id, display label and the payload handed to
/// the narrative generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRequest {
    pub id: String,
    pub label: String,
    pub payload: String,
}

/// How a section ended up in the assembled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SectionOutcome {
    Generated(String),
    Failed(String),
    /// Never started because the run was cancelled first.
    Skipped,
}

impl SectionOutcome {
    /// Visible note standing in for a section that has no generated text.
    pub fn marker(&self) -> Option<String> {
        match self {
            SectionOutcome::Generated(_) => None,
            SectionOutcome::Failed(message) => Some(format!("Section unavailable: {message}")),
            SectionOutcome::Skipped => {
                Some("Section not generated: generation was cancelled".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledSection {
    pub id: String,
    pub label: String,
    pub outcome: SectionOutcome,
}

/// The ordered result of a generation run. Always producible, even when
/// every section failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledReport {
    pub run_id: Uuid,
    pub sections: Vec<AssembledSection>,
    pub cancelled: bool,
}

impl AssembledReport {
    pub fn failed_sections(&self) -> impl Iterator<Item = &AssembledSection> {
        self.sections
            .iter()
            .filter(|s| matches!(s.outcome, SectionOutcome::Failed(_)))
    }

    pub fn is_complete(&self) -> bool {
        self.sections
            .iter()
            .all(|s| matches!(s.outcome, SectionOutcome::Generated(_)))
    }

    /// Plain-text rendering: a `## Label` header per section followed by
    /// its body or a bracketed error marker.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&format!("## {}\n\n", section.label));
            if let SectionOutcome::Generated(text) = &section.outcome {
                out.push_str(text.trim_end());
            } else if let Some(marker) = section.outcome.marker() {
                out.push_str(&format!("[{marker}]"));
            }
            out.push_str("\n\n");
        }
        out
    }
}

impl fmt::Display for AssembledReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
