//! Section payloads for the narrative generator.
//!
//! Each section of the default report layout gets an XML-style block with
//! the client header and the subset of the assessment that section is
//! about. The generator receives the block as its user message.

use caliper_analysis::corpus::NoteCorpus;
use caliper_analysis::{analyze_adl, process_rom};
use caliper_core::display::humanize;
use caliper_core::models::adl::AdlAnalysis;
use caliper_core::models::assessment::AssessmentInput;
use caliper_core::models::report::{DetailLevel, SectionRequest};
use caliper_core::models::rom::RomAnalysis;
use tracing::debug;

use crate::adl::{NO_SUPPORT_NEEDS, format_adl};
use crate::rom::format_rom;

pub const RANGE_OF_MOTION: &str = "range_of_motion";
pub const FUNCTIONAL_INDEPENDENCE: &str = "functional_independence";
pub const SUPPORT_RECOMMENDATIONS: &str = "support_recommendations";
pub const CLINICAL_SUMMARY: &str = "clinical_summary";

/// `(id, label)` of every section in report order.
pub static DEFAULT_SECTIONS: &[(&str, &str)] = &[
    (RANGE_OF_MOTION, "Range of Motion"),
    (FUNCTIONAL_INDEPENDENCE, "Functional Independence"),
    (SUPPORT_RECOMMENDATIONS, "Support Recommendations"),
    (CLINICAL_SUMMARY, "Clinical Notes Summary"),
];

/// How many barriers and terms the clinical summary lists.
pub const SUMMARY_TOP_N: usize = 5;

/// Analyzer output for one assessment, computed once and shared by every
/// section payload.
#[derive(Debug, Clone)]
pub struct AssessmentAnalysis {
    pub rom: RomAnalysis,
    pub adl: AdlAnalysis,
    pub corpus: NoteCorpus,
}

impl AssessmentAnalysis {
    pub fn from_input(input: &AssessmentInput) -> Self {
        let mut corpus = NoteCorpus::new();
        if let Some(notes) = input.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            corpus.record(notes);
        }
        corpus.record_adl(&input.adl);
        for measurement in input.rom.values().flatten() {
            if let Some(notes) = measurement.notes.as_deref().filter(|n| !n.trim().is_empty()) {
                corpus.record(notes);
            }
        }

        Self {
            rom: process_rom(&input.rom),
            adl: analyze_adl(&input.adl),
            corpus,
        }
    }
}

/// Build the default report layout for `input`.
pub fn build_sections(input: &AssessmentInput, level: DetailLevel) -> Vec<SectionRequest> {
    let analysis = AssessmentAnalysis::from_input(input);
    let header = client_header(input);

    let sections: Vec<SectionRequest> = DEFAULT_SECTIONS
        .iter()
        .map(|(id, label)| {
            let body = match *id {
                RANGE_OF_MOTION => format_rom(&analysis.rom, level),
                FUNCTIONAL_INDEPENDENCE => format_adl(&analysis.adl, level),
                SUPPORT_RECOMMENDATIONS => support_block(&analysis.adl),
                _ => summary_block(input, &analysis.corpus),
            };
            SectionRequest {
                id: (*id).to_string(),
                label: (*label).to_string(),
                payload: section_block(id, &header, &body),
            }
        })
        .collect();

    debug!(sections = sections.len(), level = %level, "built section payloads");
    sections
}

fn client_header(input: &AssessmentInput) -> String {
    let mut header = String::new();
    if let Some(name) = input.client_name.as_deref().map(str::trim)
        && !name.is_empty()
    {
        header.push_str(&format!("<client>{name}</client>\n"));
    }
    if let Some(date) = input.date_administered {
        header.push_str(&format!("<date_administered>{date}</date_administered>\n"));
    }
    header
}

/// Wrap a section body the way the generator expects it.
pub fn section_block(id: &str, header: &str, body: &str) -> String {
    let mut block = format!("<section id=\"{id}\">\n");
    block.push_str(header);
    block.push_str("<findings>\n");
    block.push_str(body);
    if !body.ends_with('\n') {
        block.push('\n');
    }
    block.push_str("</findings>\n</section>");
    block
}

fn support_block(adl: &AdlAnalysis) -> String {
    if adl.plan.is_empty() {
        return format!("{NO_SUPPORT_NEEDS}\n");
    }

    let mut out = String::new();
    for row in &adl.plan {
        out.push_str(&format!(
            "<activity name=\"{}\" category=\"{}\" level=\"{}\">\n",
            humanize(&row.activity),
            row.category,
            row.level
        ));
        out.push_str(&format!("Support: {}\n", row.support_type));
        out.push_str(&format!("Frequency: {}\n", row.frequency));
        out.push_str(&format!("Adaptations: {}\n", row.adaptation));
        out.push_str(&format!("Rationale: {}\n", row.rationale));
        out.push_str("</activity>\n");
    }
    out
}

fn summary_block(input: &AssessmentInput, corpus: &NoteCorpus) -> String {
    let mut out = String::new();

    if let Some(notes) = input.notes.as_deref().map(str::trim)
        && !notes.is_empty()
    {
        out.push_str(&format!("<notes>\n{notes}\n</notes>\n"));
    }

    let barriers = corpus.most_frequent_barriers(SUMMARY_TOP_N);
    if !barriers.is_empty() {
        out.push_str("Recurring barriers:\n");
        for (barrier, count) in barriers {
            out.push_str(&format!("- {barrier} ({count})\n"));
        }
    }

    let terms = corpus.most_frequent_terms(SUMMARY_TOP_N);
    if !terms.is_empty() {
        out.push_str("Key terminology:\n");
        for (term, count) in terms {
            out.push_str(&format!("- {} ({count})\n", term.text));
        }
    }

    if out.is_empty() {
        out.push_str("No clinical notes recorded.\n");
    }
    out
}
