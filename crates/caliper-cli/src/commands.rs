//! Command handlers behind the `caliper` binary.

use std::path::Path;

use caliper_bedrock::bedrock::{BedrockSectionGenerator, DEFAULT_SYSTEM_PROMPT, build_client};
use caliper_bedrock::{CancelHandle, SectionOrchestrator};
use caliper_core::models::assessment::AssessmentInput;
use caliper_core::models::adl::AdlAnalysis;
use caliper_core::models::report::{
    AssembledReport, DetailLevel, GenerationProgress, SectionStatus,
};
use caliper_core::models::rom::RomAnalysis;
use caliper_export::docx::save_docx;
use caliper_export::styles::DocumentStyles;
use caliper_narrative::payload::{AssessmentAnalysis, build_sections};
use caliper_narrative::{format_adl, format_rom};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::CaliperConfig;

pub fn read_assessment(path: &Path) -> eyre::Result<AssessmentInput> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read assessment at {}: {e}", path.display()))?;
    Ok(AssessmentInput::from_json(&contents)?)
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    rom: &'a RomAnalysis,
    adl: &'a AdlAnalysis,
    barriers: Vec<(&'a str, usize)>,
}

/// Offline analysis: ROM and ADL findings rendered as text, or the raw
/// analysis as JSON.
pub fn analyze(input: &AssessmentInput, level: DetailLevel, json: bool) -> eyre::Result<String> {
    let analysis = AssessmentAnalysis::from_input(input);
    info!(
        joints = analysis.rom.joints.len(),
        findings = analysis.rom.patterns.len(),
        support_needs = analysis.adl.needs.len(),
        "assessment analysed"
    );

    if json {
        let output = AnalysisOutput {
            rom: &analysis.rom,
            adl: &analysis.adl,
            barriers: analysis.corpus.most_frequent_barriers(usize::MAX),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    Ok(format!(
        "{}\n{}",
        format_rom(&analysis.rom, level),
        format_adl(&analysis.adl, level)
    ))
}

pub struct GenerateOptions<'a> {
    pub level: DetailLevel,
    pub title: &'a str,
    pub docx: Option<&'a Path>,
}

/// Full pipeline against Bedrock. Ctrl-C stops the run before the next
/// section starts.
pub async fn generate(
    config: &CaliperConfig,
    input: &AssessmentInput,
    options: GenerateOptions<'_>,
) -> eyre::Result<AssembledReport> {
    let policy = config.retry.to_policy()?;
    let client = build_client(&config.region).await;
    let generator = BedrockSectionGenerator::new(
        client,
        &config.model_id,
        config
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT),
    );
    let orchestrator = SectionOrchestrator::new(generator, policy);

    let sections = build_sections(input, options.level);
    let progress_task = tokio::spawn(log_progress(orchestrator.subscribe()));
    let cancel_task = tokio::spawn(cancel_on_ctrl_c(orchestrator.cancel_handle()));

    let report = orchestrator.run(&sections).await;

    cancel_task.abort();
    progress_task.abort();

    if report.cancelled {
        warn!("generation cancelled; report is partial");
    }
    for failed in report.failed_sections() {
        warn!(section_id = %failed.id, "section missing from report");
    }

    if let Some(path) = options.docx {
        save_docx(&report, options.title, &DocumentStyles::default(), path)?;
    }

    Ok(report)
}

async fn log_progress(mut progress: watch::Receiver<GenerationProgress>) {
    while progress.changed().await.is_ok() {
        let snapshot = progress.borrow_and_update().clone();
        let active = snapshot
            .sections
            .iter()
            .find(|s| s.status == SectionStatus::Processing);
        if let Some(section) = active {
            info!(
                overall_progress = snapshot.overall_progress,
                section_id = %section.id,
                "generating section"
            );
        }
    }
}

async fn cancel_on_ctrl_c(cancel: CancelHandle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        warn!("interrupt received; finishing current section");
        cancel.cancel();
    }
}
