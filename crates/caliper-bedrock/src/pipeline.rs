//! Sequential section generation with live progress.
//!
//! Sections run strictly in the order given. A section whose retries are
//! exhausted is marked `error` and the run moves on; cancellation is
//! checked only between sections.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use caliper_core::models::report::{
    AssembledReport, AssembledSection, GenerationProgress, ReportSection, SectionOutcome,
    SectionRequest, SectionStatus,
};
use tokio::sync::watch;
use tracing::{error, info};

use crate::error::GenerationError;
use crate::retry::{RetryPolicy, with_retry};

/// Produces narrative text for one section.
#[async_trait]
pub trait SectionGenerator: Send + Sync {
    async fn generate(&self, section_id: &str, payload: &str) -> Result<String, GenerationError>;
}

/// Cooperative cancellation flag shared with the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Stop the run before its next section starts. Requested while idle,
    /// the next run is cancelled before its first section.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct SectionOrchestrator<G> {
    generator: G,
    policy: RetryPolicy,
    progress: watch::Sender<GenerationProgress>,
    cancel: CancelHandle,
}

impl<G: SectionGenerator> SectionOrchestrator<G> {
    pub fn new(generator: G, policy: RetryPolicy) -> Self {
        let (progress, _) = watch::channel(GenerationProgress::new(std::iter::empty::<(
            &str,
            &str,
        )>()));
        Self {
            generator,
            policy,
            progress,
            cancel: CancelHandle::default(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Live progress of the current (or last) run. Receivers see every run,
    /// including ones started after they subscribed.
    pub fn subscribe(&self) -> watch::Receiver<GenerationProgress> {
        self.progress.subscribe()
    }

    pub fn snapshot(&self) -> GenerationProgress {
        self.progress.borrow().clone()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Generate every section in order and assemble the report.
    ///
    /// Never fails: sections that could not be generated carry an error
    /// outcome, and sections not reached after cancellation are skipped.
    #[tracing::instrument(skip_all, fields(sections = sections.len()))]
    pub async fn run(&self, sections: &[SectionRequest]) -> AssembledReport {
        let initial =
            GenerationProgress::new(sections.iter().map(|s| (s.id.as_str(), s.label.as_str())));
        let run_id = initial.run_id;
        self.progress.send_replace(initial);
        info!(%run_id, "starting report generation");

        let mut assembled = Vec::with_capacity(sections.len());
        let mut cancelled = false;

        for (index, request) in sections.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                info!(%run_id, section_id = %request.id, "generation cancelled");
                break;
            }

            self.update(index, |section| section.status = SectionStatus::Processing);

            let result = with_retry(&self.policy, || {
                self.generator.generate(&request.id, &request.payload)
            })
            .await;

            let outcome = match result {
                Ok(text) => {
                    self.update(index, |section| {
                        section.status = SectionStatus::Complete;
                        section.progress = 100;
                    });
                    info!(section_id = %request.id, "section complete");
                    SectionOutcome::Generated(text)
                }
                Err(e) => {
                    let message = e.to_string();
                    error!(
                        section_id = %request.id,
                        attempts = e.attempts,
                        error = %message,
                        "section failed"
                    );
                    self.update(index, |section| {
                        section.status = SectionStatus::Error;
                        section.error = Some(message.clone());
                    });
                    SectionOutcome::Failed(message)
                }
            };

            assembled.push(AssembledSection {
                id: request.id.clone(),
                label: request.label.clone(),
                outcome,
            });
        }

        for request in &sections[assembled.len()..] {
            assembled.push(AssembledSection {
                id: request.id.clone(),
                label: request.label.clone(),
                outcome: SectionOutcome::Skipped,
            });
        }

        if cancelled {
            self.progress.send_modify(|p| p.cancelled = true);
        }
        // Consumed by this run; the next run starts uncancelled.
        self.cancel.reset();

        let snapshot = self.snapshot();
        info!(
            %run_id,
            overall_progress = snapshot.overall_progress,
            failed = snapshot
                .sections
                .iter()
                .filter(|s| s.status == SectionStatus::Error)
                .count(),
            cancelled,
            "report generation finished"
        );

        AssembledReport {
            run_id,
            sections: assembled,
            cancelled,
        }
    }

    fn update(&self, index: usize, apply: impl FnOnce(&mut ReportSection)) {
        self.progress.send_modify(|p| {
            if let Some(section) = p.sections.get_mut(index) {
                apply(section);
            }
            p.recompute_overall();
        });
    }
}
