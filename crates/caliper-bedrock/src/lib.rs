//! caliper-bedrock
//!
//! Section-by-section report generation: the retry primitive, the
//! sequential orchestrator with live progress, and the Bedrock-backed
//! generator.

pub mod bedrock;
pub mod error;
pub mod pipeline;
pub mod retry;

pub use error::GenerationError;
pub use pipeline::{CancelHandle, SectionGenerator, SectionOrchestrator};
pub use retry::{AttemptError, RetryExhaustedError, RetryPolicy, with_retry};
