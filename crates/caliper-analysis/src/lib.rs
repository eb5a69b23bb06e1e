//! caliper-analysis
//!
//! Clinical pattern detection over structured assessment data. Pure
//! functions only: no AWS dependency, no async, no shared state. Every
//! function here is safe to call from any number of contexts at once.

pub mod adl;
pub mod barriers;
pub mod corpus;
pub mod regions;
pub mod rom;
pub mod terminology;

pub use adl::{analyze_adl, determine_overall_independence};
pub use barriers::extract_barriers;
pub use rom::process_rom;
