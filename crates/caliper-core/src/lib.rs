//! caliper-core
//!
//! Pure domain types for clinical assessment analysis and report
//! generation. No AWS SDK and no async runtime; this is the shared
//! vocabulary of the Caliper system.

pub mod display;
pub mod error;
pub mod models;
