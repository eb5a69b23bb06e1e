//! caliper-narrative
//!
//! Renders analyzer output as text at three verbosity levels and builds
//! the per-section payloads handed to the narrative generator.

pub mod adl;
pub mod payload;
pub mod rom;

pub use adl::format_adl;
pub use rom::format_rom;
