//! caliper-export
//!
//! DOCX generation from an assembled report.

pub mod blocks;
pub mod docx;
pub mod error;
pub mod styles;
