//! caliper-cli library root.
//!
//! Exposes the config layer and command handlers so integration tests can
//! exercise them without going through argument parsing.

pub mod commands;
pub mod config;
