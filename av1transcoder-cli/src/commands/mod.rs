//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific step run after
//! argument parsing.

/// Logs the resolved execution plan handed to the transcoding pipeline.
pub mod plan;
