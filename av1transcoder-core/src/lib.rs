//! Core library for the av1transcoder configuration front-end.
//!
//! This crate provides the self-validating value types used by the option
//! schema, the crop specification, and the derivation of the immutable
//! configuration that the scene detection and encoding stages consume.
//!
//! ## Usage Example
//!
//! ```rust
//! use av1transcoder_core::{RawOptions, TranscodeConfig, derive_config};
//! use av1transcoder_core::types::{NonNegativeInt, PositiveInt};
//! use std::path::PathBuf;
//!
//! let raw = RawOptions {
//!     input_files: vec![PathBuf::from("episode1.mkv"), PathBuf::from("episode2.mkv")],
//!     crop_values: vec![[
//!         NonNegativeInt::ZERO,
//!         NonNegativeInt::ZERO,
//!         NonNegativeInt::new_const(8),
//!         NonNegativeInt::new_const(8),
//!     ]],
//!     limit_encodes: Some(PositiveInt::new_const(10)),
//!     ..RawOptions::default()
//! };
//!
//! let config: TranscodeConfig = derive_config(raw);
//! assert!(config.keep_temp());
//! for job in config.jobs() {
//!     assert_eq!(job.crop.map(|crop| crop.crop_width()), Some(16));
//! }
//! ```

pub mod config;
pub mod crop;
pub mod error;
pub mod types;

// Re-exports for public API
pub use config::{
    CropPlan, DumpCommands, RawOptions, TranscodeConfig, TranscodeJob, derive_config,
};
pub use crop::CropValues;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{NonNegativeInt, NormalizedFloat, PositiveInt};

/// Program name shown in the version string and log messages.
pub const PROGRAM_NAME: &str = "av1transcoder";
