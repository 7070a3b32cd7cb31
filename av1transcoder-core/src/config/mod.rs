//! Configuration structures and constants for the av1transcoder-core library.
//!
//! This module provides the resolved, immutable configuration handed to the
//! scene detection and encoding stages, the defaults for every option, and
//! the derivation step that turns raw parsed options into a configuration.

mod crop_plan;
mod derivation;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::crop::CropValues;
use crate::error::ValidationError;
use crate::types::{NormalizedFloat, PositiveInt};

pub use crop_plan::{CropPlan, CropPlanIter};
pub use derivation::{RawOptions, derive_config, implies_keep_temp};

// Default constants

/// Default threshold for the scene cut detection filter.
pub const DEFAULT_SCENE_CUT_THRESHOLD: NormalizedFloat = NormalizedFloat::new_const(0.3);

/// Default minimal scene duration in seconds. Adjacent scenes are combined
/// until they reach at least this length, if possible.
pub const DEFAULT_MIN_SCENE_LENGTH: PositiveInt = PositiveInt::new_const(30);

/// Default number of ffmpeg instances running in parallel.
pub const DEFAULT_MAX_CONCURRENT_ENCODES: PositiveInt = PositiveInt::new_const(8);

/// Default libaom-av1 parameters, tuned for high quality encodes of SD
/// material. Tiles are left off because they can produce corrupted frames,
/// and ffmpeg-internal threading is disabled in favour of running several
/// encodes at once.
pub const DEFAULT_ENCODER_PARAMETERS: &str = "-pix_fmt yuv420p10le -cpu-used 4 -crf 15 \
    -frame-parallel 0 -threads 1 -auto-alt-ref 1 -lag-in-frames 8 -enable-cdef 1 \
    -enable-global-motion 1 -enable-intrabc 1";

pub const DEFAULT_GLOBAL_PARAMETERS: &str = "";

pub const DEFAULT_FFMPEG: &str = "ffmpeg";
pub const DEFAULT_FFPROBE: &str = "ffprobe";

/// Suffix appended to the input file stem to name the encoded result.
pub const OUTPUT_FILE_SUFFIX: &str = ".AV1.mkv";

/// Suffix appended to the full input file name to name its temporary directory.
pub const TEMP_DIR_SUFFIX: &str = ".temp";

// ============================================================================
// DUMP COMMANDS MODE
// ============================================================================

/// Whether generated ffmpeg command lines are written to text files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpCommands {
    /// Dump command lines and run them.
    Yes,
    /// Run command lines without dumping them.
    #[default]
    No,
    /// Dump command lines without running the encodes. Scene detection
    /// still runs because later steps need its data.
    Only,
}

impl DumpCommands {
    /// Accepted command-line spellings.
    pub const CHOICES: [&'static str; 3] = ["yes", "no", "only"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Only => "only",
        }
    }

    #[must_use]
    pub const fn writes_command_files(self) -> bool {
        matches!(self, Self::Yes | Self::Only)
    }

    #[must_use]
    pub const fn executes_encodes(self) -> bool {
        matches!(self, Self::Yes | Self::No)
    }
}

impl FromStr for DumpCommands {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(Self::Yes),
            "no" => Ok(Self::No),
            "only" => Ok(Self::Only),
            _ => Err(ValidationError::Malformed {
                expected: "one of 'yes', 'no', 'only'",
                token: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DumpCommands {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TRANSCODE CONFIGURATION
// ============================================================================

/// Fully resolved configuration for one program run.
///
/// Produced once by [`derive_config`] and read-only afterwards. Every option
/// holds either the value given on the command line or its documented
/// default, and option dependencies (such as `--dump-commands` implying
/// `--keep-temp`) are already applied.
///
/// # Examples
///
/// ```rust
/// use av1transcoder_core::config::{RawOptions, derive_config};
/// use std::path::{Path, PathBuf};
///
/// let config = derive_config(RawOptions {
///     input_files: vec![PathBuf::from("movie.mkv")],
///     ..RawOptions::default()
/// });
///
/// assert!(!config.keep_temp());
/// assert_eq!(config.min_scene_length().get(), 30);
/// assert_eq!(config.output_file_for(Path::new("movie.mkv")), PathBuf::from("movie.AV1.mkv"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscodeConfig {
    // ---- Path Configuration ----
    input_files: Vec<PathBuf>,
    output_dir: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
    keep_temp: bool,
    force_overwrite: bool,

    // ---- Scene Detection ----
    scene_cut_threshold: NormalizedFloat,
    min_scene_length: PositiveInt,

    // ---- Encoder Settings ----
    enable_single_pass_encode: bool,
    crop_plan: CropPlan,
    encoder_parameters: String,
    global_parameters: String,
    max_concurrent_encodes: PositiveInt,
    dump_commands: DumpCommands,
    deinterlace: bool,
    limit_encodes: Option<PositiveInt>,

    // ---- Diagnostics ----
    verbose: bool,
    cutelog_integration: bool,

    // ---- External Tools ----
    ffmpeg: String,
    ffprobe: String,
    ffmpeg_base: Option<PathBuf>,
}

/// One input file together with everything the pipeline needs to place its
/// results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeJob<'a> {
    pub input: &'a Path,
    pub output_file: PathBuf,
    pub temp_dir: PathBuf,
    pub crop: Option<CropValues>,
}

impl TranscodeConfig {
    /// Input files in command-line order.
    #[must_use]
    pub fn input_files(&self) -> &[PathBuf] {
        &self.input_files
    }

    #[must_use]
    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    #[must_use]
    pub fn temp_dir(&self) -> Option<&Path> {
        self.temp_dir.as_deref()
    }

    #[must_use]
    pub fn keep_temp(&self) -> bool {
        self.keep_temp
    }

    #[must_use]
    pub fn force_overwrite(&self) -> bool {
        self.force_overwrite
    }

    #[must_use]
    pub fn scene_cut_threshold(&self) -> NormalizedFloat {
        self.scene_cut_threshold
    }

    /// Minimal scene duration in seconds.
    #[must_use]
    pub fn min_scene_length(&self) -> PositiveInt {
        self.min_scene_length
    }

    #[must_use]
    pub fn enable_single_pass_encode(&self) -> bool {
        self.enable_single_pass_encode
    }

    #[must_use]
    pub fn crop_plan(&self) -> &CropPlan {
        &self.crop_plan
    }

    /// Opaque encoder arguments, passed to every encoding ffmpeg process.
    #[must_use]
    pub fn encoder_parameters(&self) -> &str {
        &self.encoder_parameters
    }

    /// Opaque arguments placed before the input file of every ffmpeg process.
    #[must_use]
    pub fn global_parameters(&self) -> &str {
        &self.global_parameters
    }

    #[must_use]
    pub fn max_concurrent_encodes(&self) -> PositiveInt {
        self.max_concurrent_encodes
    }

    #[must_use]
    pub fn dump_commands(&self) -> DumpCommands {
        self.dump_commands
    }

    #[must_use]
    pub fn deinterlace(&self) -> bool {
        self.deinterlace
    }

    /// Maximum number of scene encodes for this run. `None` is unlimited.
    #[must_use]
    pub fn limit_encodes(&self) -> Option<PositiveInt> {
        self.limit_encodes
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn cutelog_integration(&self) -> bool {
        self.cutelog_integration
    }

    #[must_use]
    pub fn ffmpeg(&self) -> &str {
        &self.ffmpeg
    }

    #[must_use]
    pub fn ffprobe(&self) -> &str {
        &self.ffprobe
    }

    #[must_use]
    pub fn ffmpeg_base(&self) -> Option<&Path> {
        self.ffmpeg_base.as_deref()
    }

    /// Path used to invoke ffmpeg. Relative to `ffmpeg_base` when one is set,
    /// otherwise the name is looked up on PATH by the caller.
    #[must_use]
    pub fn ffmpeg_executable(&self) -> PathBuf {
        self.resolve_executable(&self.ffmpeg)
    }

    #[must_use]
    pub fn ffprobe_executable(&self) -> PathBuf {
        self.resolve_executable(&self.ffprobe)
    }

    fn resolve_executable(&self, name: &str) -> PathBuf {
        match &self.ffmpeg_base {
            Some(base) => base.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Result file for `input`: `<input stem>.AV1.mkv`, placed in the output
    /// directory or next to the input.
    #[must_use]
    pub fn output_file_for(&self, input: &Path) -> PathBuf {
        let mut name = input.file_stem().unwrap_or_default().to_os_string();
        name.push(OUTPUT_FILE_SUFFIX);
        self.output_dir
            .as_deref()
            .unwrap_or_else(|| parent_dir(input))
            .join(name)
    }

    /// Temporary directory for `input`: `<input file name>.temp`, placed in
    /// the temp directory, else the output directory, else next to the input.
    #[must_use]
    pub fn temp_dir_for(&self, input: &Path) -> PathBuf {
        let mut name = input.file_name().unwrap_or_default().to_os_string();
        name.push(TEMP_DIR_SUFFIX);
        self.temp_dir
            .as_deref()
            .or(self.output_dir.as_deref())
            .unwrap_or_else(|| parent_dir(input))
            .join(name)
    }

    /// Pairs every input file with its crop values and result locations.
    ///
    /// The crop plan may be infinite; iteration stops after the last input.
    pub fn jobs(&self) -> impl Iterator<Item = TranscodeJob<'_>> + '_ {
        self.input_files
            .iter()
            .zip(self.crop_plan.iter())
            .map(|(input, crop)| TranscodeJob {
                input,
                output_file: self.output_file_for(input),
                temp_dir: self.temp_dir_for(input),
                crop,
            })
    }
}

fn parent_dir(input: &Path) -> &Path {
    input.parent().unwrap_or_else(|| Path::new(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(inputs: &[&str], raw: RawOptions) -> TranscodeConfig {
        derive_config(RawOptions {
            input_files: inputs.iter().map(PathBuf::from).collect(),
            ..raw
        })
    }

    #[test]
    fn dump_commands_parses_only_known_choices() {
        for choice in DumpCommands::CHOICES {
            let parsed: DumpCommands = choice.parse().unwrap();
            assert_eq!(parsed.as_str(), choice);
        }
        assert!("maybe".parse::<DumpCommands>().is_err());
        assert!("YES".parse::<DumpCommands>().is_err());
    }

    #[test]
    fn dump_commands_mode_semantics() {
        assert!(DumpCommands::Yes.writes_command_files() && DumpCommands::Yes.executes_encodes());
        assert!(!DumpCommands::No.writes_command_files() && DumpCommands::No.executes_encodes());
        assert!(DumpCommands::Only.writes_command_files() && !DumpCommands::Only.executes_encodes());
    }

    #[test]
    fn output_file_is_placed_next_to_input_by_default() {
        let config = config_for(&["/videos/movie.mpg"], RawOptions::default());
        assert_eq!(
            config.output_file_for(Path::new("/videos/movie.mpg")),
            PathBuf::from("/videos/movie.AV1.mkv")
        );
        assert_eq!(
            config.temp_dir_for(Path::new("/videos/movie.mpg")),
            PathBuf::from("/videos/movie.mpg.temp")
        );
    }

    #[test]
    fn temp_dir_prefers_temp_over_output_over_input_dir() {
        let input = Path::new("/videos/movie.mpg");

        let output_only = config_for(
            &["/videos/movie.mpg"],
            RawOptions {
                output_dir: Some(PathBuf::from("/out")),
                ..RawOptions::default()
            },
        );
        assert_eq!(output_only.output_file_for(input), PathBuf::from("/out/movie.AV1.mkv"));
        assert_eq!(output_only.temp_dir_for(input), PathBuf::from("/out/movie.mpg.temp"));

        let both = config_for(
            &["/videos/movie.mpg"],
            RawOptions {
                output_dir: Some(PathBuf::from("/out")),
                temp_dir: Some(PathBuf::from("/scratch")),
                ..RawOptions::default()
            },
        );
        assert_eq!(both.output_file_for(input), PathBuf::from("/out/movie.AV1.mkv"));
        assert_eq!(both.temp_dir_for(input), PathBuf::from("/scratch/movie.mpg.temp"));
    }

    #[test]
    fn relative_input_without_directory() {
        let config = config_for(&["clip.mkv"], RawOptions::default());
        assert_eq!(config.output_file_for(Path::new("clip.mkv")), PathBuf::from("clip.AV1.mkv"));
        assert_eq!(config.temp_dir_for(Path::new("clip.mkv")), PathBuf::from("clip.mkv.temp"));
    }

    #[test]
    fn executables_resolve_against_base_directory() {
        let plain = config_for(&["a.mkv"], RawOptions::default());
        assert_eq!(plain.ffmpeg_executable(), PathBuf::from("ffmpeg"));
        assert_eq!(plain.ffprobe_executable(), PathBuf::from("ffprobe"));

        let based = config_for(
            &["a.mkv"],
            RawOptions {
                ffmpeg_base: Some(PathBuf::from("/opt/ffmpeg/bin")),
                ffprobe: "ffprobe-7".to_string(),
                ..RawOptions::default()
            },
        );
        assert_eq!(based.ffmpeg_executable(), PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(based.ffprobe_executable(), PathBuf::from("/opt/ffmpeg/bin/ffprobe-7"));
    }

    #[test]
    fn jobs_stop_at_last_input() {
        let raw = RawOptions {
            crop_values: vec![[crate::types::NonNegativeInt::new_const(2); 4]],
            ..RawOptions::default()
        };
        let config = config_for(&["a.mkv", "b.mkv", "c.mkv"], raw);
        let jobs: Vec<_> = config.jobs().collect();
        assert_eq!(jobs.len(), 3);
        assert!(jobs.iter().all(|job| job.crop.map(|c| c.crop_height()) == Some(4)));
        assert_eq!(jobs[2].input, Path::new("c.mkv"));
        assert_eq!(jobs[2].output_file, PathBuf::from("c.AV1.mkv"));
    }

    #[test]
    fn config_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TranscodeConfig>();
    }
}
