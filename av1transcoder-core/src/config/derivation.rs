// ============================================================================
// av1transcoder-core/src/config/derivation.rs
// ============================================================================
//
// CONFIGURATION DERIVATION: From Parsed Options to TranscodeConfig
//
// The command-line parser fills a RawOptions record. This module applies the
// dependencies between options and builds the immutable TranscodeConfig.
//
// KEY COMPONENTS:
// - RawOptions: option values as parsed, defaults already filled in
// - derive_config: the single construction path for TranscodeConfig
//
// Every value reaching this point has passed its type's validation during
// parsing, so derivation cannot fail.

use std::path::PathBuf;

use log::debug;

use super::{
    CropPlan, DEFAULT_ENCODER_PARAMETERS, DEFAULT_FFMPEG, DEFAULT_FFPROBE, DEFAULT_GLOBAL_PARAMETERS,
    DEFAULT_MAX_CONCURRENT_ENCODES, DEFAULT_MIN_SCENE_LENGTH, DEFAULT_SCENE_CUT_THRESHOLD,
    DumpCommands, TranscodeConfig,
};
use crate::crop::{CROP_VALUE_COUNT, CropValues};
use crate::types::{NonNegativeInt, NormalizedFloat, PositiveInt};

/// Option values exactly as the parser produced them.
///
/// `Default` yields the documented default of every option and no input
/// files.
#[derive(Debug, Clone, PartialEq)]
pub struct RawOptions {
    pub input_files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub temp_dir: Option<PathBuf>,
    pub keep_temp: bool,
    pub force_overwrite: bool,
    pub scene_cut_threshold: NormalizedFloat,
    pub min_scene_length: PositiveInt,
    pub enable_single_pass_encode: bool,
    /// One entry per `--crop` occurrence, in command-line order.
    pub crop_values: Vec<[NonNegativeInt; CROP_VALUE_COUNT]>,
    pub encoder_parameters: String,
    pub global_parameters: String,
    pub max_concurrent_encodes: PositiveInt,
    pub dump_commands: DumpCommands,
    pub deinterlace: bool,
    pub limit_encodes: Option<PositiveInt>,
    pub verbose: bool,
    pub cutelog_integration: bool,
    pub ffmpeg: String,
    pub ffprobe: String,
    pub ffmpeg_base: Option<PathBuf>,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            input_files: Vec::new(),
            output_dir: None,
            temp_dir: None,
            keep_temp: false,
            force_overwrite: false,
            scene_cut_threshold: DEFAULT_SCENE_CUT_THRESHOLD,
            min_scene_length: DEFAULT_MIN_SCENE_LENGTH,
            enable_single_pass_encode: false,
            crop_values: Vec::new(),
            encoder_parameters: DEFAULT_ENCODER_PARAMETERS.to_string(),
            global_parameters: DEFAULT_GLOBAL_PARAMETERS.to_string(),
            max_concurrent_encodes: DEFAULT_MAX_CONCURRENT_ENCODES,
            dump_commands: DumpCommands::default(),
            deinterlace: false,
            limit_encodes: None,
            verbose: false,
            cutelog_integration: false,
            ffmpeg: DEFAULT_FFMPEG.to_string(),
            ffprobe: DEFAULT_FFPROBE.to_string(),
            ffmpeg_base: None,
        }
    }
}

/// Whether the other options force temporary data to be kept.
///
/// Dumped command files live in the temporary directory, and a limited run
/// must leave its finished scenes behind for the next session.
#[must_use]
pub fn implies_keep_temp(dump_commands: DumpCommands, limit_encodes: Option<PositiveInt>) -> bool {
    dump_commands != DumpCommands::No || limit_encodes.is_some()
}

/// Builds the configuration from parsed options.
///
/// `keep_temp` is forced on when [`implies_keep_temp`] holds, whatever the
/// parsed value was. Crop values are associated with the input files through
/// a [`CropPlan`].
#[must_use]
pub fn derive_config(raw: RawOptions) -> TranscodeConfig {
    let forced_keep_temp = implies_keep_temp(raw.dump_commands, raw.limit_encodes);
    if forced_keep_temp && !raw.keep_temp {
        debug!(
            "Keeping temporary data (dump-commands: {}, limit-encodes: {})",
            raw.dump_commands,
            raw.limit_encodes
                .map_or_else(|| "unlimited".to_string(), |limit| limit.to_string())
        );
    }

    let specs: Vec<CropValues> = raw.crop_values.into_iter().map(CropValues::from).collect();
    let crop_plan = CropPlan::new(specs, raw.input_files.len());

    TranscodeConfig {
        input_files: raw.input_files,
        output_dir: raw.output_dir,
        temp_dir: raw.temp_dir,
        keep_temp: raw.keep_temp || forced_keep_temp,
        force_overwrite: raw.force_overwrite,
        scene_cut_threshold: raw.scene_cut_threshold,
        min_scene_length: raw.min_scene_length,
        enable_single_pass_encode: raw.enable_single_pass_encode,
        crop_plan,
        encoder_parameters: raw.encoder_parameters,
        global_parameters: raw.global_parameters,
        max_concurrent_encodes: raw.max_concurrent_encodes,
        dump_commands: raw.dump_commands,
        deinterlace: raw.deinterlace,
        limit_encodes: raw.limit_encodes,
        verbose: raw.verbose,
        cutelog_integration: raw.cutelog_integration,
        ffmpeg: raw.ffmpeg,
        ffprobe: raw.ffprobe,
        ffmpeg_base: raw.ffmpeg_base,
    }
}

impl From<RawOptions> for TranscodeConfig {
    fn from(raw: RawOptions) -> Self {
        derive_config(raw)
    }
}
