// av1transcoder-cli/src/cli.rs
//
// Defines the command-line option schema using clap and converts the parsed
// arguments into the raw option record understood by av1transcoder-core.

use std::path::PathBuf;

use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{ArgAction, Parser};

use av1transcoder_core::config::{
    DEFAULT_ENCODER_PARAMETERS, DEFAULT_FFMPEG, DEFAULT_FFPROBE, DEFAULT_GLOBAL_PARAMETERS,
    DEFAULT_MAX_CONCURRENT_ENCODES, DEFAULT_MIN_SCENE_LENGTH, DEFAULT_SCENE_CUT_THRESHOLD,
};
use av1transcoder_core::crop::CROP_VALUE_COUNT;
use av1transcoder_core::{
    DumpCommands, NonNegativeInt, NormalizedFloat, PositiveInt, RawOptions, TranscodeConfig,
    derive_config,
};

const ABOUT: &str = "Transcode video files to AV1. This program takes input video files and \
transcodes the video track to the AV1 format using the libaom-av1 reference encoder.";

const AFTER_HELP: &str = "The resulting files are named like <input_file_name>.AV1.mkv and are \
placed alongside the input file, or into the output directory given by --output-dir. During the \
encoding process, each input file has its own temporary directory named \
<input_file_name_with_extension>.temp, placed in --temp-dir, else --output-dir, else the input \
file's directory. The output files only contain video tracks. Add back audio or subtitle tracks \
yourself and mux them into the container of your choice.

Long options can be abbreviated as long as the abbreviation is unambiguous. Don't rely on this in \
scripts, because new options may make a previously valid abbreviation ambiguous. Arguments can be \
loaded from files using the @-notation: \"@/path/to/file\" is replaced by the contents of that \
file, one argument per line.";

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = av1transcoder_core::PROGRAM_NAME,
    version = concat!("Version ", env!("CARGO_PKG_VERSION")),
    about = ABOUT,
    after_help = AFTER_HELP,
    disable_version_flag = true,
    infer_long_args = true
)]
pub struct Cli {
    /// Input video files. All given video files will be transcoded to AV1.
    #[arg(value_name = "INPUT_FILE", required = true, num_args = 1..)]
    pub input_files: Vec<PathBuf>,

    /// Store the result in this directory. If set and --temp-dir is unset, also store the
    /// temporary data here. If unset, results are stored alongside the input file.
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Store temporary data in this directory. If unset, use the output directory set by
    /// --output-dir. If that is unset, store the temporary data alongside the input data.
    #[arg(short = 't', long)]
    pub temp_dir: Option<PathBuf>,

    /// Keep temporary data after the transcoding process finished. May help in resolving
    /// transcoding issues.
    #[arg(short = 'k', long)]
    pub keep_temp: bool,

    /// Force overwriting existing data. If unset and filename collisions are detected, the
    /// affected input files are skipped.
    #[arg(short = 'f', long)]
    pub force_overwrite: bool,

    /// Threshold value for the scene cut detection filter. Accepts a decimal number in the
    /// range (0,1].
    #[arg(
        short = 's',
        long,
        value_name = "THRESHOLD",
        default_value_t = DEFAULT_SCENE_CUT_THRESHOLD,
        allow_negative_numbers = true
    )]
    pub scene_cut_threshold: NormalizedFloat,

    /// Minimal allowed scene duration in seconds. Adjacent detected scenes are combined to have
    /// at least this duration, if possible. This is not a hard limit; it keeps the number of
    /// small, independent encoding tasks down.
    #[arg(
        short = 'm',
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_MIN_SCENE_LENGTH,
        allow_negative_numbers = true
    )]
    pub min_scene_length: PositiveInt,

    /// Use Single-Pass encoding instead of Two-Pass encoding.
    #[arg(short = '1', long = "single-pass")]
    pub enable_single_pass_encode: bool,

    /// Crop the given number of pixels from the input videos. Repeat the option to give each
    /// input file its own crop values; the last given set is used for all remaining input files.
    /// Uses an ffmpeg video filter, so it conflicts with custom video filters given in
    /// --encoder-parameters.
    #[arg(
        long = "crop",
        num_args = CROP_VALUE_COUNT,
        value_names = ["TOP", "BOTTOM", "LEFT", "RIGHT"],
        action = ArgAction::Append,
        allow_negative_numbers = true
    )]
    pub crop: Vec<NonNegativeInt>,

    /// Custom encoder parameters, given as a single quoted string and passed to all ffmpeg
    /// processes doing the encoding work.
    #[arg(
        short = 'e',
        long,
        value_name = "STRING",
        default_value = DEFAULT_ENCODER_PARAMETERS,
        allow_hyphen_values = true
    )]
    pub encoder_parameters: String,

    /// Custom global parameters passed to all ffmpeg processes before the input file, for
    /// example '-hwaccel cuvid'. A hardware decoder must handle at least
    /// --max-concurrent-encodes parallel instances.
    #[arg(
        short = 'g',
        long,
        value_name = "STRING",
        default_value = DEFAULT_GLOBAL_PARAMETERS,
        allow_hyphen_values = true
    )]
    pub global_parameters: String,

    /// Run up to this many ffmpeg instances in parallel.
    #[arg(
        short = 'c',
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_MAX_CONCURRENT_ENCODES,
        allow_negative_numbers = true
    )]
    pub max_concurrent_encodes: PositiveInt,

    /// Dump executed ffmpeg commands into text files in the temporary directory. With 'only',
    /// commands are dumped but the encoding tasks are not executed; scene detection still runs.
    /// A value other than 'no' implies --keep-temp.
    #[arg(
        long,
        value_name = "MODE",
        default_value_t = DumpCommands::No,
        value_parser = PossibleValuesParser::new(DumpCommands::CHOICES)
            .try_map(|mode| mode.parse::<DumpCommands>())
    )]
    pub dump_commands: DumpCommands,

    /// Deinterlace the input video using the yadif video filter. Conflicts with custom video
    /// filters given in --encoder-parameters.
    #[arg(long)]
    pub deinterlace: bool,

    /// Stop after encoding this number of scenes, to split the work over multiple sessions. The
    /// final result is assembled once all scenes are finished. Both passes of a Two-Pass encode
    /// count as one. Implies --keep-temp.
    #[arg(short = 'L', long, value_name = "NUMBER", allow_negative_numbers = true)]
    pub limit_encodes: Option<PositiveInt>,

    /// Print version information and exit.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,

    /// Increase output verbosity. Also show debug messages.
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Send the full program log to a running cutelog instance.
    #[arg(long)]
    pub cutelog_integration: bool,

    /// The ffmpeg executable: a simple name searched on PATH, or a relative or absolute path.
    #[arg(
        long,
        value_name = "EXECUTABLE_NAME",
        default_value = DEFAULT_FFMPEG,
        env = "AV1TRANSCODER_FFMPEG"
    )]
    pub ffmpeg: String,

    /// The ffprobe executable: a simple name searched on PATH, or a relative or absolute path.
    #[arg(
        long,
        value_name = "EXECUTABLE_NAME",
        default_value = DEFAULT_FFPROBE,
        env = "AV1TRANSCODER_FFPROBE"
    )]
    pub ffprobe: String,

    /// Path to a custom ffmpeg installation, for example "/opt/ffmpeg/bin". If given, --ffmpeg
    /// and --ffprobe are relative to this directory.
    #[arg(long, value_name = "DIRECTORY", env = "AV1TRANSCODER_FFMPEG_BASE")]
    pub ffmpeg_base: Option<PathBuf>,
}

impl Cli {
    /// Resolves the parsed arguments into the immutable configuration.
    #[must_use]
    pub fn into_config(self) -> TranscodeConfig {
        derive_config(self.into())
    }
}

impl From<Cli> for RawOptions {
    fn from(cli: Cli) -> Self {
        // clap only accepts --crop with exactly four values.
        let crop_values = cli
            .crop
            .chunks_exact(CROP_VALUE_COUNT)
            .map(|values| [values[0], values[1], values[2], values[3]])
            .collect();

        Self {
            input_files: cli.input_files,
            output_dir: cli.output_dir,
            temp_dir: cli.temp_dir,
            keep_temp: cli.keep_temp,
            force_overwrite: cli.force_overwrite,
            scene_cut_threshold: cli.scene_cut_threshold,
            min_scene_length: cli.min_scene_length,
            enable_single_pass_encode: cli.enable_single_pass_encode,
            crop_values,
            encoder_parameters: cli.encoder_parameters,
            global_parameters: cli.global_parameters,
            max_concurrent_encodes: cli.max_concurrent_encodes,
            dump_commands: cli.dump_commands,
            deinterlace: cli.deinterlace,
            limit_encodes: cli.limit_encodes,
            verbose: cli.verbose,
            cutelog_integration: cli.cutelog_integration,
            ffmpeg: cli.ffmpeg,
            ffprobe: cli.ffprobe,
            ffmpeg_base: cli.ffmpeg_base,
        }
    }
}
