//! Reporting of the resolved execution plan.
//!
//! The configuration is the hand-off point to the transcoding pipeline. This
//! module logs what the pipeline is going to do for each input file and
//! warns about option combinations that make ffmpeg fail later on.

use log::{debug, info, warn};

use av1transcoder_core::{DumpCommands, TranscodeConfig};

/// ffmpeg options that introduce a custom video filter chain.
const VIDEO_FILTER_OPTIONS: [&str; 3] = ["-vf", "-filter:v", "-filter_complex"];

/// Whether the passthrough encoder parameters contain a video filter.
#[must_use]
pub fn has_custom_video_filter(encoder_parameters: &str) -> bool {
    encoder_parameters
        .split_whitespace()
        .any(|token| VIDEO_FILTER_OPTIONS.contains(&token))
}

/// Warnings about options that cannot be combined in one ffmpeg invocation.
#[must_use]
pub fn filter_conflicts(config: &TranscodeConfig) -> Vec<&'static str> {
    let mut conflicts = Vec::new();
    if !has_custom_video_filter(config.encoder_parameters()) {
        return conflicts;
    }
    if !config.crop_plan().is_uncropped() {
        conflicts.push("--crop adds a video filter and conflicts with the custom video filter in --encoder-parameters");
    }
    if config.deinterlace() {
        conflicts.push("--deinterlace adds a video filter and conflicts with the custom video filter in --encoder-parameters");
    }
    conflicts
}

/// Logs the plan for every input file.
pub fn report_plan(config: &TranscodeConfig) {
    info!(
        "Transcoding {} input file(s), running up to {} encodes in parallel",
        config.input_files().len(),
        config.max_concurrent_encodes()
    );
    info!(
        "Encoding mode: {}",
        if config.enable_single_pass_encode() { "single-pass" } else { "two-pass" }
    );
    debug!("Using ffmpeg at {}", config.ffmpeg_executable().display());
    debug!("Using ffprobe at {}", config.ffprobe_executable().display());

    for job in config.jobs() {
        info!("{} -> {}", job.input.display(), job.output_file.display());
        debug!("  Temporary data: {}", job.temp_dir.display());
        match job.crop {
            Some(crop) => info!("  Crop: {} ({})", crop, crop.filter_expression()),
            None => debug!("  Crop: none"),
        }
    }

    if config.keep_temp() {
        info!("Temporary data will be kept");
    }
    if let Some(limit) = config.limit_encodes() {
        info!("Stopping after {limit} scene encode(s)");
    }
    match config.dump_commands() {
        DumpCommands::Only => info!("Command lines will be dumped without running the encodes"),
        DumpCommands::Yes => info!("Command lines will be dumped"),
        DumpCommands::No => {}
    }
    if config.cutelog_integration() {
        warn!("cutelog integration is not available; logging to the terminal only");
    }
    for conflict in filter_conflicts(config) {
        warn!("{conflict}");
    }

    match serde_json::to_string_pretty(config) {
        Ok(json) => debug!("Resolved configuration:\n{json}"),
        Err(e) => debug!("Could not serialize the configuration: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av1transcoder_core::{NonNegativeInt, RawOptions, derive_config};
    use std::path::PathBuf;

    fn config(encoder_parameters: &str, crop: bool, deinterlace: bool) -> TranscodeConfig {
        derive_config(RawOptions {
            input_files: vec![PathBuf::from("a.mkv")],
            encoder_parameters: encoder_parameters.to_string(),
            crop_values: if crop { vec![[NonNegativeInt::ZERO; 4]] } else { Vec::new() },
            deinterlace,
            ..RawOptions::default()
        })
    }

    #[test]
    fn detects_filter_options_as_whole_tokens() {
        assert!(has_custom_video_filter("-crf 20 -vf scale=1280:-2"));
        assert!(has_custom_video_filter("-filter:v yadif"));
        assert!(!has_custom_video_filter("-crf 20 -vframes 10"));
        assert!(!has_custom_video_filter(""));
    }

    #[test]
    fn conflicts_need_both_a_custom_filter_and_a_builtin_one() {
        assert!(filter_conflicts(&config("-vf hqdn3d", false, false)).is_empty());
        assert!(filter_conflicts(&config("-crf 20", true, true)).is_empty());
        assert_eq!(filter_conflicts(&config("-vf hqdn3d", true, false)).len(), 1);
        assert_eq!(filter_conflicts(&config("-vf hqdn3d", true, true)).len(), 2);
    }
}
