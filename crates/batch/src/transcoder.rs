//! Two-pass transcode of the raw capture.
//!
//! Pass 1 only gathers rate-control statistics; its output goes to the null
//! muxer. Pass 2 reads the same statistics, adds the ambient audio track and
//! stops at the shorter stream.

use std::path::{Path, PathBuf};

use motion_common::config::{PathsConfig, TranscoderConfig};

use crate::command::CommandSpec;
use crate::item::ItemName;

/// Suffixes ffmpeg appends to the pass-log prefix for x264.
const PASSLOG_SUFFIXES: [&str; 2] = ["-0.log", "-0.log.mbtree"];

pub fn first_pass_command(
    transcoder: &TranscoderConfig,
    paths: &PathsConfig,
    item: &ItemName,
) -> CommandSpec {
    CommandSpec::new(&transcoder.binary)
        .arg("-y")
        .opt("-i", item.raw_video_path(&paths.output_dir))
        .opt("-c:v", &transcoder.video_codec)
        .opt("-b:v", &transcoder.target_bitrate)
        .opt("-pass", "1")
        .opt("-passlogfile", item.passlog_prefix(&paths.output_dir))
        .arg("-an")
        .opt("-f", "null")
        .arg("-")
}

pub fn second_pass_command(
    transcoder: &TranscoderConfig,
    paths: &PathsConfig,
    item: &ItemName,
) -> CommandSpec {
    CommandSpec::new(&transcoder.binary)
        .arg("-y")
        .opt("-i", item.raw_video_path(&paths.output_dir))
        .opt("-i", &paths.audio_track)
        .opt("-map", "0:v")
        .opt("-map", "1:a")
        .opt("-c:v", &transcoder.video_codec)
        .opt("-b:v", &transcoder.target_bitrate)
        .opt("-pass", "2")
        .opt("-passlogfile", item.passlog_prefix(&paths.output_dir))
        .opt("-c:a", &transcoder.audio_codec)
        .arg("-shortest")
        .arg(item.video_path(&paths.output_dir))
}

/// Statistics files left behind by both passes.
pub fn passlog_files(output_dir: &Path, item: &ItemName) -> Vec<PathBuf> {
    let prefix = item.passlog_prefix(output_dir);
    let prefix = prefix.to_string_lossy();
    PASSLOG_SUFFIXES
        .iter()
        .map(|suffix| PathBuf::from(format!("{prefix}{suffix}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_first_pass_discards_output_and_audio() {
        let cmd = first_pass_command(
            &TranscoderConfig::default(),
            &PathsConfig::default(),
            &ItemName::new(1),
        );
        assert_eq!(cmd.program(), OsStr::new("ffmpeg"));
        assert_eq!(cmd.value_of("-pass"), Some(OsStr::new("1")));
        assert_eq!(cmd.value_of("-f"), Some(OsStr::new("null")));
        assert_eq!(cmd.value_of("-b:v"), Some(OsStr::new("10M")));
        assert!(cmd.has_arg("-an"));
        assert!(!cmd.has_arg("-shortest"));
        assert_eq!(cmd.get_args().last().map(|a| a.as_os_str()), Some(OsStr::new("-")));
    }

    #[test]
    fn test_second_pass_muxes_audio() {
        let paths = PathsConfig::default();
        let cmd = second_pass_command(&TranscoderConfig::default(), &paths, &ItemName::new(9));
        let inputs: Vec<_> = cmd
            .get_args()
            .windows(2)
            .filter(|w| w[0] == "-i")
            .map(|w| PathBuf::from(&w[1]))
            .collect();
        assert_eq!(
            inputs,
            vec![
                paths.output_dir.join("MOTION-9-raw.mp4"),
                paths.audio_track.clone()
            ]
        );
        assert_eq!(cmd.value_of("-pass"), Some(OsStr::new("2")));
        assert_eq!(cmd.value_of("-b:v"), Some(OsStr::new("10M")));
        assert!(cmd.has_arg("-shortest"));
        assert_eq!(
            cmd.get_args().last().map(PathBuf::from),
            Some(paths.output_dir.join("MOTION-9.mp4"))
        );
    }

    #[test]
    fn test_both_passes_share_passlog() {
        let transcoder = TranscoderConfig::default();
        let paths = PathsConfig::default();
        let item = ItemName::new(2);
        assert_eq!(
            first_pass_command(&transcoder, &paths, &item).value_of("-passlogfile"),
            second_pass_command(&transcoder, &paths, &item).value_of("-passlogfile"),
        );
    }

    #[test]
    fn test_passlog_files() {
        let files = passlog_files(Path::new("out"), &ItemName::new(4));
        assert_eq!(
            files,
            vec![
                PathBuf::from("out/MOTION-4-2pass-0.log"),
                PathBuf::from("out/MOTION-4-2pass-0.log.mbtree"),
            ]
        );
    }
}
