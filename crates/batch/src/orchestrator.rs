//! Per-item step sequencing.

use std::path::{Path, PathBuf};

use motion_common::config::PipelineConfig;
use motion_common::error::MotionResult;

use crate::item::{CaptureFlags, ItemName};
use crate::renderer::{raw_video_command, screenshot_command};
use crate::runner::ProcessRunner;
use crate::transcoder::{first_pass_command, passlog_files, second_pass_command};

/// What one item produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemReport {
    /// External commands issued for this item.
    pub commands: usize,

    pub screenshot: Option<PathBuf>,

    pub video: Option<PathBuf>,
}

/// Run the enabled steps for one item, stopping at the first failure.
pub fn process_item<R>(
    runner: &mut R,
    config: &PipelineConfig,
    flags: CaptureFlags,
    item: &ItemName,
) -> MotionResult<ItemReport>
where
    R: ProcessRunner + ?Sized,
{
    let mut report = ItemReport::default();

    if flags.screenshot {
        report.screenshot = Some(capture_screenshot(&mut *runner, config, item)?);
        report.commands += 1;
    }

    if flags.video {
        report.video = Some(capture_video(&mut *runner, config, item)?);
        report.commands += 3;
    }

    Ok(report)
}

fn capture_screenshot<R>(
    runner: &mut R,
    config: &PipelineConfig,
    item: &ItemName,
) -> MotionResult<PathBuf>
where
    R: ProcessRunner + ?Sized,
{
    tracing::info!(item = %item, "Capturing screenshot");
    runner.run(&screenshot_command(&config.renderer, &config.paths, item))?;
    Ok(item.screenshot_path(&config.paths.output_dir))
}

fn capture_video<R>(runner: &mut R, config: &PipelineConfig, item: &ItemName) -> MotionResult<PathBuf>
where
    R: ProcessRunner + ?Sized,
{
    let paths = &config.paths;

    tracing::info!(
        item = %item,
        length_secs = config.renderer.video_length_for(item.as_str()),
        "Recording raw video"
    );
    runner.run(&raw_video_command(&config.renderer, paths, item))?;

    tracing::info!(item = %item, "Transcoding (pass 1/2)");
    runner.run(&first_pass_command(&config.transcoder, paths, item))?;

    tracing::info!(item = %item, "Transcoding (pass 2/2)");
    runner.run(&second_pass_command(&config.transcoder, paths, item))?;

    remove_intermediates(runner, &paths.output_dir, item)?;
    Ok(item.video_path(&paths.output_dir))
}

/// Delete the raw capture and the two-pass statistics.
///
/// The raw capture must exist. Pass logs are removed only when the encoder
/// actually wrote them.
fn remove_intermediates<R>(runner: &mut R, output_dir: &Path, item: &ItemName) -> MotionResult<()>
where
    R: ProcessRunner + ?Sized,
{
    runner.remove_file(&item.raw_video_path(output_dir))?;

    for path in passlog_files(output_dir, item) {
        if path.exists() {
            runner.remove_file(&path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;
    use crate::runner::{CommandOutput, DryRunRunner, SystemRunner};
    use motion_common::error::MotionError;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<CommandSpec>,
        removed: Vec<PathBuf>,
    }

    impl ProcessRunner for Recorder {
        fn run(&mut self, command: &CommandSpec) -> MotionResult<CommandOutput> {
            self.seen.push(command.clone());
            Ok(CommandOutput::default())
        }

        fn remove_file(&mut self, path: &Path) -> MotionResult<()> {
            self.removed.push(path.to_path_buf());
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn config_in(dir: &Path) -> PipelineConfig {
        let mut config = PipelineConfig::default();
        config.paths.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn test_no_flags_issue_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = Recorder::default();
        let report = process_item(
            &mut runner,
            &config_in(dir.path()),
            CaptureFlags::default(),
            &ItemName::new(1),
        )
        .unwrap();
        assert_eq!(report, ItemReport::default());
        assert!(runner.seen.is_empty());
        assert!(runner.removed.is_empty());
    }

    #[test]
    fn test_screenshot_runs_before_video() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = Recorder::default();
        let item = ItemName::new(2);
        let report = process_item(
            &mut runner,
            &config_in(dir.path()),
            CaptureFlags::new(true, true),
            &item,
        )
        .unwrap();
        assert_eq!(report.commands, 4);
        assert_eq!(runner.seen.len(), 4);
        assert!(runner.seen[0].has_arg("--screenshot"));
        assert!(!runner.seen[0].has_arg("--record"));
        assert!(runner.seen[1].has_arg("--record"));
        assert_eq!(runner.seen[2].value_of("-pass").unwrap(), "1");
        assert_eq!(runner.seen[3].value_of("-pass").unwrap(), "2");
        assert_eq!(runner.removed, vec![item.raw_video_path(dir.path())]);
    }

    #[test]
    fn test_cleanup_removes_raw_and_passlogs() {
        let dir = tempfile::tempdir().unwrap();
        let item = ItemName::new(5);
        std::fs::write(item.raw_video_path(dir.path()), b"raw").unwrap();
        for log in passlog_files(dir.path(), &item) {
            std::fs::write(log, b"stats").unwrap();
        }

        remove_intermediates(&mut SystemRunner::new(), dir.path(), &item).unwrap();

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_cleanup_fails_on_missing_raw() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            remove_intermediates(&mut SystemRunner::new(), dir.path(), &ItemName::new(1)).unwrap_err();
        match err {
            MotionError::Cleanup { path, source } => {
                assert_eq!(path, dir.path().join("MOTION-1-raw.mp4"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dry_run_keeps_intermediates() {
        let dir = tempfile::tempdir().unwrap();
        let item = ItemName::new(1);
        let raw = item.raw_video_path(dir.path());
        std::fs::write(&raw, b"raw").unwrap();
        let logs = passlog_files(dir.path(), &item);
        for log in &logs {
            std::fs::write(log, b"stats").unwrap();
        }

        let mut runner = DryRunRunner::new();
        process_item(
            &mut runner,
            &config_in(dir.path()),
            CaptureFlags::new(false, true),
            &item,
        )
        .unwrap();

        assert!(raw.exists());
        assert!(logs.iter().all(|log| log.exists()));
    }
}
