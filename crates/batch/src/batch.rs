//! Output directory preparation and the batch loop.

use std::path::Path;
use std::time::{Duration, Instant};

use motion_common::config::PipelineConfig;
use motion_common::error::{MotionError, MotionResult};

use crate::item::CaptureFlags;
use crate::orchestrator::process_item;
use crate::range::BatchRange;
use crate::runner::ProcessRunner;

/// Totals for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub items: usize,
    pub commands: usize,
    pub elapsed: Duration,
}

/// Make sure `path` exists as a directory.
///
/// Creates a single level only; the parent must already exist. Returns
/// `true` when the directory was created by this call.
pub fn prepare_output_dir(path: &Path) -> MotionResult<bool> {
    if path.is_dir() {
        return Ok(false);
    }

    match std::fs::create_dir(path) {
        Ok(()) => {
            tracing::info!(path = %path.display(), "Created the directory");
            Ok(true)
        }
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists && path.is_dir() => Ok(false),
        Err(source) => Err(MotionError::OutputDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Validate raw CLI bounds, then run the batch.
///
/// A rejected range returns before the output directory is touched or any
/// command is issued.
pub fn generate<R>(
    runner: &mut R,
    config: &PipelineConfig,
    start: i64,
    end: i64,
    flags: CaptureFlags,
) -> MotionResult<BatchSummary>
where
    R: ProcessRunner + ?Sized,
{
    let range = BatchRange::new(start, end)?;
    run_batch(runner, config, range, flags)
}

/// Generate every item in `range`, in ascending order.
///
/// The output directory is prepared first; the first failing item aborts
/// the run and its error is returned unchanged.
pub fn run_batch<R>(
    runner: &mut R,
    config: &PipelineConfig,
    range: BatchRange,
    flags: CaptureFlags,
) -> MotionResult<BatchSummary>
where
    R: ProcessRunner + ?Sized,
{
    let started = Instant::now();
    prepare_output_dir(&config.paths.output_dir)?;

    tracing::info!(
        start = range.start(),
        end = range.end(),
        items = range.len(),
        screenshot = flags.screenshot,
        video = flags.video,
        runner = runner.name(),
        "Generating NFTs"
    );
    if flags.is_empty() {
        tracing::warn!("Neither --screenshot nor --video given; no files will be generated");
    }

    let mut summary = BatchSummary::default();
    for item in range.items() {
        tracing::info!(item = %item, "Generating NFT");
        let report = process_item(&mut *runner, config, flags, &item).map_err(|err| {
            tracing::error!(item = %item, error = %err, "Item failed; aborting batch");
            err
        })?;
        summary.items += 1;
        summary.commands += report.commands;
    }

    summary.elapsed = started.elapsed();
    tracing::info!(
        items = summary.items,
        commands = summary.commands,
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "Batch finished"
    );
    Ok(summary)
}
