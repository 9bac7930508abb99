//! Generate a range of NFTs.

use anyhow::Context;
use motion_batch::{run_batch, BatchRange, CaptureFlags, DryRunRunner, ProcessRunner, SystemRunner};
use motion_common::config::PipelineConfig;
use motion_common::error::MotionError;

pub fn run(
    config: &PipelineConfig,
    start: i64,
    end: i64,
    flags: CaptureFlags,
    dry_run: bool,
) -> anyhow::Result<()> {
    let range = BatchRange::new(start, end).map_err(MotionError::from)?;

    let mut runner: Box<dyn ProcessRunner> = if dry_run {
        Box::new(DryRunRunner::new())
    } else {
        Box::new(SystemRunner::new())
    };

    println!("Generate NFTs in range: {} - {}", range.start(), range.end());
    println!("  Output: {}", config.paths.output_dir.display());

    let summary = run_batch(&mut *runner, config, range, flags).with_context(|| {
        format!(
            "Generating MOTION-{}..=MOTION-{} failed",
            range.start(),
            range.end()
        )
    })?;

    println!(
        "Generated {} NFT(s) with {} command(s) in {:.1}s",
        summary.items,
        summary.commands,
        summary.elapsed.as_secs_f64()
    );
    Ok(())
}
