//! Check tools and input assets for a range.

use motion_batch::preflight::{check_requirements, ensure_available, print_requirement_report};
use motion_batch::{BatchRange, CaptureFlags};
use motion_common::config::PipelineConfig;
use motion_common::error::MotionError;

pub fn run(config: &PipelineConfig, start: i64, end: i64, flags: CaptureFlags) -> anyhow::Result<()> {
    let range = BatchRange::new(start, end).map_err(MotionError::from)?;

    let requirements = check_requirements(config, range, flags);
    if requirements.is_empty() {
        println!("Nothing to check: neither --screenshot nor --video given.");
        return Ok(());
    }

    print_requirement_report(&requirements);
    ensure_available(&requirements)?;

    println!();
    println!("All requirements are available. Ready to generate.");
    Ok(())
}
