//! MOTION CLI — batch generation of NFT preview assets.
//!
//! Usage:
//!   generate-nfts [--start INT] [--end INT] [--screenshot] [--video]
//!   generate-nfts --check ...      Verify tools and assets, render nothing
//!   generate-nfts --dry-run ...    Log the command plan, render nothing

use std::path::PathBuf;

use clap::Parser;
use motion_batch::CaptureFlags;
use motion_common::config::PipelineConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "generate-nfts",
    about = "Generate NFTs in the MOTION NFT Series on Cardano.",
    version
)]
struct Cli {
    /// Start index when generating nfts (inclusive)
    #[arg(long, value_name = "INT", default_value_t = 1, allow_negative_numbers = true)]
    start: i64,

    /// End index when generating nfts (inclusive)
    #[arg(long, value_name = "INT", default_value_t = 128, allow_negative_numbers = true)]
    end: i64,

    /// Capture a PNG screenshot of each NFT
    #[arg(long)]
    screenshot: bool,

    /// Record, transcode and mux an MP4 video of each NFT
    #[arg(long)]
    video: bool,

    /// Pipeline config file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the output directory
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Log every command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Check that tools and assets exist, then exit
    #[arg(long, conflicts_with = "dry_run")]
    check: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    motion_common::logging::init_logging(&config.logging);

    if let Some(dir) = cli.output_dir {
        config.paths.output_dir = dir;
    }

    let flags = CaptureFlags::new(cli.screenshot, cli.video);
    if cli.check {
        commands::check::run(&config, cli.start, cli.end, flags)
    } else {
        commands::generate::run(&config, cli.start, cli.end, flags, cli.dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["generate-nfts"]).unwrap();
        assert_eq!((cli.start, cli.end), (1, 128));
        assert!(!cli.screenshot && !cli.video && !cli.dry_run && !cli.check);
    }

    #[test]
    fn test_negative_bounds_reach_validation() {
        let cli = Cli::try_parse_from(["generate-nfts", "--start", "-3", "--end", "2"]).unwrap();
        assert_eq!(cli.start, -3);
    }

    #[test]
    fn test_check_conflicts_with_dry_run() {
        assert!(Cli::try_parse_from(["generate-nfts", "--check", "--dry-run"]).is_err());
    }
}
