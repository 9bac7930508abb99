//! Renderer invocations.
//!
//! The screenshot is always taken by its own renderer run. Capturing the
//! screenshot in the same run as `--record` produced truncated images.

use motion_common::config::{PathsConfig, RendererConfig};

use crate::command::CommandSpec;
use crate::item::ItemName;

fn base_command(renderer: &RendererConfig, paths: &PathsConfig, item: &ItemName) -> CommandSpec {
    renderer
        .base_configs
        .iter()
        .fold(CommandSpec::new(&renderer.binary), |cmd, preset| {
            cmd.opt("--config", preset)
        })
        .opt("--config", item.config_path(&paths.nfts_dir))
}

/// Short isolated run writing `<item>.png`.
pub fn screenshot_command(
    renderer: &RendererConfig,
    paths: &PathsConfig,
    item: &ItemName,
) -> CommandSpec {
    base_command(renderer, paths, item)
        .opt("--screenshot", item.screenshot_path(&paths.output_dir))
        .opt("--length", renderer.screenshot_length_secs.to_string())
        .opt("--pixels-per-ratio", renderer.pixels_per_ratio.to_string())
        .opt(
            "--screenshot-delay",
            renderer.screenshot_delay_secs.to_string(),
        )
}

/// Raw capture writing `<item>-raw.mp4`, length taken from the override table.
pub fn raw_video_command(
    renderer: &RendererConfig,
    paths: &PathsConfig,
    item: &ItemName,
) -> CommandSpec {
    let length = renderer.video_length_for(item.as_str());
    base_command(renderer, paths, item)
        .opt("--record", item.raw_video_path(&paths.output_dir))
        .opt("--length", length.to_string())
        .opt("--fps", renderer.fps.to_string())
        .opt("--preset", &renderer.preset)
        .opt("--crf", renderer.crf.to_string())
        .opt("--pixels-per-ratio", renderer.pixels_per_ratio.to_string())
}
