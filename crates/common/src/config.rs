//! Pipeline configuration.
//!
//! All filesystem locations and external-tool settings live here and are
//! passed explicitly into the batch driver. Every field has a default, so a
//! JSON config file only needs to name what it overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{MotionError, MotionResult};

/// Global pipeline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Input and output locations.
    pub paths: PathsConfig,

    /// Particle renderer invocation settings.
    pub renderer: RendererConfig,

    /// Two-pass transcoder settings.
    pub transcoder: TranscoderConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Filesystem layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Shader directory. Reserved; not read by the current pipeline.
    pub shader_dir: PathBuf,

    /// Directory holding one renderer config per item.
    pub nfts_dir: PathBuf,

    /// Directory receiving every generated file.
    pub output_dir: PathBuf,

    /// Ambient audio track muxed into every video.
    pub audio_track: PathBuf,
}

/// Renderer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Path to the renderer executable.
    pub binary: PathBuf,

    /// Preset configs passed as `--config` ahead of the item config.
    pub base_configs: Vec<String>,

    pub fps: u32,

    /// Encoder preset for the raw capture.
    pub preset: String,

    /// Constant rate factor for the raw capture.
    pub crf: u32,

    pub pixels_per_ratio: u32,

    /// Run length of the isolated screenshot invocation (seconds).
    pub screenshot_length_secs: u32,

    /// Delay before the screenshot is taken (seconds).
    pub screenshot_delay_secs: u32,

    /// Default raw video length (seconds).
    pub video_length_secs: u32,

    /// Per-item video length, keyed by item name.
    pub video_length_overrides: BTreeMap<String, u32>,
}

/// Transcoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// Transcoder executable, resolved through `PATH` when relative.
    pub binary: PathBuf,

    pub video_codec: String,

    pub audio_codec: String,

    /// Target bitrate shared by both passes (e.g. "10M").
    pub target_bitrate: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "motion_batch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            shader_dir: PathBuf::from("./shaders"),
            nfts_dir: PathBuf::from("./nfts"),
            output_dir: PathBuf::from("./nft-videos"),
            audio_track: PathBuf::from("./audio/noise.wav"),
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("./build/bin/VectorFieldParticleSystem"),
            base_configs: Vec::new(),
            fps: 60,
            preset: "veryslow".to_string(),
            crf: 0,
            pixels_per_ratio: 1024,
            screenshot_length_secs: 3,
            screenshot_delay_secs: 2,
            video_length_secs: 30,
            video_length_overrides: BTreeMap::from([("MOTION-3".to_string(), 59)]),
        }
    }
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("ffmpeg"),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            target_bitrate: "10M".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RendererConfig {
    /// Raw video length for the named item, falling back to the default.
    pub fn video_length_for(&self, item: &str) -> u32 {
        self.video_length_overrides
            .get(item)
            .copied()
            .unwrap_or(self.video_length_secs)
    }
}

impl PipelineConfig {
    /// Load config from an explicit JSON file, or use defaults when none is given.
    pub fn load(path: Option<&Path>) -> MotionResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|e| {
            MotionError::config(format!("Failed to read config at {}: {e}", path.display()))
        })?;
        let config = Self::from_json(&content).map_err(|e| {
            MotionError::config(format!("Failed to parse config at {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded pipeline config");
        Ok(config)
    }

    /// Parse a (possibly partial) JSON config.
    pub fn from_json(content: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> MotionResult<()> {
        let renderer = &self.renderer;
        if renderer.fps == 0 {
            return Err(MotionError::config("renderer.fps must be positive"));
        }
        if renderer.screenshot_delay_secs >= renderer.screenshot_length_secs {
            return Err(MotionError::config(format!(
                "renderer.screenshot_delay_secs ({}) must be shorter than renderer.screenshot_length_secs ({})",
                renderer.screenshot_delay_secs, renderer.screenshot_length_secs
            )));
        }
        if renderer.video_length_secs == 0
            || renderer.video_length_overrides.values().any(|&len| len == 0)
        {
            return Err(MotionError::config("video lengths must be positive"));
        }
        if self.transcoder.target_bitrate.trim().is_empty() {
            return Err(MotionError::config("transcoder.target_bitrate is empty"));
        }
        Ok(())
    }
}
