//! Item naming and per-item file locations.

use std::fmt;
use std::path::{Path, PathBuf};

/// Name prefix shared by every item in the series.
pub const SERIES_PREFIX: &str = "MOTION";

/// Identifier of one NFT, rendered as `MOTION-<n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName {
    index: u32,
    name: String,
}

impl ItemName {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            name: format!("{SERIES_PREFIX}-{index}"),
        }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Renderer config for this item: `<nfts_dir>/<name>`.
    pub fn config_path(&self, nfts_dir: &Path) -> PathBuf {
        nfts_dir.join(&self.name)
    }

    /// `<output_dir>/<name>.png`
    pub fn screenshot_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.png", self.name))
    }

    /// `<output_dir>/<name>.mp4`
    pub fn video_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}.mp4", self.name))
    }

    /// Intermediate capture: `<output_dir>/<name>-raw.mp4`
    pub fn raw_video_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}-raw.mp4", self.name))
    }

    /// Prefix for two-pass statistics files: `<output_dir>/<name>-2pass`
    pub fn passlog_prefix(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("{}-2pass", self.name))
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Which capture steps run for every item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureFlags {
    pub screenshot: bool,
    pub video: bool,
}

impl CaptureFlags {
    pub fn new(screenshot: bool, video: bool) -> Self {
        Self { screenshot, video }
    }

    /// True when neither step is enabled.
    pub fn is_empty(&self) -> bool {
        !self.screenshot && !self.video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_name_format() {
        let item = ItemName::new(42);
        assert_eq!(item.as_str(), "MOTION-42");
        assert_eq!(item.to_string(), "MOTION-42");
        assert_eq!(item.index(), 42);
    }

    #[test]
    fn test_item_paths() {
        let item = ItemName::new(1);
        let out = Path::new("./nft-videos");
        assert_eq!(
            item.config_path(Path::new("./nfts")),
            PathBuf::from("./nfts/MOTION-1")
        );
        assert_eq!(item.screenshot_path(out), out.join("MOTION-1.png"));
        assert_eq!(item.video_path(out), out.join("MOTION-1.mp4"));
        assert_eq!(item.raw_video_path(out), out.join("MOTION-1-raw.mp4"));
        assert_eq!(item.passlog_prefix(out), out.join("MOTION-1-2pass"));
    }

    #[test]
    fn test_capture_flags() {
        assert!(CaptureFlags::default().is_empty());
        assert!(!CaptureFlags::new(true, false).is_empty());
    }
}
