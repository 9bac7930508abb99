//! Preflight checks for external tools and input assets.
//!
//! Nothing here launches a process; checks only look at the filesystem and
//! `PATH`, so a batch can be vetted before any rendering starts.

use std::path::{Path, PathBuf};

use motion_common::config::PipelineConfig;
use motion_common::error::{MotionError, MotionResult};

use crate::item::CaptureFlags;
use crate::range::BatchRange;

/// One thing the batch needs on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub name: String,
    pub path: PathBuf,
    pub available: bool,
    pub fix_instructions: Option<String>,
}

/// Collect every requirement for generating `range` with `flags`.
pub fn check_requirements(
    config: &PipelineConfig,
    range: BatchRange,
    flags: CaptureFlags,
) -> Vec<Requirement> {
    let mut requirements = Vec::new();
    if flags.is_empty() {
        return requirements;
    }

    let renderer = &config.renderer.binary;
    requirements.push(Requirement {
        name: "Renderer".to_string(),
        path: renderer.clone(),
        available: resolve_executable(renderer).is_some(),
        fix_instructions: Some("Build the particle renderer or set renderer.binary".to_string()),
    });

    if flags.video {
        let transcoder = &config.transcoder.binary;
        let resolved = resolve_executable(transcoder);
        requirements.push(Requirement {
            name: "Transcoder".to_string(),
            path: resolved.clone().unwrap_or_else(|| transcoder.clone()),
            available: resolved.is_some(),
            fix_instructions: Some("Install ffmpeg or set transcoder.binary".to_string()),
        });

        let audio = &config.paths.audio_track;
        requirements.push(Requirement {
            name: "Audio track".to_string(),
            path: audio.clone(),
            available: audio.is_file(),
            fix_instructions: Some("Provide the ambient track or set paths.audio_track".to_string()),
        });
    }

    for item in range.items() {
        let path = item.config_path(&config.paths.nfts_dir);
        requirements.push(Requirement {
            name: format!("Config {item}"),
            available: path.exists(),
            path,
            fix_instructions: None,
        });
    }

    for requirement in requirements.iter().filter(|r| !r.available) {
        tracing::debug!(name = %requirement.name, path = %requirement.path.display(), "Requirement missing");
    }
    requirements
}

/// Fail with the first missing requirement.
pub fn ensure_available(requirements: &[Requirement]) -> MotionResult<()> {
    match requirements.iter().find(|r| !r.available) {
        Some(missing) => Err(MotionError::MissingAsset {
            path: missing.path.clone(),
        }),
        None => Ok(()),
    }
}

/// Print a user-friendly requirement report.
pub fn print_requirement_report(requirements: &[Requirement]) {
    println!("MOTION Preflight:");
    println!("{}", "-".repeat(60));

    for req in requirements {
        let status = if req.available { "[OK]" } else { "[MISSING]" };
        println!("  {} {}: {}", status, req.name, req.path.display());

        if !req.available {
            if let Some(ref fix) = req.fix_instructions {
                println!("    Fix: {fix}");
            }
        }
    }
}

/// Resolve a program the way the OS would: paths with a directory component
/// are taken as-is, bare names are searched on `PATH`.
pub fn resolve_executable(program: &Path) -> Option<PathBuf> {
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }

    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| executable_candidates(&dir, program))
        .find(|candidate| candidate.is_file())
}

fn executable_candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let plain = dir.join(program);
    if cfg!(windows) && program.extension().is_none() {
        vec![plain.with_extension("exe"), plain]
    } else {
        vec![plain]
    }
}
