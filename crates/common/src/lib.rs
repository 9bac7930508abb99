//! MOTION Common Utilities
//!
//! Shared infrastructure for the MOTION NFT generator crates:
//! - Error types and result aliases
//! - Pipeline configuration (paths, renderer and transcoder settings)
//! - Tracing/logging initialization

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
