//! MOTION Batch Generator
//!
//! Sequential driver that turns a validated index range into NFT preview
//! assets by running external tools, one item and one command at a time.
//!
//! # Pipeline Architecture
//!
//! ```text
//! --start/--end ── range::BatchRange::new ──┐
//!                                           ▼
//!                          batch::prepare_output_dir
//!                                           │
//!              ┌── for each MOTION-<n> ─────┘
//!              ▼
//!   orchestrator::process_item
//!     ├── renderer --screenshot   (isolated run)   → <n>.png
//!     └── renderer --record       → <n>-raw.mp4
//!           ├── ffmpeg pass 1     (stats only)
//!           ├── ffmpeg pass 2     (+ audio track)  → <n>.mp4
//!           └── remove raw + pass logs
//! ```
//!
//! Every external command goes through a [`runner::ProcessRunner`]; the
//! first failure aborts the whole batch.

pub mod batch;
pub mod command;
pub mod item;
pub mod orchestrator;
pub mod preflight;
pub mod range;
pub mod renderer;
pub mod runner;
pub mod transcoder;

pub use batch::{generate, prepare_output_dir, run_batch, BatchSummary};
pub use command::CommandSpec;
pub use item::{CaptureFlags, ItemName};
pub use range::{BatchRange, RangeViolation};
pub use runner::{CommandOutput, DryRunRunner, ProcessRunner, SystemRunner};
