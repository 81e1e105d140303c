//! # Mixcut
//!
//! Batch-assemble short-form vertical videos: a fixed hook clip, a
//! randomized sequence of segments drawn from one or more middle footage
//! pools, and a fixed code (outro) clip, repeated to produce N distinct
//! output videos with minimal segment repetition across the batch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mixcut::{composition::MixEngine, config::Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::from_file("run.toml")?;
//! let engine = MixEngine::new(config);
//! let output_dir = engine.run(std::path::Path::new("output")).await?;
//! println!("videos written to {:?}", output_dir);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`sequence`] - the core: clip-pool allocation and edit-list generation
//! - [`media`] - ffprobe/ffmpeg collaborators behind narrow interfaces
//! - [`composition`] - the batch engine tying the pipeline together
//! - [`config`] - run parameters and render settings
//!
//! ## How sequencing works
//!
//! Each middle folder's videos are sliced into non-overlapping fixed-length
//! windows, aggregated into one pool per folder, and shuffled once. A
//! per-pool cursor then round-robins through the shuffled order across all N
//! output videos, so no segment repeats until its whole pool has been drawn
//! once.

pub mod composition;
pub mod config;
pub mod error;
pub mod media;
pub mod sequence;

// Re-export commonly used types for convenience
pub use crate::{
    composition::MixEngine,
    config::Config,
    error::{MixcutError, Result},
    sequence::{EditList, EditListEntry},
};
