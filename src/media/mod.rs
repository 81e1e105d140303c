//! # Media Collaborators
//!
//! Narrow interfaces over the external media tooling: duration probing via
//! ffprobe and clip normalization/concatenation via ffmpeg. The sequencing
//! core depends only on the traits exposed here, never on the subprocesses.

pub mod probe;
pub mod render;

pub use probe::{DurationProbe, FfprobeProber};
pub use render::FfmpegRenderer;
