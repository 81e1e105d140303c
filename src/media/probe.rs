use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::ProbeError;

/// Source of media durations
///
/// The pool builder only needs this one operation, so it is kept behind a
/// trait: production uses [`FfprobeProber`], tests substitute a fixed map.
pub trait DurationProbe {
    /// Return the duration of the file at `path` in seconds.
    ///
    /// Failures are recoverable by contract: callers treat a failed probe as
    /// "this file yields zero segments" and keep going.
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Duration prober backed by an `ffprobe` subprocess
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    binary: String,
}

impl Default for FfprobeProber {
    fn default() -> Self {
        Self::new()
    }
}

impl FfprobeProber {
    /// Create a prober that resolves `ffprobe` via PATH
    pub fn new() -> Self {
        Self { binary: "ffprobe".to_string() }
    }

    /// Create a prober with an explicit ffprobe binary location
    pub fn with_binary<S: Into<String>>(binary: S) -> Self {
        Self { binary: binary.into() }
    }

    /// Check that the ffprobe binary is runnable at all
    pub fn is_available(&self) -> bool {
        Command::new(&self.binary)
            .arg("-version")
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }
}

impl DurationProbe for FfprobeProber {
    fn probe_duration(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new(&self.binary)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(path)
            .output()
            .map_err(|e| ProbeError::InvocationFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ProbeError::ProbeFailed {
                path: path.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let duration = parse_duration_output(&stdout).ok_or_else(|| {
            ProbeError::UnparsableDuration {
                path: path.display().to_string(),
                output: stdout.trim().to_string(),
            }
        })?;

        debug!("Probed {:?}: {:.3}s", path, duration);
        Ok(duration)
    }
}

/// Parse ffprobe's single-value duration output into seconds
fn parse_duration_output(stdout: &str) -> Option<f64> {
    let duration: f64 = stdout.trim().parse().ok()?;
    if duration.is_finite() && duration >= 0.0 {
        Some(duration)
    } else {
        None
    }
}
