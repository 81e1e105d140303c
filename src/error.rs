use thiserror::Error;

/// Main error type for the mixcut library
#[derive(Error, Debug)]
pub enum MixcutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Clip pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Duration probe error: {0}")]
    Probe(#[from] ProbeError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },
}

/// Errors raised while building clip pools
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("Source folder is not a readable directory: {path}")]
    SourceFolderInvalid { path: String },

    #[error("No usable material: every configured source folder produced an empty pool")]
    NoUsableMaterial,
}

/// Duration probe failures
///
/// Recoverable at the pool-building level: a file that cannot be probed
/// contributes zero segments and the run continues.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to invoke ffprobe for {path}: {reason}")]
    InvocationFailed { path: String, reason: String },

    #[error("ffprobe reported failure for {path}: {stderr}")]
    ProbeFailed { path: String, stderr: String },

    #[error("Could not parse duration for {path}: {output}")]
    UnparsableDuration { path: String, output: String },
}

/// Rendering (ffmpeg) failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to invoke ffmpeg: {reason}")]
    InvocationFailed { reason: String },

    #[error("Clip normalization failed for {source_clip}: {stderr}")]
    ClipFailed { source_clip: String, stderr: String },

    #[error("Concatenation failed for {output}: {stderr}")]
    ConcatFailed { output: String, stderr: String },
}

/// Convenience type alias for Results using MixcutError
pub type Result<T> = std::result::Result<T, MixcutError>;

impl MixcutError {
    /// Check if this error is recoverable (the run can continue past it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            // A failed probe only costs the segments of one source file
            Self::Probe(_) => true,
            // IO errors might be temporary
            Self::Io(_) => true,
            // Config, pool, and render errors abort the run
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_failures_are_recoverable() {
        let err = MixcutError::from(ProbeError::UnparsableDuration {
            path: "a.mp4".to_string(),
            output: "N/A".to_string(),
        });
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_pool_and_render_failures_abort() {
        let pool_err = MixcutError::from(PoolError::NoUsableMaterial);
        assert!(!pool_err.is_recoverable());

        let render_err = MixcutError::from(RenderError::InvocationFailed {
            reason: "ffmpeg not found".to_string(),
        });
        assert!(!render_err.is_recoverable());
    }
}
