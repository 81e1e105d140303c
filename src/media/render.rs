use std::path::{Path, PathBuf};
use std::process::Output;

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::error::{RenderError, Result};
use crate::sequence::{EditList, EditListEntry};

/// Renders one edit list into one output file via ffmpeg subprocesses
///
/// Every entry is first normalized into an intermediate clip of the target
/// resolution and frame rate, then the intermediates are concatenated
/// losslessly. The intermediates live in a temp directory next to the output
/// file and are removed afterwards, also on failure.
#[derive(Debug, Clone)]
pub struct FfmpegRenderer {
    binary: String,
    settings: RenderConfig,
}

impl FfmpegRenderer {
    /// Create a renderer that resolves `ffmpeg` via PATH
    pub fn new(settings: RenderConfig) -> Self {
        Self { binary: "ffmpeg".to_string(), settings }
    }

    /// Create a renderer with an explicit ffmpeg binary location
    pub fn with_binary<S: Into<String>>(binary: S, settings: RenderConfig) -> Self {
        Self { binary: binary.into(), settings }
    }

    /// Render `edit_list` to `output_path`
    pub async fn render(&self, edit_list: &EditList, output_path: &Path) -> Result<()> {
        let temp_dir = temp_dir_for(output_path);
        tokio::fs::create_dir_all(&temp_dir).await?;

        let result = self.render_in(edit_list, output_path, &temp_dir).await;

        // Intermediates are never worth keeping, even after a failure
        if let Err(e) = tokio::fs::remove_dir_all(&temp_dir).await {
            debug!("Could not remove temp dir {:?}: {}", temp_dir, e);
        }

        result
    }

    async fn render_in(
        &self,
        edit_list: &EditList,
        output_path: &Path,
        temp_dir: &Path,
    ) -> Result<()> {
        let mut clip_paths = Vec::with_capacity(edit_list.len());

        for (i, entry) in edit_list.iter().enumerate() {
            let clip_path = temp_dir.join(format!("clip_{:03}.mp4", i));
            debug!("Normalizing entry {} ({})", i, entry.describe());

            let args = self.normalize_args(entry, &clip_path);
            let output = self.run_ffmpeg(&args).await?;
            if !output.status.success() {
                return Err(RenderError::ClipFailed {
                    source_clip: entry.describe(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                }
                .into());
            }

            clip_paths.push(clip_path);
        }

        let list_path = temp_dir.join("concat_list.txt");
        tokio::fs::write(&list_path, concat_manifest(&clip_paths)?).await?;

        let concat_args = concat_args(&list_path, output_path);
        let output = self.run_ffmpeg(&concat_args).await?;
        if !output.status.success() {
            return Err(RenderError::ConcatFailed {
                output: output_path.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        info!("Rendered {:?} ({} clips)", output_path, edit_list.len());
        Ok(())
    }

    async fn run_ffmpeg(&self, args: &[String]) -> Result<Output> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .await
            .map_err(|e| RenderError::InvocationFailed { reason: e.to_string() })?;
        Ok(output)
    }

    /// ffmpeg argv that normalizes one edit-list entry into `out`
    ///
    /// Fixed clips are re-encoded whole; trimmed clips seek to the window
    /// first (`-ss` before `-i`) and cap the read with `-t`. Audio is
    /// stripped; the concat stage would otherwise need matching streams.
    fn normalize_args(&self, entry: &EditListEntry, out: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec!["-y".into()];

        match entry {
            EditListEntry::Fixed { path } => {
                args.extend(["-i".into(), path.display().to_string()]);
            }
            EditListEntry::Trimmed { source, start, duration } => {
                args.extend([
                    "-ss".into(),
                    format!("{}", start),
                    "-i".into(),
                    source.display().to_string(),
                    "-t".into(),
                    format!("{}", duration),
                ]);
            }
        }

        args.extend([
            "-vf".into(),
            self.normalize_filter(),
            "-c:v".into(),
            "libx264".into(),
            "-preset".into(),
            "veryfast".into(),
            "-crf".into(),
            "23".into(),
            "-an".into(),
            out.display().to_string(),
        ]);

        args
    }

    /// Scale-and-pad filter producing the target geometry without distortion
    fn normalize_filter(&self) -> String {
        let (w, h, fps) = (self.settings.width, self.settings.height, self.settings.fps);
        format!(
            "scale={w}:{h}:force_original_aspect_ratio=decrease,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,fps={fps}"
        )
    }
}

fn temp_dir_for(output_path: &Path) -> PathBuf {
    let stem = output_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let parent = output_path.parent().unwrap_or_else(|| Path::new("."));
    parent.join(format!("temp_{}", stem))
}

/// Manifest for ffmpeg's concat demuxer, one `file` directive per clip
///
/// Entries are absolutized first: the concat demuxer resolves relative
/// entries against the directory containing the list file, not the working
/// directory, so a relative output root would make every entry point inside
/// the temp directory itself.
fn concat_manifest(clip_paths: &[PathBuf]) -> std::io::Result<String> {
    let cwd = std::env::current_dir()?;
    let mut manifest = String::new();
    for path in clip_paths {
        let absolute = if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        };
        manifest.push_str(&format!(
            "file '{}'\n",
            absolute.display().to_string().replace('\\', "/")
        ));
    }
    Ok(manifest)
}

fn concat_args(list_path: &Path, output_path: &Path) -> Vec<String> {
    vec![
        "-y".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list_path.display().to_string(),
        "-c".into(),
        "copy".into(),
        output_path.display().to_string(),
    ]
}
