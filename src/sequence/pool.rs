use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::MiddleConfig;
use crate::error::{PoolError, Result};
use crate::media::DurationProbe;

/// Recognized video container extensions (matched case-insensitively)
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "flv", "wmv"];

/// A fixed-length candidate window cut out of one source video
///
/// The window's duration is not stored here: every segment built from the
/// same middle folder shares that folder's configured interval, and the edit
/// list generator re-attaches it at draw time.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSegment {
    /// Source video the window was cut from
    pub source: PathBuf,

    /// Window start offset in seconds
    pub start: f64,
}

/// All candidate segments from one middle folder, in shuffled draw order
///
/// Built once, shuffled once, then read-only. A pool may legitimately be
/// empty (the folder held no sufficiently long videos); it stays in place as
/// a placeholder so pool indices keep lining up with folder configs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipPool {
    segments: Vec<CandidateSegment>,
}

impl ClipPool {
    /// Build a pool from pre-cut segments, in the given draw order
    pub fn from_segments(segments: Vec<CandidateSegment>) -> Self {
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segment at a raw pool index (callers wrap via the cursor)
    pub fn get(&self, index: usize) -> Option<&CandidateSegment> {
        self.segments.get(index)
    }

    /// All segments in draw order
    pub fn segments(&self) -> &[CandidateSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateSegment> {
        self.segments.iter()
    }
}

/// Per-pool draw positions shared across one whole batch of output videos
///
/// One monotonically increasing counter per pool. The counter is never reset
/// between output videos; selection wraps via modulo, which is what spreads
/// reuse evenly: no segment repeats until its whole pool has been drawn once.
/// Scoped to a single batch run and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolCursors {
    positions: Vec<usize>,
}

impl PoolCursors {
    /// One zeroed cursor per pool
    pub fn new(pool_count: usize) -> Self {
        Self { positions: vec![0; pool_count] }
    }

    /// Current draw position for pool `index`
    pub fn position(&self, index: usize) -> usize {
        self.positions[index]
    }

    /// Take the current position for pool `index` and advance it by one
    pub fn advance(&mut self, index: usize) -> usize {
        let position = self.positions[index];
        self.positions[index] += 1;
        position
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Build one shuffled clip pool per middle folder, plus zeroed cursors
///
/// Fatal failures: a configured folder that is not a readable directory, or
/// every folder producing an empty pool. A file that cannot be probed is
/// recoverable and simply contributes nothing.
///
/// The shuffle source is injected so tests can seed it; production passes a
/// freshly seeded [`rand::rngs::SmallRng`].
pub fn build_clip_pools<P, R>(
    configs: &[MiddleConfig],
    probe: &P,
    rng: &mut R,
) -> Result<(Vec<ClipPool>, PoolCursors)>
where
    P: DurationProbe + ?Sized,
    R: Rng + ?Sized,
{
    info!("Building clip pools for {} middle folder(s)", configs.len());
    let mut pools = Vec::with_capacity(configs.len());

    for (i, config) in configs.iter().enumerate() {
        info!("Processing middle folder #{}: {:?}", i + 1, config.path);

        let files = list_video_files(&config.path)?;
        info!("Found {} video file(s) in {:?}", files.len(), config.path);

        let mut segments = Vec::new();
        for file in &files {
            let duration = match probe.probe_duration(file) {
                Ok(duration) => duration,
                Err(e) => {
                    warn!("Skipping unreadable file {:?}: {}", file, e);
                    0.0
                }
            };

            let starts = segment_starts(duration, config.interval);
            if starts.is_empty() {
                debug!("  {:?}: too short ({:.2}s), no segments", file, duration);
            } else {
                debug!("  {:?}: {} segment(s) of {:.2}s", file, starts.len(), config.interval);
            }

            segments.extend(starts.into_iter().map(|start| CandidateSegment {
                source: file.clone(),
                start,
            }));
        }

        if segments.is_empty() {
            warn!(
                "Middle folder {:?} produced no segments; it will contribute nothing",
                config.path
            );
            // Keep the empty pool so indices stay aligned with folder configs
            pools.push(ClipPool::default());
            continue;
        }

        segments.shuffle(rng);
        info!("Middle #{} pool ready: {} segment(s)", i + 1, segments.len());
        pools.push(ClipPool { segments });
    }

    if pools.iter().all(ClipPool::is_empty) {
        return Err(PoolError::NoUsableMaterial.into());
    }

    let cursors = PoolCursors::new(pools.len());
    info!("All clip pools built");
    Ok((pools, cursors))
}

/// List immediate files in `dir` with a recognized video extension
///
/// Subdirectories and non-video files are ignored; no recursion. Entries are
/// sorted by name so pool construction is reproducible for a fixed seed and
/// fixed filesystem contents.
fn list_video_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(PoolError::SourceFolderInvalid { path: dir.display().to_string() }.into());
    }

    let entries = std::fs::read_dir(dir)
        .map_err(|_| PoolError::SourceFolderInvalid { path: dir.display().to_string() })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_video_extension(path))
        .collect();

    files.sort();
    Ok(files)
}

fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Start offsets of the non-overlapping `interval`-length windows in `[0, duration)`
///
/// Exactly `floor(duration / interval)` windows at `0, I, 2I, ...`; any
/// trailing remainder shorter than `interval` is discarded.
fn segment_starts(duration: f64, interval: f64) -> Vec<f64> {
    if duration < interval || interval <= 0.0 {
        return Vec::new();
    }

    let count = (duration / interval).floor() as usize;
    (0..count).map(|k| k as f64 * interval).collect()
}
