use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::sequence::pool::{ClipPool, PoolCursors};

/// One entry of an edit list, in playback order
#[derive(Debug, Clone, PartialEq)]
pub enum EditListEntry {
    /// A fixed clip played whole (hook or code)
    Fixed { path: PathBuf },

    /// A trimmed window of a middle source video
    Trimmed {
        source: PathBuf,
        start: f64,
        duration: f64,
    },
}

impl EditListEntry {
    /// Short human-readable form for draw summaries
    pub fn describe(&self) -> String {
        match self {
            Self::Fixed { path } => file_name(path),
            Self::Trimmed { source, start, duration } => {
                format!("{} @{:.2}s +{:.2}s", file_name(source), start, duration)
            }
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// The complete cut plan for one output video
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditList {
    entries: Vec<EditListEntry>,
}

impl EditList {
    pub fn entries(&self) -> &[EditListEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditListEntry> {
        self.entries.iter()
    }
}

/// Generate one edit list per output video
///
/// For each video: the hook (if enabled), then for every middle folder in
/// config order `count` draws from that folder's pool at the cursor position
/// (wrapping via modulo), then the code (if enabled). Cursors are shared
/// across the whole batch and advance by one per draw, so within any pool no
/// segment is reused until every other segment has been used once.
///
/// A `count` larger than the pool size wraps within a single video and
/// produces visible intra-video repeats; that is the intended behavior, not
/// a bug to suppress.
///
/// Empty pools are skipped with a warning and contribute nothing. This stage
/// performs no I/O and cannot fail; `config` is validated upstream.
pub fn generate_edit_lists(
    config: &Config,
    pools: &[ClipPool],
    cursors: &mut PoolCursors,
) -> Vec<EditList> {
    let num_videos = config.global.num_videos;
    info!("Generating {} edit list(s)", num_videos);

    let mut edit_lists = Vec::with_capacity(num_videos as usize);

    for v in 0..num_videos {
        let mut entries = Vec::new();
        let mut summary = Vec::new();

        if config.hook.enabled {
            if let Some(path) = &config.hook.path {
                entries.push(EditListEntry::Fixed { path: path.clone() });
                summary.push(format!("Hook: {}", file_name(path)));
            }
        }

        for (j, middle) in config.middles.iter().enumerate() {
            let pool = &pools[j];
            if pool.is_empty() {
                warn!("Middle #{} pool is empty, skipping", j + 1);
                continue;
            }

            let mut draws = Vec::with_capacity(middle.count as usize);
            for _ in 0..middle.count {
                // In range: the pool is non-empty and the index is taken mod its length
                let index = cursors.advance(j) % pool.len();
                let segment = &pool.segments()[index];

                entries.push(EditListEntry::Trimmed {
                    source: segment.source.clone(),
                    start: segment.start,
                    duration: middle.interval,
                });
                draws.push(format!(
                    "seg{}({} @{:.2}s)",
                    index,
                    file_name(&segment.source),
                    segment.start
                ));
            }

            summary.push(format!(
                "Middle#{}: {} (cursor -> {})",
                j + 1,
                draws.join(", "),
                cursors.position(j)
            ));
        }

        if config.code.enabled {
            if let Some(path) = &config.code.path {
                entries.push(EditListEntry::Fixed { path: path.clone() });
                summary.push(format!("Code: {}", file_name(path)));
            }
        }

        info!("Video #{} plan: {}", v + 1, summary.join(" | "));
        debug!("Video #{} entry count: {}", v + 1, entries.len());
        edit_lists.push(EditList { entries });
    }

    info!("All edit lists generated");
    edit_lists
}
