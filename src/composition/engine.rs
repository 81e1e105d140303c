use std::path::{Path, PathBuf};

use chrono::Local;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    media::{DurationProbe, FfmpegRenderer, FfprobeProber},
    sequence::{build_clip_pools, generate_edit_lists, EditList},
};

/// Orchestrates one batch run
///
/// The pipeline is strictly sequential:
/// 1. Pool building - window every source video and shuffle each pool once
/// 2. Edit-list generation - cursor-driven draws for all N output videos
/// 3. Rendering - one ffmpeg pass per edit list, in order
///
/// Steps 1 and 2 together form the plan and never touch ffmpeg, so they can
/// run standalone (`--plan-only`, tests with a stubbed prober).
pub struct MixEngine<P = FfprobeProber> {
    config: Config,
    probe: P,
    seed: Option<u64>,
}

impl MixEngine<FfprobeProber> {
    /// Create an engine probing durations via ffprobe
    pub fn new(config: Config) -> Self {
        Self {
            config,
            probe: FfprobeProber::new(),
            seed: None,
        }
    }
}

impl<P: DurationProbe> MixEngine<P> {
    /// Create an engine with a custom duration prober
    pub fn with_probe(config: Config, probe: P) -> Self {
        Self { config, probe, seed: None }
    }

    /// Fix the shuffle seed for a reproducible plan
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the pools and generate every edit list, without rendering
    pub fn plan(&self) -> Result<Vec<EditList>> {
        self.config.validate()?;

        let mut rng = match self.seed {
            Some(seed) => {
                info!("Using fixed shuffle seed {}", seed);
                SmallRng::seed_from_u64(seed)
            }
            None => SmallRng::from_entropy(),
        };

        let (pools, mut cursors) = build_clip_pools(&self.config.middles, &self.probe, &mut rng)?;
        let edit_lists = generate_edit_lists(&self.config, &pools, &mut cursors);
        Ok(edit_lists)
    }

    /// Run the full batch: plan, then render every video under `output_root`
    ///
    /// Returns the dated output directory the videos were written to.
    pub async fn run(&self, output_root: &Path) -> Result<PathBuf> {
        let edit_lists = self.plan()?;

        let output_dir = self.dated_output_dir(output_root);
        tokio::fs::create_dir_all(&output_dir).await?;
        info!("Writing {} video(s) to {:?}", edit_lists.len(), output_dir);

        let renderer = FfmpegRenderer::new(self.config.render.clone());
        let total = edit_lists.len();

        for (i, edit_list) in edit_lists.iter().enumerate() {
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            let filename = format!("mixcut_{}_{:03}.mp4", timestamp, i + 1);
            let output_path = output_dir.join(filename);

            info!("Rendering video {}/{}: {:?}", i + 1, total, output_path);
            renderer.render(edit_list, &output_path).await?;
        }

        info!("Batch complete: {} video(s)", total);
        Ok(output_dir)
    }

    fn dated_output_dir(&self, output_root: &Path) -> PathBuf {
        let date = Local::now().format("%Y-%m-%d");
        output_root.join(format!("{}-total{}", date, self.config.global.num_videos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    use tempfile::tempdir;

    use crate::config::{BookendConfig, GlobalConfig, MiddleConfig, RenderConfig};
    use crate::error::ProbeError;
    use crate::sequence::EditListEntry;

    /// Every file probes to the same fixed duration
    struct FixedDuration(f64);

    impl DurationProbe for FixedDuration {
        fn probe_duration(&self, _path: &Path) -> std::result::Result<f64, ProbeError> {
            Ok(self.0)
        }
    }

    fn engine_config(dir: &Path, num_videos: u32) -> Config {
        Config {
            global: GlobalConfig { num_videos },
            hook: BookendConfig::default(),
            code: BookendConfig {
                enabled: true,
                path: Some(PathBuf::from("code.mp4")),
            },
            middles: vec![MiddleConfig {
                path: dir.to_path_buf(),
                interval: 2.0,
                count: 2,
            }],
            render: RenderConfig::default(),
        }
    }

    #[test]
    fn test_plan_produces_one_list_per_video() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();

        let engine =
            MixEngine::with_probe(engine_config(dir.path(), 4), FixedDuration(10.0));
        let lists = engine.plan().unwrap();

        assert_eq!(lists.len(), 4);
        for list in &lists {
            // 2 middle draws + code entry
            assert_eq!(list.len(), 3);
            assert!(matches!(
                list.entries().last(),
                Some(EditListEntry::Fixed { .. })
            ));
        }
    }

    #[test]
    fn test_seeded_plan_is_reproducible() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("a.mp4")).unwrap();
        File::create(dir.path().join("b.mp4")).unwrap();

        let make_plan = || {
            MixEngine::with_probe(engine_config(dir.path(), 3), FixedDuration(12.0))
                .with_seed(Some(99))
                .plan()
                .unwrap()
        };

        assert_eq!(make_plan(), make_plan());
    }

    #[test]
    fn test_invalid_config_rejected_before_pool_build() {
        let dir = tempdir().unwrap();
        let mut config = engine_config(dir.path(), 0);
        config.global.num_videos = 0;

        let engine = MixEngine::with_probe(config, FixedDuration(10.0));
        assert!(engine.plan().is_err());
    }
}
