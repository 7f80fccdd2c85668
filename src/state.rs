//! Host-side handle state behind the C ABI.

use crate::error::Result;
use crate::percolation::{PercolationTimeline, Survey, SurveyConfig, VoxelGrid};

/// A microstructure loaded by the host, plus the percolation history
/// recorded against it.
#[derive(Debug, Default)]
pub struct Microstructure {
    pub grid: Option<VoxelGrid>,
    pub timeline: PercolationTimeline,
    pub surveys: SurveyCache,
}

/// The survey pool of the last requested thread count, kept between
/// hydration cycles.
#[derive(Debug, Default)]
pub struct SurveyCache {
    survey: Option<Survey>,
    builds: u64,
}

impl SurveyCache {
    /// Survey running on `threads` workers (0 = 1), rebuilt only when the
    /// thread count changes.
    pub fn get(&mut self, threads: usize) -> Result<&Survey> {
        let threads = threads.max(1);
        let survey = match self.survey.take() {
            Some(survey) if survey.threads() == threads => survey,
            _ => {
                let survey = Survey::new(SurveyConfig {
                    threads,
                    ..SurveyConfig::default()
                })?;
                self.builds += 1;
                log::debug!("survey pool #{} built with {} threads", self.builds, threads);
                survey
            }
        };
        Ok(self.survey.insert(survey))
    }

    /// Thread count of the cached pool, if any.
    pub fn threads(&self) -> Option<usize> {
        self.survey.as_ref().map(Survey::threads)
    }

    /// Pools built over the cache's lifetime.
    pub fn builds(&self) -> u64 {
        self.builds
    }
}

impl Microstructure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the grid. The timeline is kept: hosts reload the evolving
    /// microstructure between hydration cycles.
    pub fn load(&mut self, grid: VoxelGrid) {
        if let Some(old) = &self.grid {
            if old.dimensions() != grid.dimensions() {
                log::warn!(
                    "microstructure resized from {:?} to {:?}",
                    old.dimensions(),
                    grid.dimensions()
                );
            }
        }
        self.grid = Some(grid);
    }
}
