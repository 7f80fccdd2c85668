//! Caller-side aggregation: all three axes at once, and percolation over
//! hydration time.
//!
//! Each axis analysis owns its own working copy, so the three run in parallel
//! on a rayon pool without sharing mutable state. Per-axis tables are built
//! here by merging returned results; the analyzer never writes to them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::axis::Axis;
use super::burn::analyze_connectivity_with;
use super::grid::VoxelGrid;
use super::options::AnalysisOptions;
use super::phase::PhaseSelector;
use super::result::PercolationResult;
use crate::error::{PercolationError, Result};
use crate::util::SurveyTimer;

/// Survey configuration.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// Worker threads for the axis pool. 0 is treated as 1.
    pub threads: usize,
    pub options: AnalysisOptions,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        SurveyConfig {
            threads: 3,
            options: AnalysisOptions::default(),
        }
    }
}

/// Results for the three axes of one grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisReport {
    pub x: PercolationResult,
    pub y: PercolationResult,
    pub z: PercolationResult,
}

impl AxisReport {
    pub fn get(&self, axis: Axis) -> &PercolationResult {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PercolationResult> {
        [&self.x, &self.y, &self.z].into_iter()
    }

    pub fn percolates_any(&self) -> bool {
        self.iter().any(|r| r.spans)
    }

    pub fn percolates_all(&self) -> bool {
        self.iter().all(|r| r.spans)
    }

    pub fn mean_connected_fraction(&self) -> f64 {
        self.iter().map(|r| r.connected_fraction).sum::<f64>() / 3.0
    }
}

/// Runs per-axis analyses on a dedicated thread pool.
#[derive(Debug)]
pub struct Survey {
    pool: rayon::ThreadPool,
    options: AnalysisOptions,
}

impl Survey {
    pub fn new(config: SurveyConfig) -> Result<Self> {
        let threads = config.threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| PercolationError::ThreadPool(e.to_string()))?;

        Ok(Survey {
            pool,
            options: config.options,
        })
    }

    /// Worker threads in the pool.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze `selector` along X, Y and Z. The first failing axis is returned
    /// as the error; the other results are discarded.
    pub fn analyze(&self, grid: &VoxelGrid, selector: PhaseSelector) -> Result<AxisReport> {
        let _t = SurveyTimer::start(selector, Axis::ALL.len());
        let options = &self.options;

        let results = self.pool.install(|| {
            Axis::ALL
                .as_slice()
                .par_iter()
                .map(|&axis| analyze_connectivity_with(grid, selector, axis, options))
                .collect::<Result<Vec<_>>>()
        })?;

        for result in &results {
            log::debug!("{}", result);
        }

        Ok(AxisReport {
            x: results[0],
            y: results[1],
            z: results[2],
        })
    }
}

/// A survey taken at one hydration cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub cycle: u64,
    pub report: AxisReport,
}

/// Percolation history of one phase selection over simulated time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PercolationTimeline {
    entries: Vec<TimelineEntry>,
}

impl PercolationTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a report. Cycles are expected in increasing order; an
    /// out-of-order cycle is kept but logged.
    pub fn record(&mut self, cycle: u64, report: AxisReport) {
        if let Some(last) = self.entries.last() {
            if cycle <= last.cycle {
                log::warn!(
                    "percolation timeline: cycle {} recorded after cycle {}",
                    cycle,
                    last.cycle
                );
            }
            if last.report.percolates_any() != report.percolates_any() {
                if report.percolates_any() {
                    log::info!("cycle {}: phase percolates", cycle);
                } else {
                    log::info!("cycle {}: phase depercolated", cycle);
                }
            }
        }
        self.entries.push(TimelineEntry { cycle, report });
    }

    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&TimelineEntry> {
        self.entries.last()
    }

    /// First recorded cycle at which the phase spans along `axis`.
    pub fn first_percolation(&self, axis: Axis) -> Option<u64> {
        self.entries
            .iter()
            .find(|e| e.report.get(axis).spans)
            .map(|e| e.cycle)
    }

    /// First recorded cycle at which a previously percolating phase spans
    /// along no axis.
    pub fn depercolation_cycle(&self) -> Option<u64> {
        let start = self.entries.iter().position(|e| e.report.percolates_any())?;
        self.entries[start..]
            .iter()
            .find(|e| !e.report.percolates_any())
            .map(|e| e.cycle)
    }
}
