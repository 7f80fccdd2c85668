//! Per-axis percolation result and the cluster tally that builds it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::axis::Axis;

/// Outcome of one connectivity analysis along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercolationResult {
    pub axis: Axis,
    /// Voxels burnt while flooding from the entry face.
    pub accessible_from_entry: u64,
    /// Voxels in clusters touching both the entry and exit faces.
    pub spanning: u64,
    /// Target-phase voxels anywhere in the grid, reached or not.
    pub phase_voxels: u64,
    /// `spanning / phase_voxels`, or 0 for a grid without the phase.
    pub connected_fraction: f64,
    pub spans: bool,
    /// Clusters seeded from the entry face.
    pub entry_clusters: u64,
    pub spanning_clusters: u64,
}

impl PercolationResult {
    /// Fraction of the phase reachable from the entry face, spanning or not.
    pub fn accessible_fraction(&self) -> f64 {
        if self.phase_voxels == 0 {
            0.0
        } else {
            self.accessible_from_entry as f64 / self.phase_voxels as f64
        }
    }
}

impl fmt::Display for PercolationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} voxels connected ({:.4}), {} accessible, {}/{} clusters span",
            self.axis,
            self.spanning,
            self.phase_voxels,
            self.connected_fraction,
            self.accessible_from_entry,
            self.spanning_clusters,
            self.entry_clusters,
        )
    }
}

/// Accumulates cluster outcomes during one burn.
#[derive(Debug, Clone)]
pub(crate) struct ClusterTally {
    axis: Axis,
    accessible: u64,
    spanning: u64,
    clusters: u64,
    spanning_clusters: u64,
}

impl ClusterTally {
    pub(crate) fn new(axis: Axis) -> Self {
        ClusterTally {
            axis,
            accessible: 0,
            spanning: 0,
            clusters: 0,
            spanning_clusters: 0,
        }
    }

    pub(crate) fn record(&mut self, voxels: u64, spans: bool) {
        self.clusters += 1;
        self.accessible += voxels;
        if spans {
            self.spanning += voxels;
            self.spanning_clusters += 1;
        }
    }

    pub(crate) fn finish(self, phase_voxels: u64) -> PercolationResult {
        let connected_fraction = if phase_voxels == 0 {
            0.0
        } else {
            self.spanning as f64 / phase_voxels as f64
        };
        PercolationResult {
            axis: self.axis,
            accessible_from_entry: self.accessible,
            spanning: self.spanning,
            phase_voxels,
            connected_fraction,
            spans: self.spanning > 0,
            entry_clusters: self.clusters,
            spanning_clusters: self.spanning_clusters,
        }
    }
}
