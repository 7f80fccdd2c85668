//! Burn-front flood fill and spanning classification.
//!
//! Every target-phase voxel on the entry face (p = 0) that is still unburnt
//! seeds a new cluster. The cluster is burnt breadth first over face
//! neighbors, wrapping on q and r but not on p. A cluster spans when it has
//! burnt voxels on both the entry plane and the exit plane (p = D0 - 1).
//!
//! After a cluster is scored its end-plane voxels are promoted to
//! [`Cell::BurntConfirmed`]. Seeds are only ever taken from `Phase` cells, so
//! a later entry voxel of the same cluster is skipped without rescoring.
//!
//! Invariants:
//! - The source grid is never written; all marking happens in the working copy.
//! - Cluster membership and face contact are set properties, so the result is
//!   independent of seed order and neighbor order.
//! - Every buffer is owned by the analyzer and dropped on any return path.

use super::axis::{Axis, AxisTransform};
use super::grid::VoxelGrid;
use super::options::{validate_neighbor_order, AnalysisOptions, Step};
use super::phase::PhaseSelector;
use super::result::{ClusterTally, PercolationResult};
use super::working::{front_capacity_hint, reserve_exact, BurnFront, Cell, Voxel, WorkingGrid};
use crate::error::{PercolationError, Result};

/// Analyze connectivity of `selector` along `axis` with default options.
pub fn analyze_connectivity(
    grid: &VoxelGrid,
    selector: PhaseSelector,
    axis: Axis,
) -> Result<PercolationResult> {
    analyze_connectivity_with(grid, selector, axis, &AnalysisOptions::default())
}

/// Analyze connectivity of `selector` along `axis`.
///
/// # Errors
/// - `Allocation` if the working copy or a front buffer cannot be acquired
/// - `SeedOrder` / `NeighborOrder` for invalid custom orders
/// - `Cancelled` if the options' token is set during the burn
pub fn analyze_connectivity_with(
    grid: &VoxelGrid,
    selector: PhaseSelector,
    axis: Axis,
    options: &AnalysisOptions,
) -> Result<PercolationResult> {
    BurnFrontAnalyzer::new(grid, selector, axis, options)?.run()
}

/// Size of one burnt cluster and whether it spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ClusterOutcome {
    voxels: u64,
    spans: bool,
}

/// Owns the working copy and the burn fronts for exactly one analysis.
pub struct BurnFrontAnalyzer<'a> {
    work: WorkingGrid,
    current: BurnFront,
    next: BurnFront,
    /// End-plane voxels burnt in the current cluster. Reserved for both end
    /// planes up front, so pushes never reallocate.
    face_hits: Vec<Voxel>,
    seeds: Vec<usize>,
    selector: PhaseSelector,
    steps: [Step; 6],
    options: &'a AnalysisOptions,
    tally: ClusterTally,
}

impl<'a> BurnFrontAnalyzer<'a> {
    /// Validate the options and acquire every buffer up front.
    ///
    /// Acquisition happens in order: seed list, working copy, current front,
    /// next front, face list. A failure at any step drops the ones already
    /// acquired.
    pub fn new(
        grid: &VoxelGrid,
        selector: PhaseSelector,
        axis: Axis,
        options: &'a AnalysisOptions,
    ) -> Result<Self> {
        validate_neighbor_order(&options.neighbor_order)?;

        let transform = AxisTransform::new(axis, grid.dimensions());
        let [_, rows, columns] = transform.permuted_dims();

        let seeds = options.seed_order.resolve(rows, columns)?;
        let work = WorkingGrid::build(grid, &transform)?;

        let capacity = options
            .initial_front_capacity
            .unwrap_or_else(|| front_capacity_hint(grid.dimensions()))
            .clamp(1, grid.len());
        let current = BurnFront::with_capacity(capacity, "current burn front")?;
        let next = BurnFront::with_capacity(capacity, "next burn front")?;
        let mut face_hits = Vec::new();
        let end_planes = rows.saturating_mul(columns).saturating_mul(2).min(grid.len());
        reserve_exact(&mut face_hits, end_planes, "end-plane list")?;

        Ok(BurnFrontAnalyzer {
            work,
            current,
            next,
            face_hits,
            seeds,
            selector,
            steps: options.neighbor_order,
            options,
            tally: ClusterTally::new(axis),
        })
    }

    /// Burn every entry-face cluster, then count the phase over the whole grid.
    pub fn run(mut self) -> Result<PercolationResult> {
        for i in 0..self.seeds.len() {
            let seed = self.work.entry_voxel(self.seeds[i]);
            if !self.work.get(seed).is_fuel(self.selector) {
                continue;
            }
            let cluster = self.burn_cluster(seed)?;
            self.tally.record(cluster.voxels, cluster.spans);
        }

        let phase_voxels = self.work.count_phase_voxels(self.selector);
        Ok(self.tally.finish(phase_voxels))
    }

    fn burn_cluster(&mut self, seed: Voxel) -> Result<ClusterOutcome> {
        self.current.clear();
        self.next.clear();
        self.face_hits.clear();

        self.ignite(seed);
        self.current.push(seed)?;
        let mut voxels = 1u64;

        let steps = self.steps;
        while !self.current.is_empty() {
            if self.options.is_cancelled() {
                return Err(PercolationError::Cancelled);
            }

            for i in 0..self.current.len() {
                let voxel = self.current.at(i);
                for &step in &steps {
                    let Some(neighbor) = self.work.neighbor(voxel, step) else {
                        continue;
                    };
                    if !self.work.get(neighbor).is_fuel(self.selector) {
                        continue;
                    }
                    self.ignite(neighbor);
                    self.next.push(neighbor)?;
                    voxels += 1;
                }
            }

            std::mem::swap(&mut self.current, &mut self.next);
            self.next.clear();
        }

        let exit = self.work.exit_plane();
        let touches_entry = self.face_hits.iter().any(|v| v.p == 0);
        let touches_exit = self.face_hits.iter().any(|v| v.p == exit);

        for &v in &self.face_hits {
            self.work.set(v, Cell::BurntConfirmed);
        }

        Ok(ClusterOutcome {
            voxels,
            spans: touches_entry && touches_exit,
        })
    }

    /// Mark a voxel burnt and remember it if it lies on an end plane.
    #[inline]
    fn ignite(&mut self, v: Voxel) {
        self.work.set(v, Cell::Burnt);
        if self.work.on_end_plane(v) {
            self.face_hits.push(v);
        }
    }
}
