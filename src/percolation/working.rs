//! Scan-ordered working copy of a grid and the burn-front buffers.
//!
//! Both are acquired fallibly and owned by a single analysis call; dropping
//! them on any return path releases everything.

use super::axis::AxisTransform;
use super::grid::{PhaseId, VoxelGrid};
use super::options::Step;
use super::phase::PhaseSelector;
use crate::error::{PercolationError, Result};

/// Working-copy cell. Burn markers are separate variants, so they can never
/// be mistaken for a phase id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Cell {
    Phase(PhaseId),
    Burnt,
    /// Burnt end-face voxel whose cluster has already been scored.
    BurntConfirmed,
}

impl Cell {
    #[inline]
    pub(crate) fn is_fuel(self, selector: PhaseSelector) -> bool {
        matches!(self, Cell::Phase(id) if selector.matches(id))
    }

    #[inline]
    pub(crate) fn is_burnt(self) -> bool {
        matches!(self, Cell::Burnt | Cell::BurntConfirmed)
    }
}

/// Coordinate in scan order: `p` along the scan axis, `q` and `r` periodic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Voxel {
    pub p: usize,
    pub q: usize,
    pub r: usize,
}

/// Mutable copy of a grid laid out as `[D0][D1][D2]`, r fastest.
pub(crate) struct WorkingGrid {
    dims: [usize; 3],
    cells: Vec<Cell>,
}

impl WorkingGrid {
    /// Copy `grid` into scan order. The source grid is never touched again.
    pub(crate) fn build(grid: &VoxelGrid, transform: &AxisTransform) -> Result<Self> {
        let mut cells = Vec::new();
        reserve_exact(&mut cells, grid.len(), "working grid")?;

        let dims = transform.permuted_dims();
        let source = grid.cells();
        for p in 0..dims[0] {
            for q in 0..dims[1] {
                for r in 0..dims[2] {
                    let [x, y, z] = transform.to_original([p, q, r]);
                    cells.push(Cell::Phase(source[grid.index_of(x, y, z)]));
                }
            }
        }

        Ok(WorkingGrid { dims, cells })
    }

    /// Index of the last plane along the scan axis.
    #[inline]
    pub(crate) fn exit_plane(&self) -> usize {
        self.dims[0] - 1
    }

    #[inline]
    fn index(&self, v: Voxel) -> usize {
        (v.p * self.dims[1] + v.q) * self.dims[2] + v.r
    }

    #[inline]
    pub(crate) fn get(&self, v: Voxel) -> Cell {
        self.cells[self.index(v)]
    }

    #[inline]
    pub(crate) fn set(&mut self, v: Voxel, cell: Cell) {
        let idx = self.index(v);
        self.cells[idx] = cell;
    }

    /// Entry-face voxel for plane index `q * D2 + r`.
    #[inline]
    pub(crate) fn entry_voxel(&self, plane_index: usize) -> Voxel {
        Voxel {
            p: 0,
            q: plane_index / self.dims[2],
            r: plane_index % self.dims[2],
        }
    }

    #[inline]
    pub(crate) fn on_end_plane(&self, v: Voxel) -> bool {
        v.p == 0 || v.p == self.exit_plane()
    }

    /// Face neighbor of `v`, wrapping on q and r. Steps off either end of the
    /// scan axis yield `None`.
    #[inline]
    pub(crate) fn neighbor(&self, v: Voxel, step: Step) -> Option<Voxel> {
        let [d0, d1, d2] = self.dims;
        let n = match step {
            Step::ScanBack => Voxel {
                p: v.p.checked_sub(1)?,
                ..v
            },
            Step::ScanForward => {
                if v.p + 1 >= d0 {
                    return None;
                }
                Voxel { p: v.p + 1, ..v }
            }
            Step::RowBack => Voxel {
                q: if v.q == 0 { d1 - 1 } else { v.q - 1 },
                ..v
            },
            Step::RowForward => Voxel {
                q: if v.q + 1 == d1 { 0 } else { v.q + 1 },
                ..v
            },
            Step::ColumnBack => Voxel {
                r: if v.r == 0 { d2 - 1 } else { v.r - 1 },
                ..v
            },
            Step::ColumnForward => Voxel {
                r: if v.r + 1 == d2 { 0 } else { v.r + 1 },
                ..v
            },
        };
        Some(n)
    }

    /// Burnt voxels plus unreached voxels of the target phases.
    pub(crate) fn count_phase_voxels(&self, selector: PhaseSelector) -> u64 {
        self.cells
            .iter()
            .filter(|c| c.is_burnt() || c.is_fuel(selector))
            .count() as u64
    }
}

/// Growable list of voxels burnt at one breadth-first depth.
pub(crate) struct BurnFront {
    voxels: Vec<Voxel>,
}

impl BurnFront {
    pub(crate) fn with_capacity(capacity: usize, what: &'static str) -> Result<Self> {
        let mut voxels = Vec::new();
        reserve_exact(&mut voxels, capacity, what)?;
        Ok(BurnFront { voxels })
    }

    /// Append, growing the buffer fallibly when full.
    #[inline]
    pub(crate) fn push(&mut self, v: Voxel) -> Result<()> {
        if self.voxels.len() == self.voxels.capacity() {
            let extra = self.voxels.len().max(64);
            self.voxels
                .try_reserve(extra)
                .map_err(|_| PercolationError::Allocation {
                    what: "burn front growth",
                    voxels: self.voxels.len() + extra,
                })?;
        }
        self.voxels.push(v);
        Ok(())
    }

    #[inline]
    pub(crate) fn clear(&mut self) {
        self.voxels.clear();
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.voxels.len()
    }

    #[inline]
    pub(crate) fn at(&self, i: usize) -> Voxel {
        self.voxels[i]
    }

}

/// Reserve room for exactly `additional` more items, reporting failure as
/// `Allocation { what, .. }`.
pub(crate) fn reserve_exact<T>(buf: &mut Vec<T>, additional: usize, what: &'static str) -> Result<()> {
    let refused = || PercolationError::Allocation {
        what,
        voxels: additional,
    };
    if reservation_refused(what) {
        return Err(refused());
    }
    buf.try_reserve_exact(additional).map_err(|_| refused())
}

#[cfg(not(test))]
#[inline(always)]
fn reservation_refused(_what: &'static str) -> bool {
    false
}

#[cfg(test)]
thread_local! {
    static REFUSED: std::cell::Cell<Option<&'static str>> = const { std::cell::Cell::new(None) };
}

#[cfg(test)]
fn reservation_refused(what: &'static str) -> bool {
    REFUSED.with(|r| r.get() == Some(what))
}

/// Makes every `reserve_exact` named `what` on this thread fail until dropped.
#[cfg(test)]
pub(crate) struct RefuseReservation;

#[cfg(test)]
impl RefuseReservation {
    pub(crate) fn named(what: &'static str) -> Self {
        REFUSED.with(|r| r.set(Some(what)));
        RefuseReservation
    }
}

#[cfg(test)]
impl Drop for RefuseReservation {
    fn drop(&mut self) {
        REFUSED.with(|r| r.set(None));
    }
}

/// Initial front reservation: five times the product of the two largest
/// extents, never more than the voxel count. This is a sizing heuristic only;
/// fronts grow past it when needed.
pub(crate) fn front_capacity_hint(dims: [usize; 3]) -> usize {
    let mut sorted = dims;
    sorted.sort_unstable();
    let total = dims.iter().product::<usize>();
    sorted[1]
        .saturating_mul(sorted[2])
        .saturating_mul(5)
        .min(total)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::percolation::axis::Axis;

    fn working(grid: &VoxelGrid, axis: Axis) -> WorkingGrid {
        WorkingGrid::build(grid, &AxisTransform::new(axis, grid.dimensions())).unwrap()
    }

    #[test]
    fn test_build_permutes_cells() {
        let mut grid = VoxelGrid::filled(2, 3, 4, 0).unwrap();
        grid.set(1, 2, 3, 9);

        let wx = working(&grid, Axis::X);
        assert_eq!(wx.dims, [2, 3, 4]);
        assert_eq!(wx.get(Voxel { p: 1, q: 2, r: 3 }), Cell::Phase(9));

        let wy = working(&grid, Axis::Y);
        assert_eq!(wy.dims, [3, 2, 4]);
        assert_eq!(wy.get(Voxel { p: 2, q: 1, r: 3 }), Cell::Phase(9));

        let wz = working(&grid, Axis::Z);
        assert_eq!(wz.dims, [4, 2, 3]);
        assert_eq!(wz.get(Voxel { p: 3, q: 1, r: 2 }), Cell::Phase(9));
        assert_eq!(wz.get(Voxel { p: 0, q: 0, r: 0 }), Cell::Phase(0));
    }

    #[test]
    fn test_neighbors_wrap_transverse_only() {
        let grid = VoxelGrid::filled(3, 4, 5, 0).unwrap();
        let w = working(&grid, Axis::X);
        let corner = Voxel { p: 0, q: 0, r: 0 };

        assert_eq!(w.neighbor(corner, Step::ScanBack), None);
        assert_eq!(
            w.neighbor(corner, Step::ScanForward),
            Some(Voxel { p: 1, q: 0, r: 0 })
        );
        assert_eq!(
            w.neighbor(corner, Step::RowBack),
            Some(Voxel { p: 0, q: 3, r: 0 })
        );
        assert_eq!(
            w.neighbor(corner, Step::ColumnBack),
            Some(Voxel { p: 0, q: 0, r: 4 })
        );

        let far = Voxel { p: 2, q: 3, r: 4 };
        assert_eq!(w.neighbor(far, Step::ScanForward), None);
        assert_eq!(
            w.neighbor(far, Step::RowForward),
            Some(Voxel { p: 2, q: 0, r: 4 })
        );
        assert_eq!(
            w.neighbor(far, Step::ColumnForward),
            Some(Voxel { p: 2, q: 3, r: 0 })
        );
    }

    #[test]
    fn test_single_wide_transverse_wraps_to_self() {
        let grid = VoxelGrid::filled(3, 1, 1, 0).unwrap();
        let w = working(&grid, Axis::X);
        let v = Voxel { p: 1, q: 0, r: 0 };
        assert_eq!(w.neighbor(v, Step::RowForward), Some(v));
        assert_eq!(w.neighbor(v, Step::ColumnBack), Some(v));
    }

    #[test]
    fn test_entry_voxel_and_end_planes() {
        let grid = VoxelGrid::filled(4, 3, 5, 0).unwrap();
        let w = working(&grid, Axis::X);
        assert_eq!(w.entry_voxel(7), Voxel { p: 0, q: 1, r: 2 });
        assert!(w.on_end_plane(Voxel { p: 0, q: 1, r: 1 }));
        assert!(w.on_end_plane(Voxel { p: 3, q: 1, r: 1 }));
        assert!(!w.on_end_plane(Voxel { p: 2, q: 1, r: 1 }));
    }

    #[test]
    fn test_cell_tags() {
        let sel = PhaseSelector::pair(1, 2);
        assert!(Cell::Phase(1).is_fuel(sel));
        assert!(Cell::Phase(2).is_fuel(sel));
        assert!(!Cell::Phase(3).is_fuel(sel));
        assert!(!Cell::Burnt.is_fuel(sel));
        assert!(Cell::Burnt.is_burnt());
        assert!(Cell::BurntConfirmed.is_burnt());
        assert!(!Cell::Phase(1).is_burnt());
    }

    #[test]
    fn test_front_grows_past_reservation() {
        let mut front = BurnFront::with_capacity(1, "test front").unwrap();
        for i in 0..500 {
            front.push(Voxel { p: i, q: 0, r: 0 }).unwrap();
        }
        assert_eq!(front.len(), 500);
        assert_eq!(front.at(499).p, 499);
        front.clear();
        assert!(front.is_empty());
    }

    #[test]
    fn test_front_reservation_failure_is_reported() {
        let result = BurnFront::with_capacity(usize::MAX, "current burn front");
        assert!(matches!(
            result,
            Err(PercolationError::Allocation {
                what: "current burn front",
                ..
            })
        ));
    }

    #[test]
    fn test_refused_reservation_is_scoped() {
        let mut buf: Vec<u8> = Vec::new();
        {
            let _refuse = RefuseReservation::named("scratch");
            assert_eq!(
                reserve_exact(&mut buf, 16, "scratch"),
                Err(PercolationError::Allocation {
                    what: "scratch",
                    voxels: 16
                })
            );
            // Other names are unaffected
            assert!(reserve_exact(&mut buf, 16, "other").is_ok());
        }
        assert!(reserve_exact(&mut buf, 16, "scratch").is_ok());
    }

    #[test]
    fn test_front_capacity_hint() {
        assert_eq!(front_capacity_hint([100, 50, 200]), 5 * 100 * 200);
        // Never larger than the grid itself
        assert_eq!(front_capacity_hint([2, 2, 2]), 8);
        assert_eq!(front_capacity_hint([1, 1, 1]), 1);
    }
}
