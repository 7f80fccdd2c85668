//! Per-call analysis configuration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::working::reserve_exact;
use crate::error::{PercolationError, Result};

/// One of the six face-neighbor moves in scan-ordered coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// p - 1, dropped below the entry face.
    ScanBack,
    /// p + 1, dropped beyond the exit face.
    ScanForward,
    /// q - 1, periodic.
    RowBack,
    /// q + 1, periodic.
    RowForward,
    /// r - 1, periodic.
    ColumnBack,
    /// r + 1, periodic.
    ColumnForward,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::ScanBack,
        Step::ScanForward,
        Step::RowBack,
        Step::RowForward,
        Step::ColumnBack,
        Step::ColumnForward,
    ];
}

/// Reject neighbor orders that repeat (and therefore omit) a step.
pub(crate) fn validate_neighbor_order(order: &[Step; 6]) -> Result<()> {
    for (i, step) in order.iter().enumerate() {
        if order[..i].contains(step) {
            return Err(PercolationError::NeighborOrder);
        }
    }
    Ok(())
}

/// Order in which entry-face voxels are tried as cluster seeds.
///
/// Entry-face voxel `(q, r)` has plane index `q * D2 + r`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedOrder {
    #[default]
    RowMajor,
    ColumnMajor,
    Reversed,
    /// Explicit permutation of `0..D1 * D2`.
    Custom(Vec<usize>),
}

impl SeedOrder {
    /// Plane indices of the entry face in visiting order.
    pub(crate) fn resolve(&self, rows: usize, columns: usize) -> Result<Vec<usize>> {
        let face = rows * columns;
        let mut seeds = Vec::new();
        reserve_exact(&mut seeds, face, "seed order")?;

        match self {
            SeedOrder::RowMajor => seeds.extend(0..face),
            SeedOrder::ColumnMajor => {
                for r in 0..columns {
                    seeds.extend((0..rows).map(|q| q * columns + r));
                }
            }
            SeedOrder::Reversed => seeds.extend((0..face).rev()),
            SeedOrder::Custom(order) => {
                if order.len() != face {
                    return Err(PercolationError::SeedOrder { face });
                }
                // Sorted in place: a permutation sorts to 0..face
                seeds.extend_from_slice(order);
                seeds.sort_unstable();
                if seeds.iter().enumerate().any(|(i, &idx)| i != idx) {
                    return Err(PercolationError::SeedOrder { face });
                }
                seeds.clear();
                seeds.extend_from_slice(order);
            }
        }

        Ok(seeds)
    }
}

/// Shared flag that aborts an analysis at the next front expansion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Knobs for a single connectivity analysis. The defaults reproduce the
/// plain row-major burn with no cancellation.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    pub seed_order: SeedOrder,
    pub neighbor_order: [Step; 6],
    pub cancel: Option<CancelToken>,
    /// Initial reservation for each burn front. `None` uses
    /// five times the product of the two largest grid extents.
    pub initial_front_capacity: Option<usize>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            seed_order: SeedOrder::RowMajor,
            neighbor_order: Step::ALL,
            cancel: None,
            initial_front_capacity: None,
        }
    }
}

impl AnalysisOptions {
    pub fn with_seed_order(mut self, order: SeedOrder) -> Self {
        self.seed_order = order;
        self
    }

    pub fn with_neighbor_order(mut self, order: [Step; 6]) -> Self {
        self.neighbor_order = order;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_front_capacity(mut self, capacity: usize) -> Self {
        self.initial_front_capacity = Some(capacity);
        self
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_and_reversed() {
        assert_eq!(SeedOrder::RowMajor.resolve(2, 3).unwrap(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(SeedOrder::Reversed.resolve(2, 3).unwrap(), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_column_major() {
        assert_eq!(
            SeedOrder::ColumnMajor.resolve(2, 3).unwrap(),
            vec![0, 3, 1, 4, 2, 5]
        );
    }

    #[test]
    fn test_custom_must_be_permutation() {
        let ok = SeedOrder::Custom(vec![3, 1, 0, 2]);
        assert_eq!(ok.resolve(2, 2).unwrap(), vec![3, 1, 0, 2]);

        let short = SeedOrder::Custom(vec![0, 1, 2]);
        assert_eq!(short.resolve(2, 2), Err(PercolationError::SeedOrder { face: 4 }));

        let repeated = SeedOrder::Custom(vec![0, 1, 1, 2]);
        assert_eq!(repeated.resolve(2, 2), Err(PercolationError::SeedOrder { face: 4 }));

        let out_of_range = SeedOrder::Custom(vec![0, 1, 2, 4]);
        assert_eq!(
            out_of_range.resolve(2, 2),
            Err(PercolationError::SeedOrder { face: 4 })
        );
    }

    #[test]
    fn test_custom_order_checked_inside_seed_reservation() {
        let _refuse = crate::percolation::working::RefuseReservation::named("seed order");
        let order = SeedOrder::Custom(vec![1, 0, 3, 2]);
        assert_eq!(
            order.resolve(2, 2),
            Err(PercolationError::Allocation {
                what: "seed order",
                voxels: 4
            })
        );
    }

    #[test]
    fn test_neighbor_order_validation() {
        assert!(validate_neighbor_order(&Step::ALL).is_ok());

        let mut reversed = Step::ALL;
        reversed.reverse();
        assert!(validate_neighbor_order(&reversed).is_ok());

        let mut repeated = Step::ALL;
        repeated[5] = Step::ScanBack;
        assert_eq!(
            validate_neighbor_order(&repeated),
            Err(PercolationError::NeighborOrder)
        );
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let options = AnalysisOptions::default().with_cancel(token.clone());
        assert!(!options.is_cancelled());

        token.cancel();
        assert!(options.is_cancelled());
        assert!(!AnalysisOptions::default().is_cancelled());
    }
}
