//! C FFI layer for host simulators.
//!
//! This module exports C ABI functions for a hydration simulator that loads
//! its microstructure voxel by voxel or slab by slab and checks percolation
//! periodically. All functions are marked with `#[no_mangle]` and use
//! `extern "C"`.
//!
//! The actual logic is in the `percolation` module. These functions are thin
//! wrappers that handle null checks, pointer safety, and C-to-Rust conversions.

pub mod analyze;
pub mod grid;
pub mod lifecycle;
pub mod region;

use crate::error::PercolationError;

pub use analyze::{
    pc_analyze, pc_analyze_flags, pc_depercolation_cycle, pc_first_percolation_cycle,
    pc_record_cycle, pc_survey, PcResult,
};
pub use grid::{pc_create_grid, pc_get_voxel, pc_set_voxel};
pub use lifecycle::{pc_create, pc_destroy, pc_timeline_len};
pub use region::{pc_extract_region, pc_import_region};

/// Success.
pub const PC_OK: i32 = 0;
/// A required pointer was null.
pub const PC_ERR_NULL: i32 = -1;
/// No grid has been created on the handle.
pub const PC_ERR_NO_GRID: i32 = -2;
/// Invalid dimensions, axis, or order.
pub const PC_ERR_INVALID: i32 = -3;
/// Working copy or burn front could not be allocated.
pub const PC_ERR_ALLOC: i32 = -4;
/// Analysis was cancelled.
pub const PC_ERR_CANCELLED: i32 = -5;
/// Survey thread pool could not be built.
pub const PC_ERR_THREADS: i32 = -6;

/// Map an error to its C status code.
pub fn status_of(err: &PercolationError) -> i32 {
    match err {
        PercolationError::Allocation { .. } => PC_ERR_ALLOC,
        PercolationError::InvalidDimensions(_)
        | PercolationError::DataLength { .. }
        | PercolationError::AxisSelection { .. }
        | PercolationError::SeedOrder { .. }
        | PercolationError::NeighborOrder => PC_ERR_INVALID,
        PercolationError::Cancelled => PC_ERR_CANCELLED,
        PercolationError::ThreadPool(_) => PC_ERR_THREADS,
    }
}

/// Convert a C coordinate; negatives have no voxel.
#[inline]
pub(crate) fn coord(v: i16) -> Option<usize> {
    usize::try_from(v).ok()
}
