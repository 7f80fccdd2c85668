//! Connectivity analysis FFI functions.

use super::{status_of, PC_ERR_INVALID, PC_ERR_NO_GRID, PC_ERR_NULL, PC_OK};
use crate::percolation::{
    analyze_connectivity, Axis, AxisReport, PercolationResult, PhaseSelector,
};
use crate::state::Microstructure;

/// C view of a `PercolationResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PcResult {
    pub accessible_from_entry: u64,
    pub spanning: u64,
    pub phase_voxels: u64,
    pub entry_clusters: u64,
    pub spanning_clusters: u64,
    pub connected_fraction: f64,
    /// 1 if at least one cluster spans, else 0.
    pub spans: u8,
}

impl From<&PercolationResult> for PcResult {
    fn from(r: &PercolationResult) -> Self {
        PcResult {
            accessible_from_entry: r.accessible_from_entry,
            spanning: r.spanning,
            phase_voxels: r.phase_voxels,
            entry_clusters: r.entry_clusters,
            spanning_clusters: r.spanning_clusters,
            connected_fraction: r.connected_fraction,
            spans: r.spans as u8,
        }
    }
}

unsafe fn write_report(report: &AxisReport, out_xyz: *mut PcResult) {
    for (i, result) in report.iter().enumerate() {
        *out_xyz.add(i) = PcResult::from(result);
    }
}

/// Analyzes connectivity of phases `phase_a`/`phase_b` along one axis
/// (0 = x, 1 = y, 2 = z). Pass the same id twice for a single phase.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `out` must point to a writable `PcResult`, or be null
///
/// # Returns
/// `PC_OK` with `out` filled, or a negative status; `out` is untouched on error.
#[no_mangle]
pub unsafe extern "C" fn pc_analyze(
    ptr: *const Microstructure,
    phase_a: u8,
    phase_b: u8,
    axis: u8,
    out: *mut PcResult,
) -> i32 {
    if ptr.is_null() || out.is_null() {
        return PC_ERR_NULL;
    }
    let Some(grid) = (*ptr).grid.as_ref() else {
        return PC_ERR_NO_GRID;
    };
    let Some(axis) = Axis::from_index(axis) else {
        return PC_ERR_INVALID;
    };

    match analyze_connectivity(grid, PhaseSelector::pair(phase_a, phase_b), axis) {
        Ok(result) => {
            *out = PcResult::from(&result);
            PC_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Same as `pc_analyze`, with the axis given as three direction flags of
/// which exactly one must be non-zero.
///
/// # Safety
/// See `pc_analyze`.
#[no_mangle]
pub unsafe extern "C" fn pc_analyze_flags(
    ptr: *const Microstructure,
    phase_a: u8,
    phase_b: u8,
    x: u8,
    y: u8,
    z: u8,
    out: *mut PcResult,
) -> i32 {
    match Axis::from_flags(x != 0, y != 0, z != 0) {
        Ok(axis) => pc_analyze(ptr, phase_a, phase_b, axis.index() as u8, out),
        Err(e) => status_of(&e),
    }
}

/// Analyzes all three axes on `threads` worker threads (0 = 1). The pool is
/// kept on the handle and reused while `threads` stays the same.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `out_xyz` must point to three writable `PcResult`s (x, y, z), or be null
///
/// # Returns
/// `PC_OK` with all three results filled, or a negative status.
#[no_mangle]
pub unsafe extern "C" fn pc_survey(
    ptr: *mut Microstructure,
    phase_a: u8,
    phase_b: u8,
    threads: u8,
    out_xyz: *mut PcResult,
) -> i32 {
    if ptr.is_null() || out_xyz.is_null() {
        return PC_ERR_NULL;
    }
    let handle = &mut *ptr;
    let Some(grid) = handle.grid.as_ref() else {
        return PC_ERR_NO_GRID;
    };
    let survey = match handle.surveys.get(threads as usize) {
        Ok(s) => s,
        Err(e) => return status_of(&e),
    };

    match survey.analyze(grid, PhaseSelector::pair(phase_a, phase_b)) {
        Ok(report) => {
            write_report(&report, out_xyz);
            PC_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Surveys all three axes and appends the report to the handle's timeline
/// under `cycle`.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `out_xyz` may be null; otherwise it must point to three writable `PcResult`s
///
/// # Returns
/// `PC_OK`, or a negative status; nothing is recorded on error.
#[no_mangle]
pub unsafe extern "C" fn pc_record_cycle(
    ptr: *mut Microstructure,
    cycle: u64,
    phase_a: u8,
    phase_b: u8,
    threads: u8,
    out_xyz: *mut PcResult,
) -> i32 {
    if ptr.is_null() {
        return PC_ERR_NULL;
    }
    let handle = &mut *ptr;
    let Some(grid) = handle.grid.as_ref() else {
        return PC_ERR_NO_GRID;
    };
    let survey = match handle.surveys.get(threads as usize) {
        Ok(s) => s,
        Err(e) => return status_of(&e),
    };

    let report = match survey.analyze(grid, PhaseSelector::pair(phase_a, phase_b)) {
        Ok(report) => report,
        Err(e) => {
            log::warn!("cycle {}: percolation survey failed: {}", cycle, e);
            return status_of(&e);
        }
    };

    if !out_xyz.is_null() {
        write_report(&report, out_xyz);
    }
    handle.timeline.record(cycle, report);
    PC_OK
}

/// First recorded cycle at which the phase spans along `axis`.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The cycle, or -1 if it never percolated, the axis is invalid, or ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pc_first_percolation_cycle(ptr: *const Microstructure, axis: u8) -> i64 {
    if ptr.is_null() {
        return -1;
    }
    let Some(axis) = Axis::from_index(axis) else {
        return -1;
    };
    (*ptr)
        .timeline
        .first_percolation(axis)
        .map_or(-1, |c| c as i64)
}

/// First recorded cycle at which a previously percolating phase stopped
/// spanning along every axis.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The cycle, or -1 if it has not depercolated or ptr is null.
#[no_mangle]
pub unsafe extern "C" fn pc_depercolation_cycle(ptr: *const Microstructure) -> i64 {
    if ptr.is_null() {
        return -1;
    }
    (*ptr)
        .timeline
        .depercolation_cycle()
        .map_or(-1, |c| c as i64)
}
