//! Region extraction and import FFI functions.

use crate::percolation;
use crate::state::Microstructure;

/// Clamp C box corners to non-negative grid coordinates.
fn corners(min: [i16; 3], max: [i16; 3]) -> ([usize; 3], [usize; 3]) {
    let clamp = |v: i16| v.max(0) as usize;
    (min.map(clamp), max.map(clamp))
}

/// Number of voxels the caller's buffer must hold for this box.
fn box_volume(min: [i16; 3], max: [i16; 3]) -> usize {
    (0..3)
        .map(|i| (max[i] as i32 - min[i] as i32).max(0) as usize)
        .product()
}

/// Extracts a box of phase ids into a flat output buffer.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest).
/// This matches the layout expected by `pc_import_region`.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `out_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y) * (max_z - min_z)` bytes
///
/// # Returns
/// Number of voxels written, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn pc_extract_region(
    ptr: *const Microstructure,
    out_buf: *mut u8,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || out_buf.is_null() {
        return 0;
    }
    let Some(grid) = (*ptr).grid.as_ref() else {
        return 0;
    };

    let (min, max) = ([min_x, min_y, min_z], [max_x, max_y, max_z]);
    let buf_slice = std::slice::from_raw_parts_mut(out_buf, box_volume(min, max));
    let (lo, hi) = corners(min, max);
    percolation::extract_region(grid, buf_slice, lo, hi) as u64
}

/// Imports a box of phase ids from a flat buffer. Values are stored as given.
///
/// # Layout
/// The buffer is expected in z,y,x order (matching `pc_extract_region`).
///
/// # Safety
/// - `ptr` must be a valid handle, or null
/// - `in_buf` must point to a buffer with at least
///   `(max_x - min_x) * (max_y - min_y) * (max_z - min_z)` bytes
///
/// # Returns
/// Number of voxels read, or 0 on error.
#[no_mangle]
pub unsafe extern "C" fn pc_import_region(
    ptr: *mut Microstructure,
    in_buf: *const u8,
    min_x: i16,
    min_y: i16,
    min_z: i16,
    max_x: i16,
    max_y: i16,
    max_z: i16,
) -> u64 {
    if ptr.is_null() || in_buf.is_null() {
        return 0;
    }
    let Some(grid) = (*ptr).grid.as_mut() else {
        return 0;
    };

    let (min, max) = ([min_x, min_y, min_z], [max_x, max_y, max_z]);
    let buf_slice = std::slice::from_raw_parts(in_buf, box_volume(min, max));
    let (lo, hi) = corners(min, max);
    percolation::import_region(grid, buf_slice, lo, hi) as u64
}
