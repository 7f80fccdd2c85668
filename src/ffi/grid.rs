//! Grid creation and voxel access.

use super::{coord, status_of, PC_ERR_NULL, PC_OK};
use crate::percolation::VoxelGrid;
use crate::state::Microstructure;

/// Creates a grid with the specified dimensions, every voxel set to `fill`.
/// Any existing grid on the handle is replaced.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// `PC_OK`, `PC_ERR_NULL`, `PC_ERR_INVALID` for non-positive extents, or
/// `PC_ERR_ALLOC`.
#[no_mangle]
pub unsafe extern "C" fn pc_create_grid(
    ptr: *mut Microstructure,
    width: i16,
    height: i16,
    depth: i16,
    fill: u8,
) -> i32 {
    if ptr.is_null() {
        return PC_ERR_NULL;
    }

    // Negative extents become 0 and are rejected as invalid dimensions
    let dims = [width, height, depth].map(|d| coord(d).unwrap_or(0));
    match VoxelGrid::filled(dims[0], dims[1], dims[2], fill) {
        Ok(grid) => {
            (*ptr).load(grid);
            PC_OK
        }
        Err(e) => status_of(&e),
    }
}

/// Sets one voxel's phase.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// Out-of-bounds coordinates and handles without a grid are silently ignored.
#[no_mangle]
pub unsafe extern "C" fn pc_set_voxel(ptr: *mut Microstructure, x: i16, y: i16, z: i16, phase: u8) {
    if ptr.is_null() {
        return;
    }

    let Some(grid) = (*ptr).grid.as_mut() else {
        return;
    };
    if let (Some(x), Some(y), Some(z)) = (coord(x), coord(y), coord(z)) {
        grid.set(x, y, z, phase);
    }
}

/// Gets one voxel's phase.
///
/// # Safety
/// - `ptr` must be a valid handle, or null
///
/// # Returns
/// The phase id (0..=255), or -1 for a null handle, a missing grid, or
/// out-of-bounds coordinates.
#[no_mangle]
pub unsafe extern "C" fn pc_get_voxel(ptr: *const Microstructure, x: i16, y: i16, z: i16) -> i32 {
    if ptr.is_null() {
        return -1;
    }

    let Some(grid) = (*ptr).grid.as_ref() else {
        return -1;
    };
    match (coord(x), coord(y), coord(z)) {
        (Some(x), Some(y), Some(z)) => grid.get(x, y, z).map_or(-1, i32::from),
        _ => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::{lifecycle, PC_ERR_INVALID};
    use std::ptr;

    #[test]
    fn test_create_grid() {
        unsafe {
            let handle = lifecycle::pc_create();
            assert_eq!(pc_create_grid(handle, 8, 8, 8, 3), PC_OK);

            for z in 0i16..8 {
                for y in 0i16..8 {
                    for x in 0i16..8 {
                        assert_eq!(pc_get_voxel(handle, x, y, z), 3);
                    }
                }
            }

            lifecycle::pc_destroy(handle);
        }
    }

    #[test]
    fn test_create_grid_rejects_bad_extents() {
        unsafe {
            let handle = lifecycle::pc_create();
            assert_eq!(pc_create_grid(handle, 0, 8, 8, 0), PC_ERR_INVALID);
            assert_eq!(pc_create_grid(handle, 8, -2, 8, 0), PC_ERR_INVALID);
            assert!((*handle).grid.is_none());
            lifecycle::pc_destroy(handle);
        }
    }

    #[test]
    fn test_set_and_get_voxel() {
        unsafe {
            let handle = lifecycle::pc_create();
            pc_create_grid(handle, 8, 8, 8, 0);

            pc_set_voxel(handle, 1, 2, 3, 14);
            assert_eq!(pc_get_voxel(handle, 1, 2, 3), 14);

            pc_set_voxel(handle, 1, 2, 3, 0);
            assert_eq!(pc_get_voxel(handle, 1, 2, 3), 0);

            lifecycle::pc_destroy(handle);
        }
    }

    #[test]
    fn test_out_of_bounds_access() {
        unsafe {
            let handle = lifecycle::pc_create();
            pc_create_grid(handle, 4, 4, 4, 0);

            assert_eq!(pc_get_voxel(handle, -1, 0, 0), -1);
            assert_eq!(pc_get_voxel(handle, 4, 0, 0), -1);

            // Should not crash
            pc_set_voxel(handle, -1, 0, 0, 1);
            pc_set_voxel(handle, 4, 0, 0, 1);

            lifecycle::pc_destroy(handle);
        }
    }

    #[test]
    fn test_no_grid_and_null_handling() {
        unsafe {
            let handle = lifecycle::pc_create();
            assert_eq!(pc_get_voxel(handle, 0, 0, 0), -1);
            pc_set_voxel(handle, 0, 0, 0, 1); // Should not crash
            lifecycle::pc_destroy(handle);

            assert_eq!(pc_create_grid(ptr::null_mut(), 8, 8, 8, 0), PC_ERR_NULL);
            pc_set_voxel(ptr::null_mut(), 0, 0, 0, 1);
            assert_eq!(pc_get_voxel(ptr::null(), 0, 0, 0), -1);
        }
    }
}
