//! Region extraction and import for microstructure loaders.

use super::grid::{PhaseId, VoxelGrid};

/// Clamped half-open box `[min, max)`, or `None` if it is empty.
fn clamp_box(grid: &VoxelGrid, min: [usize; 3], max: [usize; 3]) -> Option<([usize; 3], [usize; 3])> {
    let dims = grid.dimensions();
    let mut lo = [0; 3];
    let mut hi = [0; 3];
    for i in 0..3 {
        lo[i] = min[i].min(dims[i]);
        hi[i] = max[i].min(dims[i]);
        if lo[i] >= hi[i] {
            return None;
        }
    }
    Some((lo, hi))
}

/// Copy a box of phase ids out of the grid.
///
/// # Layout
/// The buffer is filled in z,y,x order (z changes slowest, x changes fastest),
/// the same order `import_region` reads.
///
/// # Returns
/// Number of voxels written, or 0 if the clamped box is empty or the buffer
/// is too small.
pub fn extract_region(grid: &VoxelGrid, out_buf: &mut [PhaseId], min: [usize; 3], max: [usize; 3]) -> usize {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return 0;
    };

    let total_size = (hi[0] - lo[0]) * (hi[1] - lo[1]) * (hi[2] - lo[2]);
    if out_buf.len() < total_size {
        return 0;
    }

    let cells = grid.cells();
    let mut offset = 0;
    for z in lo[2]..hi[2] {
        for y in lo[1]..hi[1] {
            let row = grid.index_of(lo[0], y, z);
            let width = hi[0] - lo[0];
            out_buf[offset..offset + width].copy_from_slice(&cells[row..row + width]);
            offset += width;
        }
    }

    offset
}

/// Write a box of phase ids into the grid. Values are stored as given.
///
/// # Layout
/// The buffer is read in z,y,x order (matching `extract_region`).
///
/// # Returns
/// Number of voxels read, or 0 if the clamped box is empty or the buffer
/// holds too few voxels.
pub fn import_region(grid: &mut VoxelGrid, in_buf: &[PhaseId], min: [usize; 3], max: [usize; 3]) -> usize {
    let Some((lo, hi)) = clamp_box(grid, min, max) else {
        return 0;
    };

    let total_size = (hi[0] - lo[0]) * (hi[1] - lo[1]) * (hi[2] - lo[2]);
    if in_buf.len() < total_size {
        return 0;
    }

    let width = hi[0] - lo[0];
    let mut offset = 0;
    for z in lo[2]..hi[2] {
        for y in lo[1]..hi[1] {
            let row = grid.index_of(lo[0], y, z);
            grid.cells_mut()[row..row + width].copy_from_slice(&in_buf[offset..offset + width]);
            offset += width;
        }
    }

    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_region_basic() {
        let mut grid = VoxelGrid::filled(8, 8, 8, 0).unwrap();
        grid.set(2, 2, 2, 14);
        grid.set(3, 2, 2, 13);
        grid.set(2, 3, 2, 1);

        let mut buffer = vec![0u8; 64];
        let written = extract_region(&grid, &mut buffer, [2, 2, 2], [6, 6, 6]);

        assert_eq!(written, 64);
        assert_eq!(buffer[0], 14); // (2,2,2)
        assert_eq!(buffer[1], 13); // (3,2,2)
        assert_eq!(buffer[4], 1); // (2,3,2)
    }

    #[test]
    fn test_extract_region_clamped() {
        let grid = VoxelGrid::filled(4, 4, 4, 5).unwrap();

        let mut buffer = vec![0u8; 512];
        let written = extract_region(&grid, &mut buffer, [0, 0, 0], [10, 10, 10]);

        assert_eq!(written, 64);
        assert!(buffer[..64].iter().all(|&c| c == 5));
    }

    #[test]
    fn test_extract_region_rejects_small_buffer() {
        let grid = VoxelGrid::filled(4, 4, 4, 5).unwrap();
        let mut buffer = vec![0u8; 63];
        assert_eq!(extract_region(&grid, &mut buffer, [0, 0, 0], [4, 4, 4]), 0);
    }

    #[test]
    fn test_empty_region() {
        let mut grid = VoxelGrid::filled(4, 4, 4, 0).unwrap();
        let mut buffer = vec![0u8; 8];
        assert_eq!(extract_region(&grid, &mut buffer, [2, 0, 0], [2, 4, 4]), 0);
        assert_eq!(import_region(&mut grid, &buffer, [3, 3, 3], [1, 4, 4]), 0);
    }

    #[test]
    fn test_import_region_keeps_phase_ids() {
        let mut grid = VoxelGrid::filled(4, 4, 4, 0).unwrap();

        let mut buffer = vec![0u8; 64];
        buffer[1] = 5;
        buffer[2] = 255;
        buffer[4] = 13;

        let read = import_region(&mut grid, &buffer, [0, 0, 0], [4, 4, 4]);

        assert_eq!(read, 64);
        assert_eq!(grid.get(0, 0, 0), Some(0));
        assert_eq!(grid.get(1, 0, 0), Some(5));
        assert_eq!(grid.get(2, 0, 0), Some(255));
        assert_eq!(grid.get(0, 1, 0), Some(13));
    }

    #[test]
    fn test_import_slab_by_slab() {
        // Loaders commonly deliver one z slab at a time
        let mut grid = VoxelGrid::filled(3, 2, 4, 0).unwrap();
        for z in 0..4 {
            let slab = vec![z as u8 + 1; 6];
            assert_eq!(import_region(&mut grid, &slab, [0, 0, z], [3, 2, z + 1]), 6);
        }
        assert_eq!(grid.get(2, 1, 0), Some(1));
        assert_eq!(grid.get(0, 0, 3), Some(4));

        let mut out = vec![0u8; 24];
        assert_eq!(extract_region(&grid, &mut out, [0, 0, 0], [3, 2, 4]), 24);
        assert_eq!(&out[..], grid.cells());
    }
}
