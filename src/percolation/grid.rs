//! Voxel grid storage and cell access helpers.

use super::phase::PhaseSelector;
use crate::error::{PercolationError, Result};

/// Discrete label of the material phase occupying a voxel.
pub type PhaseId = u8;

/// A 3D microstructure of phase identifiers.
///
/// Cells are stored in z,y,x order (z changes slowest, x changes fastest).
/// The analyzer only ever borrows a grid; loaders own and fill it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<PhaseId>,
}

/// Voxel count of a grid, rejecting empty extents and overflow.
pub(crate) fn checked_volume(dims: [usize; 3]) -> Result<usize> {
    if dims.iter().any(|&d| d == 0) {
        return Err(PercolationError::InvalidDimensions(dims));
    }
    dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]))
        .ok_or(PercolationError::InvalidDimensions(dims))
}

impl VoxelGrid {
    /// Create a grid with every voxel set to `phase`.
    pub fn filled(width: usize, height: usize, depth: usize, phase: PhaseId) -> Result<Self> {
        let size = checked_volume([width, height, depth])?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(size)
            .map_err(|_| PercolationError::Allocation {
                what: "voxel grid",
                voxels: size,
            })?;
        cells.resize(size, phase);
        Ok(VoxelGrid {
            width,
            height,
            depth,
            cells,
        })
    }

    /// Wrap fully populated voxel data. `cells` must be in z,y,x order.
    pub fn from_cells(width: usize, height: usize, depth: usize, cells: Vec<PhaseId>) -> Result<Self> {
        let expected = checked_volume([width, height, depth])?;
        if cells.len() != expected {
            return Err(PercolationError::DataLength {
                expected,
                actual: cells.len(),
            });
        }
        Ok(VoxelGrid {
            width,
            height,
            depth,
            cells,
        })
    }

    /// Extents as `[nx, ny, nz]`.
    #[inline]
    pub fn dimensions(&self) -> [usize; 3] {
        [self.width, self.height, self.depth]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// A constructed grid is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw cells in z,y,x order.
    #[inline]
    pub fn cells(&self) -> &[PhaseId] {
        &self.cells
    }

    /// Calculate the linear index for a 3D coordinate.
    #[inline]
    pub fn index_of(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.height * self.width + y * self.width + x
    }

    /// Check if coordinates are within grid bounds.
    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Phase at `(x, y, z)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<PhaseId> {
        if self.in_bounds(x, y, z) {
            Some(self.cells[self.index_of(x, y, z)])
        } else {
            None
        }
    }

    /// Set a voxel. Out-of-bounds coordinates are ignored and return false.
    pub fn set(&mut self, x: usize, y: usize, z: usize, phase: PhaseId) -> bool {
        if !self.in_bounds(x, y, z) {
            return false;
        }
        let idx = self.index_of(x, y, z);
        self.cells[idx] = phase;
        true
    }

    /// Number of voxels holding either phase of `selector`.
    pub fn count_phase(&self, selector: PhaseSelector) -> usize {
        self.cells.iter().filter(|&&c| selector.matches(c)).count()
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [PhaseId] {
        &mut self.cells
    }
}
