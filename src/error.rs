//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors from percolation analysis and grid construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PercolationError {
    /// The working copy or a burn-front buffer could not be acquired.
    #[error("could not allocate {what} for {voxels} voxels")]
    Allocation { what: &'static str, voxels: usize },

    /// A grid extent is zero, or the voxel count overflows.
    #[error("invalid grid dimensions {0:?}")]
    InvalidDimensions([usize; 3]),

    /// The voxel data does not cover the whole grid.
    #[error("grid data has {actual} voxels, expected {expected}")]
    DataLength { expected: usize, actual: usize },

    /// Exactly one scan direction must be active.
    #[error("exactly one scan axis must be selected, got {active}")]
    AxisSelection { active: usize },

    /// A custom entry-face order is not a permutation of the face.
    #[error("seed order is not a permutation of {face} entry-face voxels")]
    SeedOrder { face: usize },

    /// The neighbor order repeats a step.
    #[error("neighbor order must list each of the six steps once")]
    NeighborOrder,

    /// The cancel token was set while burning.
    #[error("analysis cancelled")]
    Cancelled,

    /// The survey thread pool could not be built.
    #[error("thread pool: {0}")]
    ThreadPool(String),
}

pub type Result<T> = std::result::Result<T, PercolationError>;
