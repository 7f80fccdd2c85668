//! Voxel Percolation - phase connectivity in 3D cement microstructures
//!
//! Determines whether voxels of one phase (or two interchangeable phases)
//! form a cluster spanning the grid from one face to the opposite face along
//! a chosen axis, with periodic boundaries on the two transverse axes.
//!
//! The library is usable directly from Rust through [`percolation`] and
//! provides a C ABI in [`ffi`] for host simulators.
//!
//! ```
//! use voxel_percolation::{analyze_connectivity, Axis, PhaseSelector, VoxelGrid};
//!
//! let grid = VoxelGrid::filled(10, 10, 10, 0).unwrap();
//! let result = analyze_connectivity(&grid, PhaseSelector::single(0), Axis::Z).unwrap();
//! assert!(result.spans);
//! assert_eq!(result.connected_fraction, 1.0);
//! ```

pub mod error;
pub mod ffi;
pub mod percolation;
pub mod state;
mod util;


pub use error::{PercolationError, Result};
pub use percolation::{
    analyze_connectivity, analyze_connectivity_with, AnalysisOptions, Axis, AxisReport,
    AxisTransform, CancelToken, PercolationResult, PercolationTimeline, PhaseId, PhaseSelector,
    SeedOrder, Step, Survey, SurveyConfig, VoxelGrid,
};
