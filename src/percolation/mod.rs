//! Phase connectivity analysis over voxel microstructures.
//!
//! This module contains the grid model, the axis permutation, the burn-front
//! flood fill, and the caller-side survey that merges per-axis results.
//! The FFI layer in `ffi/` calls these functions.

pub mod axis;
pub mod burn;
pub mod grid;
pub mod options;
pub mod phase;
pub mod region;
pub mod result;
pub mod survey;
mod working;

pub use axis::{Axis, AxisTransform};
pub use burn::{analyze_connectivity, analyze_connectivity_with, BurnFrontAnalyzer};
pub use grid::{PhaseId, VoxelGrid};
pub use options::{AnalysisOptions, CancelToken, SeedOrder, Step};
pub use phase::PhaseSelector;
pub use region::{extract_region, import_region};
pub use result::PercolationResult;
pub use survey::{AxisReport, PercolationTimeline, Survey, SurveyConfig, TimelineEntry};
