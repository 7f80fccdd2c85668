//! Scan-axis selection and the coordinate permutation behind it.
//!
//! The flood fill is written once for "scan along permuted axis 0, periodic on
//! permuted axes 1 and 2". Each [`Axis`] picks which original axis becomes
//! axis 0:
//!
//! | Axis | (p, q, r) |
//! |------|-----------|
//! | X    | (x, y, z) |
//! | Y    | (y, x, z) |
//! | Z    | (z, x, y) |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PercolationError, Result};

/// Direction along which spanning is tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Resolve three direction flags. Exactly one must be set.
    pub fn from_flags(x: bool, y: bool, z: bool) -> Result<Axis> {
        match (x, y, z) {
            (true, false, false) => Ok(Axis::X),
            (false, true, false) => Ok(Axis::Y),
            (false, false, true) => Ok(Axis::Z),
            _ => Err(PercolationError::AxisSelection {
                active: [x, y, z].iter().filter(|&&f| f).count(),
            }),
        }
    }

    /// 0 = X, 1 = Y, 2 = Z.
    pub fn from_index(index: u8) -> Option<Axis> {
        Axis::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Original axis index feeding each permuted slot.
    #[inline]
    fn order(self) -> [usize; 3] {
        match self {
            Axis::X => [0, 1, 2],
            Axis::Y => [1, 0, 2],
            Axis::Z => [2, 0, 1],
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Maps original grid coordinates to scan-ordered ones and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTransform {
    axis: Axis,
    dims: [usize; 3],
}

impl AxisTransform {
    /// `original` is `[nx, ny, nz]`.
    pub fn new(axis: Axis, original: [usize; 3]) -> Self {
        let o = axis.order();
        AxisTransform {
            axis,
            dims: [original[o[0]], original[o[1]], original[o[2]]],
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// `[D0, D1, D2]`: scan extent first, then the two periodic extents.
    #[inline]
    pub fn permuted_dims(&self) -> [usize; 3] {
        self.dims
    }

    #[inline]
    pub fn to_permuted(&self, xyz: [usize; 3]) -> [usize; 3] {
        let o = self.axis.order();
        [xyz[o[0]], xyz[o[1]], xyz[o[2]]]
    }

    #[inline]
    pub fn to_original(&self, pqr: [usize; 3]) -> [usize; 3] {
        let o = self.axis.order();
        let mut xyz = [0; 3];
        for (slot, &axis) in o.iter().enumerate() {
            xyz[axis] = pqr[slot];
        }
        xyz
    }
}
