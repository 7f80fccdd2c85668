//! Target phase selection.

use serde::{Deserialize, Serialize};

use super::grid::PhaseId;

/// One or two phases burnt together as a single connected medium,
/// e.g. saturated and empty capillary porosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhaseSelector {
    a: PhaseId,
    b: PhaseId,
}

impl PhaseSelector {
    pub fn single(phase: PhaseId) -> Self {
        PhaseSelector { a: phase, b: phase }
    }

    /// Order does not matter: `pair(a, b)` and `pair(b, a)` select the same voxels.
    pub fn pair(a: PhaseId, b: PhaseId) -> Self {
        PhaseSelector { a, b }
    }

    #[inline]
    pub fn matches(self, phase: PhaseId) -> bool {
        phase == self.a || phase == self.b
    }

    pub fn phases(self) -> (PhaseId, PhaseId) {
        (self.a, self.b)
    }

    pub fn is_single(self) -> bool {
        self.a == self.b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_matches_only_its_phase() {
        let sel = PhaseSelector::single(3);
        assert!(sel.is_single());
        assert!(sel.matches(3));
        assert!(!sel.matches(0));
        assert!(!sel.matches(4));
    }

    #[test]
    fn test_pair_matches_both() {
        let sel = PhaseSelector::pair(0, 55);
        assert!(!sel.is_single());
        assert!(sel.matches(0));
        assert!(sel.matches(55));
        assert!(!sel.matches(1));
        assert_eq!(sel.phases(), (0, 55));
    }
}
