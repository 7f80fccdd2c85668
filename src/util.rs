//! Timing for caller-side survey logging.

use std::time::Instant;

use crate::percolation::PhaseSelector;

/// Guard around one survey. Logs the phases and axis count at trace level
/// when started and the elapsed time at debug level when dropped, including
/// early returns on error.
pub(crate) struct SurveyTimer {
    selector: PhaseSelector,
    axes: usize,
    start: Instant,
}

impl SurveyTimer {
    pub(crate) fn start(selector: PhaseSelector, axes: usize) -> Self {
        log::trace!("surveying {} along {} axes...", describe(selector), axes);
        SurveyTimer {
            selector,
            axes,
            start: Instant::now(),
        }
    }
}

impl Drop for SurveyTimer {
    fn drop(&mut self) {
        log::debug!(
            "survey of {} along {} axes: {:.3?}",
            describe(self.selector),
            self.axes,
            self.start.elapsed()
        );
    }
}

fn describe(selector: PhaseSelector) -> String {
    match selector.phases() {
        (a, _) if selector.is_single() => format!("phase {}", a),
        (a, b) => format!("phases {}+{}", a, b),
    }
}
