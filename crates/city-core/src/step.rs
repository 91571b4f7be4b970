//! Discrete simulation time.
//!
//! Time is a monotonically increasing `Step` counter.  There is no mapping
//! to wall-clock time: one step is one movement of every agent.

use std::fmt;

/// Number of completed steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Move to the next step.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }

    /// `true` if this step falls on an `interval` boundary.  An interval of
    /// zero never matches.
    #[inline]
    pub fn is_multiple_of(self, interval: u64) -> bool {
        interval > 0 && self.0 % interval == 0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
