//! Simulation observer trait for progress reporting and data collection.

use city_core::Step;

use crate::{EntityStore, OccupancyGrid, SimMetrics};

/// Callbacks invoked by [`CitySim::run`][crate::CitySim::run] around each
/// step.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust
/// use city_sim::{SimMetrics, SimObserver};
///
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, metrics: &SimMetrics) {
///         println!("{metrics}");
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called before a step, with the index the step will complete from.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after every successful step with fresh metrics.
    fn on_step_end(&mut self, _metrics: &SimMetrics) {}

    /// Called after a step whose index falls on the snapshot interval.
    ///
    /// `grid` is a fresh occupancy snapshot; `store` gives read-only access
    /// to the individual records for writers that need per-agent rows.
    fn on_snapshot(&mut self, _step: Step, _grid: &OccupancyGrid, _store: &EntityStore) {}

    /// Called once after the last step of a run.
    fn on_run_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
