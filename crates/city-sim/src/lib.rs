//! `city-sim` — the grid city simulation engine.
//!
//! # One step
//!
//! ```text
//! step():
//!   fail with NoPlaces if the city has no places (nothing is touched)
//!   for agent in ascending AgentId order:
//!     ① Goal   — no goal, or goal no longer a place → draw a random place
//!     ② Move   — one cell along the dominant axis toward the goal;
//!                ties (including "already there") flip a fair coin
//!     ③ Count  — steps_taken += 1
//!   step_index += 1
//! ```
//!
//! All randomness comes from one [`SimRng`](city_core::SimRng) owned by the
//! engine, drawn in a fixed order, so a seeded engine is fully reproducible.
//!
//! # Quick-start
//!
//! ```rust
//! use city_sim::CitySim;
//!
//! let mut sim = CitySim::new(20, 10, Some(0))?;
//! sim.populate_random(25, 8);
//! for _ in 0..5 {
//!     sim.step()?;
//! }
//! assert_eq!(sim.metrics().step, 5);
//! assert_eq!(sim.snapshot_grid().total(), 25);
//! # Ok::<(), city_sim::SimError>(())
//! ```

pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use metrics::{OccupancyGrid, SimMetrics};
pub use observer::{NoopObserver, SimObserver};
pub use sim::CitySim;
pub use store::{Agent, EntityStore, Place};
