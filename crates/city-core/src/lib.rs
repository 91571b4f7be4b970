//! `city-core` — foundational types for the grid city simulation.
//!
//! This crate is a dependency of every other `city-*` crate.  It has no
//! `city-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`/`serde_json`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `PlaceId`                                  |
//! | [`grid`]        | `GridPoint`, Manhattan distance, `GridBounds`         |
//! | [`place`]       | `PlaceKind` enum                                      |
//! | [`step`]        | `Step` counter                                        |
//! | [`rng`]         | `SimRng` (one per engine)                             |
//! | [`config`]      | `SimConfig` run configuration, `PublishConfig`        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types and     |
//! |         | enables `SimConfig::from_json_*`.                          |

pub mod config;
pub mod error;
pub mod grid;
pub mod ids;
pub mod place;
pub mod rng;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{PublishConfig, SimConfig};
pub use error::{CoreError, CoreResult};
pub use grid::{GridBounds, GridPoint};
pub use ids::{AgentId, PlaceId};
pub use place::PlaceKind;
pub use rng::SimRng;
pub use step::Step;
