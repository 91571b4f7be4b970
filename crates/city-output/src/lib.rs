//! `city-output` — consumers of the engine's metrics and snapshots.
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`csv`]       | `CsvWriter`: `step_metrics.csv`, `agent_snapshots.csv`     |
//! | [`observer`]  | `SimOutputObserver`: drives any `OutputWriter` from a run  |
//! | [`render`]    | `grid_to_ascii`: occupancy grid as text                    |
//! | [`payload`]   | JSON metrics payload, message-bus topics and client ids    |
//!
//! Nothing here is called by the engine itself; these types only read what
//! `city_sim::CitySim` hands out after a step.
//!
//! # Usage
//!
//! ```rust,ignore
//! use city_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(config.steps, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod payload;
pub mod render;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use payload::{client_id, metrics_payload, topic};
pub use render::grid_to_ascii;
pub use row::{AgentSnapshotRow, StepMetricsRow};
pub use writer::OutputWriter;
