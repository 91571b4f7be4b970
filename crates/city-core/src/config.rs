//! Run configuration.
//!
//! Typically loaded from a JSON file by the application crate (see
//! [`SimConfig::from_json_path`], `serde` feature) and then overridden from
//! the command line.

use crate::{CoreError, CoreResult};

/// File name looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "city.json";

/// Base topic used when the config file does not name one.
pub const DEFAULT_BASE_TOPIC: &str = "simulated-city";

/// Client id prefix used when the config file does not name one.
pub const DEFAULT_CLIENT_ID_PREFIX: &str = "simcity";

/// Top-level simulation configuration.
///
/// Every field has a default; a JSON file only needs to name the fields it
/// changes.  The defaults reproduce the reference demo scenario: a 20×10
/// grid, seed 0, 25 agents, 8 places, 5 steps.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Grid columns.  Must be positive.
    pub width: u32,

    /// Grid rows.  Must be positive.
    pub height: u32,

    /// Master RNG seed.  `None` seeds from OS entropy (non-reproducible).
    pub seed: Option<u64>,

    /// Agents created by random population.
    pub agents: usize,

    /// Places created by random population.
    pub places: usize,

    /// Steps to run.
    pub steps: u64,

    /// Emit an occupancy snapshot every N completed steps.  0 disables
    /// snapshots.
    pub snapshot_interval_steps: u64,

    /// Message-bus settings for metrics payloads.
    pub publish: PublishConfig,
}

/// Message-bus connection and naming settings.
///
/// The engine never opens a connection; these settings name where an
/// external publisher should send the metrics payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct PublishConfig {
    pub host: String,
    pub port: u16,
    pub tls:  bool,

    /// Keepalive interval in seconds.
    pub keepalive_s: u32,

    /// Prefix of the client id; see `city_output::client_id`.
    pub client_id_prefix: String,

    /// Every published topic lives under this base.
    pub base_topic: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            host:             "localhost".to_owned(),
            port:             1883,
            tls:              false,
            keepalive_s:      60,
            client_id_prefix: DEFAULT_CLIENT_ID_PREFIX.to_owned(),
            base_topic:       DEFAULT_BASE_TOPIC.to_owned(),
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width:                   20,
            height:                  10,
            seed:                    Some(0),
            agents:                  25,
            places:                  8,
            steps:                   5,
            snapshot_interval_steps: 1,
            publish:                 PublishConfig::default(),
        }
    }
}

impl SimConfig {
    /// Reject configurations the engine cannot run.
    ///
    /// Zero places is only an error when there is something to step: an
    /// engine without places fails on its first `step()`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CoreError::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.places == 0 && self.steps > 0 {
            return Err(CoreError::Config(
                "at least one place is required to run steps".into(),
            ));
        }
        if self.publish.base_topic.trim().is_empty() {
            return Err(CoreError::Config("publish.base_topic must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl SimConfig {
    /// Parse a JSON document.  Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON file.
    pub fn from_json_path(path: &std::path::Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Like [`from_json_path`](Self::from_json_path), but a missing file
    /// yields [`SimConfig::default`].
    pub fn load_or_default(path: &std::path::Path) -> CoreResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::from_json_path(path)
    }
}
