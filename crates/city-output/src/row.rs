//! Plain data row types written by output backends.

use city_sim::{Agent, SimMetrics};

/// Aggregate metrics after one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetricsRow {
    pub step:                  u64,
    pub agent_count:           u64,
    pub place_count:           u64,
    pub mean_distance_to_goal: f64,
}

impl From<&SimMetrics> for StepMetricsRow {
    fn from(m: &SimMetrics) -> Self {
        Self {
            step:                  m.step,
            agent_count:           m.agent_count as u64,
            place_count:           m.place_count as u64,
            mean_distance_to_goal: m.mean_distance_to_goal,
        }
    }
}

/// One agent's state at a snapshot step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentSnapshotRow {
    pub step:          u64,
    pub agent_id:      u32,
    pub x:             u32,
    pub y:             u32,
    /// `None` until the agent's first step.
    pub goal_place_id: Option<u32>,
    pub steps_taken:   u64,
}

impl AgentSnapshotRow {
    pub fn new(step: u64, agent: &Agent) -> Self {
        Self {
            step,
            agent_id:      agent.id.0,
            x:             agent.location.x,
            y:             agent.location.y,
            goal_place_id: agent.goal.map(|g| g.0),
            steps_taken:   agent.steps_taken,
        }
    }
}
