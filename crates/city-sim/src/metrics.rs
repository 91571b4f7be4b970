//! Read-only summaries derived from engine state.

use city_core::{GridBounds, GridPoint};

use crate::EntityStore;

/// Aggregate state after a step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimMetrics {
    /// Completed steps.
    pub step:                  u64,
    pub agent_count:           usize,
    pub place_count:           usize,
    /// Mean Manhattan distance from each goal-holding agent to its goal.
    /// `0.0` when no agent holds a valid goal.
    pub mean_distance_to_goal: f64,
}

impl SimMetrics {
    pub(crate) fn collect(step: u64, store: &EntityStore) -> Self {
        let (sum, counted) = store
            .agents()
            .iter()
            .filter_map(|a| store.goal_location(a).map(|g| a.location.manhattan(g)))
            .fold((0u64, 0u64), |(sum, n), d| (sum + d, n + 1));

        let mean_distance_to_goal = if counted == 0 {
            0.0
        } else {
            sum as f64 / counted as f64
        };

        Self {
            step,
            agent_count: store.agent_count(),
            place_count: store.place_count(),
            mean_distance_to_goal,
        }
    }
}

impl std::fmt::Display for SimMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "step={} agents={} places={} mean_distance_to_goal={:.3}",
            self.step, self.agent_count, self.place_count, self.mean_distance_to_goal
        )
    }
}

// ── OccupancyGrid ─────────────────────────────────────────────────────────────

/// Agent count per cell, `height` rows of `width` columns.
///
/// Stored row-major in one `Vec`; cell `(x, y)` lives at `y * width + x`.
/// Each grid is an independent copy: mutating it never touches the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width:  u32,
    height: u32,
    cells:  Vec<u32>,
}

impl OccupancyGrid {
    /// An all-zero grid.
    pub fn empty(bounds: GridBounds) -> Self {
        Self {
            width:  bounds.width,
            height: bounds.height,
            cells:  vec![0; bounds.cell_count()],
        }
    }

    /// Count every agent once at its location.
    pub(crate) fn from_store(bounds: GridBounds, store: &EntityStore) -> Self {
        let mut grid = Self::empty(bounds);
        for agent in store.agents() {
            // The engine keeps agents in-grid; a hand-built store may not.
            if let Some(cell) = grid.cell_mut(agent.location) {
                *cell += 1;
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Count at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.cells[self.offset(x, y)])
    }

    /// Mutable count at `p`, or `None` outside the grid.
    pub fn cell_mut(&mut self, p: GridPoint) -> Option<&mut u32> {
        if p.x < self.width && p.y < self.height {
            let i = self.offset(p.x, p.y);
            Some(&mut self.cells[i])
        } else {
            None
        }
    }

    /// Rows from `y = 0` upward, each `width` long.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.cells.chunks(self.width as usize)
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    /// Convert into a nested `height × width` matrix.
    pub fn into_rows(self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.width as usize)
            .map(<[u32]>::to_vec)
            .collect()
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
