//! The `CitySim` engine and its step loop.

use std::cmp::Ordering;

use city_core::{
    AgentId, GridBounds, GridPoint, PlaceId, PlaceKind, SimConfig, SimRng, Step,
};
use tracing::{debug, info};

use crate::store::place_in;
use crate::{
    Agent, EntityStore, OccupancyGrid, Place, SimError, SimMetrics, SimObserver, SimResult,
};

/// The grid city simulation engine.
///
/// `CitySim` is the sole owner of its [`EntityStore`] and its [`SimRng`].
/// Every mutation goes through `&mut self`; callers only ever see shared
/// references to the records.
///
/// # Randomness
///
/// Draws happen in this order and no other:
///
/// - [`populate_random`](Self::populate_random): for each place, kind then
///   x then y; afterwards, for each agent, x then y.
/// - [`step`](Self::step): for each agent in ascending id order, a goal
///   draw (only if it needs a goal) then a coin flip (only on a tie).
pub struct CitySim {
    bounds:            GridBounds,
    seed:              Option<u64>,
    rng:               SimRng,
    store:             EntityStore,
    step_index:        Step,
    snapshot_interval: u64,
}

impl CitySim {
    // ── Construction ──────────────────────────────────────────────────────

    /// Create an empty city of `width × height` cells.
    ///
    /// With `Some(seed)` the engine is reproducible; with `None` it is
    /// seeded from OS entropy.
    pub fn new(width: u32, height: u32, seed: Option<u64>) -> SimResult<Self> {
        let bounds = GridBounds::new(width, height)
            .ok_or(SimError::InvalidDimension { width, height })?;

        Ok(Self {
            bounds,
            seed,
            rng:               SimRng::from_optional_seed(seed),
            store:             EntityStore::new(),
            step_index:        Step::ZERO,
            snapshot_interval: 1,
        })
    }

    /// Validate `config`, construct the engine, and populate it randomly
    /// with `config.agents` agents and `config.places` places.
    pub fn from_config(config: &SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut sim = Self::new(config.width, config.height, config.seed)?;
        sim.set_snapshot_interval(config.snapshot_interval_steps);
        sim.populate_random(config.agents, config.places);
        Ok(sim)
    }

    /// Emit snapshots from [`run`](Self::run) every `interval` steps.
    /// 0 disables snapshots.  Default: 1.
    pub fn set_snapshot_interval(&mut self, interval: u64) {
        self.snapshot_interval = interval;
    }

    // ── Population ────────────────────────────────────────────────────────

    /// Add a place.  `location` is not checked against the grid.
    pub fn add_place(&mut self, kind: PlaceKind, location: GridPoint) -> PlaceId {
        self.store.add_place(kind, location)
    }

    /// Add an agent with no goal.  An off-grid `location` is clamped onto
    /// the nearest edge cell, so every agent is always counted by
    /// [`snapshot_grid`](Self::snapshot_grid).
    pub fn add_agent(&mut self, location: GridPoint) -> AgentId {
        let location = self.bounds.clamp(location.x as i64, location.y as i64);
        self.store.add_agent(location)
    }

    /// Create `n_places` random places, then `n_agents` agents at random
    /// cells.  Places are drawn first.
    pub fn populate_random(&mut self, n_agents: usize, n_places: usize) {
        for _ in 0..n_places {
            let kind = *self.rng.choose(&PlaceKind::ALL).unwrap_or(&PlaceKind::Home);
            let location = self.random_point();
            self.store.add_place(kind, location);
        }
        for _ in 0..n_agents {
            let location = self.random_point();
            self.store.add_agent(location);
        }
        info!(
            agents = self.store.agent_count(),
            places = self.store.place_count(),
            "populated city"
        );
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance every agent by one tick.
    ///
    /// Fails with [`SimError::NoPlaces`] if there is nowhere to go; in that
    /// case no agent, counter or RNG state is touched.
    ///
    /// An agent standing on its goal keeps that goal and does not move
    /// again: goals are only redrawn when missing or dangling.
    pub fn step(&mut self) -> SimResult<()> {
        if self.store.place_count() == 0 {
            return Err(SimError::NoPlaces);
        }

        // Explicit field borrows so the borrow checker sees disjoint access.
        let bounds = self.bounds;
        let rng = &mut self.rng;
        let (places, agents) = self.store.split_mut();

        for agent in agents.iter_mut() {
            let goal = match agent.goal.and_then(|g| place_in(places, g)) {
                Some(place) => place,
                None => {
                    // `places` is non-empty, checked above.
                    let Some(place) = rng.choose(places) else { break };
                    agent.goal = Some(place.id);
                    place
                }
            };
            agent.location = move_one_toward(agent.location, goal.location, bounds, rng);
            agent.steps_taken += 1;
        }

        self.step_index.advance();
        debug!(step = self.step_index.0, agents = agents.len(), "step complete");
        Ok(())
    }

    /// Run `n_steps` steps, reporting to `observer`.
    ///
    /// A failing step aborts the run and returns the error; the observer
    /// sees neither `on_step_end` for that step nor `on_run_end`.
    pub fn run<O: SimObserver>(&mut self, n_steps: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n_steps {
            observer.on_step_start(self.step_index);
            self.step()?;
            observer.on_step_end(&self.metrics());
            if self.step_index.is_multiple_of(self.snapshot_interval) {
                let grid = self.snapshot_grid();
                observer.on_snapshot(self.step_index, &grid, &self.store);
            }
        }
        observer.on_run_end(self.step_index);
        Ok(())
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    /// Step count, population sizes and mean distance to goal.
    pub fn metrics(&self) -> SimMetrics {
        SimMetrics::collect(self.step_index.0, &self.store)
    }

    /// Fresh `height × width` agent-count grid.
    pub fn snapshot_grid(&self) -> OccupancyGrid {
        OccupancyGrid::from_store(self.bounds, &self.store)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    #[inline]
    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// The seed given at construction, `None` if entropy-seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Completed steps.
    #[inline]
    pub fn step_index(&self) -> Step {
        self.step_index
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn agents(&self) -> &[Agent] {
        self.store.agents()
    }

    pub fn places(&self) -> &[Place] {
        self.store.places()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.store.agent(id)
    }

    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        self.store.place(id)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    fn random_point(&mut self) -> GridPoint {
        let x = self.rng.gen_range(0..self.bounds.width);
        let y = self.rng.gen_range(0..self.bounds.height);
        GridPoint::new(x, y)
    }
}

/// One cell toward `goal` along the dominant axis.
///
/// On a tie (`|dx| == |dy|`, including standing on the goal) a fair coin
/// picks the axis; a zero delta on the chosen axis means no movement.
fn move_one_toward(
    from:   GridPoint,
    goal:   GridPoint,
    bounds: GridBounds,
    rng:    &mut SimRng,
) -> GridPoint {
    let (dx, dy) = from.delta_to(goal);
    let (mx, my) = match dx.abs().cmp(&dy.abs()) {
        Ordering::Greater => (dx.signum(), 0),
        Ordering::Less    => (0, dy.signum()),
        Ordering::Equal   => {
            if rng.gen_bool(0.5) {
                (dx.signum(), 0)
            } else {
                (0, dy.signum())
            }
        }
    };
    bounds.clamp(from.x as i64 + mx, from.y as i64 + my)
}
