//! Unit and scenario tests for city-sim.

use city_core::{AgentId, GridPoint, PlaceId, PlaceKind, SimConfig, SimRng, Step};

use crate::{CitySim, EntityStore, OccupancyGrid, SimError, SimMetrics, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn seeded(width: u32, height: u32, seed: u64) -> CitySim {
    CitySim::new(width, height, Some(seed)).expect("valid dimensions")
}

fn populated(seed: u64) -> CitySim {
    let mut sim = seeded(20, 10, seed);
    sim.populate_random(25, 8);
    sim
}

fn grid_matrix(sim: &CitySim) -> Vec<Vec<u32>> {
    sim.snapshot_grid().into_rows()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn zero_width_rejected() {
        let err = CitySim::new(0, 5, Some(1)).err().expect("should fail");
        assert!(matches!(err, SimError::InvalidDimension { width: 0, height: 5 }));
    }

    #[test]
    fn zero_height_rejected() {
        assert!(matches!(
            CitySim::new(5, 0, None),
            Err(SimError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn fresh_engine_is_empty() {
        let sim = seeded(3, 4, 0);
        assert_eq!(sim.width(), 3);
        assert_eq!(sim.height(), 4);
        assert_eq!(sim.seed(), Some(0));
        assert_eq!(sim.step_index(), Step::ZERO);
        let m = sim.metrics();
        assert_eq!((m.step, m.agent_count, m.place_count), (0, 0, 0));
        assert_eq!(m.mean_distance_to_goal, 0.0);
    }

    #[test]
    fn unseeded_engine_still_works() {
        let mut sim = CitySim::new(10, 10, None).unwrap();
        assert_eq!(sim.seed(), None);
        sim.populate_random(5, 2);
        sim.step().unwrap();
        assert_eq!(sim.metrics().agent_count, 5);
    }

    #[test]
    fn from_config_populates() {
        let cfg = SimConfig { agents: 7, places: 3, ..SimConfig::default() };
        let sim = CitySim::from_config(&cfg).unwrap();
        assert_eq!(sim.agents().len(), 7);
        assert_eq!(sim.places().len(), 3);
        assert_eq!((sim.width(), sim.height()), (20, 10));
    }

    #[test]
    fn from_config_rejects_invalid() {
        let cfg = SimConfig { height: 0, ..SimConfig::default() };
        assert!(matches!(CitySim::from_config(&cfg), Err(SimError::Config(_))));
    }
}

// ── Entity store ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    #[test]
    fn ids_start_at_one_and_are_independent() {
        let mut sim = seeded(5, 5, 0);
        assert_eq!(sim.add_place(PlaceKind::Home, GridPoint::new(0, 0)), PlaceId(1));
        assert_eq!(sim.add_agent(GridPoint::new(1, 1)), AgentId(1));
        assert_eq!(sim.add_place(PlaceKind::Park, GridPoint::new(2, 2)), PlaceId(2));
        assert_eq!(sim.add_agent(GridPoint::new(3, 3)), AgentId(2));
    }

    #[test]
    fn ids_never_reused() {
        let mut store = EntityStore::new();
        let ids: Vec<AgentId> = (0..500).map(|_| store.add_agent(GridPoint::new(0, 0))).collect();
        let unique: std::collections::HashSet<_> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 500);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(store.next_agent_id(), AgentId(501));
        assert_eq!(store.next_place_id(), PlaceId(1));
    }

    #[test]
    fn lookup_by_id() {
        let mut store = EntityStore::new();
        let p = store.add_place(PlaceKind::Shop, GridPoint::new(4, 1));
        let a = store.add_agent(GridPoint::new(0, 2));
        assert_eq!(store.place(p).unwrap().kind, PlaceKind::Shop);
        assert_eq!(store.agent(a).unwrap().location, GridPoint::new(0, 2));
        assert!(store.agent(a).unwrap().goal.is_none());
        assert!(store.place(PlaceId(0)).is_none());
        assert!(store.place(PlaceId(2)).is_none());
        assert!(!store.contains_place(PlaceId(9)));
    }

    #[test]
    fn populate_random_in_bounds() {
        let mut sim = seeded(7, 3, 11);
        sim.populate_random(200, 50);
        let b = sim.bounds();
        assert!(sim.places().iter().all(|p| b.contains(p.location)));
        assert!(sim.agents().iter().all(|a| b.contains(a.location)));
    }

    #[test]
    fn populate_random_places_then_agents() {
        let mut sim = seeded(7, 3, 11);
        sim.add_agent(GridPoint::new(0, 0));
        sim.populate_random(2, 3);
        let place_ids: Vec<_> = sim.places().iter().map(|p| p.id).collect();
        let agent_ids: Vec<_> = sim.agents().iter().map(|a| a.id).collect();
        assert_eq!(place_ids, [PlaceId(1), PlaceId(2), PlaceId(3)]);
        assert_eq!(agent_ids, [AgentId(1), AgentId(2), AgentId(3)]);
    }
}

// ── Stepper ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepper {
    use super::*;

    #[test]
    fn step_without_places_fails_and_leaves_state() {
        let mut sim = seeded(10, 10, 3);
        sim.populate_random(4, 0);
        let before = sim.agents().to_vec();

        assert!(matches!(sim.step(), Err(SimError::NoPlaces)));
        assert_eq!(sim.agents(), before.as_slice());
        assert_eq!(sim.step_index(), Step::ZERO);
        assert_eq!(sim.metrics().agent_count, 4);
    }

    #[test]
    fn failed_step_consumes_no_randomness() {
        let mut a = seeded(10, 10, 3);
        let mut b = seeded(10, 10, 3);
        a.populate_random(4, 0);
        b.populate_random(4, 0);

        assert!(a.step().is_err());

        for sim in [&mut a, &mut b] {
            sim.add_place(PlaceKind::Work, GridPoint::new(5, 5));
            sim.add_place(PlaceKind::Home, GridPoint::new(1, 8));
            sim.step().unwrap();
        }
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn retry_after_adding_place_succeeds() {
        let mut sim = seeded(4, 4, 0);
        sim.add_agent(GridPoint::new(0, 0));
        assert!(sim.step().is_err());
        sim.add_place(PlaceKind::Station, GridPoint::new(3, 0));
        sim.step().unwrap();
        assert_eq!(sim.step_index(), Step(1));
    }

    #[test]
    fn moves_along_dominant_x() {
        let mut sim = seeded(10, 10, 0);
        sim.add_place(PlaceKind::Work, GridPoint::new(5, 2));
        let a = sim.add_agent(GridPoint::new(0, 0));
        sim.step().unwrap();
        assert_eq!(sim.agent(a).unwrap().location, GridPoint::new(1, 0));
        assert_eq!(sim.agent(a).unwrap().goal, Some(PlaceId(1)));
    }

    #[test]
    fn moves_along_dominant_y_backwards() {
        let mut sim = seeded(10, 10, 0);
        sim.add_place(PlaceKind::Park, GridPoint::new(4, 0));
        let a = sim.add_agent(GridPoint::new(5, 9));
        sim.step().unwrap();
        assert_eq!(sim.agent(a).unwrap().location, GridPoint::new(5, 8));
    }

    #[test]
    fn tie_moves_one_cell_on_either_axis() {
        for seed in 0..20 {
            let mut sim = seeded(10, 10, seed);
            sim.add_place(PlaceKind::Shop, GridPoint::new(3, 3));
            let a = sim.add_agent(GridPoint::new(1, 1));
            sim.step().unwrap();
            let loc = sim.agent(a).unwrap().location;
            assert!(
                loc == GridPoint::new(2, 1) || loc == GridPoint::new(1, 2),
                "seed {seed}: unexpected {loc}"
            );
        }
    }

    #[test]
    fn reaches_goal_in_manhattan_steps() {
        let mut sim = seeded(10, 10, 5);
        let goal = GridPoint::new(7, 2);
        sim.add_place(PlaceKind::Home, goal);
        let a = sim.add_agent(GridPoint::new(1, 6));
        let distance = GridPoint::new(1, 6).manhattan(goal);
        for _ in 0..distance {
            sim.step().unwrap();
        }
        assert_eq!(sim.agent(a).unwrap().location, goal);
    }

    /// Agent may stall at goal: arriving does not clear or redraw the goal.
    #[test]
    fn agent_may_stall_at_goal() {
        let mut sim = seeded(6, 6, 9);
        sim.add_place(PlaceKind::Home, GridPoint::new(2, 2));
        sim.add_place(PlaceKind::Work, GridPoint::new(5, 5));
        let a = sim.add_agent(GridPoint::new(2, 2));
        sim.step().unwrap();
        let goal = sim.agent(a).unwrap().goal.expect("goal drawn");
        let goal_loc = sim.place(goal).unwrap().location;

        // Far more steps than the 6-cell diagonal: the agent arrives, then parks.
        for _ in 0..10 {
            sim.step().unwrap();
        }
        assert_eq!(sim.agent(a).unwrap().location, goal_loc);
        for _ in 0..20 {
            sim.step().unwrap();
            assert_eq!(sim.agent(a).unwrap().goal, Some(goal));
            assert_eq!(sim.agent(a).unwrap().location, goal_loc);
        }
    }

    #[test]
    fn off_grid_agent_is_clamped_on_insert() {
        let mut sim = seeded(5, 5, 0);
        sim.add_place(PlaceKind::Home, GridPoint::new(0, 0));
        let a = sim.add_agent(GridPoint::new(10, 10));
        assert_eq!(sim.agent(a).unwrap().location, GridPoint::new(4, 4));
        assert_eq!(sim.snapshot_grid().total() as usize, sim.metrics().agent_count);
        assert_eq!(sim.snapshot_grid().get(4, 4), Some(1));

        sim.step().unwrap();
        assert_eq!(sim.snapshot_grid().total(), 1);
    }

    #[test]
    fn draws_follow_populate_then_goal_order() {
        let mut sim = seeded(7, 4, 11);
        sim.populate_random(1, 3);
        sim.step().unwrap();

        let mut rng = SimRng::new(11);
        for place in sim.places() {
            assert_eq!(rng.choose(&PlaceKind::ALL), Some(&place.kind));
            assert_eq!(rng.gen_range(0..7u32), place.location.x);
            assert_eq!(rng.gen_range(0..4u32), place.location.y);
        }
        rng.gen_range(0..7u32);
        rng.gen_range(0..4u32);
        let goal = rng.choose(sim.places()).map(|p| p.id);
        assert_eq!(sim.agents()[0].goal, goal);
    }

    #[test]
    fn off_grid_insert_draws_no_randomness() {
        let mut a = seeded(6, 6, 3);
        let mut b = seeded(6, 6, 3);
        a.add_agent(GridPoint::new(99, 0));
        b.add_agent(GridPoint::new(5, 0));
        a.populate_random(4, 3);
        b.populate_random(4, 3);
        assert_eq!(a.agents(), b.agents());
        assert_eq!(a.places(), b.places());
    }

    #[test]
    fn counters_advance_by_one() {
        let mut sim = populated(2);
        for expected in 1..=4u64 {
            sim.step().unwrap();
            assert_eq!(sim.step_index(), Step(expected));
            assert!(sim.agents().iter().all(|a| a.steps_taken == expected));
        }
    }

    #[test]
    fn every_agent_gets_a_valid_goal() {
        let mut sim = populated(4);
        assert!(sim.agents().iter().all(|a| a.goal.is_none()));
        sim.step().unwrap();
        for agent in sim.agents() {
            let goal = agent.goal.expect("goal assigned on first step");
            assert!(sim.store().contains_place(goal));
        }
    }
}

// ── Metrics & snapshot ────────────────────────────────────────────────────────

#[cfg(test)]
mod metrics {
    use super::*;

    #[test]
    fn mean_distance_zero_without_goals() {
        let mut sim = seeded(10, 10, 0);
        sim.populate_random(6, 2);
        assert_eq!(sim.metrics().mean_distance_to_goal, 0.0);
    }

    #[test]
    fn mean_distance_zero_without_agents() {
        let mut sim = seeded(10, 10, 0);
        sim.populate_random(0, 2);
        sim.step().unwrap();
        let m = sim.metrics();
        assert_eq!(m.agent_count, 0);
        assert_eq!(m.mean_distance_to_goal, 0.0);
        assert!(!m.mean_distance_to_goal.is_nan());
    }

    #[test]
    fn mean_distance_over_goal_holders_only() {
        let mut sim = seeded(10, 10, 0);
        sim.add_place(PlaceKind::Work, GridPoint::new(5, 2));
        sim.add_agent(GridPoint::new(0, 0));
        sim.step().unwrap();
        // Agent now at (1, 0): 4 + 2.
        assert_eq!(sim.metrics().mean_distance_to_goal, 6.0);

        // A goal-less newcomer does not count.
        sim.add_agent(GridPoint::new(9, 9));
        let m = sim.metrics();
        assert_eq!(m.agent_count, 2);
        assert_eq!(m.mean_distance_to_goal, 6.0);
    }

    #[test]
    fn snapshot_counts_stacked_agents() {
        let mut sim = seeded(3, 2, 0);
        sim.add_agent(GridPoint::new(2, 1));
        sim.add_agent(GridPoint::new(2, 1));
        sim.add_agent(GridPoint::new(0, 0));
        let grid = sim.snapshot_grid();
        assert_eq!(grid.get(2, 1), Some(2));
        assert_eq!(grid.get(0, 0), Some(1));
        assert_eq!(grid.get(1, 0), Some(0));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.into_rows(), vec![vec![1, 0, 0], vec![0, 0, 2]]);
    }

    #[test]
    fn snapshot_is_independent_copy() {
        let mut sim = populated(8);
        sim.step().unwrap();
        let mut grid = sim.snapshot_grid();
        for row in 0..grid.height() {
            for col in 0..grid.width() {
                *grid.cell_mut(GridPoint::new(col, row)).unwrap() = 99;
            }
        }
        assert_eq!(sim.snapshot_grid().total(), 25);
    }

    #[test]
    fn reads_do_not_mutate() {
        let mut a = populated(6);
        let mut b = populated(6);
        for _ in 0..3 {
            let _ = a.metrics();
            let _ = a.snapshot_grid();
        }
        a.step().unwrap();
        b.step().unwrap();
        assert_eq!(a.agents(), b.agents());
        assert_eq!(a.step_index(), b.step_index());
    }

    #[test]
    fn empty_grid_helpers() {
        let grid = OccupancyGrid::empty(city_core::GridBounds::new(4, 2).unwrap());
        assert_eq!(grid.rows().count(), 2);
        assert!(grid.rows().all(|r| r.len() == 4));
        assert_eq!(grid.total(), 0);
    }

    #[test]
    fn display() {
        let m = SimMetrics {
            step:                  5,
            agent_count:           25,
            place_count:           8,
            mean_distance_to_goal: 2.5,
        };
        assert_eq!(m.to_string(), "step=5 agents=25 places=8 mean_distance_to_goal=2.500");
    }
}

// ── Determinism & scenarios ───────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn same_seed_same_history() {
        let mut a = populated(123);
        let mut b = populated(123);
        assert_eq!(a.places(), b.places());
        for _ in 0..25 {
            a.step().unwrap();
            b.step().unwrap();
            assert_eq!(a.metrics(), b.metrics());
            assert_eq!(grid_matrix(&a), grid_matrix(&b));
        }
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = populated(1);
        let b = populated(2);
        assert_ne!(a.agents(), b.agents());
    }

    #[test]
    fn small_city_keeps_population() {
        let mut sim = seeded(10, 10, 1);
        sim.populate_random(5, 3);
        assert_eq!(sim.metrics().agent_count, 5);
        sim.step().unwrap();
        assert_eq!(sim.metrics().agent_count, 5);
    }

    #[test]
    fn demo_scenario_five_steps() {
        let mut sim = seeded(20, 10, 0);
        sim.populate_random(25, 8);
        for _ in 0..5 {
            sim.step().unwrap();
        }
        assert_eq!(sim.metrics().step, 5);
        let rows = grid_matrix(&sim);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.len() == 20));
        let total: u32 = rows.iter().flatten().sum();
        assert_eq!(total, 25);
    }
}

// ── Observer-driven runs ──────────────────────────────────────────────────────

#[cfg(test)]
mod run {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:    Vec<Step>,
        metrics:   Vec<SimMetrics>,
        snapshots: Vec<(Step, u64, usize)>,
        ended:     Option<Step>,
    }

    impl SimObserver for Recorder {
        fn on_step_start(&mut self, step: Step) {
            self.starts.push(step);
        }

        fn on_step_end(&mut self, metrics: &SimMetrics) {
            self.metrics.push(*metrics);
        }

        fn on_snapshot(&mut self, step: Step, grid: &OccupancyGrid, store: &EntityStore) {
            self.snapshots.push((step, grid.total(), store.agent_count()));
        }

        fn on_run_end(&mut self, final_step: Step) {
            self.ended = Some(final_step);
        }
    }

    #[test]
    fn callbacks_in_order() {
        let mut sim = populated(0);
        sim.set_snapshot_interval(2);
        let mut rec = Recorder::default();
        sim.run(5, &mut rec).unwrap();

        assert_eq!(rec.starts, (0..5).map(Step).collect::<Vec<_>>());
        assert_eq!(rec.metrics.iter().map(|m| m.step).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);
        assert_eq!(rec.snapshots, [(Step(2), 25, 25), (Step(4), 25, 25)]);
        assert_eq!(rec.ended, Some(Step(5)));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let mut sim = populated(0);
        sim.set_snapshot_interval(0);
        let mut rec = Recorder::default();
        sim.run(3, &mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
        assert_eq!(rec.metrics.len(), 3);
    }

    #[test]
    fn run_matches_manual_steps() {
        let mut a = populated(77);
        let mut b = populated(77);
        a.run(6, &mut crate::NoopObserver).unwrap();
        for _ in 0..6 {
            b.step().unwrap();
        }
        assert_eq!(a.agents(), b.agents());
    }

    #[test]
    fn run_without_places_aborts() {
        let mut sim = seeded(5, 5, 0);
        sim.add_agent(GridPoint::new(1, 1));
        let mut rec = Recorder::default();
        assert!(matches!(sim.run(3, &mut rec), Err(SimError::NoPlaces)));
        assert_eq!(rec.starts, [Step(0)]);
        assert!(rec.metrics.is_empty());
        assert!(rec.ended.is_none());
    }
}

// ── Invariants ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn bounds_and_conservation_hold(
            width in 1u32..15,
            height in 1u32..15,
            agents in 0usize..40,
            places in 1usize..10,
            steps in 0u64..20,
            seed in any::<u64>(),
        ) {
            let mut sim = CitySim::new(width, height, Some(seed)).unwrap();
            sim.populate_random(agents, places);
            let b = sim.bounds();
            for _ in 0..steps {
                sim.step().unwrap();
                prop_assert!(sim.agents().iter().all(|a| b.contains(a.location)));
                prop_assert!(sim.places().iter().all(|p| b.contains(p.location)));
                prop_assert_eq!(sim.snapshot_grid().total(), agents as u64);
                let m = sim.metrics();
                prop_assert!(m.mean_distance_to_goal.is_finite());
                prop_assert!(m.mean_distance_to_goal >= 0.0);
            }
            prop_assert_eq!(sim.step_index(), Step(steps));
        }
    }
}
