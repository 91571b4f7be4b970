//! Entity storage: `Place` and `Agent` records in id-indexed arenas.
//!
//! Ids are handed out from two independent counters that start at 1.  No
//! entity is ever removed, so an id's arena slot is always `id - 1` and a
//! lookup is a bounds check plus an index.

use city_core::{AgentId, GridPoint, PlaceId, PlaceKind};

/// A fixed point of interest.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    pub id:       PlaceId,
    pub kind:     PlaceKind,
    pub location: GridPoint,
}

/// A mobile agent walking toward its goal place.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub id:          AgentId,
    pub location:    GridPoint,
    /// Place the agent is heading to.  A plain id, checked against the
    /// store every time it is used.
    pub goal:        Option<PlaceId>,
    /// Completed steps.  Never decreases.
    pub steps_taken: u64,
}

impl Agent {
    fn new(id: AgentId, location: GridPoint) -> Self {
        Self { id, location, goal: None, steps_taken: 0 }
    }
}

/// Owner of every place and agent in one engine.
#[derive(Clone, Debug)]
pub struct EntityStore {
    places:        Vec<Place>,
    agents:        Vec<Agent>,
    next_place_id: PlaceId,
    next_agent_id: AgentId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityStore {
    pub fn new() -> Self {
        Self {
            places:        Vec::new(),
            agents:        Vec::new(),
            next_place_id: PlaceId::FIRST,
            next_agent_id: AgentId::FIRST,
        }
    }

    // ── Insertion ─────────────────────────────────────────────────────────

    /// Store a place and return its freshly allocated id.
    pub fn add_place(&mut self, kind: PlaceKind, location: GridPoint) -> PlaceId {
        let id = self.next_place_id;
        self.next_place_id = id.next();
        debug_assert_eq!(id.slot(), self.places.len());
        self.places.push(Place { id, kind, location });
        id
    }

    /// Store an agent (no goal, zero steps) and return its freshly
    /// allocated id.
    pub fn add_agent(&mut self, location: GridPoint) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id = id.next();
        debug_assert_eq!(id.slot(), self.agents.len());
        self.agents.push(Agent::new(id, location));
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn place(&self, id: PlaceId) -> Option<&Place> {
        place_in(&self.places, id)
    }

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        if id.0 == 0 {
            return None;
        }
        self.agents.get(id.slot())
    }

    /// `true` if `id` names a stored place.
    #[inline]
    pub fn contains_place(&self, id: PlaceId) -> bool {
        self.place(id).is_some()
    }

    /// Location of the agent's goal, if the goal is set and still a place.
    #[inline]
    pub fn goal_location(&self, agent: &Agent) -> Option<GridPoint> {
        agent.goal.and_then(|g| self.place(g)).map(|p| p.location)
    }

    /// All places in ascending id order.
    #[inline]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// All agents in ascending id (insertion) order.
    #[inline]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Shared places plus mutable agents, for the stepper.  The two live in
    /// separate fields so the borrows are disjoint.
    pub(crate) fn split_mut(&mut self) -> (&[Place], &mut [Agent]) {
        (&self.places, &mut self.agents)
    }

    #[inline]
    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// The id the next `add_place` call will return.
    pub fn next_place_id(&self) -> PlaceId {
        self.next_place_id
    }

    /// The id the next `add_agent` call will return.
    pub fn next_agent_id(&self) -> AgentId {
        self.next_agent_id
    }
}

/// Arena lookup shared by `EntityStore::place` and the stepper.
#[inline]
pub(crate) fn place_in(places: &[Place], id: PlaceId) -> Option<&Place> {
    if id.0 == 0 {
        return None;
    }
    places.get(id.slot())
}
