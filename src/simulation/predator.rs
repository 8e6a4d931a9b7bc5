//! Predator policy: chase the closest visible prey, otherwise wander.
//! Predators hunt to reproduce and die of old age.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Mode};
use super::behavior::Behavior;
use super::geometric_utils::{length, normalize};
use super::locatable::Locatable;
use super::mutation::Species;
use super::params::Params;
use super::prey::Prey;

/// A predator agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predator {
    /// Shared agent state.
    pub agent: Agent,
    /// Successful captures so far.
    pub hunts: u32,
}

impl Predator {
    /// Creates a seed predator from the configured trait ranges.
    pub fn new_random(id: usize, params: &Params, rng: &mut impl Rng) -> Self {
        Self {
            agent: Agent::new_random(
                id,
                &params.predator_sight_range,
                &params.predator_speed_range,
                params.predator_lifespan,
                params.predator_color,
                params.world_size,
                rng,
            ),
            hunts: 0,
        }
    }

    /// Capture radius, proportional to the predator's own speed.
    pub fn capture_radius(&self, params: &Params) -> f32 {
        self.agent.speed * params.capture_factor
    }

    /// Looks for the closest prey in the whole live set and reports its
    /// index when it lies inside the capture radius.
    ///
    /// A successful capture increments `hunts` and resets the age counter.
    /// The caller removes the prey.
    pub fn try_capture(&mut self, prey: &[Prey], params: &Params) -> Option<usize> {
        let (idx, dist) = self.agent.closest_index(prey)?;
        if dist >= self.capture_radius(params) {
            return None;
        }

        self.hunts += 1;
        self.agent.age = 0;
        Some(idx)
    }

    /// Age at which a predator that has hunted may reproduce: a quarter of
    /// its lifespan (integer division). Unbounded lifespans impose no age gate.
    pub fn maturity_age(&self) -> u32 {
        self.agent.lifespan.map_or(0, |lifespan| lifespan / 4)
    }

    /// At least one successful hunt and old enough.
    pub fn can_reproduce(&self) -> bool {
        self.hunts >= 1 && self.agent.age >= self.maturity_age()
    }

    /// Reached the end of its lifespan.
    pub fn is_expired(&self) -> bool {
        self.agent.is_expired()
    }
}

impl Behavior for Predator {
    const SPECIES: Species = Species::Predator;

    type Target = Prey;

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    fn from_agent(agent: Agent) -> Self {
        Self { agent, hunts: 0 }
    }

    fn wander_threshold(params: &Params) -> f32 {
        params.predator_wander_threshold
    }

    fn decide_direction(&mut self, visible: &[&Prey], _params: &Params) -> Mode {
        if let Some(target) = self.agent.closest_agent(visible.iter().copied()) {
            let offset = target.pos() - &self.agent.pos;
            // standing on the target: keep the previous heading
            if length(&offset) > 0.0 {
                self.agent.direction = normalize(&offset);
            }
        }
        Mode::Chasing
    }
}

impl Locatable for Predator {
    fn id(&self) -> usize {
        self.agent.id
    }

    fn pos(&self) -> &Array1<f32> {
        &self.agent.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.agent.pos
    }
}
