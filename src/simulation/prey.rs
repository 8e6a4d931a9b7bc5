//! Prey policy: flee visible predators, otherwise wander.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::{Agent, Mode};
use super::behavior::Behavior;
use super::geometric_utils::{distance, zero};
use super::locatable::Locatable;
use super::mutation::Species;
use super::params::{FleeWeighting, Params};
use super::predator::Predator;

/// A prey agent. Reproduction is only ever triggered by the ecosystem's
/// periodic breeding pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    /// Shared agent state.
    pub agent: Agent,
}

impl Prey {
    /// Creates a seed prey from the configured trait ranges.
    pub fn new_random(id: usize, params: &Params, rng: &mut impl Rng) -> Self {
        Self {
            agent: Agent::new_random(
                id,
                &params.prey_sight_range,
                &params.prey_speed_range,
                params.prey_lifespan,
                params.prey_color,
                params.world_size,
                rng,
            ),
        }
    }

    /// Selection score, `speed + sight`.
    pub fn fitness(&self) -> f32 {
        self.agent.fitness()
    }
}

/// Escape heading away from `threats`.
///
/// Each threat contributes the vector pointing away from it. With
/// [`FleeWeighting::InverseDistance`] that is the unit vector scaled by
/// `1 / distance`, so close predators dominate and the magnitude grows with
/// urgency; with [`FleeWeighting::Unit`] every threat counts the same. The sum
/// is left unnormalized. Threats sitting exactly on the prey give no direction
/// and are skipped.
pub fn flee_direction(
    pos: &Array1<f32>,
    threats: &[&Array1<f32>],
    weighting: FleeWeighting,
) -> Array1<f32> {
    let mut direction = zero();
    for threat in threats {
        let dist = distance(pos, threat);
        if dist > 0.0 {
            let scale = match weighting {
                FleeWeighting::InverseDistance => 1.0 / (dist * dist),
                FleeWeighting::Unit => 1.0 / dist,
            };
            direction.scaled_add(scale, &(pos - *threat));
        }
    }
    direction
}

impl Behavior for Prey {
    const SPECIES: Species = Species::Prey;

    type Target = Predator;

    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }

    fn from_agent(agent: Agent) -> Self {
        Self { agent }
    }

    fn wander_threshold(params: &Params) -> f32 {
        params.prey_wander_threshold
    }

    fn decide_direction(&mut self, visible: &[&Predator], params: &Params) -> Mode {
        let threats: Vec<&Array1<f32>> = visible.iter().map(|p| p.pos()).collect();
        self.agent.direction = flee_direction(&self.agent.pos, &threats, params.flee_weighting);
        Mode::Fleeing
    }
}

impl Locatable for Prey {
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
