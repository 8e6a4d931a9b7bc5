//! Capability interface shared by the two species.
//!
//! The variant set is closed: [`super::prey::Prey`] and
//! [`super::predator::Predator`] are the only implementors. Each supplies the
//! reaction to whatever it is looking for; perception, wandering, movement
//! and reproduction follow the same steps for both.

use rand::Rng;

use super::agent::{Agent, Mode};
use super::locatable::Locatable;
use super::mutation::{MutationStats, Species};
use super::params::Params;

/// Per-step policy of a species.
pub trait Behavior: Locatable + Sized {
    /// Species tag used for mutation bookkeeping.
    const SPECIES: Species;

    /// What this species looks for.
    type Target: Locatable;

    /// Shared agent state.
    fn agent(&self) -> &Agent;

    /// Mutable shared agent state.
    fn agent_mut(&mut self) -> &mut Agent;

    /// Wraps an agent (e.g. a freshly built offspring) into the species.
    fn from_agent(agent: Agent) -> Self;

    /// Wander threshold of this species.
    fn wander_threshold(params: &Params) -> f32;

    /// Sets the heading in reaction to at least one visible target and
    /// returns the resulting mode.
    fn decide_direction(&mut self, visible: &[&Self::Target], params: &Params) -> Mode;

    /// Every target strictly within sight.
    fn perceive<'a>(&self, targets: &'a [Self::Target]) -> Vec<&'a Self::Target> {
        self.agent().agents_in_sight(targets)
    }

    /// One step of the policy: age, look, pick a heading, move, wrap.
    fn step_move(&mut self, targets: &[Self::Target], params: &Params, rng: &mut impl Rng) -> Mode {
        self.agent_mut().age += 1;

        let visible = self.perceive(targets);
        let mode = if visible.is_empty() {
            self.agent_mut().wander(Self::wander_threshold(params), rng);
            Mode::Wandering
        } else {
            self.decide_direction(&visible, params)
        };
        self.agent_mut().mode = mode;

        self.agent_mut().advance(params.world_size);
        mode
    }

    /// Produces one offspring through the mutation engine.
    fn reproduce(
        &self,
        id: usize,
        params: &Params,
        stats: &mut MutationStats,
        rng: &mut impl Rng,
    ) -> Self {
        Self::from_agent(self.agent().offspring(id, Self::SPECIES, params, stats, rng))
    }
}
