//! Population controller: advances the world one discrete step at a time.
//!
//! Within a step the order of effects is fixed:
//! 1. every prey moves (flee or wander),
//! 2. every predator that was alive at the start of the step moves, tries to
//!    capture, may reproduce and may die; captures are visible to the
//!    predators that follow in the same pass,
//! 3. on the reproduction cadence the fittest mature prey breed and the
//!    mutation window is reported and reset,
//! 4. the population-balance safeguard trims or injects predators,
//! 5. a population record is emitted.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::behavior::Behavior;
use super::error::ConfigError;
use super::event_log::{EventKind, EventLog};
use super::locatable::Locatable;
use super::mutation::{MutationStats, Species};
use super::params::Params;
use super::predator::Predator;
use super::prey::Prey;
use super::render::Sprite;
use super::stats::{Counters, MutationRecord, PopulationRecord, StepReport};
use super::stop::StopSignal;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The configured number of steps was simulated.
    StepBudget,
    /// The stop signal was raised.
    StopRequested,
    /// A species died out (only with `stop_on_extinction`).
    Extinction(Species),
}

/// Outcome of [`Ecosystem::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps simulated by this run.
    pub steps: u64,
    /// Why the run ended.
    pub reason: StopReason,
    /// Cumulative counters at the end of the run.
    pub counters: Counters,
}

/// The whole simulated world.
#[derive(Debug, Clone)]
pub struct Ecosystem {
    /// Live prey. Order only matters as a tie-break for closest-prey queries.
    pub prey: Vec<Prey>,
    /// Live predators, in evaluation order.
    pub predators: Vec<Predator>,
    /// Index of the next step to simulate.
    pub step: u64,
    /// Mutation accumulators of the current window.
    pub mutation_stats: MutationStats,
    /// Most recent events.
    pub event_log: EventLog,
    /// Cumulative counters.
    pub counters: Counters,
    /// Next identifier to hand out.
    next_id: usize,
}

impl Default for Ecosystem {
    fn default() -> Self {
        Self::empty()
    }
}

impl Ecosystem {
    /// Creates a world with the configured seed populations.
    pub fn new(params: &Params, rng: &mut impl Rng) -> Result<Self, ConfigError> {
        params.validate()?;

        let mut ecosystem = Self::empty();
        for _ in 0..params.initial_prey {
            let id = ecosystem.next_id();
            ecosystem.prey.push(Prey::new_random(id, params, rng));
        }
        for _ in 0..params.initial_predators {
            let id = ecosystem.next_id();
            ecosystem.predators.push(Predator::new_random(id, params, rng));
        }

        Ok(ecosystem)
    }

    /// Creates a world without agents.
    pub fn empty() -> Self {
        Self {
            prey: Vec::new(),
            predators: Vec::new(),
            step: 0,
            mutation_stats: MutationStats::new(),
            event_log: EventLog::default(),
            counters: Counters::default(),
            next_id: 0,
        }
    }

    /// Hands out a fresh agent identifier.
    pub fn next_id(&mut self) -> usize {
        allocate(&mut self.next_id)
    }

    /// Advances the simulation by one step.
    pub fn step(&mut self, params: &Params, rng: &mut impl Rng) -> StepReport {
        let step = self.step;

        self.move_prey(params, rng);
        self.hunt(params, rng);

        let mutation = (step % params.reproduction_interval == 0).then(|| {
            self.breed_prey(params, rng);
            self.close_mutation_window(step)
        });

        let predator_injected = self.balance(params, rng);

        self.step += 1;
        StepReport {
            population: PopulationRecord::capture(step, &self.prey, &self.predators),
            mutation,
            predator_injected,
        }
    }

    /// Runs until the step budget is spent, the stop signal is raised, or
    /// (with `stop_on_extinction`) a species dies out.
    ///
    /// `on_step` sees every report; the stop signal is checked once per step,
    /// before the step is simulated.
    pub fn run(
        &mut self,
        params: &Params,
        rng: &mut impl Rng,
        stop: &StopSignal,
        mut on_step: impl FnMut(&StepReport),
    ) -> RunSummary {
        info!(
            "Starting run: {} prey, {} predators, {} steps",
            self.prey.len(),
            self.predators.len(),
            params.max_steps
        );

        let start = self.step;
        let reason = loop {
            if self.step - start >= params.max_steps {
                break StopReason::StepBudget;
            }
            if stop.is_requested() {
                info!("Stop requested at step {}", self.step);
                break StopReason::StopRequested;
            }

            let report = self.step(params, rng);
            on_step(&report);

            let record = &report.population;
            if record.step % params.stats_interval == 0 {
                info!(
                    "step {}: prey={} (fitness {:.1}), predators={} (fitness {:.1})",
                    record.step,
                    record.prey_count,
                    record.prey_fitness_avg,
                    record.predator_count,
                    record.predator_fitness_avg
                );
            }

            if params.stop_on_extinction {
                if let Some(species) = self.extinct_species() {
                    warn!("{} extinct at step {}", species.label(), record.step);
                    self.event_log.log(
                        record.step,
                        format!("{} died out", species.label()),
                        EventKind::Extinction,
                    );
                    break StopReason::Extinction(species);
                }
            }
        };

        info!("Run finished after {} steps: {:?}", self.step - start, reason);
        RunSummary {
            steps: self.step - start,
            reason,
            counters: self.counters,
        }
    }

    /// First species with no live agents, prey checked first.
    pub fn extinct_species(&self) -> Option<Species> {
        if self.prey.is_empty() {
            Some(Species::Prey)
        } else if self.predators.is_empty() {
            Some(Species::Predator)
        } else {
            None
        }
    }

    /// Drawable view of every live agent, prey first.
    pub fn sprites(&self, params: &Params) -> impl Iterator<Item = Sprite> + '_ {
        let radius = params.visual_radius;
        let prey = self
            .prey
            .iter()
            .map(move |p| sprite(Species::Prey, &p.agent, radius));
        let predators = self
            .predators
            .iter()
            .map(move |p| sprite(Species::Predator, &p.agent, radius));
        prey.chain(predators)
    }

    fn move_prey(&mut self, params: &Params, rng: &mut impl Rng) {
        for prey in &mut self.prey {
            prey.step_move(&self.predators, params, rng);
        }
    }

    /// Predator pass over the predators alive at the start of the pass.
    ///
    /// Deaths are tombstoned and removed after the pass, newborns are appended
    /// after it and do not act until the next step. Captured prey are removed
    /// immediately.
    fn hunt(&mut self, params: &Params, rng: &mut impl Rng) {
        let step = self.step;
        let snapshot = self.predators.len();
        let mut expired = vec![false; snapshot];
        let mut newborn: Vec<Predator> = Vec::new();
        let mut deaths = 0;

        for (i, predator) in self.predators.iter_mut().enumerate() {
            predator.step_move(&self.prey, params, rng);

            if let Some(idx) = predator.try_capture(&self.prey, params) {
                let victim = self.prey.remove(idx);
                self.counters.captures += 1;
                self.event_log.log(
                    step,
                    format!("predator {} caught prey {}", predator.id(), victim.id()),
                    EventKind::Capture,
                );
            }

            let live = snapshot - deaths + newborn.len();
            if predator.can_reproduce() && live < params.max_predators {
                let id = allocate(&mut self.next_id);
                let child = predator.reproduce(id, params, &mut self.mutation_stats, rng);
                self.counters.predator_births += 1;
                self.event_log.log(
                    step,
                    format!(
                        "predator {} bore predator {} (generation {})",
                        predator.id(),
                        id,
                        child.agent.generation
                    ),
                    EventKind::Birth,
                );
                newborn.push(child);
            }

            if predator.is_expired() {
                expired[i] = true;
                deaths += 1;
                self.counters.predator_deaths += 1;
                self.event_log.log(
                    step,
                    format!("predator {} died of old age", predator.id()),
                    EventKind::Death,
                );
            }
        }

        let mut idx = 0;
        self.predators.retain(|_| {
            let keep = !expired[idx];
            idx += 1;
            keep
        });
        self.predators.extend(newborn);
    }

    /// Periodic prey reproduction: the fittest mature third of the prey each
    /// produce one offspring while there is room.
    fn breed_prey(&mut self, params: &Params, rng: &mut impl Rng) {
        let step = self.step;

        self.prey
            .sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
        let top = self.prey.len() / params.breeding_divisor;

        let mut offspring = Vec::new();
        for parent in self.prey[..top]
            .iter()
            .filter(|p| p.agent.age >= params.prey_maturity_age)
        {
            if self.prey.len() + offspring.len() >= params.max_prey {
                break;
            }
            let id = allocate(&mut self.next_id);
            offspring.push(parent.reproduce(id, params, &mut self.mutation_stats, rng));
        }

        if !offspring.is_empty() {
            self.counters.prey_births += offspring.len() as u64;
            self.event_log.log(
                step,
                format!("{} prey born", offspring.len()),
                EventKind::Birth,
            );
        }
        self.prey.extend(offspring);
    }

    /// Reports the mutation events accumulated since the previous cadence step
    /// and starts a new window.
    fn close_mutation_window(&mut self, step: u64) -> MutationRecord {
        let record = MutationRecord::from_stats(step, &self.mutation_stats);
        info!(
            "mutation window closed at step {}: prey {} events (rate {:.2}), predator {} events (rate {:.2})",
            step,
            record.prey_mutation_count,
            record.prey_mutation_rate,
            record.predator_mutation_count,
            record.predator_mutation_rate
        );
        self.mutation_stats.reset();
        record
    }

    /// Keeps the predator:prey ratio in bounds. Returns whether a predator was
    /// injected.
    fn balance(&mut self, params: &Params, rng: &mut impl Rng) -> bool {
        if !params.balance_enabled {
            return false;
        }
        let step = self.step;

        let limit = self.prey.len() * params.predator_ratio_limit;
        if self.predators.len() > limit {
            let trimmed = self.predators.len() - limit;
            self.predators.truncate(limit);
            self.counters.predators_trimmed += trimmed as u64;
            self.event_log.log(
                step,
                format!("trimmed {trimmed} predators"),
                EventKind::Trim,
            );
        }

        if self.prey.len() > self.predators.len() * params.prey_ratio_limit
            && self.predators.len() < params.max_predators
        {
            let id = allocate(&mut self.next_id);
            self.predators.push(Predator::new_random(id, params, rng));
            self.counters.predators_injected += 1;
            self.event_log.log(
                step,
                format!("injected predator {id}"),
                EventKind::Injection,
            );
            return true;
        }

        false
    }
}

fn allocate(next_id: &mut usize) -> usize {
    let id = *next_id;
    *next_id += 1;
    id
}

fn sprite(species: Species, agent: &Agent, radius: f32) -> Sprite {
    Sprite {
        species,
        pos: [agent.pos[0], agent.pos[1]],
        color: agent.color,
        radius,
    }
}
