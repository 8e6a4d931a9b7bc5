//! Per-step statistics records handed to export collaborators.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::mutation::{MutationStats, Species};
use super::predator::Predator;
use super::prey::Prey;

/// Population snapshot emitted at the end of every step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    /// Step index, starting at 0.
    pub step: u64,
    /// Live prey.
    pub prey_count: usize,
    /// Mean prey speed.
    pub prey_speed_avg: f32,
    /// Mean prey sight.
    pub prey_sight_avg: f32,
    /// Mean prey fitness (`speed + sight`).
    pub prey_fitness_avg: f32,
    /// Mean prey generation.
    pub prey_generation_avg: f32,
    /// Live predators.
    pub predator_count: usize,
    /// Mean predator speed.
    pub predator_speed_avg: f32,
    /// Mean predator sight.
    pub predator_sight_avg: f32,
    /// Mean predator fitness (`speed + sight`).
    pub predator_fitness_avg: f32,
    /// Mean predator generation.
    pub predator_generation_avg: f32,
}

/// Trait averages of one species. All zero for an empty population.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Averages {
    speed: f32,
    sight: f32,
    generation: f32,
}

impl Averages {
    fn of<'a>(agents: impl ExactSizeIterator<Item = &'a Agent>) -> Self {
        let n = agents.len();
        if n == 0 {
            return Self::default();
        }

        let (speed, sight, generation) = agents.fold((0.0, 0.0, 0.0), |(sp, si, ge), a| {
            (sp + a.speed, si + a.sight, ge + a.generation as f32)
        });
        Self {
            speed: speed / n as f32,
            sight: sight / n as f32,
            generation: generation / n as f32,
        }
    }
}

impl PopulationRecord {
    /// Builds the record from the live populations.
    pub fn capture(step: u64, prey: &[Prey], predators: &[Predator]) -> Self {
        let p = Averages::of(prey.iter().map(|p| &p.agent));
        let w = Averages::of(predators.iter().map(|p| &p.agent));

        Self {
            step,
            prey_count: prey.len(),
            prey_speed_avg: p.speed,
            prey_sight_avg: p.sight,
            prey_fitness_avg: p.speed + p.sight,
            prey_generation_avg: p.generation,
            predator_count: predators.len(),
            predator_speed_avg: w.speed,
            predator_sight_avg: w.sight,
            predator_fitness_avg: w.speed + w.sight,
            predator_generation_avg: w.generation,
        }
    }
}

/// Mutation digest emitted on every reproduction cadence step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationRecord {
    /// Step index the window closed on.
    pub step: u64,
    /// Prey mutation events in the window.
    pub prey_mutation_count: u32,
    /// Prey mutation events per trait draw.
    pub prey_mutation_rate: f32,
    /// Mean `|delta|` of prey speed mutations.
    pub prey_mutation_speed_avg: f32,
    /// Mean `|delta|` of prey sight mutations.
    pub prey_mutation_sight_avg: f32,
    /// Predator mutation events in the window.
    pub predator_mutation_count: u32,
    /// Predator mutation events per trait draw.
    pub predator_mutation_rate: f32,
    /// Mean `|delta|` of predator speed mutations.
    pub predator_mutation_speed_avg: f32,
    /// Mean `|delta|` of predator sight mutations.
    pub predator_mutation_sight_avg: f32,
}

impl MutationRecord {
    /// Condenses a mutation window.
    pub fn from_stats(step: u64, stats: &MutationStats) -> Self {
        let prey = stats.summary(Species::Prey);
        let predator = stats.summary(Species::Predator);

        Self {
            step,
            prey_mutation_count: prey.count,
            prey_mutation_rate: prey.rate,
            prey_mutation_speed_avg: prey.speed_avg,
            prey_mutation_sight_avg: prey.sight_avg,
            predator_mutation_count: predator.count,
            predator_mutation_rate: predator.rate,
            predator_mutation_speed_avg: predator.speed_avg,
            predator_mutation_sight_avg: predator.sight_avg,
        }
    }
}

/// Cumulative event counters over a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    /// Prey consumed by predators.
    pub captures: u64,
    /// Prey offspring produced.
    pub prey_births: u64,
    /// Predator offspring produced.
    pub predator_births: u64,
    /// Predators removed at the end of their lifespan.
    pub predator_deaths: u64,
    /// Predators dropped by the population-balance trim.
    pub predators_trimmed: u64,
    /// Freshly seeded predators injected to check prey growth.
    pub predators_injected: u64,
}

/// Everything emitted by one step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    /// End-of-step population snapshot.
    pub population: PopulationRecord,
    /// Present on reproduction cadence steps.
    pub mutation: Option<MutationRecord>,
    /// A predator was injected by the balance safeguard this step.
    pub predator_injected: bool,
}

/// Accumulated records of a run, in step order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// One record per step.
    pub population: Vec<PopulationRecord>,
    /// One record per reproduction cadence step.
    pub mutation: Vec<MutationRecord>,
}

impl StatsHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of one step.
    pub fn push(&mut self, report: &StepReport) {
        self.population.push(report.population.clone());
        if let Some(mutation) = &report.mutation {
            self.mutation.push(mutation.clone());
        }
    }
}
