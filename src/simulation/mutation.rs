//! Mutation engine and the bookkeeping that goes with it.
//!
//! [`mutate_trait`] is the only path by which heritable traits change between
//! generations. The math is blind to species and trait, the bookkeeping in
//! [`MutationStats`] is not.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::params::MutationParams;

/// The two simulated species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Deer-like agents that flee and breed in periodic batches.
    Prey,
    /// Wolf-like agents that chase, hunt, and age out.
    Predator,
}

impl Species {
    /// Lowercase label used as column prefix in exported records.
    pub fn label(self) -> &'static str {
        match self {
            Self::Prey => "prey",
            Self::Predator => "predator",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Prey => 0,
            Self::Predator => 1,
        }
    }
}

/// Heritable traits subject to mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    /// Per-step displacement magnitude.
    Speed,
    /// Detection radius.
    Sight,
}

impl TraitKind {
    fn index(self) -> usize {
        match self {
            Self::Speed => 0,
            Self::Sight => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct TraitTally {
    events: u32,
    magnitude: f32,
}

/// Mutation accumulators for one accounting window.
///
/// Owned by the ecosystem, reset after every report, and only written to by
/// [`mutate_trait`] and [`MutationStats::record_offspring`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationStats {
    /// Indexed by `[species][trait]`.
    tallies: [[TraitTally; 2]; 2],
    /// Offspring produced per species in this window.
    offspring: [u32; 2],
}

impl MutationStats {
    /// Creates empty accumulators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears every accumulator, starting a new window.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records one mutation event of magnitude `|delta|`.
    pub fn record(&mut self, species: Species, kind: TraitKind, delta: f32) {
        let tally = &mut self.tallies[species.index()][kind.index()];
        tally.events += 1;
        tally.magnitude += delta.abs();
    }

    /// Records that one offspring of `species` was produced.
    pub fn record_offspring(&mut self, species: Species) {
        self.offspring[species.index()] += 1;
    }

    /// Number of mutation events for a (species, trait) pair.
    pub fn events(&self, species: Species, kind: TraitKind) -> u32 {
        self.tallies[species.index()][kind.index()].events
    }

    /// Summed absolute mutation magnitude for a (species, trait) pair.
    pub fn magnitude(&self, species: Species, kind: TraitKind) -> f32 {
        self.tallies[species.index()][kind.index()].magnitude
    }

    /// Total mutation events across both traits of a species.
    pub fn total_events(&self, species: Species) -> u32 {
        self.events(species, TraitKind::Speed) + self.events(species, TraitKind::Sight)
    }

    /// Offspring of `species` produced in this window.
    pub fn offspring(&self, species: Species) -> u32 {
        self.offspring[species.index()]
    }

    /// Condenses the window for one species.
    ///
    /// Denominators are floored at 1 so an empty window yields zeros. The rate
    /// is events per trait draw (two draws per offspring).
    pub fn summary(&self, species: Species) -> MutationSummary {
        let count = self.total_events(species);
        let draws = (self.offspring(species) * 2).max(1);
        let average = |kind: TraitKind| {
            self.magnitude(species, kind) / self.events(species, kind).max(1) as f32
        };

        MutationSummary {
            count,
            rate: count as f32 / draws as f32,
            speed_avg: average(TraitKind::Speed),
            sight_avg: average(TraitKind::Sight),
        }
    }
}

/// Per-species digest of a mutation window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MutationSummary {
    /// Number of mutation events.
    pub count: u32,
    /// Events per trait draw.
    pub rate: f32,
    /// Mean `|delta|` of speed mutations.
    pub speed_avg: f32,
    /// Mean `|delta|` of sight mutations.
    pub sight_avg: f32,
}

/// Passes one trait value through the mutation engine.
///
/// With probability `params.rate` a delta is drawn uniformly from
/// `[-strength, strength]`, the value becomes `max(trait_floor, value + delta)`
/// and the event is recorded in `stats`. Otherwise `value` is returned
/// unchanged and nothing is recorded.
pub fn mutate_trait(
    value: f32,
    species: Species,
    kind: TraitKind,
    params: &MutationParams,
    stats: &mut MutationStats,
    rng: &mut impl Rng,
) -> f32 {
    if rng.random::<f32>() >= params.rate {
        return value;
    }

    let delta = rng.random_range(-params.strength..=params.strength);
    stats.record(species, kind, delta);
    (value + delta).max(params.trait_floor)
}
