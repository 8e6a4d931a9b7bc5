//! Shared agent state and perception primitives.
//!
//! Both species wrap an [`Agent`]; everything that is the same for prey and
//! predators (traits, lifecycle counters, perception, movement) lives here.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{distance, length, random_direction, wrap_around_mut};
use super::locatable::Locatable;
use super::mutation::{MutationStats, Species, TraitKind, mutate_trait};
use super::params::{Color, Params, TraitRange};

/// What an agent did with its heading in the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Nothing of interest in sight; random walk.
    #[default]
    Wandering,
    /// Prey running from visible predators.
    Fleeing,
    /// Predator running at the closest visible prey.
    Chasing,
}

/// State common to every simulated organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier, shared namespace across species.
    pub id: usize,
    /// Detection radius in world units.
    pub sight: f32,
    /// Displacement per step along the heading.
    pub speed: f32,
    /// Position in `[0, world_size)²`.
    pub pos: Array1<f32>,
    /// Current heading. Unit length, zero, or (for fleeing prey) unnormalized.
    pub direction: Array1<f32>,
    /// Steps survived since birth or since the last reset event.
    pub age: u32,
    /// Maximum age before removal, `None` for unbounded.
    pub lifespan: Option<u32>,
    /// Number of reproduction events in this lineage.
    pub generation: u32,
    /// Rendering color, inherited verbatim.
    pub color: Color,
    /// Behavior chosen in the last step.
    pub mode: Mode,
}

impl Agent {
    /// Creates an agent at `pos` with a random heading.
    pub fn new(
        id: usize,
        sight: f32,
        speed: f32,
        lifespan: Option<u32>,
        color: Color,
        pos: Array1<f32>,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            id,
            sight,
            speed,
            pos,
            direction: random_direction(rng),
            age: 0,
            lifespan,
            generation: 0,
            color,
            mode: Mode::Wandering,
        }
    }

    /// Creates a seed agent with traits drawn from the given ranges and a
    /// random position anywhere in the world.
    pub fn new_random(
        id: usize,
        sight_range: &TraitRange,
        speed_range: &TraitRange,
        lifespan: Option<u32>,
        color: Color,
        world_size: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let sight = sight_range.sample(rng);
        let speed = speed_range.sample(rng);
        let pos = random_position(world_size, rng);
        Self::new(id, sight, speed, lifespan, color, pos, rng)
    }

    /// Prey selection score.
    pub fn fitness(&self) -> f32 {
        self.speed + self.sight
    }

    /// Checks whether the agent has reached its lifespan.
    pub fn is_expired(&self) -> bool {
        self.lifespan.is_some_and(|lifespan| self.age >= lifespan)
    }

    /// Returns every other entity strictly within sight, in input order.
    pub fn agents_in_sight<'a, T: Locatable>(&self, others: &'a [T]) -> Vec<&'a T> {
        others
            .iter()
            .filter(|other| other.id() != self.id && distance(&self.pos, other.pos()) < self.sight)
            .collect()
    }

    /// Returns the nearest other entity, or `None` when there is none.
    ///
    /// Ties go to the first entity encountered.
    pub fn closest_agent<'a, T, I>(&self, others: I) -> Option<&'a T>
    where
        T: Locatable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.nearest(others).map(|(_, other, _)| other)
    }

    /// Like [`Agent::closest_agent`] over a slice, returning the index and distance.
    pub fn closest_index<T: Locatable>(&self, others: &[T]) -> Option<(usize, f32)> {
        self.nearest(others).map(|(i, _, dist)| (i, dist))
    }

    /// Position in the input, entity and distance of the nearest other entity.
    /// A later entity only wins when strictly closer.
    fn nearest<'a, T, I>(&self, others: I) -> Option<(usize, &'a T, f32)>
    where
        T: Locatable + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        others
            .into_iter()
            .enumerate()
            .filter(|(_, other)| other.id() != self.id)
            .map(|(i, other)| (i, other, distance(&self.pos, other.pos())))
            .fold(None, |best: Option<(usize, &'a T, f32)>, (i, other, dist)| match best {
                Some((_, _, best_dist)) if best_dist <= dist => best,
                _ => Some((i, other, dist)),
            })
    }

    /// With probability `1 - threshold` picks a new random heading, otherwise
    /// keeps the current one.
    pub fn wander(&mut self, threshold: f32, rng: &mut impl Rng) {
        if rng.random::<f32>() > threshold {
            self.direction = random_direction(rng);
        }
        self.mode = Mode::Wandering;
    }

    /// Moves `speed` along the current heading and wraps around the world edges.
    ///
    /// An unnormalized heading (fleeing prey right next to a predator) can ask
    /// for more than one world side per step; the displacement is shortened to
    /// `world_size` along the same heading so a single wrap keeps the position
    /// inside `[0, world_size)`.
    pub fn advance(&mut self, world_size: f32) {
        let reach = self.speed * length(&self.direction);
        let scale = if reach > world_size {
            self.speed * world_size / reach
        } else {
            self.speed
        };
        self.pos.scaled_add(scale, &self.direction);
        wrap_around_mut(&mut self.pos, world_size);
    }

    /// Produces an offspring agent.
    ///
    /// Sight and speed each pass through the mutation engine independently;
    /// lifespan and color are copied and the generation is incremented. The
    /// offspring is placed at a random position with a random heading.
    pub fn offspring(
        &self,
        id: usize,
        species: Species,
        params: &Params,
        stats: &mut MutationStats,
        rng: &mut impl Rng,
    ) -> Self {
        let sight = mutate_trait(
            self.sight,
            species,
            TraitKind::Sight,
            &params.mutation,
            stats,
            rng,
        );
        let speed = mutate_trait(
            self.speed,
            species,
            TraitKind::Speed,
            &params.mutation,
            stats,
            rng,
        );
        stats.record_offspring(species);

        let pos = random_position(params.world_size, rng);
        let mut child = Self::new(id, sight, speed, self.lifespan, self.color, pos, rng);
        child.generation = self.generation + 1;
        child
    }
}

impl Locatable for Agent {
    fn id(&self) -> usize {
        self.id
    }

    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}

/// Uniformly random position inside the world square, drawn from `rng`.
pub fn random_position(world_size: f32, rng: &mut impl Rng) -> Array1<f32> {
    Array1::from_shape_fn(2, |_| rng.random_range(0.0..world_size))
}
