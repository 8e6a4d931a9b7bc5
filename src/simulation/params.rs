use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ExportError};

/// RGB color carried by agents for rendering only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Default prey color.
    pub const BROWN: Self = Self::new(165, 42, 42);
    /// Default predator color.
    pub const GREY: Self = Self::new(128, 128, 128);

    /// Creates a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Closed interval that initial trait values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitRange {
    /// Lower bound (inclusive).
    pub min: f32,
    /// Upper bound (inclusive).
    pub max: f32,
}

impl TraitRange {
    /// Creates a new range.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value uniformly from the range.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        rng.random_range(self.min..=self.max)
    }

    fn validate(&self, name: &'static str, floor: f32) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max || self.min < floor
        {
            return Err(ConfigError::InvalidTraitRange {
                name,
                min: self.min,
                max: self.max,
                floor,
            });
        }
        Ok(())
    }
}

/// How fleeing prey weigh the predators they see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FleeWeighting {
    /// Unit vector away from each predator scaled by `1 / distance`.
    #[default]
    InverseDistance,
    /// Unit vector away from each predator, unweighted.
    Unit,
}

/// Knobs of the mutation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationParams {
    /// Probability that a single trait draw mutates.
    pub rate: f32,
    /// Half-width of the uniform perturbation `[-strength, strength]`.
    pub strength: f32,
    /// Minimum viable trait value after mutation.
    pub trait_floor: f32,
}

impl Default for MutationParams {
    fn default() -> Self {
        Self {
            rate: 0.3,
            strength: 0.5,
            trait_floor: 0.1,
        }
    }
}

/// Simulation parameters. Immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Side length of the square, wrap-around world.
    pub world_size: f32,
    /// Number of prey in the seed population.
    pub initial_prey: usize,
    /// Number of predators in the seed population.
    pub initial_predators: usize,
    /// Maximum prey population (hard cap).
    pub max_prey: usize,
    /// Maximum predator population (hard cap).
    pub max_predators: usize,
    /// Initial prey sight radius range.
    pub prey_sight_range: TraitRange,
    /// Initial prey speed range.
    pub prey_speed_range: TraitRange,
    /// Initial predator sight radius range.
    pub predator_sight_range: TraitRange,
    /// Initial predator speed range.
    pub predator_speed_range: TraitRange,
    /// Prey lifespan in steps. Carried to offspring, never enforced. `None` is unbounded.
    pub prey_lifespan: Option<u32>,
    /// Predator lifespan in steps.
    pub predator_lifespan: Option<u32>,
    /// A wandering prey picks a new heading when a uniform draw exceeds this.
    pub prey_wander_threshold: f32,
    /// A wandering predator picks a new heading when a uniform draw exceeds this.
    pub predator_wander_threshold: f32,
    /// Weighting of visible predators in the flee heading.
    pub flee_weighting: FleeWeighting,
    /// Capture radius as a multiple of the predator's own speed.
    pub capture_factor: f32,
    /// Steps between prey reproduction passes.
    pub reproduction_interval: u64,
    /// Minimum prey age (steps) for reproduction.
    pub prey_maturity_age: u32,
    /// The fittest `1 / breeding_divisor` of the prey are breeding candidates.
    pub breeding_divisor: usize,
    /// Predators are trimmed down to `predator_ratio_limit × prey`.
    pub predator_ratio_limit: usize,
    /// A predator is injected when prey exceed `prey_ratio_limit × predators`.
    pub prey_ratio_limit: usize,
    /// Enables the predator trim and injection safeguard.
    pub balance_enabled: bool,
    /// Mutation engine knobs.
    pub mutation: MutationParams,
    /// Color given to seeded prey.
    pub prey_color: Color,
    /// Color given to seeded predators.
    pub predator_color: Color,
    /// Constant radius handed to the renderer for every agent.
    pub visual_radius: f32,
    /// Step budget of a run.
    pub max_steps: u64,
    /// End the run as soon as either species is extinct.
    pub stop_on_extinction: bool,
    /// Steps between population summaries in the log.
    pub stats_interval: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_size: 1000.0,
            initial_prey: 60,
            initial_predators: 20,
            max_prey: 150,
            max_predators: 100,
            prey_sight_range: TraitRange::new(150.0, 200.0),
            prey_speed_range: TraitRange::new(10.0, 15.0),
            predator_sight_range: TraitRange::new(250.0, 300.0),
            predator_speed_range: TraitRange::new(15.0, 20.0),
            prey_lifespan: Some(100),
            predator_lifespan: Some(100),
            prey_wander_threshold: 0.4,
            predator_wander_threshold: 0.6,
            flee_weighting: FleeWeighting::InverseDistance,
            capture_factor: 1.5,
            reproduction_interval: 10,
            prey_maturity_age: 10,
            breeding_divisor: 3,
            predator_ratio_limit: 2,
            prey_ratio_limit: 4,
            balance_enabled: true,
            mutation: MutationParams::default(),
            prey_color: Color::BROWN,
            predator_color: Color::GREY,
            visual_radius: 10.0,
            max_steps: 500,
            stop_on_extinction: false,
            stats_interval: 50,
        }
    }
}

impl Params {
    /// Checks every knob and reports the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.world_size.is_finite() || self.world_size <= 0.0 {
            return Err(ConfigError::InvalidWorldSize(self.world_size));
        }

        if self.max_prey == 0 {
            return Err(ConfigError::ZeroCap { name: "max_prey" });
        }
        if self.max_predators == 0 {
            return Err(ConfigError::ZeroCap {
                name: "max_predators",
            });
        }
        if self.initial_prey > self.max_prey {
            return Err(ConfigError::InitialAboveCap {
                name: "initial_prey",
                initial: self.initial_prey,
                cap: self.max_prey,
            });
        }
        if self.initial_predators > self.max_predators {
            return Err(ConfigError::InitialAboveCap {
                name: "initial_predators",
                initial: self.initial_predators,
                cap: self.max_predators,
            });
        }

        let floor = self.mutation.trait_floor;
        positive("mutation.trait_floor", floor)?;
        self.prey_sight_range.validate("prey_sight_range", floor)?;
        self.prey_speed_range.validate("prey_speed_range", floor)?;
        self.predator_sight_range
            .validate("predator_sight_range", floor)?;
        self.predator_speed_range
            .validate("predator_speed_range", floor)?;

        match self.predator_lifespan {
            Some(lifespan) if lifespan >= 4 => {}
            other => return Err(ConfigError::InvalidPredatorLifespan(other)),
        }

        probability("prey_wander_threshold", self.prey_wander_threshold)?;
        probability("predator_wander_threshold", self.predator_wander_threshold)?;
        probability("mutation.rate", self.mutation.rate)?;
        positive("mutation.strength", self.mutation.strength)?;
        positive("capture_factor", self.capture_factor)?;
        positive("visual_radius", self.visual_radius)?;

        if self.reproduction_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "reproduction_interval",
            });
        }
        if self.breeding_divisor == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "breeding_divisor",
            });
        }
        if self.stats_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                name: "stats_interval",
            });
        }

        Ok(())
    }

    /// Loads parameters from a JSON file and validates them.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

fn probability(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
