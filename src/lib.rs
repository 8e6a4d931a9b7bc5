//! # Huntsim - Predator-Prey Simulation
//!
//! A discrete-time simulation of prey and predators on a square, wrap-around
//! plane. Prey flee the predators they see, predators chase the closest prey
//! they see, and both species pass mutated speed and sight to their offspring.
//!
//! ## Features
//!
//! - Sight-limited perception with toroidal movement
//! - Flee and chase policies with random wandering
//! - Immediate predator reproduction, periodic fitness-ranked prey breeding
//! - Per-species mutation statistics reported once per breeding window
//! - Population caps and a predator:prey balance safeguard
//! - CSV and JSON export of run statistics
//!
//! ## Core Modules
//!
//! - [`simulation::agent`] - State shared by both species
//! - [`simulation::prey`] / [`simulation::predator`] - Movement policies
//! - [`simulation::mutation`] - Trait perturbation and its bookkeeping
//! - [`simulation::ecosystem`] - Per-step orchestration

/// Core simulation logic and data structures.
pub mod simulation {
    /// Shared agent state and perception queries.
    pub mod agent;
    /// Per-species movement policy, hooked into the shared step.
    pub mod behavior;
    /// Population controller.
    pub mod ecosystem;
    /// Configuration and export errors.
    pub mod error;
    /// Bounded log of recent simulation events.
    pub mod event_log;
    /// CSV and JSON export of run statistics.
    pub mod export;
    /// Vector helpers on the wrap-around plane.
    pub mod geometric_utils;
    /// Trait for entities with an identity and a position.
    pub mod locatable;
    /// Trait mutation and mutation statistics.
    pub mod mutation;
    /// Simulation parameters.
    pub mod params;
    /// Chasing agents.
    pub mod predator;
    /// Fleeing agents.
    pub mod prey;
    /// Renderer-facing view of agents.
    pub mod render;
    /// Per-step statistics records.
    pub mod stats;
    /// Early-stop flag.
    pub mod stop;
}
