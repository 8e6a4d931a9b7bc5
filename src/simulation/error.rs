//! Error types surfaced to callers.
//!
//! Numeric degeneracies inside a running simulation (empty populations,
//! zero-length vectors, traits below the floor) are corrected silently and
//! never show up here. Only configuration and export problems do.

use thiserror::Error;

/// Invalid configuration detected before a run starts.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The world side length must be finite and positive.
    #[error("world_size must be a positive finite number, got {0}")]
    InvalidWorldSize(f32),
    /// A population cap was zero.
    #[error("{name} must be greater than zero")]
    ZeroCap {
        /// Name of the offending knob.
        name: &'static str,
    },
    /// An initial population exceeds its cap.
    #[error("{name} ({initial}) exceeds its cap ({cap})")]
    InitialAboveCap {
        /// Name of the offending knob.
        name: &'static str,
        /// Configured initial population.
        initial: usize,
        /// Configured cap.
        cap: usize,
    },
    /// A trait range is empty, inverted, not finite, or dips below the trait floor.
    #[error("{name} range [{min}, {max}] is invalid (trait floor {floor})")]
    InvalidTraitRange {
        /// Name of the offending range.
        name: &'static str,
        /// Lower bound.
        min: f32,
        /// Upper bound.
        max: f32,
        /// Minimum viable trait value.
        floor: f32,
    },
    /// A probability knob lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability {
        /// Name of the offending knob.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// A strictly positive knob was zero, negative, or not finite.
    #[error("{name} must be positive, got {value}")]
    NonPositive {
        /// Name of the offending knob.
        name: &'static str,
        /// Configured value.
        value: f32,
    },
    /// An interval or divisor was zero.
    #[error("{name} must be at least 1")]
    ZeroInterval {
        /// Name of the offending knob.
        name: &'static str,
    },
    /// Predators need a bounded lifespan of at least four steps so that the
    /// quarter-lifespan maturity gate is meaningful.
    #[error("predator_lifespan must be bounded and at least 4, got {0:?}")]
    InvalidPredatorLifespan(Option<u32>),
}

/// Failure while writing statistics or configuration to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON encoding or decoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The loaded configuration did not validate.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
