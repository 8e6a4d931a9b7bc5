//! Geometric utility functions for distance calculations and toroidal wrapping.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;
use rand::Rng;

/// Calculates the Euclidean distance between two 2D positions.
///
/// # Arguments
///
/// * `a` - First position
/// * `b` - Second position
///
/// # Returns
///
/// The straight-line distance between `a` and `b`. Wrap-around is not
/// taken into account.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Returns the length of a 2D vector.
pub fn length(v: &Array1<f32>) -> f32 {
    v[0].hypot(v[1])
}

/// Normalizes a 2D vector to unit length.
///
/// A zero-length vector is returned unchanged.
pub fn normalize(v: &Array1<f32>) -> Array1<f32> {
    let len = length(v);
    if len > 0.0 { v / len } else { v.clone() }
}

/// Wraps a position vector around the world boundaries (toroidal topology).
///
/// Each axis gets a single correction: negative coordinates are shifted up by
/// `side`, coordinates at or beyond `side` are shifted down by `side`. A
/// displacement larger than `side` is therefore not fully wrapped;
/// [`Agent::advance`](super::agent::Agent::advance) caps each step at `side`.
///
/// # Arguments
///
/// * `v` - Mutable position vector to wrap
/// * `side` - Side length of the square world
pub fn wrap_around_mut(v: &mut Array1<f32>, side: f32) {
    for coord in v.iter_mut() {
        if *coord < 0.0 {
            *coord += side;
            // tiny negatives round up to exactly `side` in f32
            if *coord >= side {
                *coord = 0.0;
            }
        } else if *coord >= side {
            *coord -= side;
        }
    }
}

/// Picks a heading from the 8-connected neighbourhood plus the center.
///
/// Each axis is drawn independently from `{-1, 0, 1}` and the result is
/// normalized, so the zero vector (standing still) is a valid outcome.
pub fn random_direction(rng: &mut impl Rng) -> Array1<f32> {
    let x = rng.random_range(-1..=1) as f32;
    let y = rng.random_range(-1..=1) as f32;
    normalize(&Array1::from_vec(vec![x, y]))
}

/// The zero vector, used as "no heading".
pub fn zero() -> Array1<f32> {
    Array1::zeros(2)
}
