#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use huntsim::simulation::geometric_utils::{
    distance, length, normalize, random_direction, wrap_around_mut, zero,
};
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn vec2(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

#[test]
fn test_distance() {
    assert_eq!(distance(&vec2(0.0, 0.0), &vec2(3.0, 4.0)), 5.0);
    assert_eq!(distance(&vec2(7.0, 7.0), &vec2(7.0, 7.0)), 0.0);
}

#[test]
fn test_distance_ignores_wrap() {
    // Opposite edges are far apart even though the world wraps
    let d = distance(&vec2(1.0, 500.0), &vec2(999.0, 500.0));
    assert_eq!(d, 998.0);
}

#[test]
fn test_normalize() {
    let v = normalize(&vec2(3.0, 4.0));
    assert!((v[0] - 0.6).abs() < 1e-6);
    assert!((v[1] - 0.8).abs() < 1e-6);
    assert!((length(&v) - 1.0).abs() < 1e-6);
}

#[test]
fn test_normalize_zero_vector() {
    let v = normalize(&zero());
    assert_eq!(v, zero());
}

#[test]
fn test_wrap_around_both_edges() {
    let mut v = vec2(-5.0, 1005.0);
    wrap_around_mut(&mut v, 1000.0);
    assert_eq!(v, vec2(995.0, 5.0));
}

#[test]
fn test_wrap_around_upper_bound_is_exclusive() {
    let mut v = vec2(1000.0, 0.0);
    wrap_around_mut(&mut v, 1000.0);
    assert_eq!(v, vec2(0.0, 0.0));
}

#[test]
fn test_wrap_around_tiny_negative() {
    let mut v = vec2(-1e-8, 250.0);
    wrap_around_mut(&mut v, 1000.0);
    assert!(v[0] >= 0.0 && v[0] < 1000.0);
    assert_eq!(v[1], 250.0);
}

#[test]
fn test_wrap_around_inside_untouched() {
    let mut v = vec2(0.0, 999.5);
    wrap_around_mut(&mut v, 1000.0);
    assert_eq!(v, vec2(0.0, 999.5));
}

#[test]
fn test_random_direction_is_unit_or_zero() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut saw_zero = false;
    let mut saw_diagonal = false;

    for _ in 0..500 {
        let d = random_direction(&mut rng);
        let len = length(&d);
        if len == 0.0 {
            saw_zero = true;
        } else {
            assert!((len - 1.0).abs() < 1e-6);
            if d[0] != 0.0 && d[1] != 0.0 {
                saw_diagonal = true;
            }
        }
    }

    // 1/9 of draws stand still, 4/9 are diagonal
    assert!(saw_zero);
    assert!(saw_diagonal);
}
