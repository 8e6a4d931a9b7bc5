#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use huntsim::simulation::agent::Agent;
use huntsim::simulation::mutation::{MutationStats, Species, TraitKind, mutate_trait};
use huntsim::simulation::params::{Color, MutationParams, Params};
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn create_test_params() -> Params {
    Params {
        mutation: MutationParams {
            rate: 1.0,
            strength: 0.5,
            trait_floor: 0.1,
        },
        ..Params::default()
    }
}

#[test]
fn test_rate_zero_never_mutates() {
    let params = MutationParams {
        rate: 0.0,
        ..MutationParams::default()
    };
    let mut stats = MutationStats::new();
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..200 {
        let v = mutate_trait(
            12.5,
            Species::Prey,
            TraitKind::Speed,
            &params,
            &mut stats,
            &mut rng,
        );
        assert_eq!(v, 12.5);
    }
    assert_eq!(stats, MutationStats::new());
}

#[test]
fn test_rate_one_always_mutates_within_strength() {
    let params = create_test_params().mutation;
    let mut stats = MutationStats::new();
    let mut rng = StdRng::seed_from_u64(22);

    for _ in 0..200 {
        let v = mutate_trait(
            12.5,
            Species::Predator,
            TraitKind::Sight,
            &params,
            &mut stats,
            &mut rng,
        );
        assert!((v - 12.5).abs() <= params.strength + 1e-6);
    }

    assert_eq!(stats.events(Species::Predator, TraitKind::Sight), 200);
    assert_eq!(stats.events(Species::Predator, TraitKind::Speed), 0);
    assert_eq!(stats.total_events(Species::Prey), 0);
    let magnitude = stats.magnitude(Species::Predator, TraitKind::Sight);
    assert!(magnitude > 0.0 && magnitude <= 200.0 * params.strength);
}

#[test]
fn test_trait_floor() {
    let params = MutationParams {
        rate: 1.0,
        strength: 5.0,
        trait_floor: 0.1,
    };
    let mut stats = MutationStats::new();
    let mut rng = StdRng::seed_from_u64(23);

    let mut value = 0.1;
    for _ in 0..500 {
        value = mutate_trait(
            value,
            Species::Prey,
            TraitKind::Speed,
            &params,
            &mut stats,
            &mut rng,
        );
        assert!(value >= 0.1);
    }
}

#[test]
fn test_summary_normalization() {
    let mut stats = MutationStats::new();
    stats.record(Species::Prey, TraitKind::Speed, 0.2);
    stats.record(Species::Prey, TraitKind::Speed, -0.4);
    stats.record(Species::Prey, TraitKind::Sight, 0.3);
    stats.record_offspring(Species::Prey);
    stats.record_offspring(Species::Prey);

    let summary = stats.summary(Species::Prey);
    assert_eq!(summary.count, 3);
    assert!((summary.rate - 0.75).abs() < 1e-6);
    assert!((summary.speed_avg - 0.3).abs() < 1e-6);
    assert!((summary.sight_avg - 0.3).abs() < 1e-6);

    // The other species is untouched
    let other = stats.summary(Species::Predator);
    assert_eq!(other.count, 0);
    assert_eq!(other.rate, 0.0);
}

#[test]
fn test_empty_window_is_zero() {
    let summary = MutationStats::new().summary(Species::Prey);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.rate, 0.0);
    assert_eq!(summary.speed_avg, 0.0);
    assert_eq!(summary.sight_avg, 0.0);
}

#[test]
fn test_events_without_offspring_use_floor_of_one() {
    let mut stats = MutationStats::new();
    stats.record(Species::Predator, TraitKind::Speed, 0.25);

    let summary = stats.summary(Species::Predator);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.rate, 1.0);
    assert_eq!(summary.speed_avg, 0.25);
    assert_eq!(summary.sight_avg, 0.0);
}

#[test]
fn test_reset() {
    let mut stats = MutationStats::new();
    stats.record(Species::Prey, TraitKind::Sight, 0.1);
    stats.record_offspring(Species::Predator);

    stats.reset();
    assert_eq!(stats, MutationStats::new());
    assert_eq!(stats.offspring(Species::Predator), 0);
}

#[test]
fn test_offspring_inheritance() {
    let params = create_test_params();
    let mut stats = MutationStats::new();
    let mut rng = StdRng::seed_from_u64(24);

    let mut parent = Agent::new(
        3,
        180.0,
        12.0,
        Some(100),
        Color::new(1, 2, 3),
        Array1::from_vec(vec![10.0, 10.0]),
        &mut rng,
    );
    parent.generation = 4;
    parent.age = 37;

    let child = parent.offspring(77, Species::Prey, &params, &mut stats, &mut rng);

    assert_eq!(child.id, 77);
    assert_eq!(child.generation, 5);
    assert_eq!(child.age, 0);
    assert_eq!(child.lifespan, Some(100));
    assert_eq!(child.color, Color::new(1, 2, 3));
    assert!((child.sight - 180.0).abs() <= 0.5 + 1e-4);
    assert!((child.speed - 12.0).abs() <= 0.5 + 1e-4);
    assert!(child.pos[0] >= 0.0 && child.pos[0] < params.world_size);
    assert!(child.pos[1] >= 0.0 && child.pos[1] < params.world_size);

    // Rate 1: both traits mutate
    assert_eq!(stats.events(Species::Prey, TraitKind::Sight), 1);
    assert_eq!(stats.events(Species::Prey, TraitKind::Speed), 1);
    assert_eq!(stats.offspring(Species::Prey), 1);
    assert_eq!(stats.offspring(Species::Predator), 0);
}
