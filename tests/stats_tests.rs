#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use huntsim::simulation::agent::Agent;
use huntsim::simulation::event_log::{EventKind, EventLog};
use huntsim::simulation::mutation::{MutationStats, Species, TraitKind};
use huntsim::simulation::params::Color;
use huntsim::simulation::predator::Predator;
use huntsim::simulation::prey::Prey;
use huntsim::simulation::stats::{MutationRecord, PopulationRecord, StatsHistory, StepReport};
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn prey_with(id: usize, sight: f32, speed: f32, generation: u32, rng: &mut StdRng) -> Prey {
    let mut agent = Agent::new(
        id,
        sight,
        speed,
        None,
        Color::BROWN,
        Array1::from_vec(vec![1.0, 1.0]),
        rng,
    );
    agent.generation = generation;
    Prey { agent }
}

#[test]
fn test_population_record_averages() {
    let mut rng = StdRng::seed_from_u64(71);
    let prey = vec![
        prey_with(0, 100.0, 10.0, 0, &mut rng),
        prey_with(1, 200.0, 20.0, 3, &mut rng),
    ];

    let record = PopulationRecord::capture(7, &prey, &[]);

    assert_eq!(record.step, 7);
    assert_eq!(record.prey_count, 2);
    assert_eq!(record.prey_sight_avg, 150.0);
    assert_eq!(record.prey_speed_avg, 15.0);
    assert_eq!(record.prey_fitness_avg, 165.0);
    assert_eq!(record.prey_generation_avg, 1.5);
}

#[test]
fn test_population_record_empty_species_is_zero() {
    let record = PopulationRecord::capture(0, &[], &Vec::<Predator>::new());

    assert_eq!(record.prey_count, 0);
    assert_eq!(record.predator_count, 0);
    assert_eq!(record.prey_speed_avg, 0.0);
    assert_eq!(record.predator_fitness_avg, 0.0);
    assert_eq!(record.predator_generation_avg, 0.0);
}

#[test]
fn test_mutation_record_from_stats() {
    let mut stats = MutationStats::new();
    stats.record(Species::Predator, TraitKind::Sight, -0.5);
    stats.record_offspring(Species::Predator);

    let record = MutationRecord::from_stats(30, &stats);

    assert_eq!(record.step, 30);
    assert_eq!(record.prey_mutation_count, 0);
    assert_eq!(record.predator_mutation_count, 1);
    assert_eq!(record.predator_mutation_rate, 0.5);
    assert_eq!(record.predator_mutation_sight_avg, 0.5);
    assert_eq!(record.predator_mutation_speed_avg, 0.0);
}

#[test]
fn test_history_collects_reports() {
    let mut history = StatsHistory::new();
    let plain = StepReport {
        population: PopulationRecord::default(),
        mutation: None,
        predator_injected: false,
    };
    let with_mutation = StepReport {
        mutation: Some(MutationRecord::default()),
        ..plain.clone()
    };

    history.push(&with_mutation);
    history.push(&plain);
    history.push(&plain);

    assert_eq!(history.population.len(), 3);
    assert_eq!(history.mutation.len(), 1);
}

#[test]
fn test_event_log_is_bounded() {
    let mut log = EventLog::new(3);
    for step in 0..5 {
        log.log(step, format!("birth {step}"), EventKind::Birth);
    }
    log.log(5, "caught".to_string(), EventKind::Capture);

    assert_eq!(log.events().len(), 3);
    assert_eq!(log.events()[0].step, 5);
    assert_eq!(log.events()[0].kind, EventKind::Capture);
    assert_eq!(log.count(EventKind::Birth), 2);

    log.clear();
    assert!(log.events().is_empty());
}
