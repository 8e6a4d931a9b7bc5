#![allow(missing_docs)]

use chrono::Local;
use huntsim::simulation::ecosystem::{Ecosystem, StopReason};
use huntsim::simulation::export::{
    MUTATION_HEADER, POPULATION_HEADER, RunSummaryFile, export_run, next_free_path,
};
use huntsim::simulation::params::Params;
use huntsim::simulation::stats::StatsHistory;
use huntsim::simulation::stop::StopSignal;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;

fn create_test_params() -> Params {
    Params {
        max_steps: 25,
        ..Params::default()
    }
}

#[test]
fn test_next_free_path() {
    let dir = tempfile::tempdir().unwrap();

    let first = next_free_path(dir.path(), "population", "csv");
    assert_eq!(first, dir.path().join("population_1.csv"));

    fs::write(&first, "").unwrap();
    let second = next_free_path(dir.path(), "population", "csv");
    assert_eq!(second, dir.path().join("population_2.csv"));
}

#[test]
fn test_export_run() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(61);
    let mut eco = Ecosystem::new(&params, &mut rng).unwrap();
    let mut history = StatsHistory::new();
    let started_at = Local::now();

    let summary = eco.run(&params, &mut rng, &StopSignal::new(), |report| {
        history.push(report);
    });
    assert_eq!(summary.reason, StopReason::StepBudget);
    assert_eq!(history.population.len(), 25);
    // steps 0, 10 and 20
    assert_eq!(history.mutation.len(), 3);

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run");
    let files = export_run(&out, &history, &params, summary, started_at).unwrap();

    let population = fs::read_to_string(&files.population).unwrap();
    let lines: Vec<&str> = population.lines().collect();
    assert_eq!(lines[0], POPULATION_HEADER);
    assert_eq!(lines.len(), 26);
    assert!(lines[1].starts_with("0,"));
    assert_eq!(lines[1].split(',').count(), 11);

    let mutations = fs::read_to_string(&files.mutations).unwrap();
    let lines: Vec<&str> = mutations.lines().collect();
    assert_eq!(lines[0], MUTATION_HEADER);
    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("10,"));
    assert_eq!(lines[2].split(',').count(), 9);

    let json = fs::read_to_string(&files.summary).unwrap();
    let parsed: RunSummaryFile = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.summary, summary);
    assert_eq!(parsed.params.max_steps, 25);
    assert_eq!(
        parsed.started_at.timestamp_millis(),
        started_at.timestamp_millis()
    );
    assert_eq!(parsed.final_population.map(|r| r.step), Some(24));
}

#[test]
fn test_export_never_overwrites() {
    let params = create_test_params();
    let mut rng = StdRng::seed_from_u64(62);
    let mut eco = Ecosystem::new(&params, &mut rng).unwrap();
    let mut history = StatsHistory::new();
    let summary = eco.run(&params, &mut rng, &StopSignal::new(), |report| {
        history.push(report);
    });

    let dir = tempfile::tempdir().unwrap();
    let first = export_run(dir.path(), &history, &params, summary, Local::now()).unwrap();
    let second = export_run(dir.path(), &history, &params, summary, Local::now()).unwrap();

    assert_ne!(first.population, second.population);
    assert_ne!(first.summary, second.summary);
    assert!(first.population.ends_with("population_1.csv"));
    assert!(second.population.ends_with("population_2.csv"));
    assert!(second.mutations.ends_with("mutations_2.csv"));
}
