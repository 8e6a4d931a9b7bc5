//! Writes run statistics to disk for analysis in external tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use super::ecosystem::RunSummary;
use super::error::ExportError;
use super::params::Params;
use super::stats::{MutationRecord, PopulationRecord, StatsHistory};

/// Header of the population CSV.
pub const POPULATION_HEADER: &str = "step,prey_count,prey_speed_avg,prey_sight_avg,prey_fitness_avg,prey_generation_avg,predator_count,predator_speed_avg,predator_sight_avg,predator_fitness_avg,predator_generation_avg";

/// Header of the mutation CSV.
pub const MUTATION_HEADER: &str = "step,prey_mutation_count,prey_mutation_rate,prey_mutation_speed_avg,prey_mutation_sight_avg,predator_mutation_count,predator_mutation_rate,predator_mutation_speed_avg,predator_mutation_sight_avg";

/// JSON digest of a finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryFile {
    /// When the run started.
    pub started_at: DateTime<Local>,
    /// Parameters the run used.
    pub params: Params,
    /// Outcome of the run.
    pub summary: RunSummary,
    /// Population of each species at the last recorded step.
    pub final_population: Option<PopulationRecord>,
}

/// Paths written by [`export_run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// Per-step population CSV.
    pub population: PathBuf,
    /// Per-window mutation CSV.
    pub mutations: PathBuf,
    /// Run digest.
    pub summary: PathBuf,
}

/// First `dir/base_<n>.ext` (n = 1, 2, ...) that does not exist yet.
pub fn next_free_path(dir: impl AsRef<Path>, base: &str, ext: &str) -> PathBuf {
    let dir = dir.as_ref();
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{base}_{n}.{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Writes one line per population record.
pub fn write_population_csv(
    records: &[PopulationRecord],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "{POPULATION_HEADER}")?;
    for r in records {
        writeln!(
            file,
            "{},{},{:.4},{:.4},{:.4},{:.4},{},{:.4},{:.4},{:.4},{:.4}",
            r.step,
            r.prey_count,
            r.prey_speed_avg,
            r.prey_sight_avg,
            r.prey_fitness_avg,
            r.prey_generation_avg,
            r.predator_count,
            r.predator_speed_avg,
            r.predator_sight_avg,
            r.predator_fitness_avg,
            r.predator_generation_avg,
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Writes one line per mutation window.
pub fn write_mutations_csv(
    records: &[MutationRecord],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let mut file = BufWriter::new(File::create(path)?);

    writeln!(file, "{MUTATION_HEADER}")?;
    for r in records {
        writeln!(
            file,
            "{},{},{:.4},{:.4},{:.4},{},{:.4},{:.4},{:.4}",
            r.step,
            r.prey_mutation_count,
            r.prey_mutation_rate,
            r.prey_mutation_speed_avg,
            r.prey_mutation_sight_avg,
            r.predator_mutation_count,
            r.predator_mutation_rate,
            r.predator_mutation_speed_avg,
            r.predator_mutation_sight_avg,
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Writes the run digest as pretty JSON.
pub fn write_summary_json(
    summary: &RunSummaryFile,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Writes both CSVs and the digest into `dir`, creating it if needed.
/// Existing files are never overwritten.
pub fn export_run(
    dir: impl AsRef<Path>,
    history: &StatsHistory,
    params: &Params,
    summary: RunSummary,
    started_at: DateTime<Local>,
) -> Result<ExportedFiles, ExportError> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let files = ExportedFiles {
        population: next_free_path(dir, "population", "csv"),
        mutations: next_free_path(dir, "mutations", "csv"),
        summary: next_free_path(dir, "summary", "json"),
    };

    write_population_csv(&history.population, &files.population)?;
    write_mutations_csv(&history.mutation, &files.mutations)?;
    write_summary_json(
        &RunSummaryFile {
            started_at,
            params: params.clone(),
            summary,
            final_population: history.population.last().cloned(),
        },
        &files.summary,
    )?;

    log::info!(
        "Exported {} population and {} mutation records to {}",
        history.population.len(),
        history.mutation.len(),
        dir.display()
    );
    Ok(files)
}
