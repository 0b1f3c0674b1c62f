pub mod error;
pub mod experiment;
pub mod ga;
pub mod individual;
pub mod param;
pub mod population;
pub mod utils;

use crate::error::GaError;
use crate::experiment::Experiment;
use crate::ga::Evolution;
use crate::param::Param;
use crate::population::Population;
use crate::utils::{display_generation, display_generation_legend};
use chrono::Local;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Runs the genetic algorithm described by `param` and wraps the outcome
///
/// # Errors
///
/// Returns `GaError::Configuration` when the `ga` section is invalid.
pub fn run(param: &Param) -> Result<Experiment, GaError> {
    let start = std::time::Instant::now();
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();
    let colorful = param.general.display_colorful;

    let evolution = Evolution::from_param(param)?;
    let mut rng = ChaCha8Rng::seed_from_u64(param.general.seed);

    info!(
        "Population size: {}, generations: {}, crossover rate: {}, mutation rate: {}, elitism: {}, seed: {}",
        evolution.population_size(),
        evolution.generations(),
        evolution.crossover_rate(),
        evolution.mutation_rate(),
        evolution.elitism(),
        param.general.seed
    );
    crate::cinfo!(colorful, "Training using Genetic Algorithm\n-----------------------------------------------------");
    crate::cinfo!(colorful, "{}", display_generation_legend());

    let mut collection: Vec<Population> = vec![];
    let final_population = evolution.run_with(&mut rng, |generation, pop| {
        crate::cinfo!(colorful, "{}", display_generation(pop, generation));
        if param.general.keep_trace {
            collection.push(pop.clone());
        }
    });

    Ok(Experiment {
        id: format!("quadga_{}", timestamp),
        quadga_version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp,
        parameters: param.clone(),
        final_population,
        collection,
        execution_time: start.elapsed().as_secs_f64(),
    })
}
