use crate::individual::Individual;
use crate::param::Param;
use crate::population::Population;

/// Outcome of one run, consumed by the console report
#[derive(Clone, Debug, PartialEq)]
pub struct Experiment {
    /// Identifier built from the crate name and the start timestamp
    pub id: String,
    pub quadga_version: String,
    pub timestamp: String,

    pub parameters: Param,

    pub final_population: Population,
    /// Every evaluated generation, initial population first; empty unless `keep_trace`
    pub collection: Vec<Population>,

    /// Wall-clock duration of the run in seconds
    pub execution_time: f64,
}

impl Experiment {
    pub fn average_fitness(&self) -> f64 {
        self.final_population.average_fitness()
    }

    pub fn max_fitness(&self) -> f64 {
        self.final_population.max_fitness()
    }

    /// Fittest individual of the final population, the first one on ties
    pub fn fittest(&self) -> Option<&Individual> {
        self.final_population.fittest()
    }

    /// First generation whose best fitness equals the final best fitness
    ///
    /// Only available when the trace was kept.
    pub fn generation_reaching_best(&self) -> Option<usize> {
        let best = self.max_fitness();
        self.collection.iter().position(|pop| pop.max_fitness() >= best)
    }

    /// Human-readable summary of the run
    pub fn display(&self) -> String {
        let fittest = match self.fittest() {
            Some(individual) => individual.to_string(),
            None => "none (empty population)".to_string(),
        };

        let mut summary = format!(
            "The average fitness: {:.3}\nThe highest fitness: {:.3}\nThe fittest individual: {}",
            self.average_fitness(),
            self.max_fitness(),
            fittest
        );

        if let Some(generation) = self.generation_reaching_best() {
            summary = format!(
                "{}\nBest fitness first reached at generation {}",
                summary, generation
            );
        }

        format!(
            "{}\n\x1b[2;97m[{} | quadga {} | {} generations x {} individuals | {:.3}s]\x1b[0m",
            summary,
            self.id,
            self.quadga_version,
            self.parameters.ga.generations,
            self.parameters.ga.population_size,
            self.execution_time
        )
    }
}
