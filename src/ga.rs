use crate::error::GaError;
use crate::individual::Individual;
use crate::param::{self, Param, GA};
use crate::population::Population;
use log::{debug, info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

//-----------------------------------------------------------------------------
// Genetic Algorithm core functions
//-----------------------------------------------------------------------------

/// Reproduction rounds without crossover tolerated per missing individual
/// before the rest of a generation is filled with random individuals
pub const MAX_FAILED_ROUNDS_PER_INDIVIDUAL: usize = 100;

/// Evolution engine: a fixed number of generations of roulette-wheel
/// selection, single-point crossover and two-flip mutation, with optional
/// elitism
#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    crossover_rate: f64,
    mutation_rate: f64,
    elitism: bool,
    population_size: usize,
    generations: usize,
}

impl Evolution {
    /// Creates an engine after checking its parameters
    ///
    /// # Errors
    ///
    /// Returns `GaError::Configuration` if `population_size < 2` or if a rate
    /// is outside [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// # use quadga::ga::Evolution;
    /// assert!(Evolution::new(0.7, 0.5, true, 50, 500).is_ok());
    /// assert!(Evolution::new(1.5, 0.5, true, 50, 500).is_err());
    /// assert!(Evolution::new(0.7, 0.5, true, 1, 500).is_err());
    /// ```
    pub fn new(
        crossover_rate: f64,
        mutation_rate: f64,
        elitism: bool,
        population_size: usize,
        generations: usize,
    ) -> Result<Evolution, GaError> {
        let settings = GA {
            crossover_rate,
            mutation_rate,
            elitism,
            population_size,
            generations,
        };
        param::validate_ga(&settings)?;

        if elitism && population_size == 2 {
            warn!("population_size=2: the elite cannot leave the breeding pool and stays selectable.");
        }
        if crossover_rate == 0.0 && generations > 0 {
            warn!("crossover_rate=0: generations will be filled with random individuals.");
        }

        Ok(Evolution {
            crossover_rate,
            mutation_rate,
            elitism,
            population_size,
            generations,
        })
    }

    /// Creates an engine from the `ga` section of the parameters
    pub fn from_param(param: &Param) -> Result<Evolution, GaError> {
        Evolution::new(
            param.ga.crossover_rate,
            param.ga.mutation_rate,
            param.ga.elitism,
            param.ga.population_size,
            param.ga.generations,
        )
    }

    pub fn crossover_rate(&self) -> f64 {
        self.crossover_rate
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn elitism(&self) -> bool {
        self.elitism
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Runs every generation and returns the final evaluated population
    pub fn run(&self, rng: &mut ChaCha8Rng) -> Population {
        self.run_with(rng, |_, _| {})
    }

    /// Runs every generation and returns all evaluated populations, the
    /// initial one first (`generations + 1` snapshots)
    pub fn run_with_trace(&self, rng: &mut ChaCha8Rng) -> Vec<Population> {
        let mut populations = Vec::with_capacity(self.generations + 1);
        self.run_with(rng, |_, pop| populations.push(pop.clone()));
        populations
    }

    /// Runs every generation, handing each evaluated population to `on_generation`
    ///
    /// # Arguments
    ///
    /// * `rng` - The single random source of the run.
    /// * `on_generation` - Called with the generation number (0 for the
    ///   initial population) and the evaluated population.
    ///
    /// # Returns
    ///
    /// The final evaluated population, of size `population_size`.
    pub fn run_with<F>(&self, rng: &mut ChaCha8Rng, mut on_generation: F) -> Population
    where
        F: FnMut(usize, &Population),
    {
        let time = Instant::now();

        let mut pop = Population::generate(self.population_size, rng);
        let mut remaining = self.generations;
        let mut generation = 0;

        loop {
            pop = pop.evaluate();
            on_generation(generation, &pop);

            if remaining == 0 {
                break;
            }

            generation += 1;
            pop = self.evolve(&pop, generation, rng);
            remaining -= 1;
        }

        info!(
            "Genetic algorithm computed {} generations in {:.2?}",
            generation,
            time.elapsed()
        );

        pop
    }

    /// Builds the next generation from an evaluated population
    ///
    /// # Arguments
    ///
    /// * `pop` - The evaluated current population.
    /// * `generation` - Number of the generation being built.
    /// * `rng` - Random number generator.
    ///
    /// # Returns
    ///
    /// The next population, not yet evaluated, of exactly `population_size`
    /// individuals.
    pub fn evolve(&self, pop: &Population, generation: usize, rng: &mut ChaCha8Rng) -> Population {
        let mut new_pop = Population::new();
        let mut pool = pop.clone();

        if self.elitism {
            if let Some(best) = pool.fittest_index() {
                if pool.len() > 2 {
                    let elite = pool.individuals.remove(best);
                    debug!("Elite {} carried over", elite.bit_string());
                    new_pop.individuals.push(elite);
                    pool = pool.with_selection_probabilities();
                } else {
                    new_pop.individuals.push(pool.individuals[best].clone());
                }
            }
        }

        let max_failed_rounds = self.population_size * MAX_FAILED_ROUNDS_PER_INDIVIDUAL;
        let mut failed_rounds = 0;
        while new_pop.len() < self.population_size {
            let parents = if self.crossover_rate > 0.0 && failed_rounds < max_failed_rounds {
                pool.select_two_parents(rng)
            } else {
                None
            };
            let Some((p1, p2)) = parents else {
                let mut filler = Individual::random(rng);
                filler.epoch = generation;
                new_pop.individuals.push(filler);
                continue;
            };

            if !rng.gen_bool(self.crossover_rate) {
                failed_rounds += 1;
                if failed_rounds == max_failed_rounds {
                    warn!(
                        "Generation {}: no crossover in {} rounds, filling {} slot(s) with random individuals",
                        generation,
                        failed_rounds,
                        self.population_size - new_pop.len()
                    );
                }
                continue;
            }

            let mut children = cross_over(&pool.individuals[p1], &pool.individuals[p2]);
            mutate(&mut children, self.mutation_rate, rng);
            for child in children.individuals.iter_mut() {
                child.epoch = generation;
            }
            new_pop.add(children);
        }

        if failed_rounds > 0 {
            debug!("{} reproduction rounds without crossover", failed_rounds);
        }

        if new_pop.len() > self.population_size {
            debug!(
                "Dropping {} surplus child(ren)",
                new_pop.len() - self.population_size
            );
            new_pop.individuals.truncate(self.population_size);
        }

        new_pop
    }
}

/// Single-point crossover of two parents into a pair of children
pub fn cross_over(p1: &Individual, p2: &Individual) -> Population {
    let (first, second) = p1.cross_over(p2);
    Population {
        individuals: vec![first, second],
    }
}

/// Mutates each child independently with probability `mutation_rate`
pub fn mutate(children: &mut Population, mutation_rate: f64, rng: &mut ChaCha8Rng) {
    for child in children.individuals.iter_mut() {
        if rng.gen_bool(mutation_rate) {
            *child = child.mutate(rng);
        }
    }
}
