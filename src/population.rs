use crate::individual::Individual;
use log::{debug, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Ordered collection of individuals forming one generation
///
/// The order of `individuals` is significant: cumulative probabilities are
/// accumulated and scanned in this order.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    pub fn new() -> Population {
        Population {
            individuals: Vec::new(),
        }
    }

    /// Creates `size` independent random individuals (no fitness computed)
    pub fn generate(size: usize, rng: &mut ChaCha8Rng) -> Population {
        Population {
            individuals: (0..size).map(|_| Individual::random(rng)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Appends the individuals of another population, keeping their order
    pub fn add(&mut self, population: Population) {
        self.individuals.extend(population.individuals);
    }

    /// Returns a new snapshot with fitness and selection probabilities
    /// recomputed for every individual
    pub fn evaluate(&self) -> Population {
        let evaluated = Population {
            individuals: self.individuals.iter().map(Individual::evaluated).collect(),
        };
        evaluated.with_selection_probabilities()
    }

    /// Amount added to every fitness so that the lowest one becomes zero
    pub fn fitness_shift(&self) -> f64 {
        let min_fitness = self
            .individuals
            .iter()
            .map(|i| i.fitness)
            .fold(f64::INFINITY, f64::min);
        if min_fitness.is_finite() {
            (-min_fitness).max(0.0)
        } else {
            0.0
        }
    }

    /// Returns a new snapshot with scaled fitness, selection probability and
    /// cumulative probability recomputed from the current fitness values
    ///
    /// When every scaled fitness is zero (whole population tied at the
    /// minimum), individuals are made uniformly selectable.
    pub fn with_selection_probabilities(&self) -> Population {
        let mut individuals = self.individuals.clone();
        if individuals.is_empty() {
            return Population { individuals };
        }

        let shift = self.fitness_shift();
        for individual in individuals.iter_mut() {
            individual.scaled_fitness = individual.fitness + shift;
        }

        let total: f64 = individuals.iter().map(|i| i.scaled_fitness).sum();
        let n = individuals.len() as f64;
        if total > 0.0 {
            for individual in individuals.iter_mut() {
                individual.selection_probability = individual.scaled_fitness / total;
            }
        } else {
            warn!(
                "All {} individuals are tied at fitness {:.3}: selecting uniformly",
                individuals.len(),
                individuals[0].fitness
            );
            for individual in individuals.iter_mut() {
                individual.selection_probability = 1.0 / n;
            }
        }

        let mut cumulative = 0.0;
        for individual in individuals.iter_mut() {
            cumulative += individual.selection_probability;
            individual.cumulative_probability = cumulative;
        }
        if let Some(last) = individuals.last_mut() {
            last.cumulative_probability = 1.0;
        }

        Population { individuals }
    }

    /// Number of individuals a roulette-wheel spin can return
    pub fn selectable_count(&self) -> usize {
        self.individuals
            .iter()
            .filter(|i| i.selection_probability > 0.0)
            .count()
    }

    /// Index of the individual covering `u` on the roulette wheel
    ///
    /// Returns the smallest index whose cumulative probability exceeds `u`,
    /// falling back to the last individual when rounding leaves `u` uncovered.
    /// Individuals with a zero selection probability are never returned
    /// unless they are last. Returns `None` for an empty population.
    pub fn spin(&self, u: f64) -> Option<usize> {
        let last = self.individuals.len().checked_sub(1)?;
        let index = self
            .individuals
            .partition_point(|i| i.cumulative_probability <= u);
        Some(index.min(last))
    }

    /// Draws one individual index with probability proportional to its scaled fitness
    pub fn select_index(&self, rng: &mut ChaCha8Rng) -> Option<usize> {
        self.spin(rng.gen::<f64>())
    }

    /// Draws two distinct individuals (by position, not by genome), in draw order
    ///
    /// Selection probabilities must have been computed beforehand. Duplicate
    /// draws are resampled. If fewer than two individuals can be drawn by the
    /// wheel, the second parent is picked uniformly among the others.
    /// Returns `None` when the population holds fewer than two individuals.
    pub fn select_two_parents(&self, rng: &mut ChaCha8Rng) -> Option<(usize, usize)> {
        let n = self.individuals.len();
        if n < 2 {
            return None;
        }

        let first = self.select_index(rng)?;

        if self.selectable_count() < 2 {
            debug!("Only one individual can be drawn by the wheel: second parent chosen uniformly");
            let mut second = rng.gen_range(0..n - 1);
            if second >= first {
                second += 1;
            }
            return Some((first, second));
        }

        loop {
            let second = self.select_index(rng)?;
            if second != first {
                return Some((first, second));
            }
        }
    }

    /// Index of the fittest individual, the first one on ties
    pub fn fittest_index(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, individual) in self.individuals.iter().enumerate() {
            match best {
                Some(b) if individual.fitness <= self.individuals[b].fitness => {}
                _ => best = Some(i),
            }
        }
        best
    }

    pub fn fittest(&self) -> Option<&Individual> {
        self.fittest_index().map(|i| &self.individuals[i])
    }

    /// Arithmetic mean of the fitness values, NaN for an empty population
    pub fn average_fitness(&self) -> f64 {
        self.individuals.iter().map(|i| i.fitness).mean()
    }

    /// Highest fitness value, -inf for an empty population
    pub fn max_fitness(&self) -> f64 {
        self.individuals
            .iter()
            .map(|i| i.fitness)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
