use crate::error::GaError;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bits in a genome
pub const GENE_LENGTH: usize = 5;
/// Number of distinct values a genome can encode (0..=31)
pub const GENE_SPACE: u8 = 1 << GENE_LENGTH;
/// Index at which single-point crossover splits the genomes
pub const CROSSOVER_POINT: usize = GENE_LENGTH / 2;
/// Number of random bit flips applied by a mutation
pub const MUTATION_FLIPS: usize = 2;

/// Fixed-length bit sequence, most significant bit first
pub type Genome = [u8; GENE_LENGTH];

/// Candidate solution of the optimisation problem
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub struct Individual {
    /// Bits of the genome, each 0 or 1
    pub genes: Genome,

    /// Objective value of the decoded genome
    pub fitness: f64,
    /// Fitness shifted so that the whole population is non-negative
    pub scaled_fitness: f64,
    /// Chance of being picked by one roulette-wheel spin
    pub selection_probability: f64,
    /// Running sum of selection probabilities in population order
    pub cumulative_probability: f64,

    /// Generation in which the individual was created
    pub epoch: usize,
}

/// Objective function maximised by the algorithm: f(x) = -x² + 7x
///
/// # Examples
///
/// ```
/// # use quadga::individual::objective;
/// assert_eq!(objective(3), 12.0);
/// assert_eq!(objective(31), -744.0);
/// ```
pub fn objective(x: u8) -> f64 {
    let x = x as f64;
    -x * x + 7.0 * x
}

impl Individual {
    /// Creates an individual from a genome already known to hold only bits
    pub(crate) fn new(genes: Genome) -> Individual {
        debug_assert!(genes.iter().all(|&g| g <= 1), "genes must be bits");
        Individual {
            genes,
            fitness: 0.0,
            scaled_fitness: 0.0,
            selection_probability: 0.0,
            cumulative_probability: 0.0,
            epoch: 0,
        }
    }

    /// Encodes an integer as a zero-padded binary genome
    ///
    /// Only the lowest `GENE_LENGTH` bits of `value` are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quadga::individual::Individual;
    /// let individual = Individual::from_value(6);
    /// assert_eq!(individual.genes, [0, 0, 1, 1, 0]);
    /// assert_eq!(individual.value(), 6);
    /// ```
    pub fn from_value(value: u8) -> Individual {
        let mut genes = [0u8; GENE_LENGTH];
        for (i, gene) in genes.iter_mut().enumerate() {
            *gene = (value >> (GENE_LENGTH - 1 - i)) & 1;
        }
        Individual::new(genes)
    }

    /// Draws an individual uniformly among the `GENE_SPACE` possible genomes
    pub fn random(rng: &mut ChaCha8Rng) -> Individual {
        Individual::from_value(rng.gen_range(0..GENE_SPACE))
    }

    /// Decodes the genome into its unsigned integer value
    pub fn value(&self) -> u8 {
        self.genes.iter().fold(0, |acc, &bit| (acc << 1) | bit)
    }

    /// Returns a copy with fitness recomputed and the selection fields cleared
    pub fn evaluated(&self) -> Individual {
        Individual {
            fitness: objective(self.value()),
            scaled_fitness: 0.0,
            selection_probability: 0.0,
            cumulative_probability: 0.0,
            ..self.clone()
        }
    }

    /// Single-point crossover at `CROSSOVER_POINT`
    ///
    /// The first child takes the head of `self` and the tail of `other`,
    /// the second child the head of `other` and the tail of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quadga::individual::Individual;
    /// let ones = Individual::from_value(31);
    /// let zeros = Individual::from_value(0);
    /// let (first, second) = ones.cross_over(&zeros);
    /// assert_eq!(first.genes, [1, 1, 0, 0, 0]);
    /// assert_eq!(second.genes, [0, 0, 1, 1, 1]);
    /// ```
    pub fn cross_over(&self, other: &Individual) -> (Individual, Individual) {
        let mut first = other.genes;
        let mut second = self.genes;
        first[..CROSSOVER_POINT].copy_from_slice(&self.genes[..CROSSOVER_POINT]);
        second[..CROSSOVER_POINT].copy_from_slice(&other.genes[..CROSSOVER_POINT]);
        (Individual::new(first), Individual::new(second))
    }

    /// Returns a copy with `MUTATION_FLIPS` bits flipped
    ///
    /// Positions are drawn with replacement: drawing the same position twice
    /// restores its original value.
    pub fn mutate(&self, rng: &mut ChaCha8Rng) -> Individual {
        let mut genes = self.genes;
        for _ in 0..MUTATION_FLIPS {
            let position = rng.gen_range(0..GENE_LENGTH);
            genes[position] ^= 1;
        }
        let mut mutant = Individual::new(genes);
        mutant.epoch = self.epoch;
        mutant
    }

    /// Genome rendered as a string of 0 and 1
    pub fn bit_string(&self) -> String {
        self.genes.iter().map(|bit| if *bit == 1 { '1' } else { '0' }).collect()
    }
}

/// Builds an individual from an explicit genome, rejecting genes other than 0 or 1
///
/// # Examples
///
/// ```
/// # use quadga::individual::{Genome, Individual};
/// let genes: Genome = [0, 0, 0, 1, 1];
/// assert_eq!(Individual::try_from(genes).unwrap().value(), 3);
///
/// let genes: Genome = [0, 2, 0, 0, 0];
/// assert!(Individual::try_from(genes).is_err());
/// ```
impl TryFrom<Genome> for Individual {
    type Error = GaError;

    fn try_from(genes: Genome) -> Result<Self, Self::Error> {
        if let Some(position) = genes.iter().position(|&g| g > 1) {
            return Err(GaError::InvalidGenome(format!(
                "gene {} at position {} is not a bit",
                genes[position], position
            )));
        }
        Ok(Individual::new(genes))
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (x={}) [gen:{}] fitness {:.3} | probability {:.3} | cumulative probability {:.3}",
            self.bit_string(),
            self.value(),
            self.epoch,
            self.fitness,
            self.selection_probability,
            self.cumulative_probability
        )
    }
}
