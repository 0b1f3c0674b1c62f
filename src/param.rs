use crate::error::GaError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// Field definitions and associated default values

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Param {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub ga: GA,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct General {
    #[serde(default = "seed_default")]
    pub seed: u64,
    #[serde(default = "log_base_default")]
    pub log_base: String,
    #[serde(default = "log_suffix_default")]
    pub log_suffix: String,
    #[serde(default = "log_level_default")]
    pub log_level: String,
    #[serde(default = "true_default")]
    pub display_colorful: bool,
    #[serde(default = "false_default")]
    pub keep_trace: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GA {
    #[serde(default = "crossover_rate_default")]
    pub crossover_rate: f64,
    #[serde(default = "mutation_rate_default")]
    pub mutation_rate: f64,
    #[serde(default = "true_default")]
    pub elitism: bool,
    #[serde(default = "pop_size_default")]
    pub population_size: usize,
    #[serde(default = "generations_default")]
    pub generations: usize,
}

// Default section definitions

impl Default for General {
    fn default() -> Self {
        // every field carries a serde default, an empty object always deserializes
        serde_json::from_value(serde_json::json!({})).unwrap_or_else(|_| unreachable!())
    }
}

impl Default for GA {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap_or_else(|_| unreachable!())
    }
}

impl Default for Param {
    fn default() -> Self {
        serde_json::from_value(serde_json::json!({})).unwrap_or_else(|_| unreachable!())
    }
}

/// Reads a YAML parameter file and validates it
pub fn get<P: AsRef<Path>>(param_file: P) -> Result<Param, GaError> {
    let param_file_reader = File::open(param_file)?;
    let param_reader = BufReader::new(param_file_reader);

    let mut config: Param = serde_yaml::from_reader(param_reader)?;

    validate(&mut config)?;

    Ok(config)
}

/// Parses parameters from a YAML string and validates them
pub fn from_yaml_str(yaml: &str) -> Result<Param, GaError> {
    let mut config: Param = serde_yaml::from_str(yaml)?;
    validate(&mut config)?;
    Ok(config)
}

pub fn validate(param: &mut Param) -> Result<(), GaError> {
    if !param.general.log_base.is_empty() {
        param.general.display_colorful = false;
    }

    validate_ga(&param.ga)?;

    if param.general.keep_trace && param.ga.generations > 10_000 {
        warn!(
            "keep_trace is enabled for {} generations: every generation will be kept in memory.",
            param.ga.generations
        );
    }

    Ok(())
}

/// Checks the five engine parameters
pub fn validate_ga(ga: &GA) -> Result<(), GaError> {
    if ga.population_size < 2 {
        return Err(GaError::Configuration(format!(
            "Invalid population_size={}. At least 2 individuals are needed to select two distinct parents.",
            ga.population_size
        )));
    }

    validate_rate("crossover_rate", ga.crossover_rate)?;
    validate_rate("mutation_rate", ga.mutation_rate)?;

    Ok(())
}

fn validate_rate(name: &str, rate: f64) -> Result<(), GaError> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GaError::Configuration(format!(
            "Invalid {}={}. Must be in range [0, 1].",
            name, rate
        )));
    }
    Ok(())
}

fn seed_default() -> u64 {
    4815162342
}
fn log_base_default() -> String {
    "".to_string()
}
fn log_suffix_default() -> String {
    "log".to_string()
}
fn log_level_default() -> String {
    "info".to_string()
}
fn true_default() -> bool {
    true
}
fn false_default() -> bool {
    false
}
fn crossover_rate_default() -> f64 {
    0.7
}
fn mutation_rate_default() -> f64 {
    0.5
}
fn pop_size_default() -> usize {
    50
}
fn generations_default() -> usize {
    500
}
