use thiserror::Error;

/// Errors surfaced by the library
#[derive(Debug, Error)]
pub enum GaError {
    /// Invalid run configuration, detected before any evolution happens
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Genome holding a value other than 0 or 1
    #[error("Invalid genome: {0}")]
    InvalidGenome(String),

    /// Parameter file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parameter file is not valid YAML for `Param`
    #[error("Parameter file error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
