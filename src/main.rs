use flexi_logger::{FileSpec, FlexiLoggerError, Logger, LoggerHandle};
use log::{error, warn};
use quadga::error::GaError;
use quadga::param::{self, Param};
use quadga::utils::strip_ansi;
use std::path::Path;

const DEFAULT_PARAM_FILE: &str = "param.yaml";

fn start_logger(param: &Param) -> Result<LoggerHandle, FlexiLoggerError> {
    let logger = Logger::try_with_env_or_str(&param.general.log_level)?;
    let logger = if param.general.log_base.is_empty() {
        logger
    } else {
        logger.log_to_file(
            FileSpec::default()
                .basename(&param.general.log_base)
                .suffix(&param.general.log_suffix),
        )
    };
    logger.start()
}

/// Loads the parameter file, falling back to defaults when it does not exist
fn load_param(path: &str) -> (Param, Option<GaError>, bool) {
    if !Path::new(path).exists() {
        return (Param::default(), None, false);
    }
    match param::get(path) {
        Ok(param) => (param, None, true),
        Err(e) => (Param::default(), Some(e), true),
    }
}

fn main() {
    let param_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_PARAM_FILE.to_string());
    let (param, load_error, found) = load_param(&param_path);

    let _logger = match start_logger(&param) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Could not start logger: {}", e);
            None
        }
    };

    if let Some(e) = load_error {
        error!("Cannot use parameter file {}: {}", param_path, e);
        return;
    }
    if !found {
        warn!("Parameter file {} not found: using default parameters.", param_path);
    }

    match quadga::run(&param) {
        Ok(experiment) => {
            let report = experiment.display();
            if param.general.display_colorful {
                println!("{}", report);
            } else {
                println!("{}", strip_ansi(&report));
            }
        }
        Err(e) => error!("{}", e),
    }
}
