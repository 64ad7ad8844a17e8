//! Validation utilities.

use std::{env, fmt::Write, str::FromStr};

use prassign_config::{Config, DatabaseDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

#[inline]
fn _missing(error: &mut String, name: &str) {
    error.push('\n');
    let _ = write!(error, "  - Missing env. var.: {}", name);
}

#[inline]
fn _invalid(error: &mut String, name: &str, reason: &str) {
    error.push('\n');
    let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
}

fn validate_env_vars(
    config: &Config,
    driver_var: Option<&str>,
    seed_var: Option<&str>,
) -> Result<(), ValidationError> {
    let mut error = String::new();

    if config.name.is_empty() {
        _missing(&mut error, "PRASSIGN_NAME");
    }

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "PRASSIGN_SERVER_BIND_PORT");
    }
    if config.server.request_timeout == 0 {
        _invalid(
            &mut error,
            "PRASSIGN_SERVER_REQUEST_TIMEOUT",
            "must be positive",
        );
    }
    if config.server.workers_count == Some(0) {
        _invalid(
            &mut error,
            "PRASSIGN_SERVER_WORKERS_COUNT",
            "must be positive",
        );
    }

    // Check database configuration
    if let Some(driver) = driver_var {
        if let Err(e) = DatabaseDriver::from_str(driver) {
            _invalid(&mut error, "PRASSIGN_DATABASE_DRIVER", &e.to_string());
        }
    }
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "PRASSIGN_DATABASE_PG_URL");
    }

    // An unparsable seed silently falls back to entropy in the config loader.
    if let Some(seed) = seed_var.filter(|s| !s.is_empty()) {
        if seed.parse::<u64>().is_err() {
            _invalid(
                &mut error,
                "PRASSIGN_RANDOM_SEED",
                "must be an unsigned integer",
            );
        }
    }

    if !(0.0..=1.0).contains(&config.sentry.traces_sample_rate) {
        _invalid(
            &mut error,
            "PRASSIGN_SENTRY_TRACES_SAMPLE_RATE",
            "must be between 0 and 1",
        );
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    let driver_var = env::var("PRASSIGN_DATABASE_DRIVER").ok();
    let seed_var = env::var("PRASSIGN_RANDOM_SEED").ok();
    validate_env_vars(config, driver_var.as_deref(), seed_var.as_deref())
}
