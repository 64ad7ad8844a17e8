//! Log configuration for the server and the CLI.
//!
//! Use case spans (`#[tracing::instrument]`) render as a tree on stderr, or
//! as bunyan JSON records on stdout when `PRASSIGN_LOGGING_USE_BUNYAN` is set.

use std::str::FromStr;

use prassign_config::Config;
use thiserror::Error;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_tree::HierarchicalLayer;

/// Keeps the assignment crates verbose and sqlx quiet.
const DEFAULT_ENV_CONFIG: &str = "info,sqlx=error,prassign=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(
        "Could not set tracing global default subscriber,\n  caused by: {}",
        source
    )]
    TracingSetGlobalDefaultError {
        source: tracing::dispatcher::SetGlobalDefaultError,
    },
    #[error("Could not initialize tracing log tracer,\n  caused by: {}", source)]
    TracingLogTracerError {
        source: tracing::log::SetLoggerError,
    },
    #[error(
        "Wrong env filter configuration: {}\n  caused by: {}",
        configuration,
        source
    )]
    EnvFilterConfigurationError {
        source: tracing_subscriber::filter::ParseError,
        configuration: String,
    },
}

fn build_env_filter(directives: Option<String>) -> Result<EnvFilter, LoggingError> {
    let configuration = directives
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV_CONFIG.to_string());

    EnvFilter::from_str(&configuration).map_err(|source| {
        LoggingError::EnvFilterConfigurationError {
            source,
            configuration,
        }
    })
}

/// Install the global subscriber. Fails if one is already installed.
pub fn configure_logging(config: &Config) -> Result<(), LoggingError> {
    LogTracer::init().map_err(|e| LoggingError::TracingLogTracerError { source: e })?;

    let filter_layer = build_env_filter(std::env::var("RUST_LOG").ok())?;
    let app_name = format!("{}-{}", config.name, config.version);
    let hierarchical_layer = HierarchicalLayer::new(2)
        .with_targets(true)
        .with_bracketed_fields(true);
    let error_layer = ErrorLayer::default();
    let use_bunyan = config.logging.use_bunyan;
    let json_storage_layer = use_bunyan.then_some(JsonStorageLayer);
    let bunyan_layer =
        use_bunyan.then(|| BunyanFormattingLayer::new(app_name, std::io::stdout));

    let subscriber = tracing_subscriber::registry()
        .with(error_layer)
        .with(hierarchical_layer)
        .with(filter_layer)
        .with(json_storage_layer)
        .with(bunyan_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggingError::TracingSetGlobalDefaultError { source: e })?;

    Ok(())
}
