//! Error types emitted by the Spotfinder CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use spotfinder_client::ProviderBuildError;
use spotfinder_core::{CatalogError, NoiseLevelParseError};
use thiserror::Error;

/// Errors emitted by the Spotfinder CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist or is not a file")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// Opening the catalog file failed.
    #[error("failed to open catalog at {path:?}: {source}")]
    OpenCatalog {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Catalog JSON could not be decoded.
    #[error("failed to parse catalog JSON at {path:?}: {source}")]
    ParseCatalog {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The catalog records failed validation.
    #[error("catalog at {path:?} is invalid: {source}")]
    InvalidCatalog {
        path: Utf8PathBuf,
        #[source]
        source: CatalogError,
    },
    /// The requested noise level is not recognised.
    #[error(transparent)]
    InvalidNoiseLevel(#[from] NoiseLevelParseError),
    /// A coordinate fell outside its valid range.
    #[error("{axis} {value} is outside the valid range")]
    InvalidCoordinate { axis: &'static str, value: f64 },
    /// Constructing the ranking provider failed.
    #[error("failed to build ranking provider for {base_url:?}: {source}")]
    BuildRankingProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The ranking flow failed.
    #[error("{message}")]
    Ranking { message: String },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
