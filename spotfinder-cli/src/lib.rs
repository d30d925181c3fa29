//! Command-line interface for the Spotfinder engine.
//!
//! Two subcommands: `list` filters the catalog locally, `rank` asks the
//! ranking service for a best-first ordering near a position. Option values
//! can come from CLI flags, configuration files, or environment variables
//! with the `SPOTFINDER` prefix.

#![forbid(unsafe_code)]

mod error;
mod rank;

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use spotfinder_core::{Catalog, NoiseLevel, SpotFilter, StudySpot};

pub use error::CliError;

pub(crate) const ARG_CATALOG: &str = "catalog";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_NOISE: &str = "noise";
pub(crate) const ARG_AMENITY: &str = "amenity";
pub(crate) const ARG_JSON: &str = "json";
pub(crate) const ARG_RANK_LAT: &str = "lat";
pub(crate) const ARG_RANK_LON: &str = "lon";
pub(crate) const ARG_RANK_BASE_URL: &str = "base-url";
pub(crate) const ENV_RANK_LAT: &str = "SPOTFINDER_CMDS_RANK_LAT";
pub(crate) const ENV_RANK_LON: &str = "SPOTFINDER_CMDS_RANK_LON";

/// Run the Spotfinder CLI with the current process arguments and
/// environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::List(args) => run_list(args, &mut stdout),
        Command::Rank(args) => rank::run_rank(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "spotfinder",
    about = "Browse and rank campus study spots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog spots matching search and filter parameters.
    List(ListArgs),
    /// Rank spots near a position via the ranking service.
    Rank(rank::RankArgs),
}

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "List study spots matching search and filter parameters")]
#[ortho_config(prefix = "SPOTFINDER")]
pub(crate) struct ListArgs {
    /// Path to a JSON catalog file; defaults to the built-in campus catalog.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Free-text search over name and category.
    #[arg(long = ARG_SEARCH, value_name = "term")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Restrict to a noise level (quiet, moderate, loud).
    #[arg(long = ARG_NOISE, value_name = "level")]
    #[serde(default)]
    pub(crate) noise: Option<String>,
    /// Restrict to spots with a matching amenity.
    #[arg(long = ARG_AMENITY, value_name = "tag")]
    #[serde(default)]
    pub(crate) amenity: Option<String>,
    /// Emit the matching records as pretty JSON.
    #[arg(long = ARG_JSON)]
    #[serde(default)]
    pub(crate) json: bool,
}

/// Resolved `list` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ListConfig {
    pub(crate) catalog: Option<Utf8PathBuf>,
    pub(crate) filter: SpotFilter,
    pub(crate) json: bool,
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let noise = args
            .noise
            .as_deref()
            .map(str::parse::<NoiseLevel>)
            .transpose()?;
        let filter = SpotFilter {
            search: args.search.unwrap_or_default(),
            noise,
            amenity: args.amenity,
        };
        Ok(Self {
            catalog: args.catalog,
            filter,
            json: args.json,
        })
    }
}

pub(crate) fn run_list(args: ListArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let config = ListConfig::try_from(merged)?;
    execute_list(&config, writer)
}

fn execute_list(config: &ListConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let catalog = load_catalog(config.catalog.as_deref())?;
    let spots = catalog.filtered(&config.filter);

    if config.json {
        let payload = serde_json::to_string_pretty(&spots).map_err(CliError::SerialiseOutput)?;
        writeln!(writer, "{payload}").map_err(CliError::WriteOutput)?;
        return Ok(());
    }

    for spot in &spots {
        let noise = spot.noise.map_or("unclassified", NoiseLevel::as_str);
        writeln!(
            writer,
            "{} [{}] {:.1}/5.0 {}",
            spot.name, spot.category, spot.rating, noise
        )
        .map_err(CliError::WriteOutput)?;
    }
    writeln!(writer, "Found {} study spots", spots.len()).map_err(CliError::WriteOutput)?;
    Ok(())
}

/// Load the catalog from `path`, or the built-in campus catalog when no
/// path is given.
pub(crate) fn load_catalog(path: Option<&Utf8Path>) -> Result<Catalog, CliError> {
    let Some(path) = path else {
        return Ok(Catalog::campus_default());
    };
    require_existing(path, ARG_CATALOG)?;
    let file = std::fs::File::open(path.as_std_path()).map_err(|source| CliError::OpenCatalog {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let spots: Vec<StudySpot> =
        serde_json::from_reader(reader).map_err(|source| CliError::ParseCatalog {
            path: path.to_path_buf(),
            source,
        })?;
    Catalog::new(spots).map_err(|source| CliError::InvalidCatalog {
        path: path.to_path_buf(),
        source,
    })
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn list_args() -> ListArgs {
        ListArgs {
            catalog: None,
            search: None,
            noise: None,
            amenity: None,
            json: false,
        }
    }

    #[rstest]
    fn list_config_parses_noise_level() {
        let config = ListConfig::try_from(ListArgs {
            noise: Some("quiet".to_owned()),
            ..list_args()
        })
        .expect("quiet is a valid level");

        assert_eq!(config.filter.noise, Some(NoiseLevel::Quiet));
    }

    #[rstest]
    fn list_config_rejects_unknown_noise_level() {
        let err = ListConfig::try_from(ListArgs {
            noise: Some("silent".to_owned()),
            ..list_args()
        })
        .unwrap_err();

        assert!(matches!(err, CliError::InvalidNoiseLevel(_)));
    }

    #[rstest]
    fn absent_catalog_path_uses_the_built_in_catalog() {
        let catalog = load_catalog(None).expect("built-in catalog loads");
        assert_eq!(catalog.len(), Catalog::campus_default().len());
    }

    #[rstest]
    fn missing_catalog_path_is_reported() {
        let path = Utf8PathBuf::from("/nonexistent/catalog.json");
        let err = load_catalog(Some(&path)).unwrap_err();
        assert!(matches!(err, CliError::MissingSourceFile { .. }));
    }

    #[rstest]
    fn catalog_file_round_trips_through_json() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("catalog.json"))
            .expect("tempdir paths are utf8");
        let payload = serde_json::to_string(Catalog::campus_default().spots())
            .expect("catalog serialises");
        let mut file = std::fs::File::create(path.as_std_path()).expect("create catalog file");
        file.write_all(payload.as_bytes()).expect("write catalog");

        let catalog = load_catalog(Some(&path)).expect("catalog file loads");

        assert_eq!(catalog, Catalog::campus_default());
    }

    #[rstest]
    fn duplicate_ids_in_a_catalog_file_are_rejected() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("catalog.json"))
            .expect("tempdir paths are utf8");
        let mut spots = Catalog::campus_default().spots().to_vec();
        if let Some(first) = spots.first().cloned() {
            spots.push(first);
        }
        let payload = serde_json::to_string(&spots).expect("catalog serialises");
        std::fs::write(path.as_std_path(), payload).expect("write catalog");

        let err = load_catalog(Some(&path)).unwrap_err();

        assert!(matches!(err, CliError::InvalidCatalog { .. }));
    }

    #[rstest]
    fn list_output_names_matches_and_count() {
        let config = ListConfig {
            catalog: None,
            filter: SpotFilter::default().with_search("library"),
            json: false,
        };
        let mut output = Vec::new();

        execute_list(&config, &mut output).expect("list succeeds");

        let text = String::from_utf8(output).expect("utf8 output");
        assert!(text.contains("Mugar Memorial Library [Library] 4.5/5.0 quiet"));
        assert!(text.contains("Pardee Library"));
        assert!(text.contains("Found 2 study spots"));
    }

    #[rstest]
    fn list_json_output_is_parseable() {
        let config = ListConfig {
            catalog: None,
            filter: SpotFilter::default(),
            json: true,
        };
        let mut output = Vec::new();

        execute_list(&config, &mut output).expect("list succeeds");

        let parsed: serde_json::Value =
            serde_json::from_slice(&output).expect("output is valid JSON");
        let records = parsed.as_array().expect("an array of records");
        assert_eq!(records.len(), Catalog::campus_default().len());
        assert_eq!(records[0]["type"], "Library");
    }
}
