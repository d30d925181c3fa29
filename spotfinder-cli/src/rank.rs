//! Rank command implementation for the Spotfinder CLI.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use spotfinder_client::{HttpRankingProvider, HttpRankingProviderConfig};
use spotfinder_core::{FixedLocationProvider, RankedList, RankingProvider, StudySpot};
use spotfinder_session::{RANKING_FAILURE_MESSAGE, RankingStatus, SpotSession};

use crate::{
    ARG_CATALOG, ARG_JSON, ARG_RANK_BASE_URL, ARG_RANK_LAT, ARG_RANK_LON, CliError, ENV_RANK_LAT,
    ENV_RANK_LON, load_catalog,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Ask the ranking service for a best-first ordering of study \
                 spots near a position, then resolve the top entry against \
                 the catalog. Coordinates can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Rank study spots near a position"
)]
#[ortho_config(prefix = "SPOTFINDER")]
pub(crate) struct RankArgs {
    /// Latitude of the caller's position, in degrees.
    #[arg(long = ARG_RANK_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude of the caller's position, in degrees.
    #[arg(long = ARG_RANK_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) lon: Option<f64>,
    /// Base URL for the ranking service.
    #[arg(long = ARG_RANK_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Path to a JSON catalog file; defaults to the built-in campus catalog.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Emit a JSON report instead of text.
    #[arg(long = ARG_JSON)]
    #[serde(default)]
    pub(crate) json: bool,
}

impl RankArgs {
    fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    /// Caller position, `x = longitude`, `y = latitude`.
    pub(crate) position: Coord<f64>,
    /// Base URL for the ranking service.
    pub(crate) base_url: String,
    /// Optional catalog file path.
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Emit JSON instead of text.
    pub(crate) json: bool,
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_RANK_LAT,
            env: ENV_RANK_LAT,
        })?;
        let lon = args.lon.ok_or(CliError::MissingArgument {
            field: ARG_RANK_LON,
            env: ENV_RANK_LON,
        })?;
        require_in_range(ARG_RANK_LAT, lat, 90.0)?;
        require_in_range(ARG_RANK_LON, lon, 180.0)?;

        let default_base_url = HttpRankingProviderConfig::default().base_url;
        let base_url = args.base_url.unwrap_or(default_base_url);

        Ok(Self {
            position: Coord { x: lon, y: lat },
            base_url,
            catalog: args.catalog,
            json: args.json,
        })
    }
}

fn require_in_range(axis: &'static str, value: f64, limit: f64) -> Result<(), CliError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(CliError::InvalidCoordinate { axis, value })
    }
}

/// Builds a ranking provider for the current rank invocation.
pub(super) trait RankingProviderBuilder {
    fn build(&self, config: &RankConfig) -> Result<Box<dyn RankingProvider>, CliError>;
}

pub(super) struct HttpRankingProviderBuilder;

impl RankingProviderBuilder for HttpRankingProviderBuilder {
    fn build(&self, config: &RankConfig) -> Result<Box<dyn RankingProvider>, CliError> {
        let provider_config = HttpRankingProviderConfig::new(config.base_url.clone());
        let provider = HttpRankingProvider::with_config(provider_config).map_err(|source| {
            CliError::BuildRankingProvider {
                base_url: config.base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(provider))
    }
}

pub(crate) fn run_rank(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, &HttpRankingProviderBuilder, writer)
}

fn execute_rank(
    config: &RankConfig,
    builder: &dyn RankingProviderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalog = load_catalog(config.catalog.as_deref())?;
    let provider = builder.build(config)?;
    let location = FixedLocationProvider::new(config.position);

    let mut session = SpotSession::new(catalog);
    session.refresh_ranking(&location, provider.as_ref());

    match session.status() {
        RankingStatus::Ready => write_report(&session, config.json, writer),
        RankingStatus::Failed { message } => Err(CliError::Ranking {
            message: message.clone(),
        }),
        // refresh_ranking settles before returning, so these arms are
        // conservative fallbacks.
        RankingStatus::Idle | RankingStatus::Loading => Err(CliError::Ranking {
            message: RANKING_FAILURE_MESSAGE.to_owned(),
        }),
    }
}

/// JSON report for a completed ranking.
#[derive(Debug, Serialize)]
struct RankReport<'a> {
    ranked: &'a RankedList,
    best: BestReport<'a>,
}

/// The resolved best spot in report form.
#[derive(Debug, Serialize)]
struct BestReport<'a> {
    spot: &'a StudySpot,
    score: f32,
}

fn write_report(
    session: &SpotSession,
    json: bool,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let (Some(ranked), Some(best)) = (session.ranked_spots(), session.best_spot()) else {
        return Err(CliError::Ranking {
            message: RANKING_FAILURE_MESSAGE.to_owned(),
        });
    };

    if json {
        let report = RankReport {
            ranked,
            best: BestReport {
                spot: best.spot,
                score: best.score,
            },
        };
        let payload = serde_json::to_string_pretty(&report).map_err(CliError::SerialiseOutput)?;
        writeln!(writer, "{payload}").map_err(CliError::WriteOutput)?;
        return Ok(());
    }

    writeln!(writer, "Ranked study spots:").map_err(CliError::WriteOutput)?;
    for (index, entry) in ranked.iter().enumerate() {
        writeln!(
            writer,
            "{:>3}. {}  {}",
            index + 1,
            entry.name(),
            entry.score_percent()
        )
        .map_err(CliError::WriteOutput)?;
    }
    writeln!(writer).map_err(CliError::WriteOutput)?;
    writeln!(writer, "Best spot: {} ({})", best.spot.name, best.spot.category)
        .map_err(CliError::WriteOutput)?;
    writeln!(writer, "Rating: {:.1}/5.0", best.spot.rating).map_err(CliError::WriteOutput)?;
    if !best.spot.hours.is_empty() {
        writeln!(writer, "Hours: {}", best.spot.hours).map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
