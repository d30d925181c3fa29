//! HTTP-based `RankingProvider` for the `/ranked` endpoint.

use std::time::Duration;

use geo::Coord;
use reqwest::Client;
use spotfinder_core::{RankedList, RankingError, RankingProvider};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use crate::wire::{RankedPairWire, into_ranked_list};

/// Error type for [`HttpRankingProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Default user agent for ranking requests.
pub const DEFAULT_USER_AGENT: &str = "spotfinder-client/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the ranking service.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Configuration for [`HttpRankingProvider`].
#[derive(Debug, Clone)]
pub struct HttpRankingProviderConfig {
    /// Base URL for the ranking service (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRankingProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRankingProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based ranking provider.
///
/// This provider implements the synchronous
/// [`RankingProvider`](spotfinder_core::RankingProvider) trait by internally
/// blocking on asynchronous HTTP requests. It owns a Tokio runtime that is
/// reused across calls.
///
/// # Runtime behaviour
///
/// When called from outside any Tokio runtime, the provider uses its own
/// stored runtime. When called from within an existing multi-threaded Tokio
/// runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]), it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own internal runtime.
pub struct HttpRankingProvider {
    client: Client,
    config: HttpRankingProviderConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpRankingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRankingProvider")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpRankingProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpRankingProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpRankingProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &HttpRankingProviderConfig {
        &self.config
    }

    /// Build the ranking URL for the given position.
    ///
    /// The URL format is `{base_url}/ranked?lat={latitude}&lon={longitude}`,
    /// with `x = longitude` and `y = latitude` on the input coordinate.
    fn build_ranked_url(&self, position: Coord<f64>) -> String {
        format!(
            "{}/ranked?lat={}&lon={}",
            self.config.base_url.trim_end_matches('/'),
            position.y,
            position.x,
        )
    }

    /// Fetch the ranked list asynchronously.
    async fn fetch_ranked_async(&self, position: Coord<f64>) -> Result<RankedList, RankingError> {
        let url = self.build_ranked_url(position);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let pairs: Vec<RankedPairWire> =
            response
                .json()
                .await
                .map_err(|err| RankingError::Parse {
                    message: err.to_string(),
                })?;

        Ok(into_ranked_list(pairs))
    }

    /// Convert a reqwest error to a `RankingError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> RankingError {
        if error.is_timeout() {
            return RankingError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return RankingError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        RankingError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

impl RankingProvider for HttpRankingProvider {
    /// Fetch the ranked spots for `position`.
    ///
    /// # Runtime requirements
    ///
    /// When called from within an existing Tokio runtime, the runtime should
    /// be multi-threaded (`flavor = "multi_thread"`). From a
    /// `current_thread` runtime the method falls back to its own internal
    /// runtime, which may block the caller's runtime.
    fn ranked_spots(&self, position: Coord<f64>) -> Result<RankedList, RankingError> {
        // block_in_place requires a multi-threaded runtime; for
        // current_thread runtimes fall back to the stored runtime.
        let future = self.fetch_ranked_async(position);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
