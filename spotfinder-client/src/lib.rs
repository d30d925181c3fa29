//! HTTP client for the study spot ranking endpoint.
//!
//! This crate provides [`HttpRankingProvider`], an implementation of
//! [`spotfinder_core::RankingProvider`] that fetches a best-first ranking of
//! study spots from the ranking service.
//!
//! # Architecture
//!
//! The provider issues a single `GET /ranked?lat={}&lon={}` request per
//! call. The synchronous [`RankingProvider`](spotfinder_core::RankingProvider)
//! trait is implemented by blocking on the async HTTP call internally,
//! keeping the core library embeddable in synchronous contexts.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use geo::Coord;
//! use spotfinder_client::{HttpRankingProvider, HttpRankingProviderConfig};
//! use spotfinder_core::RankingProvider;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpRankingProviderConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_user_agent("my-app/1.0");
//! let provider = HttpRankingProvider::with_config(config)?;
//!
//! let ranked = provider.ranked_spots(Coord { x: -71.11, y: 42.35 })?;
//! if let Some(best) = ranked.top() {
//!     println!("{} scored {}", best.name(), best.score_percent());
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod provider;
mod wire;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_USER_AGENT, HttpRankingProvider, HttpRankingProviderConfig, ProviderBuildError,
};
