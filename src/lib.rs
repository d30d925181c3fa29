//! Facade crate for the Spotfinder study spot discovery engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP ranking
//! client and the session controller behind feature flags.

#![forbid(unsafe_code)]

pub use spotfinder_core::{
    BestMatch, Catalog, CatalogError, FixedLocationProvider, LocationError, LocationProvider,
    NoiseLevel, NoiseLevelParseError, RankedList, RankedSpot, RankingError, RankingProvider,
    ResolveError, SpotError, SpotFilter, StudySpot,
};

#[cfg(feature = "http-client")]
pub use spotfinder_client::{HttpRankingProvider, HttpRankingProviderConfig, ProviderBuildError};

#[cfg(feature = "session")]
pub use spotfinder_session::{
    CommitOutcome, RankingFlowError, RankingStatus, RankingTicket, SessionError, SpotSession,
};
