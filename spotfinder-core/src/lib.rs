//! Core domain types for the Spotfinder study spot discovery engine.
//!
//! The crate models a fixed catalog of campus study locations together with
//! the two behaviours every front end needs: a pure filter over the catalog
//! and the resolution of a server-computed ranking back onto catalog
//! records. Constructors return `Result` to surface invalid input early.
//!
//! Network and platform concerns are kept behind the [`RankingProvider`] and
//! [`LocationProvider`] traits so callers can swap the HTTP client or the
//! position source for deterministic test doubles.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod catalog;
mod filter;
mod location;
mod ranking;
mod spot;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use catalog::{Catalog, CatalogError};
pub use filter::SpotFilter;
pub use location::{FixedLocationProvider, LocationError, LocationProvider};
pub use ranking::{
    BestMatch, RankedList, RankedSpot, RankingError, RankingProvider, ResolveError,
};
pub use spot::{NoiseLevel, NoiseLevelParseError, SpotError, StudySpot};
