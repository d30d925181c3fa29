//! Test utilities for ranking providers.
//!
//! [`StubRankingProvider`] is a deterministic test double for
//! [`RankingProvider`] that returns pre-configured responses without making
//! actual HTTP requests.

use geo::Coord;
use spotfinder_core::{RankedList, RankedSpot, RankingError, RankingProvider};

/// Stub `RankingProvider` for testing.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use spotfinder_client::test_support::StubRankingProvider;
/// use spotfinder_core::{RankedSpot, RankingProvider};
///
/// let provider = StubRankingProvider::with_entries([("Mugar", 0.75), ("CDS", 0.66)]);
///
/// let ranked = provider
///     .ranked_spots(Coord { x: -71.11, y: 42.35 })
///     .expect("stub always succeeds");
/// assert_eq!(ranked.top().map(RankedSpot::name), Some("Mugar"));
/// ```
#[derive(Debug, Clone)]
pub struct StubRankingProvider {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    List(RankedList),
    Error(RankingError),
}

impl StubRankingProvider {
    /// Create a provider that returns the given list for any position.
    #[must_use]
    pub fn with_list(list: RankedList) -> Self {
        Self {
            response: StubResponse::List(list),
        }
    }

    /// Create a provider from `(name, score)` pairs in rank order.
    #[must_use]
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        Self::with_list(RankedList::new(
            entries
                .into_iter()
                .map(|(name, score)| RankedSpot::new(name, score))
                .collect(),
        ))
    }

    /// Create a provider that fails with the given error for any position.
    #[must_use]
    pub fn with_error(error: RankingError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

impl RankingProvider for StubRankingProvider {
    fn ranked_spots(&self, _position: Coord<f64>) -> Result<RankedList, RankingError> {
        match &self.response {
            StubResponse::List(list) => Ok(list.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
