//! Ranked results from the ranking endpoint and their catalog resolution.
//!
//! The ranking service returns name/score pairs already ordered best-first;
//! no re-sorting happens on this side. Scores are sanitised into
//! `0.0..=1.0` on construction so downstream display code can render them
//! as percentages without further guards.

use geo::Coord;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::spot::StudySpot;

/// A single entry of a ranking response: a spot name and its score.
///
/// # Examples
/// ```
/// use spotfinder_core::RankedSpot;
///
/// let entry = RankedSpot::new("Mugar Memorial Library", 0.75);
/// assert_eq!(entry.score_percent(), "75.0%");
/// ```
// Serialize only: deserialisation happens in the client's wire module so
// every score passes through the sanitising constructor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedSpot {
    name: String,
    score: f32,
}

impl RankedSpot {
    /// Construct an entry, sanitising the score.
    ///
    /// Non-finite scores become `0.0`; finite scores are clamped into
    /// `0.0..=1.0`.
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score: sanitise(score),
        }
    }

    /// The spot name reported by the ranking service.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The sanitised score in `0.0..=1.0`.
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Render the score as a percentage with one decimal place.
    pub fn score_percent(&self) -> String {
        format!("{:.1}%", self.score * 100.0)
    }
}

fn sanitise(score: f32) -> f32 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 1.0)
}

/// An ordered ranking response, best entry first.
///
/// The list preserves the order returned by the ranking endpoint verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RankedList {
    entries: Vec<RankedSpot>,
}

impl RankedList {
    /// Wrap a list of entries in response order.
    pub fn new(entries: Vec<RankedSpot>) -> Self {
        Self { entries }
    }

    /// The best-ranked entry, when any exists.
    pub fn top(&self) -> Option<&RankedSpot> {
        self.entries.first()
    }

    /// Iterate over entries in rank order.
    pub fn iter(&self) -> std::slice::Iter<'_, RankedSpot> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the response carried no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the top entry against the catalog by exact name.
    ///
    /// # Errors
    /// Returns [`ResolveError::EmptyRanking`] for an empty list and
    /// [`ResolveError::UnknownName`] when the top entry's name matches no
    /// catalog record. A miss is surfaced rather than silently ignored so
    /// callers never proceed with an undefined selection.
    ///
    /// # Examples
    /// ```
    /// use spotfinder_core::{Catalog, RankedList, RankedSpot};
    ///
    /// let catalog = Catalog::campus_default();
    /// let list = RankedList::new(vec![
    ///     RankedSpot::new("Mugar Memorial Library", 0.75),
    ///     RankedSpot::new("CDS Collaborative Space", 0.66),
    /// ]);
    ///
    /// let best = list.resolve_best(&catalog)?;
    /// assert_eq!(best.spot.id, 1);
    /// assert_eq!(best.score, 0.75);
    /// # Ok::<(), spotfinder_core::ResolveError>(())
    /// ```
    pub fn resolve_best<'a>(&self, catalog: &'a Catalog) -> Result<BestMatch<'a>, ResolveError> {
        let top = self.top().ok_or(ResolveError::EmptyRanking)?;
        let spot = catalog
            .find_by_name(top.name())
            .ok_or_else(|| ResolveError::UnknownName {
                name: top.name().to_owned(),
            })?;
        Ok(BestMatch {
            spot,
            score: top.score(),
        })
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a RankedSpot;
    type IntoIter = std::slice::Iter<'a, RankedSpot>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The catalog record matching the top-ranked entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch<'a> {
    /// The resolved catalog record.
    pub spot: &'a StudySpot,
    /// The top entry's sanitised score.
    pub score: f32,
}

/// Errors from [`RankedList::resolve_best`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The ranking response carried no entries.
    #[error("ranking response contained no entries")]
    EmptyRanking,
    /// The top-ranked name matched no catalog record.
    #[error("top-ranked spot '{name}' is not in the catalog")]
    UnknownName {
        /// The name reported by the ranking service.
        name: String,
    },
}

/// Errors from [`RankingProvider::ranked_spots`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    /// The request exceeded the configured timeout.
    #[error("ranking request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// The requested URL.
        url: String,
        /// The configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The endpoint answered with a non-2xx status.
    #[error("ranking endpoint {url} returned HTTP {status}: {message}")]
    Http {
        /// The requested URL.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Description of the failure.
        message: String,
    },
    /// The endpoint could not be reached.
    #[error("failed to reach ranking endpoint {url}: {message}")]
    Network {
        /// The requested URL.
        url: String,
        /// Description of the transport failure.
        message: String,
    },
    /// The response body was not a valid ranking payload.
    #[error("failed to parse ranking response: {message}")]
    Parse {
        /// Description of the decode failure.
        message: String,
    },
}

/// Fetch a ranked ordering of study spots for a position.
///
/// Implementations must be thread-safe (`Send` + `Sync`) and must preserve
/// the order returned by the ranking service.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use spotfinder_core::{RankedList, RankedSpot, RankingError, RankingProvider};
///
/// struct SingleSpotProvider;
///
/// impl RankingProvider for SingleSpotProvider {
///     fn ranked_spots(&self, _position: Coord<f64>) -> Result<RankedList, RankingError> {
///         Ok(RankedList::new(vec![RankedSpot::new("Mugar Memorial Library", 1.0)]))
///     }
/// }
///
/// let list = SingleSpotProvider.ranked_spots(Coord { x: -71.11, y: 42.35 })?;
/// assert_eq!(list.len(), 1);
/// # Ok::<(), RankingError>(())
/// ```
pub trait RankingProvider: Send + Sync {
    /// Return the ranked spots for `position` (`x = longitude`,
    /// `y = latitude`), best first.
    fn ranked_spots(&self, position: Coord<f64>) -> Result<RankedList, RankingError>;
}
