//! Session state for a study spot front end.
//!
//! [`SpotSession`] owns the state a UI derives its rendering from: the
//! catalog, the active filter, the current selection, and the outcome of
//! the latest ranking flow. All mutation goes through explicit action
//! handlers; there are no hidden globals.
//!
//! The ranking flow is re-enterable and guarded by a request generation:
//! [`SpotSession::begin_ranking`] hands out a ticket, and
//! [`SpotSession::complete_ranking`] commits an outcome only when its ticket
//! is still current. A newer request therefore supersedes any in-flight one,
//! and the committed state always belongs to the latest request rather than
//! the last one to resolve.

#![forbid(unsafe_code)]

use log::{debug, warn};
use spotfinder_core::{
    BestMatch, Catalog, LocationError, LocationProvider, RankedList, RankingError,
    RankingProvider, SpotFilter, StudySpot,
};
use thiserror::Error;

/// Generic user-visible message for a failed ranking flow.
///
/// Position and network failures intentionally reduce to the same wording;
/// the specific cause goes to the log instead.
pub const RANKING_FAILURE_MESSAGE: &str = "could not fetch ranked study spots";

/// Lifecycle of the ranking flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingStatus {
    /// No ranking has been requested yet.
    Idle,
    /// A ranking request is in flight.
    Loading,
    /// The latest request committed a ranking.
    Ready,
    /// The latest request failed; previous results remain available.
    Failed {
        /// The user-visible failure message.
        message: String,
    },
}

/// Handle identifying one ranking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingTicket {
    generation: u64,
}

/// Result of offering an outcome to [`SpotSession::complete_ranking`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The outcome belonged to the current request and was applied.
    Committed,
    /// A newer request had already superseded this one; nothing changed.
    Superseded,
}

/// Errors from direct session actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The requested spot id is not in the catalog.
    #[error("no study spot with id {id}")]
    UnknownSpot {
        /// The unknown identifier.
        id: u64,
    },
}

/// A failure anywhere in the ranking flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingFlowError {
    /// Position acquisition failed; no network request was made.
    #[error(transparent)]
    Location(#[from] LocationError),
    /// The ranking request itself failed.
    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// UI-facing state controller for browsing and ranking study spots.
///
/// # Examples
/// ```
/// use spotfinder_core::{Catalog, SpotFilter};
/// use spotfinder_session::SpotSession;
///
/// let mut session = SpotSession::new(Catalog::campus_default());
/// session.set_filter(SpotFilter::default().with_search("library"));
///
/// for spot in session.visible_spots() {
///     println!("{} ({})", spot.name, spot.category);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SpotSession {
    catalog: Catalog,
    filter: SpotFilter,
    selected: Option<u64>,
    ranked: Option<RankedList>,
    best: Option<(u64, f32)>,
    status: RankingStatus,
    generation: u64,
}

impl SpotSession {
    /// Create a session over `catalog` with no filter, selection, or
    /// ranking state.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            filter: SpotFilter::default(),
            selected: None,
            ranked: None,
            best: None,
            status: RankingStatus::Idle,
            generation: 0,
        }
    }

    /// The catalog this session browses.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active filter parameters.
    pub fn filter(&self) -> &SpotFilter {
        &self.filter
    }

    /// Replace the filter parameters.
    pub fn set_filter(&mut self, filter: SpotFilter) {
        self.filter = filter;
    }

    /// The catalog records matching the active filter, in catalog order.
    ///
    /// Recomputed on demand; the filter is pure and cheap enough to apply
    /// on every input change.
    pub fn visible_spots(&self) -> Vec<&StudySpot> {
        self.catalog.filtered(&self.filter)
    }

    /// Select a spot for detail display.
    ///
    /// # Errors
    /// Returns [`SessionError::UnknownSpot`] when `id` is not in the
    /// catalog; the previous selection is kept.
    pub fn select(&mut self, id: u64) -> Result<(), SessionError> {
        if self.catalog.get(id).is_none() {
            return Err(SessionError::UnknownSpot { id });
        }
        self.selected = Some(id);
        Ok(())
    }

    /// The currently selected spot, when any.
    pub fn selected_spot(&self) -> Option<&StudySpot> {
        self.selected.and_then(|id| self.catalog.get(id))
    }

    /// The lifecycle state of the ranking flow.
    pub fn status(&self) -> &RankingStatus {
        &self.status
    }

    /// The latest committed ranking, when any.
    ///
    /// Failures never clear this: a failed refresh keeps showing the
    /// previous ranking.
    pub fn ranked_spots(&self) -> Option<&RankedList> {
        self.ranked.as_ref()
    }

    /// The best spot from the latest committed ranking, when any.
    pub fn best_spot(&self) -> Option<BestMatch<'_>> {
        let (id, score) = self.best?;
        self.catalog.get(id).map(|spot| BestMatch { spot, score })
    }

    /// Start a ranking request, superseding any in-flight one.
    ///
    /// Sets the status to [`RankingStatus::Loading`] and returns the ticket
    /// that [`Self::complete_ranking`] must present to commit.
    pub fn begin_ranking(&mut self) -> RankingTicket {
        self.generation += 1;
        self.status = RankingStatus::Loading;
        RankingTicket {
            generation: self.generation,
        }
    }

    /// Offer the outcome of a ranking request for commit.
    ///
    /// A stale ticket (one from a request that a newer `begin_ranking`
    /// superseded) is discarded without touching any state. For a current
    /// ticket:
    ///
    /// - a successful outcome resolves the top entry against the catalog
    ///   and commits the list, the best match, and the selection together;
    ///   a resolution miss commits nothing and surfaces a failure;
    /// - a failed outcome sets [`RankingStatus::Failed`] with the generic
    ///   message and leaves previous results and selection untouched.
    pub fn complete_ranking(
        &mut self,
        ticket: RankingTicket,
        outcome: Result<RankedList, RankingFlowError>,
    ) -> CommitOutcome {
        if ticket.generation != self.generation {
            debug!(
                "discarding superseded ranking result (ticket {}, current {})",
                ticket.generation, self.generation
            );
            return CommitOutcome::Superseded;
        }

        match outcome {
            Ok(list) => match list.resolve_best(&self.catalog) {
                Ok(best) => {
                    let (id, score) = (best.spot.id, best.score);
                    self.ranked = Some(list);
                    self.best = Some((id, score));
                    self.selected = Some(id);
                    self.status = RankingStatus::Ready;
                }
                Err(err) => {
                    warn!("ranking response could not be resolved: {err}");
                    self.status = RankingStatus::Failed {
                        message: err.to_string(),
                    };
                }
            },
            Err(err) => {
                warn!("ranking flow failed: {err}");
                self.status = RankingStatus::Failed {
                    message: RANKING_FAILURE_MESSAGE.to_owned(),
                };
            }
        }
        CommitOutcome::Committed
    }

    /// Run the whole ranking flow: acquire a position, fetch the ranking,
    /// and commit the outcome.
    ///
    /// A denied or unavailable position aborts before any network request.
    /// Errors reduce to session state rather than propagating, matching how
    /// a front end surfaces them inline.
    pub fn refresh_ranking(
        &mut self,
        location: &dyn LocationProvider,
        ranking: &dyn RankingProvider,
    ) -> &RankingStatus {
        let ticket = self.begin_ranking();
        let outcome = location
            .current_position()
            .map_err(RankingFlowError::from)
            .and_then(|position| {
                ranking
                    .ranked_spots(position)
                    .map_err(RankingFlowError::from)
            });
        self.complete_ranking(ticket, outcome);
        &self.status
    }
}

#[cfg(test)]
mod tests;
