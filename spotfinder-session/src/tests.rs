//! Unit coverage for the session controller.

use geo::Coord;
use rstest::{fixture, rstest};
use spotfinder_client::test_support::StubRankingProvider;
use spotfinder_core::test_support::StubLocationProvider;
use spotfinder_core::{Catalog, NoiseLevel, RankingError, SpotFilter};

use super::*;

#[fixture]
fn session() -> SpotSession {
    SpotSession::new(Catalog::campus_default())
}

#[fixture]
fn here() -> StubLocationProvider {
    StubLocationProvider::with_position(Coord {
        x: -71.1097,
        y: 42.3505,
    })
}

#[rstest]
fn new_session_starts_idle(session: SpotSession) {
    assert_eq!(session.status(), &RankingStatus::Idle);
    assert!(session.selected_spot().is_none());
    assert!(session.ranked_spots().is_none());
    assert!(session.best_spot().is_none());
}

#[rstest]
fn filter_changes_rederive_the_visible_list(mut session: SpotSession) {
    session.set_filter(SpotFilter::default().with_noise(NoiseLevel::Quiet));
    let quiet = session.visible_spots();
    assert!(quiet.iter().all(|spot| spot.noise == Some(NoiseLevel::Quiet)));

    session.set_filter(SpotFilter::default());
    assert_eq!(session.visible_spots().len(), session.catalog().len());
}

#[rstest]
fn selection_requires_a_known_id(mut session: SpotSession) {
    session.select(3).expect("id 3 exists");
    assert_eq!(session.selected_spot().map(|spot| spot.id), Some(3));

    let err = session.select(99).unwrap_err();
    assert_eq!(err, SessionError::UnknownSpot { id: 99 });
    // The previous selection survives a failed pick.
    assert_eq!(session.selected_spot().map(|spot| spot.id), Some(3));
}

#[rstest]
fn successful_flow_commits_ranking_and_selection(
    mut session: SpotSession,
    here: StubLocationProvider,
) {
    let ranking = StubRankingProvider::with_entries([
        ("Mugar Memorial Library", 0.75),
        ("CDS Collaborative Space", 0.66),
    ]);

    let status = session.refresh_ranking(&here, &ranking);

    assert_eq!(status, &RankingStatus::Ready);
    let best = session.best_spot().expect("best spot committed");
    assert_eq!(best.spot.name, "Mugar Memorial Library");
    assert_eq!(best.score, 0.75);
    assert_eq!(
        session.best_spot().map(|best| best.spot.id),
        session.selected_spot().map(|spot| spot.id),
    );
    let ranked = session.ranked_spots().expect("list committed");
    assert_eq!(ranked.len(), 2);
    assert_eq!(
        ranked.top().map(|entry| entry.score_percent()),
        Some("75.0%".to_owned()),
    );
}

#[rstest]
fn denied_position_fails_without_touching_results(
    mut session: SpotSession,
    here: StubLocationProvider,
) {
    let ranking = StubRankingProvider::with_entries([("Pardee Library", 0.9)]);
    session.refresh_ranking(&here, &ranking);
    session.select(2).expect("id 2 exists");

    let status = session.refresh_ranking(&StubLocationProvider::denied(), &ranking);

    assert_eq!(status, &RankingStatus::Failed {
        message: RANKING_FAILURE_MESSAGE.to_owned(),
    });
    // Previous ranking results and selection survive the failure.
    let best = session.best_spot().expect("previous best kept");
    assert_eq!(best.spot.name, "Pardee Library");
    assert_eq!(session.selected_spot().map(|spot| spot.id), Some(2));
}

#[rstest]
fn network_failure_reduces_to_the_generic_message(
    mut session: SpotSession,
    here: StubLocationProvider,
) {
    let ranking = StubRankingProvider::with_error(RankingError::Http {
        url: "http://localhost:8000/ranked".to_owned(),
        status: 500,
        message: "internal server error".to_owned(),
    });

    let status = session.refresh_ranking(&here, &ranking);

    assert_eq!(status, &RankingStatus::Failed {
        message: RANKING_FAILURE_MESSAGE.to_owned(),
    });
    assert!(session.ranked_spots().is_none());
}

#[rstest]
fn unknown_top_name_surfaces_a_resolution_failure(
    mut session: SpotSession,
    here: StubLocationProvider,
) {
    let ranking = StubRankingProvider::with_entries([("Warren Towers Lounge", 0.9)]);

    let status = session.refresh_ranking(&here, &ranking);

    let RankingStatus::Failed { message } = status else {
        panic!("expected a failed status, got {status:?}");
    };
    assert!(message.contains("Warren Towers Lounge"));
    // Nothing is committed on a resolution miss.
    assert!(session.ranked_spots().is_none());
    assert!(session.best_spot().is_none());
    assert!(session.selected_spot().is_none());
}

#[rstest]
fn flow_is_reenterable_after_failure(mut session: SpotSession, here: StubLocationProvider) {
    session.refresh_ranking(&StubLocationProvider::denied(), &StubRankingProvider::with_entries(
        [("Mugar Memorial Library", 0.75)],
    ));
    assert!(matches!(session.status(), RankingStatus::Failed { .. }));

    let ranking = StubRankingProvider::with_entries([("Mugar Memorial Library", 0.75)]);
    let status = session.refresh_ranking(&here, &ranking);

    assert_eq!(status, &RankingStatus::Ready);
}

#[rstest]
fn superseded_ticket_is_discarded(mut session: SpotSession) {
    let stale = session.begin_ranking();
    let current = session.begin_ranking();

    let stale_list = RankedList::new(vec![spotfinder_core::RankedSpot::new("BU Beach", 0.2)]);
    let outcome = session.complete_ranking(stale, Ok(stale_list));
    assert_eq!(outcome, CommitOutcome::Superseded);
    // The stale result left no trace; the newer request is still loading.
    assert_eq!(session.status(), &RankingStatus::Loading);
    assert!(session.ranked_spots().is_none());

    let fresh_list = RankedList::new(vec![spotfinder_core::RankedSpot::new(
        "Mugar Memorial Library",
        0.75,
    )]);
    let outcome = session.complete_ranking(current, Ok(fresh_list));
    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(session.status(), &RankingStatus::Ready);
    let best = session.best_spot().expect("fresh result committed");
    assert_eq!(best.spot.name, "Mugar Memorial Library");
}

#[rstest]
fn latest_request_wins_even_when_it_resolves_first(mut session: SpotSession) {
    let first = session.begin_ranking();
    let second = session.begin_ranking();

    let newer = RankedList::new(vec![spotfinder_core::RankedSpot::new("Pardee Library", 0.8)]);
    assert_eq!(
        session.complete_ranking(second, Ok(newer)),
        CommitOutcome::Committed
    );

    let older = RankedList::new(vec![spotfinder_core::RankedSpot::new("BU Beach", 0.3)]);
    assert_eq!(
        session.complete_ranking(first, Ok(older)),
        CommitOutcome::Superseded
    );

    let best = session.best_spot().expect("newest result kept");
    assert_eq!(best.spot.name, "Pardee Library");
}
