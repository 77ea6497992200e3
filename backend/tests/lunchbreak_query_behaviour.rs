//! End-to-end behaviour of the hydrated lunchbreak queries, driven purely
//! through the command services.

mod support;

use backend::domain::ErrorCode;
use backend::domain::ports::{
    AbsenceCommand, CreateParticipationRequest, GetLunchbreakRequest, GetLunchbreaksRequest,
    LunchbreakQuery, ParticipationCommand,
};
use chrono::TimeDelta;

use support::{
    ALICE, BOB, BURGERS, CARA, Engine, GROUP, PASTA, absence, instant, participation, vote_day,
};

#[tokio::test]
async fn a_day_without_activity_has_no_lunchbreak() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    let error = engine
        .queries
        .get_lunchbreak(GetLunchbreakRequest {
            group_id: GROUP,
            date: vote_day(),
        })
        .await
        .expect_err("nothing recorded for the date");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn the_snapshot_separates_participants_absentees_and_the_responseless() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .participations
        .create_or_replace(CreateParticipationRequest {
            result: Some(PASTA),
            amount_spent: Some(8.9),
            ..participation(ALICE, vote_day(), &[(PASTA, 70), (BURGERS, 30)])
        })
        .await
        .expect("participation lands");
    engine
        .absences
        .mark_absent(absence(BOB, vote_day()))
        .await
        .expect("absence is recorded");

    let snapshot = engine
        .queries
        .get_lunchbreak(GetLunchbreakRequest {
            group_id: GROUP,
            date: vote_day(),
        })
        .await
        .expect("snapshot hydrates");

    let participation = snapshot.participations.first().expect("one participation");
    assert_eq!(participation.member_id, ALICE);
    assert_eq!(participation.result, Some(PASTA));
    assert_eq!(participation.amount_spent, Some(8.9));
    assert_eq!(participation.votes.len(), 2);

    assert_eq!(snapshot.absent_member_ids, vec![BOB]);
    assert_eq!(snapshot.responseless_member_ids, vec![CARA]);
}

#[tokio::test]
async fn everyone_answering_leaves_nobody_responseless() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .participations
        .create_or_replace(participation(ALICE, vote_day(), &[]))
        .await
        .expect("participation lands");
    engine
        .participations
        .create_or_replace(participation(CARA, vote_day(), &[(PASTA, 30)]))
        .await
        .expect("participation lands");
    engine
        .absences
        .mark_absent(absence(BOB, vote_day()))
        .await
        .expect("absence is recorded");

    let snapshot = engine
        .queries
        .get_lunchbreak(GetLunchbreakRequest {
            group_id: GROUP,
            date: vote_day(),
        })
        .await
        .expect("snapshot hydrates");
    assert!(snapshot.responseless_member_ids.is_empty());
}

#[tokio::test]
async fn range_queries_cover_each_day_once_in_date_order() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .participations
        .create_or_replace(participation(ALICE, vote_day(), &[(PASTA, 70)]))
        .await
        .expect("participation lands on day one");

    // The group moves on to the next day; the clock follows.
    engine.clock.advance(TimeDelta::days(1));
    let next_day = vote_day().succ_opt().expect("next day exists");
    engine
        .absences
        .mark_absent(absence(ALICE, next_day))
        .await
        .expect("absence is recorded on day two");

    let snapshots = engine
        .queries
        .get_lunchbreaks(GetLunchbreaksRequest {
            group_id: GROUP,
            from_date: vote_day(),
            to_date: next_day,
        })
        .await
        .expect("range hydrates");

    assert_eq!(snapshots.len(), 2);
    assert_eq!(
        snapshots.first().map(|snapshot| snapshot.date),
        Some(vote_day())
    );
    assert_eq!(
        snapshots.last().map(|snapshot| snapshot.date),
        Some(next_day)
    );

    let first = snapshots.first().expect("day one snapshot");
    assert_eq!(first.participations.len(), 1);
    let second = snapshots.last().expect("day two snapshot");
    assert_eq!(second.absent_member_ids, vec![ALICE]);
}
