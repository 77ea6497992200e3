//! End-to-end behaviour of absences, the participant/absence mutual
//! exclusion, comment hooks, and lunchbreak auto-deletion.

mod support;

use backend::domain::ErrorCode;
use backend::domain::CommentId;
use backend::domain::ports::{
    AbsenceCommand, AddCommentRequest, CommentCommand, LunchbreakStore as _, ParticipationCommand,
};
use futures::future::join;

use support::{ALICE, BOB, Engine, GROUP, PASTA, absence, instant, participation, vote_day};

#[tokio::test]
async fn marking_absent_supersedes_a_participation() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .participations
        .create_or_replace(participation(ALICE, vote_day(), &[(PASTA, 70)]))
        .await
        .expect("participation lands");
    engine
        .absences
        .mark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence is recorded");

    let lunchbreak = engine
        .store
        .find_lunchbreak(GROUP, vote_day())
        .await
        .expect("lookup succeeds")
        .expect("lunchbreak exists");
    assert!(
        engine
            .store
            .find_participant(lunchbreak.id, ALICE)
            .await
            .expect("lookup succeeds")
            .is_none()
    );
    assert!(
        engine
            .store
            .find_absence(lunchbreak.id, ALICE)
            .await
            .expect("lookup succeeds")
            .is_some()
    );
}

#[tokio::test]
async fn participating_supersedes_an_absence() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .absences
        .mark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence is recorded");
    engine
        .participations
        .create_or_replace(participation(ALICE, vote_day(), &[(PASTA, 70)]))
        .await
        .expect("participation lands");

    let lunchbreak = engine
        .store
        .find_lunchbreak(GROUP, vote_day())
        .await
        .expect("lookup succeeds")
        .expect("lunchbreak exists");
    assert!(
        engine
            .store
            .find_absence(lunchbreak.id, ALICE)
            .await
            .expect("lookup succeeds")
            .is_none()
    );
    assert!(
        engine
            .store
            .find_participant(lunchbreak.id, ALICE)
            .await
            .expect("lookup succeeds")
            .is_some()
    );
}

#[tokio::test]
async fn withdrawing_the_last_absence_dissolves_the_lunchbreak() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .absences
        .mark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence is recorded");
    engine
        .absences
        .unmark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence withdraws");

    assert!(
        engine
            .store
            .find_lunchbreak(GROUP, vote_day())
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[tokio::test]
async fn any_remaining_activity_keeps_the_lunchbreak_alive() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .absences
        .mark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence is recorded");
    engine
        .participations
        .create_or_replace(participation(BOB, vote_day(), &[]))
        .await
        .expect("participation lands");

    engine
        .absences
        .unmark_absent(absence(ALICE, vote_day()))
        .await
        .expect("absence withdraws");

    assert!(
        engine
            .store
            .find_lunchbreak(GROUP, vote_day())
            .await
            .expect("lookup succeeds")
            .is_some()
    );
}

#[tokio::test]
async fn the_first_comment_creates_the_lunchbreak() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    engine
        .comments
        .add_comment(AddCommentRequest {
            group_id: GROUP,
            date: vote_day(),
            member_id: Some(ALICE),
            text: "who picked this place".to_owned(),
        })
        .await
        .expect("comment lands");

    assert!(
        engine
            .store
            .find_lunchbreak(GROUP, vote_day())
            .await
            .expect("lookup succeeds")
            .is_some()
    );
}

#[tokio::test]
async fn commenting_on_a_closed_day_without_a_lunchbreak_is_rejected() {
    let engine = Engine::at(instant(vote_day(), 13, 0, 0));
    let error = engine
        .comments
        .add_comment(AddCommentRequest {
            group_id: GROUP,
            date: vote_day(),
            member_id: Some(ALICE),
            text: "too late".to_owned(),
        })
        .await
        .expect_err("no lunchbreak may be created after the gate");
    assert_eq!(error.code(), ErrorCode::VotingClosed);
}

#[tokio::test]
async fn removing_the_last_comment_dissolves_the_lunchbreak() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    let comment = engine
        .comments
        .add_comment(AddCommentRequest {
            group_id: GROUP,
            date: vote_day(),
            member_id: Some(ALICE),
            text: "rain check".to_owned(),
        })
        .await
        .expect("comment lands");

    engine
        .comments
        .remove_comment(comment.id)
        .await
        .expect("comment removes");

    assert!(
        engine
            .store
            .find_lunchbreak(GROUP, vote_day())
            .await
            .expect("lookup succeeds")
            .is_none()
    );
}

#[tokio::test]
async fn removing_a_missing_comment_fails_not_found() {
    let engine = Engine::at(instant(vote_day(), 12, 0, 0));
    let error = engine
        .comments
        .remove_comment(CommentId::new(404))
        .await
        .expect_err("comment does not exist");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn concurrent_first_actions_converge_on_one_lunchbreak() {
    let now = instant(vote_day(), 12, 0, 0);
    let first = Engine::at(now);
    let second = Engine::sharing_store(first.store.clone(), now);

    // Separate engines, separate lock maps: both writers may reach the
    // store's unique index at once, and the loser must re-fetch.
    let (alice, bob) = join(
        first
            .participations
            .create_or_replace(participation(ALICE, vote_day(), &[(PASTA, 70)])),
        second
            .participations
            .create_or_replace(participation(BOB, vote_day(), &[(PASTA, 30)])),
    )
    .await;
    alice.expect("first writer succeeds");
    bob.expect("second writer succeeds");

    let lunchbreak = first
        .store
        .find_lunchbreak(GROUP, vote_day())
        .await
        .expect("lookup succeeds")
        .expect("exactly one lunchbreak row exists");
    let participants = first
        .store
        .list_participants(lunchbreak.id)
        .await
        .expect("lookup succeeds");
    assert_eq!(participants.len(), 2);
}
