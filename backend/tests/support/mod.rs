//! Shared harness driving the whole engine over the in-memory store.
//!
//! Each test builds an [`Engine`]: the four domain services wired to one
//! [`MemoryLunchbreakStore`], one frozen [`MutableClock`], and a
//! [`GroupDirectory`] with a single group of three members and three
//! places. Suites freeze the clock, drive commands, and observe state
//! through the query service or the store.

use std::sync::Arc;

use backend::domain::ports::{
    AbsenceRequest, CreateParticipationRequest, NoOpAuditLog, VoteRequest,
};
use backend::domain::{
    AbsenceCommandService, CommentCommandService, GroupConfig, GroupDayLocks, GroupId,
    LunchbreakQueryService, MemberId, ParticipationCommandService, PlaceId,
};
use backend::outbound::MemoryLunchbreakStore;
use backend::test_support::{GroupDirectory, MutableClock};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use vote_budget::BudgetRules;

pub use backend::test_support::instant;

pub const GROUP: GroupId = GroupId::new(1);
pub const ALICE: MemberId = MemberId::new(1);
pub const BOB: MemberId = MemberId::new(2);
pub const CARA: MemberId = MemberId::new(3);
pub const PASTA: PlaceId = PlaceId::new(1);
pub const BURGERS: PlaceId = PlaceId::new(2);
pub const RAMEN: PlaceId = PlaceId::new(3);

/// The date every suite votes on.
pub fn vote_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 13).expect("valid date")
}

/// Group rules used throughout: cutoff 12:25 local, budget 100 points per
/// day spread over votes of 30 to 70 points.
pub fn group_config(utc_offset_minutes: i32) -> GroupConfig {
    let budget = BudgetRules::new(100, 30, 70).expect("valid budget");
    let cutoff = NaiveTime::from_hms_opt(12, 25, 0).expect("valid time");
    GroupConfig::new(cutoff, utc_offset_minutes, budget).expect("valid config")
}

/// Every engine service wired to one store, clock, and directory.
pub struct Engine {
    pub clock: Arc<MutableClock>,
    pub store: Arc<MemoryLunchbreakStore>,
    pub participations:
        ParticipationCommandService<MemoryLunchbreakStore, GroupDirectory, GroupDirectory>,
    pub absences: AbsenceCommandService<MemoryLunchbreakStore, GroupDirectory>,
    pub comments: CommentCommandService<MemoryLunchbreakStore, GroupDirectory>,
    pub queries: LunchbreakQueryService<MemoryLunchbreakStore, GroupDirectory>,
}

impl Engine {
    /// Engine for a group whose local time is UTC, frozen at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self::build(Arc::new(MemoryLunchbreakStore::new()), now, 0)
    }

    /// Engine for a group with the given UTC offset, frozen at `now`.
    pub fn with_offset(now: DateTime<Utc>, utc_offset_minutes: i32) -> Self {
        Self::build(
            Arc::new(MemoryLunchbreakStore::new()),
            now,
            utc_offset_minutes,
        )
    }

    /// Engine sharing an existing store, as a second process would. Lock
    /// maps are per-engine, so two sharing engines genuinely race on the
    /// store's unique indexes.
    pub fn sharing_store(store: Arc<MemoryLunchbreakStore>, now: DateTime<Utc>) -> Self {
        Self::build(store, now, 0)
    }

    fn build(
        store: Arc<MemoryLunchbreakStore>,
        now: DateTime<Utc>,
        utc_offset_minutes: i32,
    ) -> Self {
        let clock = Arc::new(MutableClock::new(now));
        let directory = Arc::new(
            GroupDirectory::new()
                .with_group(GROUP, group_config(utc_offset_minutes))
                .with_members(GROUP, [ALICE, BOB, CARA])
                .with_places(GROUP, [PASTA, BURGERS, RAMEN]),
        );
        let locks = Arc::new(GroupDayLocks::new());
        let audit = Arc::new(NoOpAuditLog);

        Self {
            participations: ParticipationCommandService::new(
                Arc::clone(&store),
                Arc::clone(&directory),
                Arc::clone(&directory),
                clock.clone(),
                Arc::clone(&locks),
                audit.clone(),
            ),
            absences: AbsenceCommandService::new(
                Arc::clone(&store),
                Arc::clone(&directory),
                clock.clone(),
                Arc::clone(&locks),
                audit.clone(),
            ),
            comments: CommentCommandService::new(
                Arc::clone(&store),
                Arc::clone(&directory),
                clock.clone(),
                Arc::clone(&locks),
                audit.clone(),
            ),
            queries: LunchbreakQueryService::new(Arc::clone(&store), directory),
            clock,
            store,
        }
    }
}

/// A participation request for `member` on `date` with the given votes.
pub fn participation(
    member: MemberId,
    date: NaiveDate,
    votes: &[(PlaceId, u32)],
) -> CreateParticipationRequest {
    CreateParticipationRequest {
        group_id: GROUP,
        date,
        member_id: member,
        votes: votes
            .iter()
            .map(|&(place_id, points)| VoteRequest { place_id, points })
            .collect(),
        result: None,
        amount_spent: None,
    }
}

/// An absence request for `member` on `date`.
pub fn absence(member: MemberId, date: NaiveDate) -> AbsenceRequest {
    AbsenceRequest {
        group_id: GROUP,
        date,
        member_id: member,
    }
}
