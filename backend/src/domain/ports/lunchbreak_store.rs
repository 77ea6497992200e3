//! Port for lunchbreak persistence.
//!
//! The store holds lunchbreaks and their owned participants, votes,
//! absences, and comments. Adapters must enforce two unique indexes —
//! one lunchbreak per (group, date), one participant and one absence per
//! (lunchbreak, member) — and report violations as
//! [`StoreError::UniqueViolation`] so the lifecycle can recover creation
//! races by re-fetching. Cascades are driven explicitly by the services;
//! adapters only need plain row CRUD plus the occupancy counts.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    Absence, Comment, CommentId, GroupId, Lunchbreak, LunchbreakId, MemberId, Participant,
    ParticipantId, PlaceId, Vote,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by lunchbreak store adapters.
    pub enum StoreError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "lunchbreak store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "lunchbreak store query failed: {message}",
        /// A unique index rejected the write; distinguishable so callers
        /// can recover insert races by re-fetching.
        UniqueViolation { constraint: String } =>
            "lunchbreak store unique constraint violated: {constraint}",
    }
}

/// Fields of a participant row to be inserted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewParticipant {
    /// Owning lunchbreak.
    pub lunchbreak_id: LunchbreakId,
    /// The participating member.
    pub member_id: MemberId,
    /// Place the member ended up eating at, if already known.
    pub result: Option<PlaceId>,
    /// What the member spent, if already known.
    pub amount_spent: Option<f64>,
}

/// Fields of a vote row to be inserted when replacing a vote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVote {
    /// Place the points go to.
    pub place_id: PlaceId,
    /// Assigned points.
    pub points: u32,
}

/// Row counts deciding whether a lunchbreak is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunchbreakOccupancy {
    /// Number of participant rows.
    pub participants: usize,
    /// Number of absence rows.
    pub absences: usize,
    /// Number of comment rows.
    pub comments: usize,
}

impl LunchbreakOccupancy {
    /// Whether the lunchbreak holds no participants, absences, or comments.
    pub fn is_empty(&self) -> bool {
        self.participants == 0 && self.absences == 0 && self.comments == 0
    }
}

/// Port for lunchbreak row storage with explicit child-row access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LunchbreakStore: Send + Sync {
    /// Find the lunchbreak for (group, date).
    async fn find_lunchbreak(
        &self,
        group_id: GroupId,
        date: NaiveDate,
    ) -> Result<Option<Lunchbreak>, StoreError>;

    /// Find a lunchbreak by row id.
    async fn find_lunchbreak_by_id(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Option<Lunchbreak>, StoreError>;

    /// Insert the lunchbreak row for (group, date).
    ///
    /// Fails with [`StoreError::UniqueViolation`] when a concurrent writer
    /// created the row first.
    async fn insert_lunchbreak(
        &self,
        group_id: GroupId,
        date: NaiveDate,
    ) -> Result<Lunchbreak, StoreError>;

    /// Delete a lunchbreak row. Returns whether a row was removed; deleting
    /// an already-absent lunchbreak is a no-op, not an error.
    async fn delete_lunchbreak(&self, lunchbreak_id: LunchbreakId) -> Result<bool, StoreError>;

    /// Lunchbreaks of a group within an inclusive date range, ordered by
    /// date.
    async fn list_lunchbreaks(
        &self,
        group_id: GroupId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Lunchbreak>, StoreError>;

    /// Participant, absence, and comment counts for a lunchbreak.
    async fn occupancy(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<LunchbreakOccupancy, StoreError>;

    /// Find a member's participant row on a lunchbreak.
    async fn find_participant(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Option<Participant>, StoreError>;

    /// Insert a participant row.
    async fn insert_participant(&self, new: NewParticipant) -> Result<Participant, StoreError>;

    /// Overwrite a participant's result and amount spent.
    async fn update_participant(
        &self,
        participant_id: ParticipantId,
        result: Option<PlaceId>,
        amount_spent: Option<f64>,
    ) -> Result<Participant, StoreError>;

    /// Delete a participant row. Returns whether a row was removed.
    async fn delete_participant(&self, participant_id: ParticipantId)
    -> Result<bool, StoreError>;

    /// Every participant row of a lunchbreak.
    async fn list_participants(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Participant>, StoreError>;

    /// Atomically replace a participant's entire vote set (delete-all then
    /// insert-all, never a per-vote merge).
    async fn replace_votes(
        &self,
        participant_id: ParticipantId,
        votes: Vec<NewVote>,
    ) -> Result<Vec<Vote>, StoreError>;

    /// A participant's current vote rows.
    async fn list_votes(&self, participant_id: ParticipantId) -> Result<Vec<Vote>, StoreError>;

    /// Find a member's absence row on a lunchbreak.
    async fn find_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Option<Absence>, StoreError>;

    /// Insert an absence row.
    async fn insert_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Absence, StoreError>;

    /// Delete a member's absence row. Returns whether a row was removed.
    async fn delete_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<bool, StoreError>;

    /// Every absence row of a lunchbreak.
    async fn list_absences(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Absence>, StoreError>;

    /// Insert a comment row.
    async fn insert_comment(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: Option<MemberId>,
        text: String,
    ) -> Result<Comment, StoreError>;

    /// Find a comment by row id.
    async fn find_comment(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// Delete a comment row. Returns whether a row was removed.
    async fn delete_comment(&self, comment_id: CommentId) -> Result<bool, StoreError>;

    /// Every comment row of a lunchbreak.
    async fn list_comments(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Comment>, StoreError>;
}
