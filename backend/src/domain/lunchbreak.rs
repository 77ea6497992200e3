//! Lunchbreak entities and hydrated read models.
//!
//! A lunchbreak is the single daily voting event of one group on one date.
//! It exclusively owns its participants, absences, and comments; a
//! participant exclusively owns its votes. The records here mirror what the
//! store persists; the snapshot types are the hydrated shapes handed to
//! callers.
//!
//! Invariants (enforced by the services and the store's unique indexes, not
//! by these types):
//! - at most one lunchbreak per (group, date),
//! - at most one participant and at most one absence per (lunchbreak,
//!   member), never both at once.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{CommentId, GroupId, LunchbreakId, MemberId, ParticipantId, PlaceId};

/// One group's voting event for one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lunchbreak {
    /// Row identifier.
    pub id: LunchbreakId,
    /// Owning group.
    pub group_id: GroupId,
    /// Calendar date, no time component.
    pub date: NaiveDate,
}

/// A member's recorded involvement in a lunchbreak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Row identifier.
    pub id: ParticipantId,
    /// Owning lunchbreak.
    pub lunchbreak_id: LunchbreakId,
    /// The participating member.
    pub member_id: MemberId,
    /// Place the member ended up eating at, once known.
    pub result: Option<PlaceId>,
    /// What the member spent, once known.
    pub amount_spent: Option<f64>,
}

/// Points one participant assigned to one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Owning participant.
    pub participant_id: ParticipantId,
    /// Place the points go to.
    pub place_id: PlaceId,
    /// Assigned points.
    pub points: u32,
}

/// A member's declaration of non-involvement, mutually exclusive with a
/// participant row for the same lunchbreak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Absence {
    /// Owning lunchbreak.
    pub lunchbreak_id: LunchbreakId,
    /// The absent member.
    pub member_id: MemberId,
}

/// A comment left on a lunchbreak. Text is stored opaquely; comments matter
/// to the engine only through the lunchbreak emptiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Row identifier.
    pub id: CommentId,
    /// Owning lunchbreak.
    pub lunchbreak_id: LunchbreakId,
    /// Author, absent once the member was removed from the group.
    pub member_id: Option<MemberId>,
    /// Opaque comment text.
    pub text: String,
}

/// One vote of a hydrated participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedVote {
    /// Place the points go to.
    pub place_id: PlaceId,
    /// Assigned points.
    pub points: u32,
}

impl From<Vote> for RecordedVote {
    fn from(vote: Vote) -> Self {
        Self {
            place_id: vote.place_id,
            points: vote.points,
        }
    }
}

/// Hydrated view of a member's participation, as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationView {
    /// The participating member.
    pub member_id: MemberId,
    /// Date of the lunchbreak the participation belongs to.
    pub date: NaiveDate,
    /// The member's current vote set.
    pub votes: Vec<RecordedVote>,
    /// Place the member ended up eating at, once known.
    pub result: Option<PlaceId>,
    /// What the member spent, once known.
    pub amount_spent: Option<f64>,
}

/// Fully hydrated lunchbreak, including the derived responseless member set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunchbreakSnapshot {
    /// Row identifier.
    pub id: LunchbreakId,
    /// Owning group.
    pub group_id: GroupId,
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Every recorded participation with its votes.
    pub participations: Vec<ParticipationView>,
    /// Members who marked themselves absent.
    pub absent_member_ids: Vec<MemberId>,
    /// Comments left on the lunchbreak.
    pub comments: Vec<Comment>,
    /// Members with neither a participation nor an absence.
    pub responseless_member_ids: Vec<MemberId>,
}
