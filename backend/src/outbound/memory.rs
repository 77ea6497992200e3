//! In-memory implementation of the lunchbreak store port.
//!
//! Keeps every table in process memory behind one async mutex, which also
//! serializes concurrent writers the way the store contract demands. Row
//! ids are assigned from a single monotonic counter. The two unique
//! indexes — (group, date) for lunchbreaks, (lunchbreak, member) for
//! participants and absences — are enforced explicitly and surface as
//! [`StoreError::UniqueViolation`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::ports::{
    LunchbreakOccupancy, LunchbreakStore, NewParticipant, NewVote, StoreError,
};
use crate::domain::{
    Absence, Comment, CommentId, GroupId, Lunchbreak, LunchbreakId, MemberId, Participant,
    ParticipantId, PlaceId, Vote,
};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    lunchbreaks: BTreeMap<LunchbreakId, Lunchbreak>,
    lunchbreaks_by_key: HashMap<(GroupId, NaiveDate), LunchbreakId>,
    participants: BTreeMap<ParticipantId, Participant>,
    participants_by_key: HashMap<(LunchbreakId, MemberId), ParticipantId>,
    votes: HashMap<ParticipantId, Vec<Vote>>,
    absences: BTreeSet<(LunchbreakId, MemberId)>,
    comments: BTreeMap<CommentId, Comment>,
}

impl State {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_participant_rows(&mut self, participant_id: ParticipantId) {
        if let Some(participant) = self.participants.remove(&participant_id) {
            self.participants_by_key
                .remove(&(participant.lunchbreak_id, participant.member_id));
        }
        self.votes.remove(&participant_id);
    }
}

/// In-memory [`LunchbreakStore`] adapter.
#[derive(Debug, Default)]
pub struct MemoryLunchbreakStore {
    state: Mutex<State>,
}

impl MemoryLunchbreakStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LunchbreakStore for MemoryLunchbreakStore {
    async fn find_lunchbreak(
        &self,
        group_id: GroupId,
        date: NaiveDate,
    ) -> Result<Option<Lunchbreak>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .lunchbreaks_by_key
            .get(&(group_id, date))
            .and_then(|id| state.lunchbreaks.get(id))
            .copied())
    }

    async fn find_lunchbreak_by_id(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Option<Lunchbreak>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.lunchbreaks.get(&lunchbreak_id).copied())
    }

    async fn insert_lunchbreak(
        &self,
        group_id: GroupId,
        date: NaiveDate,
    ) -> Result<Lunchbreak, StoreError> {
        let mut state = self.state.lock().await;
        if state.lunchbreaks_by_key.contains_key(&(group_id, date)) {
            return Err(StoreError::unique_violation("lunchbreak_group_date"));
        }
        let lunchbreak = Lunchbreak {
            id: LunchbreakId::new(state.next_id()),
            group_id,
            date,
        };
        state.lunchbreaks.insert(lunchbreak.id, lunchbreak);
        state
            .lunchbreaks_by_key
            .insert((group_id, date), lunchbreak.id);
        debug!(%group_id, %date, lunchbreak_id = %lunchbreak.id, "lunchbreak row inserted");
        Ok(lunchbreak)
    }

    async fn delete_lunchbreak(&self, lunchbreak_id: LunchbreakId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let Some(lunchbreak) = state.lunchbreaks.remove(&lunchbreak_id) else {
            return Ok(false);
        };
        state
            .lunchbreaks_by_key
            .remove(&(lunchbreak.group_id, lunchbreak.date));

        // Cascade any children left behind; the services normally clear
        // them before the row goes.
        let orphaned: Vec<ParticipantId> = state
            .participants
            .values()
            .filter(|participant| participant.lunchbreak_id == lunchbreak_id)
            .map(|participant| participant.id)
            .collect();
        for participant_id in orphaned {
            state.remove_participant_rows(participant_id);
        }
        state.absences.retain(|(owner, _)| *owner != lunchbreak_id);
        state
            .comments
            .retain(|_, comment| comment.lunchbreak_id != lunchbreak_id);
        debug!(lunchbreak_id = %lunchbreak_id, "lunchbreak row deleted");
        Ok(true)
    }

    async fn list_lunchbreaks(
        &self,
        group_id: GroupId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Lunchbreak>, StoreError> {
        let state = self.state.lock().await;
        let mut rows: Vec<Lunchbreak> = state
            .lunchbreaks
            .values()
            .filter(|lunchbreak| {
                lunchbreak.group_id == group_id
                    && lunchbreak.date >= from
                    && lunchbreak.date <= to
            })
            .copied()
            .collect();
        rows.sort_by_key(|lunchbreak| lunchbreak.date);
        Ok(rows)
    }

    async fn occupancy(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<LunchbreakOccupancy, StoreError> {
        let state = self.state.lock().await;
        Ok(LunchbreakOccupancy {
            participants: state
                .participants
                .values()
                .filter(|participant| participant.lunchbreak_id == lunchbreak_id)
                .count(),
            absences: state
                .absences
                .iter()
                .filter(|(owner, _)| *owner == lunchbreak_id)
                .count(),
            comments: state
                .comments
                .values()
                .filter(|comment| comment.lunchbreak_id == lunchbreak_id)
                .count(),
        })
    }

    async fn find_participant(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Option<Participant>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .participants_by_key
            .get(&(lunchbreak_id, member_id))
            .and_then(|id| state.participants.get(id))
            .copied())
    }

    async fn insert_participant(&self, new: NewParticipant) -> Result<Participant, StoreError> {
        let mut state = self.state.lock().await;
        if !state.lunchbreaks.contains_key(&new.lunchbreak_id) {
            return Err(StoreError::query(format!(
                "lunchbreak {} does not exist",
                new.lunchbreak_id
            )));
        }
        let key = (new.lunchbreak_id, new.member_id);
        if state.participants_by_key.contains_key(&key) {
            return Err(StoreError::unique_violation(
                "participant_lunchbreak_member",
            ));
        }
        let participant = Participant {
            id: ParticipantId::new(state.next_id()),
            lunchbreak_id: new.lunchbreak_id,
            member_id: new.member_id,
            result: new.result,
            amount_spent: new.amount_spent,
        };
        state.participants.insert(participant.id, participant);
        state.participants_by_key.insert(key, participant.id);
        debug!(participant_id = %participant.id, member_id = %new.member_id, "participant row inserted");
        Ok(participant)
    }

    async fn update_participant(
        &self,
        participant_id: ParticipantId,
        result: Option<PlaceId>,
        amount_spent: Option<f64>,
    ) -> Result<Participant, StoreError> {
        let mut state = self.state.lock().await;
        let Some(participant) = state.participants.get_mut(&participant_id) else {
            return Err(StoreError::query(format!(
                "participant {participant_id} does not exist"
            )));
        };
        participant.result = result;
        participant.amount_spent = amount_spent;
        Ok(*participant)
    }

    async fn delete_participant(
        &self,
        participant_id: ParticipantId,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        let existed = state.participants.contains_key(&participant_id);
        state.remove_participant_rows(participant_id);
        if existed {
            debug!(participant_id = %participant_id, "participant row deleted");
        }
        Ok(existed)
    }

    async fn list_participants(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Participant>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .participants
            .values()
            .filter(|participant| participant.lunchbreak_id == lunchbreak_id)
            .copied()
            .collect())
    }

    async fn replace_votes(
        &self,
        participant_id: ParticipantId,
        votes: Vec<NewVote>,
    ) -> Result<Vec<Vote>, StoreError> {
        let mut state = self.state.lock().await;
        if !state.participants.contains_key(&participant_id) {
            return Err(StoreError::query(format!(
                "participant {participant_id} does not exist"
            )));
        }
        let rows: Vec<Vote> = votes
            .into_iter()
            .map(|vote| Vote {
                participant_id,
                place_id: vote.place_id,
                points: vote.points,
            })
            .collect();
        if rows.is_empty() {
            state.votes.remove(&participant_id);
        } else {
            state.votes.insert(participant_id, rows.clone());
        }
        Ok(rows)
    }

    async fn list_votes(&self, participant_id: ParticipantId) -> Result<Vec<Vote>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.votes.get(&participant_id).cloned().unwrap_or_default())
    }

    async fn find_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Option<Absence>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .absences
            .contains(&(lunchbreak_id, member_id))
            .then_some(Absence {
                lunchbreak_id,
                member_id,
            }))
    }

    async fn insert_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<Absence, StoreError> {
        let mut state = self.state.lock().await;
        if !state.lunchbreaks.contains_key(&lunchbreak_id) {
            return Err(StoreError::query(format!(
                "lunchbreak {lunchbreak_id} does not exist"
            )));
        }
        if !state.absences.insert((lunchbreak_id, member_id)) {
            return Err(StoreError::unique_violation("absence_lunchbreak_member"));
        }
        debug!(lunchbreak_id = %lunchbreak_id, member_id = %member_id, "absence row inserted");
        Ok(Absence {
            lunchbreak_id,
            member_id,
        })
    }

    async fn delete_absence(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: MemberId,
    ) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.absences.remove(&(lunchbreak_id, member_id)))
    }

    async fn list_absences(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Absence>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .absences
            .iter()
            .filter(|(owner, _)| *owner == lunchbreak_id)
            .map(|(owner, member)| Absence {
                lunchbreak_id: *owner,
                member_id: *member,
            })
            .collect())
    }

    async fn insert_comment(
        &self,
        lunchbreak_id: LunchbreakId,
        member_id: Option<MemberId>,
        text: String,
    ) -> Result<Comment, StoreError> {
        let mut state = self.state.lock().await;
        if !state.lunchbreaks.contains_key(&lunchbreak_id) {
            return Err(StoreError::query(format!(
                "lunchbreak {lunchbreak_id} does not exist"
            )));
        }
        let comment = Comment {
            id: CommentId::new(state.next_id()),
            lunchbreak_id,
            member_id,
            text,
        };
        state.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, comment_id: CommentId) -> Result<Option<Comment>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.comments.get(&comment_id).cloned())
    }

    async fn delete_comment(&self, comment_id: CommentId) -> Result<bool, StoreError> {
        let mut state = self.state.lock().await;
        Ok(state.comments.remove(&comment_id).is_some())
    }

    async fn list_comments(
        &self,
        lunchbreak_id: LunchbreakId,
    ) -> Result<Vec<Comment>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .comments
            .values()
            .filter(|comment| comment.lunchbreak_id == lunchbreak_id)
            .cloned()
            .collect())
    }
}
