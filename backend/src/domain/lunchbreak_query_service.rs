//! Lunchbreak query service.
//!
//! Hydrates lunchbreaks for callers: participants with their votes,
//! absences, comments, and the derived responseless member set.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::lunchbreak_lifecycle::map_store_error;
use crate::domain::ports::{
    GetLunchbreakRequest, GetLunchbreaksRequest, LunchbreakQuery, LunchbreakStore,
    MemberRepository, MemberRepositoryError,
};
use crate::domain::responseless::responseless_members;
use crate::domain::{
    Error, Lunchbreak, LunchbreakSnapshot, ParticipationView, RecordedVote,
};

fn map_member_error(error: MemberRepositoryError) -> Error {
    match error {
        MemberRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("member repository unavailable: {message}"))
        }
        MemberRepositoryError::Query { message } => {
            Error::internal(format!("member repository error: {message}"))
        }
    }
}

/// Lunchbreak service implementing the query driving port.
#[derive(Clone)]
pub struct LunchbreakQueryService<S, M> {
    store: Arc<S>,
    members: Arc<M>,
}

impl<S, M> LunchbreakQueryService<S, M> {
    /// Create a new query service over the store and member repository.
    pub fn new(store: Arc<S>, members: Arc<M>) -> Self {
        Self { store, members }
    }
}

impl<S, M> LunchbreakQueryService<S, M>
where
    S: LunchbreakStore,
    M: MemberRepository,
{
    async fn snapshot(&self, lunchbreak: Lunchbreak) -> Result<LunchbreakSnapshot, Error> {
        let participants = self
            .store
            .list_participants(lunchbreak.id)
            .await
            .map_err(map_store_error)?;

        let mut participations = Vec::with_capacity(participants.len());
        for participant in &participants {
            let votes = self
                .store
                .list_votes(participant.id)
                .await
                .map_err(map_store_error)?;
            participations.push(ParticipationView {
                member_id: participant.member_id,
                date: lunchbreak.date,
                votes: votes.into_iter().map(RecordedVote::from).collect(),
                result: participant.result,
                amount_spent: participant.amount_spent,
            });
        }

        let absences = self
            .store
            .list_absences(lunchbreak.id)
            .await
            .map_err(map_store_error)?;
        let comments = self
            .store
            .list_comments(lunchbreak.id)
            .await
            .map_err(map_store_error)?;
        let member_ids = self
            .members
            .list_member_ids(lunchbreak.group_id)
            .await
            .map_err(map_member_error)?;

        let responseless_member_ids =
            responseless_members(&member_ids, &participants, &absences);

        Ok(LunchbreakSnapshot {
            id: lunchbreak.id,
            group_id: lunchbreak.group_id,
            date: lunchbreak.date,
            participations,
            absent_member_ids: absences.iter().map(|absence| absence.member_id).collect(),
            comments,
            responseless_member_ids,
        })
    }
}

#[async_trait]
impl<S, M> LunchbreakQuery for LunchbreakQueryService<S, M>
where
    S: LunchbreakStore,
    M: MemberRepository,
{
    async fn get_lunchbreak(
        &self,
        request: GetLunchbreakRequest,
    ) -> Result<LunchbreakSnapshot, Error> {
        let lunchbreak = self
            .store
            .find_lunchbreak(request.group_id, request.date)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "group {} has no lunchbreak on {}",
                    request.group_id, request.date
                ))
            })?;
        self.snapshot(lunchbreak).await
    }

    async fn get_lunchbreaks(
        &self,
        request: GetLunchbreaksRequest,
    ) -> Result<Vec<LunchbreakSnapshot>, Error> {
        if request.to_date < request.from_date {
            return Ok(Vec::new());
        }
        let lunchbreaks = self
            .store
            .list_lunchbreaks(request.group_id, request.from_date, request.to_date)
            .await
            .map_err(map_store_error)?;

        let mut snapshots = Vec::with_capacity(lunchbreaks.len());
        for lunchbreak in lunchbreaks {
            snapshots.push(self.snapshot(lunchbreak).await?);
        }
        Ok(snapshots)
    }
}

#[cfg(test)]
#[path = "lunchbreak_query_service_tests.rs"]
mod tests;
