//! Participation domain service.
//!
//! Implements the participation command port: create-or-replace, update,
//! and delete, honouring the same-day rule, the voting gate, the vote
//! budget, and the participant/absence mutual exclusion. Every command
//! runs under the (group, date) write lock so its store mutations apply as
//! one unit.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use vote_budget::{ProposedVote, validate_votes};

use crate::domain::lunchbreak_lifecycle::{
    check_for_auto_deletion, create_lunchbreak, map_store_error,
};
use crate::domain::ports::{
    AuditEvent, AuditLog, CreateParticipationRequest, DeleteParticipationRequest,
    GroupConfigError, GroupConfigProvider, LunchbreakStore, NewParticipant, NewVote,
    ParticipationCommand, PlaceRepository, PlaceRepositoryError, UpdateParticipationRequest,
    VoteRequest,
};
use crate::domain::{
    Error, GroupConfig, GroupDayLocks, GroupId, Lunchbreak, Participant, ParticipationView,
    PlaceId, RecordedVote, time_gate,
};

fn map_group_config_error(error: GroupConfigError) -> Error {
    match error {
        GroupConfigError::Connection { message } => {
            Error::service_unavailable(format!("group configuration unavailable: {message}"))
        }
        GroupConfigError::Query { message } => {
            Error::internal(format!("group configuration error: {message}"))
        }
    }
}

fn map_place_error(error: PlaceRepositoryError) -> Error {
    match error {
        PlaceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("place repository unavailable: {message}"))
        }
        PlaceRepositoryError::Query { message } => {
            Error::internal(format!("place repository error: {message}"))
        }
    }
}

fn to_proposed(votes: &[VoteRequest]) -> Vec<ProposedVote> {
    votes
        .iter()
        .map(|vote| ProposedVote::new(vote.place_id.get(), vote.points))
        .collect()
}

fn to_new_votes(votes: &[VoteRequest]) -> Vec<NewVote> {
    votes
        .iter()
        .map(|vote| NewVote {
            place_id: vote.place_id,
            points: vote.points,
        })
        .collect()
}

/// Participation service implementing the command driving port.
#[derive(Clone)]
pub struct ParticipationCommandService<S, G, P> {
    store: Arc<S>,
    group_configs: Arc<G>,
    places: Arc<P>,
    clock: Arc<dyn Clock>,
    locks: Arc<GroupDayLocks>,
    audit: Arc<dyn AuditLog>,
}

impl<S, G, P> ParticipationCommandService<S, G, P> {
    /// Create a new service over the store, collaborators, and clock.
    pub fn new(
        store: Arc<S>,
        group_configs: Arc<G>,
        places: Arc<P>,
        clock: Arc<dyn Clock>,
        locks: Arc<GroupDayLocks>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            store,
            group_configs,
            places,
            clock,
            locks,
            audit,
        }
    }
}

impl<S, G, P> ParticipationCommandService<S, G, P>
where
    S: LunchbreakStore,
    G: GroupConfigProvider,
    P: PlaceRepository,
{
    async fn load_config(&self, group_id: GroupId) -> Result<GroupConfig, Error> {
        self.group_configs
            .group_config(group_id)
            .await
            .map_err(map_group_config_error)?
            .ok_or_else(|| Error::not_found(format!("group {group_id} has no voting configuration")))
    }

    async fn ensure_result_belongs_to_group(
        &self,
        group_id: GroupId,
        result: Option<PlaceId>,
    ) -> Result<(), Error> {
        let Some(place_id) = result else {
            return Ok(());
        };
        let belongs = self
            .places
            .place_belongs_to_group(group_id, place_id)
            .await
            .map_err(map_place_error)?;
        if belongs {
            Ok(())
        } else {
            Err(Error::invalid_result(format!(
                "place {place_id} does not belong to group {group_id}"
            )))
        }
    }

    async fn hydrate(
        &self,
        lunchbreak: &Lunchbreak,
        participant: &Participant,
    ) -> Result<ParticipationView, Error> {
        let votes = self
            .store
            .list_votes(participant.id)
            .await
            .map_err(map_store_error)?;
        Ok(ParticipationView {
            member_id: participant.member_id,
            date: lunchbreak.date,
            votes: votes.into_iter().map(RecordedVote::from).collect(),
            result: participant.result,
            amount_spent: participant.amount_spent,
        })
    }
}

#[async_trait]
impl<S, G, P> ParticipationCommand for ParticipationCommandService<S, G, P>
where
    S: LunchbreakStore,
    G: GroupConfigProvider,
    P: PlaceRepository,
{
    async fn create_or_replace(
        &self,
        request: CreateParticipationRequest,
    ) -> Result<ParticipationView, Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

        if time_gate::local_date(now, &config) != request.date {
            return Err(Error::not_today(format!(
                "participations can only be recorded for the current date, not {}",
                request.date
            )));
        }

        // Participations become immutable once the date's vote-ending time
        // has passed, whether or not a lunchbreak row already exists.
        if time_gate::is_vote_ending_time_reached(now, &config, request.date) {
            return Err(Error::voting_closed(format!(
                "voting for {} has already ended",
                request.date
            )));
        }

        self.ensure_result_belongs_to_group(request.group_id, request.result)
            .await?;

        // All-or-nothing: the vote set is validated before the lunchbreak,
        // the participant row, or any vote is touched.
        validate_votes(&to_proposed(&request.votes), &config.budget())
            .map_err(|violations| Error::invalid_votes(&violations))?;

        let lunchbreak = match self
            .store
            .find_lunchbreak(request.group_id, request.date)
            .await
            .map_err(map_store_error)?
        {
            Some(lunchbreak) => lunchbreak,
            None => {
                create_lunchbreak(
                    self.store.as_ref(),
                    self.audit.as_ref(),
                    request.group_id,
                    request.date,
                )
                .await?
            }
        };

        let participant = match self
            .store
            .find_participant(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?
        {
            Some(existing) => self
                .store
                .update_participant(existing.id, request.result, request.amount_spent)
                .await
                .map_err(map_store_error)?,
            None => self
                .store
                .insert_participant(NewParticipant {
                    lunchbreak_id: lunchbreak.id,
                    member_id: request.member_id,
                    result: request.result,
                    amount_spent: request.amount_spent,
                })
                .await
                .map_err(map_store_error)?,
        };

        // Participation supersedes absence.
        self.store
            .delete_absence(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?;

        self.store
            .replace_votes(participant.id, to_new_votes(&request.votes))
            .await
            .map_err(map_store_error)?;

        self.audit.record(&AuditEvent::ParticipationSaved {
            lunchbreak_id: lunchbreak.id,
            member_id: request.member_id,
        });

        self.hydrate(&lunchbreak, &participant).await
    }

    async fn update(
        &self,
        request: UpdateParticipationRequest,
    ) -> Result<ParticipationView, Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

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
        let participant = self
            .store
            .find_participant(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "member {} has no participation on {}",
                    request.member_id, request.date
                ))
            })?;

        self.ensure_result_belongs_to_group(request.group_id, request.result)
            .await?;

        // Result and amount stay editable after the gate: reporting where
        // one actually ate is a later administrative step.
        let participant = self
            .store
            .update_participant(participant.id, request.result, request.amount_spent)
            .await
            .map_err(map_store_error)?;

        // Budgets are locked at voting time; a vote set supplied after the
        // gate is dropped while the rest of the update still applies.
        if let Some(votes) = &request.votes
            && !time_gate::is_vote_ending_time_reached(now, &config, request.date)
        {
            validate_votes(&to_proposed(votes), &config.budget())
                .map_err(|violations| Error::invalid_votes(&violations))?;
            self.store
                .replace_votes(participant.id, to_new_votes(votes))
                .await
                .map_err(map_store_error)?;
        }

        self.audit.record(&AuditEvent::ParticipationSaved {
            lunchbreak_id: lunchbreak.id,
            member_id: request.member_id,
        });

        self.hydrate(&lunchbreak, &participant).await
    }

    async fn delete(&self, request: DeleteParticipationRequest) -> Result<(), Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

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
        let participant = self
            .store
            .find_participant(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "member {} has no participation on {}",
                    request.member_id, request.date
                ))
            })?;

        // Deleting a participation frees its vote budget, so it is blocked
        // once voting closes.
        if time_gate::is_vote_ending_time_reached(now, &config, request.date) {
            return Err(Error::voting_closed(format!(
                "voting for {} has already ended",
                request.date
            )));
        }

        self.store
            .replace_votes(participant.id, Vec::new())
            .await
            .map_err(map_store_error)?;
        self.store
            .delete_participant(participant.id)
            .await
            .map_err(map_store_error)?;

        self.audit.record(&AuditEvent::ParticipationDeleted {
            lunchbreak_id: lunchbreak.id,
            member_id: request.member_id,
        });

        check_for_auto_deletion(self.store.as_ref(), self.audit.as_ref(), lunchbreak.id).await
    }
}

#[cfg(test)]
#[path = "participation_service_tests.rs"]
mod tests;
