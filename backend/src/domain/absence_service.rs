//! Absence domain service.
//!
//! Implements the absence command port: marking a member absent (which
//! supersedes any participation) and withdrawing the absence again. Both
//! are same-day, gate-checked operations running under the (group, date)
//! write lock.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::lunchbreak_lifecycle::{
    check_for_auto_deletion, find_or_create_lunchbreak, map_store_error,
};
use crate::domain::ports::{
    AbsenceCommand, AbsenceRequest, AuditEvent, AuditLog, GroupConfigError, GroupConfigProvider,
    LunchbreakStore,
};
use crate::domain::{Error, GroupConfig, GroupDayLocks, GroupId, time_gate};

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

/// Absence service implementing the command driving port.
#[derive(Clone)]
pub struct AbsenceCommandService<S, G> {
    store: Arc<S>,
    group_configs: Arc<G>,
    clock: Arc<dyn Clock>,
    locks: Arc<GroupDayLocks>,
    audit: Arc<dyn AuditLog>,
}

impl<S, G> AbsenceCommandService<S, G> {
    /// Create a new service over the store, configuration source, and clock.
    pub fn new(
        store: Arc<S>,
        group_configs: Arc<G>,
        clock: Arc<dyn Clock>,
        locks: Arc<GroupDayLocks>,
        audit: Arc<dyn AuditLog>,
    ) -> Self {
        Self {
            store,
            group_configs,
            clock,
            locks,
            audit,
        }
    }
}

impl<S, G> AbsenceCommandService<S, G>
where
    S: LunchbreakStore,
    G: GroupConfigProvider,
{
    async fn load_config(&self, group_id: GroupId) -> Result<GroupConfig, Error> {
        self.group_configs
            .group_config(group_id)
            .await
            .map_err(map_group_config_error)?
            .ok_or_else(|| Error::not_found(format!("group {group_id} has no voting configuration")))
    }
}

#[async_trait]
impl<S, G> AbsenceCommand for AbsenceCommandService<S, G>
where
    S: LunchbreakStore,
    G: GroupConfigProvider,
{
    async fn mark_absent(&self, request: AbsenceRequest) -> Result<(), Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

        if time_gate::local_date(now, &config) != request.date {
            return Err(Error::not_today(format!(
                "absences can only be recorded for the current date, not {}",
                request.date
            )));
        }
        if time_gate::is_vote_ending_time_reached(now, &config, request.date) {
            return Err(Error::voting_closed(format!(
                "voting for {} has already ended",
                request.date
            )));
        }

        let lunchbreak = find_or_create_lunchbreak(
            self.store.as_ref(),
            self.audit.as_ref(),
            &config,
            now,
            request.group_id,
            request.date,
        )
        .await?;

        // Marking twice leaves exactly one absence row.
        if self
            .store
            .find_absence(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?
            .is_some()
        {
            return Ok(());
        }

        self.store
            .insert_absence(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?;

        // Absence supersedes participation, symmetric to the participation
        // service clearing absences.
        if let Some(participant) = self
            .store
            .find_participant(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?
        {
            self.store
                .replace_votes(participant.id, Vec::new())
                .await
                .map_err(map_store_error)?;
            self.store
                .delete_participant(participant.id)
                .await
                .map_err(map_store_error)?;
        }

        self.audit.record(&AuditEvent::AbsenceMarked {
            lunchbreak_id: lunchbreak.id,
            member_id: request.member_id,
        });
        Ok(())
    }

    async fn unmark_absent(&self, request: AbsenceRequest) -> Result<(), Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

        if time_gate::local_date(now, &config) != request.date {
            return Err(Error::past_only(format!(
                "absences can only be withdrawn on the current date, not {}",
                request.date
            )));
        }
        if time_gate::is_vote_ending_time_reached(now, &config, request.date) {
            return Err(Error::voting_closed(format!(
                "voting for {} has already ended",
                request.date
            )));
        }

        let Some(lunchbreak) = self
            .store
            .find_lunchbreak(request.group_id, request.date)
            .await
            .map_err(map_store_error)?
        else {
            // Nothing recorded for the date; withdrawing is a no-op.
            return Ok(());
        };

        let removed = self
            .store
            .delete_absence(lunchbreak.id, request.member_id)
            .await
            .map_err(map_store_error)?;
        if removed {
            self.audit.record(&AuditEvent::AbsenceUnmarked {
                lunchbreak_id: lunchbreak.id,
                member_id: request.member_id,
            });
        }

        check_for_auto_deletion(self.store.as_ref(), self.audit.as_ref(), lunchbreak.id).await
    }
}

#[cfg(test)]
#[path = "absence_service_tests.rs"]
mod tests;
