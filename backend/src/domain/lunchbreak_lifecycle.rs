//! Lunchbreak lifecycle: lazy creation and automatic dissolution.
//!
//! A lunchbreak row exists only while it has activity. The first
//! participation, absence, or comment for a (group, date) creates it —
//! provided the date's voting gate is still open — and removing the last
//! activity dissolves it again. Creation races on the (group, date) unique
//! index are recovered by re-fetching the winner's row; the conflict never
//! reaches callers.

use chrono::{DateTime, NaiveDate, Utc};

use super::ports::{AuditEvent, AuditLog, LunchbreakStore, StoreError};
use super::{Error, GroupConfig, GroupId, Lunchbreak, LunchbreakId, time_gate};

/// Map store failures to domain errors at the service boundary.
pub(crate) fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::Connection { message } => {
            Error::service_unavailable(format!("lunchbreak store unavailable: {message}"))
        }
        StoreError::Query { message } => {
            Error::internal(format!("lunchbreak store error: {message}"))
        }
        StoreError::UniqueViolation { constraint } => Error::conflict(format!(
            "unexpected unique constraint violation: {constraint}"
        )),
    }
}

/// Insert the lunchbreak row for (group, date), treating a uniqueness
/// conflict as "already exists" and re-fetching instead of erroring.
pub(crate) async fn create_lunchbreak<S: LunchbreakStore>(
    store: &S,
    audit: &dyn AuditLog,
    group_id: GroupId,
    date: NaiveDate,
) -> Result<Lunchbreak, Error> {
    match store.insert_lunchbreak(group_id, date).await {
        Ok(created) => {
            audit.record(&AuditEvent::LunchbreakCreated { group_id, date });
            Ok(created)
        }
        Err(StoreError::UniqueViolation { .. }) => store
            .find_lunchbreak(group_id, date)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                Error::conflict(format!(
                    "lunchbreak for group {group_id} on {date} vanished during creation race"
                ))
            }),
        Err(error) => Err(map_store_error(error)),
    }
}

/// Return the lunchbreak for (group, date), creating it when absent.
///
/// An existing lunchbreak is returned regardless of the gate; creating a
/// new one is rejected with `VotingClosed` once the date's vote-ending time
/// has passed, because no further action could occur on such a day.
pub(crate) async fn find_or_create_lunchbreak<S: LunchbreakStore>(
    store: &S,
    audit: &dyn AuditLog,
    config: &GroupConfig,
    now: DateTime<Utc>,
    group_id: GroupId,
    date: NaiveDate,
) -> Result<Lunchbreak, Error> {
    if let Some(existing) = store
        .find_lunchbreak(group_id, date)
        .await
        .map_err(map_store_error)?
    {
        return Ok(existing);
    }
    if time_gate::is_vote_ending_time_reached(now, config, date) {
        return Err(Error::voting_closed(format!(
            "voting for {date} has already ended"
        )));
    }
    create_lunchbreak(store, audit, group_id, date).await
}

/// Dissolve the lunchbreak when it has no participants, absences, or
/// comments left. Idempotent: a lunchbreak that is already gone is a no-op.
pub(crate) async fn check_for_auto_deletion<S: LunchbreakStore>(
    store: &S,
    audit: &dyn AuditLog,
    lunchbreak_id: LunchbreakId,
) -> Result<(), Error> {
    let occupancy = store
        .occupancy(lunchbreak_id)
        .await
        .map_err(map_store_error)?;
    if occupancy.is_empty() {
        let deleted = store
            .delete_lunchbreak(lunchbreak_id)
            .await
            .map_err(map_store_error)?;
        if deleted {
            audit.record(&AuditEvent::LunchbreakAutoDeleted { lunchbreak_id });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "lunchbreak_lifecycle_tests.rs"]
mod tests;
