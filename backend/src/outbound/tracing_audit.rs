//! Tracing adapter for the audit-log port.
//!
//! Binds [`AuditEvent`]s to `tracing` so binaries get structured log output
//! without the domain depending on a logging framework. Every event becomes
//! one info-level event under the `audit` target with the action name and
//! its identifiers as fields.

use tracing::info;

use crate::domain::ports::{AuditEvent, AuditLog};

/// Audit sink emitting one `tracing` event per recorded action.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditLog;

impl AuditLog for TracingAuditLog {
    fn record(&self, event: &AuditEvent) {
        match event {
            AuditEvent::LunchbreakCreated { group_id, date } => {
                info!(target: "audit", %group_id, %date, "lunchbreak created");
            }
            AuditEvent::LunchbreakAutoDeleted { lunchbreak_id } => {
                info!(target: "audit", %lunchbreak_id, "empty lunchbreak dissolved");
            }
            AuditEvent::ParticipationSaved {
                lunchbreak_id,
                member_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %member_id, "participation saved");
            }
            AuditEvent::ParticipationDeleted {
                lunchbreak_id,
                member_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %member_id, "participation deleted");
            }
            AuditEvent::AbsenceMarked {
                lunchbreak_id,
                member_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %member_id, "absence marked");
            }
            AuditEvent::AbsenceUnmarked {
                lunchbreak_id,
                member_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %member_id, "absence withdrawn");
            }
            AuditEvent::CommentAdded {
                lunchbreak_id,
                comment_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %comment_id, "comment added");
            }
            AuditEvent::CommentRemoved {
                lunchbreak_id,
                comment_id,
            } => {
                info!(target: "audit", %lunchbreak_id, %comment_id, "comment removed");
            }
        }
    }
}
