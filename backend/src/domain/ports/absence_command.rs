//! Driving port for absence mutations.
//!
//! An absence declares non-involvement and is mutually exclusive with a
//! participation on the same lunchbreak: marking one deletes the other.
//! Both operations apply to the group-local current date only and respect
//! the voting gate.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GroupId, MemberId};

/// Request to mark or unmark a member absent for a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Target date; must be the group-local current date.
    pub date: NaiveDate,
    /// Acting member.
    pub member_id: MemberId,
}

/// Driving port for absence commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AbsenceCommand: Send + Sync {
    /// Record the member as absent, superseding any participation.
    /// Idempotent: marking twice leaves exactly one absence.
    async fn mark_absent(&self, request: AbsenceRequest) -> Result<(), Error>;

    /// Withdraw the member's absence. A missing absence is a no-op.
    async fn unmark_absent(&self, request: AbsenceRequest) -> Result<(), Error>;
}
