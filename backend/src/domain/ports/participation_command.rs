//! Driving port for participation mutations.
//!
//! Participations represent same-day commitments: creating one is only
//! allowed on the group-local current date and while the date's voting gate
//! is open. Updates split deliberately: `result`/`amount_spent` remain
//! editable after the gate closes (expense reporting is an administrative
//! step), while a vote set supplied after the gate is silently ignored so
//! budgets stay locked at voting time. That partial-success asymmetry is
//! intentional, if surprising; see DESIGN.md.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GroupId, MemberId, ParticipationView, PlaceId};

/// One requested vote of a proposed vote set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Place the points go to.
    pub place_id: PlaceId,
    /// Points assigned to the place.
    pub points: u32,
}

/// Request to create a member's participation for a date, or replace every
/// mutable part of the existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipationRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Target date; must be the group-local current date.
    pub date: NaiveDate,
    /// Acting member.
    pub member_id: MemberId,
    /// Full proposed vote set; replaces any existing set atomically.
    pub votes: Vec<VoteRequest>,
    /// Place the member ate at, if known. Must belong to the group.
    pub result: Option<PlaceId>,
    /// What the member spent, if known.
    pub amount_spent: Option<f64>,
}

/// Request to update an existing participation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipationRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Date of the participation; past dates are allowed.
    pub date: NaiveDate,
    /// Acting member.
    pub member_id: MemberId,
    /// Replacement vote set. Applied only while the date's gate is still
    /// open; ignored afterwards. `None` leaves the votes untouched.
    pub votes: Option<Vec<VoteRequest>>,
    /// New result place, cleared when `None`.
    pub result: Option<PlaceId>,
    /// New amount spent, cleared when `None`.
    pub amount_spent: Option<f64>,
}

/// Request to delete a participation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteParticipationRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Date of the participation.
    pub date: NaiveDate,
    /// Acting member.
    pub member_id: MemberId,
}

/// Driving port for participation commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipationCommand: Send + Sync {
    /// Create or fully replace the member's participation for the date.
    async fn create_or_replace(
        &self,
        request: CreateParticipationRequest,
    ) -> Result<ParticipationView, Error>;

    /// Update an existing participation.
    async fn update(
        &self,
        request: UpdateParticipationRequest,
    ) -> Result<ParticipationView, Error>;

    /// Delete a participation and its votes.
    async fn delete(&self, request: DeleteParticipationRequest) -> Result<(), Error>;
}
