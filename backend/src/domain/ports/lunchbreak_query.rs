//! Driving port for hydrated lunchbreak reads.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, GroupId, LunchbreakSnapshot};

/// Request for one group's lunchbreak on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLunchbreakRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Target date.
    pub date: NaiveDate,
}

/// Request for a group's lunchbreaks within an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetLunchbreaksRequest {
    /// Target group.
    pub group_id: GroupId,
    /// First date of the range.
    pub from_date: NaiveDate,
    /// Last date of the range. An empty list is returned when it precedes
    /// `from_date`.
    pub to_date: NaiveDate,
}

/// Driving port for lunchbreak queries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LunchbreakQuery: Send + Sync {
    /// The hydrated lunchbreak for (group, date).
    async fn get_lunchbreak(
        &self,
        request: GetLunchbreakRequest,
    ) -> Result<LunchbreakSnapshot, Error>;

    /// Hydrated lunchbreaks of the group within the range, ordered by date.
    async fn get_lunchbreaks(
        &self,
        request: GetLunchbreaksRequest,
    ) -> Result<Vec<LunchbreakSnapshot>, Error>;
}
