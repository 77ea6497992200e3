//! Per-group voting configuration.
//!
//! Groups configure when their daily vote closes, which UTC offset their
//! local calendar follows, and how vote points are budgeted. The engine
//! consumes this configuration read-only through the
//! [`GroupConfigProvider`](crate::domain::ports::GroupConfigProvider) port.

use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use vote_budget::BudgetRules;

/// Offsets must stay within a day in either direction.
const MAX_UTC_OFFSET_MINUTES: i32 = 24 * 60;

/// Validation errors returned by [`GroupConfig::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupConfigValidationError {
    OffsetOutOfRange { minutes: i32 },
}

impl fmt::Display for GroupConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OffsetOutOfRange { minutes } => {
                write!(f, "utc offset of {minutes} minutes exceeds a day")
            }
        }
    }
}

impl std::error::Error for GroupConfigValidationError {}

/// A group's voting rules: the daily cutoff time, the local-time offset the
/// cutoff and calendar dates are interpreted in, and the point budget.
///
/// # Examples
/// ```
/// use chrono::NaiveTime;
/// use backend::domain::GroupConfig;
/// use vote_budget::BudgetRules;
///
/// let budget = BudgetRules::new(100, 30, 70)?;
/// let cutoff = NaiveTime::from_hms_opt(12, 25, 0).ok_or("invalid time")?;
/// let config = GroupConfig::new(cutoff, 60, budget)?;
/// assert_eq!(config.utc_offset_minutes(), 60);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupConfig {
    vote_ending_time: NaiveTime,
    utc_offset_minutes: i32,
    budget: BudgetRules,
}

impl GroupConfig {
    /// Validate and construct a group configuration.
    ///
    /// The budget arrives pre-validated by [`BudgetRules::new`]; this
    /// constructor only checks the offset.
    pub fn new(
        vote_ending_time: NaiveTime,
        utc_offset_minutes: i32,
        budget: BudgetRules,
    ) -> Result<Self, GroupConfigValidationError> {
        if utc_offset_minutes.abs() >= MAX_UTC_OFFSET_MINUTES {
            return Err(GroupConfigValidationError::OffsetOutOfRange {
                minutes: utc_offset_minutes,
            });
        }
        Ok(Self {
            vote_ending_time,
            utc_offset_minutes,
            budget,
        })
    }

    /// Local time of day after which the date's vote is closed.
    pub fn vote_ending_time(&self) -> NaiveTime {
        self.vote_ending_time
    }

    /// Signed offset of the group's local time from UTC, in minutes.
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    /// Point budget rules applied to every vote set.
    pub fn budget(&self) -> BudgetRules {
        self.budget
    }
}
