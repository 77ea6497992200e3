//! Driving port for comment lifecycle hooks.
//!
//! Comment text is opaque to the engine; these commands exist because
//! comments keep a lunchbreak alive: the first comment for a date may
//! create the lunchbreak, and removing the last one may dissolve it.
//! Comments carry no same-day restriction — only lunchbreak creation is
//! gated.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Comment, CommentId, Error, GroupId, MemberId};

/// Request to add a comment to a date's lunchbreak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Target date.
    pub date: NaiveDate,
    /// Author, absent for system comments.
    pub member_id: Option<MemberId>,
    /// Opaque comment text.
    pub text: String,
}

/// Driving port for comment commands.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentCommand: Send + Sync {
    /// Add a comment, creating the date's lunchbreak when necessary.
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Comment, Error>;

    /// Remove a comment and dissolve the lunchbreak when it was the last
    /// remaining activity.
    async fn remove_comment(&self, comment_id: CommentId) -> Result<(), Error>;
}
