//! Comment lifecycle service.
//!
//! Comments are opaque text to the engine, but they keep a lunchbreak
//! alive: the first comment for a date may create the lunchbreak, and
//! removing the last activity dissolves it. Unlike participations and
//! absences, comments carry no same-day restriction; only the creation of
//! a new lunchbreak is gated.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::lunchbreak_lifecycle::{
    check_for_auto_deletion, find_or_create_lunchbreak, map_store_error,
};
use crate::domain::ports::{
    AddCommentRequest, AuditEvent, AuditLog, CommentCommand, GroupConfigError,
    GroupConfigProvider, LunchbreakStore,
};
use crate::domain::{Comment, CommentId, Error, GroupConfig, GroupDayLocks, GroupId};

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

/// Comment service implementing the command driving port.
#[derive(Clone)]
pub struct CommentCommandService<S, G> {
    store: Arc<S>,
    group_configs: Arc<G>,
    clock: Arc<dyn Clock>,
    locks: Arc<GroupDayLocks>,
    audit: Arc<dyn AuditLog>,
}

impl<S, G> CommentCommandService<S, G> {
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

impl<S, G> CommentCommandService<S, G>
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
impl<S, G> CommentCommand for CommentCommandService<S, G>
where
    S: LunchbreakStore,
    G: GroupConfigProvider,
{
    async fn add_comment(&self, request: AddCommentRequest) -> Result<Comment, Error> {
        let config = self.load_config(request.group_id).await?;
        let _guard = self.locks.acquire(request.group_id, request.date).await;
        let now = self.clock.utc();

        let lunchbreak = find_or_create_lunchbreak(
            self.store.as_ref(),
            self.audit.as_ref(),
            &config,
            now,
            request.group_id,
            request.date,
        )
        .await?;

        let comment = self
            .store
            .insert_comment(lunchbreak.id, request.member_id, request.text)
            .await
            .map_err(map_store_error)?;

        self.audit.record(&AuditEvent::CommentAdded {
            lunchbreak_id: lunchbreak.id,
            comment_id: comment.id,
        });
        Ok(comment)
    }

    async fn remove_comment(&self, comment_id: CommentId) -> Result<(), Error> {
        let comment = self
            .store
            .find_comment(comment_id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("comment {comment_id} does not exist")))?;

        let Some(lunchbreak) = self
            .store
            .find_lunchbreak_by_id(comment.lunchbreak_id)
            .await
            .map_err(map_store_error)?
        else {
            // Orphaned comment; drop it without lifecycle bookkeeping.
            self.store
                .delete_comment(comment_id)
                .await
                .map_err(map_store_error)?;
            return Ok(());
        };

        let _guard = self
            .locks
            .acquire(lunchbreak.group_id, lunchbreak.date)
            .await;

        let removed = self
            .store
            .delete_comment(comment_id)
            .await
            .map_err(map_store_error)?;
        if removed {
            self.audit.record(&AuditEvent::CommentRemoved {
                lunchbreak_id: lunchbreak.id,
                comment_id,
            });
        }

        check_for_auto_deletion(self.store.as_ref(), self.audit.as_ref(), lunchbreak.id).await
    }
}
