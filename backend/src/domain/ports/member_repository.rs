//! Port for resolving group membership.

use async_trait::async_trait;

use crate::domain::{GroupId, MemberId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "member repository connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "member repository lookup failed: {message}",
    }
}

/// Port for group membership lookups.
///
/// `member_id` resolves an authenticated principal to their membership in a
/// group (transport layers call this before invoking commands);
/// `list_member_ids` feeds the responseless-member computation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// The member id of `principal` within the group, or `None` when the
    /// principal does not belong to it.
    async fn member_id(
        &self,
        group_id: GroupId,
        principal: &str,
    ) -> Result<Option<MemberId>, MemberRepositoryError>;

    /// Every member id of the group.
    async fn list_member_ids(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<MemberId>, MemberRepositoryError>;
}

/// Fixture repository for tests that do not exercise membership.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureMemberRepository;

#[async_trait]
impl MemberRepository for FixtureMemberRepository {
    async fn member_id(
        &self,
        _group_id: GroupId,
        _principal: &str,
    ) -> Result<Option<MemberId>, MemberRepositoryError> {
        Ok(None)
    }

    async fn list_member_ids(
        &self,
        _group_id: GroupId,
    ) -> Result<Vec<MemberId>, MemberRepositoryError> {
        Ok(Vec::new())
    }
}
