//! In-memory group directory standing in for the external collaborators.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::domain::ports::{
    GroupConfigError, GroupConfigProvider, MemberRepository, MemberRepositoryError,
    PlaceRepository, PlaceRepositoryError,
};
use crate::domain::{GroupConfig, GroupId, MemberId, PlaceId};

#[derive(Debug, Clone, Default)]
struct GroupEntry {
    config: Option<GroupConfig>,
    members: Vec<MemberId>,
    principals: HashMap<String, MemberId>,
    places: HashSet<PlaceId>,
}

/// Configurable fixture implementing the group configuration, member, and
/// place collaborator ports.
///
/// Built by chaining; lookups against unknown groups answer the way the
/// real collaborators do (no config, no members, no places).
#[derive(Debug, Clone, Default)]
pub struct GroupDirectory {
    groups: HashMap<GroupId, GroupEntry>,
}

impl GroupDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group with its voting configuration.
    pub fn with_group(mut self, group_id: GroupId, config: GroupConfig) -> Self {
        self.groups.entry(group_id).or_default().config = Some(config);
        self
    }

    /// Register members of a group.
    pub fn with_members(
        mut self,
        group_id: GroupId,
        members: impl IntoIterator<Item = MemberId>,
    ) -> Self {
        self.groups
            .entry(group_id)
            .or_default()
            .members
            .extend(members);
        self
    }

    /// Map an authenticated principal to a member of a group.
    pub fn with_principal(
        mut self,
        group_id: GroupId,
        principal: impl Into<String>,
        member_id: MemberId,
    ) -> Self {
        self.groups
            .entry(group_id)
            .or_default()
            .principals
            .insert(principal.into(), member_id);
        self
    }

    /// Register places of a group.
    pub fn with_places(
        mut self,
        group_id: GroupId,
        places: impl IntoIterator<Item = PlaceId>,
    ) -> Self {
        self.groups
            .entry(group_id)
            .or_default()
            .places
            .extend(places);
        self
    }
}

#[async_trait]
impl GroupConfigProvider for GroupDirectory {
    async fn group_config(
        &self,
        group_id: GroupId,
    ) -> Result<Option<GroupConfig>, GroupConfigError> {
        Ok(self
            .groups
            .get(&group_id)
            .and_then(|entry| entry.config))
    }
}

#[async_trait]
impl MemberRepository for GroupDirectory {
    async fn member_id(
        &self,
        group_id: GroupId,
        principal: &str,
    ) -> Result<Option<MemberId>, MemberRepositoryError> {
        Ok(self
            .groups
            .get(&group_id)
            .and_then(|entry| entry.principals.get(principal).copied()))
    }

    async fn list_member_ids(
        &self,
        group_id: GroupId,
    ) -> Result<Vec<MemberId>, MemberRepositoryError> {
        Ok(self
            .groups
            .get(&group_id)
            .map(|entry| entry.members.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl PlaceRepository for GroupDirectory {
    async fn place_belongs_to_group(
        &self,
        group_id: GroupId,
        place_id: PlaceId,
    ) -> Result<bool, PlaceRepositoryError> {
        Ok(self
            .groups
            .get(&group_id)
            .is_some_and(|entry| entry.places.contains(&place_id)))
    }
}
