//! Port for checking place ownership.

use async_trait::async_trait;

use crate::domain::{GroupId, PlaceId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by place repository adapters.
    pub enum PlaceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "place repository connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "place repository lookup failed: {message}",
    }
}

/// Port answering whether a place belongs to a group.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Whether `place_id` is one of the group's places.
    async fn place_belongs_to_group(
        &self,
        group_id: GroupId,
        place_id: PlaceId,
    ) -> Result<bool, PlaceRepositoryError>;
}

/// Fixture repository treating every place as belonging to every group.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlaceRepository;

#[async_trait]
impl PlaceRepository for FixturePlaceRepository {
    async fn place_belongs_to_group(
        &self,
        _group_id: GroupId,
        _place_id: PlaceId,
    ) -> Result<bool, PlaceRepositoryError> {
        Ok(true)
    }
}
