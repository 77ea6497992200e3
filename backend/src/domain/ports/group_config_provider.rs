//! Port for reading per-group voting configuration.

use async_trait::async_trait;

use crate::domain::{GroupConfig, GroupId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by group configuration adapters.
    pub enum GroupConfigError {
        /// Configuration source could not be reached.
        Connection { message: String } =>
            "group configuration source unreachable: {message}",
        /// Lookup failed during execution.
        Query { message: String } =>
            "group configuration lookup failed: {message}",
    }
}

/// Port for the read-only per-group voting rules.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupConfigProvider: Send + Sync {
    /// The group's voting configuration, or `None` for an unknown group.
    async fn group_config(
        &self,
        group_id: GroupId,
    ) -> Result<Option<GroupConfig>, GroupConfigError>;
}

/// Fixture provider answering every lookup with the same configuration.
#[derive(Debug, Clone, Copy)]
pub struct FixtureGroupConfigProvider(pub GroupConfig);

#[async_trait]
impl GroupConfigProvider for FixtureGroupConfigProvider {
    async fn group_config(
        &self,
        _group_id: GroupId,
    ) -> Result<Option<GroupConfig>, GroupConfigError> {
        Ok(Some(self.0))
    }
}
