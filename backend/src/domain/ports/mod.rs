//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod absence_command;
mod audit_log;
mod comment_command;
mod group_config_provider;
mod lunchbreak_query;
mod lunchbreak_store;
mod member_repository;
mod participation_command;
mod place_repository;

#[cfg(test)]
pub use absence_command::MockAbsenceCommand;
pub use absence_command::{AbsenceCommand, AbsenceRequest};
#[cfg(test)]
pub(crate) use audit_log::test_support::RecordingAuditLog;
pub use audit_log::{AuditEvent, AuditLog, NoOpAuditLog};
#[cfg(test)]
pub use comment_command::MockCommentCommand;
pub use comment_command::{AddCommentRequest, CommentCommand};
#[cfg(test)]
pub use group_config_provider::MockGroupConfigProvider;
pub use group_config_provider::{FixtureGroupConfigProvider, GroupConfigError, GroupConfigProvider};
#[cfg(test)]
pub use lunchbreak_query::MockLunchbreakQuery;
pub use lunchbreak_query::{GetLunchbreakRequest, GetLunchbreaksRequest, LunchbreakQuery};
#[cfg(test)]
pub use lunchbreak_store::MockLunchbreakStore;
pub use lunchbreak_store::{
    LunchbreakOccupancy, LunchbreakStore, NewParticipant, NewVote, StoreError,
};
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{FixtureMemberRepository, MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use participation_command::MockParticipationCommand;
pub use participation_command::{
    CreateParticipationRequest, DeleteParticipationRequest, ParticipationCommand,
    UpdateParticipationRequest, VoteRequest,
};
#[cfg(test)]
pub use place_repository::MockPlaceRepository;
pub use place_repository::{FixturePlaceRepository, PlaceRepository, PlaceRepositoryError};
