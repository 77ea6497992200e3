//! Domain layer of the lunchbreak decision engine.
//!
//! Purpose: own the temporal state machine and constraint validation that
//! govern a group's daily lunch vote — lunchbreak lifecycle, participation
//! and absence rules, vote budgets, and the responseless-member
//! computation. Everything here is transport and storage agnostic;
//! collaborators are reached through the ports in [`ports`].
//!
//! Structure:
//! - value types and entities: [`GroupConfig`], the id newtypes, the
//!   lunchbreak records and hydrated snapshots,
//! - pure primitives: [`time_gate`] (the single gate authority) and the
//!   responseless computation,
//! - services: participation, absence, and comment commands plus the
//!   hydrating query service, each implementing a driving port.

pub mod error;
mod group_config;
mod ids;
pub mod locks;
mod lunchbreak;
mod lunchbreak_lifecycle;
pub mod ports;
mod responseless;
pub mod time_gate;

mod absence_service;
mod comment_service;
mod lunchbreak_query_service;
mod participation_service;

pub use self::absence_service::AbsenceCommandService;
pub use self::comment_service::CommentCommandService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::group_config::{GroupConfig, GroupConfigValidationError};
pub use self::ids::{CommentId, GroupId, LunchbreakId, MemberId, ParticipantId, PlaceId};
pub use self::locks::GroupDayLocks;
pub use self::lunchbreak::{
    Absence, Comment, Lunchbreak, LunchbreakSnapshot, Participant, ParticipationView,
    RecordedVote, Vote,
};
pub use self::lunchbreak_query_service::LunchbreakQueryService;
pub use self::participation_service::ParticipationCommandService;
pub use self::responseless::responseless_members;

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use backend::domain::{DomainResult, Error};
///
/// fn gate_check(open: bool) -> DomainResult<()> {
///     if open {
///         Ok(())
///     } else {
///         Err(Error::voting_closed("voting has ended"))
///     }
/// }
/// ```
pub type DomainResult<T> = Result<T, Error>;
