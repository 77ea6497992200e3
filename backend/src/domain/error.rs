//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses, CLI exit codes, or any other protocol-specific envelope. Domain
//! errors are returned as typed values at the action boundary; only genuinely
//! unexpected failures (an unreachable store) surface as
//! [`ErrorCode::ServiceUnavailable`] or [`ErrorCode::InternalError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vote_budget::VoteViolations;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The date's vote-ending time has passed; the action is rejected.
    VotingClosed,
    /// The target date is not the caller's current date in group-local time.
    NotToday,
    /// The operation only applies to the current group-local date.
    PastOnly,
    /// The supplied result place does not belong to the group.
    InvalidResult,
    /// The proposed vote set violates one or more budget rules.
    InvalidVotes,
    /// The referenced lunchbreak, participant, or group does not exist.
    NotFound,
    /// A uniqueness conflict that could not be recovered internally.
    Conflict,
    /// A collaborator (store, directory) could not be reached.
    ServiceUnavailable,
    /// An unexpected error occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("missing");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorValidationError {
    EmptyMessage,
}

impl std::fmt::Display for ErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for ErrorValidationError {}

impl Error {
    /// Create a new error, panicking if validation fails.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::VotingClosed`].
    pub fn voting_closed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VotingClosed, message)
    }

    /// Convenience constructor for [`ErrorCode::NotToday`].
    pub fn not_today(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotToday, message)
    }

    /// Convenience constructor for [`ErrorCode::PastOnly`].
    pub fn past_only(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PastOnly, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidResult`].
    pub fn invalid_result(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidResult, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidVotes`].
    ///
    /// Carries the complete violation list as structured details so callers
    /// can report every violated rule in one response.
    pub fn invalid_votes(violations: &VoteViolations) -> Self {
        let error = Self::new(ErrorCode::InvalidVotes, "vote set violates budget rules");
        match serde_json::to_value(violations.violations()) {
            Ok(details) => error.with_details(details),
            Err(_) => error,
        }
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = ErrorValidationError;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = Error::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
