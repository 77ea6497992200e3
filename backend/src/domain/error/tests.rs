//! Tests for the domain error payload and its serde contract.

use super::*;
use rstest::rstest;
use serde_json::json;
use vote_budget::{BudgetRules, ProposedVote, validate_votes};

#[rstest]
#[case(Error::voting_closed("closed"), ErrorCode::VotingClosed)]
#[case(Error::not_today("wrong day"), ErrorCode::NotToday)]
#[case(Error::past_only("not today"), ErrorCode::PastOnly)]
#[case(Error::invalid_result("foreign place"), ErrorCode::InvalidResult)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("duplicate"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn convenience_constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::NotFound, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn details_round_trip_through_serde() {
    let error = Error::not_found("missing").with_details(json!({"groupId": 7}));
    let encoded = serde_json::to_string(&error).expect("error serialises");
    let decoded: Error = serde_json::from_str(&encoded).expect("error deserialises");
    assert_eq!(decoded, error);
    assert_eq!(decoded.details(), Some(&json!({"groupId": 7})));
}

#[rstest]
fn deserialisation_rejects_empty_messages() {
    let result = serde_json::from_value::<Error>(json!({
        "code": "not_found",
        "message": "  ",
    }));
    assert!(result.is_err());
}

#[rstest]
fn error_codes_use_snake_case_on_the_wire() {
    let encoded =
        serde_json::to_value(Error::voting_closed("closed")).expect("error serialises");
    assert_eq!(
        encoded.get("code").and_then(|code| code.as_str()),
        Some("voting_closed")
    );
}

#[rstest]
fn invalid_votes_carries_every_violation() {
    let rules = BudgetRules::new(100, 30, 70).expect("valid rules");
    let votes = [ProposedVote::new(1, 80), ProposedVote::new(1, 80)];
    let violations = validate_votes(&votes, &rules).expect_err("votes violate rules");

    let error = Error::invalid_votes(&violations);
    assert_eq!(error.code(), ErrorCode::InvalidVotes);

    let details = error.details().expect("violations attached");
    let items = details.as_array().expect("details are a list");
    assert_eq!(items.len(), violations.violations().len());
    assert!(
        items
            .iter()
            .any(|item| item.get("kind").and_then(|kind| kind.as_str())
                == Some("points-exceed-daily-budget"))
    );
}
