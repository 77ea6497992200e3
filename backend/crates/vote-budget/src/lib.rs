//! Vote set and point budget validation primitives.
//!
//! A group hands every participant a daily point budget to spread across the
//! places they vote for. This crate owns the rules that decide whether a
//! proposed vote set is acceptable:
//!
//! - every vote's points lie within the group's per-vote bounds,
//! - no two votes target the same place,
//! - the points add up to at most the daily budget.
//!
//! Validation is a pure function over the proposed votes and the group's
//! [`BudgetRules`]. All rule violations are collected and reported together
//! rather than failing on the first, so a caller can surface every problem in
//! one response. An empty vote set is always valid: a participant may record
//! where they ate without voting at all.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Errors raised when constructing [`BudgetRules`] from inconsistent bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BudgetRulesError {
    /// The daily budget must allow at least one point.
    #[error("points per day must be at least 1")]
    ZeroDailyBudget,
    /// The per-vote minimum must allow at least one point.
    #[error("minimum points per vote must be at least 1")]
    ZeroMinimumPerVote,
    /// The per-vote bounds must be ordered.
    #[error("minimum points per vote ({min}) exceeds maximum ({max})")]
    UnorderedBounds {
        /// Configured per-vote minimum.
        min: u32,
        /// Configured per-vote maximum.
        max: u32,
    },
    /// A single vote may never exceed the daily budget.
    #[error("maximum points per vote ({max}) exceeds points per day ({points_per_day})")]
    MaximumAboveDailyBudget {
        /// Configured per-vote maximum.
        max: u32,
        /// Configured daily budget.
        points_per_day: u32,
    },
}

/// Per-group point budget rules applied to every proposed vote set.
///
/// Invariants, enforced by [`BudgetRules::new`]:
/// `1 <= min_points_per_vote <= max_points_per_vote <= points_per_day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRules {
    points_per_day: u32,
    min_points_per_vote: u32,
    max_points_per_vote: u32,
}

impl BudgetRules {
    /// Validate and construct budget rules.
    ///
    /// # Errors
    ///
    /// Returns a [`BudgetRulesError`] when the bounds are zero, unordered, or
    /// exceed the daily budget.
    ///
    /// # Examples
    ///
    /// ```
    /// use vote_budget::BudgetRules;
    ///
    /// let rules = BudgetRules::new(100, 30, 70)?;
    /// assert_eq!(rules.points_per_day(), 100);
    /// # Ok::<(), vote_budget::BudgetRulesError>(())
    /// ```
    pub const fn new(
        points_per_day: u32,
        min_points_per_vote: u32,
        max_points_per_vote: u32,
    ) -> Result<Self, BudgetRulesError> {
        if points_per_day == 0 {
            return Err(BudgetRulesError::ZeroDailyBudget);
        }
        if min_points_per_vote == 0 {
            return Err(BudgetRulesError::ZeroMinimumPerVote);
        }
        if min_points_per_vote > max_points_per_vote {
            return Err(BudgetRulesError::UnorderedBounds {
                min: min_points_per_vote,
                max: max_points_per_vote,
            });
        }
        if max_points_per_vote > points_per_day {
            return Err(BudgetRulesError::MaximumAboveDailyBudget {
                max: max_points_per_vote,
                points_per_day,
            });
        }
        Ok(Self {
            points_per_day,
            min_points_per_vote,
            max_points_per_vote,
        })
    }

    /// Daily point budget shared across a participant's votes.
    #[must_use]
    pub const fn points_per_day(&self) -> u32 {
        self.points_per_day
    }

    /// Minimum points a single vote may carry.
    #[must_use]
    pub const fn min_points_per_vote(&self) -> u32 {
        self.min_points_per_vote
    }

    /// Maximum points a single vote may carry.
    #[must_use]
    pub const fn max_points_per_vote(&self) -> u32 {
        self.max_points_per_vote
    }
}

/// One entry of a proposed vote set: points for a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedVote {
    /// Identifier of the place the points go to.
    pub place_id: i64,
    /// Points assigned to the place.
    pub points: u32,
}

impl ProposedVote {
    /// Construct a proposed vote.
    #[must_use]
    pub const fn new(place_id: i64, points: u32) -> Self {
        Self { place_id, points }
    }
}

/// A single violated vote-set rule.
///
/// Serializes with a `kind` tag (`points-out-of-range`, `duplicate-place`,
/// `points-exceed-daily-budget`) so transports can relay violations as
/// structured payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum VoteViolation {
    /// A vote's points fall outside the per-vote bounds.
    #[error("vote for place {place_id} carries {points} points, allowed range is {min}..={max}")]
    PointsOutOfRange {
        /// Place the offending vote targets.
        place_id: i64,
        /// Offending point value.
        points: u32,
        /// Lower bound the value must satisfy.
        min: u32,
        /// Upper bound the value must satisfy.
        max: u32,
    },
    /// Two or more votes target the same place.
    #[error("multiple votes target place {place_id}")]
    DuplicatePlace {
        /// Place targeted by more than one vote.
        place_id: i64,
    },
    /// The vote set's total exceeds the daily budget.
    #[error("votes total {total} points, daily budget is {budget}")]
    PointsExceedDailyBudget {
        /// Computed sum over all proposed votes.
        total: u64,
        /// Configured daily budget.
        budget: u32,
    },
}

/// Every rule a proposed vote set violated, collected in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("vote set violates {} rule(s)", .violations.len())]
pub struct VoteViolations {
    violations: Vec<VoteViolation>,
}

impl VoteViolations {
    /// Individual violations in deterministic order: per-vote range
    /// violations first (vote order), then duplicated places (first
    /// occurrence order), then the budget total.
    #[must_use]
    pub fn violations(&self) -> &[VoteViolation] {
        &self.violations
    }

    /// Consume the collection, yielding the violation list.
    #[must_use]
    pub fn into_violations(self) -> Vec<VoteViolation> {
        self.violations
    }
}

/// Validate a proposed vote set against a group's budget rules.
///
/// Pure and deterministic; the outcome depends only on the arguments. All
/// violations are collected rather than short-circuited.
///
/// # Errors
///
/// Returns [`VoteViolations`] listing every violated rule.
///
/// # Examples
///
/// ```
/// use vote_budget::{BudgetRules, ProposedVote, validate_votes};
///
/// let rules = BudgetRules::new(100, 30, 70)?;
/// let votes = [ProposedVote::new(1, 70), ProposedVote::new(2, 30)];
/// assert!(validate_votes(&votes, &rules).is_ok());
/// # Ok::<(), vote_budget::BudgetRulesError>(())
/// ```
pub fn validate_votes(votes: &[ProposedVote], rules: &BudgetRules) -> Result<(), VoteViolations> {
    let mut violations = Vec::new();

    for vote in votes {
        let in_range =
            (rules.min_points_per_vote()..=rules.max_points_per_vote()).contains(&vote.points);
        if !in_range {
            violations.push(VoteViolation::PointsOutOfRange {
                place_id: vote.place_id,
                points: vote.points,
                min: rules.min_points_per_vote(),
                max: rules.max_points_per_vote(),
            });
        }
    }

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for vote in votes {
        if !seen.insert(vote.place_id) && reported.insert(vote.place_id) {
            violations.push(VoteViolation::DuplicatePlace {
                place_id: vote.place_id,
            });
        }
    }

    let total: u64 = votes.iter().map(|vote| u64::from(vote.points)).sum();
    if total > u64::from(rules.points_per_day()) {
        violations.push(VoteViolation::PointsExceedDailyBudget {
            total,
            budget: rules.points_per_day(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(VoteViolations { violations })
    }
}

#[cfg(test)]
mod tests {
    //! Covers budget rule construction and vote set validation behaviour.

    use rstest::rstest;

    use super::*;

    fn rules() -> BudgetRules {
        match BudgetRules::new(100, 30, 70) {
            Ok(rules) => rules,
            Err(error) => panic!("test rules must be valid: {error}"),
        }
    }

    fn violations_of(votes: &[ProposedVote]) -> Vec<VoteViolation> {
        match validate_votes(votes, &rules()) {
            Ok(()) => panic!("vote set unexpectedly valid"),
            Err(violations) => violations.into_violations(),
        }
    }

    #[rstest]
    #[case(0, 30, 70)]
    #[case(100, 0, 70)]
    #[case(100, 71, 70)]
    #[case(100, 30, 101)]
    fn rules_reject_inconsistent_bounds(#[case] day: u32, #[case] min: u32, #[case] max: u32) {
        assert!(BudgetRules::new(day, min, max).is_err());
    }

    #[test]
    fn rules_allow_single_point_budget() {
        assert!(BudgetRules::new(1, 1, 1).is_ok());
    }

    #[test]
    fn empty_vote_set_is_valid() {
        assert!(validate_votes(&[], &rules()).is_ok());
    }

    #[rstest]
    #[case(&[ProposedVote::new(1, 30)])]
    #[case(&[ProposedVote::new(1, 70), ProposedVote::new(2, 30)])]
    #[case(&[ProposedVote::new(1, 33), ProposedVote::new(2, 33), ProposedVote::new(3, 34)])]
    fn vote_sets_within_rules_are_valid(#[case] votes: &[ProposedVote]) {
        assert!(validate_votes(votes, &rules()).is_ok());
    }

    #[rstest]
    #[case(71)]
    #[case(29)]
    #[case(0)]
    fn out_of_range_points_are_reported_with_bounds(#[case] points: u32) {
        let found = violations_of(&[ProposedVote::new(1, points)]);
        assert_eq!(
            found.first(),
            Some(&VoteViolation::PointsOutOfRange {
                place_id: 1,
                points,
                min: 30,
                max: 70,
            })
        );
    }

    #[test]
    fn duplicate_place_is_reported_once_per_place() {
        let found = violations_of(&[
            ProposedVote::new(1, 70),
            ProposedVote::new(1, 30),
        ]);
        assert_eq!(found, vec![VoteViolation::DuplicatePlace { place_id: 1 }]);
    }

    #[test]
    fn budget_overrun_carries_total_and_budget() {
        let found = violations_of(&[
            ProposedVote::new(1, 70),
            ProposedVote::new(2, 70),
        ]);
        assert_eq!(
            found,
            vec![VoteViolation::PointsExceedDailyBudget {
                total: 140,
                budget: 100,
            }]
        );
    }

    #[test]
    fn exact_budget_total_is_accepted() {
        let votes = [ProposedVote::new(1, 70), ProposedVote::new(2, 30)];
        assert!(validate_votes(&votes, &rules()).is_ok());
    }

    #[test]
    fn all_violations_are_collected_together() {
        let found = violations_of(&[
            ProposedVote::new(1, 80),
            ProposedVote::new(1, 80),
        ]);
        assert_eq!(found.len(), 4);
        assert!(matches!(
            found.first(),
            Some(VoteViolation::PointsOutOfRange { place_id: 1, .. })
        ));
        assert!(found.contains(&VoteViolation::DuplicatePlace { place_id: 1 }));
        assert!(found.contains(&VoteViolation::PointsExceedDailyBudget {
            total: 160,
            budget: 100,
        }));
    }

    #[test]
    fn violation_kind_tags_are_stable() {
        let violation = VoteViolation::DuplicatePlace { place_id: 9 };
        let json = match serde_json::to_value(violation) {
            Ok(json) => json,
            Err(error) => panic!("violation must serialize: {error}"),
        };
        assert_eq!(json.get("kind").and_then(|kind| kind.as_str()), Some("duplicate-place"));
        assert_eq!(json.get("placeId").and_then(serde_json::Value::as_i64), Some(9));
    }
}
