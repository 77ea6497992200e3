//! Responseless-member computation.
//!
//! A member is responseless on a lunchbreak when they have neither a
//! participant nor an absence recorded. Pure set computation; the result
//! preserves the order of the supplied member list.

use std::collections::HashSet;

use super::MemberId;
use super::lunchbreak::{Absence, Participant};

/// Members of `members` with neither a participant nor an absence.
pub fn responseless_members(
    members: &[MemberId],
    participants: &[Participant],
    absences: &[Absence],
) -> Vec<MemberId> {
    let responded: HashSet<MemberId> = participants
        .iter()
        .map(|participant| participant.member_id)
        .chain(absences.iter().map(|absence| absence.member_id))
        .collect();

    let mut seen = HashSet::new();
    members
        .iter()
        .copied()
        .filter(|member| !responded.contains(member) && seen.insert(*member))
        .collect()
}
