//! Lunchbreak decision engine: lifecycle, participation, and vote rules
//! for a group's daily lunch vote.

pub mod domain;
pub mod outbound;
pub mod test_support;
