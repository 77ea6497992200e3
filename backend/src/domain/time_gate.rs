//! The vote-ending time gate.
//!
//! Single authority for every time-gated decision in the engine: when a
//! date's voting deadline falls in UTC, whether that deadline has passed,
//! and what "today" means in a group's local time. No other component
//! re-implements these comparisons.
//!
//! All functions are pure over an explicit `now`; services feed them
//! `clock.utc()` so tests can freeze or advance a simulated instant.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

use super::GroupConfig;

/// UTC instant at which voting for `date` closes.
///
/// The group-local deadline is `date` at the configured vote-ending time;
/// normalising to UTC subtracts the group's offset.
pub fn voting_deadline_utc(config: &GroupConfig, date: NaiveDate) -> DateTime<Utc> {
    let local_deadline = date.and_time(config.vote_ending_time());
    let utc_naive = local_deadline - TimeDelta::minutes(i64::from(config.utc_offset_minutes()));
    DateTime::from_naive_utc_and_offset(utc_naive, Utc)
}

/// Whether the vote-ending time for `date` has passed at `now`.
///
/// The comparison is strict: an action at exactly the deadline instant is
/// still allowed.
pub fn is_vote_ending_time_reached(now: DateTime<Utc>, config: &GroupConfig, date: NaiveDate) -> bool {
    now > voting_deadline_utc(config, date)
}

/// The group-local calendar date at `now`.
pub fn local_date(now: DateTime<Utc>, config: &GroupConfig) -> NaiveDate {
    (now + TimeDelta::minutes(i64::from(config.utc_offset_minutes()))).date_naive()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use rstest::rstest;
    use vote_budget::BudgetRules;

    use super::*;

    fn config(offset_minutes: i32) -> GroupConfig {
        let budget = BudgetRules::new(100, 30, 70).expect("valid budget");
        let cutoff = NaiveTime::from_hms_opt(12, 25, 0).expect("valid time");
        GroupConfig::new(cutoff, offset_minutes, budget).expect("valid config")
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 13).expect("valid date")
    }

    fn utc(date: NaiveDate, h: u32, m: u32, s: u32) -> DateTime<Utc> {
        let time = NaiveTime::from_hms_opt(h, m, s).expect("valid time");
        DateTime::from_naive_utc_and_offset(date.and_time(time), Utc)
    }

    #[test]
    fn deadline_matches_cutoff_at_zero_offset() {
        assert_eq!(
            voting_deadline_utc(&config(0), date()),
            utc(date(), 12, 25, 0)
        );
    }

    #[test]
    fn positive_offset_pulls_the_deadline_earlier_in_utc() {
        // Local noon cutoff at UTC+2 falls at 10:25 UTC.
        assert_eq!(
            voting_deadline_utc(&config(120), date()),
            utc(date(), 10, 25, 0)
        );
    }

    #[test]
    fn negative_offset_pushes_the_deadline_later_in_utc() {
        assert_eq!(
            voting_deadline_utc(&config(-90), date()),
            utc(date(), 13, 55, 0)
        );
    }

    #[rstest]
    #[case(12, 24, 59, false)]
    #[case(12, 25, 0, false)]
    #[case(12, 25, 1, true)]
    fn gate_is_strict_about_the_deadline_instant(
        #[case] h: u32,
        #[case] m: u32,
        #[case] s: u32,
        #[case] reached: bool,
    ) {
        let now = utc(date(), h, m, s);
        assert_eq!(is_vote_ending_time_reached(now, &config(0), date()), reached);
    }

    #[test]
    fn local_date_follows_the_group_offset() {
        let late_evening = utc(date(), 23, 30, 0);
        assert_eq!(local_date(late_evening, &config(0)), date());
        assert_eq!(
            local_date(late_evening, &config(120)),
            date().succ_opt().expect("next day exists")
        );
        assert_eq!(local_date(utc(date(), 0, 30, 0), &config(-60)), date().pred_opt().expect("previous day exists"));
    }
}
