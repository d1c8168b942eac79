//! Consecutive-day workout streaks
//!
//! A streak is anchored at `today` or the day before. Older activity does not
//! count towards the current streak, and any missing day ends the walk.
//! `today` is always supplied by the caller.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

use crate::error::InputError;
use crate::models::WorkoutLogRecord;

/// Streak statistics over a workout history
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakStats {
    /// Consecutive days ending today or yesterday
    pub current_streak: u32,
    /// Longest run of consecutive days anywhere in the history
    pub longest_streak: u32,
    /// Distinct days with at least one log
    pub active_days: u32,
}

/// Current streak length for a workout history
pub fn calculate_streak_days(
    logs: &[WorkoutLogRecord],
    today: NaiveDate,
) -> Result<u32, InputError> {
    let dates = distinct_dates(logs)?;
    Ok(current_streak(&dates, today))
}

/// Current streak plus longest streak and active-day count
pub fn calculate_streak_stats(
    logs: &[WorkoutLogRecord],
    today: NaiveDate,
) -> Result<StreakStats, InputError> {
    let dates = distinct_dates(logs)?;

    Ok(StreakStats {
        current_streak: current_streak(&dates, today),
        longest_streak: longest_streak(&dates),
        active_days: dates.len() as u32,
    })
}

fn distinct_dates(logs: &[WorkoutLogRecord]) -> Result<BTreeSet<NaiveDate>, InputError> {
    logs.iter().map(WorkoutLogRecord::log_date).collect()
}

/// Walk back from the most recent date while each day is exactly one earlier
fn current_streak(dates: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut descending = dates.iter().rev();
    let Some(&most_recent) = descending.next() else {
        return 0;
    };

    let yesterday = today.checked_sub_days(Days::new(1));
    if most_recent != today && Some(most_recent) != yesterday {
        trace!(%most_recent, %today, "Streak broken");
        return 0;
    }

    let mut streak = 1;
    let mut anchor = most_recent;
    for &date in descending {
        match anchor.checked_sub_days(Days::new(1)) {
            Some(expected) if expected == date => {
                streak += 1;
                anchor = date;
            }
            _ => break,
        }
    }
    streak
}

fn longest_streak(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for &date in dates {
        run = match previous.and_then(|p| p.checked_add_days(Days::new(1))) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn days_ago(n: u64) -> WorkoutLogRecord {
        let date = today().checked_sub_days(Days::new(n)).unwrap();
        WorkoutLogRecord::on(date.format("%Y-%m-%d").to_string())
    }

    fn streak(logs: &[WorkoutLogRecord]) -> u32 {
        calculate_streak_days(logs, today()).unwrap()
    }

    #[test]
    fn test_empty_logs() {
        assert_eq!(streak(&[]), 0);
    }

    #[test]
    fn test_single_log_today() {
        assert_eq!(streak(&[days_ago(0)]), 1);
    }

    #[test]
    fn test_anchor_yesterday() {
        assert_eq!(streak(&[days_ago(1), days_ago(2)]), 2);
    }

    #[test]
    fn test_gap_before_today_breaks_streak() {
        assert_eq!(streak(&[days_ago(2)]), 0);
        assert_eq!(streak(&[days_ago(2), days_ago(3), days_ago(4), days_ago(5)]), 0);
    }

    #[test]
    fn test_three_consecutive_days() {
        assert_eq!(streak(&[days_ago(0), days_ago(1), days_ago(2)]), 3);
    }

    #[test]
    fn test_single_gap_stops_walk() {
        assert_eq!(streak(&[days_ago(0), days_ago(2)]), 1);
    }

    #[test]
    fn test_duplicates_and_order_do_not_matter() {
        let logs = [days_ago(1), days_ago(0), days_ago(1), days_ago(2), days_ago(0)];
        assert_eq!(streak(&logs), 3);
    }

    #[test]
    fn test_future_log_breaks_streak() {
        let tomorrow = WorkoutLogRecord::on("2024-06-16");
        assert_eq!(streak(&[tomorrow, days_ago(0)]), 0);
    }

    #[test]
    fn test_malformed_date() {
        let err = calculate_streak_days(&[WorkoutLogRecord::on("15/06/2024")], today());
        assert!(matches!(err, Err(InputError::InvalidDate { .. })));
    }

    #[test]
    fn test_streak_stats() {
        let logs = [
            days_ago(0),
            days_ago(1),
            days_ago(5),
            days_ago(6),
            days_ago(7),
            days_ago(8),
            days_ago(8),
        ];
        let stats = calculate_streak_stats(&logs, today()).unwrap();
        assert_eq!(
            stats,
            StreakStats {
                current_streak: 2,
                longest_streak: 4,
                active_days: 6,
            }
        );

        assert_eq!(calculate_streak_stats(&[], today()).unwrap(), StreakStats::default());
    }
}
