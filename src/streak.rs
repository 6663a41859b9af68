use crate::models::TrackerData;
use chrono::{Duration, NaiveDate};

/// How far back a streak is followed.
pub const STREAK_LOOKBACK_DAYS: u32 = 60;

/// A day counts toward the streak once a mood has been checked in.
pub fn has_activity(data: &TrackerData, date: NaiveDate) -> bool {
    data.mood.contains_key(&date)
}

/// Counts consecutive active days ending today. An empty today is skipped
/// rather than ending the streak, so the count survives until the day is over.
pub fn current_streak(data: &TrackerData, today: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_LOOKBACK_DAYS {
        let date = today - Duration::days(i64::from(offset));
        if has_activity(data, date) {
            streak += 1;
        } else if date != today {
            break;
        }
    }
    streak
}
