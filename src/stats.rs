use crate::models::{DailyPoint, HabitRatio, StatsResponse, TrackerData, WeeklyAveragePoint};
use crate::score::{habit_ratio, habit_score};
use chrono::{Datelike, Duration, Local, NaiveDate};

pub fn build_stats(data: &TrackerData) -> StatsResponse {
    build_stats_at(Local::now().date_naive(), data)
}

pub fn build_stats_at(today: NaiveDate, data: &TrackerData) -> StatsResponse {
    const WEEK_COUNT: usize = 8;

    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let log = data.habit_log.get(&date);
        last_7_days.push(DailyPoint {
            date: date.to_string(),
            mood: data.mood.get(&date).copied(),
            habit_score: habit_score(&data.habits, log),
            habits: data
                .habits
                .iter()
                .map(|habit| HabitRatio {
                    habit_id: habit.id,
                    ratio: habit_ratio(habit, log),
                })
                .collect(),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly_averages = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let days_counted = if today < start {
            0
        } else if today > end {
            7
        } else {
            (today - start).num_days() as u8 + 1
        };

        let mut score_sum = 0u32;
        let mut mood_sum = 0u32;
        let mut mood_days = 0u32;
        for day_offset in 0..i64::from(days_counted) {
            let date = start + Duration::days(day_offset);
            score_sum += u32::from(habit_score(&data.habits, data.habit_log.get(&date)));
            if let Some(mood) = data.mood.get(&date) {
                mood_sum += u32::from(*mood);
                mood_days += 1;
            }
        }

        let denom = if days_counted == 0 { 1.0 } else { f64::from(days_counted) };

        weekly_averages.push(WeeklyAveragePoint {
            week: week_label(start),
            start_date: start.to_string(),
            end_date: end.to_string(),
            days_counted,
            avg_habit_score: f64::from(score_sum) / denom,
            avg_mood: (mood_days > 0).then(|| f64::from(mood_sum) / f64::from(mood_days)),
        });
    }

    StatsResponse {
        last_7_days,
        weekly_averages,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayLog;

    #[test]
    fn stats_last_7_days_includes_each_day() {
        let mut data = TrackerData::empty();
        let habit = data.add_habit("Water", None, Some(4), None, None).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let two_days_ago = today - Duration::days(2);
        let mut log = DayLog::new();
        log.insert(habit.id, 2);
        data.habit_log.insert(two_days_ago, log);
        data.mood.insert(two_days_ago, 4);

        let stats = build_stats_at(today, &data);
        assert_eq!(stats.last_7_days.len(), 7);
        assert_eq!(stats.last_7_days[6].date, today.to_string());
        let point = stats
            .last_7_days
            .iter()
            .find(|day| day.date == two_days_ago.to_string())
            .expect("missing day");
        assert_eq!(point.habit_score, 50);
        assert_eq!(point.mood, Some(4));
        assert_eq!(point.habits[0].ratio, 0.5);
    }

    #[test]
    fn stats_weekly_series_length() {
        let data = TrackerData::empty();
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let stats = build_stats_at(today, &data);
        assert_eq!(stats.weekly_averages.len(), 8);
        let current = stats.weekly_averages.last().unwrap();
        assert_eq!(current.week, "2026-W02");
        assert_eq!(current.days_counted, 1);
        assert_eq!(current.avg_mood, None);
    }

    #[test]
    fn current_week_averages_only_elapsed_days() {
        let mut data = TrackerData::empty();
        let habit = data.add_habit("Read", None, Some(1), None, None).unwrap();
        // Wednesday: Monday and Wednesday done, Tuesday missed.
        let today = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
        for offset in [0, 2] {
            let mut log = DayLog::new();
            log.insert(habit.id, 1);
            data.habit_log.insert(today - Duration::days(offset), log);
        }
        data.mood.insert(today, 5);
        data.mood.insert(today - Duration::days(1), 2);

        let stats = build_stats_at(today, &data);
        let current = stats.weekly_averages.last().unwrap();
        assert_eq!(current.days_counted, 3);
        assert!((current.avg_habit_score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(current.avg_mood, Some(3.5));
    }
}
