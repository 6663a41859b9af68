use crate::models::{DailyScore, DayLog, Habit, Task, TrackerData};
use chrono::NaiveDate;

/// Completion share of one habit for a day, capped at 1.
pub fn habit_ratio(habit: &Habit, log: Option<&DayLog>) -> f64 {
    if habit.goal == 0 {
        return 0.0;
    }
    let value = log.and_then(|log| log.get(&habit.id)).copied().unwrap_or(0);
    (f64::from(value) / f64::from(habit.goal)).min(1.0)
}

pub fn habit_score(habits: &[Habit], log: Option<&DayLog>) -> u8 {
    if habits.is_empty() {
        return 0;
    }
    let sum: f64 = habits.iter().map(|habit| habit_ratio(habit, log)).sum();
    percent(sum / habits.len() as f64)
}

pub fn task_score(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let done = tasks.iter().filter(|task| task.done).count();
    percent(done as f64 / tasks.len() as f64)
}

pub fn daily_score(data: &TrackerData, date: NaiveDate) -> DailyScore {
    let habit_score = habit_score(&data.habits, data.habit_log.get(&date));
    let task_score = task_score(&data.tasks);
    let overall = if data.habits.is_empty() && data.tasks.is_empty() {
        0
    } else {
        round_half_up((f64::from(habit_score) + f64::from(task_score)) / 2.0)
    };

    DailyScore {
        habit_score,
        task_score,
        overall,
    }
}

impl DailyScore {
    pub fn is_perfect(&self) -> bool {
        self.overall == 100
    }
}

fn percent(ratio: f64) -> u8 {
    round_half_up(ratio * 100.0)
}

fn round_half_up(value: f64) -> u8 {
    (value + 0.5).floor().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn habit(goal: u32) -> Habit {
        Habit {
            id: Uuid::new_v4(),
            name: "habit".into(),
            icon: "*".into(),
            goal,
            unit: "times".into(),
            color: "#000".into(),
        }
    }

    fn task(done: bool) -> Task {
        Task {
            id: Uuid::new_v4(),
            text: "task".into(),
            done,
            priority: 1,
            tag: None,
            created: day(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()
    }

    #[test]
    fn worked_example_scores() {
        let mut data = TrackerData::empty();
        let water = habit(8);
        let exercise = habit(1);
        let mut log = DayLog::new();
        log.insert(water.id, 4);
        log.insert(exercise.id, 1);
        data.habits = vec![water, exercise];
        data.habit_log.insert(day(), log);
        data.tasks = vec![task(true), task(true), task(true), task(false), task(false)];

        let score = daily_score(&data, day());
        assert_eq!(score.habit_score, 75);
        assert_eq!(score.task_score, 60);
        assert_eq!(score.overall, 68);
        assert!(!score.is_perfect());
    }

    #[test]
    fn empty_data_scores_zero() {
        let score = daily_score(&TrackerData::empty(), day());
        assert_eq!(
            score,
            DailyScore {
                habit_score: 0,
                task_score: 0,
                overall: 0
            }
        );
    }

    #[test]
    fn overshooting_a_goal_is_capped() {
        let over = habit(2);
        let mut log = DayLog::new();
        log.insert(over.id, 9);
        assert_eq!(habit_ratio(&over, Some(&log)), 1.0);
        assert_eq!(habit_score(&[over], Some(&log)), 100);
    }

    #[test]
    fn habits_only_still_average_with_zero_tasks() {
        let mut data = TrackerData::empty();
        let done = habit(1);
        let mut log = DayLog::new();
        log.insert(done.id, 1);
        data.habits = vec![done];
        data.habit_log.insert(day(), log);

        let score = daily_score(&data, day());
        assert_eq!(score.habit_score, 100);
        assert_eq!(score.task_score, 0);
        assert_eq!(score.overall, 50);
    }

    #[test]
    fn all_complete_is_perfect() {
        let mut data = TrackerData::empty();
        data.tasks = vec![task(true)];
        let score = daily_score(&data, day());
        assert_eq!(score.task_score, 100);
        assert_eq!(score.overall, 50);

        let h = habit(3);
        let mut log = DayLog::new();
        log.insert(h.id, 3);
        data.habits = vec![h];
        data.habit_log.insert(day(), log);
        assert!(daily_score(&data, day()).is_perfect());
    }

    #[test]
    fn one_third_rounds_down() {
        let tasks = vec![task(true), task(false), task(false)];
        assert_eq!(task_score(&tasks), 33);
        let tasks = vec![task(true), task(true), task(false)];
        assert_eq!(task_score(&tasks), 67);
    }
}
