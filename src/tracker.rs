//! Update and query operations over `TrackerData`.
//!
//! Every operation is a plain function of the data and an explicit `today`,
//! so the HTTP layer decides the clock and the storage layer decides
//! persistence.

use crate::models::{
    mood_label, Goal, GoalView, Habit, JournalDay, JournalEntry, Task, TrackerData,
    DEFAULT_PRIORITY, MOODS, PRIORITIES,
};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

pub const JOURNAL_HISTORY_LIMIT: usize = 20;

const DEFAULT_ICON: &str = "⭐";
const DEFAULT_UNIT: &str = "times";
const DEFAULT_COLOR: &str = "#3b82f6";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackerError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },
    #[error("{0}")]
    Invalid(String),
}

impl TrackerError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub tag: Option<String>,
    pub priority: Option<u8>,
}

impl TaskFilter {
    fn matches(&self, task: &Task) -> bool {
        let tag_ok = match &self.tag {
            Some(tag) => task.tag.as_deref() == Some(tag.as_str()),
            None => true,
        };
        let priority_ok = self.priority.is_none_or(|priority| task.priority == priority);
        tag_ok && priority_ok
    }
}

/// Result of cycling a habit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogOutcome {
    pub value: u32,
    /// True when this log is the one that reached the goal.
    pub completed: bool,
}

/// `0` once the goal is met, otherwise one more.
pub fn next_log_value(current: u32, goal: u32) -> u32 {
    if current >= goal { 0 } else { current + 1 }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl TrackerData {
    // Tasks

    pub fn add_task(
        &mut self,
        text: &str,
        priority: Option<i64>,
        tag: Option<String>,
        today: NaiveDate,
    ) -> Result<Task, TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TrackerError::invalid("task text must not be empty"));
        }
        let priority = priority.unwrap_or(i64::from(DEFAULT_PRIORITY));
        let priority = u8::try_from(priority)
            .ok()
            .filter(|priority| usize::from(*priority) < PRIORITIES.len())
            .ok_or_else(|| {
                TrackerError::invalid(format!(
                    "priority must be between 0 and {}",
                    PRIORITIES.len() - 1
                ))
            })?;

        let task = Task {
            id: Uuid::new_v4(),
            text: text.to_string(),
            done: false,
            priority,
            tag: non_blank(tag),
            created: today,
        };
        self.tasks.insert(0, task.clone());
        Ok(task)
    }

    pub fn task(&self, id: Uuid) -> Result<&Task, TrackerError> {
        self.tasks
            .iter()
            .find(|task| task.id == id)
            .ok_or(TrackerError::NotFound { kind: "task", id })
    }

    fn task_mut(&mut self, id: Uuid) -> Result<&mut Task, TrackerError> {
        self.tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TrackerError::NotFound { kind: "task", id })
    }

    pub fn set_task_done(&mut self, id: Uuid, done: bool) -> Result<Task, TrackerError> {
        let task = self.task_mut(id)?;
        task.done = done;
        let task = task.clone();
        if done && self.focus == Some(id) {
            self.focus = None;
        }
        Ok(task)
    }

    pub fn edit_task(&mut self, id: Uuid, text: &str) -> Result<Task, TrackerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TrackerError::invalid("task text must not be empty"));
        }
        let task = self.task_mut(id)?;
        task.text = text.to_string();
        Ok(task.clone())
    }

    pub fn delete_task(&mut self, id: Uuid) -> Result<Task, TrackerError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TrackerError::NotFound { kind: "task", id })?;
        if self.focus == Some(id) {
            self.focus = None;
        }
        Ok(self.tasks.remove(index))
    }

    pub fn pending_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| !task.done && filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn done_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .iter()
            .filter(|task| task.done && filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.tasks.iter().filter_map(|task| task.tag.as_ref()) {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }
        tags
    }

    /// Puts a pending task under focus, or clears focus if it already is.
    pub fn toggle_focus(&mut self, id: Uuid) -> Result<Option<Uuid>, TrackerError> {
        if self.task(id)?.done {
            return Err(TrackerError::invalid("cannot focus a completed task"));
        }
        self.focus = if self.focus == Some(id) { None } else { Some(id) };
        Ok(self.focus)
    }

    pub fn focus_task(&self) -> Option<&Task> {
        self.focus.and_then(|id| self.task(id).ok())
    }

    // Habits

    pub fn add_habit(
        &mut self,
        name: &str,
        icon: Option<String>,
        goal: Option<u32>,
        unit: Option<String>,
        color: Option<String>,
    ) -> Result<Habit, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::invalid("habit name must not be empty"));
        }
        let goal = goal.unwrap_or(1);
        if goal == 0 {
            return Err(TrackerError::invalid("habit goal must be at least 1"));
        }

        let habit = Habit {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon: non_blank(icon).unwrap_or_else(|| DEFAULT_ICON.to_string()),
            goal,
            unit: non_blank(unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            color: non_blank(color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        };
        self.habits.push(habit.clone());
        Ok(habit)
    }

    pub fn habit(&self, id: Uuid) -> Result<&Habit, TrackerError> {
        self.habits
            .iter()
            .find(|habit| habit.id == id)
            .ok_or(TrackerError::NotFound { kind: "habit", id })
    }

    /// Past log entries stay in `habit_log`; they are ignored once the habit
    /// is gone.
    pub fn delete_habit(&mut self, id: Uuid) -> Result<Habit, TrackerError> {
        let index = self
            .habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(TrackerError::NotFound { kind: "habit", id })?;
        Ok(self.habits.remove(index))
    }

    pub fn habit_value(&self, id: Uuid, date: NaiveDate) -> u32 {
        self.habit_log
            .get(&date)
            .and_then(|log| log.get(&id))
            .copied()
            .unwrap_or(0)
    }

    pub fn log_habit(&mut self, id: Uuid, today: NaiveDate) -> Result<LogOutcome, TrackerError> {
        let goal = self.habit(id)?.goal;
        let entry = self.habit_log.entry(today).or_default().entry(id).or_insert(0);
        let current = *entry;
        *entry = next_log_value(current, goal);
        Ok(LogOutcome {
            value: *entry,
            completed: current.checked_add(1) == Some(goal),
        })
    }

    pub fn unlog_habit(&mut self, id: Uuid, today: NaiveDate) -> Result<LogOutcome, TrackerError> {
        self.habit(id)?;
        let Some(entry) = self
            .habit_log
            .get_mut(&today)
            .and_then(|log| log.get_mut(&id))
        else {
            return Ok(LogOutcome {
                value: 0,
                completed: false,
            });
        };
        *entry = entry.saturating_sub(1);
        Ok(LogOutcome {
            value: *entry,
            completed: false,
        })
    }

    // Mood & journal

    pub fn set_mood(&mut self, today: NaiveDate, value: i64) -> Result<(), TrackerError> {
        let value = u8::try_from(value)
            .ok()
            .filter(|value| mood_label(*value).is_some())
            .ok_or_else(|| {
                TrackerError::invalid(format!("mood must be between 1 and {}", MOODS.len()))
            })?;
        self.mood.insert(today, value);
        Ok(())
    }

    pub fn save_journal(&mut self, today: NaiveDate, entry: JournalEntry) {
        self.journal.insert(today, entry);
    }

    pub fn journal_day(&self, date: NaiveDate) -> JournalDay {
        JournalDay {
            date: date.to_string(),
            mood: self.mood.get(&date).copied(),
            mood_label: self
                .mood
                .get(&date)
                .and_then(|value| mood_label(*value))
                .map(str::to_string),
            entry: self.journal.get(&date).cloned().unwrap_or_default(),
        }
    }

    /// Earlier days with a written note, newest first.
    pub fn journal_history(&self, today: NaiveDate, limit: usize) -> Vec<JournalDay> {
        self.journal
            .iter()
            .rev()
            .filter(|(date, entry)| **date != today && !entry.note.trim().is_empty())
            .take(limit)
            .map(|(date, _)| self.journal_day(*date))
            .collect()
    }

    // Goals

    pub fn add_goal(
        &mut self,
        title: &str,
        target: Option<String>,
        deadline: Option<NaiveDate>,
        color: Option<String>,
    ) -> Result<Goal, TrackerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::invalid("goal title must not be empty"));
        }
        let goal = Goal {
            id: Uuid::new_v4(),
            title: title.to_string(),
            target: non_blank(target),
            deadline,
            color: non_blank(color).unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        };
        self.goals.push(goal.clone());
        Ok(goal)
    }

    pub fn delete_goal(&mut self, id: Uuid) -> Result<Goal, TrackerError> {
        let index = self
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or(TrackerError::NotFound { kind: "goal", id })?;
        Ok(self.goals.remove(index))
    }

    pub fn goal_views(&self, today: NaiveDate) -> Vec<GoalView> {
        self.goals
            .iter()
            .map(|goal| {
                let days_left = days_left(goal, today);
                GoalView {
                    goal: goal.clone(),
                    days_left,
                    overdue: days_left.is_some_and(|days| days <= 0),
                }
            })
            .collect()
    }
}

pub fn days_left(goal: &Goal, today: NaiveDate) -> Option<i64> {
    goal.deadline.map(|deadline| (deadline - today).num_days())
}
