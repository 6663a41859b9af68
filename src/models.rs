use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Task priority labels, indexed by `Task::priority`.
pub const PRIORITIES: [&str; 3] = ["Urgent", "Normal", "Gentle"];
pub const DEFAULT_PRIORITY: u8 = 1;

/// Mood scale, indexed by `value - 1`.
pub const MOODS: [&str; 5] = ["Awful", "Bad", "Okay", "Good", "Great"];

pub fn priority_label(priority: u8) -> Option<&'static str> {
    PRIORITIES.get(usize::from(priority)).copied()
}

pub fn mood_label(value: u8) -> Option<&'static str> {
    usize::from(value)
        .checked_sub(1)
        .and_then(|index| MOODS.get(index))
        .copied()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub text: String,
    pub done: bool,
    pub priority: u8,
    pub tag: Option<String>,
    pub created: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub goal: u32,
    pub unit: String,
    pub color: String,
}

impl Habit {
    fn preset(name: &str, icon: &str, goal: u32, unit: &str, color: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon: icon.to_string(),
            goal,
            unit: unit.to_string(),
            color: color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub target: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub gratitude: String,
    #[serde(default)]
    pub intention: String,
}

/// Per-day habit values, keyed by habit id.
pub type DayLog = BTreeMap<Uuid, u32>;

/// Everything the tracker persists, stored as a single JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub habit_log: BTreeMap<NaiveDate, DayLog>,
    #[serde(default)]
    pub mood: BTreeMap<NaiveDate, u8>,
    #[serde(default)]
    pub journal: BTreeMap<NaiveDate, JournalEntry>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub focus: Option<Uuid>,
}

impl TrackerData {
    /// Empty data with no starter habits.
    pub fn empty() -> Self {
        Self {
            tasks: Vec::new(),
            habits: Vec::new(),
            habit_log: BTreeMap::new(),
            mood: BTreeMap::new(),
            journal: BTreeMap::new(),
            goals: Vec::new(),
            focus: None,
        }
    }
}

impl Default for TrackerData {
    fn default() -> Self {
        Self {
            habits: vec![
                Habit::preset("Water", "💧", 8, "glasses", "#3b82f6"),
                Habit::preset("Exercise", "🏃", 1, "session", "#10b981"),
                Habit::preset("Reading", "📚", 30, "min", "#f59e0b"),
                Habit::preset("Meditation", "🧘", 10, "min", "#8b5cf6"),
            ],
            ..Self::empty()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewTaskRequest {
    pub text: String,
    pub priority: Option<i64>,
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub text: Option<String>,
    pub done: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub tag: Option<String>,
    pub priority: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub struct NewHabitRequest {
    pub name: String,
    pub goal: Option<u32>,
    pub icon: Option<String>,
    pub unit: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoodRequest {
    pub value: i64,
}

#[derive(Debug, Deserialize)]
pub struct JournalRequest {
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub gratitude: String,
    #[serde(default)]
    pub intention: String,
}

#[derive(Debug, Deserialize)]
pub struct NewGoalRequest {
    pub title: String,
    pub target: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PresetRequest {
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyScore {
    pub habit_score: u8,
    pub task_score: u8,
    pub overall: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitProgress {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub unit: String,
    pub color: String,
    pub goal: u32,
    pub value: u32,
    pub percent: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub date: String,
    pub score: DailyScore,
    pub perfect: bool,
    pub streak: u32,
    pub mood: Option<u8>,
    pub mood_label: Option<String>,
    pub pending_tasks: usize,
    pub done_tasks: usize,
    pub habits: Vec<HabitProgress>,
    pub focus: Option<Task>,
}

/// A task as listed, with its priority spelled out.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub priority_label: String,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        let priority_label = priority_label(task.priority)
            .unwrap_or(PRIORITIES[usize::from(DEFAULT_PRIORITY)])
            .to_string();
        Self {
            task,
            priority_label,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub pending: Vec<TaskView>,
    pub done: Vec<TaskView>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitLogResponse {
    pub habit_id: Uuid,
    pub date: String,
    pub value: u32,
    pub completed: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalDay {
    pub date: String,
    pub mood: Option<u8>,
    pub mood_label: Option<String>,
    pub entry: JournalEntry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JournalResponse {
    pub today: JournalDay,
    pub history: Vec<JournalDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    pub days_left: Option<i64>,
    pub overdue: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitRatio {
    pub habit_id: Uuid,
    pub ratio: f64,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: String,
    pub mood: Option<u8>,
    pub habit_score: u8,
    pub habits: Vec<HabitRatio>,
}

#[derive(Debug, Serialize)]
pub struct WeeklyAveragePoint {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub days_counted: u8,
    pub avg_habit_score: f64,
    pub avg_mood: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub weekly_averages: Vec<WeeklyAveragePoint>,
}
