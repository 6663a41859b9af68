use crate::errors::AppError;
use crate::models::{
    mood_label, Goal, GoalView, Habit, HabitLogResponse, HabitProgress, JournalEntry, JournalRequest,
    JournalResponse, MoodRequest, NewGoalRequest, NewHabitRequest, NewTaskRequest, PresetRequest,
    StatsResponse, Task, TaskListResponse, TaskQuery, TaskView, TodayResponse, TrackerData,
    UpdateTaskRequest,
};
use crate::score::{daily_score, habit_ratio};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::streak::current_streak;
use crate::timer::TimerSnapshot;
use crate::tracker::{LogOutcome, TaskFilter, TrackerError, JOURNAL_HISTORY_LIMIT};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use tracing::info;
use uuid::Uuid;

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let date = today();
    let data = state.data.lock().await;
    Ok(Json(today_response(&data, date)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

// Tasks

pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Json<TaskListResponse> {
    let filter = TaskFilter {
        tag: query.tag,
        priority: query.priority,
    };
    let data = state.data.lock().await;
    Json(TaskListResponse {
        pending: data
            .pending_tasks(&filter)
            .into_iter()
            .map(TaskView::from)
            .collect(),
        done: data
            .done_tasks(&filter)
            .into_iter()
            .map(TaskView::from)
            .collect(),
        tags: data.all_tags(),
    })
}

pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<NewTaskRequest>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let date = today();
    let task = state
        .mutate(|data| data.add_task(&payload.text, payload.priority, payload.tag, date))
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, AppError> {
    if payload.text.is_none() && payload.done.is_none() {
        return Err(AppError::bad_request("nothing to update"));
    }

    let task = state
        .mutate(|data| {
            let mut task = data.task(id)?.clone();
            if let Some(text) = &payload.text {
                task = data.edit_task(id, text)?;
            }
            if let Some(done) = payload.done {
                task = data.set_task_done(id, done)?;
            }
            Ok::<_, TrackerError>(task)
        })
        .await?;

    if payload.done == Some(true) {
        info!(task = %task.id, "task completed");
    }
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.mutate(|data| data.delete_task(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_focus(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Task>>, AppError> {
    let focus = state
        .mutate(|data| {
            data.toggle_focus(id)?;
            Ok::<_, TrackerError>(data.focus_task().cloned())
        })
        .await?;
    Ok(Json(focus))
}

// Habits

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitProgress>> {
    let date = today();
    let data = state.data.lock().await;
    Json(habit_progress(&data, date))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<NewHabitRequest>,
) -> Result<(StatusCode, Json<Habit>), AppError> {
    let habit = state
        .mutate(|data| {
            data.add_habit(
                &payload.name,
                payload.icon,
                payload.goal,
                payload.unit,
                payload.color,
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.mutate(|data| data.delete_habit(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn log_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitLogResponse>, AppError> {
    let date = today();
    let outcome = state.mutate(|data| data.log_habit(id, date)).await?;
    if outcome.completed {
        info!(habit = %id, "habit goal reached");
    }
    Ok(Json(to_log_response(id, date, outcome)))
}

pub async fn unlog_habit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HabitLogResponse>, AppError> {
    let date = today();
    let outcome = state.mutate(|data| data.unlog_habit(id, date)).await?;
    Ok(Json(to_log_response(id, date, outcome)))
}

// Mood & journal

pub async fn set_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let date = today();
    state.mutate(|data| data.set_mood(date, payload.value)).await?;
    let data = state.data.lock().await;
    Ok(Json(today_response(&data, date)))
}

pub async fn get_journal(State(state): State<AppState>) -> Json<JournalResponse> {
    let date = today();
    let data = state.data.lock().await;
    Json(journal_response(&data, date))
}

pub async fn save_journal(
    State(state): State<AppState>,
    Json(payload): Json<JournalRequest>,
) -> Result<Json<JournalResponse>, AppError> {
    let date = today();
    let entry = JournalEntry {
        note: payload.note,
        gratitude: payload.gratitude,
        intention: payload.intention,
    };
    state
        .mutate(|data| {
            data.save_journal(date, entry);
            Ok::<_, TrackerError>(())
        })
        .await?;
    let data = state.data.lock().await;
    Ok(Json(journal_response(&data, date)))
}

// Goals

pub async fn list_goals(State(state): State<AppState>) -> Json<Vec<GoalView>> {
    let date = today();
    let data = state.data.lock().await;
    Json(data.goal_views(date))
}

pub async fn create_goal(
    State(state): State<AppState>,
    Json(payload): Json<NewGoalRequest>,
) -> Result<(StatusCode, Json<Goal>), AppError> {
    let goal = state
        .mutate(|data| {
            data.add_goal(
                &payload.title,
                payload.target,
                payload.deadline,
                payload.color,
            )
        })
        .await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

pub async fn delete_goal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.mutate(|data| data.delete_goal(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Focus timer

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    Json(state.timer.lock().await.snapshot())
}

pub async fn toggle_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    let mut timer = state.timer.lock().await;
    timer.toggle();
    Json(timer.snapshot())
}

pub async fn reset_timer(State(state): State<AppState>) -> Json<TimerSnapshot> {
    let mut timer = state.timer.lock().await;
    timer.reset();
    Json(timer.snapshot())
}

pub async fn select_preset(
    State(state): State<AppState>,
    Json(payload): Json<PresetRequest>,
) -> Result<Json<TimerSnapshot>, AppError> {
    let mut timer = state.timer.lock().await;
    timer.select_preset(payload.minutes)?;
    Ok(Json(timer.snapshot()))
}

fn today_response(data: &TrackerData, date: NaiveDate) -> TodayResponse {
    let score = daily_score(data, date);
    TodayResponse {
        date: date.to_string(),
        perfect: score.is_perfect(),
        score,
        streak: current_streak(data, date),
        mood: data.mood.get(&date).copied(),
        mood_label: data
            .mood
            .get(&date)
            .and_then(|value| mood_label(*value))
            .map(str::to_string),
        pending_tasks: data.tasks.iter().filter(|task| !task.done).count(),
        done_tasks: data.tasks.iter().filter(|task| task.done).count(),
        habits: habit_progress(data, date),
        focus: data.focus_task().cloned(),
    }
}

fn habit_progress(data: &TrackerData, date: NaiveDate) -> Vec<HabitProgress> {
    let log = data.habit_log.get(&date);
    data.habits
        .iter()
        .map(|habit| HabitProgress {
            id: habit.id,
            name: habit.name.clone(),
            icon: habit.icon.clone(),
            unit: habit.unit.clone(),
            color: habit.color.clone(),
            goal: habit.goal,
            value: data.habit_value(habit.id, date),
            percent: (habit_ratio(habit, log) * 100.0).round() as u8,
        })
        .collect()
}

fn journal_response(data: &TrackerData, date: NaiveDate) -> JournalResponse {
    JournalResponse {
        today: data.journal_day(date),
        history: data.journal_history(date, JOURNAL_HISTORY_LIMIT),
    }
}

fn to_log_response(habit_id: Uuid, date: NaiveDate, outcome: LogOutcome) -> HabitLogResponse {
    HabitLogResponse {
        habit_id,
        date: date.to_string(),
        value: outcome.value,
        completed: outcome.completed,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
