use crate::handlers;
use crate::state::AppState;
use crate::timer::TimerEvent;
use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/today", get(handlers::get_today))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/:id",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/:id/focus", post(handlers::toggle_focus))
        .route(
            "/api/habits",
            get(handlers::list_habits).post(handlers::create_habit),
        )
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/log", post(handlers::log_habit))
        .route("/api/habits/:id/unlog", post(handlers::unlog_habit))
        .route("/api/mood", put(handlers::set_mood))
        .route(
            "/api/journal",
            get(handlers::get_journal).put(handlers::save_journal),
        )
        .route(
            "/api/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/api/goals/:id", delete(handlers::delete_goal))
        .route("/api/timer", get(handlers::get_timer))
        .route("/api/timer/toggle", post(handlers::toggle_timer))
        .route("/api/timer/reset", post(handlers::reset_timer))
        .route("/api/timer/preset", post(handlers::select_preset))
        .with_state(state)
}

/// Drives the focus timer, one tick per `period`.
pub fn spawn_timer(state: AppState, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let event = state.timer.lock().await.tick();
            match event {
                Some(TimerEvent::WorkFinished { sessions }) => {
                    info!(sessions, "focus session finished, break started");
                }
                Some(TimerEvent::BreakFinished) => info!("break finished, back to work"),
                None => {}
            }
        }
    })
}
