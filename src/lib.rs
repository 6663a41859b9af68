pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod score;
pub mod state;
pub mod stats;
pub mod storage;
pub mod streak;
pub mod timer;
pub mod tracker;

pub use app::{router, spawn_timer};
pub use config::Config;
pub use state::AppState;
pub use storage::{load_data, FileStore, KeyValueStore, MemoryStore};
