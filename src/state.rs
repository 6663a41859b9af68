use crate::errors::AppError;
use crate::models::TrackerData;
use crate::storage::{persist_data, KeyValueStore};
use crate::timer::FocusTimer;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn KeyValueStore>,
    pub data: Arc<Mutex<TrackerData>>,
    pub timer: Arc<Mutex<FocusTimer>>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, data: TrackerData) -> Self {
        Self {
            store,
            data: Arc::new(Mutex::new(data)),
            timer: Arc::new(Mutex::new(FocusTimer::default())),
        }
    }

    /// Applies `update` and persists the result. If the update fails or the
    /// write does, the data is put back as it was.
    pub async fn mutate<T, E>(
        &self,
        update: impl FnOnce(&mut TrackerData) -> Result<T, E>,
    ) -> Result<T, AppError>
    where
        AppError: From<E>,
    {
        let mut data = self.data.lock().await;
        let snapshot = data.clone();
        let result = match update(&mut *data) {
            Ok(result) => result,
            Err(err) => {
                *data = snapshot;
                return Err(err.into());
            }
        };

        if let Err(err) = persist_data(self.store.as_ref(), &data).await {
            error!("failed to persist data, reverting: {err}");
            *data = snapshot;
            return Err(err.into());
        }
        Ok(result)
    }
}
