use crate::models::UserStats;
use crate::remote::{RemoteClient, RemoteError};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    /// Held for the whole load-compute-save cycle of a submission.
    pub stats: Arc<Mutex<UserStats>>,
    pub remote: Option<RemoteClient>,
}

impl AppState {
    pub fn new(data_path: PathBuf, stats: UserStats, remote: Option<RemoteClient>) -> Self {
        Self {
            data_path,
            stats: Arc::new(Mutex::new(stats)),
            remote,
        }
    }

    pub fn remote(&self) -> Result<&RemoteClient, RemoteError> {
        self.remote.as_ref().ok_or(RemoteError::NotConfigured)
    }
}
