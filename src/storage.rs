use crate::errors::AppError;
use crate::models::{StatsDocument, UserStats};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, info, warn};

pub const SCHEMA_VERSION: u32 = 1;

/// Documents written before versioning held the bare aggregate.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDocument {
    Versioned(StatsDocument),
    Legacy(UserStats),
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/state.json")
}

/// Outcome of reading the data file.
#[derive(Debug)]
pub enum StoredStats {
    Loaded(UserStats),
    Missing,
    /// The file exists but cannot be used as-is.
    Unreadable(String),
}

pub async fn load_stats(path: &Path) -> Result<StoredStats, AppError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(StoredStats::Missing),
        Err(err) => {
            error!("failed to read data file: {err}");
            return Err(err.into());
        }
    };

    let stored = match serde_json::from_slice(&bytes) {
        Ok(StoredDocument::Versioned(doc)) if doc.version > SCHEMA_VERSION => {
            StoredStats::Unreadable(format!("unsupported schema version {}", doc.version))
        }
        Ok(StoredDocument::Versioned(doc)) => StoredStats::Loaded(doc.stats),
        Ok(StoredDocument::Legacy(stats)) => {
            info!("upgrading unversioned data file");
            StoredStats::Loaded(stats)
        }
        Err(err) => StoredStats::Unreadable(err.to_string()),
    };
    Ok(stored)
}

/// Loads the aggregate, creating a fresh one when there is none.
///
/// An unreadable file is moved aside to `<name>.corrupt` before the fresh
/// aggregate is written, so its history is never overwritten.
pub async fn load_or_init(path: &Path, now: DateTime<Utc>) -> Result<UserStats, AppError> {
    match load_stats(path).await? {
        StoredStats::Loaded(stats) => {
            info!(entries = stats.entries.len(), "loaded stats");
            return Ok(stats);
        }
        StoredStats::Missing => {}
        StoredStats::Unreadable(reason) => {
            let aside = sibling_path(path, ".corrupt");
            fs::rename(path, &aside).await?;
            warn!(reason = %reason, moved_to = %aside.display(), "data file unusable, starting fresh");
        }
    }

    let stats = UserStats::new(now);
    persist_stats(path, &stats).await?;
    info!(path = %path.display(), "initialized stats");
    Ok(stats)
}

/// Replaces the whole document: write a sibling temp file, then rename over.
pub async fn persist_stats(path: &Path, stats: &UserStats) -> Result<(), AppError> {
    let doc = StatsDocument {
        version: SCHEMA_VERSION,
        stats: stats.clone(),
    };
    let payload = serde_json::to_vec_pretty(&doc).map_err(AppError::internal)?;

    let tmp = sibling_path(path, ".tmp");
    fs::write(&tmp, payload).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "state.json".into());
    name.push(suffix);
    path.with_file_name(name)
}
