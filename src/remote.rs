//! Client for the hosted backend that owns user profiles and the long-form diary.
//!
//! Both calls are single request/response exchanges with no retry. Nothing in
//! the local statistics path waits on them.

use crate::config::RemoteConfig;
use crate::models::{DiaryRow, UserProfile};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

pub const PROFILE_TABLE: &str = "user_profiles";
pub const DIARY_TABLE: &str = "diario";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("remote backend is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Creates the profile or merges into the existing row with the same id.
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.table_url(PROFILE_TABLE))
            .query(&[("on_conflict", "id")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(profile)
            .send()
            .await?;

        check_status(response).await
    }

    /// Plain insert; the table supplies its own id and timestamps.
    pub async fn insert_diary(&self, row: &DiaryRow) -> Result<(), RemoteError> {
        let response = self
            .client
            .post(self.table_url(DIARY_TABLE))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .json(&[row])
            .send()
            .await?;

        check_status(response).await
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }
}

async fn check_status(response: reqwest::Response) -> Result<(), RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(RemoteError::Status { status, body })
}
