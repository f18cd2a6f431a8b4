use crate::dashboard::{build_dashboard, build_dashboard_at};
use crate::errors::AppError;
use crate::models::{
    DailyEntry, DashboardResponse, DiaryForm, DiaryRequest, DiaryRow, DiarySaved,
    ProfileRequest, QuickEntryRequest, SummaryResponse, UserProfile,
};
use crate::state::AppState;
use crate::stats::{build_summary, save_quick_entry_at};
use crate::storage::persist_stats;
use crate::ui::{render_diary, render_index};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::{Local, Utc};
use tracing::info;

const DIARY_FAILED: &str = "failed to save diary entry";
const PROFILE_FAILED: &str = "failed to create profile";

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let stats = state.stats.lock().await;
    Html(render_index(&build_dashboard(&stats)))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let stats = state.stats.lock().await;
    Ok(Json(build_dashboard(&stats)))
}

pub async fn get_summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let stats = state.stats.lock().await;
    Ok(Json(build_summary(&stats)))
}

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<DailyEntry>> {
    let stats = state.stats.lock().await;
    Json(stats.entries.clone())
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(payload): Json<QuickEntryRequest>,
) -> Result<Json<DashboardResponse>, AppError> {
    validate_quick_entry(&payload)?;

    match apply_entry(&state, &payload).await? {
        Some(dashboard) => Ok(Json(dashboard)),
        None => Err(AppError::unprocessable("mood is required")),
    }
}

pub async fn entry_form(
    State(state): State<AppState>,
    Form(payload): Form<QuickEntryRequest>,
) -> Result<Redirect, AppError> {
    validate_quick_entry(&payload)?;
    apply_entry(&state, &payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn diary_page() -> Html<String> {
    Html(render_diary(None))
}

pub async fn save_diary(
    State(state): State<AppState>,
    Json(payload): Json<DiaryRequest>,
) -> Result<(StatusCode, Json<DiarySaved>), AppError> {
    submit_diary(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(DiarySaved { saved: true })))
}

/// Keeps the user on the form with an error banner when the backend fails.
pub async fn diary_form(State(state): State<AppState>, Form(form): Form<DiaryForm>) -> Response {
    match submit_diary(&state, form.into()).await {
        Ok(()) => Redirect::to("/").into_response(),
        Err(err) => (err.status, Html(render_diary(Some(&err.message)))).into_response(),
    }
}

pub async fn upsert_profile(
    State(state): State<AppState>,
    Json(payload): Json<ProfileRequest>,
) -> Result<Json<UserProfile>, AppError> {
    let user_id = payload.user_id.trim();
    if user_id.is_empty() {
        return Err(AppError::bad_request("user_id is required"));
    }

    let remote = state
        .remote()
        .map_err(|err| AppError::remote(PROFILE_FAILED, err))?;
    let profile = UserProfile::new(user_id.to_string(), payload.email.trim().to_string(), Utc::now());
    remote
        .upsert_profile(&profile)
        .await
        .map_err(|err| AppError::remote(PROFILE_FAILED, err))?;

    info!(user_id = %profile.id, "profile upserted");
    Ok(Json(profile))
}

/// Saves today's entry and persists the whole aggregate.
///
/// The in-memory aggregate only changes once the write succeeded. Returns
/// `None` when the draft has no mood.
async fn apply_entry(
    state: &AppState,
    draft: &QuickEntryRequest,
) -> Result<Option<DashboardResponse>, AppError> {
    let today = Local::now().date_naive();
    let mut stats = state.stats.lock().await;

    let mut updated = stats.clone();
    let Some(saved) = save_quick_entry_at(&mut updated, today, draft) else {
        return Ok(None);
    };

    persist_stats(&state.data_path, &updated).await?;
    *stats = updated;

    info!(
        date = %saved.date,
        mood = saved.mood,
        urges = saved.urges,
        streak = stats.current_streak,
        "saved entry"
    );
    Ok(Some(build_dashboard_at(today, &stats)))
}

async fn submit_diary(state: &AppState, request: DiaryRequest) -> Result<(), AppError> {
    let remote = state
        .remote()
        .map_err(|err| AppError::remote(DIARY_FAILED, err))?;
    remote
        .insert_diary(&DiaryRow::from(request))
        .await
        .map_err(|err| AppError::remote(DIARY_FAILED, err))?;

    info!("diary entry saved");
    Ok(())
}

fn validate_quick_entry(draft: &QuickEntryRequest) -> Result<(), AppError> {
    if let Some(mood) = draft.mood {
        if !(1..=5).contains(&mood) {
            return Err(AppError::bad_request("mood must be between 1 and 5"));
        }
    }
    if let Some(urges) = draft.urges {
        if !(0..=10).contains(&urges) {
            return Err(AppError::bad_request("urges must be between 0 and 10"));
        }
    }
    Ok(())
}
