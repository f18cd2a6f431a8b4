use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One quick-entry record; at most one per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: String,
    pub date: NaiveDate,
    #[serde(deserialize_with = "rounded_i32")]
    pub mood: i32,
    #[serde(default, deserialize_with = "rounded_i32")]
    pub urges: i32,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "rounded_i64")]
    pub current_streak: i64,
    #[serde(deserialize_with = "rounded_i64")]
    pub longest_streak: i64,
    #[serde(deserialize_with = "rounded_i64")]
    pub total_days: i64,
    /// Storage order; new days are appended, edits stay in place.
    pub entries: Vec<DailyEntry>,
}

impl UserStats {
    pub fn new(start_date: DateTime<Utc>) -> Self {
        Self {
            start_date,
            current_streak: 0,
            longest_streak: 0,
            total_days: 0,
            entries: Vec::new(),
        }
    }

    pub fn entry_for(&self, date: NaiveDate) -> Option<&DailyEntry> {
        self.entries.iter().find(|entry| entry.date == date)
    }
}

/// Hand-edited files may carry fractional numbers; they load rounded half-up.
fn rounded_i32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok((value + 0.5).floor() as i32)
}

fn rounded_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok((value + 0.5).floor() as i64)
}

/// On-disk envelope around the aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsDocument {
    pub version: u32,
    pub stats: UserStats,
}

/// Draft collected by the quick-entry form before it becomes a `DailyEntry`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuickEntryRequest {
    pub mood: Option<i32>,
    #[serde(default)]
    pub urges: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryRequest {
    #[serde(default)]
    pub feelings: String,
    #[serde(default)]
    pub triggers: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub relapse: bool,
}

/// HTML checkboxes only send a value when ticked.
#[derive(Debug, Deserialize)]
pub struct DiaryForm {
    #[serde(default)]
    pub feelings: String,
    #[serde(default)]
    pub triggers: String,
    #[serde(default)]
    pub symptoms: String,
    pub relapse: Option<String>,
}

impl From<DiaryForm> for DiaryRequest {
    fn from(form: DiaryForm) -> Self {
        Self {
            feelings: form.feelings,
            triggers: form.triggers,
            symptoms: form.symptoms,
            relapse: form.relapse.is_some(),
        }
    }
}

/// Row shape of the remote `diario` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryRow {
    pub sentimentos: String,
    pub gatilhos: String,
    pub sintomas: String,
    pub recaida: bool,
}

impl From<DiaryRequest> for DiaryRow {
    fn from(request: DiaryRequest) -> Self {
        Self {
            sentimentos: request.feelings,
            gatilhos: request.triggers,
            sintomas: request.symptoms,
            recaida: request.relapse,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub user_id: String,
    pub email: String,
}

/// Row shape of the remote `user_profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub start_date: DateTime<Utc>,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_days: i64,
}

impl UserProfile {
    pub fn new(id: String, email: String, start_date: DateTime<Utc>) -> Self {
        Self {
            id,
            email,
            start_date,
            current_streak: 0,
            longest_streak: 0,
            total_days: 0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DiarySaved {
    pub saved: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardState {
    NoEntryToday,
    EntryToday,
    EntryTodayHighUrges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstWeek,
    Resilient,
    Master,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardMessages {
    pub headline: String,
    pub motivation: String,
    pub streak_hint: String,
    pub weekly_hint: String,
    pub mood_hint: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub state: DashboardState,
    pub start_date: DateTime<Utc>,
    pub current_streak: i64,
    pub longest_streak: i64,
    pub total_days: i64,
    pub today_entry: Option<DailyEntry>,
    pub weekly_activity: [bool; 7],
    pub weekly_count: usize,
    pub average_mood: Option<i32>,
    pub average_mood_emoji: String,
    pub streak_progress_percent: f64,
    pub achievement: Option<Achievement>,
    pub achievement_title: Option<String>,
    pub show_emergency_panel: bool,
    pub messages: DashboardMessages,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub logged: bool,
    pub mood: Option<i32>,
    pub urges: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeekPoint {
    pub week: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_logged: u8,
    pub avg_mood: Option<f64>,
    pub avg_urges: Option<f64>,
    pub high_urge_days: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub last_7_days: Vec<DayPoint>,
    pub weekly: Vec<WeekPoint>,
}
