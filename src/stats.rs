use crate::models::{
    DailyEntry, DayPoint, QuickEntryRequest, SummaryResponse, UserStats, WeekPoint,
};
use chrono::{Datelike, Duration, Local, NaiveDate};
use uuid::Uuid;

/// Urge level at or above which a day counts as a high-urge day.
pub const HIGH_URGE_THRESHOLD: i32 = 7;

const MOOD_WINDOW: usize = 7;
const WEEK_COUNT: usize = 8;

/// Saves today's quick entry and recomputes the aggregate.
///
/// Returns `None` without touching `stats` when no mood was picked.
pub fn save_quick_entry_at(
    stats: &mut UserStats,
    today: NaiveDate,
    draft: &QuickEntryRequest,
) -> Option<DailyEntry> {
    let mood = draft.mood?;
    let urges = draft.urges.unwrap_or(0);
    let notes = draft.notes.clone().unwrap_or_default();

    let saved = upsert_entry(&mut stats.entries, today, mood, urges, notes);
    refresh_counters(stats, today);
    Some(saved)
}

/// Replaces the entry for `date` in place, keeping its id, or appends a new one.
pub fn upsert_entry(
    entries: &mut Vec<DailyEntry>,
    date: NaiveDate,
    mood: i32,
    urges: i32,
    notes: String,
) -> DailyEntry {
    if let Some(existing) = entries.iter_mut().find(|entry| entry.date == date) {
        existing.mood = mood;
        existing.urges = urges;
        existing.notes = notes;
        existing.triggers.clear();
        existing.activities.clear();
        return existing.clone();
    }

    let entry = DailyEntry {
        id: Uuid::new_v4().to_string(),
        date,
        mood,
        urges,
        triggers: Vec::new(),
        notes,
        activities: Vec::new(),
    };
    entries.push(entry.clone());
    entry
}

/// Recomputes `current_streak`, `longest_streak` and `total_days`.
pub fn refresh_counters(stats: &mut UserStats, today: NaiveDate) {
    let current = i64::from(current_streak_at(&stats.entries, today));
    stats.current_streak = current;
    stats.longest_streak = stats.longest_streak.max(current);
    stats.total_days = stats.entries.len() as i64;
}

/// Counts consecutive days with an entry, walking back from `today`.
///
/// Entries are visited newest first; the walk stops at the first entry whose
/// distance from `today` is not the next expected offset. A second entry on a
/// day that was already counted is skipped.
pub fn current_streak_at(entries: &[DailyEntry], today: NaiveDate) -> u32 {
    let mut dates: Vec<NaiveDate> = entries.iter().map(|entry| entry.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    for date in dates {
        let diff = (today - date).num_days();
        if diff == i64::from(streak) {
            streak += 1;
        } else if streak > 0 && diff == i64::from(streak) - 1 {
            continue;
        } else {
            break;
        }
    }
    streak
}

/// Whether each of the last 7 days has an entry, oldest first, today last.
pub fn weekly_activity_at(entries: &[DailyEntry], today: NaiveDate) -> [bool; 7] {
    let mut week = [false; 7];
    for (slot, offset) in (0..7).rev().enumerate() {
        let date = today - Duration::days(offset);
        week[slot] = entries.iter().any(|entry| entry.date == date);
    }
    week
}

/// Mean mood of the last 7 entries in storage order, rounded half-up.
pub fn average_mood(entries: &[DailyEntry]) -> Option<i32> {
    if entries.is_empty() {
        return None;
    }

    let recent = &entries[entries.len().saturating_sub(MOOD_WINDOW)..];
    let sum: i64 = recent.iter().map(|entry| i64::from(entry.mood)).sum();
    let mean = sum as f64 / recent.len() as f64;
    Some((mean + 0.5).floor() as i32)
}

pub fn build_summary(stats: &UserStats) -> SummaryResponse {
    build_summary_at(Local::now().date_naive(), stats)
}

pub fn build_summary_at(today: NaiveDate, stats: &UserStats) -> SummaryResponse {
    let mut last_7_days = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let entry = stats.entry_for(date);
        last_7_days.push(DayPoint {
            date,
            logged: entry.is_some(),
            mood: entry.map(|entry| entry.mood),
            urges: entry.map(|entry| entry.urges),
        });
    }

    let current_week_start = week_start(today);
    let mut weekly = Vec::with_capacity(WEEK_COUNT);

    for offset in (0..WEEK_COUNT).rev() {
        let start = current_week_start - Duration::weeks(offset as i64);
        let end = start + Duration::days(6);

        let mut days_logged = 0u8;
        let mut high_urge_days = 0u8;
        let mut mood_sum = 0i64;
        let mut urge_sum = 0i64;
        for day_offset in 0..7 {
            let date = start + Duration::days(day_offset);
            if let Some(entry) = stats.entry_for(date) {
                days_logged += 1;
                mood_sum += i64::from(entry.mood);
                urge_sum += i64::from(entry.urges);
                if entry.urges >= HIGH_URGE_THRESHOLD {
                    high_urge_days += 1;
                }
            }
        }

        let mean = |sum: i64| {
            (days_logged > 0).then(|| sum as f64 / f64::from(days_logged))
        };

        weekly.push(WeekPoint {
            week: week_label(start),
            start_date: start,
            end_date: end,
            days_logged,
            avg_mood: mean(mood_sum),
            avg_urges: mean(urge_sum),
            high_urge_days,
        });
    }

    SummaryResponse {
        last_7_days,
        weekly,
    }
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
