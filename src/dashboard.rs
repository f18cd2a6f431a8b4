//! Render decisions for the home page, as pure functions of the aggregate.

use crate::models::{
    Achievement, DailyEntry, DashboardMessages, DashboardResponse, DashboardState, UserStats,
};
use crate::stats::{HIGH_URGE_THRESHOLD, average_mood, weekly_activity_at};
use chrono::{Local, NaiveDate};

/// Streak length that fills the progress bar.
const STREAK_GOAL_DAYS: f64 = 30.0;

pub fn build_dashboard(stats: &UserStats) -> DashboardResponse {
    build_dashboard_at(Local::now().date_naive(), stats)
}

pub fn build_dashboard_at(today: NaiveDate, stats: &UserStats) -> DashboardResponse {
    let today_entry = stats.entry_for(today).cloned();
    let state = dashboard_state(today_entry.as_ref());
    let weekly_activity = weekly_activity_at(&stats.entries, today);
    let weekly_count = weekly_activity.iter().filter(|logged| **logged).count();
    let average = average_mood(&stats.entries);
    let achievement = achievement_for(stats.current_streak);

    DashboardResponse {
        today,
        state,
        start_date: stats.start_date,
        current_streak: stats.current_streak,
        longest_streak: stats.longest_streak,
        total_days: stats.total_days,
        today_entry,
        weekly_activity,
        weekly_count,
        average_mood: average,
        average_mood_emoji: average.map(mood_emoji).unwrap_or("--").to_string(),
        streak_progress_percent: streak_progress_percent(stats.current_streak),
        achievement,
        achievement_title: achievement.map(|tier| achievement_title(tier).to_string()),
        show_emergency_panel: show_emergency_panel(state),
        messages: DashboardMessages {
            headline: headline(state).to_string(),
            motivation: motivational_message(stats.current_streak),
            streak_hint: streak_hint(stats.current_streak).to_string(),
            weekly_hint: weekly_hint(weekly_count).to_string(),
            mood_hint: mood_hint(average).to_string(),
        },
    }
}

pub fn dashboard_state(today_entry: Option<&DailyEntry>) -> DashboardState {
    match today_entry {
        None => DashboardState::NoEntryToday,
        Some(entry) if entry.urges >= HIGH_URGE_THRESHOLD => DashboardState::EntryTodayHighUrges,
        Some(_) => DashboardState::EntryToday,
    }
}

pub fn show_emergency_panel(state: DashboardState) -> bool {
    state == DashboardState::EntryTodayHighUrges
}

pub fn achievement_for(streak: i64) -> Option<Achievement> {
    match streak {
        90.. => Some(Achievement::Master),
        30.. => Some(Achievement::Resilient),
        7.. => Some(Achievement::FirstWeek),
        _ => None,
    }
}

pub fn achievement_title(achievement: Achievement) -> &'static str {
    match achievement {
        Achievement::FirstWeek => "First week complete!",
        Achievement::Resilient => "Resilient warrior - 30 days!",
        Achievement::Master => "Transformation master - 90 days!",
    }
}

pub fn headline(state: DashboardState) -> &'static str {
    match state {
        DashboardState::NoEntryToday => "Welcome back!",
        DashboardState::EntryToday | DashboardState::EntryTodayHighUrges => "Great work today!",
    }
}

pub fn motivational_message(streak: i64) -> String {
    match streak {
        0 => "Today is the first day of the rest of your life. You can do it!".to_string(),
        i64::MIN..=6 => format!("{streak} days! Stay strong, every day is a victory."),
        7..=29 => format!("{streak} days! You are building incredible habits."),
        30..=89 => format!("{streak} days! Your transformation is inspiring!"),
        _ => format!("{streak} days! You are an example of determination!"),
    }
}

pub fn streak_hint(streak: i64) -> &'static str {
    match streak {
        0 => "Start today!",
        i64::MIN..=6 => "Keep it up!",
        7..=29 => "You are doing really well!",
        _ => "Amazing! Stay strong!",
    }
}

pub fn weekly_hint(weekly_count: usize) -> &'static str {
    match weekly_count {
        7.. => "Perfect week!",
        5..=6 => "Almost there!",
        3..=4 => "Keep logging!",
        _ => "Log more days this week",
    }
}

pub fn mood_hint(average: Option<i32>) -> &'static str {
    match average {
        None => "Start logging",
        Some(4..) => "You are doing well!",
        Some(3) => "Keep taking care of yourself",
        Some(_) => "Be kind to yourself",
    }
}

pub fn mood_emoji(mood: i32) -> &'static str {
    match mood {
        4.. => "😊",
        3 => "😐",
        2 => "😔",
        1 => "😢",
        _ => "😰",
    }
}

pub fn mood_label(mood: i32) -> &'static str {
    match mood {
        5 => "Great",
        4 => "Good",
        3 => "Ok",
        2 => "Bad",
        _ => "Hard",
    }
}

/// Fraction of the 30-day goal, in percent, capped at 100.
pub fn streak_progress_percent(streak: i64) -> f64 {
    (streak as f64 / STREAK_GOAL_DAYS * 100.0).min(100.0)
}
