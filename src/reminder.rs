//! Follow-up policy for tracked applications.
//!
//! Only the boolean alert is decided here. Priorities and days overdue come
//! from the backend's reminder query and are rendered as-is.

use chrono::NaiveDate;

use crate::models::Application;

/// An application needs a follow-up once its follow-up date has arrived and it
/// is still waiting on the employer (`Applied` or `Viewed`). Missing or
/// malformed dates never trigger an alert.
pub fn needs_follow_up(today: NaiveDate, application: &Application) -> bool {
    if !application.status.awaits_response() {
        return false;
    }
    match application.follow_up_on() {
        Some(due) => due <= today,
        None => false,
    }
}

/// Whole days elapsed from `date` to `today`. Negative for future dates.
pub fn days_since(today: NaiveDate, date: NaiveDate) -> i64 {
    (today - date).num_days()
}

pub fn days_since_applied(today: NaiveDate, application: &Application) -> Option<i64> {
    application.applied_on().map(|date| days_since(today, date))
}
