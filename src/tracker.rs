//! Job application tracker view-model.
//!
//! Holds three independently refreshed views (application list, statistics,
//! reminder badge) plus the add-application form. Every successful mutation is
//! followed by a full reload of all three views, in that order. Reload
//! failures are logged and leave the previous view in place.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::api::{ApiError, CareerApi};
use crate::error::Result;
use crate::models::{
    Application, ApplicationId, ApplicationStatus, NewApplication, ReminderDigest, Statistics,
};
use crate::reminder::{days_since_applied, needs_follow_up};
use crate::validate;

// --- Request sequencing ---

/// Sequence ticket handed out before a view is reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A view value that only accepts responses newer than the one it shows.
#[derive(Debug, Clone, Default)]
pub struct Sequenced<T> {
    value: T,
    issued: u64,
    applied: u64,
}

impl<T> Sequenced<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            issued: 0,
            applied: 0,
        }
    }

    pub fn issue(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Returns false (and keeps the current value) for a response older than the last applied one.
    pub fn accept(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.value = value;
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }
}

// --- Add-application form ---

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationDraft {
    pub company: String,
    pub position: String,
    pub job_url: String,
    pub date_applied: NaiveDate,
    pub notes: String,
}

impl ApplicationDraft {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            company: String::new(),
            position: String::new(),
            job_url: String::new(),
            date_applied: today,
            notes: String::new(),
        }
    }

    pub fn to_request(&self) -> Result<NewApplication> {
        validate::company_and_position(&self.company, &self.position)?;
        Ok(NewApplication {
            company: self.company.trim().to_string(),
            position: self.position.trim().to_string(),
            job_url: self.job_url.trim().to_string(),
            date_applied: self.date_applied,
            notes: self.notes.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddForm {
    visible: bool,
    pub draft: ApplicationDraft,
}

impl AddForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            visible: false,
            draft: ApplicationDraft::blank(today),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hidden -> Visible keeps the draft; Visible -> Hidden clears it and resets the date to today.
    pub fn toggle(&mut self, today: NaiveDate) {
        if self.visible {
            self.visible = false;
            self.draft = ApplicationDraft::blank(today);
        } else {
            self.visible = true;
        }
    }
}

// --- View-model ---

/// Display-ready summary of one application.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationCard<'a> {
    pub application: &'a Application,
    pub needs_follow_up: bool,
    pub days_since_applied: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshReport {
    pub applications: bool,
    pub statistics: bool,
    pub reminders: bool,
}

impl RefreshReport {
    pub fn all_ok(&self) -> bool {
        self.applications && self.statistics && self.reminders
    }
}

#[derive(Debug, Clone)]
pub struct Tracker {
    applications: Sequenced<Vec<Application>>,
    statistics: Sequenced<Option<Statistics>>,
    reminder_count: Sequenced<u32>,
    pub form: AddForm,
}

impl Tracker {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            applications: Sequenced::new(Vec::new()),
            statistics: Sequenced::new(None),
            reminder_count: Sequenced::new(0),
            form: AddForm::new(today),
        }
    }

    pub fn applications(&self) -> &[Application] {
        self.applications.get()
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.get().as_ref()
    }

    /// Number shown on the notification badge. Zero hides the badge.
    pub fn reminder_count(&self) -> u32 {
        *self.reminder_count.get()
    }

    pub fn find(&self, id: &ApplicationId) -> Option<&Application> {
        self.applications().iter().find(|app| &app.id == id)
    }

    pub fn cards(&self, today: NaiveDate) -> Vec<ApplicationCard<'_>> {
        self.applications()
            .iter()
            .map(|application| ApplicationCard {
                application,
                needs_follow_up: needs_follow_up(today, application),
                days_since_applied: days_since_applied(today, application),
            })
            .collect()
    }

    // --- Background reloads (logged, never surfaced) ---

    pub fn reload_applications(&mut self, api: &dyn CareerApi) -> bool {
        let ticket = self.applications.issue();
        match api.list_applications() {
            Ok(apps) => {
                self.applications.accept(ticket, apps);
                true
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "Error loading applications");
                false
            }
        }
    }

    pub fn reload_statistics(&mut self, api: &dyn CareerApi) -> bool {
        let ticket = self.statistics.issue();
        match api.statistics() {
            Ok(stats) => {
                self.statistics.accept(ticket, Some(stats));
                true
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "Error loading statistics");
                false
            }
        }
    }

    pub fn check_reminders(&mut self, api: &dyn CareerApi) -> bool {
        let ticket = self.reminder_count.issue();
        match api.reminders() {
            Ok(digest) => {
                self.reminder_count.accept(ticket, digest.count);
                true
            }
            Err(err) => {
                warn!(error = %err, status = ?err.status(), "Error checking reminders");
                false
            }
        }
    }

    /// Reloads list, statistics and reminder badge, in that order. Each step runs
    /// regardless of the others' outcome.
    pub fn refresh(&mut self, api: &dyn CareerApi) -> RefreshReport {
        RefreshReport {
            applications: self.reload_applications(api),
            statistics: self.reload_statistics(api),
            reminders: self.check_reminders(api),
        }
    }

    // --- Mutations (failures surfaced) ---

    /// Submits the form draft. On success the form collapses (and resets) and all views reload.
    pub fn add(&mut self, api: &dyn CareerApi, today: NaiveDate) -> Result<Application> {
        let request = self.form.draft.to_request()?;
        let created = api.add_application(&request)?;
        info!(id = %created.id, company = %created.company, "application added");
        if self.form.is_visible() {
            self.form.toggle(today);
        } else {
            self.form.draft = ApplicationDraft::blank(today);
        }
        self.refresh(api);
        Ok(created)
    }

    pub fn change_status(
        &mut self,
        api: &dyn CareerApi,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<()> {
        api.update_status(id, status)?;
        info!(%id, %status, "status updated");
        self.refresh(api);
        Ok(())
    }

    /// Deletes only when `confirmed`; returns whether a delete was issued.
    pub fn delete(&mut self, api: &dyn CareerApi, id: &ApplicationId, confirmed: bool) -> Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        api.delete_application(id)?;
        info!(%id, "application deleted");
        self.refresh(api);
        Ok(true)
    }

    // --- On-demand queries (failures surfaced) ---

    pub fn show_reminders(&self, api: &dyn CareerApi) -> Result<ReminderDigest, ApiError> {
        api.reminders()
    }

    pub fn follow_up_email(&self, api: &dyn CareerApi, id: &ApplicationId) -> Result<String, ApiError> {
        api.follow_up_email(id)
    }
}
