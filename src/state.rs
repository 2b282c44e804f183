use chrono::{Local, NaiveDate};

use crate::api::CareerApi;
use crate::interview::Interview;
use crate::resume::ResumeRoast;
use crate::skills::SkillsGap;
use crate::tracker::Tracker;

/// All cross-call client state: the backend handle plus one flow per feature.
pub struct AppState {
    api: Box<dyn CareerApi>,
    pub tracker: Tracker,
    pub skills: SkillsGap,
    pub resume: ResumeRoast,
    pub interview: Interview,
}

impl AppState {
    pub fn new(api: Box<dyn CareerApi>, today: NaiveDate) -> Self {
        Self {
            api,
            tracker: Tracker::new(today),
            skills: SkillsGap::new(),
            resume: ResumeRoast::new(),
            interview: Interview::new(),
        }
    }

    pub fn api(&self) -> &dyn CareerApi {
        self.api.as_ref()
    }

    /// Splits the state so a flow can be mutated while the backend is borrowed.
    pub fn tracker_mut(&mut self) -> (&dyn CareerApi, &mut Tracker) {
        (self.api.as_ref(), &mut self.tracker)
    }

    pub fn skills_mut(&mut self) -> (&dyn CareerApi, &mut SkillsGap) {
        (self.api.as_ref(), &mut self.skills)
    }

    pub fn resume_mut(&mut self) -> (&dyn CareerApi, &mut ResumeRoast) {
        (self.api.as_ref(), &mut self.resume)
    }

    pub fn interview_mut(&mut self) -> (&dyn CareerApi, &mut Interview) {
        (self.api.as_ref(), &mut self.interview)
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApplicationStatus;
    use crate::test_support::{FakeApi, application};

    #[test]
    fn test_flows_share_one_backend() {
        let api = FakeApi::new();
        api.applications
            .borrow_mut()
            .push(application("job_1", ApplicationStatus::Viewed));
        let today = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut state = AppState::new(Box::new(api), today);

        let (api, tracker) = state.tracker_mut();
        assert!(tracker.refresh(api).all_ok());
        assert_eq!(state.tracker.applications().len(), 1);

        let (api, interview) = state.interview_mut();
        interview.start(api, "", "Analyst").unwrap();
        assert!(state.interview.stage().session().is_some());
    }
}
