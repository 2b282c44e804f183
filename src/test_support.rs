//! Test-only fixtures and a recording in-memory backend.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::api::{ApiError, CareerApi};
use crate::models::{
    AnswerFeedback, AnswerOutcome, AnswerSubmission, Application, ApplicationId,
    ApplicationStatus, ExtractedSkills, GapAnalysis, GapRequest, InterviewResults,
    InterviewScores, InterviewStarted, NewApplication, ReadinessBreakdown, ReadinessReport,
    ReadinessRequest, ReminderDigest, ResumeAnalysis, ResumeScores, ResumeUpload, SessionId,
    StartInterview, Statistics,
};

/// Deterministic application with no follow-up date.
pub fn application(id: &str, status: ApplicationStatus) -> Application {
    Application {
        id: ApplicationId(id.to_string()),
        company: format!("{id} company"),
        position: format!("{id} position"),
        job_url: None,
        date_applied: "2026-01-05".to_string(),
        follow_up_date: None,
        status,
        notes: None,
        created_at: None,
        last_updated: None,
    }
}

pub fn answer_feedback(question: &str) -> AnswerFeedback {
    AnswerFeedback {
        question: question.to_string(),
        answer: String::new(),
        content_score: 7,
        communication_score: 6,
        confidence_score: 95.0,
        feedback: "Clear structure.".to_string(),
        filler_words: BTreeMap::new(),
        total_fillers: 0,
    }
}

pub fn interview_scores() -> InterviewScores {
    InterviewScores {
        overall_score: 71.0,
        content_avg: 7.0,
        communication_avg: 6.0,
        confidence_avg: 95.0,
    }
}

/// Every call made against [`FakeApi`], in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CalculateScore(ReadinessRequest),
    ExtractSkills(String),
    AnalyzeGap(GapRequest),
    AnalyzeResume(String),
    AddApplication(NewApplication),
    ListApplications,
    UpdateStatus(ApplicationId, ApplicationStatus),
    DeleteApplication(ApplicationId),
    Statistics,
    Reminders,
    FollowUpEmail(ApplicationId),
    StartInterview(StartInterview),
    SubmitAnswer(AnswerSubmission),
    InterviewResults(SessionId),
}

/// Operations the fake can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Op {
    CalculateScore,
    ExtractSkills,
    AnalyzeGap,
    AnalyzeResume,
    AddApplication,
    ListApplications,
    UpdateStatus,
    DeleteApplication,
    Statistics,
    Reminders,
    FollowUpEmail,
    StartInterview,
    SubmitAnswer,
    InterviewResults,
}

#[derive(Default)]
pub struct FakeApi {
    pub calls: RefCell<Vec<Call>>,
    pub failing: RefCell<BTreeMap<Op, String>>,
    pub applications: RefCell<Vec<Application>>,
    pub statistics: RefCell<Statistics>,
    pub reminders: RefCell<ReminderDigest>,
    pub required_skills: RefCell<Vec<String>>,
    /// Outcomes handed out by `submit_answer`, front first.
    pub outcomes: RefCell<Vec<AnswerOutcome>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: Op, message: &str) {
        self.failing.borrow_mut().insert(op, message.to_string());
    }

    pub fn recover(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: Call, op: Op) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failing.borrow().get(&op) {
            Some(message) => Err(ApiError::Status {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl CareerApi for FakeApi {
    fn calculate_score(&self, request: &ReadinessRequest) -> Result<ReadinessReport, ApiError> {
        self.record(Call::CalculateScore(request.clone()), Op::CalculateScore)?;
        Ok(ReadinessReport {
            score: 60,
            readiness_level: "Ready with Minor Improvements".to_string(),
            breakdown: ReadinessBreakdown {
                resume_quality: 15,
                skills_match: 15,
                experience_level: 15,
                project_portfolio: 15,
            },
            feedback: vec!["Keep going.".to_string()],
        })
    }

    fn extract_skills(&self, job_description: &str) -> Result<ExtractedSkills, ApiError> {
        self.record(Call::ExtractSkills(job_description.to_string()), Op::ExtractSkills)?;
        Ok(ExtractedSkills {
            required_skills: self.required_skills.borrow().clone(),
        })
    }

    fn analyze_gap(&self, request: &GapRequest) -> Result<GapAnalysis, ApiError> {
        self.record(Call::AnalyzeGap(request.clone()), Op::AnalyzeGap)?;
        Ok(GapAnalysis {
            readiness_percentage: 50.0,
            readiness_status: "Moderately Ready".to_string(),
            matching_skills: Vec::new(),
            missing_skills: request.required_skills.clone(),
            recommendation: "Learn the missing skills.".to_string(),
            learning_resources: BTreeMap::new(),
        })
    }

    fn analyze_resume(&self, upload: &ResumeUpload) -> Result<ResumeAnalysis, ApiError> {
        self.record(Call::AnalyzeResume(upload.file_name.clone()), Op::AnalyzeResume)?;
        Ok(ResumeAnalysis {
            total_score: 75,
            overall_assessment: "Good resume with minor improvements needed.".to_string(),
            word_count: 480,
            scores: ResumeScores {
                length_score: 20,
                keywords_score: 15,
                formatting_score: 15,
                contact_info_score: 15,
                action_verbs_score: 10,
            },
            feedback: Vec::new(),
            improvements: Vec::new(),
        })
    }

    fn add_application(&self, application: &NewApplication) -> Result<Application, ApiError> {
        self.record(Call::AddApplication(application.clone()), Op::AddApplication)?;
        let mut apps = self.applications.borrow_mut();
        let mut created = self::application(&format!("job_{}", apps.len() + 1), ApplicationStatus::Applied);
        created.company = application.company.clone();
        created.position = application.position.clone();
        created.date_applied = application.date_applied.format("%Y-%m-%d").to_string();
        apps.push(created.clone());
        Ok(created)
    }

    fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        self.record(Call::ListApplications, Op::ListApplications)?;
        Ok(self.applications.borrow().clone())
    }

    fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> Result<(), ApiError> {
        self.record(Call::UpdateStatus(id.clone(), status), Op::UpdateStatus)?;
        if let Some(app) = self.applications.borrow_mut().iter_mut().find(|a| &a.id == id) {
            app.status = status;
        }
        Ok(())
    }

    fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        self.record(Call::DeleteApplication(id.clone()), Op::DeleteApplication)?;
        self.applications.borrow_mut().retain(|a| &a.id != id);
        Ok(())
    }

    fn statistics(&self) -> Result<Statistics, ApiError> {
        self.record(Call::Statistics, Op::Statistics)?;
        let mut stats = self.statistics.borrow().clone();
        stats.total_applications = self.applications.borrow().len() as u32;
        Ok(stats)
    }

    fn reminders(&self) -> Result<ReminderDigest, ApiError> {
        self.record(Call::Reminders, Op::Reminders)?;
        Ok(self.reminders.borrow().clone())
    }

    fn follow_up_email(&self, id: &ApplicationId) -> Result<String, ApiError> {
        self.record(Call::FollowUpEmail(id.clone()), Op::FollowUpEmail)?;
        Ok(format!("Subject: Following Up ({id})"))
    }

    fn start_interview(&self, request: &StartInterview) -> Result<InterviewStarted, ApiError> {
        self.record(Call::StartInterview(request.clone()), Op::StartInterview)?;
        Ok(InterviewStarted {
            session_id: SessionId("interview_1".to_string()),
            company: request.company.clone().unwrap_or_else(|| "General".to_string()),
            role: request.role.clone(),
            question_number: 1,
            total_questions: 2,
            current_question: "Tell me about yourself.".to_string(),
        })
    }

    fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerOutcome, ApiError> {
        self.record(Call::SubmitAnswer(submission.clone()), Op::SubmitAnswer)?;
        let mut outcomes = self.outcomes.borrow_mut();
        if outcomes.is_empty() {
            return Ok(AnswerOutcome::Complete {
                feedback: answer_feedback("last"),
                final_scores: interview_scores(),
            });
        }
        Ok(outcomes.remove(0))
    }

    fn interview_results(&self, session_id: &SessionId) -> Result<InterviewResults, ApiError> {
        self.record(Call::InterviewResults(session_id.clone()), Op::InterviewResults)?;
        Ok(InterviewResults {
            scores: interview_scores(),
            answers: vec![answer_feedback("Tell me about yourself.")],
        })
    }
}
