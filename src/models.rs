use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// --- Tracker ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Applied,
    Viewed,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    Interviewed,
    Rejected,
    Offer,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 6] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Viewed,
        ApplicationStatus::InterviewScheduled,
        ApplicationStatus::Interviewed,
        ApplicationStatus::Rejected,
        ApplicationStatus::Offer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::Viewed => "Viewed",
            ApplicationStatus::InterviewScheduled => "Interview Scheduled",
            ApplicationStatus::Interviewed => "Interviewed",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Offer => "Offer",
        }
    }

    /// Early stages that still warrant a passive follow-up nudge.
    pub fn awaits_response(self) -> bool {
        matches!(self, ApplicationStatus::Applied | ApplicationStatus::Viewed)
    }

    /// Accepts the display label or a compact CLI spelling ("interview-scheduled", "offer").
    pub fn parse(input: &str) -> Option<Self> {
        let key: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL.into_iter().find(|status| {
            status
                .label()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
                == key
        })
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub company: String,
    pub position: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub job_url: Option<String>,
    pub date_applied: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub follow_up_date: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Application {
    pub fn applied_on(&self) -> Option<NaiveDate> {
        parse_date(&self.date_applied)
    }

    pub fn follow_up_on(&self) -> Option<NaiveDate> {
        self.follow_up_date.as_deref().and_then(parse_date)
    }
}

/// Backend dates are plain `YYYY-MM-DD`; anything else is treated as absent.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub job_url: String,
    pub date_applied: NaiveDate,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationList {
    pub applications: Vec<Application>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationEnvelope {
    pub application: Application,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Statistics {
    pub total_applications: u32,
    pub response_rate: f64,
    #[serde(default)]
    pub interviews: u32,
    #[serde(default)]
    pub offers: u32,
    #[serde(default)]
    pub rejections: u32,
    #[serde(default)]
    pub pending_follow_ups: u32,
    #[serde(default)]
    pub status_breakdown: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
            Priority::Unknown => "Unknown",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Reminder {
    pub application: Application,
    pub priority: Priority,
    pub days_overdue: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReminderDigest {
    pub count: u32,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FollowUpEmail {
    pub email_template: String,
}

// --- Readiness ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessRequest {
    pub has_resume: bool,
    pub resume_length: u32,
    pub skills_count: u32,
    pub experience_years: f64,
    pub has_projects: bool,
    pub projects_count: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadinessBreakdown {
    pub resume_quality: u32,
    pub skills_match: u32,
    pub experience_level: u32,
    pub project_portfolio: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReadinessReport {
    pub score: u32,
    pub readiness_level: String,
    pub breakdown: ReadinessBreakdown,
    #[serde(default)]
    pub feedback: Vec<String>,
}

// --- Skills gap ---

#[derive(Debug, Clone, Serialize)]
pub struct SkillExtractionRequest<'a> {
    pub job_description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExtractedSkills {
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapRequest {
    pub user_skills: Vec<String>,
    pub required_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningResource {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GapAnalysis {
    pub readiness_percentage: f64,
    pub readiness_status: String,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendation: String,
    #[serde(default)]
    pub learning_resources: BTreeMap<String, Vec<LearningResource>>,
}

// --- Resume roast ---

#[derive(Debug, Clone, PartialEq)]
pub struct ResumeUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResumeScores {
    pub length_score: u32,
    pub keywords_score: u32,
    pub formatting_score: u32,
    pub contact_info_score: u32,
    pub action_verbs_score: u32,
}

impl ResumeScores {
    pub fn labelled(&self) -> [(&'static str, u32); 5] {
        [
            ("Length", self.length_score),
            ("Keywords", self.keywords_score),
            ("Formatting", self.formatting_score),
            ("Contact info", self.contact_info_score),
            ("Action verbs", self.action_verbs_score),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Improvement {
    pub category: String,
    pub issue: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResumeAnalysis {
    pub total_score: u32,
    pub overall_assessment: String,
    pub word_count: u32,
    pub scores: ResumeScores,
    #[serde(default)]
    pub feedback: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<Improvement>,
}

// --- Mock interview ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartInterview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterviewStarted {
    pub session_id: SessionId,
    pub company: String,
    pub role: String,
    pub question_number: u32,
    pub total_questions: u32,
    pub current_question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerSubmission {
    pub session_id: SessionId,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnswerFeedback {
    pub question: String,
    #[serde(default)]
    pub answer: String,
    pub content_score: u32,
    pub communication_score: u32,
    pub confidence_score: f64,
    pub feedback: String,
    #[serde(default)]
    pub filler_words: BTreeMap<String, u32>,
    #[serde(default)]
    pub total_fillers: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterviewScores {
    pub overall_score: f64,
    pub content_avg: f64,
    pub communication_avg: f64,
    pub confidence_avg: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnswerOutcome {
    Continue {
        feedback: AnswerFeedback,
        next_question: String,
        question_number: u32,
        total_questions: u32,
    },
    Complete {
        feedback: AnswerFeedback,
        final_scores: InterviewScores,
    },
}

impl AnswerOutcome {
    pub fn feedback(&self) -> &AnswerFeedback {
        match self {
            AnswerOutcome::Continue { feedback, .. } | AnswerOutcome::Complete { feedback, .. } => {
                feedback
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, AnswerOutcome::Complete { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InterviewResults {
    pub scores: InterviewScores,
    #[serde(default)]
    pub answers: Vec<AnswerFeedback>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
