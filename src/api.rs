use std::time::Duration;

use reqwest::Method;
use reqwest::blocking::{Client, RequestBuilder, multipart};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::models::{
    AnswerOutcome, AnswerSubmission, Application, ApplicationEnvelope, ApplicationId,
    ApplicationList, ApplicationStatus, ErrorBody, ExtractedSkills, FollowUpEmail, GapAnalysis,
    GapRequest, InterviewResults, InterviewStarted, NewApplication, ReadinessReport,
    ReadinessRequest, ReminderDigest, ResumeAnalysis, ResumeUpload, SessionId,
    SkillExtractionRequest, StartInterview, Statistics, StatusUpdate,
};

// --- Backend contract ---

/// Everything the client asks of the backend. One call per endpoint, no retries.
pub trait CareerApi {
    fn calculate_score(&self, request: &ReadinessRequest) -> Result<ReadinessReport, ApiError>;
    fn extract_skills(&self, job_description: &str) -> Result<ExtractedSkills, ApiError>;
    fn analyze_gap(&self, request: &GapRequest) -> Result<GapAnalysis, ApiError>;
    fn analyze_resume(&self, upload: &ResumeUpload) -> Result<ResumeAnalysis, ApiError>;

    fn add_application(&self, application: &NewApplication) -> Result<Application, ApiError>;
    fn list_applications(&self) -> Result<Vec<Application>, ApiError>;
    fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> Result<(), ApiError>;
    fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError>;
    fn statistics(&self) -> Result<Statistics, ApiError>;
    fn reminders(&self) -> Result<ReminderDigest, ApiError>;
    fn follow_up_email(&self, id: &ApplicationId) -> Result<String, ApiError>;

    fn start_interview(&self, request: &StartInterview) -> Result<InterviewStarted, ApiError>;
    fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerOutcome, ApiError>;
    fn interview_results(&self, session_id: &SessionId) -> Result<InterviewResults, ApiError>;
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{operation}: unexpected response body: {detail}")]
    Decode {
        operation: &'static str,
        detail: String,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Prefers the backend's own `{"error": "..."}` message over a generic one.
pub fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|parsed| parsed.error)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

// --- Endpoints ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    CalculateScore,
    ExtractSkills,
    AnalyzeGap,
    AnalyzeResume,
    AddApplication,
    ListApplications,
    UpdateStatus(&'a ApplicationId),
    DeleteApplication(&'a ApplicationId),
    Statistics,
    Reminders,
    GenerateEmail(&'a ApplicationId),
    StartInterview,
    SubmitAnswer,
    InterviewResults(&'a SessionId),
}

impl Endpoint<'_> {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::CalculateScore
            | Endpoint::ExtractSkills
            | Endpoint::AnalyzeGap
            | Endpoint::AnalyzeResume
            | Endpoint::AddApplication
            | Endpoint::StartInterview
            | Endpoint::SubmitAnswer => Method::POST,
            Endpoint::UpdateStatus(_) => Method::PUT,
            Endpoint::DeleteApplication(_) => Method::DELETE,
            Endpoint::ListApplications
            | Endpoint::Statistics
            | Endpoint::Reminders
            | Endpoint::GenerateEmail(_)
            | Endpoint::InterviewResults(_) => Method::GET,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::CalculateScore => "/api/calculate-score".to_string(),
            Endpoint::ExtractSkills => "/api/extract-skills".to_string(),
            Endpoint::AnalyzeGap => "/api/analyze-gap".to_string(),
            Endpoint::AnalyzeResume => "/api/analyze-resume".to_string(),
            Endpoint::AddApplication => "/api/add-application".to_string(),
            Endpoint::ListApplications => "/api/get-applications".to_string(),
            Endpoint::UpdateStatus(id) => format!("/api/update-status/{id}"),
            Endpoint::DeleteApplication(id) => format!("/api/delete-application/{id}"),
            Endpoint::Statistics => "/api/get-statistics".to_string(),
            Endpoint::Reminders => "/api/get-reminders".to_string(),
            Endpoint::GenerateEmail(id) => format!("/api/generate-email/{id}"),
            Endpoint::StartInterview => "/api/start-interview".to_string(),
            Endpoint::SubmitAnswer => "/api/submit-answer".to_string(),
            Endpoint::InterviewResults(session) => format!("/api/interview-results/{session}"),
        }
    }

    /// Generic message shown when the backend gives no `error` field.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::CalculateScore => "Failed to calculate score",
            Endpoint::ExtractSkills => "Failed to extract skills",
            Endpoint::AnalyzeGap => "Failed to analyze skill gap",
            Endpoint::AnalyzeResume => "Failed to analyze resume",
            Endpoint::AddApplication => "Failed to add application",
            Endpoint::ListApplications => "Failed to load applications",
            Endpoint::UpdateStatus(_) => "Failed to update status",
            Endpoint::DeleteApplication(_) => "Failed to delete application",
            Endpoint::Statistics => "Failed to load statistics",
            Endpoint::Reminders => "Failed to load reminders",
            Endpoint::GenerateEmail(_) => "Failed to generate email",
            Endpoint::StartInterview => "Failed to start interview",
            Endpoint::SubmitAnswer => "Failed to submit answer",
            Endpoint::InterviewResults(_) => "Failed to load results",
        }
    }
}

// --- HTTP backend ---

#[derive(Debug)]
pub struct HttpBackend {
    base_url: String,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ApiError::Transport {
                operation: "Failed to build HTTP client",
                source,
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, endpoint: &Endpoint<'_>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint.path());
        self.client.request(endpoint.method(), url)
    }

    fn send<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint<'_>,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let operation = endpoint.failure_message();
        debug!(method = %endpoint.method(), path = %endpoint.path(), "sending request");

        let response = request
            .send()
            .map_err(|source| ApiError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|source| ApiError::Transport { operation, source })?;

        if !status.is_success() {
            debug!(status = status.as_u16(), "request failed");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: error_message(&body, operation),
            });
        }

        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            operation,
            detail: err.to_string(),
        })
    }

    fn send_ignoring_body(
        &self,
        endpoint: &Endpoint<'_>,
        request: RequestBuilder,
    ) -> Result<(), ApiError> {
        self.send::<serde_json::Value>(endpoint, request).map(|_| ())
    }
}

impl CareerApi for HttpBackend {
    fn calculate_score(&self, request: &ReadinessRequest) -> Result<ReadinessReport, ApiError> {
        let endpoint = Endpoint::CalculateScore;
        self.send(&endpoint, self.request(&endpoint).json(request))
    }

    fn extract_skills(&self, job_description: &str) -> Result<ExtractedSkills, ApiError> {
        let endpoint = Endpoint::ExtractSkills;
        let body = SkillExtractionRequest { job_description };
        self.send(&endpoint, self.request(&endpoint).json(&body))
    }

    fn analyze_gap(&self, request: &GapRequest) -> Result<GapAnalysis, ApiError> {
        let endpoint = Endpoint::AnalyzeGap;
        self.send(&endpoint, self.request(&endpoint).json(request))
    }

    fn analyze_resume(&self, upload: &ResumeUpload) -> Result<ResumeAnalysis, ApiError> {
        let endpoint = Endpoint::AnalyzeResume;
        let part = multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime)
            .map_err(|source| ApiError::Transport {
                operation: endpoint.failure_message(),
                source,
            })?;
        let form = multipart::Form::new().part("resume", part);
        self.send(&endpoint, self.request(&endpoint).multipart(form))
    }

    fn add_application(&self, application: &NewApplication) -> Result<Application, ApiError> {
        let endpoint = Endpoint::AddApplication;
        let envelope: ApplicationEnvelope =
            self.send(&endpoint, self.request(&endpoint).json(application))?;
        Ok(envelope.application)
    }

    fn list_applications(&self) -> Result<Vec<Application>, ApiError> {
        let endpoint = Endpoint::ListApplications;
        let list: ApplicationList = self.send(&endpoint, self.request(&endpoint))?;
        Ok(list.applications)
    }

    fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), ApiError> {
        let endpoint = Endpoint::UpdateStatus(id);
        let body = StatusUpdate { status };
        self.send_ignoring_body(&endpoint, self.request(&endpoint).json(&body))
    }

    fn delete_application(&self, id: &ApplicationId) -> Result<(), ApiError> {
        let endpoint = Endpoint::DeleteApplication(id);
        self.send_ignoring_body(&endpoint, self.request(&endpoint))
    }

    fn statistics(&self) -> Result<Statistics, ApiError> {
        let endpoint = Endpoint::Statistics;
        self.send(&endpoint, self.request(&endpoint))
    }

    fn reminders(&self) -> Result<ReminderDigest, ApiError> {
        let endpoint = Endpoint::Reminders;
        self.send(&endpoint, self.request(&endpoint))
    }

    fn follow_up_email(&self, id: &ApplicationId) -> Result<String, ApiError> {
        let endpoint = Endpoint::GenerateEmail(id);
        let email: FollowUpEmail = self.send(&endpoint, self.request(&endpoint))?;
        Ok(email.email_template)
    }

    fn start_interview(&self, request: &StartInterview) -> Result<InterviewStarted, ApiError> {
        let endpoint = Endpoint::StartInterview;
        self.send(&endpoint, self.request(&endpoint).json(request))
    }

    fn submit_answer(&self, submission: &AnswerSubmission) -> Result<AnswerOutcome, ApiError> {
        let endpoint = Endpoint::SubmitAnswer;
        self.send(&endpoint, self.request(&endpoint).json(submission))
    }

    fn interview_results(&self, session_id: &SessionId) -> Result<InterviewResults, ApiError> {
        let endpoint = Endpoint::InterviewResults(session_id);
        self.send(&endpoint, self.request(&endpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend_error_field() {
        let body = r#"{"error": "Company name is required"}"#;
        assert_eq!(
            error_message(body, "Failed to add application"),
            "Company name is required"
        );
    }

    #[test]
    fn test_error_message_falls_back_on_unparseable_body() {
        assert_eq!(
            error_message("<html>502 Bad Gateway</html>", "Failed to load applications"),
            "Failed to load applications"
        );
        assert_eq!(error_message(r#"{"error": ""}"#, "Failed"), "Failed");
        assert_eq!(error_message(r#"{"message": "nope"}"#, "Failed"), "Failed");
    }

    #[test]
    fn test_endpoint_paths_and_methods() {
        let id = ApplicationId("job_20260101_120000".to_string());
        let session = SessionId("interview_20260101_120000".to_string());

        assert_eq!(
            Endpoint::UpdateStatus(&id).path(),
            "/api/update-status/job_20260101_120000"
        );
        assert_eq!(Endpoint::UpdateStatus(&id).method(), Method::PUT);
        assert_eq!(Endpoint::DeleteApplication(&id).method(), Method::DELETE);
        assert_eq!(
            Endpoint::GenerateEmail(&id).path(),
            "/api/generate-email/job_20260101_120000"
        );
        assert_eq!(
            Endpoint::InterviewResults(&session).path(),
            "/api/interview-results/interview_20260101_120000"
        );
        assert_eq!(Endpoint::ListApplications.path(), "/api/get-applications");
        assert_eq!(Endpoint::AnalyzeResume.method(), Method::POST);
        assert_eq!(Endpoint::Reminders.method(), Method::GET);
    }

    #[test]
    fn test_backend_trims_trailing_slash() {
        let backend = HttpBackend::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(backend.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_status_error_displays_message_only() {
        let err = ApiError::Status {
            status: 404,
            message: "Application not found".to_string(),
        };
        assert_eq!(err.to_string(), "Application not found");
        assert_eq!(err.status(), Some(404));
    }
}
