//! Mock interview progression against a server-held session.
//!
//! The client keeps only the session handle and the last answer outcome; the
//! question bank and scoring stay on the backend.

use tracing::{debug, info};

use crate::api::CareerApi;
use crate::error::{Error, Result};
use crate::models::{
    AnswerOutcome, AnswerSubmission, InterviewResults, InterviewStarted, SessionId, StartInterview,
};
use crate::validate;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionHandle {
    pub id: SessionId,
    pub company: String,
    pub role: String,
    pub total_questions: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub number: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Stage {
    #[default]
    NotStarted,
    InProgress {
        session: SessionHandle,
        question: Question,
    },
    Feedback {
        session: SessionHandle,
        outcome: AnswerOutcome,
    },
    Final {
        session: SessionHandle,
        results: InterviewResults,
    },
}

impl Stage {
    fn name(&self) -> &'static str {
        match self {
            Stage::NotStarted => "before the interview starts",
            Stage::InProgress { .. } => "while a question is open",
            Stage::Feedback { .. } => "while feedback is shown",
            Stage::Final { .. } => "after the interview is complete",
        }
    }

    pub fn session(&self) -> Option<&SessionHandle> {
        match self {
            Stage::NotStarted => None,
            Stage::InProgress { session, .. }
            | Stage::Feedback { session, .. }
            | Stage::Final { session, .. } => Some(session),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interview {
    stage: Stage,
}

impl Interview {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    fn invalid(&self, action: &'static str) -> Error {
        Error::InvalidState {
            action,
            state: self.stage.name(),
        }
    }

    /// NotStarted -> InProgress. A blank company is left out so the backend picks its default.
    pub fn start(&mut self, api: &dyn CareerApi, company: &str, role: &str) -> Result<&Question> {
        if !matches!(self.stage, Stage::NotStarted) {
            return Err(self.invalid("starting an interview"));
        }
        let role = validate::role(role)?;
        let company = Some(company.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        let started = api.start_interview(&StartInterview {
            company,
            role: role.to_string(),
        })?;
        info!(session = %started.session_id, "interview started");
        self.stage = Self::first_question(started);
        match &self.stage {
            Stage::InProgress { question, .. } => Ok(question),
            _ => Err(self.invalid("starting an interview")),
        }
    }

    fn first_question(started: InterviewStarted) -> Stage {
        Stage::InProgress {
            session: SessionHandle {
                id: started.session_id,
                company: started.company,
                role: started.role,
                total_questions: started.total_questions,
            },
            question: Question {
                number: started.question_number,
                text: started.current_question,
            },
        }
    }

    /// InProgress -> Feedback. Answers shorter than the minimum never leave the client.
    pub fn submit(&mut self, api: &dyn CareerApi, answer: &str) -> Result<&AnswerOutcome> {
        let Stage::InProgress { session, .. } = &self.stage else {
            return Err(self.invalid("submitting an answer"));
        };
        let answer = validate::answer(answer)?;
        let outcome = api.submit_answer(&AnswerSubmission {
            session_id: session.id.clone(),
            answer: answer.to_string(),
        })?;
        debug!(complete = outcome.is_complete(), "answer scored");
        self.stage = Stage::Feedback {
            session: session.clone(),
            outcome,
        };
        match &self.stage {
            Stage::Feedback { outcome, .. } => Ok(outcome),
            _ => Err(self.invalid("submitting an answer")),
        }
    }

    /// Feedback -> InProgress for the next question, or Feedback -> Final once the
    /// server reports the interview complete. A failed results fetch leaves the
    /// feedback in place.
    pub fn advance(&mut self, api: &dyn CareerApi) -> Result<&Stage> {
        let Stage::Feedback { session, outcome } = &self.stage else {
            return Err(self.invalid("moving to the next question"));
        };
        let next = match outcome {
            AnswerOutcome::Continue {
                next_question,
                question_number,
                total_questions,
                ..
            } => Stage::InProgress {
                session: SessionHandle {
                    total_questions: *total_questions,
                    ..session.clone()
                },
                question: Question {
                    number: *question_number,
                    text: next_question.clone(),
                },
            },
            AnswerOutcome::Complete { .. } => {
                let results = api.interview_results(&session.id)?;
                info!(session = %session.id, overall = results.scores.overall_score, "interview complete");
                Stage::Final {
                    session: session.clone(),
                    results,
                }
            }
        };
        self.stage = next;
        Ok(&self.stage)
    }

    /// Ends the interview early. Without confirmation nothing happens; with it all
    /// local session state is dropped, no partial save.
    pub fn end(&mut self, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }
        self.reset();
        true
    }

    pub fn reset(&mut self) {
        if let Some(session) = self.stage.session() {
            debug!(session = %session.id, "discarding interview session");
        }
        self.stage = Stage::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeApi, answer_feedback};

    #[test]
    fn test_start_without_company_yields_session() {
        let api = FakeApi::new();
        let mut interview = Interview::new();

        let question = interview.start(&api, "", "Software Engineer").unwrap();

        assert_eq!(question.number, 1);
        assert_eq!(
            api.calls(),
            vec![Call::StartInterview(StartInterview {
                company: None,
                role: "Software Engineer".to_string(),
            })]
        );
        let session = interview.stage().session().unwrap();
        assert_eq!(session.id, SessionId("interview_1".to_string()));
        assert_eq!(session.company, "General");
    }

    #[test]
    fn test_start_requires_role() {
        let api = FakeApi::new();
        let mut interview = Interview::new();
        let err = interview.start(&api, "Acme", "   ").unwrap_err();
        assert!(err.is_validation());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_answer_of_nine_chars_is_rejected_locally() {
        let api = FakeApi::new();
        let mut interview = Interview::new();
        interview.start(&api, "", "Software Engineer").unwrap();
        api.clear_calls();

        let err = interview.submit(&api, "123456789").unwrap_err();
        assert!(err.is_validation());
        assert!(api.calls().is_empty());
        assert!(matches!(interview.stage(), Stage::InProgress { .. }));

        interview.submit(&api, "1234567890").unwrap();
        assert_eq!(
            api.calls(),
            vec![Call::SubmitAnswer(AnswerSubmission {
                session_id: SessionId("interview_1".to_string()),
                answer: "1234567890".to_string(),
            })]
        );
        assert!(matches!(interview.stage(), Stage::Feedback { .. }));
    }

    #[test]
    fn test_continue_then_complete_reaches_final() {
        let api = FakeApi::new();
        api.outcomes.borrow_mut().push(AnswerOutcome::Continue {
            feedback: answer_feedback("Tell me about yourself."),
            next_question: "Why this company?".to_string(),
            question_number: 2,
            total_questions: 2,
        });
        let mut interview = Interview::new();
        interview.start(&api, "Acme", "Analyst").unwrap();

        interview.submit(&api, "I like data and people.").unwrap();
        let stage = interview.advance(&api).unwrap();
        match stage {
            Stage::InProgress { question, .. } => {
                assert_eq!(question.number, 2);
                assert_eq!(question.text, "Why this company?");
            }
            other => panic!("unexpected stage {other:?}"),
        }

        let outcome = interview.submit(&api, "Because of the mission.").unwrap();
        assert!(outcome.is_complete());
        let stage = interview.advance(&api).unwrap();
        assert!(matches!(stage, Stage::Final { .. }));
        assert_eq!(
            api.calls().last(),
            Some(&Call::InterviewResults(SessionId("interview_1".to_string())))
        );
    }

    #[test]
    fn test_results_failure_keeps_feedback() {
        let api = FakeApi::new();
        let mut interview = Interview::new();
        interview.start(&api, "", "Analyst").unwrap();
        interview.submit(&api, "A complete answer here").unwrap();
        api.fail(crate::test_support::Op::InterviewResults, "Session not found");

        let err = interview.advance(&api).unwrap_err();

        assert_eq!(err.to_string(), "Session not found");
        assert!(matches!(interview.stage(), Stage::Feedback { .. }));
    }

    #[test]
    fn test_end_requires_confirmation_and_discards_state() {
        let api = FakeApi::new();
        let mut interview = Interview::new();
        interview.start(&api, "", "Analyst").unwrap();

        assert!(!interview.end(false));
        assert!(interview.stage().session().is_some());

        assert!(interview.end(true));
        assert_eq!(interview.stage(), &Stage::NotStarted);
    }

    #[test]
    fn test_out_of_order_calls_are_rejected() {
        let api = FakeApi::new();
        let mut interview = Interview::new();
        assert!(matches!(
            interview.submit(&api, "an answer long enough"),
            Err(Error::InvalidState { .. })
        ));
        assert!(matches!(interview.advance(&api), Err(Error::InvalidState { .. })));
        interview.start(&api, "", "Analyst").unwrap();
        assert!(matches!(
            interview.start(&api, "", "Analyst"),
            Err(Error::InvalidState { .. })
        ));
    }
}
