use tracing::debug;

use crate::api::CareerApi;
use crate::error::{Error, Result};
use crate::models::{GapAnalysis, GapRequest};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GapStage {
    #[default]
    JobDescription,
    UserSkills {
        required: Vec<String>,
    },
    Results {
        required: Vec<String>,
        analysis: GapAnalysis,
    },
}

/// Two-step skills gap analysis: extract what the job needs, then compare.
#[derive(Debug, Clone, Default)]
pub struct SkillsGap {
    stage: GapStage,
}

impl SkillsGap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &GapStage {
        &self.stage
    }

    pub fn required_skills(&self) -> &[String] {
        match &self.stage {
            GapStage::JobDescription => &[],
            GapStage::UserSkills { required } | GapStage::Results { required, .. } => required,
        }
    }

    /// Any stage -> UserSkills. Re-extracting replaces the previous requirements.
    pub fn extract(&mut self, api: &dyn CareerApi, job_description: &str) -> Result<&[String]> {
        let job_description = validate::job_description(job_description)?;
        let extracted = api.extract_skills(job_description)?;
        debug!(count = extracted.required_skills.len(), "required skills extracted");
        self.stage = GapStage::UserSkills {
            required: extracted.required_skills,
        };
        Ok(self.required_skills())
    }

    /// UserSkills -> Results. The input is split on commas and sent as typed,
    /// alongside the extracted requirements.
    pub fn analyze(&mut self, api: &dyn CareerApi, user_skills: &str) -> Result<&GapAnalysis> {
        let required = match &self.stage {
            GapStage::UserSkills { required } => required.clone(),
            GapStage::JobDescription => {
                return Err(Error::InvalidState {
                    action: "analyzing the skill gap",
                    state: "before job requirements are extracted",
                });
            }
            GapStage::Results { .. } => {
                return Err(Error::InvalidState {
                    action: "analyzing the skill gap",
                    state: "until the analyzer is reset",
                });
            }
        };
        let user_skills = validate::user_skills(user_skills)?;
        let analysis = api.analyze_gap(&GapRequest {
            user_skills,
            required_skills: required.clone(),
        })?;
        self.stage = GapStage::Results { required, analysis };
        match &self.stage {
            GapStage::Results { analysis, .. } => Ok(analysis),
            _ => Err(Error::InvalidState {
                action: "analyzing the skill gap",
                state: "after the analysis was discarded",
            }),
        }
    }

    pub fn reset(&mut self) {
        self.stage = GapStage::JobDescription;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, FakeApi};

    const JOB: &str = "We are hiring a data analyst with strong Python and SQL skills to build reports.";

    #[test]
    fn test_gap_request_keeps_user_casing() {
        let api = FakeApi::new();
        *api.required_skills.borrow_mut() = vec!["Python".to_string(), "SQL".to_string()];
        let mut gap = SkillsGap::new();

        gap.extract(&api, JOB).unwrap();
        gap.analyze(&api, "python, excel").unwrap();

        assert_eq!(
            api.calls().last(),
            Some(&Call::AnalyzeGap(GapRequest {
                user_skills: vec!["python".to_string(), "excel".to_string()],
                required_skills: vec!["Python".to_string(), "SQL".to_string()],
            }))
        );
        assert!(matches!(gap.stage(), GapStage::Results { .. }));
    }

    #[test]
    fn test_short_description_is_rejected_before_request() {
        let api = FakeApi::new();
        let mut gap = SkillsGap::new();
        let err = gap.extract(&api, "Python developer").unwrap_err();
        assert!(err.is_validation());
        assert!(api.calls().is_empty());
        assert_eq!(gap.stage(), &GapStage::JobDescription);
    }

    #[test]
    fn test_analyze_before_extract_is_invalid() {
        let api = FakeApi::new();
        let mut gap = SkillsGap::new();
        assert!(matches!(
            gap.analyze(&api, "python"),
            Err(Error::InvalidState { .. })
        ));
    }

    #[test]
    fn test_blank_skills_keep_user_skills_step() {
        let api = FakeApi::new();
        *api.required_skills.borrow_mut() = vec!["Rust".to_string()];
        let mut gap = SkillsGap::new();
        gap.extract(&api, JOB).unwrap();

        let err = gap.analyze(&api, " , ").unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gap.required_skills(), ["Rust".to_string()]);
    }

    #[test]
    fn test_reset_forgets_required_skills() {
        let api = FakeApi::new();
        *api.required_skills.borrow_mut() = vec!["Rust".to_string()];
        let mut gap = SkillsGap::new();
        gap.extract(&api, JOB).unwrap();
        gap.reset();
        assert!(gap.required_skills().is_empty());
    }
}
