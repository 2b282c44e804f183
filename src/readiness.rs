use tracing::warn;

use crate::api::CareerApi;
use crate::error::Result;
use crate::models::{ReadinessBreakdown, ReadinessReport, ReadinessRequest};
use crate::validate::{self, ValidationError};

pub const COMPONENT_MAX: u32 = 25;

impl ReadinessBreakdown {
    pub fn components(&self) -> [(&'static str, u32); 4] {
        [
            ("Resume quality", self.resume_quality),
            ("Skills match", self.skills_match),
            ("Experience level", self.experience_level),
            ("Project portfolio", self.project_portfolio),
        ]
    }

    pub fn total(&self) -> u32 {
        self.components().iter().map(|(_, points)| points).sum()
    }
}

impl ReadinessReport {
    /// Each component is out of 25 and the four add up to the headline score.
    pub fn is_consistent(&self) -> bool {
        self.breakdown
            .components()
            .iter()
            .all(|(_, points)| *points <= COMPONENT_MAX)
            && self.breakdown.total() == self.score
    }
}

/// Projects and resume details only count when the candidate says they have them.
pub fn request(
    has_resume: bool,
    resume_length: u32,
    skills_count: u32,
    experience_years: f64,
    has_projects: bool,
    projects_count: u32,
) -> Result<ReadinessRequest, ValidationError> {
    Ok(ReadinessRequest {
        has_resume,
        resume_length: if has_resume { resume_length } else { 0 },
        skills_count,
        experience_years: validate::experience_years(experience_years)?,
        has_projects,
        projects_count: if has_projects { projects_count } else { 0 },
    })
}

pub fn score(api: &dyn CareerApi, request: &ReadinessRequest) -> Result<ReadinessReport> {
    let report = api.calculate_score(request)?;
    if !report.is_consistent() {
        warn!(
            score = report.score,
            breakdown_total = report.breakdown.total(),
            "readiness breakdown does not add up to the reported score"
        );
    }
    Ok(report)
}
