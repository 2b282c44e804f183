use std::path::Path;

use thiserror::Error;

pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;
pub const MIN_ANSWER_CHARS: usize = 10;
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Checks run before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please paste a complete job description (at least {MIN_JOB_DESCRIPTION_CHARS} characters)")]
    JobDescriptionTooShort,
    #[error("Please enter at least one skill")]
    NoSkills,
    #[error("Please provide a meaningful answer (at least {MIN_ANSWER_CHARS} characters)")]
    AnswerTooShort,
    #[error("Please enter a role")]
    MissingRole,
    #[error("Please fill in company name and position")]
    MissingCompanyOrPosition,
    #[error("Please upload a PDF or DOCX file only")]
    UnsupportedFileType,
    #[error("File size must be less than 10MB")]
    FileTooLarge,
    #[error("Please select a resume file first")]
    NoResumeSelected,
    #[error("Please enter a valid number of years of experience")]
    InvalidExperience,
}

pub fn job_description(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Err(ValidationError::JobDescriptionTooShort);
    }
    Ok(trimmed)
}

/// Splits a comma-separated skill list. Case is preserved; matching is the backend's job.
pub fn user_skills(input: &str) -> Result<Vec<String>, ValidationError> {
    let skills: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        return Err(ValidationError::NoSkills);
    }
    Ok(skills)
}

pub fn answer(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_ANSWER_CHARS {
        return Err(ValidationError::AnswerTooShort);
    }
    Ok(trimmed)
}

/// Negative values count as no experience; NaN and infinity are rejected.
pub fn experience_years(years: f64) -> Result<f64, ValidationError> {
    if !years.is_finite() {
        return Err(ValidationError::InvalidExperience);
    }
    Ok(years.max(0.0))
}

pub fn role(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRole);
    }
    Ok(trimmed)
}

pub fn company_and_position(company: &str, position: &str) -> Result<(), ValidationError> {
    if company.trim().is_empty() || position.trim().is_empty() {
        return Err(ValidationError::MissingCompanyOrPosition);
    }
    Ok(())
}

pub fn resume_file(mime: &str, size: u64) -> Result<(), ValidationError> {
    if mime != PDF_MIME && mime != DOCX_MIME {
        return Err(ValidationError::UnsupportedFileType);
    }
    if size > MAX_RESUME_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(())
}

pub fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
