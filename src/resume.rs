use std::fs;
use std::path::Path;

use tracing::info;

use crate::api::CareerApi;
use crate::error::{Error, Result};
use crate::models::{ResumeAnalysis, ResumeUpload};
use crate::validate::{self, ValidationError};

/// Holds the resume picked for critique until it is analyzed or cleared.
#[derive(Debug, Clone, Default)]
pub struct ResumeRoast {
    selected: Option<ResumeUpload>,
}

impl ResumeRoast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&ResumeUpload> {
        self.selected.as_ref()
    }

    /// Type and size are checked from the path and metadata before the file is read.
    pub fn select(&mut self, path: &Path) -> Result<&ResumeUpload> {
        let mime = validate::guess_mime(path);
        let size = fs::metadata(path)
            .map_err(|source| Error::Io {
                path: path.display().to_string(),
                source,
            })?
            .len();
        validate::resume_file(&mime, size)?;
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume".to_string());
        self.select_bytes(file_name, mime, bytes)
    }

    pub fn select_bytes(&mut self, file_name: String, mime: String, bytes: Vec<u8>) -> Result<&ResumeUpload> {
        validate::resume_file(&mime, bytes.len() as u64)?;
        Ok(&*self.selected.insert(ResumeUpload {
            file_name,
            mime,
            bytes,
        }))
    }

    pub fn analyze(&self, api: &dyn CareerApi) -> Result<ResumeAnalysis> {
        let upload = self.selected.as_ref().ok_or(ValidationError::NoResumeSelected)?;
        let analysis = api.analyze_resume(upload)?;
        info!(file = %upload.file_name, score = analysis.total_score, "resume analyzed");
        Ok(analysis)
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}
