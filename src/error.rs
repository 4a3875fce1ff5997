//! Errors raised by content operations

use std::path::PathBuf;

use crate::github::GithubError;

pub type Result<T> = std::result::Result<T, CmsError>;

#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error(transparent)]
    Github(#[from] GithubError),
    #[error("invalid front-matter in {path}: {source}")]
    FrontMatter {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid slug format: {0}")]
    InvalidSlug(String),
    #[error("Article with this slug already exists: {0}")]
    ArticleExists(String),
}

impl CmsError {
    /// Another writer changed the file since it was read
    pub fn is_conflict(&self) -> bool {
        matches!(self, CmsError::Github(GithubError::Conflict { .. }))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CmsError::Github(e) if e.is_not_found())
    }
}
