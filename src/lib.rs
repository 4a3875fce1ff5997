//! repo-cms: a database-free CMS backed by a GitHub repository
//!
//! Articles are Markdown files with YAML front-matter, resources and
//! categories are JSON arrays, and an `articles.json` index is rebuilt from
//! the Markdown directory on every article write. All persistence goes
//! through the GitHub contents API.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod github;
pub mod server;

use anyhow::Result;
use std::path::Path;

use content::{Article, ArticleStore, Category, JsonCollection, Resource};

/// The main CMS application
#[derive(Clone)]
pub struct Cms {
    /// Resolved configuration
    pub config: config::CmsConfig,
    /// Client for the content repository
    pub github: github::GithubClient,
    /// Admin session tokens
    pub jwt: auth::JwtService,
}

impl Cms {
    /// Create a CMS instance from a resolved configuration
    pub fn new(config: config::CmsConfig) -> Result<Self> {
        let github = github::GithubClient::new(&config.github)?;
        let jwt = auth::JwtService::new(&config.auth, config.environment);
        Ok(Self {
            config,
            github,
            jwt,
        })
    }

    /// Load `config_path` (if present) plus environment overrides
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config = config::CmsConfig::resolve(config_path)?;
        Self::new(config)
    }

    /// Article operations
    pub fn articles(&self) -> ArticleStore<'_> {
        ArticleStore::new(&self.github, &self.config.content)
    }

    /// The resources list
    pub fn resources(&self) -> JsonCollection<'_, Resource> {
        JsonCollection::new(
            &self.github,
            &self.config.content.resources_path,
            "Update resources",
        )
    }

    /// The categories list
    pub fn categories(&self) -> JsonCollection<'_, Category> {
        JsonCollection::new(
            &self.github,
            &self.config.content.categories_path,
            "Update categories",
        )
        .missing_is_empty()
    }

    /// Rebuild the article index
    pub async fn sync(&self) -> Result<Vec<Article>> {
        Ok(self.articles().sync().await?)
    }
}
