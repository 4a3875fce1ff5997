//! CMS configuration (cms.yml + environment)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Deployment environment, controls cookie security and token domain checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            _ => None,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Main CMS configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CmsConfig {
    pub environment: Environment,
    pub github: GithubConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub content: ContentConfig,
}

impl CmsConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: CmsConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Load the config file if it exists, then apply `.env` and environment overrides
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Self::default()
        };

        let _ = dotenvy::dotenv();
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// Override fields from environment-style variables
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("GITHUB_TOKEN") {
            self.github.token = Some(v);
        }
        if let Some(v) = lookup("GITHUB_OWNER") {
            self.github.owner = v;
        }
        if let Some(v) = lookup("GITHUB_REPO") {
            self.github.repo = v;
        }
        if let Some(v) = lookup("GITHUB_BRANCH") {
            self.github.branch = Some(v);
        }
        if let Some(v) = lookup("GITHUB_API_URL") {
            self.github.api_url = v;
        }
        if let Some(v) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Some(v) = lookup("DOMAIN") {
            self.auth.domain = v;
        }
        if let Some(v) = lookup("ACCESS_PASSWORD") {
            self.auth.access_password = Some(v);
        }
        if let Some(v) = lookup("APP_ENV") {
            self.environment = Environment::from_name(&v)
                .with_context(|| format!("APP_ENV must be development or production, got {}", v))?;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().context("PORT must be a valid number")?;
        }
        Ok(())
    }

    /// Check the settings every remote operation needs
    pub fn validate(&self) -> Result<()> {
        if self.github.owner.is_empty() {
            bail!("GitHub owner is not configured (github.owner or GITHUB_OWNER)");
        }
        if self.github.repo.is_empty() {
            bail!("GitHub repository is not configured (github.repo or GITHUB_REPO)");
        }
        Ok(())
    }

    /// Additional checks before the HTTP server starts
    pub fn validate_for_server(&self) -> Result<()> {
        self.validate()?;
        if self.auth.jwt_secret.is_empty() {
            bail!("JWT secret is not configured (auth.jwt_secret or JWT_SECRET)");
        }
        if self.auth.access_password.is_none() {
            tracing::warn!("No access password configured, admin login is disabled");
        }
        if self.public_domain_in_development() {
            tracing::warn!(
                "Domain {} looks public but APP_ENV is development: cookies are not Secure and tokens only validate for localhost",
                self.auth.domain
            );
        }
        Ok(())
    }

    /// A non-local domain served with development settings, usually a missing `APP_ENV`
    pub fn public_domain_in_development(&self) -> bool {
        !self.environment.is_production()
            && !matches!(self.auth.domain.as_str(), "localhost" | "127.0.0.1" | "")
    }
}

/// Content repository settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    pub branch: Option<String>,
    #[serde(skip_serializing)]
    pub token: Option<String>,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            owner: String::new(),
            repo: String::new(),
            branch: None,
            token: None,
        }
    }
}

/// Admin authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub domain: String,
    #[serde(skip_serializing)]
    pub access_password: Option<String>,
    /// Token and cookie lifetime in seconds
    pub token_ttl: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            domain: "localhost".to_string(),
            access_password: None,
            token_ttl: 3600,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    /// Directory of static UI assets served as the fallback route
    pub public_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
            public_dir: None,
        }
    }
}

/// Layout of the content repository
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub markdown_dir: String,
    pub articles_index: String,
    pub resources_path: String,
    pub categories_path: String,
    /// Local checkout used for resource reads that don't ask for GitHub
    pub local_dir: Option<PathBuf>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            markdown_dir: "data/md".to_string(),
            articles_index: "data/json/articles.json".to_string(),
            resources_path: "data/json/resources.json".to_string(),
            categories_path: "data/json/categories.json".to_string(),
            local_dir: None,
        }
    }
}

impl ContentConfig {
    /// Repository path of the Markdown file for a slug
    pub fn article_path(&self, slug: &str) -> String {
        format!("{}/{}.md", self.markdown_dir.trim_end_matches('/'), slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CmsConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.content.articles_index, "data/json/articles.json");
        assert_eq!(config.auth.token_ttl, 3600);
        assert_eq!(config.content.article_path("hello"), "data/md/hello.md");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
environment: production
github:
  owner: octo
  repo: site-content
  branch: main
auth:
  domain: example.com
server:
  port: 8080
"#;
        let config: CmsConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.branch.as_deref(), Some("main"));
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.auth.domain, "example.com");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.content.markdown_dir, "data/md");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = CmsConfig::default();
        config.github.owner = "from-file".to_string();

        let vars: HashMap<&str, &str> = [
            ("GITHUB_OWNER", "from-env"),
            ("GITHUB_REPO", "content"),
            ("JWT_SECRET", "s3cret"),
            ("ACCESS_PASSWORD", "hunter2"),
            ("APP_ENV", "production"),
            ("PORT", "4100"),
        ]
        .into_iter()
        .collect();

        config
            .apply_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.github.owner, "from-env");
        assert_eq!(config.github.repo, "content");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.auth.access_password.as_deref(), Some("hunter2"));
        assert!(config.environment.is_production());
        assert_eq!(config.server.port, 4100);
        assert!(config.validate_for_server().is_ok());
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = CmsConfig::default();
        assert!(config
            .apply_env(|k| (k == "PORT").then(|| "eighty".to_string()))
            .is_err());
        assert!(config
            .apply_env(|k| (k == "APP_ENV").then(|| "staging".to_string()))
            .is_err());
    }

    #[test]
    fn test_public_domain_in_development() {
        let mut config = CmsConfig::default();
        assert!(!config.public_domain_in_development());

        config.auth.domain = "blog.example.com".to_string();
        assert!(config.public_domain_in_development());

        config.environment = Environment::Production;
        assert!(!config.public_domain_in_development());
    }

    #[test]
    fn test_validate_requires_repository() {
        let config = CmsConfig::default();
        assert!(config.validate().is_err());

        let mut config = CmsConfig::default();
        config.github.owner = "octo".to_string();
        config.github.repo = "content".to_string();
        assert!(config.validate().is_ok());
        assert!(config.validate_for_server().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cms.yml");
        fs::write(&path, "github:\n  owner: octo\n  repo: blog\n").unwrap();

        let config = CmsConfig::load(&path).unwrap();
        assert_eq!(config.github.owner, "octo");
        assert_eq!(config.github.repo, "blog");
    }
}
