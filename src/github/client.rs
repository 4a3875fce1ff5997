//! Async client for the repository contents and commits endpoints

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{CommitEntry, ContentsResponse, DirEntry, EntryKind, PutFileRequest, RepoFile};
use crate::config::GithubConfig;

const API_VERSION: &str = "2022-11-28";

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, thiserror::Error)]
pub enum GithubError {
    #[error("github request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{path} not found in content repository")]
    NotFound { path: String },
    #[error("write conflict on {path}: {body}")]
    Conflict { path: String, body: String },
    #[error("github returned HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },
    #[error("failed to decode github response: {source}; body: {body}")]
    Decode {
        source: serde_json::Error,
        body: String,
    },
    #[error("{path} is not a file")]
    NotAFile { path: String },
    #[error("{path} is not a directory")]
    NotADirectory { path: String },
    #[error("failed to decode content of {path}: {reason}")]
    Content { path: String, reason: String },
}

impl GithubError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GithubError::NotFound { .. })
    }
}

/// Client bound to one content repository
#[derive(Debug, Clone)]
pub struct GithubClient {
    api_url: String,
    owner: String,
    repo: String,
    branch: Option<String>,
    token: Option<String>,
    http: Client,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, GithubError> {
        let http = Client::builder()
            .user_agent(concat!("repo-cms/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.branch.clone(),
            token: config.token.clone(),
            http,
        })
    }

    /// Read and decode a single file
    pub async fn get_file(&self, path: &str) -> Result<RepoFile, GithubError> {
        let mut request = self.request(Method::GET, &self.contents_url(path));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        match self.fetch_json::<ContentsResponse>(request, path).await? {
            ContentsResponse::File(file) => {
                if file.kind != EntryKind::File {
                    return Err(GithubError::NotAFile { path: file.path });
                }
                if file.encoding.as_deref() == Some("none") {
                    return Err(GithubError::Content {
                        path: file.path,
                        reason: "file is too large for the contents API".to_string(),
                    });
                }
                let content = decode_content(&file.path, &file.content)?;
                Ok(RepoFile {
                    path: file.path,
                    sha: file.sha,
                    content,
                })
            }
            ContentsResponse::Dir(_) => Err(GithubError::NotAFile {
                path: path.to_string(),
            }),
        }
    }

    /// Like [`get_file`](Self::get_file) but a missing file is `None`
    pub async fn try_get_file(&self, path: &str) -> Result<Option<RepoFile>, GithubError> {
        match self.get_file(path).await {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// List the entries of a directory
    pub async fn list_dir(&self, path: &str) -> Result<Vec<DirEntry>, GithubError> {
        let mut request = self.request(Method::GET, &self.contents_url(path));
        if let Some(branch) = &self.branch {
            request = request.query(&[("ref", branch.as_str())]);
        }

        match self.fetch_json::<ContentsResponse>(request, path).await? {
            ContentsResponse::Dir(entries) => Ok(entries),
            ContentsResponse::File(_) => Err(GithubError::NotADirectory {
                path: path.to_string(),
            }),
        }
    }

    /// Create a file, or update it when `sha` of the current blob is given
    pub async fn put_file(
        &self,
        path: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<(), GithubError> {
        let body = PutFileRequest {
            message,
            content: STANDARD.encode(content.as_bytes()),
            sha,
            branch: self.branch.as_deref(),
        };
        let request = self
            .request(Method::PUT, &self.contents_url(path))
            .json(&body);

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        match status {
            s if s.is_success() => {
                tracing::debug!("Wrote {} ({})", path, message);
                Ok(())
            }
            StatusCode::NOT_FOUND => Err(GithubError::NotFound {
                path: path.to_string(),
            }),
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Err(GithubError::Conflict {
                path: path.to_string(),
                body: text,
            }),
            _ => Err(GithubError::Http { status, body: text }),
        }
    }

    /// Committer date of the most recent commit touching `path`
    pub async fn latest_commit_date(&self, path: &str) -> Result<Option<String>, GithubError> {
        let url = format!("{}/repos/{}/{}/commits", self.api_url, self.owner, self.repo);
        let mut request = self
            .request(Method::GET, &url)
            .query(&[("path", path), ("per_page", "1")]);
        if let Some(branch) = &self.branch {
            request = request.query(&[("sha", branch.as_str())]);
        }

        let commits: Vec<CommitEntry> = self.fetch_json(request, path).await?;
        Ok(commits
            .into_iter()
            .next()
            .and_then(|c| c.commit.committer)
            .and_then(|s| s.date))
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_url,
            self.owner,
            self.repo,
            encode_path(path)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .http
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        path: &str,
    ) -> Result<T, GithubError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(GithubError::NotFound {
                path: path.to_string(),
            });
        }
        if !status.is_success() {
            return Err(GithubError::Http { status, body });
        }

        serde_json::from_str(&body).map_err(|source| GithubError::Decode { source, body })
    }
}

/// Escape each segment of a repository path, keeping the separators
fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// GitHub wraps base64 content at 60 columns
fn decode_content(path: &str, encoded: &str) -> Result<String, GithubError> {
    let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| GithubError::Content {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
    String::from_utf8(bytes).map_err(|e| GithubError::Content {
        path: path.to_string(),
        reason: e.to_string(),
    })
}
