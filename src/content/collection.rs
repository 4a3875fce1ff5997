//! Resources and categories: flat JSON arrays replaced wholesale on write

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::path::Path;

use crate::error::{CmsError, Result};
use crate::github::GithubClient;

/// A link listed on the resources page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub name: String,
    pub description: String,
    pub url: String,
    pub category: String,
}

/// A resource category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub name: String,
    pub description: String,
}

/// A JSON array file in the content repository
pub struct JsonCollection<'a, T> {
    github: &'a GithubClient,
    path: &'a str,
    message: &'static str,
    missing_is_empty: bool,
    _item: PhantomData<T>,
}

impl<'a, T> JsonCollection<'a, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(github: &'a GithubClient, path: &'a str, message: &'static str) -> Self {
        Self {
            github,
            path,
            message,
            missing_is_empty: false,
            _item: PhantomData,
        }
    }

    /// Treat a missing file as an empty list instead of an error
    pub fn missing_is_empty(mut self) -> Self {
        self.missing_is_empty = true;
        self
    }

    pub fn path(&self) -> &str {
        self.path
    }

    /// Load the list from GitHub
    pub async fn load(&self) -> Result<Vec<T>> {
        Ok(self.load_with_sha().await?.0)
    }

    /// Load the list from a local checkout of the content repository
    pub async fn load_local(&self, root: &Path) -> Result<Vec<T>> {
        let file = root.join(self.path);
        let content = match tokio::fs::read_to_string(&file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && self.missing_is_empty => {
                return Ok(Vec::new())
            }
            Err(source) => return Err(CmsError::Io { path: file, source }),
        };
        self.decode(&content)
    }

    /// Replace the whole list
    pub async fn replace(&self, items: Vec<T>) -> Result<Vec<T>> {
        let sha = self.current_sha().await?;
        self.write(&items, sha.as_deref()).await?;
        Ok(items)
    }

    /// Append one item and write the whole list back
    pub async fn append(&self, item: T) -> Result<Vec<T>> {
        let (mut items, sha) = self.load_with_sha().await?;
        items.push(item);
        self.write(&items, sha.as_deref()).await?;
        Ok(items)
    }

    /// Drop every item matching `predicate` and write the rest back
    pub async fn remove_where<F>(&self, predicate: F) -> Result<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let (mut items, sha) = self.load_with_sha().await?;
        let before = items.len();
        items.retain(|item| !predicate(item));
        tracing::debug!("Removing {} items from {}", before - items.len(), self.path);
        self.write(&items, sha.as_deref()).await?;
        Ok(items)
    }

    async fn load_with_sha(&self) -> Result<(Vec<T>, Option<String>)> {
        let file = if self.missing_is_empty {
            self.github.try_get_file(self.path).await?
        } else {
            Some(self.github.get_file(self.path).await?)
        };

        match file {
            Some(file) => Ok((self.decode(&file.content)?, Some(file.sha))),
            None => Ok((Vec::new(), None)),
        }
    }

    async fn current_sha(&self) -> Result<Option<String>> {
        Ok(self.github.try_get_file(self.path).await?.map(|f| f.sha))
    }

    async fn write(&self, items: &[T], sha: Option<&str>) -> Result<()> {
        let json = serde_json::to_string_pretty(items).map_err(|source| CmsError::Json {
            path: self.path.to_string(),
            source,
        })?;
        self.github
            .put_file(self.path, self.message, &json, sha)
            .await?;
        tracing::info!("Wrote {} items to {}", items.len(), self.path);
        Ok(())
    }

    fn decode(&self, content: &str) -> Result<Vec<T>> {
        if content.trim().is_empty() && self.missing_is_empty {
            return Ok(Vec::new());
        }
        serde_json::from_str(content).map_err(|source| CmsError::Json {
            path: self.path.to_string(),
            source,
        })
    }
}
