//! Rebuild the article index from the Markdown directory

use super::articles::{parse_document, ArticleStore};
use super::Article;
use crate::error::{CmsError, Result};
use crate::github::DirEntry;

impl ArticleStore<'_> {
    /// List the Markdown files, read each one and its last commit, and write
    /// the resulting entries to the index. Files that fail to load are skipped.
    pub async fn sync(&self) -> Result<Vec<Article>> {
        let entries = self.github.list_dir(&self.layout.markdown_dir).await?;
        let markdown: Vec<&DirEntry> = entries
            .iter()
            .filter(|e| e.is_file() && e.name.ends_with(".md"))
            .collect();

        tracing::debug!(
            "Syncing {} markdown files from {}",
            markdown.len(),
            self.layout.markdown_dir
        );

        let mut articles = Vec::with_capacity(markdown.len());
        for entry in markdown {
            match self.index_entry(entry).await {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!("Skipping {} during sync: {}", entry.path, e);
                }
            }
        }

        self.write_index(&articles).await?;
        tracing::info!("Synced {} articles", articles.len());
        Ok(articles)
    }

    async fn index_entry(&self, entry: &DirEntry) -> Result<Article> {
        let file = self.github.get_file(&entry.path).await?;
        let (fm, _) = parse_document(&file)?;

        // Files without commit history fall back to their blob SHA
        let last_modified = match self.github.latest_commit_date(&entry.path).await? {
            Some(date) => date,
            None => file.sha.clone(),
        };

        Ok(Article::summary(&fm, &entry.path, last_modified))
    }

    async fn write_index(&self, articles: &[Article]) -> Result<()> {
        let path = &self.layout.articles_index;
        let json = serde_json::to_string_pretty(articles).map_err(|source| CmsError::Json {
            path: path.clone(),
            source,
        })?;

        let current = self.github.try_get_file(path).await?;
        self.github
            .put_file(
                path,
                "Sync articles",
                &json,
                current.as_ref().map(|f| f.sha.as_str()),
            )
            .await?;
        Ok(())
    }
}
