//! Article operations against the content repository

use super::{slug, Article, ArticleUpdate, FrontMatter, NewArticle};
use crate::config::ContentConfig;
use crate::error::{CmsError, Result};
use crate::github::{GithubClient, RepoFile};

/// Reads and writes articles and their index
pub struct ArticleStore<'a> {
    pub(super) github: &'a GithubClient,
    pub(super) layout: &'a ContentConfig,
}

impl<'a> ArticleStore<'a> {
    pub fn new(github: &'a GithubClient, layout: &'a ContentConfig) -> Self {
        Self { github, layout }
    }

    /// Read the article index, rebuilding it first when `sync` is set
    pub async fn list(&self, sync: bool) -> Result<Vec<Article>> {
        if sync {
            self.sync().await?;
        }
        self.read_index().await
    }

    /// Current contents of the index file
    pub async fn read_index(&self) -> Result<Vec<Article>> {
        let file = self.github.get_file(&self.layout.articles_index).await?;
        serde_json::from_str(&file.content).map_err(|source| CmsError::Json {
            path: file.path,
            source,
        })
    }

    /// Fetch one article with its front-matter and body
    pub async fn get(&self, path: &str) -> Result<Article> {
        let file = self.github.get_file(path).await?;
        let (fm, body) = parse_document(&file)?;
        Ok(Article::document(fm, body, &file.path))
    }

    /// Rewrite an article's front-matter and body, then rebuild the index
    pub async fn update(&self, update: &ArticleUpdate) -> Result<()> {
        let current = self.github.get_file(&update.path).await?;
        let document = merge_update(&current, update)?;

        self.github
            .put_file(
                &update.path,
                &format!("Update article: {}", update.title),
                &document,
                Some(&current.sha),
            )
            .await?;
        tracing::info!("Updated article {}", update.path);

        self.sync().await?;
        Ok(())
    }

    /// Create a new Markdown file for `article.slug`, then rebuild the index.
    /// Returns the repository path of the new file.
    pub async fn create(&self, article: &NewArticle) -> Result<String> {
        if !slug::is_valid_slug(&article.slug) {
            return Err(CmsError::InvalidSlug(article.slug.clone()));
        }

        let path = self.layout.article_path(&article.slug);
        if self.github.try_get_file(&path).await?.is_some() {
            return Err(CmsError::ArticleExists(article.slug.clone()));
        }

        let fm = FrontMatter {
            title: Some(article.title.clone()),
            description: Some(article.description.clone()),
            date: Some(super::frontmatter::now_iso()),
            ..Default::default()
        };
        let document = fm
            .stringify(&article.content)
            .map_err(|source| CmsError::FrontMatter {
                path: path.clone(),
                source,
            })?;

        self.github
            .put_file(
                &path,
                &format!("Create new article: {}", article.title),
                &document,
                None,
            )
            .await?;
        tracing::info!("Created article {}", path);

        self.sync().await?;
        Ok(path)
    }
}

/// Rewrite `current` with the edited fields, keeping every other front-matter key
fn merge_update(current: &RepoFile, update: &ArticleUpdate) -> Result<String> {
    let (mut fm, _) = parse_document(current)?;

    fm.title = Some(update.title.clone());
    fm.description = Some(update.description.clone());
    fm.last_modified = Some(super::frontmatter::now_iso());

    fm.stringify(&update.content)
        .map_err(|source| CmsError::FrontMatter {
            path: update.path.clone(),
            source,
        })
}

pub(super) fn parse_document(file: &RepoFile) -> Result<(FrontMatter, &str)> {
    FrontMatter::parse(&file.content).map_err(|source| CmsError::FrontMatter {
        path: file.path.clone(),
        source,
    })
}
