//! Public post reader: the index sorted by date and rendered articles

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::articles::{parse_document, ArticleStore};
use super::frontmatter::parse_date_string;
use super::{slug, Article, MarkdownRenderer};
use crate::error::{CmsError, Result};

/// A rendered article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Slug (file stem of the Markdown file)
    pub slug: String,

    /// Post title
    pub title: Option<String>,

    pub description: Option<String>,

    /// Publication date as written in front-matter
    pub date: Option<String>,

    /// Rendered HTML body
    pub content_html: String,
}

impl ArticleStore<'_> {
    /// Index entries sorted newest first
    pub async fn list_posts(&self) -> Result<Vec<Article>> {
        let mut posts = self.read_index().await?;
        sort_by_date_desc(&mut posts);
        Ok(posts)
    }

    /// Load and render a single post by slug
    pub async fn get_post(&self, slug: &str, renderer: &MarkdownRenderer) -> Result<Post> {
        if !slug::is_valid_slug(slug) {
            return Err(CmsError::InvalidSlug(slug.to_string()));
        }

        let file = self.github.get_file(&self.layout.article_path(slug)).await?;
        let (fm, body) = parse_document(&file)?;

        Ok(Post {
            slug: slug.to_string(),
            title: fm.title,
            description: fm.description,
            date: fm.date,
            content_html: renderer.render(body),
        })
    }
}

/// Newest first; entries with a missing or unreadable date go last
pub fn sort_by_date_desc(posts: &mut [Article]) {
    posts.sort_by(|a, b| {
        let da = a.date.as_deref().and_then(parse_date_string);
        let db = b.date.as_deref().and_then(parse_date_string);
        match (da, db) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(path: &str, date: Option<&str>) -> Article {
        Article {
            path: path.to_string(),
            date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_sort_by_date_desc() {
        let mut posts = vec![
            article("a", Some("2023-05-01")),
            article("b", None),
            article("c", Some("2024-01-15T10:00:00.000Z")),
            article("d", Some("not a date")),
            article("e", Some("2023/12/31")),
        ];
        sort_by_date_desc(&mut posts);
        let order: Vec<&str> = posts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(order, vec!["c", "e", "a", "b", "d"]);
    }

    #[test]
    fn test_post_json_uses_camel_case() {
        let post = Post {
            slug: "hi".to_string(),
            title: Some("Hi".to_string()),
            description: None,
            date: None,
            content_html: "<p>x</p>".to_string(),
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["contentHtml"], "<p>x</p>");
    }
}
