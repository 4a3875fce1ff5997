//! Article model and request payloads

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// Keys owned by `Article` itself, never taken from `extra`
const RESERVED_KEYS: [&str; 6] = ["title", "description", "date", "lastModified", "path", "content"];

/// An article, either as an index entry (no `content`) or a full document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Publication date from front-matter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Last commit date in the index, front-matter value for documents
    #[serde(
        rename = "lastModified",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<String>,

    /// Repository path of the Markdown file
    pub path: String,

    /// Markdown body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Article {
    /// Index entry for a Markdown file
    pub fn summary(fm: &FrontMatter, path: &str, last_modified: String) -> Self {
        Self {
            title: fm.title.clone(),
            description: fm.description.clone(),
            date: fm.date.clone(),
            last_modified: Some(last_modified),
            path: path.to_string(),
            content: None,
            extra: IndexMap::new(),
        }
    }

    /// Full document: every front-matter field plus the body
    pub fn document(mut fm: FrontMatter, body: &str, path: &str) -> Self {
        // The body and the repository path always win over same-named front-matter keys
        for key in RESERVED_KEYS {
            fm.extra.shift_remove(key);
        }
        Self {
            title: fm.title,
            description: fm.description,
            date: fm.date,
            last_modified: fm.last_modified,
            path: path.to_string(),
            content: Some(body.to_string()),
            extra: fm.extra,
        }
    }

    /// File stem of the Markdown path
    pub fn slug(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.strip_suffix(".md").unwrap_or(name)
    }
}

/// Edit submitted for an existing article
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArticleUpdate {
    pub title: String,
    pub description: String,
    pub content: String,
    pub path: String,
}

/// A new article to create under the Markdown directory
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub content: String,
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_entry_json_shape() {
        let fm = FrontMatter {
            title: Some("Hello".to_string()),
            date: Some("2024-01-01".to_string()),
            ..Default::default()
        };
        let entry = Article::summary(&fm, "data/md/hello.md", "2024-02-01T00:00:00Z".to_string());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Hello",
                "date": "2024-01-01",
                "lastModified": "2024-02-01T00:00:00Z",
                "path": "data/md/hello.md"
            })
        );
    }

    #[test]
    fn test_document_flattens_front_matter() {
        let (fm, body) =
            FrontMatter::parse("---\ntitle: Hi\nauthor: Ada\n---\nBody\n").unwrap();
        let article = Article::document(fm, body, "data/md/hi.md");
        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["title"], "Hi");
        assert_eq!(value["author"], "Ada");
        assert_eq!(value["content"], "Body\n");
        assert_eq!(value["path"], "data/md/hi.md");
    }

    #[test]
    fn test_document_body_and_path_beat_front_matter_keys() {
        let (fm, body) = FrontMatter::parse(
            "---\ntitle: Hi\npath: /somewhere/else\ncontent: summary\nauthor: Ada\n---\nReal body\n",
        )
        .unwrap();
        let article = Article::document(fm, body, "data/md/hi.md");
        assert!(!article.extra.contains_key("path"));
        assert!(!article.extra.contains_key("content"));

        let json = serde_json::to_string(&article).unwrap();
        assert_eq!(json.matches("\"path\"").count(), 1);
        assert_eq!(json.matches("\"content\"").count(), 1);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["path"], "data/md/hi.md");
        assert_eq!(value["content"], "Real body\n");
        assert_eq!(value["author"], "Ada");
    }

    #[test]
    fn test_slug_from_path() {
        let article = Article {
            path: "data/md/my-first-post.md".to_string(),
            ..Default::default()
        };
        assert_eq!(article.slug(), "my-first-post");
    }

    #[test]
    fn test_index_entries_deserialize() {
        let raw = r#"[{"title":"A","path":"data/md/a.md","lastModified":"x"}]"#;
        let entries: Vec<Article> = serde_json::from_str(raw).unwrap();
        assert_eq!(entries[0].title.as_deref(), Some("A"));
        assert_eq!(entries[0].last_modified.as_deref(), Some("x"));
        assert!(entries[0].extra.is_empty());
    }
}
