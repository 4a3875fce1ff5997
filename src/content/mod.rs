//! Content module - articles, resources and categories stored in the content repository

mod article;
mod articles;
mod collection;
mod frontmatter;
mod markdown;
mod post;
pub mod slug;
mod sync;

pub use article::{Article, ArticleUpdate, NewArticle};
pub use articles::ArticleStore;
pub use collection::{Category, JsonCollection, Resource};
pub use frontmatter::{now_iso, parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{sort_by_date_desc, Post};
