//! Create a new article

use anyhow::Result;

use crate::content::slug::slug_from_title;
use crate::content::NewArticle;
use crate::Cms;

/// Create an article with an empty body; the slug defaults to the slugified title
pub async fn create_article(
    cms: &Cms,
    title: &str,
    slug: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug_from_title(title),
    };

    let article = NewArticle {
        title: title.to_string(),
        description: description.unwrap_or_default().to_string(),
        content: String::new(),
        slug,
    };

    let path = cms.articles().create(&article).await?;
    println!("Created: {}", path);

    Ok(())
}
