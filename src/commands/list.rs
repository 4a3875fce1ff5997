//! List stored content

use anyhow::Result;

use crate::content::sort_by_date_desc;
use crate::Cms;

/// List content by type
pub async fn run(cms: &Cms, content_type: &str) -> Result<()> {
    match content_type {
        "article" | "articles" => {
            let mut articles = cms.articles().read_index().await?;
            sort_by_date_desc(&mut articles);
            println!("Articles ({}):", articles.len());
            for article in articles {
                println!(
                    "  {} - {} [{}]",
                    article.date.as_deref().unwrap_or("-"),
                    article.title.as_deref().unwrap_or("(untitled)"),
                    article.path
                );
            }
        }
        "resource" | "resources" => {
            let resources = cms.resources().load().await?;
            println!("Resources ({}):", resources.len());
            for resource in resources {
                println!(
                    "  {} - {} [{}]",
                    resource.category, resource.name, resource.url
                );
            }
        }
        "category" | "categories" => {
            let categories = cms.categories().load().await?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} - {}", category.name, category.description);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: articles, resources, categories",
                content_type
            );
        }
    }

    Ok(())
}
