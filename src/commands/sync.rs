//! Rebuild the article index

use anyhow::Result;

use crate::Cms;

/// Run a one-off sync and report the number of indexed articles
pub async fn run(cms: &Cms) -> Result<()> {
    let articles = cms.sync().await?;
    println!(
        "Synced {} articles into {}",
        articles.len(),
        cms.config.content.articles_index
    );
    Ok(())
}
